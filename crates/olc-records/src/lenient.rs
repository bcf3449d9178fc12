//! Lenient field coercion for snapshot exports.
//!
//! SQL Server exports are inconsistent about types: bit columns arrive as
//! `true`, `1` or `"1"`, ranks as numbers or numeric strings, dates in a
//! handful of layouts. Every deserializer here accepts any JSON value and
//! falls back to "absent" (or `false` for flags) instead of rejecting the
//! record.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Naive layouts tried in order before RFC 3339 and date-only parsing.
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Key / text coercion. Numbers are rendered as decimal text; empty and
/// whitespace-only strings count as absent.
pub fn text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null => None,
        other => {
            tracing::debug!(value = %other, "text field has unexpected type; treated as absent");
            None
        }
    }
}

/// Sort-rank coercion: integers, integral floats and numeric strings.
pub fn rank(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Bit-field coercion. Anything unrecognised is `false`.
pub fn flag(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => {
            let t = s.trim();
            t == "1" || t.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

/// Timestamp coercion. Offsets are normalised to UTC and dropped.
pub fn timestamp(v: &Value) -> Option<NaiveDateTime> {
    let raw = v.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }
    parse_timestamp(raw).or_else(|| {
        tracing::debug!(value = raw, "unparseable timestamp; treated as absent");
        None
    })
}

/// Parse one of the accepted timestamp layouts (SQL Server, ISO 8601,
/// RFC 3339, bare date).
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    for layout in NAIVE_LAYOUTS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_utc());
    }
    // "2024-01-02T03:04:05Z" without fractional seconds in odd spacing
    if let Some(stripped) = raw.strip_suffix('Z') {
        for layout in NAIVE_LAYOUTS {
            if let Ok(ts) = NaiveDateTime::parse_from_str(stripped, layout) {
                return Some(ts);
            }
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn de_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(text(&v))
}

pub fn de_rank<'de, D>(d: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(rank(&v))
}

pub fn de_flag<'de, D>(d: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(flag(&v))
}

pub fn de_timestamp<'de, D>(d: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(d)?;
    Ok(timestamp(&v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn text_accepts_strings_and_numbers() {
        assert_eq!(text(&json!("C1")), Some("C1".to_string()));
        assert_eq!(text(&json!(42)), Some("42".to_string()));
        assert_eq!(text(&json!("")), None);
        assert_eq!(text(&json!(null)), None);
        assert_eq!(text(&json!({"nested": true})), None);
        assert_eq!(text(&json!([1, 2])), None);
    }

    #[test]
    fn whitespace_only_text_is_absent() {
        assert_eq!(text(&json!("   ")), None);
        assert_eq!(text(&json!("\t\n")), None);
        assert_eq!(text(&json!(" C1 ")), Some(" C1 ".to_string()));
    }

    #[test]
    fn rank_coerces_numeric_shapes() {
        assert_eq!(rank(&json!(3)), Some(3));
        assert_eq!(rank(&json!(4.0)), Some(4));
        assert_eq!(rank(&json!(4.5)), None);
        assert_eq!(rank(&json!(" 7 ")), Some(7));
        assert_eq!(rank(&json!("seven")), None);
        assert_eq!(rank(&json!(true)), None);
    }

    #[test]
    fn flag_handles_bit_columns() {
        assert!(flag(&json!(true)));
        assert!(flag(&json!(1)));
        assert!(flag(&json!("1")));
        assert!(flag(&json!("TRUE")));
        assert!(!flag(&json!(0)));
        assert!(!flag(&json!("0")));
        assert!(!flag(&json!("yes")));
        assert!(!flag(&json!(null)));
    }

    #[test]
    fn timestamp_accepts_sql_server_and_iso_layouts() {
        let expect = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 7)
            .unwrap();
        assert_eq!(timestamp(&json!("2024-03-04 05:06:07")), Some(expect));
        assert_eq!(timestamp(&json!("2024-03-04T05:06:07")), Some(expect));
        assert_eq!(timestamp(&json!("2024-03-04T05:06:07Z")), Some(expect));
        assert_eq!(timestamp(&json!("2024-03-04T07:06:07+02:00")), Some(expect));

        let with_millis = timestamp(&json!("2024-03-04 05:06:07.250")).unwrap();
        assert_eq!(with_millis.and_utc().timestamp_subsec_millis(), 250);

        let midnight = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(timestamp(&json!("2024-03-04")), Some(midnight));
        assert_eq!(timestamp(&json!("not a date")), None);
        assert_eq!(timestamp(&json!(20240304)), None);
    }
}
