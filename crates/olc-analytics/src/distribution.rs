use std::collections::BTreeMap;

use olc_records::{Operator, UNKNOWN};
use serde::Serialize;

/// Bucket for operators without a `Status`.
pub const NO_STATUS: &str = "None";

/// Operator head counts by division, by status and by both.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OperatorDistribution {
    pub total: usize,
    pub by_division: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub by_division_status: BTreeMap<String, BTreeMap<String, usize>>,
}

/// One `Division,Status,Count` line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DistributionRow<'a> {
    #[serde(rename = "Division")]
    pub division: &'a str,
    #[serde(rename = "Status")]
    pub status: &'a str,
    #[serde(rename = "Count")]
    pub count: usize,
}

impl OperatorDistribution {
    /// Division+status rows, ascending by division then status.
    pub fn rows(&self) -> Vec<DistributionRow<'_>> {
        self.by_division_status
            .iter()
            .flat_map(|(division, statuses)| {
                statuses.iter().map(move |(status, count)| DistributionRow {
                    division,
                    status,
                    count: *count,
                })
            })
            .collect()
    }
}

pub fn operator_distribution(operators: &[Operator]) -> OperatorDistribution {
    let mut out = OperatorDistribution {
        total: operators.len(),
        ..OperatorDistribution::default()
    };

    for op in operators {
        let division = op.division_id.as_deref().unwrap_or(UNKNOWN);
        let status = op.status.as_deref().unwrap_or(NO_STATUS);

        *out.by_division.entry(division.to_string()).or_default() += 1;
        *out.by_status.entry(status.to_string()).or_default() += 1;
        *out
            .by_division_status
            .entry(division.to_string())
            .or_default()
            .entry(status.to_string())
            .or_default() += 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(division: Option<&str>, status: Option<&str>) -> Operator {
        Operator {
            division_id: division.map(str::to_string),
            status: status.map(str::to_string),
            ..Operator::default()
        }
    }

    #[test]
    fn missing_division_and_status_use_fallback_buckets() {
        let ops = vec![
            op(Some("5 - CA"), Some("Active")),
            op(None, Some("Active")),
            op(Some("5 - CA"), None),
            op(Some("5 - CA"), Some("Active")),
        ];
        let d = operator_distribution(&ops);

        assert_eq!(d.total, 4);
        assert_eq!(d.by_division["5 - CA"], 3);
        assert_eq!(d.by_division[UNKNOWN], 1);
        assert_eq!(d.by_status["Active"], 3);
        assert_eq!(d.by_status[NO_STATUS], 1);

        let rows: Vec<(&str, &str, usize)> = d
            .rows()
            .iter()
            .map(|r| (r.division, r.status, r.count))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("5 - CA", "Active", 2),
                ("5 - CA", NO_STATUS, 1),
                (UNKNOWN, "Active", 1),
            ]
        );
    }
}
