use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Value prefixes of well-known credential formats: OpenAI and Stripe keys,
/// AWS access key IDs, PEM blocks, GitHub/GitLab PATs, Slack bot tokens.
const SECRET_PREFIXES: &[&str] = &[
    "sk-", "sk_live", "AKIA", "-----BEGIN", "ghp_", "glpat-", "xoxb-",
];

/// Keys whose values must never be literals in config.
const SECRET_KEYS: &[&str] = &["password", "pwd", "connection_string"];

/// Connection-string fragments that carry credentials inline.
const SECRET_FRAGMENTS: &[&str] = &["pwd=", "password="];

/// JSON-pointer prefixes read by [`crate::Settings::from_config_json`].
///
/// Must list what the code actually reads. A leaf outside every prefix is
/// reported as unused.
pub const CONSUMED_POINTERS: &[&str] = &[
    "/snapshot/data_dir",
    "/report/banner_width",
    "/report/samples/missing_client",
    "/report/samples/missing_pizza_status",
    "/report/samples/orphaned",
    "/report/samples/dangling",
    "/report/top_cert_types",
    "/report/overdue_days",
    "/output/dir",
];

/// What to do when the config carries keys nothing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    /// Sorted, unique.
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// List config leaves outside [`CONSUMED_POINTERS`].
/// `Fail` turns a non-empty list into CONFIG_UNUSED_KEYS; `Warn` logs it.
pub fn report_unused_keys(config_json: &Value, policy: UnusedKeyPolicy) -> Result<UnusedKeyReport> {
    let mut unused: Vec<String> = leaves(config_json)
        .into_iter()
        .map(|(ptr, _)| ptr)
        .filter(|ptr| !CONSUMED_POINTERS.iter().any(|c| covers(c, ptr)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        unused_leaf_pointers: unused,
    };
    if report.is_clean() {
        return Ok(report);
    }

    let preview = preview(&report.unused_leaf_pointers);
    match policy {
        UnusedKeyPolicy::Fail => bail!(
            "CONFIG_UNUSED_KEYS: {} config key(s) are not read by any command: {}",
            report.unused_leaf_pointers.len(),
            preview
        ),
        UnusedKeyPolicy::Warn => {
            tracing::warn!(unused = %preview, "config contains keys no command reads")
        }
    }
    Ok(report)
}

/// Refuse literal credentials anywhere in the merged config. The value is
/// never echoed.
pub(crate) fn enforce_no_secret_literals(config_json: &Value) -> Result<()> {
    for (ptr, v) in leaves(config_json) {
        let Some(s) = v.as_str() else {
            continue;
        };
        let key = ptr.rsplit('/').next().unwrap_or("").to_ascii_lowercase();
        let under_secret_key = SECRET_KEYS.contains(&key.as_str()) && !s.trim().is_empty();
        if under_secret_key || looks_like_secret(s) {
            bail!("CONFIG_SECRET_DETECTED leaf={ptr} value=REDACTED");
        }
    }
    Ok(())
}

fn looks_like_secret(s: &str) -> bool {
    let t = s.trim();
    let lower = t.to_ascii_lowercase();
    SECRET_FRAGMENTS.iter().any(|f| lower.contains(f))
        || (t.len() >= 8 && SECRET_PREFIXES.iter().any(|p| t.starts_with(p)))
}

/// Every scalar leaf with its JSON pointer. The root itself is `/` when it
/// is a scalar; empty objects and arrays contribute nothing.
fn leaves(v: &Value) -> Vec<(String, &Value)> {
    fn walk<'a>(v: &'a Value, ptr: String, out: &mut Vec<(String, &'a Value)>) {
        match v {
            Value::Object(map) => {
                for (k, child) in map {
                    walk(child, format!("{ptr}/{}", escape_token(k)), out);
                }
            }
            Value::Array(items) => {
                for (i, child) in items.iter().enumerate() {
                    walk(child, format!("{ptr}/{i}"), out);
                }
            }
            _ if ptr.is_empty() => out.push(("/".to_string(), v)),
            _ => out.push((ptr, v)),
        }
    }

    let mut out = Vec::new();
    walk(v, String::new(), &mut out);
    out
}

/// RFC 6901 token escaping.
fn escape_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

/// `/a/b` covers `/a/b` and `/a/b/c` but not `/a/bc`.
fn covers(prefix: &str, leaf: &str) -> bool {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match leaf.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn preview(items: &[String]) -> String {
    const SHOWN: usize = 12;
    let mut s = items.iter().take(SHOWN).cloned().collect::<Vec<_>>().join(", ");
    if items.len() > SHOWN {
        s.push_str(&format!(", ... ({} more)", items.len() - SHOWN));
    }
    s
}
