use std::fs;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::guards::enforce_no_secret_literals;

/// Merged config plus its canonical form and hash.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// No layers at all: every setting takes its default.
    pub fn empty() -> Result<Self> {
        load_layered_yaml_from_strings(&[])
    }
}

/// Read and merge YAML files in order.
pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let docs = paths
        .iter()
        .map(|p| fs::read_to_string(p).with_context(|| format!("failed to read config layer: {p}")))
        .collect::<Result<Vec<String>>>()?;

    let doc_refs: Vec<&str> = docs.iter().map(String::as_str).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

/// Merge YAML documents in order. Empty documents are skipped.
pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in yaml_docs.iter().enumerate() {
        let layer: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("config layer {i} is not valid yaml"))?;
        let layer = serde_json::to_value(layer)
            .with_context(|| format!("config layer {i} cannot be represented as json"))?;
        if layer.is_null() {
            continue;
        }
        overlay(&mut merged, layer);
    }

    enforce_no_secret_literals(&merged)?;

    // serde_json::Map is BTreeMap-backed, so keys serialize sorted no
    // matter how the YAML was ordered.
    let canonical_json =
        serde_json::to_string(&merged).context("canonical config serialization failed")?;
    let config_hash = sha256_hex(canonical_json.as_bytes());

    tracing::debug!(layers = yaml_docs.len(), %config_hash, "config layers merged");

    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

/// Objects merge key by key; anything else in `top` replaces `base`.
fn overlay(base: &mut Value, top: Value) {
    match (base, top) {
        (Value::Object(base_map), Value::Object(top_map)) => {
            for (k, v) in top_map {
                match base_map.get_mut(&k) {
                    Some(existing) => overlay(existing, v),
                    None => {
                        base_map.insert(k, v);
                    }
                }
            }
        }
        (slot, other) => *slot = other,
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn overlay_merges_objects_and_replaces_scalars() {
        let mut base = json!({"report": {"banner_width": 100, "samples": {"orphaned": 10}}});
        overlay(
            &mut base,
            json!({"report": {"samples": {"orphaned": 3}}, "output": {"dir": "x"}}),
        );
        assert_eq!(
            base,
            json!({
                "report": {"banner_width": 100, "samples": {"orphaned": 3}},
                "output": {"dir": "x"}
            })
        );
    }

    #[test]
    fn sha256_of_empty_input() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
