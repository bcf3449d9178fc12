//! Layered config: hashing determinism, typed settings, unused-key guard.

use olc_config::{
    load_layered_yaml, load_layered_yaml_from_strings, report_unused_keys, LoadedConfig,
    Settings, UnusedKeyPolicy, ENV_DATA_DIR,
};
use std::path::PathBuf;

const BASE_YAML: &str = r#"
snapshot:
  data_dir: "App_Data"
report:
  banner_width: 80
  samples:
    missing_client: 3
output:
  dir: "out"
"#;

const BASE_YAML_REORDERED: &str = r#"
output:
  dir: "out"
report:
  samples:
    missing_client: 3
  banner_width: 80
snapshot:
  data_dir: "App_Data"
"#;

const OVERLAY_YAML: &str = r#"
report:
  samples:
    orphaned: 25
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(
        a.config_hash, b.config_hash,
        "reordering keys in YAML must not change the hash"
    );
}

#[test]
fn overlay_overrides_and_keeps_base() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    let s = Settings::from_config_json(&loaded.config_json).unwrap();

    assert_eq!(s.data_dir, PathBuf::from("App_Data"));
    assert_eq!(s.output_dir, PathBuf::from("out"));
    assert_eq!(s.report.banner_width, 80);
    assert_eq!(s.report.samples.missing_client, 3);
    assert_eq!(s.report.samples.orphaned, 25);
    // untouched keys keep defaults
    assert_eq!(s.report.samples.missing_pizza_status, 10);
    assert_eq!(s.report.overdue_days, 30);
}

#[test]
fn empty_config_yields_defaults() {
    let loaded = LoadedConfig::empty().unwrap();
    let s = Settings::from_config_json(&loaded.config_json).unwrap();
    assert_eq!(s, Settings::default());

    let empty_layer = load_layered_yaml_from_strings(&[BASE_YAML, ""]).unwrap();
    let s = Settings::from_config_json(&empty_layer.config_json).unwrap();
    assert_eq!(s.report.banner_width, 80, "empty layer must not wipe the base");
}

#[test]
fn invalid_sample_size_is_rejected() {
    let loaded = load_layered_yaml_from_strings(&["report:\n  samples:\n    orphaned: 0\n"])
        .unwrap();
    let err = Settings::from_config_json(&loaded.config_json).unwrap_err();
    assert!(err.to_string().contains("CONFIG_INVALID"));
}

#[test]
fn env_override_wins_over_config() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let s = Settings::from_config_json(&loaded.config_json)
        .unwrap()
        .with_env_overrides(|k| (k == ENV_DATA_DIR).then(|| "/snapshots/2026-10".to_string()));
    assert_eq!(s.data_dir, PathBuf::from("/snapshots/2026-10"));
}

#[test]
fn literal_database_password_is_refused() {
    let yaml = r#"
database:
  server: "orion.example.net"
  password: "hunter22"
"#;
    let err = load_layered_yaml_from_strings(&[yaml]).unwrap_err();
    assert!(err.to_string().contains("CONFIG_SECRET_DETECTED"));
    assert!(!err.to_string().contains("hunter22"));

    let conn = r#"
database:
  dsn: "DRIVER={ODBC Driver 17};SERVER=x;UID=admin;PWD=hunter22"
"#;
    assert!(load_layered_yaml_from_strings(&[conn]).is_err());
}

#[test]
fn unused_keys_warn_or_fail() {
    let yaml = r#"
report:
  banner_width: 90
  colour: "red"
"#;
    let loaded = load_layered_yaml_from_strings(&[yaml]).unwrap();

    let warn = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Warn).unwrap();
    assert_eq!(warn.unused_leaf_pointers, vec!["/report/colour".to_string()]);

    let err = report_unused_keys(&loaded.config_json, UnusedKeyPolicy::Fail).unwrap_err();
    assert!(err.to_string().contains("CONFIG_UNUSED_KEYS"));

    let clean = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert!(report_unused_keys(&clean.config_json, UnusedKeyPolicy::Fail)
        .unwrap()
        .is_clean());
}

#[test]
fn layers_load_from_files() -> anyhow::Result<()> {
    let tmp = tempfile::tempdir()?;
    let base = tmp.path().join("base.yaml");
    let overlay = tmp.path().join("overlay.yaml");
    std::fs::write(&base, BASE_YAML)?;
    std::fs::write(&overlay, OVERLAY_YAML)?;

    let base_s = base.to_string_lossy().to_string();
    let overlay_s = overlay.to_string_lossy().to_string();
    let from_files = load_layered_yaml(&[base_s.as_str(), overlay_s.as_str()])?;
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML])?;
    assert_eq!(from_files.config_hash, from_strings.config_hash);

    assert!(load_layered_yaml(&["/definitely/not/here.yaml"]).is_err());
    Ok(())
}
