use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use olc_config::sha256_hex;
use serde::{Deserialize, Serialize};

pub const MANIFEST_SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportManifest {
    pub schema_version: i32,
    pub report_name: String,
    pub report_file: String,
    pub report_sha256: String,
    pub config_hash: String,
    pub reference_time: NaiveDateTime,
    /// Collection name -> records loaded.
    pub input_counts: BTreeMap<String, usize>,
    /// Companion files written next to the report (file name -> sha256).
    pub companions: BTreeMap<String, String>,
}

pub struct WriteReportArgs<'a> {
    /// Report destination; the parent directory is created if missing.
    pub report_path: &'a Path,
    pub report_name: &'a str,
    pub body: &'a str,
    pub config_hash: &'a str,
    pub reference_time: NaiveDateTime,
    pub input_counts: BTreeMap<String, usize>,
    /// Extra files (name, contents) written beside the report.
    pub companions: Vec<(&'a str, String)>,
}

#[derive(Debug, Clone)]
pub struct WrittenArtifacts {
    pub report_path: PathBuf,
    pub manifest_path: PathBuf,
    pub companion_paths: Vec<PathBuf>,
}

/// `<dir>/<stem>.manifest.json` for a report at `<dir>/<stem>.<ext>`.
pub fn manifest_path_for(report_path: &Path) -> PathBuf {
    let stem = report_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "report".to_string());
    report_path.with_file_name(format!("{stem}.manifest.json"))
}

/// Write a fully rendered report, its companions, then its manifest.
///
/// Everything is rendered in memory by the caller; the manifest is written
/// last so its presence means the report set is complete.
pub fn write_report_artifacts(args: WriteReportArgs<'_>) -> Result<WrittenArtifacts> {
    let report_path = args.report_path.to_path_buf();
    let dir = match report_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("create output dir failed: {}", dir.display()))?;

    let report_file = report_path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .with_context(|| format!("report path has no file name: {}", report_path.display()))?;

    let mut companions = BTreeMap::new();
    let mut companion_paths = Vec::new();
    for (name, contents) in &args.companions {
        let path = dir.join(name);
        fs::write(&path, contents)
            .with_context(|| format!("write companion failed: {}", path.display()))?;
        companions.insert(name.to_string(), sha256_hex(contents.as_bytes()));
        companion_paths.push(path);
    }

    fs::write(&report_path, args.body)
        .with_context(|| format!("write report failed: {}", report_path.display()))?;

    let manifest = ReportManifest {
        schema_version: MANIFEST_SCHEMA_VERSION,
        report_name: args.report_name.to_string(),
        report_file,
        report_sha256: sha256_hex(args.body.as_bytes()),
        config_hash: args.config_hash.to_string(),
        reference_time: args.reference_time,
        input_counts: args.input_counts,
        companions,
    };

    let manifest_path = manifest_path_for(&report_path);
    let json = serde_json::to_string_pretty(&manifest).context("serialize manifest failed")?;
    fs::write(&manifest_path, format!("{json}\n"))
        .with_context(|| format!("write manifest failed: {}", manifest_path.display()))?;

    tracing::info!(
        report = %report_path.display(),
        manifest = %manifest_path.display(),
        "report written"
    );

    Ok(WrittenArtifacts {
        report_path,
        manifest_path,
        companion_paths,
    })
}
