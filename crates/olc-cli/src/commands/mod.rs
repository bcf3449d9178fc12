//! Command handler modules for olc.
//!
//! Shared setup (config layering, snapshot location, reference time) lives
//! here. Command-specific logic lives in the submodules.

pub mod clients;
pub mod lookups;
pub mod operators;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use olc_config::{LoadedConfig, Settings, UnusedKeyPolicy};
use olc_records::lenient::parse_timestamp;
use olc_report::{write_report_artifacts, WriteReportArgs};
use olc_snapshot::{SnapshotCollection, SnapshotDir};

/// Flags shared by every subcommand.
pub struct Globals {
    pub config_paths: Vec<String>,
    pub data_dir: Option<PathBuf>,
    pub strict_config: bool,
    pub as_of: Option<String>,
}

/// Everything a command needs besides its own arguments.
pub struct RunContext {
    pub settings: Settings,
    pub config_hash: String,
    pub snapshot: SnapshotDir,
    pub as_of: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub fn prepare(g: &Globals) -> Result<RunContext> {
    let loaded = if g.config_paths.is_empty() {
        LoadedConfig::empty()?
    } else {
        let path_refs: Vec<&str> = g.config_paths.iter().map(|s| s.as_str()).collect();
        olc_config::load_layered_yaml(&path_refs)?
    };

    let policy = if g.strict_config {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    olc_config::report_unused_keys(&loaded.config_json, policy)?;

    let mut settings = Settings::from_config_json(&loaded.config_json)?
        .with_env_overrides(|k| std::env::var(k).ok());
    if let Some(dir) = &g.data_dir {
        settings.data_dir = dir.clone();
    }

    let as_of = parse_as_of(g.as_of.as_deref())?;

    tracing::debug!(
        data_dir = %settings.data_dir.display(),
        config_hash = %loaded.config_hash,
        %as_of,
        "run context ready"
    );

    Ok(RunContext {
        snapshot: SnapshotDir::new(&settings.data_dir),
        settings,
        config_hash: loaded.config_hash,
        as_of,
    })
}

/// `--as-of` in any accepted snapshot timestamp layout; local now when absent.
pub fn parse_as_of(raw: Option<&str>) -> Result<NaiveDateTime> {
    match raw {
        None => Ok(chrono::Local::now().naive_local()),
        Some(s) => parse_timestamp(s.trim()).with_context(|| {
            format!("invalid --as-of '{s}'. expected e.g. 2026-10-16 or 2026-10-16T08:00:00")
        }),
    }
}

impl RunContext {
    pub fn load<T: SnapshotCollection>(&self) -> Result<Vec<T>> {
        self.snapshot
            .load::<T>()
            .with_context(|| format!("load {} failed", T::FILE_NAME))
    }

    pub fn width(&self) -> usize {
        self.settings.report.banner_width
    }
}

/// Collection name -> record count, for manifests.
#[derive(Default)]
pub struct InputCounts(BTreeMap<String, usize>);

impl InputCounts {
    pub fn add<T: SnapshotCollection>(mut self, records: &[T]) -> Self {
        self.0.insert(T::WRAPPER_KEY.to_string(), records.len());
        self
    }
}

/// Print to stdout, or write the report with its manifest.
pub fn emit(
    ctx: &RunContext,
    target: Option<&Path>,
    report_name: &str,
    body: &str,
    counts: InputCounts,
    companions: Vec<(&str, String)>,
) -> Result<()> {
    let Some(path) = target else {
        print!("{body}");
        return Ok(());
    };

    let written = write_report_artifacts(WriteReportArgs {
        report_path: path,
        report_name,
        body,
        config_hash: &ctx.config_hash,
        reference_time: ctx.as_of,
        input_counts: counts.0,
        companions,
    })?;

    println!("report_written={}", written.report_path.display());
    for p in &written.companion_paths {
        println!("companion_written={}", p.display());
    }
    println!("manifest_written={}", written.manifest_path.display());
    Ok(())
}

/// Write a standalone file into `dir`, creating it when missing.
pub fn write_into(dir: &Path, name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create output dir failed: {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("write failed: {}", path.display()))?;
    Ok(path)
}
