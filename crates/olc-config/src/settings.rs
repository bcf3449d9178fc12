use std::path::PathBuf;

use anyhow::{bail, Result};
use olc_reconcile::SampleLimits;
use serde::Serialize;
use serde_json::Value;

/// Env var overriding `/snapshot/data_dir`.
pub const ENV_DATA_DIR: &str = "OLC_DATA_DIR";

const DEFAULT_DATA_DIR: &str = "OrionOperatorLifecycleWebApp/App_Data";
const DEFAULT_OUTPUT_DIR: &str = "Queries";

/// Knobs that shape rendered reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSettings {
    pub banner_width: usize,
    pub samples: SampleLimits,
    pub top_cert_types: usize,
    pub overdue_days: i64,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            banner_width: 100,
            samples: SampleLimits::default(),
            top_cert_types: 10,
            overdue_days: 30,
        }
    }
}

/// Typed view of the merged config. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub report: ReportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            report: ReportSettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from the merged config document.
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let defaults = Settings::default();
        let d = defaults.report;

        let samples = SampleLimits {
            missing_client: read_count(cfg, "/report/samples/missing_client")?
                .unwrap_or(d.samples.missing_client),
            missing_pizza_status: read_count(cfg, "/report/samples/missing_pizza_status")?
                .unwrap_or(d.samples.missing_pizza_status),
            orphaned: read_count(cfg, "/report/samples/orphaned")?
                .unwrap_or(d.samples.orphaned),
            dangling: read_count(cfg, "/report/samples/dangling")?
                .unwrap_or(d.samples.dangling),
        };

        let report = ReportSettings {
            banner_width: read_count(cfg, "/report/banner_width")?.unwrap_or(d.banner_width),
            samples,
            top_cert_types: read_count(cfg, "/report/top_cert_types")?
                .unwrap_or(d.top_cert_types),
            overdue_days: read_count(cfg, "/report/overdue_days")?
                .map(|n| n as i64)
                .unwrap_or(d.overdue_days),
        };

        Ok(Settings {
            data_dir: read_path(cfg, "/snapshot/data_dir")?.unwrap_or(defaults.data_dir),
            output_dir: read_path(cfg, "/output/dir")?.unwrap_or(defaults.output_dir),
            report,
        })
    }

    /// Apply environment overrides. `lookup` is `std::env::var` in production.
    pub fn with_env_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|s| !s.trim().is_empty()) {
            tracing::debug!(data_dir = %dir, "data dir overridden from {ENV_DATA_DIR}");
            self.data_dir = PathBuf::from(dir);
        }
        self
    }
}

fn read_count(cfg: &Value, ptr: &str) -> Result<Option<usize>> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => match v.as_u64() {
            Some(n) if n > 0 => Ok(Some(n as usize)),
            _ => bail!("CONFIG_INVALID {ptr}: expected a positive integer, got {v}"),
        },
    }
}

fn read_path(cfg: &Value, ptr: &str) -> Result<Option<PathBuf>> {
    match cfg.pointer(ptr) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(PathBuf::from(s.trim()))),
        Some(v) => bail!("CONFIG_INVALID {ptr}: expected a non-empty path string, got {v}"),
    }
}
