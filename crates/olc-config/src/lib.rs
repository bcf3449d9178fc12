//! olc-config
//!
//! Layered YAML configuration for the reporting tools.
//!
//! Layers are merged in order (earlier = base, later overrides), converted
//! to JSON, canonicalized and hashed. The hash is stamped into every output
//! manifest so a report can be traced back to the exact settings that
//! produced it.

mod guards;
mod layering;
mod settings;

pub use guards::{report_unused_keys, UnusedKeyPolicy, UnusedKeyReport, CONSUMED_POINTERS};
pub use layering::{load_layered_yaml, load_layered_yaml_from_strings, sha256_hex, LoadedConfig};
pub use settings::{ReportSettings, Settings, ENV_DATA_DIR};
