//! olc-report
//!
//! Plain-ASCII renderers for every report plus the on-disk artifact layer.
//! Renderers return the complete report as a `String`; nothing touches the
//! filesystem until [`write_report_artifacts`] is handed finished bytes.

mod artifacts;
mod clients;
mod export;
mod operators;
mod text;

pub use artifacts::{
    manifest_path_for, write_report_artifacts, ReportManifest, WriteReportArgs, WrittenArtifacts,
    MANIFEST_SCHEMA_VERSION,
};
pub use clients::{render_client_relationships, CLIENT_REPORT_FILE};
pub use export::{distribution_csv, OPERATOR_SUMMARY_CSV};
pub use operators::{
    render_cert_type_query, render_certification_check, render_days_in_status,
    render_operator_summary, render_status_diagnostics, render_status_type_search,
    OPERATOR_REPORT_FILE,
};
pub use text::ReportText;
