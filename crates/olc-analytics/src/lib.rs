//! olc-analytics
//!
//! Operator-centric summaries over a loaded snapshot:
//! - division / status distribution
//! - certification and status-history coverage
//! - days an operator has spent in the current status
//! - filtered cert-type and status-type lookups
//!
//! Pure functions over borrowed records. The reference time for day
//! arithmetic is always supplied by the caller.

mod coverage;
mod days_in_status;
mod distribution;
mod queries;

pub use coverage::{
    certification_coverage, tracker_coverage, CertificationCoverage, CertifiedOperator,
    CountStats, NameCount, TrackerCoverage,
};
pub use days_in_status::{
    days_in_status, diagnose_operator, overdue_summary, DaysInStatus, OperatorDays,
    OverdueSummary, ResolvedStatusId, StatusDiagnostics,
};
pub use distribution::{operator_distribution, DistributionRow, OperatorDistribution, NO_STATUS};
pub use queries::{find_status_types, query_cert_types, CertTypeGroup, CertTypeQuery};
