//! Days an operator has spent in the current status.
//!
//! The operator's `Status` is matched (exactly) to a StatusType of the same
//! division. The most recent tracker record for that operator and that
//! StatusType ID marks when the status was entered. When either lookup
//! fails the outcome says which one, and [`diagnose_operator`] explains why.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use olc_reconcile::{build_lookup, sort_with_optional_key, MissingPolicy, Sample};
use olc_records::{Operator, StatusTracker, StatusType, UNKNOWN};
use serde::Serialize;

const RECENT_RECORDS: usize = 5;
const RESOLVED_STATUS_IDS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DaysInStatus {
    Days {
        days: i64,
        since: NaiveDateTime,
        overdue: bool,
    },
    /// No StatusType in the operator's division carries the operator's Status.
    NoMatchingStatusType,
    /// The StatusType exists but no dated tracker record points at it.
    NoTrackerRecords { status_type_id: Option<String> },
}

impl DaysInStatus {
    pub fn days(&self) -> Option<i64> {
        match self {
            DaysInStatus::Days { days, .. } => Some(*days),
            _ => None,
        }
    }

    pub fn is_overdue(&self) -> bool {
        matches!(self, DaysInStatus::Days { overdue: true, .. })
    }
}

fn matching_status_type<'a>(op: &Operator, status_types: &'a [StatusType]) -> Option<&'a StatusType> {
    let status = op.status.as_deref()?;
    status_types.iter().find(|st| {
        st.status.as_deref() == Some(status) && st.division_id == op.division_id
    })
}

fn operator_records<'a>(op: &Operator, tracker: &'a [StatusTracker]) -> Vec<&'a StatusTracker> {
    match op.id.as_deref() {
        Some(id) => tracker
            .iter()
            .filter(|t| t.operator_id.as_deref() == Some(id))
            .collect(),
        None => Vec::new(),
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

fn outcome_for(
    matched: Option<&StatusType>,
    records: &[&StatusTracker],
    as_of: NaiveDateTime,
    overdue_days: i64,
) -> DaysInStatus {
    let Some(st) = matched else {
        return DaysInStatus::NoMatchingStatusType;
    };

    let since = records
        .iter()
        .filter(|t| t.status_id.is_some() && t.status_id == st.id)
        .filter_map(|t| t.date)
        .max();

    match since {
        Some(since) => {
            // Whole days, floored: half a day before `since` is -1, not 0.
            let days = (as_of - since).num_seconds().div_euclid(SECONDS_PER_DAY);
            DaysInStatus::Days {
                days,
                since,
                overdue: days >= overdue_days,
            }
        }
        None => DaysInStatus::NoTrackerRecords {
            status_type_id: st.id.clone(),
        },
    }
}

/// Whole days between entering the current status and `as_of`.
pub fn days_in_status(
    op: &Operator,
    status_types: &[StatusType],
    tracker: &[StatusTracker],
    as_of: NaiveDateTime,
    overdue_days: i64,
) -> DaysInStatus {
    let records = operator_records(op, tracker);
    outcome_for(matching_status_type(op, status_types), &records, as_of, overdue_days)
}

// ---------------------------------------------------------------------------
// All operators
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OperatorDays {
    pub operator_id: Option<String>,
    pub name: String,
    pub division: String,
    pub status: String,
    pub outcome: DaysInStatus,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverdueSummary {
    pub as_of: NaiveDateTime,
    pub overdue_days: i64,
    /// Non-deleted operators, longest time in status first, unknowns last.
    pub operators: Vec<OperatorDays>,
    pub overdue: usize,
    pub unknown: usize,
}

pub fn overdue_summary(
    operators: &[Operator],
    status_types: &[StatusType],
    tracker: &[StatusTracker],
    as_of: NaiveDateTime,
    overdue_days: i64,
) -> OverdueSummary {
    let mut rows: Vec<OperatorDays> = operators
        .iter()
        .filter(|op| !op.is_deleted)
        .map(|op| OperatorDays {
            operator_id: op.id.clone(),
            name: op.display_name(),
            division: op.division_id.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            status: op.status.clone().unwrap_or_else(|| UNKNOWN.to_string()),
            outcome: days_in_status(op, status_types, tracker, as_of, overdue_days),
        })
        .collect();

    sort_with_optional_key(&mut rows, |r| r.outcome.days().map(Reverse), MissingPolicy::Last);

    let overdue = rows.iter().filter(|r| r.outcome.is_overdue()).count();
    let unknown = rows.iter().filter(|r| r.outcome.days().is_none()).count();

    OverdueSummary {
        as_of,
        overdue_days,
        operators: rows,
        overdue,
        unknown,
    }
}

// ---------------------------------------------------------------------------
// Single-operator diagnostics
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedStatusId {
    pub status_id: String,
    /// `"<Status> (<DivisionID>)"`, or `None` when no StatusType has that ID.
    pub resolved: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusDiagnostics {
    pub operator: Operator,
    pub tracker_record_count: usize,
    pub matched_status_type: Option<StatusType>,
    pub outcome: DaysInStatus,
    /// Status text of a StatusType that only matches case-insensitively.
    pub case_only_match: Option<String>,
    /// `Status` and `StatusName` disagree on the operator record.
    pub status_name_mismatch: bool,
    /// Distinct tracker StatusIDs, ascending.
    pub status_ids: Sample<ResolvedStatusId>,
    /// Most recent tracker records first; undated ones last.
    pub recent_records: Vec<StatusTracker>,
}

/// Explain a days-in-status outcome for one operator.
pub fn diagnose_operator(
    op: &Operator,
    status_types: &[StatusType],
    tracker: &[StatusTracker],
    as_of: NaiveDateTime,
    overdue_days: i64,
) -> StatusDiagnostics {
    let records = operator_records(op, tracker);
    let matched = matching_status_type(op, status_types);
    let outcome = outcome_for(matched, &records, as_of, overdue_days);

    let case_only_match = match (matched, op.status.as_deref()) {
        (None, Some(status)) => {
            let wanted = status.to_lowercase();
            status_types
                .iter()
                .find(|st| {
                    st.division_id == op.division_id
                        && st
                            .status
                            .as_deref()
                            .is_some_and(|s| s.to_lowercase() == wanted)
                })
                .and_then(|st| st.status.clone())
        }
        _ => None,
    };

    let names = build_lookup(
        status_types,
        |st| st.id.as_deref(),
        |st| format!("{} ({})", st.status_name(), st.division()),
    );
    let distinct: BTreeSet<&str> = records.iter().filter_map(|t| t.status_id.as_deref()).collect();
    let status_ids = Sample::first_n(
        distinct.into_iter().map(|id| ResolvedStatusId {
            status_id: id.to_string(),
            resolved: names.get(id).cloned(),
        }),
        RESOLVED_STATUS_IDS,
    );

    let mut recent: Vec<StatusTracker> = records.iter().map(|t| (*t).clone()).collect();
    sort_with_optional_key(&mut recent, |t| t.date.map(Reverse), MissingPolicy::Last);
    recent.truncate(RECENT_RECORDS);

    if outcome.days().is_none() {
        tracing::debug!(operator = ?op.id, ?outcome, "days in status unresolved");
    }

    StatusDiagnostics {
        operator: op.clone(),
        tracker_record_count: records.len(),
        matched_status_type: matched.cloned(),
        outcome,
        case_only_match,
        status_name_mismatch: op.status != op.status_name,
        status_ids,
        recent_records: recent,
    }
}
