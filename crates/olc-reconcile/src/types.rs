use olc_records::{Client, PizzaStatus, StatusType};
use serde::Serialize;

use crate::Sample;

/// Display name used when a ClientID has no matching client.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";
/// Display name used for orphans without a resolvable client.
pub const NO_CLIENT: &str = "No Client";

/// The three collections reconciled by the client relationships report.
#[derive(Clone, Copy, Debug)]
pub struct RelationshipInputs<'a> {
    pub clients: &'a [Client],
    pub pizza_statuses: &'a [PizzaStatus],
    pub status_types: &'a [StatusType],
}

/// Per-section preview sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SampleLimits {
    pub missing_client: usize,
    pub missing_pizza_status: usize,
    pub orphaned: usize,
    pub dangling: usize,
}

impl Default for SampleLimits {
    fn default() -> Self {
        Self {
            missing_client: 5,
            missing_pizza_status: 10,
            orphaned: 10,
            dangling: 10,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Totals {
    /// Distinct client IDs (after last-write-wins dedup).
    pub clients: usize,
    pub pizza_statuses: usize,
    pub status_types: usize,
}

/// StatusTypes referencing one PizzaStatus within one division.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DivisionGroup {
    pub division: String,
    pub status_types: Vec<StatusType>,
}

/// One PizzaStatus of a client and everything referencing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberEntry {
    pub pizza_status: PizzaStatus,
    /// Ascending by division.
    pub divisions: Vec<DivisionGroup>,
}

impl MemberEntry {
    pub fn reference_count(&self) -> usize {
        self.divisions.iter().map(|d| d.status_types.len()).sum()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientSection {
    pub client_id: String,
    pub client_name: String,
    /// `false` when the ClientID does not resolve to a client.
    pub known_client: bool,
    /// Ordered by MobileAppOrder, missing ranks last.
    pub members: Vec<MemberEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrphanEntry {
    pub pizza_status: PizzaStatus,
    pub client_name: String,
}

/// Dataset-wide findings. Sections may overlap (a PizzaStatus without a
/// ClientID can also be orphaned).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Discrepancies {
    pub pizza_statuses_without_client: Sample<PizzaStatus>,
    pub status_types_without_pizza_status: Sample<StatusType>,
    pub orphaned_pizza_statuses: Sample<OrphanEntry>,
    pub dangling_pizza_status_refs: Sample<StatusType>,
    pub dangling_client_refs: Sample<PizzaStatus>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ClientRelationshipsReport {
    pub totals: Totals,
    pub clients: Vec<ClientSection>,
    pub discrepancies: Discrepancies,
}

impl ClientRelationshipsReport {
    /// `true` when no discrepancy section has entries.
    pub fn is_clean(&self) -> bool {
        let d = &self.discrepancies;
        d.pizza_statuses_without_client.is_empty()
            && d.status_types_without_pizza_status.is_empty()
            && d.orphaned_pizza_statuses.is_empty()
            && d.dangling_pizza_status_refs.is_empty()
            && d.dangling_client_refs.is_empty()
    }
}
