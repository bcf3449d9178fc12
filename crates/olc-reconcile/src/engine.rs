use std::collections::BTreeMap;

use olc_records::{PizzaStatus, StatusType, UNKNOWN};

use crate::{
    build_lookup, classify_orphans, find_dangling, group_by, join, sort_with_optional_key,
    ClientRelationshipsReport, ClientSection, Discrepancies, DivisionGroup, MemberEntry,
    MissingPolicy, OrphanEntry, RelationshipInputs, Sample, SampleLimits, Totals, NO_CLIENT,
    UNKNOWN_CLIENT,
};

fn pizza_id(p: &PizzaStatus) -> Option<&str> {
    p.id.as_deref()
}

fn pizza_client(p: &PizzaStatus) -> Option<&str> {
    p.client_id.as_deref()
}

fn client_sort_key(c: &ClientSection) -> &str {
    if c.known_client {
        &c.client_name
    } else {
        UNKNOWN
    }
}

fn status_pizza(s: &StatusType) -> Option<&str> {
    s.pizza_status_id.as_deref()
}

/// Deterministic client relationships reconciliation:
/// - PizzaStatuses grouped by ClientID, groups ordered by client name
/// - members ordered by MobileAppOrder (missing last, stable)
/// - referencing StatusTypes partitioned by division
/// - discrepancy sections computed over the whole dataset
pub fn build_client_relationships(
    inputs: RelationshipInputs<'_>,
    limits: SampleLimits,
) -> ClientRelationshipsReport {
    let client_lookup = build_lookup(
        inputs.clients,
        |c| c.id.as_deref(),
        |c| c.description.clone().unwrap_or_default(),
    );

    let by_client = group_by(inputs.pizza_statuses, pizza_client);

    let mut clients: Vec<ClientSection> = by_client
        .groups
        .into_iter()
        .map(|(client_id, mut members)| {
            let (client_name, known_client) = match client_lookup.get(&client_id) {
                Some(name) => (name.clone(), true),
                None => (UNKNOWN_CLIENT.to_string(), false),
            };

            sort_with_optional_key(&mut members, |p| p.mobile_app_order, MissingPolicy::Last);

            let members = join(&members, inputs.status_types, pizza_id, status_pizza)
                .into_iter()
                .map(|j| MemberEntry {
                    pizza_status: j.left.clone(),
                    divisions: partition_by_division(&j.matches),
                })
                .collect();

            ClientSection {
                client_id,
                client_name,
                known_client,
                members,
            }
        })
        .collect();

    // Groups arrive ordered by id; a stable sort by name keeps id as tie-break.
    // Unresolved clients sort under the bare "Unknown" key.
    clients.sort_by(|a, b| client_sort_key(a).cmp(client_sort_key(b)));

    let orphaned = classify_orphans(
        inputs.pizza_statuses,
        inputs.status_types,
        pizza_id,
        status_pizza,
    );

    let discrepancies = Discrepancies {
        pizza_statuses_without_client: Sample::first_n(
            by_client.missing_key,
            limits.missing_client,
        ),
        status_types_without_pizza_status: Sample::first_n(
            inputs
                .status_types
                .iter()
                .filter(|s| s.pizza_status_id.is_none())
                .cloned(),
            limits.missing_pizza_status,
        ),
        orphaned_pizza_statuses: Sample::first_n(
            orphaned.into_iter().map(|p| OrphanEntry {
                client_name: p
                    .client_id
                    .as_ref()
                    .and_then(|id| client_lookup.get(id))
                    .cloned()
                    .unwrap_or_else(|| NO_CLIENT.to_string()),
                pizza_status: p.clone(),
            }),
            limits.orphaned,
        ),
        dangling_pizza_status_refs: Sample::first_n(
            find_dangling(
                inputs.status_types,
                inputs.pizza_statuses,
                status_pizza,
                pizza_id,
            )
            .into_iter()
            .cloned(),
            limits.dangling,
        ),
        dangling_client_refs: Sample::first_n(
            find_dangling(
                inputs.pizza_statuses,
                inputs.clients,
                pizza_client,
                |c| c.id.as_deref(),
            )
            .into_iter()
            .cloned(),
            limits.dangling,
        ),
    };

    ClientRelationshipsReport {
        totals: Totals {
            clients: client_lookup.len(),
            pizza_statuses: inputs.pizza_statuses.len(),
            status_types: inputs.status_types.len(),
        },
        clients,
        discrepancies,
    }
}

/// Missing divisions are grouped under "Unknown"; input order is kept
/// within a division.
fn partition_by_division(matches: &[&StatusType]) -> Vec<DivisionGroup> {
    let mut by_division: BTreeMap<&str, Vec<StatusType>> = BTreeMap::new();
    for st in matches {
        by_division
            .entry(st.division())
            .or_default()
            .push((*st).clone());
    }
    by_division
        .into_iter()
        .map(|(division, status_types)| DivisionGroup {
            division: division.to_string(),
            status_types,
        })
        .collect()
}
