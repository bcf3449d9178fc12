use olc_records::{PizzaStatus, StatusType};
use olc_reconcile::*;

fn ps(id: &str, client: Option<&str>) -> PizzaStatus {
    PizzaStatus {
        id: Some(id.to_string()),
        client_id: client.map(str::to_string),
        status: Some(format!("status-{id}")),
        ..PizzaStatus::default()
    }
}

fn st(id: &str, pizza: Option<&str>, division: Option<&str>) -> StatusType {
    StatusType {
        id: Some(id.to_string()),
        pizza_status_id: pizza.map(str::to_string),
        division_id: division.map(str::to_string),
        status: Some(format!("type-{id}")),
        ..StatusType::default()
    }
}

fn primaries() -> Vec<PizzaStatus> {
    vec![
        ps("P1", Some("C1")),
        ps("P2", Some("C2")),
        ps("P3", None),
        ps("P4", Some("C1")),
        ps("P5", None),
    ]
}

fn secondaries() -> Vec<StatusType> {
    vec![
        st("S1", Some("P1"), Some("D1")),
        st("S2", Some("P1"), Some("D2")),
        st("S3", None, Some("D1")),
        st("S4", Some("P3"), Some("D1")),
        st("S5", Some("GONE"), Some("D2")),
    ]
}

#[test]
fn populated_key_lands_in_exactly_its_group() {
    let rows = primaries();
    let g = group_by(&rows, |p| p.client_id.as_deref());

    for p in rows.iter().filter(|p| p.client_id.is_some()) {
        let key = p.client_id.as_deref().unwrap();
        let hits: Vec<&str> = g
            .groups
            .iter()
            .filter(|(_, members)| members.contains(p))
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(hits, vec![key]);
    }
}

#[test]
fn missing_key_appears_once_and_in_no_group() {
    let rows = primaries();
    let g = group_by(&rows, |p| p.client_id.as_deref());

    for p in rows.iter().filter(|p| p.client_id.is_none()) {
        assert_eq!(g.missing_key.iter().filter(|m| *m == p).count(), 1);
        assert!(g.groups.values().all(|members| !members.contains(p)));
    }
    assert_eq!(g.grouped_len() + g.missing_key.len(), rows.len());
}

#[test]
fn orphans_are_the_complement_of_the_join() {
    let left = primaries();
    let right = secondaries();

    let joined = join(&left, &right, |p| p.id.as_deref(), |s| {
        s.pizza_status_id.as_deref()
    });
    let orphans = classify_orphans(&left, &right, |p| p.id.as_deref(), |s| {
        s.pizza_status_id.as_deref()
    });

    let matched = joined.iter().filter(|j| !j.matches.is_empty()).count();
    assert_eq!(orphans.len() + matched, left.len());

    let orphan_ids: Vec<&str> = orphans.iter().filter_map(|p| p.id.as_deref()).collect();
    assert_eq!(orphan_ids, vec!["P2", "P4", "P5"]);

    // P3 has no client but is referenced, so it is not orphaned.
    assert!(!orphan_ids.contains(&"P3"));
}

#[test]
fn join_preserves_right_input_order() {
    let left = primaries();
    let right = secondaries();
    let joined = join(&left, &right, |p| p.id.as_deref(), |s| {
        s.pizza_status_id.as_deref()
    });
    let p1: Vec<&str> = joined[0]
        .matches
        .iter()
        .filter_map(|s| s.id.as_deref())
        .collect();
    assert_eq!(p1, vec!["S1", "S2"]);
}

#[test]
fn nested_loop_and_indexed_join_agree() {
    let left: Vec<PizzaStatus> = (0..50)
        .map(|i| ps(&format!("P{i}"), Some("C1")))
        .collect();
    let right: Vec<StatusType> = (0..400)
        .map(|i| {
            let target = if i % 7 == 0 {
                None
            } else {
                Some(format!("P{}", i % 60))
            };
            st(&format!("S{i}"), target.as_deref(), Some("D1"))
        })
        .collect();

    let nested = join_with(
        JoinStrategy::NestedLoop,
        &left,
        &right,
        |p| p.id.as_deref(),
        |s| s.pizza_status_id.as_deref(),
    );
    let indexed = join_with(
        JoinStrategy::Indexed,
        &left,
        &right,
        |p| p.id.as_deref(),
        |s| s.pizza_status_id.as_deref(),
    );
    assert_eq!(nested, indexed);
}

#[test]
fn dangling_foreign_keys_are_reported() {
    let left = primaries();
    let right = secondaries();
    let dangling = find_dangling(&right, &left, |s| s.pizza_status_id.as_deref(), |p| {
        p.id.as_deref()
    });
    let ids: Vec<&str> = dangling.iter().filter_map(|s| s.id.as_deref()).collect();
    // S3 has no PizzaStatusID at all: missing, not dangling.
    assert_eq!(ids, vec!["S5"]);
}
