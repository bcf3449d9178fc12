use olc_records::{Client, PizzaStatus, StatusType};
use olc_reconcile::*;

fn client(id: &str, name: &str) -> Client {
    Client {
        id: Some(id.to_string()),
        description: Some(name.to_string()),
        ..Client::default()
    }
}

fn ps(id: &str, client: Option<&str>, order: Option<i64>) -> PizzaStatus {
    PizzaStatus {
        id: Some(id.to_string()),
        client_id: client.map(str::to_string),
        status: Some(format!("status-{id}")),
        mobile_app_order: order,
        ..PizzaStatus::default()
    }
}

fn st(pizza: Option<&str>, division: Option<&str>, deleted: bool) -> StatusType {
    StatusType {
        pizza_status_id: pizza.map(str::to_string),
        division_id: division.map(str::to_string),
        is_deleted: deleted,
        ..StatusType::default()
    }
}

#[test]
fn worked_example_missing_client_and_orphan_overlap() {
    let clients = vec![client("C1", "Acme")];
    let pizza = vec![ps("A", Some("C1"), None), ps("B", None, None)];
    let types = vec![st(Some("A"), Some("D1"), false)];

    let r = build_client_relationships(
        RelationshipInputs {
            clients: &clients,
            pizza_statuses: &pizza,
            status_types: &types,
        },
        SampleLimits::default(),
    );

    assert_eq!(r.clients.len(), 1);
    let a = &r.clients[0].members[0];
    assert_eq!(a.pizza_status.id.as_deref(), Some("A"));
    assert_eq!(a.reference_count(), 1);
    assert_eq!(a.divisions.len(), 1);
    assert_eq!(a.divisions[0].division, "D1");

    let d = &r.discrepancies;
    let missing: Vec<_> = d
        .pizza_statuses_without_client
        .shown
        .iter()
        .filter_map(|p| p.id.as_deref())
        .collect();
    assert_eq!(missing, vec!["B"]);

    // Orphan checking covers every PizzaStatus, including ones without a client.
    let orphans: Vec<_> = d
        .orphaned_pizza_statuses
        .shown
        .iter()
        .map(|o| (o.pizza_status.id.as_deref(), o.client_name.as_str()))
        .collect();
    assert_eq!(orphans, vec![(Some("B"), NO_CLIENT)]);
    assert!(!r.is_clean());
}

#[test]
fn clients_ordered_by_name_members_by_rank_divisions_ascending() {
    let clients = vec![client("C1", "Zeta"), client("C2", "Alpha")];
    let pizza = vec![
        ps("Z-late", Some("C1"), None),
        ps("Z-first", Some("C1"), Some(1)),
        ps("A-only", Some("C2"), Some(4)),
        ps("ghost", Some("C9"), Some(1)),
    ];
    let types = vec![
        st(Some("Z-first"), Some("5 - CA"), false),
        st(Some("Z-first"), Some("10 - OR"), true),
        st(Some("Z-first"), None, false),
    ];

    let r = build_client_relationships(
        RelationshipInputs {
            clients: &clients,
            pizza_statuses: &pizza,
            status_types: &types,
        },
        SampleLimits::default(),
    );

    let names: Vec<&str> = r.clients.iter().map(|c| c.client_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", UNKNOWN_CLIENT, "Zeta"]);
    assert!(!r.clients[1].known_client);

    let zeta = &r.clients[2];
    let order: Vec<_> = zeta
        .members
        .iter()
        .filter_map(|m| m.pizza_status.id.as_deref())
        .collect();
    assert_eq!(order, vec!["Z-first", "Z-late"]);

    let divisions: Vec<&str> = zeta.members[0]
        .divisions
        .iter()
        .map(|d| d.division.as_str())
        .collect();
    assert_eq!(divisions, vec!["10 - OR", "5 - CA", "Unknown"]);
    assert!(zeta.members[0].divisions[0].status_types[0].is_deleted);

    let dangling: Vec<_> = r
        .discrepancies
        .dangling_client_refs
        .shown
        .iter()
        .filter_map(|p| p.id.as_deref())
        .collect();
    assert_eq!(dangling, vec!["ghost"]);
}

#[test]
fn discrepancy_sections_are_truncated_with_remainder() {
    let pizza: Vec<PizzaStatus> = (0..8).map(|i| ps(&format!("P{i}"), None, None)).collect();
    let types: Vec<StatusType> = (0..13).map(|_| st(None, Some("D1"), false)).collect();

    let r = build_client_relationships(
        RelationshipInputs {
            clients: &[],
            pizza_statuses: &pizza,
            status_types: &types,
        },
        SampleLimits::default(),
    );

    let d = &r.discrepancies;
    assert_eq!(d.pizza_statuses_without_client.shown.len(), 5);
    assert_eq!(d.pizza_statuses_without_client.remainder(), 3);
    assert_eq!(d.status_types_without_pizza_status.shown.len(), 10);
    assert_eq!(d.status_types_without_pizza_status.remainder(), 3);
    assert_eq!(d.orphaned_pizza_statuses.total, 8);
    assert!(r.clients.is_empty());
}

#[test]
fn duplicate_client_ids_are_last_write_wins() {
    let clients = vec![client("C1", "Old Name"), client("C1", "New Name")];
    let pizza = vec![ps("A", Some("C1"), None)];

    let r = build_client_relationships(
        RelationshipInputs {
            clients: &clients,
            pizza_statuses: &pizza,
            status_types: &[],
        },
        SampleLimits::default(),
    );

    assert_eq!(r.totals.clients, 1);
    assert_eq!(r.clients[0].client_name, "New Name");
}

#[test]
fn same_input_builds_identical_report() {
    let clients = vec![client("C1", "Acme"), client("C2", "Beta")];
    let pizza = vec![
        ps("A", Some("C1"), Some(2)),
        ps("B", Some("C2"), None),
        ps("C", Some("C1"), Some(1)),
    ];
    let types = vec![
        st(Some("A"), Some("D2"), false),
        st(Some("C"), Some("D1"), false),
    ];
    let inputs = RelationshipInputs {
        clients: &clients,
        pizza_statuses: &pizza,
        status_types: &types,
    };

    let first = build_client_relationships(inputs, SampleLimits::default());
    let second = build_client_relationships(inputs, SampleLimits::default());
    assert_eq!(first, second);
}

#[test]
fn whitespace_client_id_is_reported_as_missing() {
    let pizza: Vec<PizzaStatus> = serde_json::from_value(serde_json::json!([
        {"ID": "A", "ClientID": "   "},
        {"ID": "B", "ClientID": "C1"}
    ]))
    .unwrap();
    let clients = vec![client("C1", "Acme")];

    let r = build_client_relationships(
        RelationshipInputs {
            clients: &clients,
            pizza_statuses: &pizza,
            status_types: &[],
        },
        SampleLimits::default(),
    );

    assert_eq!(r.clients.len(), 1);
    assert_eq!(r.clients[0].client_name, "Acme");
    let d = &r.discrepancies;
    assert_eq!(d.pizza_statuses_without_client.total, 1);
    assert_eq!(d.pizza_statuses_without_client.shown[0].id.as_deref(), Some("A"));
    assert_eq!(d.dangling_client_refs.total, 0);
}

#[test]
fn unresolved_client_sorts_as_unknown() {
    let clients = vec![client("C1", "Unknown A"), client("C2", "Unknowable")];
    let pizza = vec![
        ps("A", Some("C1"), None),
        ps("B", Some("C2"), None),
        ps("ghost", Some("C9"), None),
    ];

    let r = build_client_relationships(
        RelationshipInputs {
            clients: &clients,
            pizza_statuses: &pizza,
            status_types: &[],
        },
        SampleLimits::default(),
    );

    let names: Vec<&str> = r.clients.iter().map(|c| c.client_name.as_str()).collect();
    assert_eq!(names, vec!["Unknowable", UNKNOWN_CLIENT, "Unknown A"]);
}
