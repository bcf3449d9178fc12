use anyhow::Result;
use olc_records::{Certification, PizzaStatus, StatusType};
use olc_snapshot::{load_collection_file, parse_collection, SnapshotDir, SnapshotError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn missing_file_is_input_not_found() -> Result<()> {
    let tmp = tempdir()?;
    let dir = SnapshotDir::new(tmp.path());

    let err = dir.load::<PizzaStatus>().unwrap_err();
    assert_eq!(
        err,
        SnapshotError::InputNotFound {
            path: tmp.path().join("pay_PizzaStatuses.json")
        }
    );
    assert!(err.to_string().contains("input not found"));
    Ok(())
}

#[test]
fn loads_array_with_bom_and_defaults() -> Result<()> {
    let tmp = tempdir()?;
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        br#"[{"ID":"A","ClientID":"C1","MobileAppOrder":2},{"ID":"B","ClientID":null}]"#,
    );
    fs::write(tmp.path().join("pay_PizzaStatuses.json"), bytes)?;

    let rows = SnapshotDir::new(tmp.path()).load::<PizzaStatus>()?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].mobile_app_order, Some(2));
    assert_eq!(rows[1].client_id, None);
    Ok(())
}

#[test]
fn wrapped_certifications_are_unwrapped() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("certs.json");
    fs::write(
        &path,
        r#"{"certifications":[{"OperatorID":"OP1","Cert":"CDL"},{"OperatorId":"OP2"}]}"#,
    )?;

    let certs: Vec<Certification> = load_collection_file(&path)?;
    assert_eq!(certs.len(), 2);
    assert_eq!(certs[1].operator_id.as_deref(), Some("OP2"));
    Ok(())
}

#[test]
fn non_array_document_aborts() {
    let p = Path::new("pay_StatusTypes.json");
    let err = parse_collection::<StatusType>(p, r#"{"rows": []}"#).unwrap_err();
    assert!(matches!(err, SnapshotError::NotACollection { .. }));

    let err = parse_collection::<StatusType>(p, "42").unwrap_err();
    assert!(matches!(err, SnapshotError::NotACollection { .. }));
}

#[test]
fn non_object_entry_aborts_whole_collection() {
    let p = Path::new("pay_StatusTypes.json");
    let err = parse_collection::<StatusType>(p, r#"[{"ID":"1"}, "oops"]"#).unwrap_err();
    match err {
        SnapshotError::MalformedEntry { index, .. } => assert_eq!(index, 1),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn invalid_json_is_parse_error() {
    let p = Path::new("pay_StatusTypes.json");
    let err = parse_collection::<StatusType>(p, "[{").unwrap_err();
    assert!(matches!(err, SnapshotError::Parse { .. }));
    assert_eq!(err.path(), p);
}
