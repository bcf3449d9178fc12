use olc_records::{
    CertType, Certification, Client, Operator, PizzaStatus, StatusTracker, StatusType,
};
use serde::de::DeserializeOwned;

/// A record type that is exported as one JSON file of the snapshot.
pub trait SnapshotCollection: DeserializeOwned {
    /// File name inside the snapshot directory.
    const FILE_NAME: &'static str;
    /// Key under which some exports wrap the array (`{"certifications": [...]}`).
    const WRAPPER_KEY: &'static str;
}

impl SnapshotCollection for Client {
    const FILE_NAME: &'static str = "pay_Clients.json";
    const WRAPPER_KEY: &'static str = "clients";
}

impl SnapshotCollection for PizzaStatus {
    const FILE_NAME: &'static str = "pay_PizzaStatuses.json";
    const WRAPPER_KEY: &'static str = "pizzaStatuses";
}

impl SnapshotCollection for StatusType {
    const FILE_NAME: &'static str = "pay_StatusTypes.json";
    const WRAPPER_KEY: &'static str = "statusTypes";
}

impl SnapshotCollection for Operator {
    const FILE_NAME: &'static str = "pay_Operators.json";
    const WRAPPER_KEY: &'static str = "operators";
}

impl SnapshotCollection for Certification {
    const FILE_NAME: &'static str = "pay_Certifications.json";
    const WRAPPER_KEY: &'static str = "certifications";
}

impl SnapshotCollection for CertType {
    const FILE_NAME: &'static str = "pay_CertTypes.json";
    const WRAPPER_KEY: &'static str = "certTypes";
}

impl SnapshotCollection for StatusTracker {
    const FILE_NAME: &'static str = "pay_StatusTracker.json";
    const WRAPPER_KEY: &'static str = "statusTracker";
}
