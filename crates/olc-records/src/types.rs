use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::lenient::{de_flag, de_rank, de_text, de_timestamp};

/// Display fallback for a missing name.
pub const UNKNOWN: &str = "Unknown";

/// Client (`pay_Clients`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "ID", alias = "Id", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "de_text")]
    pub description: Option<String>,
    #[serde(rename = "Contact", default, deserialize_with = "de_text")]
    pub contact: Option<String>,
    #[serde(rename = "PhoneNumber", default, deserialize_with = "de_text")]
    pub phone_number: Option<String>,
    #[serde(rename = "City", default, deserialize_with = "de_text")]
    pub city: Option<String>,
    #[serde(rename = "State", default, deserialize_with = "de_text")]
    pub state: Option<String>,
    #[serde(rename = "ZipCode", default, deserialize_with = "de_text")]
    pub zip_code: Option<String>,
}

/// Workflow status definition scoped to a client (`pay_PizzaStatuses`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaStatus {
    #[serde(rename = "ID", alias = "Id", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "ClientID", default, deserialize_with = "de_text")]
    pub client_id: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "de_text")]
    pub status: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "de_text")]
    pub description: Option<String>,
    #[serde(rename = "MobileAppOrder", default, deserialize_with = "de_rank")]
    pub mobile_app_order: Option<i64>,
    #[serde(rename = "IsOperator", default, deserialize_with = "de_flag")]
    pub is_operator: bool,
    #[serde(rename = "IsProvider", default, deserialize_with = "de_flag")]
    pub is_provider: bool,
}

impl PizzaStatus {
    pub fn status_name(&self) -> &str {
        self.status.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Division-scoped status mapping (`pay_StatusTypes`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusType {
    #[serde(rename = "ID", alias = "Id", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "PizzaStatusID", default, deserialize_with = "de_text")]
    pub pizza_status_id: Option<String>,
    #[serde(rename = "DivisionID", default, deserialize_with = "de_text")]
    pub division_id: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "de_text")]
    pub status: Option<String>,
    #[serde(rename = "OrderID", default, deserialize_with = "de_rank")]
    pub order_id: Option<i64>,
    #[serde(rename = "isDeleted", default, deserialize_with = "de_flag")]
    pub is_deleted: bool,
    #[serde(rename = "Fleet", default, deserialize_with = "de_flag")]
    pub fleet: bool,
    #[serde(rename = "Providers", default, deserialize_with = "de_flag")]
    pub providers: bool,
}

impl StatusType {
    pub fn status_name(&self) -> &str {
        self.status.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn division(&self) -> &str {
        self.division_id.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Operator (`pay_Operators`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    #[serde(rename = "ID", alias = "Id", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "FirstName", default, deserialize_with = "de_text")]
    pub first_name: Option<String>,
    #[serde(rename = "LastName", default, deserialize_with = "de_text")]
    pub last_name: Option<String>,
    #[serde(rename = "DivisionID", default, deserialize_with = "de_text")]
    pub division_id: Option<String>,
    #[serde(rename = "Status", default, deserialize_with = "de_text")]
    pub status: Option<String>,
    #[serde(rename = "StatusName", default, deserialize_with = "de_text")]
    pub status_name: Option<String>,
    #[serde(rename = "IsDeleted", default, deserialize_with = "de_flag")]
    pub is_deleted: bool,
}

impl Operator {
    /// "First Last", skipping missing parts.
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Certification held by an operator (`pay_Certifications`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certification {
    #[serde(rename = "ID", alias = "Id", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "OperatorID", alias = "OperatorId", default, deserialize_with = "de_text")]
    pub operator_id: Option<String>,
    #[serde(rename = "Cert", default, deserialize_with = "de_text")]
    pub cert: Option<String>,
    #[serde(rename = "CertTypeID", default, deserialize_with = "de_text")]
    pub cert_type_id: Option<String>,
    #[serde(rename = "DivisionID", default, deserialize_with = "de_text")]
    pub division_id: Option<String>,
    #[serde(rename = "isDeleted", default, deserialize_with = "de_flag")]
    pub is_deleted: bool,
}

/// Certification requirement attached to a status (`pay_CertTypes`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertType {
    #[serde(rename = "ID", alias = "Id", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "Certification", default, deserialize_with = "de_text")]
    pub certification: Option<String>,
    #[serde(rename = "Description", default, deserialize_with = "de_text")]
    pub description: Option<String>,
    #[serde(rename = "DivisionID", default, deserialize_with = "de_text")]
    pub division_id: Option<String>,
    #[serde(rename = "PizzaStatusID", default, deserialize_with = "de_text")]
    pub pizza_status_id: Option<String>,
    #[serde(rename = "isDeleted", default, deserialize_with = "de_flag")]
    pub is_deleted: bool,
}

/// One status transition of an operator (`pay_StatusTracker`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTracker {
    #[serde(rename = "ID", alias = "Id", default, deserialize_with = "de_text")]
    pub id: Option<String>,
    #[serde(rename = "StatusID", default, deserialize_with = "de_text")]
    pub status_id: Option<String>,
    #[serde(rename = "OperatorID", default, deserialize_with = "de_text")]
    pub operator_id: Option<String>,
    #[serde(rename = "Date", default, deserialize_with = "de_timestamp")]
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "DivisionID", default, deserialize_with = "de_text")]
    pub division_id: Option<String>,
}
