use olc_records::{CertType, StatusType};
use serde::Serialize;

/// Cert types required by given PizzaStatuses within one division.
#[derive(Clone, Copy, Debug)]
pub struct CertTypeQuery<'a> {
    pub division: &'a str,
    pub pizza_status_ids: &'a [String],
    /// Skip soft-deleted cert types.
    pub active_only: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CertTypeGroup {
    pub pizza_status_id: String,
    /// Input order.
    pub cert_types: Vec<CertType>,
}

/// One group per requested PizzaStatusID, in request order.
pub fn query_cert_types(cert_types: &[CertType], q: CertTypeQuery<'_>) -> Vec<CertTypeGroup> {
    q.pizza_status_ids
        .iter()
        .map(|ps| CertTypeGroup {
            pizza_status_id: ps.clone(),
            cert_types: cert_types
                .iter()
                .filter(|ct| {
                    ct.division_id.as_deref() == Some(q.division)
                        && ct.pizza_status_id.as_deref() == Some(ps.as_str())
                        && !(q.active_only && ct.is_deleted)
                })
                .cloned()
                .collect(),
        })
        .collect()
}

/// StatusTypes in `division` whose Status contains `needle`, ignoring case.
/// An empty needle matches every StatusType in the division.
pub fn find_status_types(
    status_types: &[StatusType],
    division: &str,
    needle: &str,
) -> Vec<StatusType> {
    let needle = needle.to_lowercase();
    status_types
        .iter()
        .filter(|st| st.division_id.as_deref() == Some(division))
        .filter(|st| {
            st.status
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(&needle)
        })
        .cloned()
        .collect()
}
