use std::collections::BTreeMap;

use olc_reconcile::group_by;
use olc_records::{Certification, Operator, StatusTracker, UNKNOWN};
use serde::Serialize;

/// How many certified operators are listed as a spot check.
const CERTIFIED_SAMPLE: usize = 5;

/// Spread of per-operator record counts. The average is kept in tenths
/// (rounded half up) so the report stays integer-exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CountStats {
    pub average_tenths: u64,
    pub max: usize,
    pub min: usize,
}

impl CountStats {
    fn from_counts<'a>(counts: impl IntoIterator<Item = &'a usize>) -> Self {
        let mut n: u64 = 0;
        let mut sum: u64 = 0;
        let mut max = 0;
        let mut min = usize::MAX;
        for &c in counts {
            n += 1;
            sum += c as u64;
            max = max.max(c);
            min = min.min(c);
        }
        if n == 0 {
            return Self::default();
        }
        Self {
            average_tenths: (sum * 10 + n / 2) / n,
            max,
            min,
        }
    }

    /// Average formatted with one decimal, e.g. `2.5`.
    pub fn average_display(&self) -> String {
        format!("{}.{}", self.average_tenths / 10, self.average_tenths % 10)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CertifiedOperator {
    pub name: String,
    pub division: String,
    pub certifications: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CertificationCoverage {
    pub total_certifications: usize,
    /// Operators (with an ID) holding at least one certification.
    pub operators_with: usize,
    pub operators_without: usize,
    /// Distinct OperatorIDs referenced from the certification file,
    /// whether or not they resolve to an operator.
    pub unique_operator_ids: usize,
    /// Over certifications grouped by OperatorID.
    pub per_operator: CountStats,
    /// Most common certification names; ties broken by name.
    pub top_names: Vec<NameCount>,
    /// First certified operators in input order.
    pub certified_sample: Vec<CertifiedOperator>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackerCoverage {
    pub total_records: usize,
    pub operators_with: usize,
    pub operators_without: usize,
    pub per_operator: CountStats,
}

fn counts_by_operator<R: Clone>(
    records: &[R],
    operator_id: impl Fn(&R) -> Option<&str>,
) -> BTreeMap<String, usize> {
    group_by(records, operator_id)
        .groups
        .into_iter()
        .map(|(k, v)| (k, v.len()))
        .collect()
}

/// Split operators with an ID into (with, without) by membership in `counts`.
fn split_operators(operators: &[Operator], counts: &BTreeMap<String, usize>) -> (usize, usize) {
    operators
        .iter()
        .filter_map(|op| op.id.as_deref())
        .fold((0, 0), |(with, without), id| {
            if counts.get(id).copied().unwrap_or(0) > 0 {
                (with + 1, without)
            } else {
                (with, without + 1)
            }
        })
}

pub fn certification_coverage(
    operators: &[Operator],
    certifications: &[Certification],
    top_n: usize,
) -> CertificationCoverage {
    let counts = counts_by_operator(certifications, |c| c.operator_id.as_deref());
    let (operators_with, operators_without) = split_operators(operators, &counts);

    let mut by_name: BTreeMap<&str, usize> = BTreeMap::new();
    for c in certifications {
        *by_name.entry(c.cert.as_deref().unwrap_or(UNKNOWN)).or_default() += 1;
    }
    let mut top_names: Vec<NameCount> = by_name
        .into_iter()
        .map(|(name, count)| NameCount {
            name: name.to_string(),
            count,
        })
        .collect();
    // BTreeMap order already sorts by name; a stable sort keeps it for ties.
    top_names.sort_by(|a, b| b.count.cmp(&a.count));
    top_names.truncate(top_n);

    let certified_sample = operators
        .iter()
        .filter_map(|op| {
            let n = op.id.as_deref().and_then(|id| counts.get(id)).copied()?;
            Some(CertifiedOperator {
                name: op.display_name(),
                division: op.division_id.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                certifications: n,
            })
        })
        .take(CERTIFIED_SAMPLE)
        .collect();

    tracing::debug!(
        certifications = certifications.len(),
        operators_with,
        operators_without,
        "certification coverage computed"
    );

    CertificationCoverage {
        total_certifications: certifications.len(),
        operators_with,
        operators_without,
        unique_operator_ids: counts.len(),
        per_operator: CountStats::from_counts(counts.values()),
        top_names,
        certified_sample,
    }
}

pub fn tracker_coverage(operators: &[Operator], tracker: &[StatusTracker]) -> TrackerCoverage {
    let counts = counts_by_operator(tracker, |t| t.operator_id.as_deref());
    let (operators_with, operators_without) = split_operators(operators, &counts);

    TrackerCoverage {
        total_records: tracker.len(),
        operators_with,
        operators_without,
        per_operator: CountStats::from_counts(counts.values()),
    }
}
