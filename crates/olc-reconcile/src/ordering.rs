use std::cmp::Ordering;

/// Where records without a sort key go.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MissingPolicy {
    First,
    Last,
}

/// Stable ascending sort on an optional key.
///
/// Records with a missing key go after (`Last`) or before (`First`) every
/// record with one. Ties, including missing/missing, keep input order.
pub fn sort_with_optional_key<R, T, K>(records: &mut [R], key: K, policy: MissingPolicy)
where
    T: Ord,
    K: Fn(&R) -> Option<T>,
{
    records.sort_by(|a, b| compare_optional(key(a), key(b), policy));
}

fn compare_optional<T: Ord>(a: Option<T>, b: Option<T>, policy: MissingPolicy) -> Ordering {
    match (a, b, policy) {
        (Some(a), Some(b), _) => a.cmp(&b),
        (None, None, _) => Ordering::Equal,
        (None, Some(_), MissingPolicy::Last) | (Some(_), None, MissingPolicy::First) => {
            Ordering::Greater
        }
        (None, Some(_), MissingPolicy::First) | (Some(_), None, MissingPolicy::Last) => {
            Ordering::Less
        }
    }
}
