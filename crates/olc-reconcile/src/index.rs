use std::collections::BTreeMap;

/// Build a key -> display-value index over a join target.
///
/// Duplicate keys are last-write-wins (no uniqueness enforcement). Records
/// without a key are skipped.
pub fn build_lookup<R, K, V>(records: &[R], key: K, display: V) -> BTreeMap<String, String>
where
    K: Fn(&R) -> Option<&str>,
    V: Fn(&R) -> String,
{
    let mut out = BTreeMap::new();
    for r in records {
        if let Some(k) = key(r) {
            out.insert(k.to_string(), display(r));
        }
    }
    out
}

/// Result of partitioning a collection by a foreign-key field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grouping<R> {
    /// Key -> records carrying that key, in input order.
    pub groups: BTreeMap<String, Vec<R>>,
    /// Records whose key is null/missing, in input order.
    pub missing_key: Vec<R>,
}

impl<R> Grouping<R> {
    pub fn group(&self, key: &str) -> &[R] {
        self.groups.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of records that landed in some group.
    pub fn grouped_len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Partition `records` by `key`.
///
/// Every record with a key appears in exactly one group; every record
/// without one appears exactly once in `missing_key` and in no group.
pub fn group_by<R, K>(records: &[R], key: K) -> Grouping<R>
where
    R: Clone,
    K: Fn(&R) -> Option<&str>,
{
    let mut groups: BTreeMap<String, Vec<R>> = BTreeMap::new();
    let mut missing_key = Vec::new();
    for r in records {
        match key(r) {
            Some(k) => groups.entry(k.to_string()).or_default().push(r.clone()),
            None => missing_key.push(r.clone()),
        }
    }
    Grouping {
        groups,
        missing_key,
    }
}
