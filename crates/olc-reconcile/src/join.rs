use std::collections::{BTreeMap, BTreeSet};

/// Right-side size at which the join switches from a nested loop to a
/// pre-grouped index. Nested loops are quadratic; above this volume they
/// stop being acceptable.
pub const INDEXED_JOIN_THRESHOLD: usize = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinStrategy {
    NestedLoop,
    Indexed,
}

impl JoinStrategy {
    pub fn for_right_len(right_len: usize) -> Self {
        if right_len >= INDEXED_JOIN_THRESHOLD {
            JoinStrategy::Indexed
        } else {
            JoinStrategy::NestedLoop
        }
    }
}

/// One left record and every right record pointing at it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Joined<'a, L, R> {
    pub left: &'a L,
    /// Matches in right input order.
    pub matches: Vec<&'a R>,
}

/// For each left record (in input order), the right records whose foreign
/// key equals the left record's key. A left record without a key matches
/// nothing; right records without a foreign key match nothing.
pub fn join<'a, L, R, LK, RK>(
    left: &'a [L],
    right: &'a [R],
    left_key: LK,
    right_fk: RK,
) -> Vec<Joined<'a, L, R>>
where
    LK: Fn(&L) -> Option<&str>,
    RK: Fn(&R) -> Option<&str>,
{
    join_with(
        JoinStrategy::for_right_len(right.len()),
        left,
        right,
        left_key,
        right_fk,
    )
}

/// [`join`] with an explicit strategy. Both strategies produce identical
/// output.
pub fn join_with<'a, L, R, LK, RK>(
    strategy: JoinStrategy,
    left: &'a [L],
    right: &'a [R],
    left_key: LK,
    right_fk: RK,
) -> Vec<Joined<'a, L, R>>
where
    LK: Fn(&L) -> Option<&str>,
    RK: Fn(&R) -> Option<&str>,
{
    match strategy {
        JoinStrategy::NestedLoop => left
            .iter()
            .map(|l| {
                let matches = match left_key(l) {
                    Some(k) => right.iter().filter(|r| right_fk(*r) == Some(k)).collect(),
                    None => Vec::new(),
                };
                Joined { left: l, matches }
            })
            .collect(),

        JoinStrategy::Indexed => {
            tracing::debug!(
                left = left.len(),
                right = right.len(),
                "using indexed join"
            );
            let mut index: BTreeMap<&'a str, Vec<&'a R>> = BTreeMap::new();
            for r in right {
                if let Some(fk) = right_fk(r) {
                    index.entry(fk).or_default().push(r);
                }
            }
            left.iter()
                .map(|l| {
                    let matches = left_key(l)
                        .and_then(|k| index.get(k))
                        .cloned()
                        .unwrap_or_default();
                    Joined { left: l, matches }
                })
                .collect()
        }
    }
}

/// Left records with zero matching right records: the complement of
/// [`join`]. Runs over every left record regardless of its other fields.
pub fn classify_orphans<'a, L, R, LK, RK>(
    left: &'a [L],
    right: &'a [R],
    left_key: LK,
    right_fk: RK,
) -> Vec<&'a L>
where
    LK: Fn(&L) -> Option<&str>,
    RK: Fn(&R) -> Option<&str>,
{
    join(left, right, left_key, right_fk)
        .into_iter()
        .filter(|j| j.matches.is_empty())
        .map(|j| j.left)
        .collect()
}

/// Referencing records whose populated foreign key matches no referenced
/// key. Records with a missing foreign key are not dangling.
pub fn find_dangling<'a, R, T, RK, TK>(
    referencing: &'a [R],
    referenced: &[T],
    fk: RK,
    key: TK,
) -> Vec<&'a R>
where
    RK: Fn(&R) -> Option<&str>,
    TK: Fn(&T) -> Option<&str>,
{
    let known: BTreeSet<&str> = referenced.iter().filter_map(|t| key(t)).collect();
    referencing
        .iter()
        .filter(|r| fk(*r).is_some_and(|k| !known.contains(k)))
        .collect()
}
