//! olc-reconcile
//!
//! Relational join and discrepancy detection over snapshot records.
//!
//! - `group_by` partitions by a foreign key; keyless records are surfaced,
//!   never dropped
//! - `join` / `classify_orphans` pair primary records with their
//!   references; orphans are the exact complement of the join
//! - `find_dangling` reports foreign keys with no matching primary record
//! - `sort_with_optional_key` gives the nulls-last rank ordering
//!
//! Deterministic, pure logic. No IO. No clock.

mod engine;
mod index;
mod join;
mod ordering;
mod sample;
mod types;

pub use engine::build_client_relationships;
pub use index::{build_lookup, group_by, Grouping};
pub use join::{
    classify_orphans, find_dangling, join, join_with, JoinStrategy, Joined,
    INDEXED_JOIN_THRESHOLD,
};
pub use ordering::{sort_with_optional_key, MissingPolicy};
pub use sample::Sample;
pub use types::*;
