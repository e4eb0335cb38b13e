//! Read-only queries over a single owner's collection

use std::sync::Arc;

use crate::index::OwnerNode;
use crate::record::CreatureRecord;

/// A predicate over collection entries.
///
/// Thresholds are exclusive: `AttackAbove(50)` keeps only entries with
/// attack strictly greater than 50.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Type equals this value, ignoring case
    Type(String),
    /// Entries whose evolve flag is set
    CanEvolve,
    /// Attack strictly greater than the threshold
    AttackAbove(i64),
    /// HP strictly greater than the threshold
    HpAbove(i64),
    /// Name starts with this prefix, ignoring case
    NamePrefix(String),
    /// Every entry
    All,
}

impl Filter {
    /// Whether a record passes this filter.
    pub fn matches(&self, record: &CreatureRecord) -> bool {
        match self {
            Filter::Type(kind) => record.kind.to_lowercase() == kind.to_lowercase(),
            Filter::CanEvolve => record.can_evolve,
            Filter::AttackAbove(threshold) => record.attack > *threshold,
            Filter::HpAbove(threshold) => record.hp > *threshold,
            Filter::NamePrefix(prefix) => record
                .name
                .to_lowercase()
                .starts_with(&prefix.to_lowercase()),
            Filter::All => true,
        }
    }

    /// Matching entries, in collection order.
    pub fn apply(&self, collection: &[Arc<CreatureRecord>]) -> Vec<Arc<CreatureRecord>> {
        collection
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

impl OwnerNode {
    /// Entries of this owner's collection that pass `filter`.
    pub fn filtered(&self, filter: &Filter) -> Vec<Arc<CreatureRecord>> {
        filter.apply(self.collection())
    }
}
