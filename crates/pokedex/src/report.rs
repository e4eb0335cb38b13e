//! Text rendering of collections, traversals, and the size report

use std::io::{self, Write};
use std::sync::Arc;

use serde::Serialize;

use crate::index::{OwnerIndex, OwnerNode, Traversal};
use crate::record::CreatureRecord;

/// Shown in place of a listing when nothing matches.
pub const EMPTY_LISTING: &str = "There are no Pokemons in this Pokedex that match the criteria.";

/// One row of the size-sorted owner report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    /// Owner name as registered
    pub name: String,
    /// Number of entries in the owner's collection
    pub size: usize,
}

/// All owners sorted by collection size, then by name ignoring case.
pub fn sort_by_size(index: &OwnerIndex) -> Vec<OwnerSummary> {
    let mut owners = index.traverse(Traversal::InOrder);
    owners.sort_by_cached_key(|n| (n.size(), n.name().to_lowercase()));
    owners
        .into_iter()
        .map(|n| OwnerSummary {
            name: n.name().to_string(),
            size: n.size(),
        })
        .collect()
}

/// Write one line per record, or the empty indicator.
pub fn write_listing<W: Write>(out: &mut W, records: &[Arc<CreatureRecord>]) -> io::Result<()> {
    if records.is_empty() {
        return writeln!(out, "{}", EMPTY_LISTING);
    }
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}

/// Write a single traversal visit: the owner header and its collection.
pub fn write_owner<W: Write>(out: &mut W, owner: &OwnerNode) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Owner: {}", owner.name())?;
    write_listing(out, owner.collection())
}

/// Write the size-sorted owner report.
pub fn write_size_report<W: Write>(out: &mut W, summaries: &[OwnerSummary]) -> io::Result<()> {
    if summaries.is_empty() {
        return writeln!(out, "No owners at all.");
    }
    writeln!(out, "=== The Owners we have, sorted by number of Pokemons ===")?;
    for s in summaries {
        writeln!(out, "Owner: {} (has {} Pokemon)", s.name, s.size)?;
    }
    Ok(())
}
