//! Collection mutation on a single owner
//!
//! Every operation either succeeds fully or returns an error without
//! touching the collection. Entries are unique by id; lookups by name
//! ignore case.

use std::sync::Arc;

use tracing::info;

use crate::catalog::Catalog;
use crate::error::{PokedexError, Result};
use crate::index::OwnerNode;
use crate::record::CreatureRecord;

/// Outcome of a successful evolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evolution {
    /// The original entry was removed and its evolved form appended.
    Evolved {
        /// The entry that was evolved
        from: Arc<CreatureRecord>,
        /// The appended evolved form
        to: Arc<CreatureRecord>,
    },

    /// The evolved form was already held, so the original was removed and
    /// nothing was appended. The collection shrank by one.
    ReleasedDuplicate {
        /// The entry that was evolved
        from: Arc<CreatureRecord>,
        /// The evolved form, already present in the collection
        to: Arc<CreatureRecord>,
    },
}

impl Evolution {
    /// The record that was evolved.
    pub fn original(&self) -> &Arc<CreatureRecord> {
        match self {
            Evolution::Evolved { from, .. } | Evolution::ReleasedDuplicate { from, .. } => from,
        }
    }

    /// The evolved form.
    pub fn evolved(&self) -> &Arc<CreatureRecord> {
        match self {
            Evolution::Evolved { to, .. } | Evolution::ReleasedDuplicate { to, .. } => to,
        }
    }
}

impl OwnerNode {
    /// Index of the entry with this name, ignoring case.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.collection.iter().position(|r| r.name_matches(name))
    }

    /// Whether the collection holds this id.
    pub fn contains_id(&self, id: i64) -> bool {
        self.collection.iter().any(|r| r.id == id)
    }

    /// Append the catalog record for `id`.
    ///
    /// # Errors
    ///
    /// - `DuplicateCreature` if the id is already held
    /// - `UnknownId` if the catalog has no such record
    pub fn add_entry(&mut self, catalog: &Catalog, id: i64) -> Result<Arc<CreatureRecord>> {
        if self.contains_id(id) {
            return Err(PokedexError::DuplicateCreature {
                owner: self.name.clone(),
                id,
            });
        }
        let record = catalog.get_by_id(id).ok_or(PokedexError::UnknownId(id))?;
        self.collection.push(Arc::clone(&record));
        info!(owner = %self.name, id, creature = %record.name, "creature added");
        Ok(record)
    }

    /// Remove the entry with this name, ignoring case.
    pub fn remove_entry(&mut self, name: &str) -> Result<Arc<CreatureRecord>> {
        let idx = self.position_of(name).ok_or_else(|| self.not_found(name))?;
        let removed = self.collection.remove(idx);
        info!(owner = %self.name, creature = %removed.name, "creature released");
        Ok(removed)
    }

    /// Replace the named entry with the catalog record at the next id.
    ///
    /// The evolved form is appended at the end; the original's position is
    /// not preserved. If the evolved form is already held, the original is
    /// still removed but nothing is appended.
    ///
    /// # Errors
    ///
    /// - `CreatureNotFound` if no entry has this name
    /// - `Unevolvable` if the entry's evolve flag is false
    /// - `MissingEvolution` if the catalog has no record at `id + 1`
    pub fn evolve_entry(&mut self, catalog: &Catalog, name: &str) -> Result<Evolution> {
        let idx = self.position_of(name).ok_or_else(|| self.not_found(name))?;
        let from = Arc::clone(&self.collection[idx]);
        if !from.can_evolve {
            return Err(PokedexError::Unevolvable(from.name.clone()));
        }
        let to = from
            .id
            .checked_add(1)
            .and_then(|id| catalog.get_by_id(id))
            .ok_or_else(|| PokedexError::MissingEvolution {
                name: from.name.clone(),
                id: from.id,
            })?;

        self.collection.remove(idx);
        if self.contains_id(to.id) {
            info!(
                owner = %self.name,
                from = %from.name,
                to = %to.name,
                "evolved form already held, released"
            );
            return Ok(Evolution::ReleasedDuplicate { from, to });
        }
        self.collection.push(Arc::clone(&to));
        info!(owner = %self.name, from = %from.name, to = %to.name, "creature evolved");
        Ok(Evolution::Evolved { from, to })
    }

    fn not_found(&self, name: &str) -> PokedexError {
        PokedexError::CreatureNotFound {
            owner: self.name.clone(),
            name: name.to_string(),
        }
    }
}
