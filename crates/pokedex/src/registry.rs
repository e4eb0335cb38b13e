//! The registry: catalog plus owner index behind one operation surface
//!
//! `Registry` is the explicit owner of all session state. Console front
//! ends hold one and call into it; nothing here is global.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::collection::Evolution;
use crate::error::{PokedexError, Result};
use crate::filter::Filter;
use crate::index::{OwnerIndex, OwnerNode, Traversal};
use crate::record::CreatureRecord;
use crate::report::{self, OwnerSummary};

/// The three starters offered to a new owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Starter {
    /// Menu choice 1
    Treecko,
    /// Menu choice 2
    Torchic,
    /// Menu choice 3
    Mudkip,
}

impl Starter {
    /// Catalog name of this starter.
    pub fn name(self) -> &'static str {
        match self {
            Starter::Treecko => "Treecko",
            Starter::Torchic => "Torchic",
            Starter::Mudkip => "Mudkip",
        }
    }
}

impl TryFrom<i64> for Starter {
    type Error = PokedexError;

    fn try_from(choice: i64) -> Result<Self> {
        match choice {
            1 => Ok(Starter::Treecko),
            2 => Ok(Starter::Torchic),
            3 => Ok(Starter::Mudkip),
            other => Err(PokedexError::InvalidSelection(other)),
        }
    }
}

impl fmt::Display for Starter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owner registry backed by a read-only catalog.
#[derive(Debug, Clone)]
pub struct Registry {
    catalog: Catalog,
    index: OwnerIndex,
}

impl Registry {
    /// Create an empty registry over `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            index: OwnerIndex::new(),
        }
    }

    /// The reference catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The owner index.
    pub fn index(&self) -> &OwnerIndex {
        &self.index
    }

    // ═══════════════════════════════════════════════════════════════════
    // Owner Lifecycle
    // ═══════════════════════════════════════════════════════════════════

    /// Register a new owner holding the chosen starter.
    ///
    /// # Errors
    ///
    /// - `DuplicateOwner` if the name is taken (ignoring case)
    /// - `UnknownName` if the catalog lacks the starter
    pub fn create_owner(&mut self, name: &str, starter: Starter) -> Result<Arc<CreatureRecord>> {
        if self.index.contains(name) {
            return Err(PokedexError::DuplicateOwner(name.to_string()));
        }
        let record = self
            .catalog
            .get_by_name(starter.name())
            .ok_or_else(|| PokedexError::UnknownName(starter.name().to_string()))?;
        self.index.insert(name, Arc::clone(&record));
        info!(owner = name, starter = %record.name, "owner created");
        Ok(record)
    }

    /// Remove an owner and its whole collection.
    pub fn delete_owner(&mut self, name: &str) -> Result<()> {
        if !self.index.delete(name) {
            return Err(PokedexError::OwnerNotFound(name.to_string()));
        }
        info!(owner = name, "owner deleted");
        Ok(())
    }

    /// Look up an owner by name, ignoring case.
    pub fn find_owner(&self, name: &str) -> Result<&OwnerNode> {
        debug!(owner = name, "owner lookup");
        self.index
            .find(name)
            .ok_or_else(|| PokedexError::OwnerNotFound(name.to_string()))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Collection Operations
    // ═══════════════════════════════════════════════════════════════════

    /// Append the catalog record with `id` to an owner's collection.
    pub fn add_creature(&mut self, owner: &str, id: i64) -> Result<Arc<CreatureRecord>> {
        let (node, catalog) = self.owner_mut(owner)?;
        node.add_entry(catalog, id)
    }

    /// Release a creature from an owner's collection by name.
    pub fn release_creature(&mut self, owner: &str, name: &str) -> Result<Arc<CreatureRecord>> {
        let (node, _) = self.owner_mut(owner)?;
        node.remove_entry(name)
    }

    /// Evolve a creature in an owner's collection by name.
    pub fn evolve_creature(&mut self, owner: &str, name: &str) -> Result<Evolution> {
        let (node, catalog) = self.owner_mut(owner)?;
        node.evolve_entry(catalog, name)
    }

    fn owner_mut(&mut self, name: &str) -> Result<(&mut OwnerNode, &Catalog)> {
        let node = self
            .index
            .find_mut(name)
            .ok_or_else(|| PokedexError::OwnerNotFound(name.to_string()))?;
        Ok((node, &self.catalog))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Reporting
    // ═══════════════════════════════════════════════════════════════════

    /// An owner's entries that pass `filter`.
    pub fn list_filtered(&self, owner: &str, filter: &Filter) -> Result<Vec<Arc<CreatureRecord>>> {
        Ok(self.find_owner(owner)?.filtered(filter))
    }

    /// All owners in the given order.
    pub fn traverse(&self, order: Traversal) -> Vec<&OwnerNode> {
        self.index.traverse(order)
    }

    /// Owners sorted by collection size, ties broken by name.
    pub fn sort_report(&self) -> Vec<OwnerSummary> {
        report::sort_by_size(&self.index)
    }
}
