//! Error types for registry and catalog operations

use thiserror::Error;

/// Errors reported by registry operations.
///
/// None of these are fatal: every failing operation leaves the registry
/// exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PokedexError {
    /// No owner is indexed under this name
    #[error("Owner '{0}' not found.")]
    OwnerNotFound(String),

    /// An owner with this name (ignoring case) already exists
    #[error("Owner '{0}' already exists. No new Pokedex created.")]
    DuplicateOwner(String),

    /// The owner's collection has no creature with this name
    #[error("No Pokemon named '{name}' in {owner}'s Pokedex.")]
    CreatureNotFound {
        /// Owner whose collection was searched
        owner: String,
        /// Name that was looked up
        name: String,
    },

    /// The creature id is already in the owner's collection
    #[error("Pokemon already in the list. No changes made.")]
    DuplicateCreature {
        /// Owner whose collection was checked
        owner: String,
        /// The duplicated id
        id: i64,
    },

    /// The catalog has no record for this id
    #[error("ID {0} not found in the catalog.")]
    UnknownId(i64),

    /// The catalog has no record for this name
    #[error("Pokemon '{0}' not found in the catalog.")]
    UnknownName(String),

    /// A menu choice outside the bounded option set
    #[error("Invalid choice.")]
    InvalidSelection(i64),

    /// Evolution requested on a record whose evolve flag is false
    #[error("{0} cannot evolve.")]
    Unevolvable(String),

    /// The record can evolve but the catalog has no successor id
    #[error("{name} (ID {id}) has no evolved form in the catalog.")]
    MissingEvolution {
        /// Name of the record being evolved
        name: String,
        /// Id of the record being evolved
        id: i64,
    },
}

/// Errors raised while ingesting the reference catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The underlying reader failed
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// The input had no header row
    #[error("catalog is empty: missing header row")]
    MissingHeader,

    /// A data row could not be parsed
    #[error("line {line}: {message}")]
    Parse {
        /// 1-indexed line number in the source
        line: usize,
        /// What was wrong with the row
        message: String,
    },

    /// Two rows share an id
    #[error("line {line}: duplicate id {id}")]
    DuplicateId {
        /// 1-indexed line number of the second occurrence
        line: usize,
        /// The repeated id
        id: i64,
    },

    /// Two rows share a name, ignoring case
    #[error("line {line}: duplicate name '{name}'")]
    DuplicateName {
        /// 1-indexed line number of the second occurrence
        line: usize,
        /// The repeated name
        name: String,
    },
}

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, PokedexError>;
