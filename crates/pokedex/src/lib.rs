//! # Pokedex
//!
//! A registry of owners, each holding a collection of creature records
//! drawn from a fixed reference catalog.
//!
//! ## Architecture
//!
//! - **Catalog**: read-only records indexed by id and case-insensitive name
//! - **OwnerIndex**: unbalanced BST of owners keyed by case-insensitive name
//! - **Collection operations**: add, release, and evolve on one owner
//! - **Reporting**: traversals, filters, and the size-sorted owner report
//! - **Registry**: the operation surface tying the above together
//!
//! All state is memory-resident and single-threaded.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod collection;
pub mod error;
pub mod filter;
pub mod index;
pub mod record;
pub mod registry;
pub mod report;

// Re-export main types
pub use catalog::Catalog;
pub use collection::Evolution;
pub use error::{CatalogError, PokedexError, Result};
pub use filter::Filter;
pub use index::{compare_names, OwnerIndex, OwnerNode, Traversal};
pub use record::CreatureRecord;
pub use registry::{Registry, Starter};
pub use report::OwnerSummary;

/// Pokedex version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
