//! Catalog creature records

use std::fmt;

use serde::Serialize;

/// One immutable entry of the reference catalog.
///
/// Records are created once at load time and shared (via `Arc`) between
/// the catalog and every collection that holds them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CreatureRecord {
    /// Primary key
    pub id: i64,

    /// Display name, unique ignoring case
    pub name: String,

    /// Elemental type, e.g. `Grass`
    #[serde(rename = "type")]
    pub kind: String,

    /// Hit points
    pub hp: i64,

    /// Attack stat
    pub attack: i64,

    /// Whether the record at `id + 1` is this record's evolved form
    pub can_evolve: bool,
}

impl CreatureRecord {
    /// Create a record.
    pub fn new(
        id: i64,
        name: impl Into<String>,
        kind: impl Into<String>,
        hp: i64,
        attack: i64,
        can_evolve: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind: kind.into(),
            hp,
            attack,
            can_evolve,
        }
    }

    /// Case-insensitive name comparison.
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

impl fmt::Display for CreatureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Type: {}, HP: {}, Attack: {}, Can Evolve: {}",
            self.id,
            self.name,
            self.kind,
            self.hp,
            self.attack,
            if self.can_evolve { "TRUE" } else { "FALSE" }
        )
    }
}
