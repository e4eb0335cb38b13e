//! The read-only reference catalog
//!
//! The catalog is loaded once from a comma-separated table whose first row
//! is a header (`ID,Name,Type,HP,Attack,Can Evolve`) and is never mutated
//! afterwards. Lookups are by id or by case-insensitive name.
//!
//! A data row whose leading id field is empty (or a blank line) ends
//! ingestion early; everything after it is ignored.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::record::CreatureRecord;

/// Number of columns in a catalog row.
const COLUMNS: usize = 6;

/// Static set of creature records indexed by id and by name.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Records in source order, keyed by id
    by_id: IndexMap<i64, Arc<CreatureRecord>>,

    /// Lower-cased name to id
    by_name: HashMap<String, i64>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-parsed records.
    ///
    /// # Errors
    ///
    /// Fails on a repeated id or a repeated (case-insensitive) name.
    pub fn from_records(
        records: impl IntoIterator<Item = CreatureRecord>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for (i, record) in records.into_iter().enumerate() {
            catalog.insert(i + 1, record)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a CSV file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let catalog = Self::from_reader(BufReader::new(file))?;
        info!(path = %path.display(), records = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse a catalog from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CatalogError> {
        let mut lines = reader.lines();

        match lines.next() {
            Some(header) => {
                header?;
            }
            None => return Err(CatalogError::MissingHeader),
        }

        let mut catalog = Self::new();
        for (i, line) in lines.enumerate() {
            let line_no = i + 2;
            let line = line?;
            match parse_row(&line, line_no)? {
                Some(record) => catalog.insert(line_no, record)?,
                None => {
                    debug!(line = line_no, "empty id field, stopping ingestion");
                    break;
                }
            }
        }
        Ok(catalog)
    }

    /// Parse a catalog held in memory.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        Self::from_reader(text.as_bytes())
    }

    fn insert(&mut self, line: usize, record: CreatureRecord) -> Result<(), CatalogError> {
        if self.by_id.contains_key(&record.id) {
            return Err(CatalogError::DuplicateId {
                line,
                id: record.id,
            });
        }
        let key = record.name.to_lowercase();
        if self.by_name.contains_key(&key) {
            return Err(CatalogError::DuplicateName {
                line,
                name: record.name,
            });
        }
        self.by_name.insert(key, record.id);
        self.by_id.insert(record.id, Arc::new(record));
        Ok(())
    }

    /// Look up a record by id.
    pub fn get_by_id(&self, id: i64) -> Option<Arc<CreatureRecord>> {
        self.by_id.get(&id).cloned()
    }

    /// Look up a record by name, ignoring case.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<CreatureRecord>> {
        self.by_name
            .get(&name.to_lowercase())
            .and_then(|id| self.get_by_id(*id))
    }

    /// Iterate over records in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<CreatureRecord>> {
        self.by_id.values()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Parse one data row. `Ok(None)` marks the end of the data.
fn parse_row(line: &str, line_no: usize) -> Result<Option<CreatureRecord>, CatalogError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields[0].is_empty() {
        return Ok(None);
    }
    if fields.len() < COLUMNS {
        return Err(CatalogError::Parse {
            line: line_no,
            message: format!("expected {} fields, found {}", COLUMNS, fields.len()),
        });
    }

    let int = |idx: usize, what: &str| -> Result<i64, CatalogError> {
        fields[idx].parse::<i64>().map_err(|_| CatalogError::Parse {
            line: line_no,
            message: format!("invalid {}: '{}'", what, fields[idx]),
        })
    };

    let can_evolve = match fields[5].to_uppercase().as_str() {
        "TRUE" => true,
        "FALSE" => false,
        other => {
            return Err(CatalogError::Parse {
                line: line_no,
                message: format!("invalid evolve flag: '{}'", other),
            })
        }
    };

    Ok(Some(CreatureRecord {
        id: int(0, "id")?,
        name: fields[1].to_string(),
        kind: fields[2].to_string(),
        hp: int(3, "hp")?,
        attack: int(4, "attack")?,
        can_evolve,
    }))
}
