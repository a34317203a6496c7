//! Column lexicon: maps ODB column names to their table and description.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::parser::ColumnRef;

lazy_static::lazy_static! {
    // Standard header and body columns.
    static ref BUILTIN: BTreeMap<String, LexicEntry> = [
        ("lat", "hdr", "Latitude in degrees"),
        ("lon", "hdr", "Longitude in degrees"),
        ("date", "hdr", "Observation date (YYYYMMDD)"),
        ("time", "hdr", "Observation time (HHMMSS)"),
        ("statid", "hdr", "Station identifier"),
        ("varno", "body", "Observed variable number"),
        ("obsvalue", "body", "Observed value"),
        ("press", "body", "Pressure level"),
    ]
    .into_iter()
    .map(|(name, table, description)| {
        (name.to_string(), LexicEntry::new(table, description))
    })
    .collect();
}

#[derive(Debug, Error)]
pub enum LexicError {
    #[error("unknown column '{0}'")]
    UnknownColumn(String),

    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Lexicon record for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexicEntry {
    pub table: String,
    #[serde(default)]
    pub description: String,
}

impl LexicEntry {
    pub fn new(table: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            description: description.into(),
        }
    }
}

/// Column lexicon.
///
/// ```toml
/// [columns.sst]
/// table = "body"
/// description = "Sea surface temperature"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OdbLexic {
    #[serde(default)]
    columns: BTreeMap<String, LexicEntry>,
}

impl OdbLexic {
    /// Empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexicon pre-populated with the standard columns.
    pub fn builtin() -> Self {
        Self {
            columns: BUILTIN.clone(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, LexicError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a lexicon file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexicError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LexicError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let lexic = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), columns = lexic.len(), "Loaded lexicon");
        Ok(lexic)
    }

    /// Add every entry of `other`, replacing entries with the same name.
    pub fn extend(&mut self, other: OdbLexic) {
        self.columns.extend(other.columns);
    }

    /// Insert or replace an entry, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, entry: LexicEntry) -> Option<LexicEntry> {
        self.columns.insert(name.into(), entry)
    }

    pub fn get(&self, name: &str) -> Option<&LexicEntry> {
        self.columns.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Column names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Fill in the table of an unqualified known column.
    ///
    /// Qualified columns and the `*` wildcard are returned unchanged.
    pub fn qualify(&self, column: &ColumnRef) -> Result<ColumnRef, LexicError> {
        if column.table.is_some() || column.is_wildcard() {
            return Ok(column.clone());
        }
        self.get(&column.name)
            .map(|entry| ColumnRef::new(column.name.clone(), Some(entry.table.as_str())))
            .ok_or_else(|| LexicError::UnknownColumn(column.name.clone()))
    }
}
