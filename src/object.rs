//! Handle to an ODB database location and query construction against it.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::error::Result;
use crate::lexic::OdbLexic;
use crate::parser::StringParser;
use crate::sql::SqlBuilder;

#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("ODB path not found: {0}")]
    NotFound(PathBuf),

    #[error("empty filter expression")]
    EmptyFilter,
}

/// An ODB database (file or directory) together with the lexicon used to
/// resolve column names in queries.
#[derive(Debug, Clone)]
pub struct OdbObject {
    path: PathBuf,
    lexic: OdbLexic,
}

impl OdbObject {
    /// Open `path` with the built-in lexicon.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_lexic(path, OdbLexic::builtin())
    }

    /// Open `path` with a caller-provided lexicon.
    pub fn with_lexic(path: impl AsRef<Path>, lexic: OdbLexic) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ObjectError::NotFound(path.to_path_buf()).into());
        }
        debug!(path = %path.display(), "Opened ODB object");
        Ok(Self {
            path: path.to_path_buf(),
            lexic,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File stem of the database path.
    pub fn name(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }

    pub fn lexic(&self) -> &OdbLexic {
        &self.lexic
    }

    pub fn lexic_mut(&mut self) -> &mut OdbLexic {
        &mut self.lexic
    }

    /// Build a `SELECT` over this database.
    ///
    /// `columns` is a comma separated column list; unqualified names are
    /// resolved through the lexicon.
    pub fn select(&self, columns: &str, filter: Option<&str>) -> Result<String> {
        let columns = StringParser::new(columns)
            .parse_columns()?
            .iter()
            .map(|column| self.lexic.qualify(column).map(|c| c.to_string()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut sql = SqlBuilder::new();
        sql.add("SELECT ")
            .add(columns.join(","))
            .add_fmt(format_args!(
                " FROM \"{}\"",
                self.path.display().to_string().replace('"', "\"\"")
            ));

        if let Some(filter) = filter {
            let filter = filter.trim();
            if filter.is_empty() {
                return Err(ObjectError::EmptyFilter.into());
            }
            sql.add_fmt(format_args!(" WHERE {}", filter));
        }

        let query = sql.build();
        trace!(query = %query, "Built ODB query");
        Ok(query)
    }
}
