//! Incremental SQL text assembly.

use std::fmt::{self, Write as _};

/// Append-only list of SQL fragments, joined with no separator on [`build`](Self::build).
///
/// ```rust
/// use odx::sql::SqlBuilder;
///
/// let mut sql = SqlBuilder::new();
/// sql.add("SELECT lat@hdr");
/// sql.add_fmt(format_args!(" FROM \"{}\"", "obs.odb"));
/// assert_eq!(sql.build(), "SELECT lat@hdr FROM \"obs.odb\"");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlBuilder {
    parts: Vec<String>,
}

impl SqlBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a literal fragment.
    pub fn add(&mut self, text: impl Into<String>) -> &mut Self {
        self.parts.push(text.into());
        self
    }

    /// Append a formatted fragment.
    pub fn add_fmt(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        let mut part = String::new();
        // Writing into a String cannot fail.
        let _ = part.write_fmt(args);
        self.parts.push(part);
        self
    }

    /// Number of fragments added so far.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Concatenate every fragment in insertion order.
    pub fn build(&self) -> String {
        self.parts.concat()
    }
}
