//! String tokenizing helpers for column lists and `KEY=VALUE` lists.

use std::fmt;
use thiserror::Error;

/// Separators accepted between list items.
pub const LIST_SEPARATORS: &[char] = &[',', ';'];

/// Errors produced by [`StringParser`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty list")]
    Empty,

    #[error("expected KEY=VALUE, found '{0}'")]
    MissingEquals(String),

    #[error("empty key in '{0}'")]
    EmptyKey(String),

    #[error("invalid column name '{0}'")]
    InvalidColumn(String),
}

/// A column reference, optionally qualified with its table (`name@table`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub name: String,
    pub table: Option<String>,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, table: Option<&str>) -> Self {
        Self {
            name: name.into(),
            table: table.map(str::to_string),
        }
    }

    /// `true` for the `*` wildcard.
    pub fn is_wildcard(&self) -> bool {
        self.name == "*"
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{}@{}", self.name, table),
            None => f.write_str(&self.name),
        }
    }
}

/// Tokenizer over a single input string.
#[derive(Debug, Clone, Copy)]
pub struct StringParser<'a> {
    input: &'a str,
}

impl<'a> StringParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Split on any of `separators`, trimming items and dropping empty ones.
    pub fn split_list(&self, separators: &[char]) -> Vec<&'a str> {
        self.input
            .split(|c: char| separators.contains(&c))
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    }

    /// Parse `KEY=VALUE` items separated by `,` or `;`.
    ///
    /// Only the first `=` splits; the value may be empty.
    pub fn parse_assignments(&self) -> Result<Vec<(String, String)>, ParseError> {
        self.split_list(LIST_SEPARATORS)
            .into_iter()
            .map(|item| {
                let (key, value) = item
                    .split_once('=')
                    .ok_or_else(|| ParseError::MissingEquals(item.to_string()))?;
                let key = key.trim();
                if key.is_empty() {
                    return Err(ParseError::EmptyKey(item.to_string()));
                }
                Ok((key.to_string(), value.trim().to_string()))
            })
            .collect()
    }

    /// Parse a column list such as `lat, lon, obsvalue@body`.
    pub fn parse_columns(&self) -> Result<Vec<ColumnRef>, ParseError> {
        let items = self.split_list(&[',']);
        if items.is_empty() {
            return Err(ParseError::Empty);
        }
        items.into_iter().map(parse_column).collect()
    }
}

fn parse_column(item: &str) -> Result<ColumnRef, ParseError> {
    let invalid = || ParseError::InvalidColumn(item.to_string());

    if item == "*" {
        return Ok(ColumnRef::new("*", None));
    }

    let (name, table) = match item.split_once('@') {
        Some((name, table)) => (name.trim(), Some(table.trim())),
        None => (item, None),
    };

    if !is_identifier(name) {
        return Err(invalid());
    }
    if let Some(table) = table {
        if !is_identifier(table) {
            return Err(invalid());
        }
    }
    Ok(ColumnRef::new(name, table))
}

// [A-Za-z_][A-Za-z0-9_.]*
fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_trims_and_drops_empty() {
        let parser = StringParser::new(" a, b ;; c ,");
        assert_eq!(parser.split_list(LIST_SEPARATORS), vec!["a", "b", "c"]);
        assert!(StringParser::new(" , ").split_list(&[',']).is_empty());
    }

    #[test]
    fn test_parse_assignments() {
        let pairs = StringParser::new("ODB_CODE=ECMA; ODB_LIBS = a=b ,EMPTY=")
            .parse_assignments()
            .unwrap();
        assert_eq!(
            pairs,
            vec![
                ("ODB_CODE".to_string(), "ECMA".to_string()),
                ("ODB_LIBS".to_string(), "a=b".to_string()),
                ("EMPTY".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_assignments_errors() {
        assert_eq!(
            StringParser::new("ODB_CODE").parse_assignments(),
            Err(ParseError::MissingEquals("ODB_CODE".to_string()))
        );
        assert_eq!(
            StringParser::new("=x").parse_assignments(),
            Err(ParseError::EmptyKey("=x".to_string()))
        );
        assert_eq!(StringParser::new("").parse_assignments(), Ok(vec![]));
    }

    #[test]
    fn test_parse_columns() {
        let columns = StringParser::new("lat, obsvalue@body , *").parse_columns().unwrap();
        assert_eq!(
            columns,
            vec![
                ColumnRef::new("lat", None),
                ColumnRef::new("obsvalue", Some("body")),
                ColumnRef::new("*", None),
            ]
        );
        assert!(columns[2].is_wildcard());
        assert_eq!(columns[1].to_string(), "obsvalue@body");
    }

    #[test]
    fn test_parse_columns_rejects_bad_names() {
        assert_eq!(StringParser::new(" ,").parse_columns(), Err(ParseError::Empty));
        for bad in ["1lat", "lat@", "@hdr", "lat-x", "lat@hdr@body"] {
            assert_eq!(
                StringParser::new(bad).parse_columns(),
                Err(ParseError::InvalidColumn(bad.to_string())),
                "{bad}"
            );
        }
    }
}
