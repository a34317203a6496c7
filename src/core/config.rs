//! Environment configuration.
//!
//! Values are layered: built-in defaults, then the TOML file named by
//! `ODX_CONFIG`, then individual `ODX_*` overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

use crate::parser::{ParseError, StringParser};

/// Path of a TOML configuration file.
pub const CONFIG_PATH_VAR: &str = "ODX_CONFIG";
/// Overrides `odb_root`.
pub const ODB_ROOT_VAR: &str = "ODX_ODB_ROOT";
/// Overrides `io_method`.
pub const IO_METHOD_VAR: &str = "ODX_IO_METHOD";
/// Extra `KEY=VALUE` items merged into `vars`.
pub const EXTRA_VARS_VAR: &str = "ODX_ENV";

const DEFAULT_IO_METHOD: &str = "4";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid ODX_ENV value: {0}")]
    ExtraVars(#[from] ParseError),
}

/// Settings consumed by [`OdbEnv`](crate::OdbEnv).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvConfig {
    /// ODB installation root, exported as `ODB_ROOT`
    pub odb_root: Option<PathBuf>,
    /// Value exported as `ODB_IO_METHOD`
    pub io_method: String,
    /// Additional variables to export
    pub vars: BTreeMap<String, String>,
    /// Optional lexicon file extending the built-in column table
    pub lexicon: Option<PathBuf>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            odb_root: None,
            io_method: DEFAULT_IO_METHOD.to_string(),
            vars: BTreeMap::new(),
            lexicon: None,
        }
    }
}

impl EnvConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => {
                let path = PathBuf::from(path);
                debug!(path = %path.display(), "Loading configuration file");
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path: path.clone(), source })?;
                Self::from_toml_str(&text)?
            }
            None => Self::default(),
        };

        if let Some(root) = lookup(ODB_ROOT_VAR).filter(|v| !v.trim().is_empty()) {
            config.odb_root = Some(PathBuf::from(root.trim()));
        }
        if let Some(method) = lookup(IO_METHOD_VAR).filter(|v| !v.trim().is_empty()) {
            config.io_method = method.trim().to_string();
        }
        if let Some(extra) = lookup(EXTRA_VARS_VAR) {
            for (key, value) in StringParser::new(&extra).parse_assignments()? {
                config.vars.insert(key, value);
            }
        }

        Ok(config)
    }

    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = EnvConfig::load_with(lookup_from(&[])).unwrap();
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.io_method, "4");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EnvConfig::from_toml_str("odb_root = \"/opt/odb\"\n").unwrap();
        assert_eq!(config.odb_root, Some(PathBuf::from("/opt/odb")));
        assert_eq!(config.io_method, "4");
        assert!(config.vars.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = EnvConfig::from_toml_str("odb_rot = \"/opt/odb\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_file_then_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "io_method = \"1\"\n[vars]\nODB_SRCPATH = \"/data/src\"\nODB_CODE = \"ECMA\""
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = EnvConfig::load_with(lookup_from(&[
            (CONFIG_PATH_VAR, path.as_str()),
            (IO_METHOD_VAR, " 5 "),
            (EXTRA_VARS_VAR, "ODB_CODE=CCMA; ODB_DATAPATH=/data"),
        ]))
        .unwrap();

        assert_eq!(config.io_method, "5");
        assert_eq!(config.vars["ODB_SRCPATH"], "/data/src");
        assert_eq!(config.vars["ODB_CODE"], "CCMA");
        assert_eq!(config.vars["ODB_DATAPATH"], "/data");
    }

    #[test]
    fn test_missing_config_file_is_error() {
        let err = EnvConfig::load_with(lookup_from(&[(
            CONFIG_PATH_VAR,
            "/nonexistent/odx/config.toml",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_malformed_extra_vars() {
        let err = EnvConfig::load_with(lookup_from(&[(EXTRA_VARS_VAR, "ODB_CODE")])).unwrap_err();
        assert!(matches!(err, ConfigError::ExtraVars(_)));
    }
}
