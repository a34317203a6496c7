//! The ODB environment object.
//!
//! [`OdbEnv::init`] exports the ODB variables described by an [`EnvConfig`]
//! into the process environment. Variables that are already set are left
//! untouched and reported as skipped. `ODB_BINPATH` is derived from the
//! `ODB_ROOT` in effect, including one that was already set.

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::config::{ConfigError, EnvConfig};
use crate::lexic::{LexicError, OdbLexic};

pub const ODB_ROOT: &str = "ODB_ROOT";
pub const ODB_BINPATH: &str = "ODB_BINPATH";
pub const ODB_IO_METHOD: &str = "ODB_IO_METHOD";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("ODB root does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("ODB root is not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("invalid environment variable name '{0}'")]
    InvalidName(String),

    #[error("invalid value for environment variable '{0}'")]
    InvalidValue(String),

    #[error("failed to load lexicon: {0}")]
    Lexic(#[from] LexicError),
}

/// Key/value store the environment is written to.
pub trait VarStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// The process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl VarStore for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

impl VarStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Outcome of [`OdbEnv::init`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvReport {
    /// Variables written, in order
    pub applied: Vec<(String, String)>,
    /// Variables left alone because they were already set
    pub skipped: Vec<String>,
}

/// ODB environment: configuration plus the lexicon it selects.
#[derive(Debug, Clone)]
pub struct OdbEnv {
    config: EnvConfig,
    lexic: OdbLexic,
    report: Option<EnvReport>,
}

impl Default for OdbEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl OdbEnv {
    /// Environment with default configuration.
    pub fn new() -> Self {
        Self::with_config(EnvConfig::default())
    }

    pub fn with_config(config: EnvConfig) -> Self {
        Self {
            config,
            lexic: OdbLexic::builtin(),
            report: None,
        }
    }

    /// Environment configured from `ODX_*` variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self::with_config(EnvConfig::load()?))
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn lexic(&self) -> &OdbLexic {
        &self.lexic
    }

    pub fn is_initialized(&self) -> bool {
        self.report.is_some()
    }

    /// What the last successful `init` applied.
    pub fn report(&self) -> Option<&EnvReport> {
        self.report.as_ref()
    }

    /// Export the configured variables into the process environment.
    pub fn init(&mut self) -> Result<&EnvReport, EnvError> {
        self.init_with(&mut ProcessEnv)
    }

    /// Export the configured variables into `store`.
    ///
    /// Calling it again on an initialized environment returns the first report.
    pub fn init_with<S: VarStore>(&mut self, store: &mut S) -> Result<&EnvReport, EnvError> {
        let report = match self.report.take() {
            Some(report) => {
                debug!("ODB environment already initialized");
                report
            }
            None => self.apply(store)?,
        };
        Ok(self.report.insert(report))
    }

    fn apply<S: VarStore>(&mut self, store: &mut S) -> Result<EnvReport, EnvError> {
        let planned = self.planned_vars(store)?;

        if let Some(path) = &self.config.lexicon {
            self.lexic.extend(OdbLexic::load(path)?);
        }

        // Planned keys are unique, so every skip below was set before init.
        let mut report = EnvReport::default();
        for (key, value) in planned {
            if let Some(existing) = store.get(&key) {
                debug!(key = %key, existing = %existing, "Keeping existing variable");
                report.skipped.push(key);
                continue;
            }
            store.set(&key, &value);
            debug!(key = %key, value = %value, "Exported variable");
            report.applied.push((key, value));
        }

        if !report.skipped.is_empty() {
            warn!(skipped = ?report.skipped, "Some ODB variables were already set");
        }
        info!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            "ODB environment initialized"
        );
        Ok(report)
    }

    // Validate everything before touching the store.
    fn planned_vars<S: VarStore>(&self, store: &S) -> Result<Vec<(String, String)>, EnvError> {
        let mut vars = Vec::new();

        if let Some(root) = &self.config.odb_root {
            if !root.exists() {
                return Err(EnvError::RootNotFound(root.clone()));
            }
            if !root.is_dir() {
                return Err(EnvError::RootNotDirectory(root.clone()));
            }
            vars.push((ODB_ROOT.to_string(), root.display().to_string()));
        }

        vars.push((ODB_IO_METHOD.to_string(), self.config.io_method.clone()));

        // Explicit vars replace the built-in value of the same name.
        for (key, value) in &self.config.vars {
            match vars.iter_mut().find(|(k, _)| k == key) {
                Some(entry) => entry.1 = value.clone(),
                None => vars.push((key.clone(), value.clone())),
            }
        }

        // ODB_BINPATH follows whichever ODB_ROOT ends up in effect.
        if !self.config.vars.contains_key(ODB_BINPATH) {
            if let Some(idx) = vars.iter().position(|(k, _)| k == ODB_ROOT) {
                let root = store.get(ODB_ROOT).unwrap_or_else(|| vars[idx].1.clone());
                let binpath = Path::new(&root).join("bin").display().to_string();
                vars.insert(idx + 1, (ODB_BINPATH.to_string(), binpath));
            }
        }

        for (key, value) in &vars {
            if key.is_empty() || key.contains('=') || key.contains('\0') {
                return Err(EnvError::InvalidName(key.clone()));
            }
            if value.contains('\0') {
                return Err(EnvError::InvalidValue(key.clone()));
            }
        }
        Ok(vars)
    }
}
