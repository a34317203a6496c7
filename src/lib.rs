//! odx library root
//!
//! The package surface is [`StringParser`], [`OdbObject`], [`OdbLexic`] and
//! [`OdbEnv`]. The process environment is set up explicitly and at most once
//! with [`ensure_initialized`]:
//!
//! ```no_run
//! let env = odx::ensure_initialized()?;
//! assert!(odx::is_initialized());
//! println!("{:?}", env.report());
//! # Ok::<(), odx::Error>(())
//! ```

pub mod build;
pub mod core;
pub mod lexic;
pub mod object;
pub mod parser;
pub mod sql;

pub use crate::core::env::OdbEnv;
pub use crate::lexic::OdbLexic;
pub use crate::object::OdbObject;
pub use crate::parser::StringParser;

pub use crate::core::bootstrap::{ensure_initialized, environment, is_initialized};
pub use crate::core::error::{Error, Result};

pub use crate::core::bootstrap;
pub use crate::core::config;
pub use crate::core::env;
pub use crate::core::error;
pub use crate::core::logging;

/// Commonly used types in one import.
pub mod prelude {
    pub use crate::build::{info, version, BuildInfo};
    pub use crate::core::bootstrap::{Bootstrap, BootstrapState};
    pub use crate::core::config::EnvConfig;
    pub use crate::core::env::EnvReport;
    pub use crate::core::logging::init_logging;
    pub use crate::lexic::LexicEntry;
    pub use crate::parser::ColumnRef;
    pub use crate::sql::SqlBuilder;
    pub use crate::{OdbEnv, OdbLexic, OdbObject, StringParser};
    pub use crate::{ensure_initialized, environment, is_initialized, Error, Result};
}
