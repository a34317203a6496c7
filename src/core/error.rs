//! Crate-wide error type.

use thiserror::Error;

pub use crate::core::config::ConfigError;
pub use crate::core::env::EnvError;
pub use crate::lexic::LexicError;
pub use crate::object::ObjectError;
pub use crate::parser::ParseError;

/// Top-level error returned by the public entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("lexicon error: {0}")]
    Lexic(#[from] LexicError),

    #[error("object error: {0}")]
    Object(#[from] ObjectError),
}

/// Result alias using the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
