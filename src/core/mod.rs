//! Core building blocks: bootstrap, environment, configuration, errors, logging.

pub mod bootstrap;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;
