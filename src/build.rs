//! Version and build information.
//!
//! The constants are populated by the crate's build script:
//! - `GIT_HASH`: short commit hash, or "unknown"
//! - `BUILD_TIME_UTC`: build timestamp in RFC3339 format
//! - `RUSTC_VERSION`: compiler used for the build
//! - `TARGET`: target triple
//!
//! ```rust
//! let info = odx::build::info();
//! assert_eq!(info.version, odx::build::version());
//! ```

use serde::Serialize;

/// Package version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Git commit hash of the build, or "unknown" if not available.
pub const GIT_HASH: &str = env!("ODX_GIT_HASH");

/// Build timestamp in RFC3339 format.
pub const BUILD_TIME_UTC: &str = env!("ODX_BUILD_TIME_UTC");

/// Rustc version used for the build.
pub const RUSTC_VERSION: &str = env!("ODX_RUSTC_VERSION");

/// Target triple the crate was compiled for.
pub const TARGET: &str = env!("ODX_TARGET");

/// Build description: version, compiler, platform and build stamp.
///
/// Serializes to a flat JSON object with the keys `version`, `compiler`,
/// `platform` and `build`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Rustc version string
    pub compiler: &'static str,
    /// Target triple
    pub platform: &'static str,
    /// `<git hash>, <build time>`
    pub build: String,
}

impl BuildInfo {
    /// Creates a new BuildInfo from the compiled-in constants.
    pub fn new() -> Self {
        Self {
            version: VERSION,
            compiler: RUSTC_VERSION,
            platform: TARGET,
            build: format!("{}, {}", GIT_HASH, BUILD_TIME_UTC),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the package version.
pub fn version() -> &'static str {
    VERSION
}

/// Returns build information as a structured object.
pub fn info() -> BuildInfo {
    BuildInfo::new()
}
