//! Error types for grid setup.
//!
//! Input handling and painting never fail; these errors only come from
//! loading or saving configuration.

use std::path::PathBuf;

/// Result type alias for grid setup operations.
pub type Result<T> = std::result::Result<T, GridError>;

/// Errors that can occur while configuring a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The configuration text is not valid TOML for [`GridConfig`](crate::GridConfig).
    #[error("invalid grid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize grid configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A configuration file could not be read.
    #[error("failed to read grid configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
