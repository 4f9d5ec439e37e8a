//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while assembling the run configuration.
///
/// All of these are fatal and are raised before any network call.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No access token was supplied.
    #[error("Missing GitHub token. Provide one via --token or the GITHUB_TOKEN environment variable")]
    MissingToken,

    /// Failed to read a file.
    #[error("Failed to read file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML content.
    #[error("Failed to parse config file '{path}': {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    /// Validation error in a configuration value.
    #[error("Invalid value for '{field}': {message}")]
    ValidationError { field: String, message: String },

    /// Missing required file.
    #[error("Missing required file: {path}")]
    MissingFile { path: String },
}
