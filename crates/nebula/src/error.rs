//! # Error Types
//!
//! Errors only exist at the outer boundary: reading settings and starting
//! the regeneration worker. Nothing inside a frame can fail.

use std::path::PathBuf;

use nebula_rendering::RegenError;
use nebula_shared::ConfigError;
use thiserror::Error;

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings {path:?}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for `Settings`.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configuration value was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Top-level errors.
#[derive(Error, Debug)]
pub enum NebulaError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The regeneration worker failed.
    #[error(transparent)]
    Regen(#[from] RegenError),
}

/// Result type for application operations.
pub type NebulaResult<T> = Result<T, NebulaError>;
