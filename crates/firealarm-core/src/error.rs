//! Core error types for firealarm-core.
//!
//! This module defines the error hierarchy using thiserror. Floors outside
//! the accepted range are deliberately not represented here: recording such a
//! floor is a silent no-op, not a failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for firealarm-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The tracker needs a tokio runtime to arm its idle-expiry timer
    #[error("No tokio runtime available to drive the idle-expiry timer")]
    NoRuntime,

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Missing required configuration key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),
}

/// Rejections of user-supplied floor input.
///
/// The `Display` text is meant to be shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing but whitespace was supplied
    #[error("Floor input cannot be empty")]
    EmptyInput,

    /// A `start-end` range where either bound is not an integer
    #[error("Invalid floor range")]
    InvalidRange,

    /// A comma-separated list without a single integer in it
    #[error("Could not recognise any floor numbers")]
    NoFloorsRecognised,

    /// Anything else that is not an integer
    #[error("Invalid floor number")]
    InvalidFloor,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
