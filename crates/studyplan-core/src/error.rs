//! Core error types for studyplan-core.
//!
//! Plan generation itself never fails: degenerate input degrades to rest
//! days or early-exhausted schedules. Errors here cover the surrounding
//! concerns -- configuration, snapshot persistence, and profile validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Profile validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Snapshot persistence errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to load a snapshot
    #[error("Failed to load snapshot from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save a snapshot
    #[error("Failed to save snapshot to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Profile validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Invalid availability window
    #[error("Invalid availability window: {start}..{end}")]
    InvalidWindow { start: String, end: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Topic estimates exceed the subject's own estimate
    #[error("Subject '{subject}': topic minutes ({topic_minutes}) exceed the subject estimate ({subject_minutes})")]
    TopicMinutesExceedSubject {
        subject: String,
        topic_minutes: u32,
        subject_minutes: u32,
    },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
