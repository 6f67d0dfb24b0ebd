//! Error types for JsonBase
//!
//! Provides a unified error type for all operations.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using JsonBaseError
pub type Result<T> = std::result::Result<T, JsonBaseError>;

/// Unified error type for JsonBase operations
#[derive(Debug, Error)]
pub enum JsonBaseError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File already exists: {}", .0.display())]
    FileAlreadyExists(PathBuf),

    #[error("File does not exist: {}", .0.display())]
    FileNotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Registry Errors
    // -------------------------------------------------------------------------
    #[error("Entity name is not valid: {0:?}")]
    InvalidEntityName(String),

    #[error("Entity already exists: {0}")]
    DuplicateEntity(String),

    #[error("Entity does not exist: {0}")]
    EntityNotFound(String),

    #[error("Entity metadata property \"{property}\", {message}")]
    InvalidEntityMetadata { property: String, message: String },

    // -------------------------------------------------------------------------
    // Record Errors
    // -------------------------------------------------------------------------
    #[error("Entity definition schema {}{message}", describe_property(.property))]
    SchemaValidation { property: String, message: String },

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl JsonBaseError {
    /// Build a schema violation from the first issue a validator reported
    pub fn schema_violation(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaValidation {
            property: property.into(),
            message: message.into(),
        }
    }
}

/// Root-level violations have no property name to point at
fn describe_property(property: &str) -> String {
    if property.is_empty() {
        "- ".to_string()
    } else {
        format!("property \"{}\", ", property)
    }
}
