//! Schema Module
//!
//! Schema documents and the validator capability.
//!
//! ## Responsibilities
//! - Hold an entity's schema as an opaque, immutable document
//! - Define the validator seam (`SchemaValidator`) the model calls through
//! - Ship a default validator built on the `jsonschema` crate
//!
//! Validators report every issue they find, in order; callers that only need
//! one (the entity model) take the first.

mod validator;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use validator::JsonSchemaValidator;

/// Opaque schema document, immutable once an entity is created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDefinition(Value);

impl SchemaDefinition {
    pub fn new(document: Value) -> Self {
        Self(document)
    }

    /// Get the raw document
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for SchemaDefinition {
    fn from(document: Value) -> Self {
        Self::new(document)
    }
}

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Path to the offending value (`""` for the root, `a.b`, `tags[0]`)
    pub property: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.property.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.property, self.message)
        }
    }
}

/// Outcome of one validation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// All issues, in the order they were found
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn first(&self) -> Option<&ValidationIssue> {
        self.issues.first()
    }
}

/// Validates a structured value against a schema document
pub trait SchemaValidator: Send + Sync {
    fn validate(&self, value: &Value, schema: &Value) -> ValidationReport;
}
