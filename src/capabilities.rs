//! Injected collaborators
//!
//! The registry receives these once at construction and hands clones to every
//! entity model it builds.

use std::fmt;
use std::sync::Arc;

use crate::identity::{Clock, IdentityGenerator, SystemClock, UuidGenerator};
use crate::schema::{JsonSchemaValidator, SchemaValidator};

/// Validator, id generator and clock shared by all entity models
#[derive(Clone)]
pub struct Capabilities {
    pub validator: Arc<dyn SchemaValidator>,
    pub ids: Arc<dyn IdentityGenerator>,
    pub clock: Arc<dyn Clock>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            validator: Arc::new(JsonSchemaValidator),
            ids: Arc::new(UuidGenerator),
            clock: Arc::new(SystemClock),
        }
    }
}

impl Capabilities {
    pub fn with_validator(mut self, validator: Arc<dyn SchemaValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_ids(mut self, ids: Arc<dyn IdentityGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities").finish_non_exhaustive()
    }
}
