//! # JsonBase
//!
//! A minimal embedded document store with:
//! - Named entities, each a collection of records in one JSON-array file
//! - JSON-Schema validation of every record before it is written
//! - Merge-based partial updates with protected `id` / `creationTime`
//! - Atomic (temp file + rename) file replacement
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Host Application                          │
//! └───────────────┬─────────────────────────────┬───────────────┘
//!                 │ create / attach / use       │ export
//!                 │ has / drop                  │
//! ┌───────────────▼───────────────┐   ┌─────────▼──────────────┐
//! │        EntityRegistry         │◄──┤        Exporter         │
//! │   (name → metadata + model)   │   │  (projected read-only)  │
//! └───────────────┬───────────────┘   └────────────────────────┘
//!                 │
//!                 ▼
//! ┌───────────────────────────────┐   ┌────────────────────────┐
//! │         EntityModel           ├──►│  SchemaValidator        │
//! │ (validate, merge, protect ids)├──►│  IdentityGenerator/Clock│
//! └───────────────┬───────────────┘   └────────────────────────┘
//!                 │
//!                 ▼
//! ┌───────────────────────────────┐
//! │         RecordStore           │
//! │ ({source_dir}/{entity}.json)  │
//! └───────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use jsonbase::{Config, EntityRegistry};
//! use serde_json::json;
//!
//! # fn main() -> jsonbase::Result<()> {
//! let mut registry = EntityRegistry::new(Config::builder().source_dir("./data").build())?;
//!
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "name": { "type": "string" }, "age": { "type": "number" } },
//!     "required": ["name", "age"]
//! });
//! let users = registry.create("user", schema)?;
//!
//! let record = jsonbase::to_record(json!({ "name": "Yaron", "age": 35 }))?;
//! let stored = users.insert(record)?;
//! assert_eq!(users.count()?, 1);
//! # let _ = stored;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod capabilities;
pub mod identity;
pub mod record;
pub mod schema;

pub mod storage;
pub mod model;
pub mod registry;
pub mod exporter;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{JsonBaseError, Result};
pub use config::{Config, WriteMode};
pub use capabilities::Capabilities;
pub use record::{to_record, Record};
pub use schema::{JsonSchemaValidator, SchemaDefinition, SchemaValidator, ValidationIssue, ValidationReport};
pub use model::{EntityMetadata, EntityModel};
pub use registry::EntityRegistry;
pub use exporter::Exporter;
pub use storage::RecordStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of JsonBase
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
