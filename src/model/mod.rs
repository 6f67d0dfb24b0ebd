//! Entity Model
//!
//! Schema-validated CRUD over one entity's record file.
//!
//! ## Responsibilities
//! - Validate the entity's own metadata on construction
//! - Reject records that fail the entity schema before anything is written
//! - Assign `id` / `creationTime` on insert, `updateTime` on update
//! - Merge-based partial update that never lets payloads touch preserved fields
//! - Id lookup and field projection on reads
//!
//! Persistence is delegated to [`RecordStore`]; the model keeps no cache.

mod merge;
mod metadata;
mod projection;

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::capabilities::Capabilities;
use crate::config::WriteMode;
use crate::error::{JsonBaseError, Result};
use crate::record::{Record, CREATION_TIME_FIELD, ID_FIELD, PRESERVED_FIELDS, UPDATE_TIME_FIELD};
use crate::schema::SchemaDefinition;
use crate::storage::RecordStore;

pub use merge::merge_recursive;
pub use metadata::{metadata_schema, EntityMetadata};
pub use projection::{project, project_all};

/// CRUD handle for one entity
#[derive(Debug)]
pub struct EntityModel {
    metadata: EntityMetadata,
    store: RecordStore,
    capabilities: Capabilities,
}

impl EntityModel {
    /// Validate `metadata` and create the entity's empty backing file
    ///
    /// Fails with `InvalidEntityMetadata` on a bad metadata document and with
    /// `FileAlreadyExists` when a file is already at the target path.
    pub fn new(
        metadata: EntityMetadata,
        write_mode: WriteMode,
        capabilities: Capabilities,
    ) -> Result<Self> {
        let model = Self::bind(metadata, write_mode, capabilities)?;
        model.store.create(&[])?;

        info!(entity = %model.name(), path = %model.file_path().display(), "created entity");
        Ok(model)
    }

    /// Validate `metadata` and bind to an already existing backing file
    ///
    /// Fails with `FileNotFound` when there is no file to bind to.
    pub fn open(
        metadata: EntityMetadata,
        write_mode: WriteMode,
        capabilities: Capabilities,
    ) -> Result<Self> {
        let model = Self::bind(metadata, write_mode, capabilities)?;
        if !model.store.file_exists() {
            return Err(JsonBaseError::FileNotFound(model.file_path().to_path_buf()));
        }

        info!(entity = %model.name(), path = %model.file_path().display(), "attached entity");
        Ok(model)
    }

    fn bind(
        metadata: EntityMetadata,
        write_mode: WriteMode,
        capabilities: Capabilities,
    ) -> Result<Self> {
        let report = capabilities
            .validator
            .validate(&metadata.to_document(), &metadata_schema());

        if let Some(issue) = report.first() {
            return Err(JsonBaseError::InvalidEntityMetadata {
                property: issue.property.clone(),
                message: issue.message.clone(),
            });
        }

        let store = RecordStore::new(metadata.file_path.clone(), write_mode);
        Ok(Self {
            metadata,
            store,
            capabilities,
        })
    }

    /// Number of records in the collection
    pub fn count(&self) -> Result<usize> {
        Ok(self.find(None, &[])?.len())
    }

    /// Read records
    ///
    /// - `id` absent (or empty): the whole collection, in insertion order
    /// - `id` present: zero or one record
    /// - non-empty `projection`: each result keeps only those fields it has
    pub fn find(&self, id: Option<&str>, projection: &[&str]) -> Result<Vec<Record>> {
        let id = id.filter(|id| !id.is_empty());
        let records = self.store.read(id)?;
        Ok(project_all(records, projection))
    }

    /// Validate and append a new record
    ///
    /// Any `id` / `creationTime` in the input is overwritten by fresh values.
    pub fn insert(&self, mut record: Record) -> Result<Record> {
        self.validate_record(&record)?;

        record.insert(
            ID_FIELD.to_string(),
            Value::String(self.capabilities.ids.generate_id()),
        );
        record.insert(
            CREATION_TIME_FIELD.to_string(),
            Value::from(self.capabilities.clock.now()),
        );

        self.store.add(record.clone())?;

        debug!(entity = %self.name(), id = ?record.get(ID_FIELD), "inserted record");
        Ok(record)
    }

    /// Merge `payload` into the record with `id` and persist the result
    ///
    /// The payload itself must satisfy the entity schema. Preserved fields are
    /// always restored from the stored record.
    pub fn update(&self, id: &str, payload: Record) -> Result<Record> {
        self.validate_record(&payload)?;

        let original = self
            .store
            .read(Some(id))?
            .into_iter()
            .next()
            .ok_or_else(|| JsonBaseError::RecordNotFound(id.to_string()))?;

        let mut updated = merge_recursive(original.clone(), payload);
        updated.insert(
            UPDATE_TIME_FIELD.to_string(),
            Value::from(self.capabilities.clock.now()),
        );

        for field in PRESERVED_FIELDS {
            match original.get(field) {
                Some(value) => {
                    updated.insert(field.to_string(), value.clone());
                }
                None => {
                    updated.remove(field);
                }
            }
        }

        self.store.update(id, updated.clone())?;

        debug!(entity = %self.name(), id, "updated record");
        Ok(updated)
    }

    /// Remove the record with `id`; returns whether one was removed
    ///
    /// An unknown id is not an error.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.store.delete(id)?;

        debug!(entity = %self.name(), id, removed, "delete record");
        Ok(removed)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Base name of the backing file, e.g. `user.json`
    pub fn file_name(&self) -> &str {
        self.metadata.file_name()
    }

    pub fn file_path(&self) -> &Path {
        self.store.path()
    }

    pub fn schema(&self) -> &SchemaDefinition {
        &self.metadata.schema_definition
    }

    pub fn metadata(&self) -> &EntityMetadata {
        &self.metadata
    }

    pub(crate) fn store(&self) -> &RecordStore {
        &self.store
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Surface the first schema violation, if any
    fn validate_record(&self, record: &Record) -> Result<()> {
        let document = Value::Object(record.clone());
        let report = self
            .capabilities
            .validator
            .validate(&document, self.schema().as_value());

        match report.first() {
            None => Ok(()),
            Some(issue) => {
                warn!(
                    entity = %self.name(),
                    property = %issue.property,
                    message = %issue.message,
                    "record rejected by schema"
                );
                Err(JsonBaseError::schema_violation(
                    issue.property.clone(),
                    issue.message.clone(),
                ))
            }
        }
    }
}
