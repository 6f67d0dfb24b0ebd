//! Entity Registry
//!
//! The API surface a host application uses: create, attach, use, has, drop.
//!
//! ## Responsibilities
//! - Enforce entity name rules and uniqueness
//! - Derive each entity's file path from the source directory
//! - Own every entity's metadata and model for the life of the process
//! - Keep registry membership and files on disk in step
//!
//! The registry is not persisted and never scans the source directory; the
//! host re-declares its entities on startup (`attach` for existing files).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::info;

use crate::capabilities::Capabilities;
use crate::config::Config;
use crate::error::{JsonBaseError, Result};
use crate::model::{EntityMetadata, EntityModel};
use crate::schema::SchemaDefinition;

/// Kebab-case: lowercase ASCII words joined by single hyphens
const ENTITY_NAME_PATTERN: &str = "^[a-z]+(-[a-z]+)*$";

/// Extension of every entity file
const ENTITY_FILE_EXTENSION: &str = "json";

/// In-memory name → entity mapping
#[derive(Debug)]
pub struct EntityRegistry {
    /// Registry configuration
    config: Config,

    /// Collaborators handed to every model
    capabilities: Capabilities,

    /// Registered entities, keyed by name
    entities: BTreeMap<String, EntityModel>,
}

impl EntityRegistry {
    /// Build a registry with the default validator, id generator and clock
    pub fn new(config: Config) -> Result<Self> {
        Self::with_capabilities(config, Capabilities::default())
    }

    /// Build a registry with injected collaborators
    ///
    /// Creates the source directory when `config.create_source_dir` is set.
    pub fn with_capabilities(config: Config, capabilities: Capabilities) -> Result<Self> {
        config.validate()?;

        if config.create_source_dir {
            fs::create_dir_all(&config.source_dir)?;
        }

        info!(source_dir = %config.source_dir.display(), write_mode = ?config.write_mode, "opened registry");

        Ok(Self {
            config,
            capabilities,
            entities: BTreeMap::new(),
        })
    }

    /// Create a new entity and its empty backing file
    pub fn create(
        &mut self,
        name: &str,
        schema: impl Into<SchemaDefinition>,
    ) -> Result<&EntityModel> {
        let metadata = self.declare(name, schema.into())?;
        let model = EntityModel::new(
            metadata,
            self.config.write_mode,
            self.capabilities.clone(),
        )?;

        Ok(self.register(model))
    }

    /// Re-declare an entity whose backing file already exists
    ///
    /// File content is left untouched.
    pub fn attach(
        &mut self,
        name: &str,
        schema: impl Into<SchemaDefinition>,
    ) -> Result<&EntityModel> {
        let metadata = self.declare(name, schema.into())?;
        let model = EntityModel::open(
            metadata,
            self.config.write_mode,
            self.capabilities.clone(),
        )?;

        Ok(self.register(model))
    }

    /// Check whether `name` is registered
    pub fn has(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Get the model of a registered entity
    pub fn use_entity(&self, name: &str) -> Result<&EntityModel> {
        self.entities
            .get(name)
            .ok_or_else(|| JsonBaseError::EntityNotFound(name.to_string()))
    }

    /// Delete an entity's file and forget the entity
    ///
    /// Irreversible. The registry entry is only removed once the file is gone.
    pub fn drop_entity(&mut self, name: &str) -> Result<bool> {
        let model = self.use_entity(name)?;
        model.store().delete_file()?;

        self.entities.remove(name);

        info!(entity = name, "dropped entity");
        Ok(true)
    }

    /// Get the metadata of a registered entity
    pub fn metadata(&self, name: &str) -> Result<&EntityMetadata> {
        Ok(self.use_entity(name)?.metadata())
    }

    /// Registered entity names, sorted
    pub fn entity_names(&self) -> Vec<&str> {
        self.entities.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Root directory holding every entity file
    pub fn source_directory(&self) -> &Path {
        &self.config.source_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Name checks shared by create and attach, then metadata allocation
    fn declare(&self, name: &str, schema: SchemaDefinition) -> Result<EntityMetadata> {
        if !is_valid_entity_name(name) {
            return Err(JsonBaseError::InvalidEntityName(name.to_string()));
        }

        if self.has(name) {
            return Err(JsonBaseError::DuplicateEntity(name.to_string()));
        }

        Ok(EntityMetadata::new(name, self.entity_path(name), schema))
    }

    fn register(&mut self, model: EntityModel) -> &EntityModel {
        let name = model.name().to_string();
        self.entities.entry(name).or_insert(model)
    }

    /// `{source_dir}/{name}.json`
    fn entity_path(&self, name: &str) -> PathBuf {
        self.config
            .source_dir
            .join(format!("{}.{}", name, ENTITY_FILE_EXTENSION))
    }
}

/// True when `name` is a non-empty kebab-case identifier
pub fn is_valid_entity_name(name: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();

    PATTERN
        .get_or_init(|| Regex::new(ENTITY_NAME_PATTERN).expect("entity name pattern is valid"))
        .is_match(name)
}
