//! Configuration for JsonBase
//!
//! Centralized configuration with sensible defaults. Built once by the host
//! and handed to [`EntityRegistry`](crate::EntityRegistry) by value.

use std::path::PathBuf;

use crate::error::{JsonBaseError, Result};

/// Main configuration for a JsonBase instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all entity files
    /// Internal structure:
    ///   {source_dir}/
    ///     ├── user.json
    ///     └── animal.json
    pub source_dir: PathBuf,

    /// How entity files are overwritten on every mutation
    pub write_mode: WriteMode,

    /// Create `source_dir` (and parents) when the registry is constructed
    pub create_source_dir: bool,
}

/// File overwrite strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
    /// Write a temp file next to the target, fsync it, rename it over the
    /// target (crash leaves either the old or the new file)
    #[default]
    Atomic,

    /// Truncate and rewrite the target directly (a crash mid-write can leave
    /// a partial file)
    InPlace,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./jsonbase_data"),
            write_mode: WriteMode::Atomic,
            create_source_dir: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the config before a registry is built on top of it
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(JsonBaseError::Config(
                "source directory must not be empty".to_string(),
            ));
        }

        if !self.create_source_dir && !self.source_dir.is_dir() {
            return Err(JsonBaseError::Config(format!(
                "source directory {} does not exist",
                self.source_dir.display()
            )));
        }

        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the source directory (root for all entity files)
    pub fn source_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.source_dir = path.into();
        self
    }

    /// Set the file overwrite strategy
    pub fn write_mode(mut self, mode: WriteMode) -> Self {
        self.config.write_mode = mode;
        self
    }

    /// Create the source directory on startup if it is missing
    pub fn create_source_dir(mut self, create: bool) -> Self {
        self.config.create_source_dir = create;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
