//! Entity metadata and the meta-schema it must satisfy

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::schema::SchemaDefinition;

/// Registry-side description of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    /// Kebab-case entity name
    pub name: String,

    /// `{source_dir}/{name}.json`
    pub file_path: PathBuf,

    pub schema_definition: SchemaDefinition,
}

impl EntityMetadata {
    pub fn new(
        name: impl Into<String>,
        file_path: impl Into<PathBuf>,
        schema_definition: SchemaDefinition,
    ) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            schema_definition,
        }
    }

    /// Base name of the backing file, e.g. `user.json`
    pub fn file_name(&self) -> &str {
        self.file_path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// JSON view checked against [`metadata_schema`]
    ///
    /// A path that is not valid UTF-8 shows up as `null` and fails the
    /// `filePath` string requirement.
    pub(crate) fn to_document(&self) -> Value {
        json!({
            "name": self.name,
            "filePath": self.file_path.to_str(),
            "schemaDefinition": self.schema_definition.as_value(),
        })
    }
}

/// Fixed meta-schema every entity's metadata is validated against
pub fn metadata_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "filePath": {
                "type": "string",
                "description": "The entity unique file path"
            },
            "schemaDefinition": {
                "type": "object",
                "description": "The entity object definition"
            }
        },
        "required": ["filePath", "schemaDefinition"]
    })
}
