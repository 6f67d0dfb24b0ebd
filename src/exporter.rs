//! Exporter
//!
//! Read-only, projected view over one entity's records.

use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::record::Record;
use crate::registry::EntityRegistry;

/// Exports projected records from a registry
#[derive(Debug, Clone, Copy)]
pub struct Exporter<'a> {
    registry: &'a EntityRegistry,
}

impl<'a> Exporter<'a> {
    pub fn new(registry: &'a EntityRegistry) -> Self {
        Self { registry }
    }

    /// Export every record of `entity_name`, keeping only the `projection`
    /// fields
    ///
    /// Fails closed: an unknown entity, or a projection that is not a JSON
    /// array of strings, yields an empty result rather than an error. An
    /// empty array exports whole records.
    pub fn export_data(&self, entity_name: &str, projection: &Value) -> Result<Vec<Record>> {
        let Some(fields) = projection_fields(projection) else {
            debug!(entity = entity_name, "export skipped: projection is not a list of field names");
            return Ok(Vec::new());
        };

        self.export_fields(entity_name, &fields)
    }

    /// Typed variant of [`export_data`](Self::export_data)
    pub fn export_fields(&self, entity_name: &str, fields: &[&str]) -> Result<Vec<Record>> {
        if !self.registry.has(entity_name) {
            debug!(entity = entity_name, "export skipped: unknown entity");
            return Ok(Vec::new());
        }

        let records = self.registry.use_entity(entity_name)?.find(None, fields)?;

        debug!(entity = entity_name, records = records.len(), "exported records");
        Ok(records)
    }
}

/// Field names of a projection, or `None` unless it is an array of strings
fn projection_fields(projection: &Value) -> Option<Vec<&str>> {
    projection
        .as_array()?
        .iter()
        .map(Value::as_str)
        .collect()
}
