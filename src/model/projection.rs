//! Field projection for read results

use crate::record::Record;

/// Rebuild `record` with only the whitelisted `fields` it actually has
///
/// Output keys follow the projection order. Unknown names are skipped.
pub fn project(record: &Record, fields: &[&str]) -> Record {
    fields
        .iter()
        .filter_map(|field| {
            record
                .get(*field)
                .map(|value| (field.to_string(), value.clone()))
        })
        .collect()
}

/// Apply `project` to every record; an empty projection keeps records whole
pub fn project_all(records: Vec<Record>, fields: &[&str]) -> Vec<Record> {
    if fields.is_empty() {
        return records;
    }

    records.iter().map(|record| project(record, fields)).collect()
}
