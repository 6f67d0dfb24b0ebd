//! JSON-Schema validator backed by the `jsonschema` crate
//!
//! Schemas without a `$schema` declaration are read as draft 7, and `format`
//! is enforced rather than treated as an annotation. Error locations are
//! reported as property paths (`address.zip`, `tags[1]`) instead of JSON
//! pointers; a missing required property points at the property itself.

use jsonschema::error::ValidationErrorKind;
use jsonschema::{Draft, ValidationError};
use serde_json::Value;

use super::{SchemaValidator, ValidationIssue, ValidationReport};

/// Default validator used when the host does not inject its own
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaValidator;

impl SchemaValidator for JsonSchemaValidator {
    fn validate(&self, value: &Value, schema: &Value) -> ValidationReport {
        let validator = match jsonschema::options()
            .with_draft(Draft::Draft7)
            .should_validate_formats(true)
            .build(schema)
        {
            Ok(validator) => validator,
            // A schema that does not compile accepts nothing
            Err(e) => {
                return ValidationReport::new(vec![ValidationIssue {
                    property: String::new(),
                    message: format!("invalid schema: {}", e),
                }]);
            }
        };

        let issues = validator.iter_errors(value).map(to_issue).collect();
        ValidationReport::new(issues)
    }
}

fn to_issue(error: ValidationError<'_>) -> ValidationIssue {
    let mut property = pointer_to_property(&error.instance_path.to_string());

    if let ValidationErrorKind::Required { property: missing } = &error.kind {
        if let Some(name) = missing.as_str() {
            property = child_path(&property, name);
        }
    }

    ValidationIssue {
        property,
        message: error.to_string(),
    }
}

/// `/address/zip` → `address.zip`, `/tags/1` → `tags[1]`, `` → ``
fn pointer_to_property(pointer: &str) -> String {
    pointer
        .split('/')
        .skip(1)
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .fold(String::new(), |path, segment| {
            if segment.parse::<usize>().is_ok() {
                format!("{}[{}]", path, segment)
            } else {
                child_path(&path, &segment)
            }
        })
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}
