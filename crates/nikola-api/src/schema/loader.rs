//! Schema file loading and validation.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::types::{AppSchema, ID_COLUMN};

/// Errors raised while loading a schema document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON/YAML or has the wrong shape
    #[error("Failed to parse schema: {0}")]
    Parse(String),

    /// The document parsed but describes an unusable schema
    #[error("Invalid schema: {0}")]
    Invalid(String),
}

/// Load a schema from disk.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, everything else
/// as JSON.
pub fn load_schema(path: impl AsRef<Path>) -> Result<AppSchema, SchemaError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = if is_yaml(path) {
        parse_yaml(&content)?
    } else {
        parse_json(&content)?
    };

    tracing::info!(
        path = %path.display(),
        name = schema.name.as_deref().unwrap_or("-"),
        resources = schema.resources.len(),
        "Schema loaded"
    );

    Ok(schema)
}

/// Parse and validate a JSON schema document.
pub fn parse_json(content: &str) -> Result<AppSchema, SchemaError> {
    let schema: AppSchema =
        serde_json::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
    validate(&schema)?;
    Ok(schema)
}

/// Parse and validate a YAML schema document.
pub fn parse_yaml(content: &str) -> Result<AppSchema, SchemaError> {
    let schema: AppSchema =
        serde_yaml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
    validate(&schema)?;
    Ok(schema)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Check that every resource and field name can be used as a table or
/// column name, and that names do not collide.
pub fn validate(schema: &AppSchema) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();

    for resource in &schema.resources {
        if !is_identifier(&resource.name) {
            return Err(SchemaError::Invalid(format!(
                "resource name '{}' is not a valid identifier",
                resource.name
            )));
        }
        if !seen.insert(resource.name.as_str()) {
            return Err(SchemaError::Invalid(format!(
                "resource '{}' is declared more than once",
                resource.name
            )));
        }

        for field in resource.field_names() {
            if !is_identifier(field) {
                return Err(SchemaError::Invalid(format!(
                    "field '{}.{}' is not a valid identifier",
                    resource.name, field
                )));
            }
            if field.eq_ignore_ascii_case(ID_COLUMN) {
                return Err(SchemaError::Invalid(format!(
                    "field '{}.{}' collides with the generated primary key",
                    resource.name, field
                )));
            }
        }
    }

    Ok(())
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use std::io::Write;

    const TODO_SCHEMA: &str = r#"{
        "name": "Todo App",
        "resources": [
            {"name": "todos", "fields": {"title": {"type": "text"}, "done": {"type": "integer"}}},
            {"name": "prices", "fields": {"amount": {"type": "number"}}}
        ]
    }"#;

    #[test]
    fn test_parse_json_schema() {
        let schema = parse_json(TODO_SCHEMA).unwrap();
        assert_eq!(schema.name.as_deref(), Some("Todo App"));
        assert_eq!(schema.resources.len(), 2);
        let prices = schema.resource("prices").unwrap();
        assert_eq!(prices.fields["amount"].field_type, FieldType::Number);
    }

    #[test]
    fn test_parse_yaml_schema() {
        let yaml = r#"
name: Inventory
resources:
  - name: items
    fields:
      sku: {}
      qty:
        type: integer
"#;
        let schema = parse_yaml(yaml).unwrap();
        let items = schema.resource("items").unwrap();
        assert_eq!(items.field_names().collect::<Vec<_>>(), vec!["sku", "qty"]);
        assert_eq!(items.fields["qty"].field_type, FieldType::Integer);
    }

    #[test]
    fn test_missing_name_is_allowed() {
        let schema = parse_json(r#"{"resources": []}"#).unwrap();
        assert!(schema.name.is_none());
    }

    #[test]
    fn test_rejects_bad_resource_name() {
        let err = parse_json(r#"{"resources": [{"name": "drop table", "fields": {}}]}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_field_name() {
        let err = parse_json(r#"{"resources": [{"name": "t", "fields": {"1st": {}}}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("t.1st"));
    }

    #[test]
    fn test_rejects_duplicate_resource() {
        let err = parse_json(
            r#"{"resources": [{"name": "t", "fields": {}}, {"name": "t", "fields": {}}]}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_id_field() {
        let err = parse_json(r#"{"resources": [{"name": "t", "fields": {"ID": {}}}]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("primary key"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = parse_json("{not json").unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn test_identifier_rules() {
        assert!(is_identifier("todos"));
        assert!(is_identifier("_private2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("name\""));
    }

    #[test]
    fn test_load_schema_from_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(TODO_SCHEMA.as_bytes()).unwrap();
        let schema = load_schema(file.path()).unwrap();
        assert!(schema.resource("todos").is_some());
    }

    const ITEMS_YAML: &str = "name: Inventory\nresources:\n  - name: items\n    fields:\n      sku: {}\n      qty:\n        type: integer\n      note:\n        type: ~\n";

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_schema_picks_yaml_by_extension() {
        for suffix in [".yaml", ".yml"] {
            let file = write_temp(suffix, ITEMS_YAML);
            let schema = load_schema(file.path()).unwrap();
            assert_eq!(schema.name.as_deref(), Some("Inventory"));
            let items = schema.resource("items").unwrap();
            assert_eq!(items.fields["qty"].field_type, FieldType::Integer);
            assert_eq!(items.fields["note"].field_type, FieldType::Text);
        }
    }

    #[test]
    fn test_load_schema_other_extension_is_json() {
        let file = write_temp(".txt", ITEMS_YAML);
        let err = load_schema(file.path()).unwrap_err();
        assert!(matches!(err, SchemaError::Parse(_)));
    }

    #[test]
    fn test_load_schema_missing_file() {
        let err = load_schema("/nonexistent/schema.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
