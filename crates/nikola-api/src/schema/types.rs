//! Resource schema types.
//!
//! A schema document names the application and lists the resources it
//! serves. Each resource maps to one table whose columns follow the
//! declaration order of its fields.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Name of the generated primary key column.
pub const ID_COLUMN: &str = "id";

/// Root schema document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSchema {
    /// Application name reported by the health endpoint
    #[serde(default)]
    pub name: Option<String>,

    /// Resources in declaration order
    #[serde(default)]
    pub resources: Vec<ResourceDef>,
}

impl AppSchema {
    /// Look up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&ResourceDef> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Names of all declared resources.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.resources.iter().map(|r| r.name.as_str())
    }
}

/// A single resource backed by one table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Resource and table name
    pub name: String,

    /// Fields keyed by column name, in document order
    #[serde(default)]
    pub fields: IndexMap<String, FieldDef>,
}

impl ResourceDef {
    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// Field definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Declared value type, `text` when omitted
    #[serde(rename = "type", default, deserialize_with = "deserialize_field_type")]
    pub field_type: FieldType,
}

/// Accepts any tag value; only the strings `number` and `integer` are
/// recognised, everything else (other strings, `null`, numbers) is text.
fn deserialize_field_type<'de, D>(deserializer: D) -> Result<FieldType, D::Error>
where
    D: Deserializer<'de>,
{
    let tag = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(tag
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(FieldType::from_tag)
        .unwrap_or_default())
}

/// Declared field type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Number,
    Integer,
    #[default]
    Text,
}

impl FieldType {
    /// Map a schema type tag; unknown tags are text.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "number" => FieldType::Number,
            "integer" => FieldType::Integer,
            _ => FieldType::Text,
        }
    }

    /// SQLite column type for this field type.
    pub fn sql_type(&self) -> &'static str {
        match self {
            FieldType::Number => "REAL",
            FieldType::Integer => "INTEGER",
            FieldType::Text => "TEXT",
        }
    }
}
