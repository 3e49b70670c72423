//! Extraction templates: named field schemas for extraction runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declared type of an extraction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Select,
    Textarea,
    Boolean,
}

/// Schema for one field to be extracted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name, used as the key in extracted data maps
    pub name: String,

    /// Declared value type
    #[serde(rename = "type")]
    pub field_type: FieldType,

    /// Ordered choices, only meaningful for `select` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FieldSchema {
    /// Create a field schema.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            options: None,
        }
    }

    /// Set the ordered options for a select field.
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = Some(options.into_iter().map(|o| o.into()).collect());
        self
    }
}

/// A stored extraction template.
///
/// Identity is `id`, assigned on creation and never reused. Mutation goes
/// through the store, which replaces whole fields and bumps `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractTemplate {
    /// Unique template id
    pub id: String,

    /// Ordered field schemas
    pub fields: Vec<FieldSchema>,

    /// Whether this template is offered for new extraction runs
    pub is_active: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl ExtractTemplate {
    /// Create a template with a fresh id and current timestamps.
    pub fn new(fields: Vec<FieldSchema>, is_active: bool) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            fields,
            is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update applied to a template.
///
/// Present fields replace the stored value wholesale; absent fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct TemplateUpdate {
    pub fields: Option<Vec<FieldSchema>>,
    pub is_active: Option<bool>,
}

impl TemplateUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the field list.
    pub fn fields(mut self, fields: Vec<FieldSchema>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Set the active flag.
    pub fn is_active(mut self, active: bool) -> Self {
        self.is_active = Some(active);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_ids_are_unique() {
        let a = ExtractTemplate::new(vec![], true);
        let b = ExtractTemplate::new(vec![], true);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_field_serde_wire_names() {
        let field = FieldSchema::new("status", FieldType::Select).with_options(["open", "closed"]);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["type"], "select");
        assert_eq!(json["options"][0], "open");

        let template = ExtractTemplate::new(vec![field], true);
        let json = serde_json::to_value(&template).unwrap();
        assert!(json["isActive"].as_bool().unwrap());
        assert!(json["createdAt"].is_string());
    }
}
