//! Interactive-form wire types and the evolving answer set.

use serde::{Deserialize, Serialize};

/// The answer set accumulated across the form conversation.
///
/// Reconstructed from each submission; the dialogue holds no state of
/// its own between callbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copytype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b2path: Option<String>,
}

impl FormState {
    /// True when no question has been answered yet.
    pub fn is_empty(&self) -> bool {
        self.copytype.is_none() && self.depth.is_none() && self.b2path.is_none()
    }
}

/// A form to render back to the user (one question per callback).
#[derive(Debug, Clone, Serialize)]
pub struct FormDescriptor {
    pub title: String,
    pub description: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Select,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelectOption {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn select(label: &str, name: &str, options: Vec<SelectOption>) -> Self {
        Self {
            field_type: FieldType::Select,
            label: label.to_string(),
            name: name.to_string(),
            options: Some(options),
        }
    }

    pub fn text(label: &str, name: &str) -> Self {
        Self {
            field_type: FieldType::Text,
            label: label.to_string(),
            name: name.to_string(),
            options: None,
        }
    }
}

impl SelectOption {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}
