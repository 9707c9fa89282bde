// ABOUTME: Type definitions for the settings panel
// ABOUTME: Field kinds, setting definitions and submitted form data

use serde::Deserialize;
use std::collections::HashMap;

/// Input kind of a setting, deciding how it renders and how it is coerced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-negative integer
    Number,
    /// One of a fixed, ordered list of values
    Select { allowed: &'static [&'static str] },
    /// Stored as `1` when ticked
    Checkbox,
    /// Epoch timestamp written by the sync subsystem; shown, never submitted
    Time,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Select { .. } => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Time => "time",
        }
    }

    /// Whether the settings form posts a value for this kind
    pub fn is_submitted(&self) -> bool {
        !matches!(self, FieldKind::Time)
    }
}

/// One configurable field. `name` doubles as the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub help_text: Option<&'static str>,
}

/// Form-encoded fields posted to the save endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    fields: HashMap<String, String>,
}

impl Submission {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Submission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
