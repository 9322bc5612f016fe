use serde_yaml::{Mapping, Value};

use crate::frontmatter::FrontMatterError;

/// Decoded front matter as a typed mapping with explicit field lookups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    fields: Mapping,
}

/// A metadata field that exists but holds a value of the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field `{field}` {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl Metadata {
    /// Decode a YAML block. An empty or null block yields an empty mapping.
    pub fn from_yaml(text: &str) -> Result<Self, FrontMatterError> {
        match serde_yaml::from_str::<Value>(text)? {
            Value::Null => Ok(Self::default()),
            Value::Mapping(fields) => Ok(Self { fields }),
            other => Err(FrontMatterError::NotAMapping(kind_name(&other))),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw lookup. Keys are matched exactly (case-sensitive).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Read a scalar as text. Numbers and booleans are rendered the way YAML
    /// spells them, so `Number: 1.0` reads back as `"1.0"`. Null is absent.
    pub fn get_str(&self, key: &str) -> Result<Option<String>, FieldError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(Value::Number(number)) => Ok(Some(number.to_string())),
            Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
            Some(other) => Err(FieldError::new(
                key,
                format!("must be a scalar, found {}", kind_name(other)),
            )),
        }
    }

    /// Read an integer. Strings holding an integer are accepted.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>, FieldError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number
                .as_i64()
                .map(Some)
                .ok_or_else(|| FieldError::new(key, format!("must be an integer, found {number}"))),
            Some(Value::String(text)) => text
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| FieldError::new(key, format!("must be an integer, found {text:?}"))),
            Some(other) => Err(FieldError::new(
                key,
                format!("must be an integer, found {}", kind_name(other)),
            )),
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
