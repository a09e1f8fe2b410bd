//! Request body decoding into a flat field map.
//!
//! Web form builders post either JSON or `application/x-www-form-urlencoded`,
//! so both are reduced to the same `FormFields` before extraction.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

/// Body could not be decoded. Nothing from it is used.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("body is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Flat key/value view of a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(HashMap<String, String>);

impl FormFields {
    /// Trimmed value of `key`, or an empty string.
    pub fn get(&self, key: &str) -> String {
        self.0
            .get(key)
            .map(|v| trim_field(v).to_string())
            .unwrap_or_default()
    }

    /// Trimmed value of `key`, falling back to `alt` only when `key` is absent.
    pub fn get_either(&self, key: &str, alt: &str) -> String {
        self.0
            .get(key)
            .or_else(|| self.0.get(alt))
            .map(|v| trim_field(v).to_string())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse URL-encoded form data. A repeated key keeps its last value.
    pub fn from_urlencoded(text: &str) -> Self {
        url::form_urlencoded::parse(text.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Build fields from a decoded JSON document.
    ///
    /// Only a top-level object contributes fields. `null` members count as
    /// absent, other scalars are rendered as text, and nested arrays or
    /// objects are kept as compact JSON.
    pub fn from_json(value: Value) -> Self {
        let object = match value {
            Value::Object(object) => object,
            Value::Null => return Self::default(),
            other => {
                warn!(json_type = json_type(&other), "contact_json_not_an_object");
                return Self::default();
            }
        };

        object
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    nested => nested.to_string(),
                };
                Some((key, text))
            })
            .collect()
    }
}

impl FromIterator<(String, String)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        FormFields(iter.into_iter().collect())
    }
}

/// Strip surrounding whitespace, including byte order marks.
pub fn trim_field(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Decode a request body according to its `Content-Type`.
///
/// Anything mentioning `application/json` is parsed as JSON, everything
/// else (including a missing header) as URL-encoded form data.
pub fn parse_body(content_type: &str, body: &[u8]) -> Result<FormFields, BodyError> {
    let content_type = content_type.to_ascii_lowercase();

    let fields = if content_type.contains("application/json") {
        if body.iter().all(u8::is_ascii_whitespace) {
            FormFields::default()
        } else {
            FormFields::from_json(serde_json::from_slice(body)?)
        }
    } else {
        FormFields::from_urlencoded(std::str::from_utf8(body)?)
    };

    info!(
        content_type = %content_type,
        body_length = body.len(),
        field_count = fields.len(),
        "contact_body_parsed"
    );

    Ok(fields)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
