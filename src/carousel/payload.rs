//! Wire format of an exported carousel and its tolerant import path.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

use super::{DisplayType, ImageEntry};
use crate::error::{CarouselError, Result};

/// Exported carousel configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselPayload {
    #[serde(rename = "type")]
    pub display_type: DisplayType,
    /// Optional on import; some producers leave it out or send it as text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PayloadPosition>,
    pub page_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    pub aspect_ratio: String,
    pub content: Vec<PayloadEntry>,
}

/// One exported slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadEntry {
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub caption: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub banner_id: String,
    /// Accepted on import only; never written back out
    #[serde(default, skip_serializing)]
    pub display_aspect_ratio: Option<String>,
}

/// Position as found in a payload.
///
/// Exports always write a non-negative integer; imports keep whatever number
/// or text arrived so export validation can judge it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PayloadPosition {
    Number(Number),
    Text(String),
}

impl PayloadPosition {
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(number) => number.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

impl From<u64> for PayloadPosition {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl PayloadEntry {
    pub fn from_entry(entry: &ImageEntry) -> Self {
        Self {
            url: entry.url.clone(),
            caption: entry.caption.clone(),
            link: entry.link.clone(),
            banner_id: entry.banner_id.clone(),
            display_aspect_ratio: None,
        }
    }

    /// Rebuild an entry; a missing display ratio defaults to the payload ratio.
    pub fn into_entry(self, aspect_ratio: &str) -> ImageEntry {
        let display = self
            .display_aspect_ratio
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| aspect_ratio.to_string());
        ImageEntry::new(self.url, aspect_ratio, display)
            .with_caption(self.caption)
            .with_link(self.link)
            .with_banner_id(self.banner_id)
    }
}

impl CarouselPayload {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|err| CarouselError::MalformedPayload(format!("failed to encode: {err}")))
    }

    /// Decode a payload, unwrapping one extra level of string encoding.
    pub fn from_json(input: &str) -> Result<Self> {
        let mut value = decode(input.trim())?;
        if let Value::String(inner) = &value {
            value = decode(inner.trim())?;
        }

        let Value::Object(fields) = &value else {
            return Err(malformed("expected a JSON object"));
        };
        for required in ["type", "pageId", "aspectRatio", "content"] {
            if !fields.contains_key(required) {
                return Err(malformed(format!("missing field {required:?}")));
            }
        }
        if !fields["content"].is_array() {
            return Err(malformed("content must be a list"));
        }

        serde_json::from_value(value).map_err(|err| malformed(err.to_string()))
    }
}

/// True when `input` parses as JSON at all; gates the import action.
pub fn is_well_formed_json(input: &str) -> bool {
    serde_json::from_str::<Value>(input).is_ok()
}

fn decode(input: &str) -> Result<Value> {
    serde_json::from_str(input).map_err(|err| malformed(format!("invalid JSON: {err}")))
}

fn malformed(reason: impl Into<String>) -> CarouselError {
    CarouselError::MalformedPayload(reason.into())
}
