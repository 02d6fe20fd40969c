//! Reference service document types
//!
//! Every document wraps its payload in a single-key object whose key is the
//! language name (`{"العربية": [...]}`); a bare array is accepted too.
//!
//! Field values are loosely typed upstream (`"ID": "27"` and `"ID": 27` both
//! occur), so numeric fields are parsed leniently.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::{lenient_count, parse_count, parse_id, Recitation};

use super::client::FetchError;

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(|value| match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .unwrap_or_default())
}

fn one() -> u32 {
    1
}

/// One text of a reference category
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteItem {
    #[serde(rename = "ID", default)]
    pub id: Value,

    #[serde(rename = "TITLE", default, deserialize_with = "nullable_string")]
    pub title: String,

    #[serde(rename = "ARABIC_TEXT", default, deserialize_with = "nullable_string")]
    pub text: String,

    #[serde(rename = "REPEAT", default = "one", deserialize_with = "lenient_count")]
    pub repeat: u32,

    #[serde(rename = "REFERENCE", default, deserialize_with = "nullable_string")]
    pub reference: String,
}

impl RemoteItem {
    pub fn new(title: impl Into<String>, text: impl Into<String>, repeat: u32) -> Self {
        Self {
            id: Value::Null,
            title: title.into(),
            text: text.into(),
            repeat: parse_count(&Value::from(repeat)),
            reference: String::new(),
        }
    }
}

impl Recitation for RemoteItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn repeat_count(&self) -> u32 {
        self.repeat
    }
}

/// One entry of the reference index
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub id: u32,
    pub title: String,
    /// URL of the category document
    pub url: Option<String>,
}

#[derive(Deserialize)]
struct RawIndexEntry {
    #[serde(rename = "ID", default)]
    id: Value,
    #[serde(rename = "TITLE", default, deserialize_with = "nullable_string")]
    title: String,
    #[serde(rename = "TEXT", default)]
    url: Option<String>,
}

/// Decoded index plus entries that had to be skipped
#[derive(Debug, Clone, Default)]
pub struct Index {
    pub entries: Vec<IndexEntry>,
    /// Titles of entries without a usable id
    pub skipped: Vec<String>,
}

/// Unwraps the single-key language envelope
fn payload(document: Value, origin: &str) -> Result<Vec<Value>, FetchError> {
    let list = match document {
        Value::Array(items) => Some(items),
        Value::Object(map) => map.into_iter().next().and_then(|(_, value)| match value {
            Value::Array(items) => Some(items),
            _ => None,
        }),
        _ => None,
    };

    list.ok_or_else(|| FetchError::Shape {
        origin: origin.to_string(),
        reason: "expected a list or a single-key object holding a list".to_string(),
    })
}

/// Decodes a category document
pub fn decode_category(document: Value, origin: &str) -> Result<Vec<RemoteItem>, FetchError> {
    payload(document, origin)?
        .into_iter()
        .map(|item| {
            serde_json::from_value(item).map_err(|source| FetchError::Decode {
                origin: origin.to_string(),
                source,
            })
        })
        .collect()
}

/// Decodes the index document
pub fn decode_index(document: Value, origin: &str) -> Result<Index, FetchError> {
    let mut index = Index::default();

    for item in payload(document, origin)? {
        let raw: RawIndexEntry = serde_json::from_value(item).map_err(|source| FetchError::Decode {
            origin: origin.to_string(),
            source,
        })?;

        match parse_id(&raw.id) {
            Some(id) => index.entries.push(IndexEntry {
                id,
                title: raw.title,
                url: raw.url.filter(|u| !u.trim().is_empty()),
            }),
            None => index.skipped.push(raw.title),
        }
    }

    Ok(index)
}
