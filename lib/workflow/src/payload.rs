//! Transform payloads.
//!
//! Transforms move content between shapes: structured record data becomes
//! markdown text, text becomes document bytes. A [`Payload`] carries one of
//! those shapes and a [`PayloadKind`] names it, so transforms can declare
//! what they accept and produce.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// The shape of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadKind {
    /// Accepts any payload. Only meaningful as a declared source kind.
    Any,
    /// Structured JSON data.
    Data,
    /// UTF-8 text.
    Text,
    /// Raw bytes.
    Bytes,
}

impl PayloadKind {
    /// Returns true if a payload of kind `actual` satisfies this declaration.
    #[must_use]
    pub fn accepts(&self, actual: PayloadKind) -> bool {
        *self == Self::Any || *self == actual
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Any => "any",
            Self::Data => "data",
            Self::Text => "text",
            Self::Bytes => "bytes",
        };
        f.write_str(s)
    }
}

/// A value passed into or returned from a transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Payload {
    /// Structured JSON data.
    Data(JsonValue),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

impl Payload {
    /// The kind of this payload.
    #[must_use]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Self::Data(_) => PayloadKind::Data,
            Self::Text(_) => PayloadKind::Text,
            Self::Bytes(_) => PayloadKind::Bytes,
        }
    }

    /// Borrows the structured data, if this is a data payload.
    #[must_use]
    pub fn as_data(&self) -> Option<&JsonValue> {
        match self {
            Self::Data(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the text, if this is a text payload.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Consumes the payload and returns its text, if it is text.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Consumes the payload and returns its bytes.
    ///
    /// Text is returned as its UTF-8 encoding; data is returned as
    /// compact JSON.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Bytes(bytes) => bytes,
            Self::Text(text) => text.into_bytes(),
            Self::Data(value) => value.to_string().into_bytes(),
        }
    }
}

impl From<JsonValue> for Payload {
    fn from(value: JsonValue) -> Self {
        Self::Data(value)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}
