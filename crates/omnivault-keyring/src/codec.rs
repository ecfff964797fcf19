//! Stored text form of a secret
//!
//! Two formats are supported:
//! - [`Format::Plain`] stores only the primary value, verbatim.
//! - [`Format::Structured`] stores a JSON envelope with the value, the
//!   named fields and the metadata tags.
//!
//! Decoding in structured format never fails. Text that is not a valid
//! envelope (written in plain format, or by another tool) decodes as a
//! plain value, so reads keep working across format changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Secret;

/// Storage format for secret values
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    /// Primary value only
    #[default]
    Plain,
    /// JSON envelope with fields and tags
    Structured,
}

impl Format {
    /// `Structured` when `json` is true, `Plain` otherwise
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Format::Structured
        } else {
            Format::Plain
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Format::Structured)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    value: &'a str,
    #[serde(skip_serializing_if = "is_empty")]
    fields: &'a BTreeMap<String, String>,
    #[serde(skip_serializing_if = "is_empty")]
    tags: &'a BTreeMap<String, String>,
}

fn is_empty(map: &&BTreeMap<String, String>) -> bool {
    map.is_empty()
}

// `value` is required so that arbitrary JSON objects read as plain text
#[derive(Deserialize)]
struct Envelope {
    value: String,
    #[serde(default)]
    fields: Option<BTreeMap<String, String>>,
    #[serde(default)]
    tags: Option<BTreeMap<String, String>>,
}

/// Outcome of decoding stored text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// The text was a structured envelope
    Structured(Secret),
    /// The text is taken as the plain primary value
    FallbackPlain(String),
}

impl Decoded {
    /// Convert either outcome into a secret
    pub fn into_secret(self) -> Secret {
        match self {
            Decoded::Structured(secret) => secret,
            Decoded::FallbackPlain(value) => Secret::new(value),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Decoded::FallbackPlain(_))
    }
}

/// Encode a secret into its stored text form
///
/// Only structured encoding can fail. Provider and path metadata are never
/// written.
pub fn encode(secret: &Secret, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Plain => Ok(secret.value.clone()),
        Format::Structured => serde_json::to_string(&EnvelopeRef {
            value: &secret.value,
            fields: &secret.fields,
            tags: &secret.metadata.tags,
        }),
    }
}

/// Decode stored text
pub fn decode(text: &str, format: Format) -> Decoded {
    if format == Format::Plain {
        return Decoded::FallbackPlain(text.to_string());
    }

    // Only a JSON object is an envelope, never a sequence
    let envelope = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .filter(serde_json::Value::is_object)
        .and_then(|value| serde_json::from_value::<Envelope>(value).ok());

    match envelope {
        Some(envelope) => {
            let mut secret = Secret::new(envelope.value);
            secret.fields = envelope.fields.unwrap_or_default();
            secret.metadata.tags = envelope.tags.unwrap_or_default();
            Decoded::Structured(secret)
        }
        None => Decoded::FallbackPlain(text.to_string()),
    }
}
