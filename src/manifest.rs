//! The poems manifest: wire types, the error taxonomy and document parsing.
//!
//! A manifest looks like:
//!
//! ```json
//! { "poems": [ { "filename": "dawn.md", "tags": ["morning"] } ],
//!   "lastUpdated": "2025-03-01" }
//! ```
//!
//! Parsing happens in three stages, each with its own failure:
//!
//! - The body must be well-formed JSON (`ManifestError::Parse`)
//! - The document must be an object with a `poems` key (`SchemaViolation::MissingPoems`)
//! - The `poems` value must pass the metadata predicate (`SchemaViolation::InvalidMetadata`)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::validation::validate_poem_metadata;

/// Name of the manifest file, used in every user-facing message
pub const MANIFEST_FILE: &str = "poems.json";

/// Message shown when a load fails without saying why
pub const UNKNOWN_ERROR: &str = "Unknown error fetching poems.json";

/// Metadata for a single poem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemMeta {
    pub filename: String,
    #[serde(default, deserialize_with = "tags_or_empty")]
    pub tags: Vec<String>,
}

/// `"tags": null` is accepted by the predicate, so treat it like a missing list
fn tags_or_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One successfully validated manifest
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ManifestDocument {
    pub poems: Vec<PoemMeta>,
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Ways a well-formed document can have the wrong shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaViolation {
    MissingPoems,
    InvalidMetadata,
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaViolation::MissingPoems => write!(f, "missing poems array"),
            SchemaViolation::InvalidMetadata => write!(f, "invalid poem metadata"),
        }
    }
}

/// Errors that can occur while loading the manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Transport failure or a non-success status
    #[error("{}", fetch_message(.status, .reason))]
    Fetch {
        status: Option<u16>,
        reason: String,
    },

    #[error("Failed to parse poems.json: {0}")]
    Parse(String),

    #[error("Invalid poems.json format: {0}")]
    Schema(SchemaViolation),
}

fn fetch_message(status: &Option<u16>, reason: &str) -> String {
    match *status {
        Some(code) => format!("Failed to fetch {} ({})", MANIFEST_FILE, code),
        None if reason.is_empty() => format!("Failed to fetch {}", MANIFEST_FILE),
        None => format!("Failed to fetch {}: {}", MANIFEST_FILE, reason),
    }
}

impl ManifestError {
    pub fn status(code: u16) -> Self {
        ManifestError::Fetch {
            status: Some(code),
            reason: String::new(),
        }
    }

    pub fn transport(err: impl std::fmt::Display) -> Self {
        ManifestError::Fetch {
            status: None,
            reason: err.to_string(),
        }
    }

    /// Message surfaced to the user, falling back to [`UNKNOWN_ERROR`]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

/// Parse and validate a raw manifest body
pub fn parse_manifest(body: &[u8]) -> Result<ManifestDocument, ManifestError> {
    let json: Value =
        serde_json::from_slice(body).map_err(|e| ManifestError::Parse(e.to_string()))?;

    let Value::Object(mut root) = json else {
        return Err(ManifestError::Schema(SchemaViolation::MissingPoems));
    };
    let Some(poems) = root.remove("poems") else {
        return Err(ManifestError::Schema(SchemaViolation::MissingPoems));
    };

    if !validate_poem_metadata(&poems) {
        return Err(ManifestError::Schema(SchemaViolation::InvalidMetadata));
    }

    let poems: Vec<PoemMeta> = serde_json::from_value(poems)
        .map_err(|_| ManifestError::Schema(SchemaViolation::InvalidMetadata))?;

    let last_updated = match root.remove("lastUpdated") {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::String(_)) | Some(Value::Null) | None => None,
        Some(other) => {
            tracing::warn!("Ignoring non-string lastUpdated in {}: {}", MANIFEST_FILE, other);
            None
        }
    };

    Ok(ManifestDocument {
        poems,
        last_updated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_manifest() {
        let body = br#"{
            "poems": [
                { "filename": "B.md", "tags": ["x"] },
                { "filename": "a.md", "tags": ["x", "y"] }
            ],
            "lastUpdated": "2025-03-01"
        }"#;

        let doc = parse_manifest(body).unwrap();
        assert_eq!(doc.poems.len(), 2);
        assert_eq!(doc.poems[0].filename, "B.md");
        assert_eq!(doc.poems[1].tags, vec!["x", "y"]);
        assert_eq!(doc.last_updated.as_deref(), Some("2025-03-01"));
    }

    #[test]
    fn test_parse_missing_and_null_tags() {
        let body = br#"{"poems":[{"filename":"a.md"},{"filename":"b.md","tags":null}]}"#;

        let doc = parse_manifest(body).unwrap();
        assert!(doc.poems.iter().all(|p| p.tags.is_empty()));
        assert_eq!(doc.last_updated, None);
    }

    #[test]
    fn test_parse_empty_last_updated_is_absent() {
        let doc = parse_manifest(br#"{"poems":[],"lastUpdated":""}"#).unwrap();
        assert_eq!(doc.last_updated, None);

        let doc = parse_manifest(br#"{"poems":[],"lastUpdated":42}"#).unwrap();
        assert_eq!(doc.last_updated, None);
    }

    #[test]
    fn test_parse_not_json() {
        let err = parse_manifest(b"<html>oops</html>").unwrap_err();
        assert!(matches!(err, ManifestError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse poems.json"));
    }

    #[test]
    fn test_parse_missing_poems() {
        let bodies: [&[u8]; 5] = [b"{}", b"null", b"[]", b"\"poems\"", br#"{"Poems":[]}"#];
        for body in bodies {
            let err = parse_manifest(body).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid poems.json format: missing poems array",
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_parse_invalid_metadata() {
        let bodies: [&[u8]; 5] = [
            br#"{"poems":"not-an-array"}"#,
            br#"{"poems":null}"#,
            br#"{"poems":[{"tags":["x"]}]}"#,
            br#"{"poems":[{"filename":7}]}"#,
            br#"{"poems":[{"filename":"a.md","tags":[1]}]}"#,
        ];
        for body in bodies {
            let err = parse_manifest(body).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid poems.json format: invalid poem metadata",
                "body: {}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            ManifestError::status(404).to_string(),
            "Failed to fetch poems.json (404)"
        );
        assert_eq!(
            ManifestError::transport("connection refused").to_string(),
            "Failed to fetch poems.json: connection refused"
        );
        assert_eq!(
            ManifestError::transport("").to_string(),
            "Failed to fetch poems.json"
        );
    }

    #[test]
    fn test_user_message_is_never_empty() {
        assert_eq!(
            ManifestError::status(500).user_message(),
            "Failed to fetch poems.json (500)"
        );
        assert!(!ManifestError::Parse(String::new()).user_message().is_empty());
    }
}
