//! Resolution result envelope.
//!
//! Serializes to the W3C DID resolution shape:
//!
//! ```json
//! {
//!   "didDocument": { ... },
//!   "didDocumentMetadata": {},
//!   "didResolutionMetadata": { "contentType": "application/did+ld+json", "url": "https://..." }
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Error codes reported in `didResolutionMetadata.error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorCode {
    /// The DID could not be fetched, or the fetched document was not acceptable.
    NotFound,
    /// The input was not a syntactically valid DID URL.
    InvalidDid,
    /// No resolver is registered for the DID's method.
    UnsupportedDidMethod,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "notFound",
            Self::InvalidDid => "invalidDid",
            Self::UnsupportedDidMethod => "unsupportedDidMethod",
        }
    }
}

/// Media type of a resolved document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    /// JSON-LD representation, chosen when the document carries `@context`.
    #[serde(rename = "application/did+ld+json")]
    DidLdJson,
    /// Plain JSON representation.
    #[serde(rename = "application/did+json")]
    DidJson,
}

impl ContentType {
    /// Pick the representation from the shape of the document itself.
    pub fn for_document(document: &Value) -> Self {
        if document.get("@context").is_some() {
            Self::DidLdJson
        } else {
            Self::DidJson
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    /// The HTTPS URL the document was (or would have been) fetched from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Outcome of resolving one DID.
///
/// Either `did_document` is set and `did_resolution_metadata.error` is absent,
/// or `error` is set and `did_document` holds whatever was fetched, if anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub did_document: Option<Value>,
    /// Always empty for did:psqr.
    pub did_document_metadata: Map<String, Value>,
    pub did_resolution_metadata: ResolutionMetadata,
}

impl ResolutionResult {
    /// A successful resolution.
    pub fn resolved(document: Value, content_type: ContentType, url: impl Into<String>) -> Self {
        Self {
            did_document: Some(document),
            did_document_metadata: Map::new(),
            did_resolution_metadata: ResolutionMetadata {
                content_type: Some(content_type),
                url: Some(url.into()),
                ..ResolutionMetadata::default()
            },
        }
    }

    /// A failed resolution carrying any partially obtained document.
    pub fn failed(
        error: ErrorCode,
        message: impl Into<String>,
        document: Option<Value>,
        url: Option<String>,
    ) -> Self {
        Self {
            did_document: document,
            did_document_metadata: Map::new(),
            did_resolution_metadata: ResolutionMetadata {
                error: Some(error),
                message: Some(message.into()),
                url,
                ..ResolutionMetadata::default()
            },
        }
    }

    pub fn is_error(&self) -> bool {
        self.did_resolution_metadata.error.is_some()
    }

    pub fn error(&self) -> Option<ErrorCode> {
        self.did_resolution_metadata.error
    }

    pub fn message(&self) -> Option<&str> {
        self.did_resolution_metadata.message.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.did_resolution_metadata.url.as_deref()
    }
}
