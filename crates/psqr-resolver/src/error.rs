use psqr_core::SchemaError;

use crate::resolution::ErrorCode;

/// Transport-level failures reaching a document host.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Reasons a DID could not be resolved.
///
/// The fetch, id and schema variants all surface as `notFound`; the display
/// text is what distinguishes them for the caller.
#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("DID must resolve to a valid https URL containing a JSON document: {0}")]
    Fetch(String),

    #[error("DID document id does not match requested did: expected {expected}, found {found}")]
    IdMismatch { expected: String, found: String },

    #[error("Invalid DID:PSQR document returned: {0}")]
    InvalidDocument(#[from] SchemaError),

    #[error("invalid DID: {0}")]
    InvalidDid(String),

    #[error("unsupported DID method: {0}")]
    UnsupportedMethod(String),
}

impl From<TransportError> for ResolverError {
    fn from(err: TransportError) -> Self {
        Self::Fetch(err.to_string())
    }
}

impl ResolverError {
    /// Error code reported in `didResolutionMetadata.error`.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Fetch(_) | Self::IdMismatch { .. } | Self::InvalidDocument(_) => {
                ErrorCode::NotFound
            }
            Self::InvalidDid(_) => ErrorCode::InvalidDid,
            Self::UnsupportedMethod(_) => ErrorCode::UnsupportedDidMethod,
        }
    }

    /// Human-readable message reported in `didResolutionMetadata.message`.
    pub fn message(&self) -> String {
        format!("resolver_error: {self}")
    }
}
