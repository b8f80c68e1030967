//! # did:psqr Resolver
//!
//! A `did:psqr` identifier names a JSON document hosted over HTTPS:
//!
//! - `did:psqr:id.ology.com` -> `https://id.ology.com/.well-known/psqr`
//! - `did:psqr:id.ology.com/joe` -> `https://id.ology.com/joe`
//!
//! The fetched document must carry the requested DID as its `id` and pass
//! [`validate_did_document`]. Signatures are not checked here.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use psqr_core::{validate_did_document, DID_PREFIX};

use crate::error::ResolverError;
use crate::parsed::ParsedDid;
use crate::registry::DidResolver;
use crate::resolution::{ContentType, ResolutionResult};
use crate::transport::HttpsTransport;

/// Document path for a DID that names a whole domain.
pub const WELL_KNOWN_PATH: &str = "/.well-known/psqr";

/// `Accept` header sent with every document request.
pub const ACCEPT: &str = "application/json,application/did+json";

/// Where a DID's document lives and which `id` it must declare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTarget {
    pub url: String,
    /// Fragment-free, trailing-slash-normalized DID.
    pub did: String,
}

impl ResolutionTarget {
    /// Derive the fetch URL and expected document id.
    ///
    /// Fragments and queries never reach the URL. A single trailing slash is
    /// dropped from the path, and an empty path selects the well-known
    /// document.
    pub fn derive(parsed: &ParsedDid) -> Self {
        // ports arrive percent-encoded, e.g. localhost%3A8443
        let host = parsed.id.replace("%3A", ":").replace("%3a", ":");

        let path = parsed
            .path
            .as_deref()
            .map(|p| p.strip_suffix('/').unwrap_or(p))
            .filter(|p| !p.is_empty());

        match path {
            Some(path) => Self {
                url: format!("https://{host}{path}"),
                did: format!("{DID_PREFIX}{}{path}", parsed.id),
            },
            None => Self {
                url: format!("https://{host}{WELL_KNOWN_PATH}"),
                did: format!("{DID_PREFIX}{}", parsed.id),
            },
        }
    }
}

/// Resolution engine for the `psqr` method.
///
/// Holds no state between calls beyond the transport handle.
#[derive(Clone)]
pub struct PsqrResolver {
    transport: Arc<dyn HttpsTransport>,
}

impl PsqrResolver {
    pub fn new(transport: Arc<dyn HttpsTransport>) -> Self {
        Self { transport }
    }

    /// Resolve `did` to its DID Document.
    ///
    /// Every failure is reported inside the returned [`ResolutionResult`];
    /// this never errors out of band.
    pub async fn resolve(&self, did: &str, parsed: &ParsedDid) -> ResolutionResult {
        let target = ResolutionTarget::derive(parsed);
        tracing::debug!(did, url = %target.url, "resolving did:psqr document");

        let document = match self.fetch(&target.url).await {
            Ok(document) => document,
            Err(e) => return Self::fail(did, &target, e, None),
        };

        match Self::check(&target, &document) {
            Ok(content_type) => {
                tracing::debug!(did, url = %target.url, "did:psqr document resolved");
                ResolutionResult::resolved(document, content_type, target.url)
            }
            Err(e) => Self::fail(did, &target, e, Some(document)),
        }
    }

    /// GET the document and parse the body as JSON.
    async fn fetch(&self, url: &str) -> Result<Value, ResolverError> {
        let response = self.transport.get(url, ACCEPT).await?;

        if response.is_redirect() {
            return Err(ResolverError::Fetch(format!(
                "Bad response {} {}: redirect to {} not followed",
                response.status,
                response.reason,
                response.location.as_deref().unwrap_or("unknown location"),
            )));
        }
        if !response.is_success() {
            return Err(ResolverError::Fetch(format!(
                "Bad response {} {}",
                response.status, response.reason
            )));
        }

        serde_json::from_slice(&response.body)
            .map_err(|e| ResolverError::Fetch(format!("invalid JSON body: {e}")))
    }

    /// Match the document id, then validate its structure.
    fn check(target: &ResolutionTarget, document: &Value) -> Result<ContentType, ResolverError> {
        let found = document.get("id").and_then(Value::as_str);
        if found != Some(target.did.as_str()) {
            return Err(ResolverError::IdMismatch {
                expected: target.did.clone(),
                found: found.unwrap_or("<missing>").to_string(),
            });
        }

        validate_did_document(document)?;

        Ok(ContentType::for_document(document))
    }

    fn fail(
        did: &str,
        target: &ResolutionTarget,
        err: ResolverError,
        document: Option<Value>,
    ) -> ResolutionResult {
        tracing::warn!(did, url = %target.url, error = %err, "did:psqr resolution failed");
        ResolutionResult::failed(err.code(), err.message(), document, Some(target.url.clone()))
    }
}

#[async_trait]
impl DidResolver for PsqrResolver {
    async fn resolve(&self, did: &str, parsed: &ParsedDid) -> ResolutionResult {
        PsqrResolver::resolve(self, did, parsed).await
    }
}
