use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ResolverError;
use crate::parsed::ParsedDid;
use crate::psqr::PsqrResolver;
use crate::resolution::ResolutionResult;
use crate::transport::HttpsTransport;

/// Method name -> resolver mapping consumed by [`ResolverRegistry`].
pub type MethodResolvers = HashMap<String, Arc<dyn DidResolver>>;

/// Resolver for a single DID method.
#[async_trait]
pub trait DidResolver: Send + Sync {
    /// Resolve `did` given its already-parsed components.
    async fn resolve(&self, did: &str, parsed: &ParsedDid) -> ResolutionResult;
}

/// Method name -> resolver entries for the `psqr` method.
pub fn get_resolver(transport: Arc<dyn HttpsTransport>) -> MethodResolvers {
    let mut resolvers = MethodResolvers::new();
    resolvers.insert("psqr".into(), Arc::new(PsqrResolver::new(transport)));
    resolvers
}

/// Dispatches DID URLs to method resolvers by method name.
#[derive(Clone, Default)]
pub struct ResolverRegistry {
    resolvers: MethodResolvers,
}

impl ResolverRegistry {
    /// Create a registry with no methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry from a method -> resolver mapping.
    pub fn from_resolvers(resolvers: MethodResolvers) -> Self {
        Self { resolvers }
    }

    /// Add every entry of `resolvers`, replacing existing methods of the same name.
    pub fn register(&mut self, resolvers: MethodResolvers) {
        self.resolvers.extend(resolvers);
    }

    /// Whether `method` has a resolver.
    pub fn supports(&self, method: &str) -> bool {
        self.resolvers.contains_key(method)
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<String> {
        let mut methods: Vec<String> = self.resolvers.keys().cloned().collect();
        methods.sort();
        methods
    }

    /// Parse `did_url` and hand it to the resolver for its method.
    pub async fn resolve(&self, did_url: &str) -> ResolutionResult {
        let parsed = match ParsedDid::parse(did_url) {
            Ok(parsed) => parsed,
            Err(e) => return Self::reject(did_url, e),
        };

        let Some(resolver) = self.resolvers.get(&parsed.method) else {
            let err = ResolverError::UnsupportedMethod(parsed.method.clone());
            return Self::reject(did_url, err);
        };

        resolver.resolve(&parsed.did_url, &parsed).await
    }

    fn reject(did_url: &str, err: ResolverError) -> ResolutionResult {
        tracing::debug!(did = did_url, error = %err, "DID rejected before dispatch");
        ResolutionResult::failed(err.code(), err.message(), None, None)
    }
}
