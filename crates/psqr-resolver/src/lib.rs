//! PSQR Resolver
//!
//! Resolves `did:psqr` identifiers into DID Documents:
//! - DID URL parsing (method, method-specific id, path, query, fragment)
//! - Fetch URL derivation (sub-path or `/.well-known/psqr`)
//! - HTTPS retrieval behind a pluggable transport (redirects never followed)
//! - Document id matching and schema validation
//! - A method registry that dispatches DID URLs to method resolvers

pub mod error;
pub mod parsed;
pub mod psqr;
pub mod registry;
pub mod resolution;
pub mod transport;

pub use error::{ResolverError, TransportError};
pub use parsed::ParsedDid;
pub use psqr::{PsqrResolver, ResolutionTarget, ACCEPT, WELL_KNOWN_PATH};
pub use registry::{get_resolver, DidResolver, MethodResolvers, ResolverRegistry};
pub use resolution::{ContentType, ErrorCode, ResolutionMetadata, ResolutionResult};
pub use transport::{HttpConfig, HttpResponse, HttpsTransport, ReqwestTransport};
