//! PSQR Core
//!
//! Document model and structural validation for the `did:psqr` method:
//! - DID and KID string shapes
//! - DID Documents with public identity, keys and permissions
//! - Key pairs and identities (the local record combining a document with
//!   its private key material)

pub mod error;
pub mod schema;
pub mod types;

pub use error::SchemaError;
pub use schema::{
    validate_did, validate_did_document, validate_identity, validate_key_pair, validate_kid,
    validate_permission, validate_private_key, validate_public_identity, validate_public_key,
    validate_url,
};
pub use types::{
    Algorithm, Curve, DidDocument, Identity, KeyPair, KeyType, Permission, PrivateKey,
    PsqrSection, PublicIdentity, PublicKey, DID_CONTEXT, DID_PREFIX, PSQR_CONTEXT,
};
