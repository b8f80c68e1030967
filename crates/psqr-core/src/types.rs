use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::SchemaError;
use crate::schema::{validate_did_document, validate_identity};

/// W3C DID core context.
pub const DID_CONTEXT: &str = "https://www.w3.org/ns/did/v1";

/// did:psqr method context.
pub const PSQR_CONTEXT: &str = "https://vpsqr.com/ns/did-psqr/v1";

/// Every did:psqr identifier starts with this prefix.
pub const DID_PREFIX: &str = "did:psqr:";

/// Elliptic curve of a did:psqr key. Only P-384 is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Curve {
    #[serde(rename = "P-384")]
    P384,
}

/// Signature algorithm of a did:psqr key. Only ES384 is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "ES384")]
    Es384,
}

/// JWK key type. Only EC is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    #[serde(rename = "EC")]
    Ec,
}

/// Public half of an ES384 key in JWK form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    pub crv: Curve,
    pub alg: Algorithm,
    pub kty: KeyType,
    /// Key identifier, e.g. `did:psqr:id.ology.com#publish`.
    pub kid: String,
    pub x: String,
    pub y: String,
}

/// Private key: the public JWK fields plus the scalar `d`.
///
/// Never part of a published document; only found inside an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateKey {
    #[serde(flatten)]
    pub public: PublicKey,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub kid: String,
    pub private: PrivateKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<PublicKey>,
}

/// Human-facing description of the DID subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Capabilities granted to one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub kid: String,
    pub grant: Vec<String>,
}

/// The `psqr` block of a DID Document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsqrSection {
    pub public_identity: PublicIdentity,
    pub public_keys: Vec<PublicKey>,
    pub permissions: Vec<Permission>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<Number>,
}

/// A did:psqr DID Document as served from the subject's host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub id: String,
    pub psqr: PsqrSection,
}

impl DidDocument {
    /// Validate a raw JSON value and convert it into a typed document.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        validate_did_document(value)?;
        serde_json::from_value(value.clone()).map_err(|e| SchemaError::new("$", e.to_string()))
    }

    /// Find the public key published under `kid`.
    pub fn public_key(&self, kid: &str) -> Option<&PublicKey> {
        self.psqr.public_keys.iter().find(|k| k.kid == kid)
    }

    /// Capabilities granted to `kid`, across all matching permission records.
    pub fn grants(&self, kid: &str) -> Vec<&str> {
        self.psqr
            .permissions
            .iter()
            .filter(|p| p.kid == kid)
            .flat_map(|p| p.grant.iter().map(String::as_str))
            .collect()
    }
}

/// Local identity record: a document plus the private keys behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub did: String,
    pub did_doc: DidDocument,
    pub key_pairs: Vec<KeyPair>,
}

impl Identity {
    /// Validate a raw JSON value and convert it into a typed identity.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        validate_identity(value)?;
        serde_json::from_value(value.clone()).map_err(|e| SchemaError::new("$", e.to_string()))
    }

    pub fn key_pair(&self, kid: &str) -> Option<&KeyPair> {
        self.key_pairs.iter().find(|kp| kp.kid == kid)
    }
}
