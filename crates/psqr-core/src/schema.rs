//! Structural validation for `did:psqr` values.
//!
//! Each validator walks a `serde_json::Value` field by field and stops at the
//! first violation, reporting where it happened and why. Unknown extra fields
//! are tolerated; missing required fields, wrong literal values and malformed
//! DID/KID strings are not.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::types::{DID_CONTEXT, PSQR_CONTEXT};

static DID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^did:psqr:[A-Za-z0-9._/%-]+$").expect("should compile"));

static KID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^did:psqr:[A-Za-z0-9._/%-]+#[A-Za-z0-9_]+$").expect("should compile")
});

const ROOT: &str = "$";

/// Succeeds iff `value` parses as an absolute URL.
pub fn validate_url(value: &str) -> Result<(), SchemaError> {
    check_url(value, ROOT)
}

/// Succeeds iff `value` is a fragment-free `did:psqr` identifier.
pub fn validate_did(value: &str) -> Result<(), SchemaError> {
    check_did(value, ROOT)
}

/// Succeeds iff `value` is a `did:psqr` identifier followed by `#keyId`.
pub fn validate_kid(value: &str) -> Result<(), SchemaError> {
    check_kid(value, ROOT)
}

/// Validate a public key record: `{crv: "P-384", alg: "ES384", kty: "EC", kid, x, y}`.
pub fn validate_public_key(value: &Value) -> Result<(), SchemaError> {
    check_public_key(value, ROOT).map(|_| ())
}

/// Validate a private key record: a public key plus the scalar `d`.
pub fn validate_private_key(value: &Value) -> Result<(), SchemaError> {
    check_private_key(value, ROOT)
}

/// Validate the `publicIdentity` block of a document.
pub fn validate_public_identity(value: &Value) -> Result<(), SchemaError> {
    check_public_identity(value, ROOT)
}

/// Validate a single `{kid, grant[]}` permission record.
pub fn validate_permission(value: &Value) -> Result<(), SchemaError> {
    check_permission(value, ROOT)
}

/// Validate a complete `did:psqr` DID Document.
pub fn validate_did_document(value: &Value) -> Result<(), SchemaError> {
    check_did_document(value, ROOT)
}

/// Validate a `{kid, private, public?}` key pair.
pub fn validate_key_pair(value: &Value) -> Result<(), SchemaError> {
    check_key_pair(value, ROOT)
}

/// Validate an identity record: `{did, didDoc, keyPairs}`.
pub fn validate_identity(value: &Value) -> Result<(), SchemaError> {
    let identity = object(value, ROOT)?;

    let did_path = join(ROOT, "did");
    check_did(string(field(identity, "did", ROOT)?, &did_path)?, &did_path)?;

    check_did_document(field(identity, "didDoc", ROOT)?, &join(ROOT, "didDoc"))?;

    let pairs_path = join(ROOT, "keyPairs");
    for (i, pair) in array(field(identity, "keyPairs", ROOT)?, &pairs_path)?
        .iter()
        .enumerate()
    {
        check_key_pair(pair, &index(&pairs_path, i))?;
    }

    Ok(())
}

fn check_url(value: &str, path: &str) -> Result<(), SchemaError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| SchemaError::new(path, e.to_string()))
}

fn check_did(value: &str, path: &str) -> Result<(), SchemaError> {
    if DID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(SchemaError::new(
            path,
            "Invalid DID PSQR specified. Expected format: did:psqr:{hostname}/{path}",
        ))
    }
}

fn check_kid(value: &str, path: &str) -> Result<(), SchemaError> {
    if KID_REGEX.is_match(value) {
        Ok(())
    } else {
        Err(SchemaError::new(
            path,
            "Invalid KID PSQR specified. Expected format: did:psqr:{hostname}/{path}#{keyId}",
        ))
    }
}

fn check_did_document(value: &Value, path: &str) -> Result<(), SchemaError> {
    let doc = object(value, path)?;

    check_context(field(doc, "@context", path)?, &join(path, "@context"))?;

    let id_path = join(path, "id");
    check_did(string(field(doc, "id", path)?, &id_path)?, &id_path)?;

    let psqr_path = join(path, "psqr");
    let psqr = object(field(doc, "psqr", path)?, &psqr_path)?;

    check_public_identity(
        field(psqr, "publicIdentity", &psqr_path)?,
        &join(&psqr_path, "publicIdentity"),
    )?;

    let keys_path = join(&psqr_path, "publicKeys");
    for (i, key) in array(field(psqr, "publicKeys", &psqr_path)?, &keys_path)?
        .iter()
        .enumerate()
    {
        check_public_key(key, &index(&keys_path, i))?;
    }

    let perms_path = join(&psqr_path, "permissions");
    for (i, perm) in array(field(psqr, "permissions", &psqr_path)?, &perms_path)?
        .iter()
        .enumerate()
    {
        check_permission(perm, &index(&perms_path, i))?;
    }

    if let Some(updated) = psqr.get("updated") {
        if !updated.is_number() {
            return Err(SchemaError::new(
                join(&psqr_path, "updated"),
                format!("expected number, found {}", kind(updated)),
            ));
        }
    }

    Ok(())
}

/// Both context URIs must be present exactly once; their order is not significant.
fn check_context(value: &Value, path: &str) -> Result<(), SchemaError> {
    let entries = array(value, path)?;

    for (i, entry) in entries.iter().enumerate() {
        let uri = string(entry, &index(path, i))?;
        if uri != DID_CONTEXT && uri != PSQR_CONTEXT {
            return Err(SchemaError::new(
                index(path, i),
                format!("unrecognized context {uri:?}"),
            ));
        }
    }

    for required in [DID_CONTEXT, PSQR_CONTEXT] {
        if !entries.iter().any(|e| e.as_str() == Some(required)) {
            return Err(SchemaError::new(
                path,
                format!("missing required context {required:?}"),
            ));
        }
    }

    if entries.len() != 2 {
        return Err(SchemaError::new(
            path,
            format!("expected exactly 2 context entries, found {}", entries.len()),
        ));
    }

    Ok(())
}

fn check_public_identity(value: &Value, path: &str) -> Result<(), SchemaError> {
    let info = object(value, path)?;

    string(field(info, "name", path)?, &join(path, "name"))?;

    for key in ["image", "tagline", "bio", "description"] {
        optional_string(info, key, path)?;
    }

    if let Some(url) = optional_string(info, "url", path)? {
        check_url(url, &join(path, "url"))?;
    }

    Ok(())
}

fn check_public_key<'a>(
    value: &'a Value,
    path: &str,
) -> Result<&'a Map<String, Value>, SchemaError> {
    let key = object(value, path)?;

    literal(key, "crv", "P-384", path)?;
    literal(key, "alg", "ES384", path)?;
    literal(key, "kty", "EC", path)?;

    let kid_path = join(path, "kid");
    check_kid(string(field(key, "kid", path)?, &kid_path)?, &kid_path)?;

    non_empty_string(key, "x", path)?;
    non_empty_string(key, "y", path)?;

    Ok(key)
}

fn check_private_key(value: &Value, path: &str) -> Result<(), SchemaError> {
    let key = check_public_key(value, path)?;
    non_empty_string(key, "d", path)?;
    Ok(())
}

fn check_permission(value: &Value, path: &str) -> Result<(), SchemaError> {
    let perm = object(value, path)?;

    let kid_path = join(path, "kid");
    check_kid(string(field(perm, "kid", path)?, &kid_path)?, &kid_path)?;

    let grant_path = join(path, "grant");
    for (i, grant) in array(field(perm, "grant", path)?, &grant_path)?
        .iter()
        .enumerate()
    {
        string(grant, &index(&grant_path, i))?;
    }

    Ok(())
}

fn check_key_pair(value: &Value, path: &str) -> Result<(), SchemaError> {
    let pair = object(value, path)?;

    let kid_path = join(path, "kid");
    check_kid(string(field(pair, "kid", path)?, &kid_path)?, &kid_path)?;

    check_private_key(field(pair, "private", path)?, &join(path, "private"))?;

    if let Some(public) = pair.get("public") {
        check_public_key(public, &join(path, "public"))?;
    }

    Ok(())
}

// Value accessors

fn join(path: &str, key: &str) -> String {
    format!("{path}.{key}")
}

fn index(path: &str, i: usize) -> String {
    format!("{path}[{i}]")
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SchemaError> {
    value
        .as_object()
        .ok_or_else(|| SchemaError::new(path, format!("expected object, found {}", kind(value))))
}

fn array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, SchemaError> {
    value
        .as_array()
        .ok_or_else(|| SchemaError::new(path, format!("expected array, found {}", kind(value))))
}

fn string<'a>(value: &'a Value, path: &str) -> Result<&'a str, SchemaError> {
    value
        .as_str()
        .ok_or_else(|| SchemaError::new(path, format!("expected string, found {}", kind(value))))
}

fn field<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Value, SchemaError> {
    obj.get(key)
        .ok_or_else(|| SchemaError::new(join(path, key), "required field is missing"))
}

fn optional_string<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<&'a str>, SchemaError> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => string(value, &join(path, key)).map(Some),
    }
}

fn non_empty_string<'a>(
    obj: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a str, SchemaError> {
    let key_path = join(path, key);
    let value = string(field(obj, key, path)?, &key_path)?;
    if value.is_empty() {
        return Err(SchemaError::new(key_path, "must not be empty"));
    }
    Ok(value)
}

fn literal(
    obj: &Map<String, Value>,
    key: &str,
    expected: &str,
    path: &str,
) -> Result<(), SchemaError> {
    let value = field(obj, key, path)?;
    match value.as_str() {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(SchemaError::new(
            join(path, key),
            format!("expected {expected:?}, found {actual:?}"),
        )),
        None => Err(SchemaError::new(
            join(path, key),
            format!("expected {expected:?}, found {}", kind(value)),
        )),
    }
}
