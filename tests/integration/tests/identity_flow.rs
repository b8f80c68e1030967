//! Integration test: identity records and the documents they publish.

use psqr_core::{validate_identity, DidDocument, Identity};
use psqr_integration_tests::{identity, registry, ScriptedTransport};
use serde_json::json;

#[test]
fn test_identity_fixture_is_valid() {
    let value = identity();
    assert!(validate_identity(&value).is_ok());

    let identity = Identity::from_value(&value).unwrap();
    assert_eq!(identity.did, identity.did_doc.id);
    assert_eq!(identity.key_pairs.len(), 1);

    let pair = identity
        .key_pair("did:psqr:id.ology.com/joe-test#publish")
        .unwrap();
    assert_eq!(pair.private.public, *pair.public.as_ref().unwrap());
}

#[test]
fn test_identity_rejects_key_pair_without_scalar() {
    let mut value = identity();
    value["keyPairs"][0]["private"]
        .as_object_mut()
        .unwrap()
        .remove("d");

    let err = Identity::from_value(&value).unwrap_err();
    assert_eq!(err.path, "$.keyPairs[0].private.d");
}

#[test]
fn test_identity_rejects_fragment_did() {
    let mut value = identity();
    value["did"] = json!("did:psqr:id.ology.com/joe-test#publish");

    let err = validate_identity(&value).unwrap_err();
    assert_eq!(err.path, "$.did");
}

#[tokio::test]
async fn test_published_identity_document_resolves() {
    let value = identity();
    let identity = Identity::from_value(&value).unwrap();

    // Publish the document part only; private keys never leave the identity.
    let host = ScriptedTransport::new();
    host.serve_json(
        "https://id.ology.com/joe-test",
        &serde_json::to_value(&identity.did_doc).unwrap(),
    );

    let result = registry(host).resolve(&identity.did).await;
    assert!(!result.is_error(), "{:?}", result.message());

    let resolved = DidDocument::from_value(result.did_document.as_ref().unwrap()).unwrap();
    assert_eq!(resolved, identity.did_doc);
    assert!(!serde_json::to_string(&result).unwrap().contains("\"d\""));
}
