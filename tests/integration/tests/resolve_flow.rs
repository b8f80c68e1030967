//! Integration test: DID URL -> registry -> psqr engine -> schema validation.
//!
//! Every test runs against an in-memory HTTPS host; nothing touches the network.

use psqr_core::DidDocument;
use psqr_integration_tests::{did_document, joe_document, registry, ScriptedTransport};
use psqr_resolver::{ContentType, ErrorCode};
use serde_json::json;

const ROOT_URL: &str = "https://id.ology.com/.well-known/psqr";
const JOE_URL: &str = "https://id.ology.com/joe-test";

// =========================================================================
// Successful resolution
// =========================================================================

#[tokio::test]
async fn test_resolve_root_did_from_well_known() {
    let host = ScriptedTransport::new();
    host.serve_json(ROOT_URL, &did_document());

    let result = registry(host.clone()).resolve("did:psqr:id.ology.com").await;

    assert!(!result.is_error(), "{:?}", result.message());
    assert_eq!(result.did_document, Some(did_document()));
    assert_eq!(result.url(), Some(ROOT_URL));
    assert_eq!(
        result.did_resolution_metadata.content_type,
        Some(ContentType::DidLdJson)
    );
    assert_eq!(host.requests(), vec![ROOT_URL]);
}

#[tokio::test]
async fn test_resolve_path_did() {
    let host = ScriptedTransport::new();
    host.serve_json(JOE_URL, &joe_document());

    let result = registry(host.clone())
        .resolve("did:psqr:id.ology.com/joe-test")
        .await;

    assert!(!result.is_error(), "{:?}", result.message());
    assert_eq!(result.did_document, Some(joe_document()));
    assert_eq!(result.url(), Some(JOE_URL));
}

#[tokio::test]
async fn test_trailing_slash_resolves_identically() {
    let host = ScriptedTransport::new();
    host.serve_json(JOE_URL, &joe_document());
    let registry = registry(host.clone());

    let plain = registry.resolve("did:psqr:id.ology.com/joe-test").await;
    let slashed = registry.resolve("did:psqr:id.ology.com/joe-test/").await;

    assert_eq!(plain, slashed);
    assert_eq!(host.requests(), vec![JOE_URL, JOE_URL]);
}

#[tokio::test]
async fn test_fragment_selects_key_in_resolved_document() {
    let host = ScriptedTransport::new();
    host.serve_json(ROOT_URL, &did_document());

    let result = registry(host.clone())
        .resolve("did:psqr:id.ology.com#admin")
        .await;
    assert!(!result.is_error(), "{:?}", result.message());
    assert_eq!(host.requests(), vec![ROOT_URL]);

    let doc = DidDocument::from_value(result.did_document.as_ref().unwrap()).unwrap();
    let key = doc.public_key("did:psqr:id.ology.com#admin").unwrap();
    assert_eq!(key.kid, "did:psqr:id.ology.com#admin");
    assert_eq!(
        doc.grants("did:psqr:id.ology.com#admin"),
        vec!["admin", "publish", "provenance"]
    );
}

#[tokio::test]
async fn test_repeated_resolution_is_byte_identical() {
    let host = ScriptedTransport::new();
    host.serve_json(ROOT_URL, &did_document());
    let registry = registry(host);

    let first = registry.resolve("did:psqr:id.ology.com").await;
    let second = registry.resolve("did:psqr:id.ology.com").await;

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn test_concurrent_resolutions_are_independent() {
    let host = ScriptedTransport::new();
    host.serve_json(ROOT_URL, &did_document());
    host.serve_json(JOE_URL, &joe_document());
    let registry = registry(host);

    let (root, joe, missing) = tokio::join!(
        registry.resolve("did:psqr:id.ology.com"),
        registry.resolve("did:psqr:id.ology.com/joe-test"),
        registry.resolve("did:psqr:id.ology.com/nobody"),
    );

    assert!(!root.is_error());
    assert!(!joe.is_error());
    assert_eq!(missing.error(), Some(ErrorCode::NotFound));
}

// =========================================================================
// Failures collapse to notFound with a distinguishing message
// =========================================================================

#[tokio::test]
async fn test_unreachable_host() {
    let host = ScriptedTransport::new();
    let result = registry(host).resolve("did:psqr:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert!(result.did_document.is_none());
    assert!(result
        .message()
        .unwrap()
        .starts_with("resolver_error: DID must resolve to a valid https URL containing a JSON document"));
}

#[tokio::test]
async fn test_server_error_status() {
    let host = ScriptedTransport::new();
    host.respond(ROOT_URL, 400, "Bad Request", b"{}");

    let result = registry(host).resolve("did:psqr:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert!(result.message().unwrap().contains("Bad response 400 Bad Request"));
}

#[tokio::test]
async fn test_redirect_is_rejected() {
    let host = ScriptedTransport::new();
    host.redirect(ROOT_URL, "https://attacker.example/.well-known/psqr");
    host.serve_json("https://attacker.example/.well-known/psqr", &did_document());

    let result = registry(host.clone()).resolve("did:psqr:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert!(result.message().unwrap().contains("not followed"));
    assert_eq!(host.requests(), vec![ROOT_URL]);
}

#[tokio::test]
async fn test_body_is_not_json() {
    let host = ScriptedTransport::new();
    host.respond(ROOT_URL, 200, "OK", b"<html>hello</html>");

    let result = registry(host).resolve("did:psqr:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert!(result.message().unwrap().contains("expected value at line 1 column 1"));
}

#[tokio::test]
async fn test_document_id_mismatch() {
    let host = ScriptedTransport::new();
    let mut wrong = did_document();
    wrong["id"] = json!("did:psqr:wrong.com");
    host.serve_json(ROOT_URL, &wrong);

    let result = registry(host).resolve("did:psqr:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert!(result
        .message()
        .unwrap()
        .contains("DID document id does not match requested did"));
    assert_eq!(result.did_document, Some(wrong));
}

#[tokio::test]
async fn test_path_did_served_root_document() {
    // The host answers the sub-path with the domain's own document.
    let host = ScriptedTransport::new();
    host.serve_json(JOE_URL, &did_document());

    let result = registry(host)
        .resolve("did:psqr:id.ology.com/joe-test")
        .await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert!(result.message().unwrap().contains("does not match"));
}

#[tokio::test]
async fn test_document_missing_public_identity_name() {
    let host = ScriptedTransport::new();
    let mut doc = did_document();
    doc["psqr"]["publicIdentity"]
        .as_object_mut()
        .unwrap()
        .remove("name");
    host.serve_json(ROOT_URL, &doc);

    let result = registry(host).resolve("did:psqr:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert_eq!(
        result.message(),
        Some("resolver_error: Invalid DID:PSQR document returned: $.psqr.publicIdentity.name: required field is missing")
    );
}

#[tokio::test]
async fn test_document_with_wrong_algorithm() {
    let host = ScriptedTransport::new();
    let mut doc = did_document();
    doc["psqr"]["publicKeys"][1]["alg"] = json!("ES256");
    host.serve_json(ROOT_URL, &doc);

    let result = registry(host).resolve("did:psqr:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::NotFound));
    assert!(result
        .message()
        .unwrap()
        .contains(r#"$.psqr.publicKeys[1].alg: expected "ES384", found "ES256""#));
}

// =========================================================================
// Host-level rejections
// =========================================================================

#[tokio::test]
async fn test_other_method_is_unsupported() {
    let host = ScriptedTransport::new();
    let result = registry(host.clone()).resolve("did:web:id.ology.com").await;

    assert_eq!(result.error(), Some(ErrorCode::UnsupportedDidMethod));
    assert!(host.requests().is_empty());
}

#[tokio::test]
async fn test_malformed_did_is_invalid() {
    let host = ScriptedTransport::new();
    let result = registry(host.clone()).resolve("did:psqr:").await;

    assert_eq!(result.error(), Some(ErrorCode::InvalidDid));
    assert!(host.requests().is_empty());
}
