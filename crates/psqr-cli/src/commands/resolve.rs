//! `psqr resolve` — Resolve a did:psqr DID to its document.

use std::sync::Arc;

use clap::Args;
use psqr_core::DidDocument;
use psqr_resolver::{
    get_resolver, ParsedDid, ReqwestTransport, ResolutionResult, ResolutionTarget,
    ResolverRegistry,
};

use crate::config::PsqrConfig;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// The DID to resolve, optionally with a `#keyId` fragment.
    pub did: String,

    /// Print the resolution result on a single line.
    #[arg(long)]
    pub compact: bool,
}

pub async fn run(args: &ResolveArgs, config: &PsqrConfig) -> anyhow::Result<()> {
    let transport = Arc::new(ReqwestTransport::new(&config.http)?);
    let registry = ResolverRegistry::from_resolvers(get_resolver(transport));

    let result = registry.resolve(&args.did).await;

    let rendered = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{rendered}");

    if let Some(code) = result.error() {
        anyhow::bail!(
            "resolution failed ({}): {}",
            code.as_str(),
            result.message().unwrap_or_default()
        );
    }

    if let Some((kid, summary)) = referenced_key(&args.did, &result) {
        println!("Key {kid}:\n{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

/// The key a `#fragment` DID points at, with the capabilities granted to it.
fn referenced_key(did: &str, result: &ResolutionResult) -> Option<(String, serde_json::Value)> {
    let parsed = ParsedDid::parse(did).ok()?;
    let fragment = parsed.fragment.as_deref()?;
    let document = DidDocument::from_value(result.did_document.as_ref()?).ok()?;

    let kid = format!("{}#{}", ResolutionTarget::derive(&parsed).did, fragment);
    let Some(key) = document.public_key(&kid) else {
        tracing::warn!(kid = %kid, "document has no key for fragment");
        return None;
    };

    let summary = serde_json::json!({
        "publicKey": key,
        "grant": document.grants(&kid),
    });
    Some((kid, summary))
}
