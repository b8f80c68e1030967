//! `psqr validate` — Check a local JSON file against the did:psqr schema.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, ValueEnum};
use psqr_core::{DidDocument, Identity};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DocumentKind {
    /// A published DID Document.
    Document,
    /// A local identity record with private keys.
    Identity,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON file.
    pub file: PathBuf,

    /// What the file is expected to contain.
    #[arg(short, long, value_enum, default_value = "document")]
    pub kind: DocumentKind,
}

pub fn run(args: &ValidateArgs) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", args.file.display()))?;

    match args.kind {
        DocumentKind::Document => {
            let doc = DidDocument::from_value(&value).with_context(|| {
                format!("{} is not a valid did:psqr document", args.file.display())
            })?;
            println!("Valid DID document: {}", doc.id);
            println!("  Name: {}", doc.psqr.public_identity.name);
            println!("  Keys: {}", doc.psqr.public_keys.len());
            println!("  Permissions: {}", doc.psqr.permissions.len());
        }
        DocumentKind::Identity => {
            let identity = Identity::from_value(&value).with_context(|| {
                format!("{} is not a valid did:psqr identity", args.file.display())
            })?;
            if identity.did != identity.did_doc.id {
                tracing::warn!(
                    did = %identity.did,
                    doc_id = %identity.did_doc.id,
                    "identity DID differs from its document id"
                );
            }
            println!("Valid identity: {}", identity.did);
            println!("  Key pairs: {}", identity.key_pairs.len());
        }
    }

    Ok(())
}
