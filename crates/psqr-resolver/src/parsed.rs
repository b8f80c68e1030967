use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ResolverError;

static DID_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^did:(?<method>[a-z0-9]+)",
        r":(?<id>(?:(?:[a-zA-Z0-9._-]|%[0-9a-fA-F]{2})*:)*(?:[a-zA-Z0-9._-]|%[0-9a-fA-F]{2})+)",
        r"(?<path>/[^#?]*)?",
        r"(?<query>\?[^#]*)?",
        r"(?:#(?<fragment>.*))?$",
    ))
    .expect("should compile")
});

/// Components of a DID URL, e.g. `did:psqr:id.ology.com/joe?v=1#publish`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDid {
    /// `did:{method}:{id}`, without path, query or fragment.
    pub did: String,
    /// The full input string.
    pub did_url: String,
    pub method: String,
    /// Method-specific identifier; for did:psqr this is the hostname.
    pub id: String,
    /// Path including its leading `/`.
    pub path: Option<String>,
    /// Query without its leading `?`.
    pub query: Option<String>,
    /// Fragment without its leading `#`.
    pub fragment: Option<String>,
}

impl ParsedDid {
    /// Decompose a DID URL into its components.
    pub fn parse(did_url: &str) -> Result<Self, ResolverError> {
        let Some(caps) = DID_URL_REGEX.captures(did_url) else {
            return Err(ResolverError::InvalidDid(format!(
                "{did_url} is not a valid DID URL"
            )));
        };

        let method = caps["method"].to_string();
        let id = caps["id"].to_string();

        Ok(Self {
            did: format!("did:{method}:{id}"),
            did_url: did_url.to_string(),
            method,
            id,
            path: caps.name("path").map(|m| m.as_str().to_string()),
            query: caps
                .name("query")
                .map(|m| m.as_str().trim_start_matches('?').to_string()),
            fragment: caps.name("fragment").map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for ParsedDid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.did_url)
    }
}
