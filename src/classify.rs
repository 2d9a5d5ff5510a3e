//! Token classification: which tokens are worth keeping.
//!
//! A token qualifies when it has a fully qualified domain name whose public
//! suffix is not excluded (by default `gov` and `mil`, which are the
//! publisher's own infrastructure), or when it is an IPv4 or IPv6 literal.
//! Qualifying tokens are kept verbatim and deduplicated by exact string.

use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::config::ExtractionConfig;
use crate::domain_utils::DomainInfo;
use crate::errors::{BlocklistError, Result};
use crate::sources::DocumentSource;
use crate::tokenizer::tokens;
use crate::xml_text::leaf_texts;

/// Decides whether a token is a usable domain or IP literal.
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    excluded_suffixes: Vec<String>,
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self::new(vec!["gov".to_string(), "mil".to_string()])
    }
}

impl TokenClassifier {
    pub fn new(excluded_suffixes: Vec<String>) -> Self {
        Self { excluded_suffixes }
    }

    pub fn is_qualifying(&self, token: &str) -> bool {
        let info = DomainInfo::parse(token);
        let named_host = info.fqdn().is_some() && !info.has_suffix_in(&self.excluded_suffixes);
        named_host || info.ipv4().is_some() || info.ipv6().is_some()
    }

    /// Tokenize every blob and keep the qualifying tokens.
    pub fn collect<I, S>(&self, blobs: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut urls = BTreeSet::new();
        for blob in blobs {
            self.absorb(blob.as_ref(), &mut urls);
        }
        urls
    }

    /// Add the qualifying tokens of one blob to `urls`.
    pub fn absorb(&self, blob: &str, urls: &mut BTreeSet<String>) {
        for token in tokens(blob) {
            if !urls.contains(token) && self.is_qualifying(token) {
                urls.insert(token.to_string());
            }
        }
    }
}

/// Extract the qualifying tokens from an XML document.
///
/// A malformed or hostile document fails the whole extraction; nothing found
/// before the failure is returned.
pub fn extract_urls(xml: &str, config: &ExtractionConfig) -> Result<BTreeSet<String>> {
    let classifier = TokenClassifier::new(config.excluded_suffixes.clone());
    let mut urls = BTreeSet::new();
    let mut blobs = 0usize;

    for text in leaf_texts(xml, &config.coded_value_suffix) {
        classifier.absorb(&text?, &mut urls);
        blobs += 1;
    }

    debug!("{} text values scanned, {} qualifying tokens", blobs, urls.len());
    Ok(urls)
}

/// Fetch the document from `source` and extract its qualifying tokens.
///
/// Returns `EmptyExtraction` rather than an empty set when nothing qualifies,
/// so callers cannot mistake a broken upstream for a clean list.
pub fn extract_from_source(
    source: &dyn DocumentSource,
    config: &ExtractionConfig,
) -> Result<BTreeSet<String>> {
    let xml = source.fetch()?;
    info!("Fetched {} bytes from {}", xml.len(), source.name());

    let urls = extract_urls(&xml, config)?;
    if urls.is_empty() {
        return Err(BlocklistError::empty_extraction(source.name()));
    }
    Ok(urls)
}
