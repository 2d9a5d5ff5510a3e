//! Domain decomposition with Public Suffix List integration.
//!
//! Tokens mined from free text are URL-ish: they may carry a scheme, a path,
//! userinfo (`user@host`), a port, or be bare IP literals. This module reduces
//! a token to its host and splits that host into subdomain, domain label and
//! public suffix using the ICANN section of the Public Suffix List:
//! - www.example.co.uk -> subdomain "www", domain "example", suffix "co.uk"
//! - user@mail.example.com -> subdomain "mail", domain "example", suffix "com"
//! - foo.blogspot.com -> subdomain "foo", domain "blogspot", suffix "com"
//!   (private-section rules are not treated as suffixes)
//! - 203.0.113.7 -> domain "203.0.113.7", no suffix
//!
//! Original case is kept; callers lower-case where they need to.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::normalize::clean_url;

/// Full-width and ideographic dots accepted as label separators.
const ALT_DOTS: [char; 3] = ['\u{3002}', '\u{FF0E}', '\u{FF61}'];

/// Decomposition of a single token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DomainInfo {
    /// Host portion of the token (scheme, path, userinfo and port removed)
    pub host: String,
    /// Labels left of the domain label, dot-joined
    pub subdomain: Option<String>,
    /// The label directly left of the public suffix (or the whole IP literal)
    pub domain: Option<String>,
    /// The ICANN public suffix, if the host has a known one
    pub suffix: Option<String>,
    ipv6: Option<Ipv6Addr>,
}

impl DomainInfo {
    /// Decompose a token into host parts.
    ///
    /// Never fails: tokens that are not hosts at all simply come back with
    /// no suffix, and usually no usable domain either.
    pub fn parse(token: &str) -> Self {
        let cleaned = clean_url(token);

        if let Ok(addr) = cleaned.parse::<Ipv6Addr>() {
            return Self::ipv6_literal(cleaned, addr);
        }

        let host = host_of(&cleaned).replace(ALT_DOTS, ".");

        if let Some(inner) = host.strip_prefix('[').and_then(|h| h.strip_suffix(']'))
            && let Ok(addr) = inner.parse::<Ipv6Addr>()
        {
            return Self::ipv6_literal(host.clone(), addr);
        }

        Self::parse_host(host)
    }

    fn ipv6_literal(host: String, addr: Ipv6Addr) -> Self {
        DomainInfo {
            domain: Some(host.clone()),
            host,
            ipv6: Some(addr),
            ..Default::default()
        }
    }

    fn parse_host(host: String) -> Self {
        let labels: Vec<&str> = host.split('.').collect();
        let suffix_labels = icann_suffix_labels(&host.to_lowercase());

        if suffix_labels == 0 && labels.len() == 4 && host.parse::<Ipv4Addr>().is_ok() {
            return DomainInfo {
                domain: Some(host.clone()),
                host,
                ..Default::default()
            };
        }

        let suffix_index = labels.len() - suffix_labels;
        let suffix = non_empty(labels[suffix_index..].join("."));
        let domain = suffix_index
            .checked_sub(1)
            .and_then(|i| non_empty(labels[i].to_string()));
        let subdomain = if suffix_index >= 2 {
            non_empty(labels[..suffix_index - 1].join("."))
        } else {
            None
        };

        DomainInfo {
            host: host.clone(),
            subdomain,
            domain,
            suffix,
            ipv6: None,
        }
    }

    /// Fully qualified name, present only when both a domain label and a
    /// public suffix were found.
    pub fn fqdn(&self) -> Option<String> {
        let (domain, suffix) = (self.domain.as_deref()?, self.suffix.as_deref()?);
        Some(match self.subdomain.as_deref() {
            Some(sub) => format!("{sub}.{domain}.{suffix}"),
            None => format!("{domain}.{suffix}"),
        })
    }

    /// The registrable domain (eTLD+1).
    pub fn registrable_domain(&self) -> Option<String> {
        let (domain, suffix) = (self.domain.as_deref()?, self.suffix.as_deref()?);
        Some(format!("{domain}.{suffix}"))
    }

    /// The host as an IPv4 literal, if it is one.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.suffix.is_some() || self.subdomain.is_some() {
            return None;
        }
        self.domain.as_deref()?.parse().ok()
    }

    /// The host as an IPv6 literal, bare or bracketed.
    pub fn ipv6(&self) -> Option<Ipv6Addr> {
        self.ipv6
    }

    /// Whether the public suffix is exactly one of `suffixes` (ASCII
    /// case-insensitive). `gov.uk` does not match `gov`.
    pub fn has_suffix_in(&self, suffixes: &[String]) -> bool {
        self.suffix
            .as_deref()
            .map(|suffix| suffixes.iter().any(|s| s.eq_ignore_ascii_case(suffix)))
            .unwrap_or(false)
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

/// Reduce a URL-ish string to its host.
fn host_of(url: &str) -> &str {
    let schemeless = strip_scheme(url);
    let end = schemeless.find(['/', '?', '#']).unwrap_or(schemeless.len());
    let authority = &schemeless[..end];
    let after_userinfo = authority.rsplit_once('@').map_or(authority, |(_, host)| host);

    if after_userinfo.starts_with('[')
        && let Some(close) = after_userinfo.find(']')
    {
        return &after_userinfo[..=close];
    }

    after_userinfo
        .split(':')
        .next()
        .unwrap_or("")
        .trim()
        .trim_end_matches(|c| c == '.' || ALT_DOTS.contains(&c))
}

/// Drop a leading `scheme://` (or a bare `//`).
fn strip_scheme(url: &str) -> &str {
    match url.find("//") {
        Some(0) => &url[2..],
        Some(i) if i >= 2 && url.as_bytes()[i - 1] == b':' => {
            let scheme = &url[..i - 1];
            if scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            {
                &url[i + 2..]
            } else {
                url
            }
        }
        _ => url,
    }
}

/// Number of trailing labels of `host` (lower-cased) forming its ICANN public
/// suffix, or 0 when the TLD is unknown.
fn icann_suffix_labels(host: &str) -> usize {
    let mut candidate = host;
    loop {
        let Some(suffix) = psl::suffix(candidate.as_bytes()) else {
            return 0;
        };
        if !suffix.is_known() {
            return 0;
        }
        let len = suffix.as_bytes().len();
        if len == 0 || len > candidate.len() {
            return 0;
        }
        let text = &candidate[candidate.len() - len..];
        if suffix.typ() == Some(psl::Type::Icann) {
            return text.split('.').count();
        }
        // Private rule: fall back to the ICANN suffix above it.
        match text.split_once('.') {
            Some((_, parent)) => candidate = parent,
            None => return 0,
        }
    }
}
