use std::collections::BTreeSet;

/// Registrable domains that show up incidentally in the SDN free text
/// (mail providers, social networks, the publishing agency) and must never
/// end up on a domain blocklist.
const DEFAULT_ALLOWED: &[&str] = &[
    "126.com",
    "163.com",
    "aliyun.com",
    "aol.com",
    "emirates.net.ae",
    "gmail.com",
    "google.com",
    "hotmail.com",
    "hotmail.nl",
    "icloud.com",
    "jabber.ru",
    "live.cn",
    "live.com",
    "live.ru",
    "mail.ru",
    "mil.ru",
    "outlook.com",
    "outlook.kr",
    "protonmail.ch",
    "protonmail.com",
    "proton.me",
    "qq.com",
    "treasury.gov",
    "twitter.com",
    "ukr.net",
    "x.com",
    "yahoo.com",
    "yandex.ru",
];

/// Read-only set of allowed registrable domains.
///
/// Entries are stored lower-cased and lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    domains: BTreeSet<String>,
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED.iter().copied())
    }
}

impl AllowList {
    /// Build an allow-list from arbitrary domains.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains.into_iter().filter_map(|d| canonical(d.as_ref())).collect(),
        }
    }

    /// An allow-list that allows nothing.
    pub fn empty() -> Self {
        Self {
            domains: BTreeSet::new(),
        }
    }

    /// Return a copy with additional domains.
    pub fn extend<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.domains
            .extend(domains.into_iter().filter_map(|d| canonical(d.as_ref())));
        self
    }

    pub fn contains(&self, registrable_domain: &str) -> bool {
        canonical(registrable_domain).is_some_and(|d| self.domains.contains(&d))
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Lower-case and strip surrounding whitespace and root dots; blank input is dropped.
fn canonical(domain: &str) -> Option<String> {
    let d = domain.trim().trim_end_matches('.').to_ascii_lowercase();
    if d.is_empty() { None } else { Some(d) }
}
