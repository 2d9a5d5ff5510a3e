//! Route qualifying tokens into the four blocklist sets.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;

use tracing::debug;

use crate::allow_list::AllowList;
use crate::domain_utils::DomainInfo;

/// The four output sets. `BTreeSet` keeps each one sorted: URLs and domains
/// lexicographically, IPv4 addresses numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blocklists {
    /// Bare IPv4 addresses.
    pub ips: BTreeSet<Ipv4Addr>,
    /// Original tokens that carry a fully qualified domain name.
    pub urls: BTreeSet<String>,
    /// Lower-cased FQDNs whose registrable domain is not allowed.
    pub fqdns: BTreeSet<String>,
    /// Lower-cased registrable domains that are not allowed.
    pub registered_domains: BTreeSet<String>,
    /// Qualifying IPv6 literals; no output file is produced for these.
    pub skipped_ipv6: usize,
    /// Tokens that were neither a host name nor a valid IPv4 address.
    pub discarded: usize,
}

impl Blocklists {
    /// True when there is nothing worth writing.
    pub fn is_empty(&self) -> bool {
        self.ips.is_empty() && self.urls.is_empty()
    }
}

/// Splits qualifying tokens into IPs and named hosts and applies the allow-list.
#[derive(Debug, Clone, Copy)]
pub struct Categorizer<'a> {
    allow_list: &'a AllowList,
}

impl<'a> Categorizer<'a> {
    pub fn new(allow_list: &'a AllowList) -> Self {
        Self { allow_list }
    }

    pub fn categorize<I, S>(&self, urls: I) -> Blocklists
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lists = Blocklists::default();
        for url in urls {
            self.route(url.as_ref(), &mut lists);
        }
        debug!(
            "categorized: {} IPs, {} URLs, {} FQDNs, {} registered domains, {} IPv6 skipped, {} discarded",
            lists.ips.len(),
            lists.urls.len(),
            lists.fqdns.len(),
            lists.registered_domains.len(),
            lists.skipped_ipv6,
            lists.discarded
        );
        lists
    }

    fn route(&self, url: &str, lists: &mut Blocklists) {
        let info = DomainInfo::parse(url);

        if let Some(fqdn) = info.fqdn() {
            lists.urls.insert(url.to_string());
            if let Some(registered) = info.registrable_domain()
                && !self.allow_list.contains(&registered)
            {
                lists.fqdns.insert(fqdn.to_lowercase());
                lists.registered_domains.insert(registered.to_lowercase());
            }
            return;
        }

        if info.ipv6().is_some() {
            debug!("IPv6 literal {} has no blocklist, skipping", url);
            lists.skipped_ipv6 += 1;
            return;
        }

        // A domain label without a suffix may still be a dotted-quad address.
        match info.domain.as_deref().map(str::parse::<Ipv4Addr>) {
            Some(Ok(ip)) => {
                lists.ips.insert(ip);
            }
            _ => {
                debug!("{} is neither a host name nor an IPv4 address, skipping", url);
                lists.discarded += 1;
            }
        }
    }
}
