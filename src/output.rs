//! Blocklist file formats and the writer that puts them on disk.
//!
//! Four files are produced from one [`Blocklists`] value:
//!
//! | file              | contents                               | order          |
//! |-------------------|----------------------------------------|----------------|
//! | `urls.txt`        | original tokens with a host name       | lexicographic  |
//! | `ips.txt`         | IPv4 addresses                         | numeric        |
//! | `urls-pihole.txt` | FQDNs not on the allow-list            | lexicographic  |
//! | `urls-UBL.txt`    | `*://*.<domain>/*` uBlock Origin rules | by bare domain |
//!
//! Entries are joined with `\n`; there is no trailing newline.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use tracing::info;

use crate::categorize::Blocklists;
use crate::errors::{BlocklistError, IoResultExt, Result};

/// One blocklist file format.
pub trait BlocklistFormat {
    /// File name inside the output directory
    fn file_name(&self) -> &'static str;

    /// What the entries are, for log lines
    fn label(&self) -> &'static str;

    fn entry_count(&self, lists: &Blocklists) -> usize;

    /// File contents
    fn render(&self, lists: &Blocklists) -> String;
}

/// Every original token that carries a host name.
pub struct UrlsFormat;

/// IPv4 addresses in numeric order.
pub struct IpsFormat;

/// Pi-hole style list of fully qualified domain names.
pub struct PiholeFormat;

/// uBlock Origin wildcard rules, one per registered domain.
pub struct UblockFormat;

impl BlocklistFormat for UrlsFormat {
    fn file_name(&self) -> &'static str {
        "urls.txt"
    }

    fn label(&self) -> &'static str {
        "non-IPs"
    }

    fn entry_count(&self, lists: &Blocklists) -> usize {
        lists.urls.len()
    }

    fn render(&self, lists: &Blocklists) -> String {
        join_lines(lists.urls.iter())
    }
}

impl BlocklistFormat for IpsFormat {
    fn file_name(&self) -> &'static str {
        "ips.txt"
    }

    fn label(&self) -> &'static str {
        "IPs"
    }

    fn entry_count(&self, lists: &Blocklists) -> usize {
        lists.ips.len()
    }

    fn render(&self, lists: &Blocklists) -> String {
        join_lines(lists.ips.iter())
    }
}

impl BlocklistFormat for PiholeFormat {
    fn file_name(&self) -> &'static str {
        "urls-pihole.txt"
    }

    fn label(&self) -> &'static str {
        "FQDNs"
    }

    fn entry_count(&self, lists: &Blocklists) -> usize {
        lists.fqdns.len()
    }

    fn render(&self, lists: &Blocklists) -> String {
        join_lines(lists.fqdns.iter())
    }
}

impl BlocklistFormat for UblockFormat {
    fn file_name(&self) -> &'static str {
        "urls-UBL.txt"
    }

    fn label(&self) -> &'static str {
        "Registered Domains"
    }

    fn entry_count(&self, lists: &Blocklists) -> usize {
        lists.registered_domains.len()
    }

    fn render(&self, lists: &Blocklists) -> String {
        join_lines(lists.registered_domains.iter().map(|d| ublock_rule(d)))
    }
}

/// Wildcard rule matching a domain and all of its subdomains on any scheme.
pub fn ublock_rule(domain: &str) -> String {
    format!("*://*.{domain}/*")
}

/// The formats written on every run, in write order.
pub fn all_formats() -> Vec<Box<dyn BlocklistFormat>> {
    vec![
        Box::new(UrlsFormat),
        Box::new(IpsFormat),
        Box::new(PiholeFormat),
        Box::new(UblockFormat),
    ]
}

fn join_lines<I, T>(entries: I) -> String
where
    I: Iterator<Item = T>,
    T: std::fmt::Display,
{
    entries
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Current UTC time as `DD_Mon_YYYY_HH_MM_SS-UTC`.
pub fn current_datetime_str() -> String {
    Utc::now().format("%d_%b_%Y_%H_%M_%S-UTC").to_string()
}

/// Record of one file written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenBlocklist {
    pub path: PathBuf,
    pub entries: usize,
    pub timestamp: String,
}

/// Writes all blocklist formats into one directory, overwriting old files.
#[derive(Debug, Clone)]
pub struct BlocklistWriter {
    directory: PathBuf,
}

impl BlocklistWriter {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Write every format. Nothing is written when there are neither IPs nor
    /// host names; that case is reported as `EmptyOutput`.
    pub fn write_all(&self, lists: &Blocklists) -> Result<Vec<WrittenBlocklist>> {
        if lists.is_empty() {
            return Err(BlocklistError::EmptyOutput);
        }

        all_formats()
            .iter()
            .map(|format| self.write_one(format.as_ref(), lists))
            .collect()
    }

    fn write_one(
        &self,
        format: &dyn BlocklistFormat,
        lists: &Blocklists,
    ) -> Result<WrittenBlocklist> {
        let path = self.directory.join(format.file_name());
        let timestamp = current_datetime_str();
        fs::write(&path, format.render(lists)).with_path(path.display().to_string(), "write")?;

        let entries = format.entry_count(lists);
        info!(
            "{} {} written to {} at {}",
            entries,
            format.label(),
            format.file_name(),
            timestamp
        );
        Ok(WrittenBlocklist {
            path,
            entries,
            timestamp,
        })
    }
}
