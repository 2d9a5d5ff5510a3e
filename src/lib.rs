//! SDN Blocklist Library
//!
//! Turns the U.S. Treasury OFAC Specially Designated Nationals list (SDN
//! advanced XML) into plaintext blocklists of the websites and IP addresses
//! mentioned in its free-text fields. This library provides functionality to:
//!
//! - Walk the XML document's element texts with entity expansion refused
//! - Tokenize the texts and keep tokens that are host names or IP literals
//! - Decompose hosts with the Public Suffix List and drop allow-listed domains
//! - Write `urls.txt`, `ips.txt`, `urls-pihole.txt` and `urls-UBL.txt`
//!
//! # Example
//!
//! ```rust,no_run
//! use sdn_blocklist::app::Pipeline;
//! use sdn_blocklist::config::Config;
//! use sdn_blocklist::sources::FileSource;
//!
//! let config = Config::default();
//! let summary = Pipeline::new(&config).run(&FileSource::new("sdn_advanced.xml"))?;
//! println!("{} IPs, {} URLs", summary.lists.ips.len(), summary.lists.urls.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod allow_list;
pub mod app;
pub mod categorize;
pub mod classify;
pub mod cli;
pub mod config;
pub mod domain_utils;
pub mod errors;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod sources;
pub mod tokenizer;
pub mod xml_text;

// Re-export commonly used types and functions for convenience
pub use allow_list::AllowList;
pub use categorize::{Blocklists, Categorizer};
pub use classify::{TokenClassifier, extract_from_source, extract_urls};
pub use domain_utils::DomainInfo;
pub use errors::{BlocklistError, Result};
pub use normalize::clean_url;
pub use output::{BlocklistWriter, current_datetime_str};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
