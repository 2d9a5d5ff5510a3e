use std::path::PathBuf;

use clap::Parser;

/// Command-line interface definition.
/// Builds plaintext blocklists from the OFAC SDN advanced XML list.
///
/// Verbosity levels:
/// 0 - silent
/// 1 - errors
/// 2 - warnings + errors
/// 3 - per-file summaries (default)
/// 5 - trace/debug
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Extract websites and IP addresses from the OFAC SDN list into blocklist files"
)]
pub struct Cli {
    /// Download the SDN XML document from this URL instead of the default
    #[arg(long, value_name = "URL", conflicts_with = "input")]
    pub url: Option<String>,

    /// Read a previously downloaded SDN XML document instead of fetching it
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory to write urls.txt, ips.txt, urls-pihole.txt and urls-UBL.txt into
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// HTTP timeout in seconds (default 30)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Additional registrable domain to keep off the domain blocklists (repeatable)
    #[arg(long, value_name = "DOMAIN")]
    pub allow: Vec<String>,

    /// Verbosity level (0,1,2,3,5)
    #[arg(long, default_value_t = 3)]
    pub verbose: u8,
}

impl Cli {
    /// Parse CLI arguments from process args.
    pub fn from_args() -> Self {
        Self::parse()
    }
}
