//! Unified error handling for the blocklist pipeline.
//!
//! Every failure the run can hit is a typed `thiserror` variant:
//!   * Fetch failures (non-200 status, transport errors)
//!   * XML failures (malformed documents, forbidden entity declarations)
//!   * Empty results (nothing extracted, nothing categorized)
//!   * Output and configuration problems
//!
//! Per-token noise (bad octets, unknown suffixes) is never an error; the
//! classifier and categorizer simply drop those tokens.
//!
//! Usage:
//!   use sdn_blocklist::errors::{Result, BlocklistError};
//!
//!   fn do_something() -> Result<()> {
//!       Err(BlocklistError::configuration("timeout must be positive"))
//!   }
//!
//! Categories are coarse on purpose and only used in log lines:
//!   - Input: configuration problems
//!   - Network: fetch failures
//!   - Parse: XML decoding problems and empty extraction
//!   - Output: empty blocklists and file writes

use std::io;

use thiserror::Error;

/// High-level classification used when reporting a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Parse,
    Output,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCategory::Input => "input",
            ErrorCategory::Network => "network",
            ErrorCategory::Parse => "parse",
            ErrorCategory::Output => "output",
        };
        f.write_str(s)
    }
}

/// Primary error type.
#[derive(Error, Debug)]
pub enum BlocklistError {
    // ------------------------ Input / Validation ----------------------------
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    // ----------------------------- Network ----------------------------------
    #[error("Fetching {url} returned HTTP {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Network error during {operation} for '{target}': {source}")]
    Network {
        operation: String,
        target: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ---------------------------- Parsing -----------------------------------
    #[error("Malformed XML at byte {position}: {reason}")]
    XmlParse { position: u64, reason: String },

    #[error("XML document declares entities, refusing to expand them")]
    EntitiesForbidden,

    #[error("No URLs or IP addresses extracted from {source_name}")]
    EmptyExtraction { source_name: String },

    // ----------------------------- Output -----------------------------------
    #[error("No content available for blocklists")]
    EmptyOutput,

    #[error("I/O error during {operation} on {path}: {source}")]
    Io {
        path: String,
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl BlocklistError {
    /// Categorize the error for reporting.
    pub fn category(&self) -> ErrorCategory {
        use BlocklistError::*;
        match self {
            Configuration { .. } => ErrorCategory::Input,
            FetchStatus { .. } | Network { .. } => ErrorCategory::Network,
            XmlParse { .. } | EntitiesForbidden | EmptyExtraction { .. } => ErrorCategory::Parse,
            EmptyOutput | Io { .. } => ErrorCategory::Output,
        }
    }

    // ---------------------------- Constructors -----------------------------

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn fetch_status(url: impl Into<String>, status: u16) -> Self {
        Self::FetchStatus {
            url: url.into(),
            status,
        }
    }

    pub fn network(
        operation: impl Into<String>,
        target: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Network {
            operation: operation.into(),
            target: target.into(),
            source: source.into(),
        }
    }

    pub fn xml_parse(position: u64, reason: impl Into<String>) -> Self {
        Self::XmlParse {
            position,
            reason: reason.into(),
        }
    }

    pub fn empty_extraction(source_name: impl Into<String>) -> Self {
        Self::EmptyExtraction {
            source_name: source_name.into(),
        }
    }

    pub fn io(path: impl Into<String>, operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }
}

/// Public result alias.
pub type Result<T> = std::result::Result<T, BlocklistError>;

impl From<crate::config::ConfigError> for BlocklistError {
    fn from(e: crate::config::ConfigError) -> Self {
        BlocklistError::Configuration {
            message: e.to_string(),
        }
    }
}

/// Extension trait for enriching IO results with path + operation context.
pub trait IoResultExt<T> {
    fn with_path(self, path: impl Into<String>, operation: impl Into<String>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::result::Result<T, io::Error> {
    fn with_path(self, path: impl Into<String>, operation: impl Into<String>) -> Result<T> {
        self.map_err(|e| BlocklistError::io(path.into(), operation.into(), e))
    }
}
