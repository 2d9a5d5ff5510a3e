//! Configuration management for sdn-blocklist.
//!
//! Settings start from defaults, are overridden by environment variables and
//! then by command-line flags, and are validated before the run starts.

use std::path::PathBuf;
use std::time::Duration;

use crate::allow_list::AllowList;
use crate::sources::SDN_ADVANCED_XML_URL;

/// Main configuration structure.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the XML document comes from
    pub source: SourceConfig,

    /// Token extraction and categorization settings
    pub extraction: ExtractionConfig,

    /// Where the blocklists are written
    pub output: OutputConfig,
}

/// Document source settings
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// URL of the SDN advanced XML document
    pub url: String,

    /// Timeout for the whole HTTP request
    pub timeout: Duration,

    /// Read this file instead of downloading
    pub input_file: Option<PathBuf>,
}

/// Extraction settings
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Elements whose local name ends with this are skipped
    pub coded_value_suffix: String,

    /// Public suffixes whose hosts never qualify
    pub excluded_suffixes: Vec<String>,

    /// Registrable domains kept off the domain blocklists
    pub allow_list: AllowList,
}

/// Output settings
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Directory receiving the four blocklist files
    pub directory: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: SDN_ADVANCED_XML_URL.to_string(),
            timeout: Duration::from_secs(30),
            input_file: None,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            coded_value_suffix: "Value".to_string(),
            excluded_suffixes: vec!["gov".to_string(), "mil".to_string()],
            allow_list: AllowList::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("SDN_BLOCKLIST_SOURCE_URL") {
            config.source.url = url;
        }

        if let Some(timeout) = lookup("SDN_BLOCKLIST_TIMEOUT_SECS")
            && let Ok(secs) = timeout.trim().parse::<u64>()
        {
            config.source.timeout = Duration::from_secs(secs);
        }

        if let Some(dir) = lookup("SDN_BLOCKLIST_OUTPUT_DIR") {
            config.output.directory = PathBuf::from(dir);
        }

        if let Some(extra) = lookup("SDN_BLOCKLIST_EXTRA_ALLOWED") {
            config.extraction.allow_list = config
                .extraction
                .allow_list
                .extend(extra.split(','));
        }

        config
    }

    /// Merge with CLI arguments, giving CLI precedence
    pub fn merge_with_cli(&mut self, cli: &crate::cli::Cli) {
        if let Some(ref url) = cli.url {
            self.source.url = url.clone();
        }

        if let Some(ref input) = cli.input {
            self.source.input_file = Some(input.clone());
        }

        if let Some(secs) = cli.timeout {
            self.source.timeout = Duration::from_secs(secs);
        }

        if let Some(ref dir) = cli.output_dir {
            self.output.directory = dir.clone();
        }

        if !cli.allow.is_empty() {
            self.extraction.allow_list = self.extraction.allow_list.clone().extend(&cli.allow);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: "source.timeout".to_string(),
                value: "0".to_string(),
                reason: "Timeout must be greater than 0".to_string(),
            });
        }

        if self.source.input_file.is_none() {
            let url = self.source.url.to_ascii_lowercase();
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::InvalidValue {
                    field: "source.url".to_string(),
                    value: self.source.url.clone(),
                    reason: "URL must use http or https".to_string(),
                });
            }
        }

        if self.extraction.coded_value_suffix.is_empty() {
            return Err(ConfigError::MissingRequired {
                field: "extraction.coded_value_suffix".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    /// Missing required configuration
    MissingRequired { field: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue {
                field,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for '{}': {}", value, field, reason)
            }
            ConfigError::MissingRequired { field } => {
                write!(f, "Missing required configuration field: {}", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
