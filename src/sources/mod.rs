//! Where the SDN XML document comes from.
//!
//! The pipeline only needs "give me the document as text", so sources sit
//! behind the [`DocumentSource`] trait:
//!   * [`HttpSource`] performs one blocking HTTPS GET with a timeout
//!   * [`FileSource`] reads a previously downloaded document from disk
//!
//! Neither source retries. A non-200 status or a transport failure is
//! returned as an error and ends the run.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::debug;

use crate::errors::{BlocklistError, IoResultExt, Result};

/// Published location of the SDN advanced XML list.
pub const SDN_ADVANCED_XML_URL: &str =
    "https://www.treasury.gov/ofac/downloads/sanctions/1.0/sdn_advanced.xml";

/// Supplies the raw XML document.
pub trait DocumentSource {
    /// Human-readable origin used in log and error messages.
    fn name(&self) -> String;

    fn fetch(&self) -> Result<String>;
}

/// Downloads the document over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BlocklistError::network("client setup", &url, e))?;
        Ok(Self { url, client })
    }
}

impl DocumentSource for HttpSource {
    fn name(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<String> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| BlocklistError::network("GET", &self.url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BlocklistError::fetch_status(&self.url, status.as_u16()));
        }

        response
            .text()
            .map_err(|e| BlocklistError::network("read body", &self.url, e))
    }
}

/// Reads the document from a local file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        fs::read_to_string(&self.path).with_path(self.name(), "read")
    }
}
