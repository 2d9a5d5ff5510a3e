//! Run orchestration.
//!
//! [`Pipeline`] is the library entry point: source -> qualifying tokens ->
//! categorized sets -> files. [`App`] is the binary's façade on top of it: it
//! builds the configuration from env and CLI, picks the document source,
//! installs logging and turns the outcome into a process exit code.
//!
//! Steps in `Pipeline::run`:
//!   1. Fetch the document and extract qualifying tokens (empty is an error)
//!   2. Categorize tokens into IPs, URLs, FQDNs and registered domains
//!   3. Write the four blocklists (nothing at all when both IPs and URLs are empty)

use tracing::{error, info};

use crate::categorize::{Blocklists, Categorizer};
use crate::classify::extract_from_source;
use crate::cli::Cli;
use crate::config::Config;
use crate::errors::Result;
use crate::logging;
use crate::output::{BlocklistWriter, WrittenBlocklist};
use crate::sources::{DocumentSource, FileSource, HttpSource};

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub tokens: usize,
    pub lists: Blocklists,
    pub written: Vec<WrittenBlocklist>,
}

/// One extraction-to-files pass driven by a [`Config`].
pub struct Pipeline<'a> {
    config: &'a Config,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn run(&self, source: &dyn DocumentSource) -> Result<RunSummary> {
        let urls = extract_from_source(source, &self.config.extraction)?;
        info!("{} unique URLs and IP addresses extracted", urls.len());

        let lists = Categorizer::new(&self.config.extraction.allow_list).categorize(&urls);
        let written = BlocklistWriter::new(&self.config.output.directory).write_all(&lists)?;

        Ok(RunSummary {
            tokens: urls.len(),
            lists,
            written,
        })
    }
}

/// Build the document source a configuration asks for.
pub fn source_for(config: &Config) -> Result<Box<dyn DocumentSource>> {
    Ok(match &config.source.input_file {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(HttpSource::new(&config.source.url, config.source.timeout)?),
    })
}

/// Application façade.
pub struct App;

impl App {
    /// Execute the end-to-end workflow.
    ///
    /// Returns: intended process exit code (0 = blocklists written, 1 = failure).
    pub fn run(cli: &Cli) -> i32 {
        logging::init(cli.verbose);

        let mut config = Config::from_env();
        config.merge_with_cli(cli);

        match Self::execute(&config) {
            Ok(summary) => {
                info!(
                    "{} blocklists written to {}",
                    summary.written.len(),
                    config.output.directory.display()
                );
                0
            }
            Err(e) => {
                error!("{} ({} error)", e, e.category());
                1
            }
        }
    }

    fn execute(config: &Config) -> Result<RunSummary> {
        config.validate()?;
        let source = source_for(config)?;
        Pipeline::new(config).run(source.as_ref())
    }
}
