//! Integration tests for sdn-blocklist.
//!
//! These tests run the whole pipeline without touching the network: the
//! library tests use an in-memory document source, and the binary tests
//! point `--input` at a temporary XML file.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str;
use std::thread;

use sdn_blocklist::app::Pipeline;
use sdn_blocklist::config::Config;
use sdn_blocklist::errors::{BlocklistError, Result};
use sdn_blocklist::sources::DocumentSource;
use sdn_blocklist::{AllowList, clean_url};
use tempfile::{NamedTempFile, TempDir};

/// Trimmed-down document in the shape of sdn_advanced.xml.
const SAMPLE_SDN: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Sanctions xmlns="http://www.un.org/sanctions/1.0">
  <DateOfIssue><Year>2024</Year><Month>5</Month></DateOfIssue>
  <ReferenceValueSets>
    <FeatureTypeValues>
      <FeatureType ID="14">Website</FeatureType>
    </FeatureTypeValues>
    <DetailTypeValues>
      <DetailTypeValue>referenced.example.com</DetailTypeValue>
    </DetailTypeValues>
  </ReferenceValueSets>
  <DistinctParties>
    <DistinctParty FixedRef="1001">
      <Comment>Website www.Evil-Sanctioned-Site.ru; alt http://mirror.evil-sanctioned-site.ru/</Comment>
      <Profile>
        <Feature>
          <VersionDetail DetailTypeID="1432">http://sanctioned-exchange.co.uk/trade</VersionDetail>
        </Feature>
        <Feature>
          <VersionDetail DetailTypeID="1432">Email Address ops@gmail.com; backup@protonmail.com.</VersionDetail>
        </Feature>
        <Feature>
          <VersionDetail DetailTypeID="1432">IP 10.0.0.2, 2.2.2.2 and 10.0.0.1 (see www.treasury.gov)</VersionDetail>
        </Feature>
        <Feature>
          <VersionDetail DetailTypeID="1432">Digital Currency Address - XBT 1BoatSLRHtKNngkdXEeobR76b53LETtpyT</VersionDetail>
        </Feature>
        <Feature>
          <VersionDetail>army.mil 2001:db8::7</VersionDetail>
        </Feature>
      </Profile>
    </DistinctParty>
  </DistinctParties>
</Sanctions>"#;

/// In-memory document source.
struct StaticSource(String);

impl StaticSource {
    fn ok(xml: &str) -> Self {
        Self(xml.to_string())
    }
}

impl DocumentSource for StaticSource {
    fn name(&self) -> String {
        "static".to_string()
    }

    fn fetch(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

/// Source that always answers with an HTTP error status.
struct FailingSource(u16);

impl DocumentSource for FailingSource {
    fn name(&self) -> String {
        "https://static.invalid/sdn.xml".to_string()
    }

    fn fetch(&self) -> Result<String> {
        Err(BlocklistError::fetch_status(self.name(), self.0))
    }
}

fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.output.directory = dir.to_path_buf();
    config
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

/// Helper to get the path to the compiled binary
fn get_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // Remove test binary name
    if path.ends_with("deps") {
        path.pop(); // Remove "deps" directory
    }
    path.push("sdn-blocklist");
    path
}

/// Helper to create a temporary XML file with test content
fn create_test_xml(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_pipeline_writes_all_blocklists() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    let summary = Pipeline::new(&config)
        .run(&StaticSource::ok(SAMPLE_SDN))
        .unwrap();
    assert_eq!(summary.written.len(), 4);
    assert_eq!(summary.lists.skipped_ipv6, 1);

    assert_eq!(
        read(dir.path(), "urls.txt"),
        [
            "backup@protonmail.com",
            "http://mirror.evil-sanctioned-site.ru",
            "http://sanctioned-exchange.co.uk/trade",
            "ops@gmail.com",
            "www.Evil-Sanctioned-Site.ru",
        ]
        .join("\n")
    );
    assert_eq!(read(dir.path(), "ips.txt"), "2.2.2.2\n10.0.0.1\n10.0.0.2");
    assert_eq!(
        read(dir.path(), "urls-pihole.txt"),
        "mirror.evil-sanctioned-site.ru\nsanctioned-exchange.co.uk\nwww.evil-sanctioned-site.ru"
    );
    assert_eq!(
        read(dir.path(), "urls-UBL.txt"),
        "*://*.evil-sanctioned-site.ru/*\n*://*.sanctioned-exchange.co.uk/*"
    );
}

#[test]
fn test_coded_values_and_government_hosts_are_ignored() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());
    Pipeline::new(&config)
        .run(&StaticSource::ok(SAMPLE_SDN))
        .unwrap();

    let everything = ["urls.txt", "urls-pihole.txt", "urls-UBL.txt"]
        .iter()
        .map(|name| read(dir.path(), name))
        .collect::<Vec<_>>()
        .join("\n");
    assert!(!everything.contains("referenced.example.com"));
    assert!(!everything.contains("treasury.gov"));
    assert!(!everything.contains("army.mil"));
}

#[test]
fn test_allow_list_can_be_substituted() {
    let dir = TempDir::new().unwrap();
    let mut config = config_for(dir.path());
    config.extraction.allow_list = AllowList::new(["evil-sanctioned-site.ru"]);

    Pipeline::new(&config)
        .run(&StaticSource::ok(SAMPLE_SDN))
        .unwrap();
    assert_eq!(
        read(dir.path(), "urls-UBL.txt"),
        "*://*.gmail.com/*\n*://*.protonmail.com/*\n*://*.sanctioned-exchange.co.uk/*"
    );
}

#[test]
fn test_fetch_failure_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    let err = Pipeline::new(&config)
        .run(&FailingSource(503))
        .unwrap_err();
    assert!(matches!(err, BlocklistError::FetchStatus { status: 503, .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_malformed_xml_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    let err = Pipeline::new(&config)
        .run(&StaticSource::ok("<Sanctions><Comment>www.bad.ru</Sanctions>"))
        .unwrap_err();
    assert!(matches!(err, BlocklistError::XmlParse { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_document_without_hosts_is_empty_extraction() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    let err = Pipeline::new(&config)
        .run(&StaticSource::ok("<Sanctions><Name>Nobody In Particular</Name></Sanctions>"))
        .unwrap_err();
    assert!(matches!(err, BlocklistError::EmptyExtraction { .. }));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_only_ipv6_is_empty_output() {
    let dir = TempDir::new().unwrap();
    let config = config_for(dir.path());

    let err = Pipeline::new(&config)
        .run(&StaticSource::ok("<Sanctions><Note>2001:db8::1</Note></Sanctions>"))
        .unwrap_err();
    assert!(matches!(err, BlocklistError::EmptyOutput));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_normalizer_examples() {
    assert_eq!(clean_url("https://Example.com/path/"), "Example.com/path");
    assert_eq!(clean_url("HTTP://foo.bar///"), "foo.bar");
    let once = clean_url(" \u{FEFF}http://https://x.example/ ");
    assert_eq!(clean_url(&once), once);
}

/// Binary run against a local document
#[test]
fn test_binary_with_input_file() {
    let xml = create_test_xml(SAMPLE_SDN);
    let dir = TempDir::new().unwrap();

    let output = Command::new(get_binary_path())
        .arg("--input")
        .arg(xml.path())
        .arg("--output-dir")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(
        stderr.contains("3 IPs written to ips.txt at"),
        "missing summary line: {stderr}"
    );
    assert!(stderr.contains("-UTC"), "missing timestamp: {stderr}");
    assert_eq!(read(dir.path(), "ips.txt"), "2.2.2.2\n10.0.0.1\n10.0.0.2");
}

/// Binary exits non-zero and writes nothing when extraction fails
#[test]
fn test_binary_fails_on_unusable_document() {
    let xml = create_test_xml("<Sanctions><Name>Nobody</Name></Sanctions>");
    let dir = TempDir::new().unwrap();

    let output = Command::new(get_binary_path())
        .arg("--input")
        .arg(xml.path())
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--verbose=1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(
        stderr.contains("No URLs or IP addresses extracted"),
        "unexpected stderr: {stderr}"
    );
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Serve a single 503 response on a loopback port and return its URL
fn serve_unavailable() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);
            let _ = stream.write_all(
                b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            );
        }
    });
    format!("http://{addr}/sdn_advanced.xml")
}

/// Binary exits non-zero on a non-200 response
#[test]
fn test_binary_fails_on_unavailable_source() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(get_binary_path())
        .arg("--url")
        .arg(serve_unavailable())
        .arg("--timeout")
        .arg("5")
        .arg("--output-dir")
        .arg(dir.path())
        .arg("--verbose=1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    let stderr = str::from_utf8(&output.stderr).unwrap();
    assert!(stderr.contains("503"), "unexpected stderr: {stderr}");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Binary exits non-zero when the source cannot be reached
#[test]
fn test_binary_fails_on_unreachable_source() {
    let dir = TempDir::new().unwrap();

    let output = Command::new(get_binary_path())
        .arg("--url")
        .arg("http://127.0.0.1:1/sdn_advanced.xml")
        .arg("--timeout")
        .arg("2")
        .arg("--output-dir")
        .arg(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Invalid arguments are rejected by clap
#[test]
fn test_binary_rejects_conflicting_sources() {
    let output = Command::new(get_binary_path())
        .arg("--url")
        .arg("https://example.com/sdn.xml")
        .arg("--input")
        .arg("sdn.xml")
        .output()
        .expect("Failed to execute binary");

    assert!(!output.status.success());
}
