/*!
 * Common test utilities for the cuetrack test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use cuetrack::{NavigatorConfig, ParserConfig, SubtitleDocument, SubtitleNavigator};

/// Two cues from the reference example
pub const HELLO_GOODBYE_SRT: &str =
    "1\n00:00:01,000 --> 00:00:03,500\nHello world\n\n2\n00:00:04,000 --> 00:00:06,000\nGoodbye\n";

/// Three back to back cues used by the navigation tests
pub const THREE_CUES_SRT: &str = r#"1
00:00:01,000 --> 00:00:04,000
This is a test subtitle.

2
00:00:05,000 --> 00:00:09,000
It contains multiple entries.

3
00:00:10,000 --> 00:00:14,000
For testing purposes.
"#;

/// Caption track where the first cue is trimmed by its sibling
pub const CAPTION_TRACK_XML: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<transcript>
  <text start="1.0" dur="2.0">Hello &amp;amp; welcome</text>
  <text start="2.5" dur="1.5">I&amp;#39;m glad you&amp;#39;re here</text>
</transcript>
"#;

/// Route library logs to the test harness when RUST_LOG is set
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample subtitle file for testing
pub fn create_test_subtitle(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, THREE_CUES_SRT)
}

/// Document parsed with default settings
pub fn document(content: &str) -> SubtitleDocument {
    SubtitleDocument::load(content, &ParserConfig::default())
}

/// Navigator over `content` with the given boundary tolerance
pub fn navigator(content: &str, tolerance: f64) -> SubtitleNavigator {
    SubtitleNavigator::new(document(content), NavigatorConfig::with_tolerance(tolerance))
}

/// Float comparison for computed seconds
pub fn assert_secs(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}s, got {}s",
        expected,
        actual
    );
}
