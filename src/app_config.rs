use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles loading and validating the settings shared by the
/// parser, the navigator and the command line shell.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language of the subtitle track (ISO 639-1 or 639-2)
    #[serde(default = "default_language")]
    pub language: String,

    /// Parser settings
    #[serde(default)]
    pub parser: ParserConfig,

    /// Playback navigation settings
    #[serde(default)]
    pub navigator: NavigatorConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// What to do with an SRT block that does not match the grammar
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MalformedBlockPolicy {
    /// Fail the whole parse on the first bad block
    #[default]
    Abort,
    /// Drop the bad block and keep going
    Skip,
}

impl std::fmt::Display for MalformedBlockPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Abort => write!(f, "abort"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for MalformedBlockPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "skip" => Ok(Self::Skip),
            _ => Err(anyhow!("Invalid malformed block policy: {}", s)),
        }
    }
}

/// Cue parser configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParserConfig {
    // @field: Sniff `<?xml` content as a caption track
    #[serde(default = "default_true")]
    pub xml_captions: bool,

    // @field: Seconds added to every caption track time
    #[serde(default)]
    pub caption_delay_secs: f64,

    // @field: SRT lines with this many lowercase letters or fewer are noise
    #[serde(default = "default_noise_letter_threshold")]
    pub noise_letter_threshold: usize,

    // @field: Abort or skip on malformed SRT blocks
    #[serde(default)]
    pub malformed_block_policy: MalformedBlockPolicy,

    // @field: Language recorded on parsed documents, set from `Config::language`
    #[serde(skip, default = "default_language")]
    pub language: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            xml_captions: true,
            caption_delay_secs: 0.0,
            noise_letter_threshold: default_noise_letter_threshold(),
            malformed_block_policy: MalformedBlockPolicy::default(),
            language: default_language(),
        }
    }
}

/// Subtitle navigator configuration
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct NavigatorConfig {
    /// Distance to a cue end that counts as reaching it, also the step used
    /// when searching backwards for the current cue
    #[serde(default = "default_boundary_tolerance_secs")]
    pub boundary_tolerance_secs: f64,
}

impl NavigatorConfig {
    /// Tolerance for players that tick every few milliseconds
    pub fn precise() -> Self {
        Self {
            boundary_tolerance_secs: 0.01,
        }
    }

    /// Custom tolerance in seconds
    pub fn with_tolerance(boundary_tolerance_secs: f64) -> Self {
        Self { boundary_tolerance_secs }
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            boundary_tolerance_secs: default_boundary_tolerance_secs(),
        }
    }
}

/// Log level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_true() -> bool {
    true
}

fn default_noise_letter_threshold() -> usize {
    2
}

fn default_boundary_tolerance_secs() -> f64 {
    0.1
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration JSON")
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.language)
            .context("Invalid subtitle language")?;

        let tolerance = self.navigator.boundary_tolerance_secs;
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(anyhow!(
                "Boundary tolerance must be a positive number of seconds, got {}",
                tolerance
            ));
        }

        if !self.parser.caption_delay_secs.is_finite() {
            return Err(anyhow!(
                "Caption delay must be finite, got {}",
                self.parser.caption_delay_secs
            ));
        }

        Ok(())
    }

    /// Validate, then rewrite the language to its canonical code ("fre" -> "fr")
    pub fn normalize(&mut self) -> Result<()> {
        self.validate()?;
        self.language = crate::language_utils::normalize_language_code(&self.language)?;
        Ok(())
    }

    /// Parser settings carrying the configured language
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            language: self.language.clone(),
            ..self.parser.clone()
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            language: default_language(),
            parser: ParserConfig::default(),
            navigator: NavigatorConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
