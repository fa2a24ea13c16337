use std::fmt;

use log::{debug, error};
use tokio::task::JoinHandle;

use crate::app_config::ParserConfig;
use crate::parser::{self, Dialect};
use crate::timecode;

// @module: Parsed subtitle timeline

// @struct: One timed caption unit
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    // @field: Sequence number as written in the source
    pub index: usize,

    // @field: Start time in seconds
    pub start: f64,

    // @field: End time in seconds
    pub end: f64,

    // @field: Display lines, in source order
    pub texts: Vec<String>,
}

impl Cue {
    pub fn new(index: usize, start: f64, end: f64, texts: Vec<String>) -> Self {
        Cue {
            index,
            start,
            end,
            texts,
        }
    }

    /// Lines joined with newlines
    pub fn text(&self) -> String {
        self.texts.join("\n")
    }

    /// Whether `time` lies strictly inside the cue
    pub fn contains(&self, time: f64) -> bool {
        self.start < time && time < self.end
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.index)?;
        writeln!(
            f,
            "{} --> {}",
            timecode::format_timestamp(self.start),
            timecode::format_timestamp(self.end)
        )?;
        for line in &self.texts {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

/// All cues parsed from one subtitle source
///
/// Cues stay in file order; nothing is sorted or renumbered. A document is
/// never modified after it has been loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDocument {
    items: Vec<Cue>,
    dialect: Dialect,
    language: String,
}

impl SubtitleDocument {
    /// Parse subtitle content into a document.
    ///
    /// Parse errors are logged and produce an empty document, so playback can
    /// carry on without subtitles.
    pub fn load(content: &str, config: &ParserConfig) -> Self {
        let dialect = parser::detect_dialect(content, config);

        let items = match parser::parse_as(dialect, content, config) {
            Ok(items) => items,
            Err(e) => {
                error!("Discarding subtitles, {} content failed to parse: {}", dialect, e);
                Vec::new()
            }
        };

        debug!("Loaded {} {} cues ({})", items.len(), dialect, config.language);

        SubtitleDocument {
            items,
            dialect,
            language: config.language.clone(),
        }
    }

    /// Wrap already parsed cues
    pub fn from_cues(items: Vec<Cue>, dialect: Dialect, language: &str) -> Self {
        SubtitleDocument {
            items,
            dialect,
            language: language.to_string(),
        }
    }

    /// Parse on the blocking pool
    pub async fn load_async(content: String, config: ParserConfig) -> Self {
        let language = config.language.clone();
        match tokio::task::spawn_blocking(move || Self::load(&content, &config)).await {
            Ok(document) => document,
            Err(e) => {
                error!("Subtitle parsing task failed: {}", e);
                Self::from_cues(Vec::new(), Dialect::Srt, &language)
            }
        }
    }

    /// Parse on the blocking pool and hand the result to `on_complete`.
    ///
    /// Must be called from within a tokio runtime. Dropping the handle does
    /// not stop the parse; the callback still runs.
    pub fn build<F>(content: String, config: ParserConfig, on_complete: F) -> JoinHandle<()>
    where
        F: FnOnce(SubtitleDocument) + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let document = Self::load(&content, &config);
            on_complete(document);
        })
    }

    pub fn items(&self) -> &[Cue] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cue> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Position of the first cue, in document order, containing `time`
    pub fn position_at(&self, time: f64) -> Option<usize> {
        self.items.iter().position(|cue| cue.contains(time))
    }

    /// First cue, in document order, containing `time`
    pub fn cue_at(&self, time: f64) -> Option<&Cue> {
        self.position_at(time).map(|pos| &self.items[pos])
    }

    /// Serialize the cues back to SRT
    pub fn to_srt(&self) -> String {
        self.items.iter().map(Cue::to_string).collect()
    }
}

impl<'a> IntoIterator for &'a SubtitleDocument {
    type Item = &'a Cue;
    type IntoIter = std::slice::Iter<'a, Cue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Document")?;
        writeln!(f, "Format: {}", self.dialect)?;
        writeln!(f, "Language: {}", self.language)?;
        writeln!(f, "Cues: {}", self.items.len())?;
        Ok(())
    }
}
