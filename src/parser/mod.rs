/*!
 * Cue parsing for the supported subtitle dialects.
 *
 * - `srt`: numbered SubRip blocks separated by blank lines
 * - `caption_track`: XML timed-text tracks with a `transcript` root
 *
 * The dialect is sniffed from the content itself; file names and extensions
 * play no part.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::app_config::ParserConfig;
use crate::document::Cue;
use crate::errors::SubtitleError;

pub mod caption_track;
pub mod srt;

const UTF8_BOM: char = '\u{feff}';

/// Source format of a subtitle document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// SubRip text
    Srt,
    /// XML caption track
    CaptionTrack,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Srt => write!(f, "srt"),
            Self::CaptionTrack => write!(f, "caption track"),
        }
    }
}

/// Strip the byte order mark some editors prepend
pub(crate) fn strip_bom(content: &str) -> &str {
    content.strip_prefix(UTF8_BOM).unwrap_or(content)
}

/// Pick the dialect for `content`.
///
/// Anything starting with an XML declaration is a caption track, unless
/// caption support is switched off; everything else is SRT.
pub fn detect_dialect(content: &str, config: &ParserConfig) -> Dialect {
    if config.xml_captions && strip_bom(content).trim_start().starts_with("<?xml") {
        Dialect::CaptionTrack
    } else {
        Dialect::Srt
    }
}

/// Parse content in whichever dialect it sniffs as
pub fn parse(content: &str, config: &ParserConfig) -> Result<Vec<Cue>, SubtitleError> {
    parse_as(detect_dialect(content, config), content, config)
}

/// Parse content in a known dialect
pub fn parse_as(
    dialect: Dialect,
    content: &str,
    config: &ParserConfig,
) -> Result<Vec<Cue>, SubtitleError> {
    match dialect {
        Dialect::Srt => srt::parse_srt(content, config),
        Dialect::CaptionTrack => Ok(caption_track::parse_caption_track(content, config)),
    }
}
