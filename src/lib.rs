/*!
 * # cuetrack - subtitle timeline engine for language practice
 *
 * A Rust library that turns subtitle files into a timeline of cues and
 * answers the questions a media player asks while practising with them.
 *
 * ## Features
 *
 * - Parse SRT subtitles, including CRLF files and HTML-formatted cues
 * - Parse XML caption tracks (`<transcript>` timed text)
 * - Drop noise lines and empty cues
 * - Look up the cue showing at a given time
 * - Detect cue ends for auto-pause, once per boundary
 * - Seek to the next, previous or current cue
 * - Export cues back to SRT
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timecode`: SRT timestamp parsing and formatting
 * - `markup`: HTML tag stripping and entity decoding
 * - `parser`: dialect detection and cue parsing:
 *   - `parser::srt`: SubRip blocks
 *   - `parser::caption_track`: XML caption tracks
 * - `document`: the immutable cue timeline of one source
 * - `navigator`: playback state over a document
 * - `app_config`: configuration management
 * - `language_utils`: ISO language code utilities
 * - `file_utils`: file system operations for the command line shell
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod document;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod markup;
pub mod navigator;
pub mod parser;
pub mod timecode;

// Re-export main types for easier usage
pub use app_config::{Config, MalformedBlockPolicy, NavigatorConfig, ParserConfig};
pub use document::{Cue, SubtitleDocument};
pub use errors::{AppError, SubtitleError};
pub use navigator::SubtitleNavigator;
pub use parser::Dialect;
pub use timecode::{format_timestamp, parse_timestamp};
