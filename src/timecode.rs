/*!
 * SRT timestamp codec.
 *
 * Timestamps are `H:MM:SS,mmm` strings on the wire and `f64` seconds
 * everywhere else. The millisecond field is read as a literal count of
 * milliseconds whatever its width, so `00:00:01,5` is 1.005s and not 1.5s.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: Timestamp grammar, hours unbounded, ms variable width
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d{2}):(\d{2}),(\d+)$").unwrap()
});

/// Parse an SRT timestamp into seconds
pub fn parse_timestamp(timestamp: &str) -> Result<f64, SubtitleError> {
    let trimmed = timestamp.trim();
    let invalid = || SubtitleError::InvalidTimestamp(trimmed.to_string());

    let caps = TIMESTAMP_REGEX.captures(trimmed).ok_or_else(invalid)?;
    let field = |i: usize| -> Result<u64, SubtitleError> {
        caps.get(i)
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .ok_or_else(invalid)
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    // Summed in whole milliseconds so a single division gives the nearest f64
    let total_ms = hours
        .checked_mul(3_600)
        .and_then(|h| h.checked_add(minutes * 60 + seconds))
        .and_then(|s| s.checked_mul(1_000))
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(invalid)?;

    Ok(total_ms as f64 / 1_000.0)
}

/// Format seconds as an SRT timestamp (HH:MM:SS,mmm)
pub fn format_timestamp(seconds: f64) -> String {
    let ms = if seconds.is_finite() && seconds > 0.0 {
        (seconds * 1_000.0).round() as u64
    } else {
        0
    };

    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let secs = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}
