use log::{debug, trace, warn};

use crate::app_config::{MalformedBlockPolicy, ParserConfig};
use crate::document::Cue;
use crate::errors::SubtitleError;
use crate::markup;
use crate::parser::strip_bom;
use crate::timecode;

// @module: SubRip block parsing

/// Split SRT content into raw blocks.
///
/// CRLF separators are tried first; LF is only used when CRLF finds nothing
/// to split on, so a file is never split twice.
pub fn split_blocks(content: &str) -> Vec<&str> {
    let blocks: Vec<&str> = content.split("\r\n\r\n").collect();
    if blocks.len() == 1 {
        content.split("\n\n").collect()
    } else {
        blocks
    }
}

/// Parse SRT content into cues.
///
/// With `MalformedBlockPolicy::Abort` the first bad block fails the whole
/// parse. Cues whose every line is filtered as noise are left out.
pub fn parse_srt(content: &str, config: &ParserConfig) -> Result<Vec<Cue>, SubtitleError> {
    let content = strip_bom(content);
    let mut cues = Vec::new();
    let mut block_num = 0;

    for raw in split_blocks(content) {
        if raw.trim().is_empty() {
            continue;
        }
        block_num += 1;

        let block = match parse_block(raw, block_num) {
            Ok(block) => block,
            Err(e) => match config.malformed_block_policy {
                MalformedBlockPolicy::Abort => return Err(e),
                MalformedBlockPolicy::Skip => {
                    warn!("Skipping unreadable subtitle block: {}", e);
                    continue;
                }
            },
        };

        let texts: Vec<String> = block
            .lines
            .iter()
            .map(|line| markup::html_to_text(line))
            .filter(|line| !is_noise_line(line, config.noise_letter_threshold))
            .collect();

        if texts.is_empty() {
            trace!("Dropping cue {}: no readable text", block.index);
            continue;
        }

        cues.push(Cue::new(block.index, block.start, block.end, texts));
    }

    debug!("Parsed {} SRT cues from {} blocks", cues.len(), block_num);
    Ok(cues)
}

/// A line is noise when it keeps `threshold` or fewer lowercase letters
/// once lowercased and stripped of everything else.
pub fn is_noise_line(line: &str, threshold: usize) -> bool {
    let letters = line
        .to_lowercase()
        .chars()
        .filter(|c| c.is_lowercase())
        .count();
    letters <= threshold
}

/// Fields of one block before text cleanup
#[derive(Debug)]
struct RawBlock<'a> {
    index: usize,
    start: f64,
    end: f64,
    lines: Vec<&'a str>,
}

fn parse_block(raw: &str, block_num: usize) -> Result<RawBlock<'_>, SubtitleError> {
    let mut scanner = BlockScanner::new(raw);

    let index = scanner
        .integer()
        .ok_or_else(|| SubtitleError::malformed(block_num, "missing cue index"))?;

    let start = scanner
        .word()
        .ok_or_else(|| SubtitleError::malformed(block_num, "missing start time"))?;
    let start = timecode::parse_timestamp(start)?;

    if !scanner.literal("-->") {
        return Err(SubtitleError::malformed(block_num, "missing '-->' separator"));
    }

    let end = scanner
        .rest_of_line()
        .ok_or_else(|| SubtitleError::malformed(block_num, "missing end time"))?;
    let end = timecode::parse_timestamp(end)?;

    let lines: Vec<&str> = scanner.remaining().lines().collect();
    if lines.iter().all(|line| line.trim().is_empty()) {
        return Err(SubtitleError::malformed(block_num, "missing cue text"));
    }

    Ok(RawBlock {
        index,
        start,
        end,
        lines,
    })
}

/// Token reader over one block; every token skips leading whitespace first
struct BlockScanner<'a> {
    rest: &'a str,
}

impl<'a> BlockScanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| !keep(*c))
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        token
    }

    fn integer(&mut self) -> Option<usize> {
        self.skip_whitespace();
        self.take_while(|c| c.is_ascii_digit()).parse().ok()
    }

    fn word(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let token = self.take_while(|c| !c.is_whitespace());
        (!token.is_empty()).then_some(token)
    }

    fn literal(&mut self, expected: &str) -> bool {
        self.skip_whitespace();
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn rest_of_line(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let token = self.take_while(|c| c != '\n' && c != '\r').trim_end();
        let rest = self.rest;
        self.rest = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .or_else(|| rest.strip_prefix('\r'))
            .unwrap_or(rest);
        (!token.is_empty()).then_some(token)
    }

    fn remaining(&self) -> &'a str {
        self.rest
    }
}
