use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::app_config::ParserConfig;
use crate::document::Cue;
use crate::markup;
use crate::parser::strip_bom;

// @module: XML timed-text caption tracks
//
// <?xml version="1.0" encoding="utf-8" ?>
// <transcript>
//   <text start="1.0" dur="2.0">Hello &amp;amp; welcome</text>
//   <text start="2.5" dur="1.5">...</text>
// </transcript>

/// Gap left between a cue and the sibling that follows it
pub const SIBLING_GAP_SECS: f64 = 0.01;

/// A direct child of `transcript`, before timing is resolved
#[derive(Debug, Clone, PartialEq)]
struct CaptionElement {
    start: Option<f64>,
    dur: Option<f64>,
    // @field: XML text content, CDATA included verbatim
    body: String,
}

/// Parse an XML caption track into cues.
///
/// Each cue ends just before its next sibling starts; only the last element
/// falls back to its own `dur`. Elements without usable `start` and `dur`
/// are skipped. Times are shifted by `caption_delay_secs`.
pub fn parse_caption_track(content: &str, config: &ParserConfig) -> Vec<Cue> {
    let Some(elements) = transcript_children(strip_bom(content)) else {
        warn!("Caption track has no <transcript> element");
        return Vec::new();
    };

    let delay = config.caption_delay_secs;
    let mut cues = Vec::with_capacity(elements.len());

    for (i, element) in elements.iter().enumerate() {
        let (Some(start), Some(dur)) = (element.start, element.dur) else {
            debug!("Skipping caption element {} without start/dur", i + 1);
            continue;
        };

        let end = match elements.get(i + 1).and_then(|next| next.start) {
            Some(next_start) => next_start - SIBLING_GAP_SECS,
            None => start + dur,
        };

        let text = markup::html_to_text(&element.body);
        cues.push(Cue::new(cues.len() + 1, start + delay, end + delay, vec![text]));
    }

    debug!("Parsed {} caption cues from {} elements", cues.len(), elements.len());
    cues
}

/// Direct child elements of the first `transcript` element, in document order.
///
/// Returns `None` when there is no `transcript` element. Comments and
/// processing instructions are not elements and never become children. The
/// XML must be well-formed; reading stops at the first error and keeps the
/// children completed before it.
fn transcript_children(xml: &str) -> Option<Vec<CaptionElement>> {
    let mut reader = Reader::from_str(xml);
    let mut children = Vec::new();
    let mut found = false;
    let mut depth = 0usize;
    let mut open: Option<CaptionElement> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                warn!(
                    "Caption track is not well-formed near byte {}: {}",
                    reader.buffer_position(),
                    e
                );
                break;
            }
        };

        match event {
            Event::Start(tag) if !found => {
                found = is_transcript(&tag);
            }
            Event::Empty(tag) if !found => {
                if is_transcript(&tag) {
                    return Some(children);
                }
            }
            Event::Start(tag) => {
                if depth == 0 {
                    open = Some(caption_element(&tag));
                }
                depth += 1;
            }
            Event::Empty(tag) => {
                if depth == 0 {
                    children.push(caption_element(&tag));
                }
            }
            Event::End(_) if found => {
                if depth == 0 {
                    // </transcript>
                    break;
                }
                depth -= 1;
                if depth == 0 {
                    children.extend(open.take());
                }
            }
            Event::Text(text) => {
                if let Some(element) = open.as_mut() {
                    element
                        .body
                        .push_str(&markup::unescape_xml(&String::from_utf8_lossy(&text)));
                }
            }
            Event::CData(cdata) => {
                if let Some(element) = open.as_mut() {
                    element.body.push_str(&String::from_utf8_lossy(&cdata));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if open.is_some() {
        warn!("Caption track ends inside an unclosed element");
    }

    found.then_some(children)
}

fn is_transcript(tag: &BytesStart) -> bool {
    tag.local_name().as_ref() == b"transcript"
}

fn caption_element(tag: &BytesStart) -> CaptionElement {
    CaptionElement {
        start: seconds_attr(tag, b"start"),
        dur: seconds_attr(tag, b"dur"),
        body: String::new(),
    }
}

fn seconds_attr(tag: &BytesStart, wanted: &[u8]) -> Option<f64> {
    tag.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == wanted)
        .and_then(|attr| {
            markup::unescape_xml(&String::from_utf8_lossy(&attr.value))
                .trim()
                .parse::<f64>()
                .ok()
        })
        .filter(|value| value.is_finite())
}
