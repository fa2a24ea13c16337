/*!
 * Tests for subtitle document loading and lookups
 */

use std::sync::mpsc;
use std::time::Duration;

use cuetrack::app_config::{MalformedBlockPolicy, ParserConfig};
use cuetrack::document::{Cue, SubtitleDocument};
use cuetrack::parser::{self, Dialect};

use crate::common::{self, assert_secs};

#[test]
fn test_load_withSrtContent_shouldExposeCuesInFileOrder() {
    let document = common::document(common::THREE_CUES_SRT);

    assert_eq!(document.len(), 3);
    assert!(!document.is_empty());
    assert_eq!(document.dialect(), Dialect::Srt);
    assert_eq!(document.language(), "en");

    let indices: Vec<usize> = document.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
    assert_eq!(document.items()[1].text(), "It contains multiple entries.");
}

#[test]
fn test_load_withCaptionTrack_shouldRecordDialect() {
    let document = common::document(common::CAPTION_TRACK_XML);
    assert_eq!(document.dialect(), Dialect::CaptionTrack);
    assert_eq!(document.len(), 2);
}

/// A single bad block empties the whole document
#[test]
fn test_load_withMalformedBlock_shouldYieldEmptyDocument() {
    common::init_logging();
    let content = format!("{}\n\n99\nnot a timestamp\ntext\n", common::THREE_CUES_SRT);
    let document = common::document(&content);

    assert!(document.is_empty());
    assert_eq!(document.dialect(), Dialect::Srt);
}

#[test]
fn test_load_withSkipPolicy_shouldKeepValidCues() {
    let config = ParserConfig {
        malformed_block_policy: MalformedBlockPolicy::Skip,
        ..ParserConfig::default()
    };
    let content = format!("{}\n\n99\nnot a timestamp\ntext\n", common::THREE_CUES_SRT);
    let document = SubtitleDocument::load(&content, &config);

    assert_eq!(document.len(), 3);
}

#[test]
fn test_load_withConfiguredLanguage_shouldRecordIt() {
    let config = ParserConfig {
        language: "ja".to_string(),
        ..ParserConfig::default()
    };
    let document = SubtitleDocument::load(common::HELLO_GOODBYE_SRT, &config);
    assert_eq!(document.language(), "ja");
}

#[test]
fn test_cueAt_withOverlappingCues_shouldReturnFirstInDocumentOrder() {
    let document = SubtitleDocument::from_cues(
        vec![
            Cue::new(1, 5.0, 10.0, vec!["later but first".into()]),
            Cue::new(2, 0.0, 20.0, vec!["wide".into()]),
        ],
        Dialect::Srt,
        "en",
    );

    assert_eq!(document.cue_at(7.0).map(|c| c.index), Some(1));
    assert_eq!(document.cue_at(3.0).map(|c| c.index), Some(2));
    assert_eq!(document.position_at(12.0), Some(1));
    assert_eq!(document.cue_at(25.0), None);
}

#[test]
fn test_cueAt_atExactBoundaries_shouldMiss() {
    let document = common::document(common::HELLO_GOODBYE_SRT);
    assert!(document.cue_at(1.0).is_none());
    assert!(document.cue_at(3.5).is_none());
    assert_eq!(document.cue_at(3.49).map(|c| c.index), Some(1));
}

#[test]
fn test_toSrt_withParsedDocument_shouldRoundTrip() {
    let document = common::document(common::THREE_CUES_SRT);
    let exported = document.to_srt();

    assert!(exported.starts_with("1\n00:00:01,000 --> 00:00:04,000\nThis is a test subtitle.\n\n"));

    let reparsed = parser::parse(&exported, &ParserConfig::default()).unwrap();
    assert_eq!(reparsed, document.items());
}

#[test]
fn test_toSrt_withCaptionTrack_shouldConvertToSrt() {
    let document = common::document(common::CAPTION_TRACK_XML);
    let exported = document.to_srt();

    assert!(exported.contains("1\n00:00:01,000 --> 00:00:02,490\nHello & welcome\n"));
    assert!(exported.contains("2\n00:00:02,500 --> 00:00:04,000\nI'm glad you're here\n"));
}

#[test]
fn test_display_withDocument_shouldSummarize() {
    let document = common::document(common::HELLO_GOODBYE_SRT);
    let summary = document.to_string();
    assert!(summary.contains("Format: srt"));
    assert!(summary.contains("Cues: 2"));
}

#[tokio::test]
async fn test_loadAsync_withSrtContent_shouldMatchSyncLoad() {
    let config = ParserConfig::default();
    let expected = SubtitleDocument::load(common::THREE_CUES_SRT, &config);

    let document = SubtitleDocument::load_async(common::THREE_CUES_SRT.to_string(), config).await;
    assert_eq!(document, expected);
}

#[test]
fn test_loadAsync_onCurrentThreadRuntime_shouldParse() {
    let document = tokio_test::block_on(SubtitleDocument::load_async(
        common::CAPTION_TRACK_XML.to_string(),
        ParserConfig::default(),
    ));

    assert_eq!(document.dialect(), Dialect::CaptionTrack);
    assert_eq!(document.items()[0].text(), "Hello & welcome");
    assert_secs(document.items()[0].duration(), 1.49);
}

#[tokio::test]
async fn test_build_withCallback_shouldDeliverDocumentOnce() {
    let (tx, rx) = mpsc::channel();

    let handle = SubtitleDocument::build(
        common::HELLO_GOODBYE_SRT.to_string(),
        ParserConfig::default(),
        move |document| {
            tx.send(document).unwrap();
        },
    );
    handle.await.unwrap();

    let document = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(document.len(), 2);
    assert_secs(document.items()[0].end, 3.5);
    assert!(rx.try_recv().is_err());
}
