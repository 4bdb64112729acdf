/*!
 * Tests for the SRT loader adapter and its decode fallback chain
 */

use jimakudeck::errors::LoaderError;
use jimakudeck::subtitle_loader::{SrtLoader, SubtitleLoader};
use crate::common;

#[test]
fn test_load_withValidSrt_shouldParseAllCues() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_subtitle(temp_dir.path(), "test.srt").unwrap();

    let events = SrtLoader.load(&path, "utf-8").unwrap();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0].start_ms, 1000);
    assert_eq!(events[0].end_ms, 4000);
    assert_eq!(events[0].text, "This is a test subtitle.");
    assert_eq!(events[2].text, "For testing purposes.");
}

#[test]
fn test_load_withMultilineCue_shouldJoinTextWithNewline() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = "1\n00:00:01,000 --> 00:00:02,000\nFirst line\nSecond line\n";
    let path = common::create_test_file(temp_dir.path(), "multi.srt", content).unwrap();

    let events = SrtLoader.load(&path, "utf-8").unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, "First line\nSecond line");
}

#[test]
fn test_load_withMissingFile_shouldFailWithIoError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = temp_dir.path().join("does_not_exist.srt");

    let result = SrtLoader.load(&path, "utf-8");
    assert!(matches!(result, Err(LoaderError::Io { .. })));
}

#[test]
fn test_load_withNoCues_shouldFailWithNoCuesError() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(temp_dir.path(), "empty.srt", "not a subtitle\n").unwrap();

    let result = SrtLoader.load(&path, "utf-8");
    assert!(matches!(result, Err(LoaderError::NoCues(_))));
}

/// Latin-1 bytes decode through the hint encoding
#[test]
fn test_load_withLatin1Content_shouldDecodeViaHint() {
    let temp_dir = common::create_temp_dir().unwrap();
    // "café" with a latin-1 encoded é (0xE9)
    let mut content = b"1\n00:00:01,000 --> 00:00:02,000\ncaf".to_vec();
    content.push(0xE9);
    content.push(b'\n');
    let path = common::create_test_file_bytes(temp_dir.path(), "latin1.srt", &content).unwrap();

    let events = SrtLoader.load(&path, "latin-1").unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, "café");
}

/// With a utf-8 hint, undecodable bytes degrade to replacement characters
/// instead of failing the track
#[test]
fn test_load_withInvalidUtf8AndUtf8Hint_shouldDecodeLossily() {
    let temp_dir = common::create_temp_dir().unwrap();
    let mut content = b"1\n00:00:01,000 --> 00:00:02,000\nbroken ".to_vec();
    content.push(0xFF);
    content.push(b'\n');
    let path = common::create_test_file_bytes(temp_dir.path(), "broken.srt", &content).unwrap();

    let events = SrtLoader.load(&path, "utf-8").unwrap();

    assert_eq!(events.len(), 1);
    assert!(events[0].text.starts_with("broken "));
    assert!(events[0].text.contains('\u{FFFD}'));
}

#[test]
fn test_load_withUnsupportedHint_shouldFailForNonUtf8Content() {
    let temp_dir = common::create_temp_dir().unwrap();
    let mut content = b"1\n00:00:01,000 --> 00:00:02,000\nbad ".to_vec();
    content.push(0xFF);
    let path = common::create_test_file_bytes(temp_dir.path(), "bad.srt", &content).unwrap();

    let result = SrtLoader.load(&path, "shift-jis");
    assert!(matches!(result, Err(LoaderError::UnsupportedEncoding(_))));
}

/// A cue whose end precedes its start is skipped, the rest of the file loads
#[test]
fn test_load_withInvalidTimeRange_shouldSkipCueAndContinue() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = "1\n00:00:05,000 --> 00:00:04,000\nbackwards\n\n2\n00:00:06,000 --> 00:00:07,000\nfine\n";
    let path = common::create_test_file(temp_dir.path(), "mixed.srt", content).unwrap();

    let events = SrtLoader.load(&path, "utf-8").unwrap();

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].text, "fine");
}

/// Cues without text survive loading; dropping them is the normalizer's call
#[test]
fn test_load_withEmptyCue_shouldKeepEventWithEmptyText() {
    let temp_dir = common::create_temp_dir().unwrap();
    let content = "1\n00:00:01,000 --> 00:00:02,000\n\n2\n00:00:03,000 --> 00:00:04,000\nspoken\n";
    let path = common::create_test_file(temp_dir.path(), "gap.srt", content).unwrap();

    let events = SrtLoader.load(&path, "utf-8").unwrap();

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].text, "");
    assert_eq!(events[1].text, "spoken");
}
