/*!
 * Tests for SRT parsing
 */

use cinefluent::errors::SubtitleError;
use cinefluent::subtitle_parser::{self, TimedLine};

use crate::common;

/// Test the canonical single-block example
#[test]
fn test_parse_withSingleBlock_shouldYieldOneTimedLine() {
    let lines = subtitle_parser::parse("1\n00:00:01,000 --> 00:00:03,500\nHello world\n\n");

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].start_ms, 1000);
    assert_eq!(lines[0].end_ms, 3500);
    assert_eq!(lines[0].text, "Hello world");
}

/// Test parsing with Windows line endings
#[test]
fn test_parse_withCrlfLineEndings_shouldParseAllBlocks() {
    let content = "1\r\n00:00:01,000 --> 00:00:02,000\r\nFirst\r\n\r\n2\r\n00:00:03,000 --> 00:00:04,000\r\nSecond\r\n";
    let lines = subtitle_parser::parse(content);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "First");
    assert_eq!(lines[1].text, "Second");
}

/// Test parsing when a blank separator line is missing
#[test]
fn test_parse_withMissingSeparator_shouldStartNewBlock() {
    let content = "1\n00:00:01,000 --> 00:00:02,000\nFirst\n2\n00:00:03,000 --> 00:00:04,000\nSecond\n";
    let lines = subtitle_parser::parse(content);

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "First");
    assert_eq!(lines[1].seq_num, 2);
}

/// Test that blocks with inverted timing are dropped
#[test]
fn test_parse_withEndBeforeStart_shouldDropBlock() {
    let content = "1\n00:00:05,000 --> 00:00:04,000\nBackwards\n\n2\n00:00:06,000 --> 00:00:07,000\nForwards\n";
    let lines = subtitle_parser::parse(content);

    assert_eq!(lines, vec![TimedLine::new(2, 6000, 7000, "Forwards")]);
}

/// Test that garbage input yields nothing instead of failing
#[test]
fn test_parse_withGarbage_shouldReturnEmpty() {
    assert!(subtitle_parser::parse("").is_empty());
    assert!(subtitle_parser::parse("not a subtitle file\nat all").is_empty());
}

/// Test the strict variant on unrecognized content
#[test]
fn test_parseStrict_withoutBlocks_shouldReportNoBlocks() {
    let result = subtitle_parser::parse_strict("hello\nworld\n");
    assert!(matches!(result, Err(SubtitleError::NoBlocks)));
}

/// Test the strict variant when every block is dropped
#[test]
fn test_parseStrict_withOnlyEmptyBlocks_shouldReturnEmptyVec() {
    let result = subtitle_parser::parse_strict("1\n00:00:01,000 --> 00:00:02,000\n<i> </i>\n");
    assert!(result.unwrap().is_empty());
}

/// Test the full sample scene
#[test]
fn test_parse_withSampleScene_shouldKeepFileOrderAndCleanMarkup() {
    let lines = subtitle_parser::parse(common::SOURCE_SRT);

    assert_eq!(lines.len(), 8);
    assert!(lines.windows(2).all(|w| w[0].start_ms < w[1].start_ms));
    assert_eq!(lines[4].text, "Tomorrow we leave together.");
    assert!(lines.iter().all(|l| l.end_ms > l.start_ms && !l.text.is_empty()));
}

/// Test timestamp conversion helpers
#[test]
fn test_timestamps_shouldConvertBothWays() {
    assert_eq!(TimedLine::parse_timestamp("01:02:03,456").unwrap(), 3_723_456);
    assert_eq!(TimedLine::format_timestamp(3_723_456), "01:02:03,456");
    assert!(matches!(
        TimedLine::parse_timestamp("01:99:00,000"),
        Err(SubtitleError::InvalidTimestamp(_))
    ));
    assert!(TimedLine::parse_timestamp("1:2:3").is_err());
}

/// Test SRT rendering of a line
#[test]
fn test_display_shouldRenderSrtBlock() {
    let line = TimedLine::new(3, 61_000, 62_500, "Hallo");
    assert_eq!(line.to_string(), "3\n00:01:01,000 --> 00:01:02,500\nHallo\n\n");
}
