use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::errors::SubtitleError;

// @module: SRT parsing into timed lines

// @const: SRT timecode line, start and end captured in four groups each
static TIMECODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @const: Markup tags such as <i>, </b>, <font color="...">
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

// @struct: Single timed subtitle line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedLine {
    // @field: Index line of the source block
    pub seq_num: usize,

    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Normalized text
    pub text: String,
}

impl TimedLine {
    /// Creates a timed line without validation
    pub fn new(seq_num: usize, start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        TimedLine {
            seq_num,
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    // @creates: Validated timed line
    // @validates: end > start and non-empty text
    pub fn new_validated(seq_num: usize, start_ms: u64, end_ms: u64, text: &str) -> Option<Self> {
        if end_ms <= start_ms {
            warn!(
                "Skipping subtitle block {}: end time {} <= start time {}",
                seq_num, end_ms, start_ms
            );
            return None;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("Skipping subtitle block {}: empty text after cleanup", seq_num);
            return None;
        }

        Some(TimedLine::new(seq_num, start_ms, end_ms, trimmed))
    }

    /// Line duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }

    /// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64, SubtitleError> {
        let invalid = || SubtitleError::InvalidTimestamp(timestamp.to_string());

        let parts: Vec<&str> = timestamp.trim().split(&[':', ','][..]).collect();
        if parts.len() != 4 {
            return Err(invalid());
        }

        let mut values = [0u64; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.parse().map_err(|_| invalid())?;
        }
        let [hours, minutes, seconds, millis] = values;

        if minutes >= 60 || seconds >= 60 || millis >= 1000 {
            return Err(invalid());
        }

        Ok(to_millis(hours, minutes, seconds, millis))
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

impl fmt::Display for TimedLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(
            f,
            "{} --> {}",
            Self::format_timestamp(self.start_ms),
            Self::format_timestamp(self.end_ms)
        )?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

fn to_millis(hours: u64, minutes: u64, seconds: u64, millis: u64) -> u64 {
    hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis
}

/// Parse the timecode captures starting at `start_idx` to milliseconds
fn captures_to_ms(caps: &regex::Captures, start_idx: usize) -> u64 {
    let field = |offset: usize| -> u64 {
        caps.get(start_idx + offset)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0))
    };

    to_millis(field(0), field(1), field(2), field(3))
}

fn parse_timecode_line(line: &str) -> Option<(u64, u64)> {
    TIMECODE_REGEX
        .captures(line)
        .map(|caps| (captures_to_ms(&caps, 1), captures_to_ms(&caps, 5)))
}

fn parse_index_line(line: &str) -> Option<usize> {
    if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    line.parse().ok()
}

/// Strip markup tags and fold the block's lines into one space-separated string
pub fn clean_text(raw_lines: &[String]) -> String {
    let joined = raw_lines.join("\n");
    let stripped = TAG_REGEX.replace_all(&joined, "");

    stripped
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Block being assembled while scanning lines
struct PendingBlock {
    seq_num: usize,
    timing: Option<(u64, u64)>,
    text: Vec<String>,
}

impl PendingBlock {
    fn finish(self, lines: &mut Vec<TimedLine>) {
        let Some((start_ms, end_ms)) = self.timing else {
            warn!("Subtitle block {} has no timecode line, skipping", self.seq_num);
            return;
        };

        let text = clean_text(&self.text);
        if let Some(line) = TimedLine::new_validated(self.seq_num, start_ms, end_ms, &text) {
            lines.push(line);
        }
    }
}

/// Parse SRT content into timed lines, in file order.
///
/// Content without any well-formed block yields an empty vector; callers that
/// need to tell "empty" apart from "malformed" use [`parse_strict`].
pub fn parse(content: &str) -> Vec<TimedLine> {
    match parse_strict(content) {
        Ok(lines) => lines,
        Err(e) => {
            warn!("{}", e);
            Vec::new()
        }
    }
}

/// Parse SRT content, reporting [`SubtitleError::NoBlocks`] when nothing was recognized
pub fn parse_strict(content: &str) -> Result<Vec<TimedLine>, SubtitleError> {
    let mut lines = Vec::new();
    let mut blocks_seen = 0usize;
    let mut pending: Option<PendingBlock> = None;

    let mut raw_lines = content
        .lines()
        .map(|line| line.trim_start_matches('\u{feff}').trim())
        .peekable();

    while let Some(line) = raw_lines.next() {
        pending = match pending.take() {
            None => {
                // Waiting for an index line
                match parse_index_line(line) {
                    Some(seq_num) => Some(PendingBlock { seq_num, timing: None, text: Vec::new() }),
                    None => {
                        if !line.is_empty() {
                            debug!("Ignoring stray line outside of a subtitle block: {}", line);
                        }
                        None
                    }
                }
            }
            Some(mut block) if block.timing.is_none() => {
                match parse_timecode_line(line) {
                    Some(timing) => {
                        block.timing = Some(timing);
                        blocks_seen += 1;
                        Some(block)
                    }
                    None => {
                        debug!("Block {} is missing its timecode line", block.seq_num);
                        // The line might itself open the next block
                        parse_index_line(line)
                            .map(|seq_num| PendingBlock { seq_num, timing: None, text: Vec::new() })
                    }
                }
            }
            Some(mut block) => {
                if line.is_empty() {
                    block.finish(&mut lines);
                    None
                } else if let Some(seq_num) = parse_index_line(line)
                    .filter(|_| raw_lines.peek().is_some_and(|next| parse_timecode_line(next).is_some()))
                {
                    // Missing blank separator: index followed by timecode starts a new block
                    block.finish(&mut lines);
                    Some(PendingBlock { seq_num, timing: None, text: Vec::new() })
                } else {
                    block.text.push(line.to_string());
                    Some(block)
                }
            }
        };
    }

    if let Some(block) = pending {
        if block.timing.is_some() {
            block.finish(&mut lines);
        }
    }

    if blocks_seen == 0 {
        return Err(SubtitleError::NoBlocks);
    }

    debug!("Parsed {} timed lines from {} blocks", lines.len(), blocks_seen);
    Ok(lines)
}
