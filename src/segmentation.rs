/*!
 * Grouping of aligned pairs into time-bounded segments.
 *
 * Two modes are supported:
 * - fixed-duration windows, where a pair belongs to every window it overlaps
 * - custom breakpoints, where a pair belongs only to a window fully containing it
 */

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::alignment::AlignedPair;

/// Default fixed window width (one minute)
pub const DEFAULT_SEGMENT_DURATION_MS: u64 = 60_000;

/// How a segment was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentType {
    Minute,
    Custom,
}

impl std::fmt::Display for SegmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minute => write!(f, "minute"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

/// A time window of aligned pairs; the unit of lesson generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub index: usize,
    pub start_ms: u64,
    pub end_ms: u64,
    #[serde(rename = "type")]
    pub segment_type: SegmentType,
    pub pairs: Vec<AlignedPair>,
}

/// Segmentation strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SegmentationMode {
    /// Sliding windows of a fixed width
    Fixed { duration_ms: u64 },
    /// Windows between consecutive sorted breakpoints
    Custom {
        breakpoints_ms: Vec<u64>,
        /// Window width used when the breakpoints are empty or unsorted
        #[serde(default = "default_fallback_duration_ms")]
        fallback_duration_ms: u64,
    },
}

fn default_fallback_duration_ms() -> u64 {
    DEFAULT_SEGMENT_DURATION_MS
}

impl Default for SegmentationMode {
    fn default() -> Self {
        Self::Fixed {
            duration_ms: DEFAULT_SEGMENT_DURATION_MS,
        }
    }
}

/// Splits aligned pairs into segments.
#[derive(Debug, Clone)]
pub struct Segmenter {
    segment_duration_ms: u64,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_DURATION_MS)
    }
}

impl Segmenter {
    /// Create a segmenter with the given fixed window width. Zero falls back to one minute.
    pub fn new(segment_duration_ms: u64) -> Self {
        let segment_duration_ms = if segment_duration_ms == 0 {
            warn!("Segment duration of 0 ms is not usable, using {} ms", DEFAULT_SEGMENT_DURATION_MS);
            DEFAULT_SEGMENT_DURATION_MS
        } else {
            segment_duration_ms
        };

        Self { segment_duration_ms }
    }

    pub fn segment_duration_ms(&self) -> u64 {
        self.segment_duration_ms
    }

    /// Segment according to `mode`.
    pub fn segment(pairs: &[AlignedPair], mode: &SegmentationMode) -> Vec<Segment> {
        match mode {
            SegmentationMode::Fixed { duration_ms } => Self::new(*duration_ms).fixed_segments(pairs),
            SegmentationMode::Custom { breakpoints_ms, fallback_duration_ms } => {
                Self::new(*fallback_duration_ms).custom_segments(pairs, breakpoints_ms)
            }
        }
    }

    /// Fixed-width windows starting at the earliest pair start.
    ///
    /// A pair is included in every window it overlaps. Empty windows are
    /// skipped without consuming an index, and segment bounds are the min/max
    /// of the included pairs rather than the window bounds.
    pub fn fixed_segments(&self, pairs: &[AlignedPair]) -> Vec<Segment> {
        let (Some(first_start), Some(last_end)) = (
            pairs.iter().map(|p| p.start_ms).min(),
            pairs.iter().map(|p| p.end_ms).max(),
        ) else {
            return Vec::new();
        };

        let mut segments = Vec::new();
        let mut window_start = first_start;

        while window_start < last_end {
            let window_end = window_start + self.segment_duration_ms;

            let window_pairs: Vec<AlignedPair> = pairs
                .iter()
                .filter(|p| p.start_ms < window_end && p.end_ms > window_start)
                .cloned()
                .collect();

            if let Some(segment) = Self::bounded_segment(segments.len(), window_pairs) {
                segments.push(segment);
            }

            window_start = window_end;
        }

        debug!(
            "Created {} fixed segments of {} ms from {} pairs",
            segments.len(),
            self.segment_duration_ms,
            pairs.len()
        );
        segments
    }

    /// Windows between consecutive breakpoints.
    ///
    /// A pair is included only if it lies entirely inside the window. Empty
    /// windows are dropped, and the index is the breakpoint position, so it
    /// may skip values. Empty or unsorted breakpoints fall back to fixed
    /// segmentation.
    pub fn custom_segments(&self, pairs: &[AlignedPair], breakpoints_ms: &[u64]) -> Vec<Segment> {
        if breakpoints_ms.is_empty() || !breakpoints_ms.windows(2).all(|w| w[0] <= w[1]) {
            warn!("Breakpoints are empty or unsorted, falling back to fixed segmentation");
            return self.fixed_segments(pairs);
        }

        let segments: Vec<Segment> = breakpoints_ms
            .windows(2)
            .enumerate()
            .filter_map(|(index, window)| {
                let (window_start, window_end) = (window[0], window[1]);

                let window_pairs: Vec<AlignedPair> = pairs
                    .iter()
                    .filter(|p| p.start_ms >= window_start && p.end_ms <= window_end)
                    .cloned()
                    .collect();

                if window_pairs.is_empty() {
                    return None;
                }

                Some(Segment {
                    index,
                    start_ms: window_start,
                    end_ms: window_end,
                    segment_type: SegmentType::Custom,
                    pairs: window_pairs,
                })
            })
            .collect();

        debug!(
            "Created {} custom segments from {} breakpoints",
            segments.len(),
            breakpoints_ms.len()
        );
        segments
    }

    fn bounded_segment(index: usize, pairs: Vec<AlignedPair>) -> Option<Segment> {
        let start_ms = pairs.iter().map(|p| p.start_ms).min()?;
        let end_ms = pairs.iter().map(|p| p.end_ms).max()?;

        Some(Segment {
            index,
            start_ms,
            end_ms,
            segment_type: SegmentType::Minute,
            pairs,
        })
    }
}
