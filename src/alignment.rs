/*!
 * Timing-based alignment of two subtitle tracks.
 *
 * Lines are matched greedily: every source line, in order, takes the best
 * still-unused target line whose start lies within the tolerance. A target
 * line is never reused, and nothing is revisited once matched, so the result
 * is not an optimal assignment.
 */

use log::debug;
use serde::{Deserialize, Serialize};

use crate::subtitle_parser::TimedLine;

/// Minimum confidence a candidate must exceed to be matched
pub const MIN_CONFIDENCE: f64 = 0.3;

const OVERLAP_WEIGHT: f64 = 0.5;
const TIME_WEIGHT: f64 = 0.3;
const DURATION_WEIGHT: f64 = 0.2;

/// A matched source/target line pair.
///
/// The interval is the overlap of the two lines, not their union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPair {
    pub start_ms: u64,
    pub end_ms: u64,
    pub source_text: String,
    pub target_text: String,
    pub confidence: f64,
}

/// Configuration for alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    /// Maximum start-time difference for two lines to be compared
    #[serde(default = "default_tolerance_ms")]
    pub tolerance_ms: u64,
}

fn default_tolerance_ms() -> u64 {
    2000
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            tolerance_ms: default_tolerance_ms(),
        }
    }
}

/// Summary of one alignment run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignmentStats {
    pub matched: usize,
    pub unmatched_source: usize,
    pub unmatched_target: usize,
    pub mean_confidence: f64,
}

/// Greedy timing aligner.
#[derive(Debug, Clone)]
pub struct Aligner {
    config: AlignmentConfig,
}

impl Aligner {
    /// Create a new aligner with the given configuration.
    pub fn new(config: AlignmentConfig) -> Self {
        Self { config }
    }

    /// Create an aligner with the default 2000 ms tolerance.
    pub fn with_defaults() -> Self {
        Self::new(AlignmentConfig::default())
    }

    pub fn tolerance_ms(&self) -> u64 {
        self.config.tolerance_ms
    }

    /// Overlapping duration divided by the shorter of the two durations.
    pub fn overlap_ratio(a: &TimedLine, b: &TimedLine) -> f64 {
        let start = a.start_ms.max(b.start_ms);
        let end = a.end_ms.min(b.end_ms);
        let overlap = end.saturating_sub(start);

        let shorter = a.duration_ms().min(b.duration_ms());
        if shorter == 0 {
            return 0.0;
        }

        overlap as f64 / shorter as f64
    }

    /// Weighted confidence that `source` and `target` are the same utterance.
    pub fn confidence(&self, source: &TimedLine, target: &TimedLine) -> f64 {
        let overlap = Self::overlap_ratio(source, target);

        let start_diff = source.start_ms.abs_diff(target.start_ms);
        let time_score = if self.config.tolerance_ms == 0 {
            // Only identical starts get past the tolerance filter
            if start_diff == 0 { 1.0 } else { 0.0 }
        } else {
            (1.0 - start_diff as f64 / self.config.tolerance_ms as f64).max(0.0)
        };

        let source_duration = source.duration_ms();
        let target_duration = target.duration_ms();
        let longer = source_duration.max(target_duration);
        let duration_score = if longer == 0 {
            1.0
        } else {
            source_duration.min(target_duration) as f64 / longer as f64
        };

        overlap * OVERLAP_WEIGHT + time_score * TIME_WEIGHT + duration_score * DURATION_WEIGHT
    }

    /// Align two tracks. Source lines without a qualifying match are dropped.
    pub fn align(&self, source: &[TimedLine], target: &[TimedLine]) -> Vec<AlignedPair> {
        self.align_with_stats(source, target).0
    }

    /// Align two tracks and report how many lines on each side went unmatched.
    pub fn align_with_stats(
        &self,
        source: &[TimedLine],
        target: &[TimedLine],
    ) -> (Vec<AlignedPair>, AlignmentStats) {
        let mut consumed = vec![false; target.len()];
        let mut pairs = Vec::new();

        for source_line in source {
            let mut best: Option<(usize, f64)> = None;

            for (i, target_line) in target.iter().enumerate() {
                if consumed[i] {
                    continue;
                }
                if source_line.start_ms.abs_diff(target_line.start_ms) > self.config.tolerance_ms {
                    continue;
                }

                let confidence = self.confidence(source_line, target_line);
                let best_so_far = best.map_or(0.0, |(_, c)| c);
                if confidence > best_so_far && confidence > MIN_CONFIDENCE {
                    best = Some((i, confidence));
                }
            }

            if let Some((i, confidence)) = best {
                let target_line = &target[i];
                consumed[i] = true;
                pairs.push(AlignedPair {
                    start_ms: source_line.start_ms.max(target_line.start_ms),
                    end_ms: source_line.end_ms.min(target_line.end_ms),
                    source_text: source_line.text.clone(),
                    target_text: target_line.text.clone(),
                    confidence,
                });
            }
        }

        let mean_confidence = if pairs.is_empty() {
            0.0
        } else {
            pairs.iter().map(|p| p.confidence).sum::<f64>() / pairs.len() as f64
        };
        let stats = AlignmentStats {
            matched: pairs.len(),
            unmatched_source: source.len() - pairs.len(),
            unmatched_target: target.len() - pairs.len(),
            mean_confidence,
        };

        debug!(
            "Aligned {} pairs ({} source / {} target lines unmatched, mean confidence {:.2})",
            stats.matched, stats.unmatched_source, stats.unmatched_target, stats.mean_confidence
        );

        (pairs, stats)
    }
}

impl Default for Aligner {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Align with the default tolerance.
pub fn align(source: &[TimedLine], target: &[TimedLine]) -> Vec<AlignedPair> {
    Aligner::with_defaults().align(source, target)
}
