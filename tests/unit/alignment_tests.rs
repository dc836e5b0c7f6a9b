/*!
 * Tests for subtitle alignment
 */

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use cinefluent::alignment::{self, Aligner, AlignmentConfig, MIN_CONFIDENCE};
use cinefluent::subtitle_parser::{self, TimedLine};

use crate::common;

/// Test identical intervals with different text
#[test]
fn test_align_withIdenticalIntervals_shouldMatchWithFullConfidence() {
    let source = vec![TimedLine::new(1, 0, 1000, "Hello")];
    let target = vec![TimedLine::new(1, 0, 1000, "Hallo")];

    let pairs = alignment::align(&source, &target);

    assert_eq!(pairs.len(), 1);
    assert!((pairs[0].confidence - 1.0).abs() < 1e-9);
    assert_eq!(pairs[0].source_text, "Hello");
    assert_eq!(pairs[0].target_text, "Hallo");
}

/// Test that a target line is never matched twice
#[test]
fn test_align_withCompetingSources_shouldConsumeEachTargetOnce() {
    let source = vec![
        TimedLine::new(1, 0, 1000, "one"),
        TimedLine::new(2, 100, 1000, "two"),
        TimedLine::new(3, 200, 1100, "three"),
    ];
    let target = vec![
        TimedLine::new(1, 0, 1000, "eins"),
        TimedLine::new(2, 150, 1050, "zwei"),
    ];

    let pairs = alignment::align(&source, &target);

    let used: HashSet<&str> = pairs.iter().map(|p| p.target_text.as_str()).collect();
    assert_eq!(used.len(), pairs.len());
    assert!(pairs.len() <= target.len());
}

/// Test the pair interval is the overlap of both lines
#[test]
fn test_align_shouldUseOverlapAsInterval() {
    let source = vec![TimedLine::new(1, 1000, 4000, "a")];
    let target = vec![TimedLine::new(1, 1500, 4500, "b")];

    let pairs = alignment::align(&source, &target);

    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].start_ms, pairs[0].end_ms), (1500, 4000));
}

/// Test that lines outside the tolerance never match
#[test]
fn test_align_withStartsBeyondTolerance_shouldNotMatch() {
    let aligner = Aligner::new(AlignmentConfig { tolerance_ms: 500 });
    let source = vec![TimedLine::new(1, 0, 1000, "a")];
    let target = vec![TimedLine::new(1, 600, 1600, "b")];

    assert!(aligner.align(&source, &target).is_empty());
}

/// Test the sample scene end to end
#[test]
fn test_align_withSampleScene_shouldMatchEveryLineInOrder() {
    let source = subtitle_parser::parse(common::SOURCE_SRT);
    let target = subtitle_parser::parse(common::TARGET_SRT);

    let (pairs, stats) = Aligner::with_defaults().align_with_stats(&source, &target);

    assert_eq!(pairs.len(), 8);
    assert_eq!(stats.unmatched_source, 0);
    assert_eq!(stats.unmatched_target, 0);
    assert!(pairs.iter().all(|p| p.confidence > MIN_CONFIDENCE && p.confidence <= 1.0));
    assert_eq!(pairs[3].target_text, "Wasser findet immer seinen Weg.");
}

/// Test empty input on either side
#[test]
fn test_align_withEmptyTrack_shouldReturnNoPairs() {
    let lines = vec![TimedLine::new(1, 0, 1000, "a")];

    assert!(alignment::align(&lines, &[]).is_empty());
    assert!(alignment::align(&[], &lines).is_empty());
}

fn random_track(rng: &mut StdRng, prefix: &str, count: usize) -> Vec<TimedLine> {
    (0..count)
        .map(|i| {
            let start_ms = rng.random_range(0..30_000);
            let end_ms = start_ms + rng.random_range(1..4000);
            TimedLine::new(i + 1, start_ms, end_ms, format!("{} {}", prefix, i))
        })
        .collect()
}

/// Test on seeded random tracks that no target line is paired twice
#[test]
fn test_align_withRandomTracks_shouldNeverReuseTargetLine() {
    let aligner = Aligner::new(AlignmentConfig { tolerance_ms: 2000 });

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let source_count = rng.random_range(0..25);
        let target_count = rng.random_range(0..25);
        let source = random_track(&mut rng, "src", source_count);
        let target = random_track(&mut rng, "tgt", target_count);

        let (pairs, stats) = aligner.align_with_stats(&source, &target);

        let used: HashSet<&str> = pairs.iter().map(|p| p.target_text.as_str()).collect();
        assert_eq!(used.len(), pairs.len(), "seed {}", seed);
        assert!(pairs.len() <= source.len().min(target.len()), "seed {}", seed);
        assert_eq!(stats.unmatched_target, target.len() - pairs.len(), "seed {}", seed);
        assert!(
            pairs.iter().all(|p| p.confidence > MIN_CONFIDENCE && p.confidence <= 1.0),
            "seed {}",
            seed
        );
    }
}
