/*!
 * End-to-end lesson pipeline: parse → align → segment → generate.
 *
 * The pipeline is a pure transform over in-memory subtitle text. It holds
 * no mutable state, so one instance can serve any number of runs, including
 * runs on different threads. All randomness comes from a `StdRng` seeded per
 * run, which makes the output a function of (input, configuration, seed).
 */

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::alignment::{AlignedPair, Aligner, AlignmentStats};
use crate::app_config::Config;
use crate::lessons::{Lesson, LessonGenerator};
use crate::segmentation::{Segment, SegmentationMode, Segmenter};
use crate::subtitle_parser::{self, TimedLine};

/// Movie the subtitles belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieMetadata {
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
}

impl MovieMetadata {
    pub fn new(title: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }

    /// File-name friendly form of the title, e.g. `the-last-airbender-2010`
    pub fn slug(&self) -> String {
        let mut slug = String::new();
        for c in self.title.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        let mut slug = slug.trim_end_matches('-').to_string();
        if let Some(year) = self.year {
            if !slug.is_empty() {
                slug.push('-');
            }
            slug.push_str(&year.to_string());
        }
        if slug.is_empty() {
            slug.push_str("untitled");
        }
        slug
    }
}

/// Lessons generated for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentLessons {
    pub segment_index: usize,
    pub lessons: Vec<Lesson>,
}

/// Full output of a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedMovie {
    pub metadata: MovieMetadata,
    pub source_language: String,
    pub target_language: String,
    /// SHA-256 over both inputs and the seed
    pub fingerprint: String,
    pub segments: Vec<Segment>,
    pub lessons: Vec<SegmentLessons>,
}

impl ProcessedMovie {
    pub fn lesson_count(&self) -> usize {
        self.lessons.iter().map(|s| s.lessons.len()).sum()
    }

    pub fn item_count(&self) -> usize {
        self.lessons
            .iter()
            .flat_map(|s| s.lessons.iter())
            .map(|l| l.items.len())
            .sum()
    }
}

/// Pipeline stages wired with their configuration
#[derive(Debug, Clone)]
pub struct LessonPipeline {
    source_language: String,
    target_language: String,
    aligner: Aligner,
    mode: SegmentationMode,
    generator: LessonGenerator,
    seed: u64,
}

impl LessonPipeline {
    /// Build a pipeline from application configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            aligner: Aligner::new(config.alignment.clone()),
            mode: config.segmentation.mode(),
            generator: LessonGenerator::new(&config.source_language, &config.target_language),
            seed: config.lessons.seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Use a different seed for subsequent runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run every stage on raw subtitle text.
    pub fn run(&self, metadata: MovieMetadata, source_content: &str, target_content: &str) -> ProcessedMovie {
        let source_lines = subtitle_parser::parse(source_content);
        let target_lines = subtitle_parser::parse(target_content);
        debug!(
            "Parsed {} {} lines and {} {} lines",
            source_lines.len(),
            self.source_language,
            target_lines.len(),
            self.target_language
        );

        let fingerprint = self.fingerprint(source_content, target_content);
        self.run_lines(metadata, &source_lines, &target_lines, fingerprint)
    }

    /// Run alignment, segmentation and generation on already parsed lines.
    pub fn run_lines(
        &self,
        metadata: MovieMetadata,
        source_lines: &[TimedLine],
        target_lines: &[TimedLine],
        fingerprint: String,
    ) -> ProcessedMovie {
        let (pairs, stats) = self.align(source_lines, target_lines);
        let segments = Segmenter::segment(&pairs, &self.mode);

        let mut rng = StdRng::seed_from_u64(self.seed);
        let lessons: Vec<SegmentLessons> = segments
            .iter()
            .map(|segment| SegmentLessons {
                segment_index: segment.index,
                lessons: self.generator.generate_all(segment, &mut rng),
            })
            .collect();

        let processed = ProcessedMovie {
            metadata,
            source_language: self.source_language.clone(),
            target_language: self.target_language.clone(),
            fingerprint,
            segments,
            lessons,
        };

        info!(
            "'{}': {} pairs (mean confidence {:.2}), {} segments, {} lessons, {} items",
            processed.metadata.title,
            stats.matched,
            stats.mean_confidence,
            processed.segments.len(),
            processed.lesson_count(),
            processed.item_count()
        );

        processed
    }

    fn align(&self, source_lines: &[TimedLine], target_lines: &[TimedLine]) -> (Vec<AlignedPair>, AlignmentStats) {
        self.aligner.align_with_stats(source_lines, target_lines)
    }

    /// Hex SHA-256 of both inputs and the seed
    pub fn fingerprint(&self, source_content: &str, target_content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(source_content.as_bytes());
        hasher.update([0u8]);
        hasher.update(target_content.as_bytes());
        hasher.update(self.seed.to_le_bytes());
        format!("{:x}", hasher.finalize())
    }
}
