/*!
 * Exercise generation for subtitle segments.
 *
 * Every segment yields four lessons, always in the same order:
 *
 * - `vocab`: vocabulary multiple choice (`vocab_mcq`)
 * - `cloze`: fill in the blank
 * - `matching`: match source lines to shuffled target lines (`match_lines`)
 * - `drag_drop`: restore the word order of a shuffled target sentence
 *
 * Shuffling draws from a caller-supplied random source so that a fixed seed
 * reproduces the same lessons. Generated items are structurally valid; they
 * are not checked for linguistic correctness.
 */

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::language_utils;
use crate::segmentation::Segment;

pub mod cloze;
pub mod drag_drop;
pub mod matching;
pub mod tokens;
pub mod vocab;

/// Exercise kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    VocabMcq,
    Cloze,
    MatchLines,
    DragDrop,
}

impl LessonType {
    /// All lesson types in generation order
    pub const ALL: [LessonType; 4] = [
        LessonType::VocabMcq,
        LessonType::Cloze,
        LessonType::MatchLines,
        LessonType::DragDrop,
    ];

    /// Points awarded per scoring unit (item, or pair for matching)
    pub fn points_per_unit(&self) -> u32 {
        match self {
            Self::VocabMcq => 10,
            Self::Cloze => 15,
            Self::MatchLines => 5,
            Self::DragDrop => 20,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VocabMcq => "vocab_mcq",
            Self::Cloze => "cloze",
            Self::MatchLines => "match_lines",
            Self::DragDrop => "drag_drop",
        }
    }
}

impl std::fmt::Display for LessonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Item difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

/// One question of a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonItem {
    pub question: String,

    /// Exactly four distinct options for multiple choice, `None` otherwise
    pub options: Option<Vec<String>>,

    pub correct_answer: String,

    pub explanation: String,

    #[serde(default)]
    pub difficulty: Difficulty,
}

impl LessonItem {
    /// Create an item without options and with medium difficulty
    pub fn new(question: String, correct_answer: String, explanation: String) -> Self {
        Self {
            question,
            options: None,
            correct_answer,
            explanation,
            difficulty: Difficulty::default(),
        }
    }

    /// Attach multiple-choice options
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = Some(options);
        self
    }

    /// Generic key/value payload handed to persistence collaborators
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "question": self.question,
            "options": self.options,
            "correct_answer": self.correct_answer,
            "explanation": self.explanation,
            "difficulty": self.difficulty,
        })
    }
}

/// All items of one exercise kind for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub segment_index: usize,
    pub lesson_type: LessonType,
    pub items: Vec<LessonItem>,
    pub total_points: u32,
}

impl Lesson {
    /// Build a lesson scored per item
    pub fn scored_per_item(segment_index: usize, lesson_type: LessonType, items: Vec<LessonItem>) -> Self {
        let total_points = items.len() as u32 * lesson_type.points_per_unit();
        Self {
            segment_index,
            lesson_type,
            items,
            total_points,
        }
    }
}

/// Generates the four lesson kinds for a segment.
#[derive(Debug, Clone)]
pub struct LessonGenerator {
    source_name: String,
    target_name: String,
    source_stop_words: &'static [&'static str],
    target_stop_words: &'static [&'static str],
}

impl Default for LessonGenerator {
    fn default() -> Self {
        Self::new("en", "de")
    }
}

impl LessonGenerator {
    /// Create a generator for a language pair given as ISO 639 codes.
    ///
    /// Unknown codes still work; they are shown verbatim in questions and get
    /// no stop words.
    pub fn new(source_language: &str, target_language: &str) -> Self {
        let display_name = |code: &str| {
            language_utils::get_language_name(code).unwrap_or_else(|_| code.to_uppercase())
        };

        Self {
            source_name: display_name(source_language),
            target_name: display_name(target_language),
            source_stop_words: tokens::stop_words_for(source_language),
            target_stop_words: tokens::stop_words_for(target_language),
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    /// Generate all four lessons for `segment`, in the order of [`LessonType::ALL`].
    ///
    /// Lessons with no items are still returned.
    pub fn generate_all<R: Rng + ?Sized>(&self, segment: &Segment, rng: &mut R) -> Vec<Lesson> {
        let lessons: Vec<Lesson> = LessonType::ALL
            .iter()
            .map(|lesson_type| self.generate(*lesson_type, segment, rng))
            .collect();

        debug!(
            "Segment {}: {}",
            segment.index,
            lessons
                .iter()
                .map(|l| format!("{} x{}", l.lesson_type, l.items.len()))
                .collect::<Vec<_>>()
                .join(", ")
        );

        lessons
    }

    /// Generate a single lesson kind for `segment`.
    pub fn generate<R: Rng + ?Sized>(&self, lesson_type: LessonType, segment: &Segment, rng: &mut R) -> Lesson {
        match lesson_type {
            LessonType::VocabMcq => self.generate_vocab_mcq(segment, rng),
            LessonType::Cloze => self.generate_cloze(segment),
            LessonType::MatchLines => self.generate_match_lines(segment, rng),
            LessonType::DragDrop => self.generate_drag_drop(segment, rng),
        }
    }
}
