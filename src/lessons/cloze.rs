use super::tokens::{char_len, strip_punctuation};
use super::{Lesson, LessonGenerator, LessonItem, LessonType};
use crate::alignment::AlignedPair;
use crate::segmentation::Segment;

// @module: Fill-in-the-blank lessons over target sentences

const MAX_QUESTIONS: usize = 4;
const BLANK: &str = "______";

impl LessonGenerator {
    /// Cloze questions over the first four pairs. The first and last words are never blanked.
    pub fn generate_cloze(&self, segment: &Segment) -> Lesson {
        let items = segment
            .pairs
            .iter()
            .take(MAX_QUESTIONS)
            .filter_map(|pair| self.cloze_item(pair))
            .collect();

        Lesson::scored_per_item(segment.index, LessonType::Cloze, items)
    }

    fn cloze_item(&self, pair: &AlignedPair) -> Option<LessonItem> {
        let words: Vec<&str> = pair.target_text.split_whitespace().collect();
        let last = words.len().checked_sub(1)?;

        let blank_index = (1..last).find(|&j| {
            let clean = strip_punctuation(&words[j].to_lowercase());
            char_len(&clean) > 3 && !self.target_stop_words.contains(&clean.as_str())
        })?;

        let mut cloze_words = words.clone();
        cloze_words[blank_index] = BLANK;

        Some(LessonItem::new(
            format!("Fill in the blank: {}", cloze_words.join(" ")),
            strip_punctuation(words[blank_index]),
            format!("{} context: \"{}\"", self.source_name, pair.source_text),
        ))
    }
}
