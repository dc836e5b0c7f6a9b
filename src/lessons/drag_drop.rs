use rand::Rng;
use rand::seq::SliceRandom;

use super::{Lesson, LessonGenerator, LessonItem, LessonType};
use crate::segmentation::Segment;

// @module: Word-order (drag and drop) lessons

const MAX_QUESTIONS: usize = 3;
const MIN_WORDS: usize = 4;

impl LessonGenerator {
    /// Shuffled word-order questions over the first three pairs with at least four target words.
    pub fn generate_drag_drop<R: Rng + ?Sized>(&self, segment: &Segment, rng: &mut R) -> Lesson {
        let mut items = Vec::new();

        for pair in segment.pairs.iter().take(MAX_QUESTIONS) {
            let words: Vec<&str> = pair.target_text.split_whitespace().collect();
            if words.len() < MIN_WORDS {
                continue;
            }

            let mut shuffled = words.clone();
            shuffled.shuffle(rng);

            items.push(LessonItem::new(
                format!(
                    "Arrange these {} words in the correct order:\n{}",
                    self.target_name,
                    shuffled.join(" | ")
                ),
                words.join(" "),
                format!("{}: \"{}\"", self.source_name, pair.source_text),
            ));
        }

        Lesson::scored_per_item(segment.index, LessonType::DragDrop, items)
    }
}
