use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Lesson, LessonGenerator, LessonItem, LessonType};
use crate::segmentation::Segment;

// @module: Line matching lessons

/// Fewer pairs than this produce no item
const MIN_PAIRS: usize = 3;
const MAX_PAIRS: usize = 5;

impl LessonGenerator {
    /// One combined matching item over the first five pairs.
    ///
    /// The answer key is a JSON object from source line number to target
    /// letter, e.g. `{"1":"C","2":"A","3":"B"}`. Points are per pair used,
    /// also when too few pairs leave the lesson without an item.
    pub fn generate_match_lines<R: Rng + ?Sized>(&self, segment: &Segment, rng: &mut R) -> Lesson {
        let pairs: Vec<_> = segment.pairs.iter().take(MAX_PAIRS).collect();
        let total_points = pairs.len() as u32 * LessonType::MatchLines.points_per_unit();

        if pairs.len() < MIN_PAIRS {
            return Lesson {
                segment_index: segment.index,
                lesson_type: LessonType::MatchLines,
                items: Vec::new(),
                total_points,
            };
        }

        // Shuffle positions rather than texts so repeated lines keep distinct letters
        let mut order: Vec<usize> = (0..pairs.len()).collect();
        order.shuffle(rng);

        let mut question = vec![
            format!(
                "Match the {} lines with their {} translations:",
                self.source_name, self.target_name
            ),
            format!("\n{}:", self.source_name),
        ];
        for (i, pair) in pairs.iter().enumerate() {
            question.push(format!("{}. {}", i + 1, pair.source_text));
        }
        question.push(format!("\n{}:", self.target_name));
        for (slot, &pair_index) in order.iter().enumerate() {
            question.push(format!("{}. {}", letter(slot), pairs[pair_index].target_text));
        }

        let answer_key: BTreeMap<String, String> = order
            .iter()
            .enumerate()
            .map(|(slot, &pair_index)| ((pair_index + 1).to_string(), letter(slot).to_string()))
            .collect();
        let correct_answer = serde_json::to_string(&answer_key).unwrap_or_default();

        let item = LessonItem::new(
            question.join("\n"),
            correct_answer,
            format!(
                "Match each {} line with its {} translation based on meaning.",
                self.source_name, self.target_name
            ),
        );

        Lesson {
            segment_index: segment.index,
            lesson_type: LessonType::MatchLines,
            items: vec![item],
            total_points,
        }
    }
}

fn letter(slot: usize) -> char {
    (b'A' + slot as u8) as char
}
