/*!
 * Vocabulary multiple-choice lessons.
 *
 * The "translation" of a source word is the target token at the same
 * position in the paired sentence. This assumes both languages share word
 * order, which rarely holds.
 */

use rand::Rng;
use rand::seq::SliceRandom;

use super::tokens::{char_len, tokenize};
use super::{Lesson, LessonGenerator, LessonItem, LessonType};
use crate::alignment::AlignedPair;
use crate::segmentation::Segment;

/// Pairs considered per segment
const MAX_QUESTIONS: usize = 5;

/// Distractors needed next to the correct answer
const DISTRACTOR_COUNT: usize = 3;

impl LessonGenerator {
    /// Vocabulary questions over the first five pairs of the segment.
    pub fn generate_vocab_mcq<R: Rng + ?Sized>(&self, segment: &Segment, rng: &mut R) -> Lesson {
        let items = segment
            .pairs
            .iter()
            .take(MAX_QUESTIONS)
            .enumerate()
            .filter_map(|(i, pair)| self.vocab_item(i, pair, &segment.pairs, rng))
            .collect();

        Lesson::scored_per_item(segment.index, LessonType::VocabMcq, items)
    }

    fn vocab_item<R: Rng + ?Sized>(
        &self,
        pair_index: usize,
        pair: &AlignedPair,
        all_pairs: &[AlignedPair],
        rng: &mut R,
    ) -> Option<LessonItem> {
        let source_tokens = tokenize(&pair.source_text);
        let target_tokens = tokenize(&pair.target_text);

        let (word, translation) = source_tokens
            .iter()
            .enumerate()
            .find(|(j, token)| {
                char_len(token) > 3
                    && !self.source_stop_words.contains(&token.as_str())
                    && *j < target_tokens.len()
            })
            .map(|(j, token)| (token.clone(), target_tokens[j].clone()))?;

        let mut distractors: Vec<String> = Vec::new();
        for (_, other) in all_pairs.iter().enumerate().filter(|(k, _)| *k != pair_index) {
            for token in tokenize(&other.target_text) {
                if token != translation && char_len(&token) > 2 && !distractors.contains(&token) {
                    distractors.push(token);
                }
            }
        }

        if distractors.len() < DISTRACTOR_COUNT {
            return None;
        }

        distractors.shuffle(rng);
        let mut options = vec![translation.clone()];
        options.extend(distractors.into_iter().take(DISTRACTOR_COUNT));
        options.shuffle(rng);

        Some(
            LessonItem::new(
                format!("What does \"{}\" mean in {}?", word, self.target_name),
                translation,
                format!("In the context: \"{}\" → \"{}\"", pair.source_text, pair.target_text),
            )
            .with_options(options),
        )
    }
}
