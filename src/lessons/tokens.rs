/*!
 * Tokenizing helpers and per-language stop words for exercise generation.
 */

use crate::language_utils;

/// Punctuation removed before tokens are compared
const STRIPPED_PUNCTUATION: [char; 3] = [',', '.', '!'];

const ENGLISH_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "have", "has", "do", "does", "will", "would",
];

const GERMAN_STOP_WORDS: &[&str] = &[
    "der", "die", "das", "ein", "eine", "ist", "sind", "war", "waren", "haben", "hat",
];

/// Stop words for a language code; languages without a list get an empty one.
pub fn stop_words_for(language: &str) -> &'static [&'static str] {
    match language_utils::normalize_to_part1_or_part2t(language).as_deref() {
        Ok("en") => ENGLISH_STOP_WORDS,
        Ok("de") => GERMAN_STOP_WORDS,
        _ => &[],
    }
}

/// Remove `,` `.` `!` from a word or sentence.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !STRIPPED_PUNCTUATION.contains(c)).collect()
}

/// Lowercase, strip punctuation and split on whitespace.
pub fn tokenize(text: &str) -> Vec<String> {
    strip_punctuation(&text.to_lowercase())
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Length in characters, not bytes, so umlauts count once.
pub fn char_len(word: &str) -> usize {
    word.chars().count()
}
