/*!
 * Collaborator interfaces for subtitle discovery and language analysis.
 *
 * The lesson pipeline never calls these. They sit beside it so the
 * application can look up subtitle tracks and choose a language pair before
 * a run. Network-backed implementations live outside this crate; the static
 * implementations here serve tests and offline use.
 */

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::errors::CollaboratorError;
use crate::language_utils;

/// One subtitle track returned by a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleSearchResult {
    pub id: String,
    pub movie_title: String,
    #[serde(default)]
    pub year: Option<u16>,
    /// ISO language code of the track
    pub language: String,
    pub language_name: String,
    pub download_url: String,
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub rating: f64,
}

fn default_format() -> String {
    "srt".to_string()
}

/// How hard a language is for the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageDifficulty {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
}

/// Learning recommendation for one available language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageAnalysis {
    pub language_code: String,
    pub language_name: String,
    pub difficulty: LanguageDifficulty,
    pub learning_notes: String,
    pub recommended_as_source: bool,
    pub recommended_as_target: bool,
}

/// Looks up subtitle tracks for a movie title
#[async_trait]
pub trait SubtitleSearch: Send + Sync + Debug {
    /// Search for subtitle tracks matching `query`
    async fn search(&self, query: &str) -> Result<Vec<SubtitleSearchResult>, CollaboratorError>;
}

/// Rates languages as learning sources or targets
#[async_trait]
pub trait LanguageAnalyzer: Send + Sync + Debug {
    /// Analyze each language code in `languages`
    async fn analyze(&self, languages: &[String]) -> Result<Vec<LanguageAnalysis>, CollaboratorError>;
}

/// Pick a (source, target) code pair from analyses.
///
/// Source is the first language recommended as a source; target is the first
/// language recommended as a target whose code differs from the source.
pub fn recommend_pair(analyses: &[LanguageAnalysis]) -> Option<(String, String)> {
    let source = analyses.iter().find(|a| a.recommended_as_source)?;
    let target = analyses.iter().find(|a| {
        a.recommended_as_target
            && a.language_code != source.language_code
            && !language_utils::language_codes_match(&a.language_code, &source.language_code)
    })?;

    Some((source.language_code.clone(), target.language_code.clone()))
}

/// In-memory search over a fixed catalogue
#[derive(Debug, Clone, Default)]
pub struct StaticSubtitleSearch {
    catalogue: Vec<SubtitleSearchResult>,
}

impl StaticSubtitleSearch {
    pub fn new(catalogue: Vec<SubtitleSearchResult>) -> Self {
        Self { catalogue }
    }
}

#[async_trait]
impl SubtitleSearch for StaticSubtitleSearch {
    async fn search(&self, query: &str) -> Result<Vec<SubtitleSearchResult>, CollaboratorError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(CollaboratorError::InvalidResponse("Empty search query".to_string()));
        }

        let mut results: Vec<SubtitleSearchResult> = self
            .catalogue
            .iter()
            .filter(|r| r.movie_title.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        // Most downloaded first
        results.sort_by(|a, b| b.downloads.cmp(&a.downloads));

        debug!("Static search for '{}' returned {} results", query, results.len());
        Ok(results)
    }
}

// (code, difficulty, notes)
const KNOWN_LANGUAGES: &[(&str, LanguageDifficulty, &str)] = &[
    ("en", LanguageDifficulty::Beginner, "Universal language"),
    ("de", LanguageDifficulty::Intermediate, "Good for English speakers"),
    ("fr", LanguageDifficulty::Intermediate, "Romance language with English influence"),
    ("es", LanguageDifficulty::Beginner, "Phonetic and regular grammar"),
    ("it", LanguageDifficulty::Beginner, "Melodic Romance language"),
    ("pt", LanguageDifficulty::Intermediate, "Similar to Spanish"),
    ("ru", LanguageDifficulty::Advanced, "Cyrillic script, complex grammar"),
    ("ja", LanguageDifficulty::Advanced, "Multiple writing systems"),
    ("ko", LanguageDifficulty::Advanced, "Unique grammar structure"),
    ("zh", LanguageDifficulty::Advanced, "Tonal language"),
    ("ar", LanguageDifficulty::Advanced, "Right-to-left script"),
    ("nl", LanguageDifficulty::Intermediate, "Similar to German and English"),
    ("sv", LanguageDifficulty::Intermediate, "Germanic language"),
    ("pl", LanguageDifficulty::Advanced, "Complex grammar"),
    ("tr", LanguageDifficulty::Advanced, "Agglutinative language"),
];

/// Table-driven analyzer relative to the learner's native language
#[derive(Debug, Clone)]
pub struct StaticLanguageAnalyzer {
    native_language: String,
}

impl StaticLanguageAnalyzer {
    pub fn new(native_language: impl Into<String>) -> Self {
        Self {
            native_language: native_language.into(),
        }
    }

    fn analyze_one(&self, code: &str) -> LanguageAnalysis {
        let is_native = language_utils::language_codes_match(code, &self.native_language);
        let known = language_utils::normalize_to_part1_or_part2t(code)
            .ok()
            .and_then(|short| KNOWN_LANGUAGES.iter().find(|(c, _, _)| *c == short));

        let language_name = language_utils::get_language_name(code)
            .unwrap_or_else(|_| code.to_uppercase());

        match known {
            Some((_, difficulty, notes)) => LanguageAnalysis {
                language_code: code.to_string(),
                language_name,
                difficulty: *difficulty,
                learning_notes: notes.to_string(),
                recommended_as_source: is_native,
                recommended_as_target: !is_native,
            },
            None => LanguageAnalysis {
                language_code: code.to_string(),
                language_name,
                difficulty: LanguageDifficulty::Intermediate,
                learning_notes: "Language analysis not available".to_string(),
                recommended_as_source: is_native,
                recommended_as_target: !is_native,
            },
        }
    }
}

impl Default for StaticLanguageAnalyzer {
    fn default() -> Self {
        Self::new("en")
    }
}

#[async_trait]
impl LanguageAnalyzer for StaticLanguageAnalyzer {
    async fn analyze(&self, languages: &[String]) -> Result<Vec<LanguageAnalysis>, CollaboratorError> {
        Ok(languages.iter().map(|code| self.analyze_one(code)).collect())
    }
}
