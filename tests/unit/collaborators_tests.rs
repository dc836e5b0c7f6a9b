/*!
 * Tests for the search and analysis collaborators
 */

use cinefluent::collaborators::{
    recommend_pair, LanguageAnalyzer, LanguageDifficulty, StaticLanguageAnalyzer, StaticSubtitleSearch,
    SubtitleSearch,
};
use cinefluent::errors::CollaboratorError;

use crate::common::mock_collaborators::{search_result, MockSubtitleSearch};

/// Test catalogue search ordering
#[tokio::test]
async fn test_staticSearch_withMatchingTitle_shouldSortByDownloads() {
    let search = StaticSubtitleSearch::new(vec![
        search_result("1", "The Last Airbender", "en", 10),
        search_result("2", "Another Film", "en", 500),
        search_result("3", "The Last Airbender", "de", 90),
    ]);

    let results = search.search("last airbender").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "3");
    assert_eq!(results[1].id, "1");
}

/// Test an empty query
#[tokio::test]
async fn test_staticSearch_withEmptyQuery_shouldReturnInvalidResponse() {
    let search = StaticSubtitleSearch::default();
    let result = search.search("   ").await;
    assert!(matches!(result, Err(CollaboratorError::InvalidResponse(_))));
}

/// Test collaborators used behind a trait object
#[tokio::test]
async fn test_mockSearch_behindTraitObject_shouldCountRequests() {
    let working = MockSubtitleSearch::working(vec![search_result("9", "Movie", "fr", 1)]);
    let failing = MockSubtitleSearch::failing();
    let searches: Vec<Box<dyn SubtitleSearch>> = vec![Box::new(working.clone()), Box::new(failing.clone())];

    let first = searches[0].search("Movie").await.unwrap();
    let second = searches[1].search("Movie").await;

    assert_eq!(first[0].language, "fr");
    assert!(matches!(second, Err(CollaboratorError::Unavailable(_))));
    assert_eq!(working.request_count(), 1);
    assert_eq!(failing.request_count(), 1);
}

/// Test picking a language pair from analyses
#[tokio::test]
async fn test_analyzer_thenRecommendPair_shouldPickNativeAndFirstTarget() {
    let analyzer = StaticLanguageAnalyzer::new("de");
    let languages: Vec<String> = ["ja", "de", "es"].iter().map(|s| s.to_string()).collect();

    let analyses = analyzer.analyze(&languages).await.unwrap();

    assert_eq!(analyses[0].difficulty, LanguageDifficulty::Advanced);
    assert_eq!(analyses[2].difficulty, LanguageDifficulty::Beginner);
    assert_eq!(recommend_pair(&analyses), Some(("de".to_string(), "ja".to_string())));
}

/// Test analyses round trip through JSON
#[tokio::test]
async fn test_languageAnalysis_shouldSerializeDifficultyLowercase() {
    let analyses = StaticLanguageAnalyzer::default().analyze(&["ru".to_string()]).await.unwrap();
    let json = serde_json::to_value(&analyses[0]).unwrap();

    assert_eq!(json["difficulty"], "advanced");
    assert_eq!(json["language_name"], "Russian");
    assert_eq!(json["recommended_as_target"], true);
}
