/*!
 * Integration tests for application lifecycle
 */

use anyhow::Result;
use cinefluent::app_config::Config;
use cinefluent::app_controller::Controller;
use cinefluent::pipeline::{MovieMetadata, ProcessedMovie};

use crate::common;

/// Test the controller with an invalid configuration
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.target_language = "en".to_string();

    assert!(Controller::with_config(config).is_err());
}

/// Test processing a single movie writes a lessons file
#[test]
fn test_processFiles_withSubtitlePair_shouldWriteLessonsJson() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (source, target) = common::create_test_subtitle_pair(temp_dir.path(), "scene")?;
    let output_dir = temp_dir.path().join("out");
    let controller = Controller::with_config(common::test_config())?;

    let summary = controller.process_files(
        &source,
        &target,
        MovieMetadata::new("The Scene", Some(2024)),
        &output_dir,
        false,
    )?;

    assert_eq!(summary.movies, 1);
    assert_eq!(summary.segments, 2);
    assert_eq!(summary.lessons, 8);
    assert!(summary.items > 0);

    let written = output_dir.join("the-scene-2024.lessons.json");
    let processed: ProcessedMovie = serde_json::from_str(&std::fs::read_to_string(&written)?)?;
    assert_eq!(processed.segments.len(), 2);
    assert_eq!(processed.item_count(), summary.items);
    Ok(())
}

/// Test that existing output is kept unless forced
#[test]
fn test_processFiles_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let (source, target) = common::create_test_subtitle_pair(temp_dir.path(), "scene")?;
    let existing = common::create_test_file(temp_dir.path(), "scene.lessons.json", "keep me")?;
    let controller = Controller::with_config(common::test_config())?;

    let skipped = controller.process_files(&source, &target, MovieMetadata::new("Scene", None), temp_dir.path(), false)?;
    assert_eq!(skipped.skipped, 1);
    assert_eq!(std::fs::read_to_string(&existing)?, "keep me");

    let forced = controller.process_files(&source, &target, MovieMetadata::new("Scene", None), temp_dir.path(), true)?;
    assert_eq!(forced.movies, 1);
    assert_ne!(std::fs::read_to_string(&existing)?, "keep me");
    Ok(())
}

/// Test an unsupported file is reported as an error
#[test]
fn test_processFiles_withUnsupportedExtension_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let source = common::create_test_file(temp_dir.path(), "scene.en.ass", common::SOURCE_SRT)?;
    let target = common::create_test_file(temp_dir.path(), "scene.de.srt", common::TARGET_SRT)?;
    let controller = Controller::with_config(common::test_config())?;

    let result = controller.process_files(&source, &target, MovieMetadata::new("Scene", None), temp_dir.path(), false);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("scene.lessons.json").exists());
    Ok(())
}

/// Test folder mode over several movies
#[tokio::test]
async fn test_runFolder_withSeveralPairs_shouldProcessEachMovie() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle_pair(temp_dir.path(), "first")?;
    common::create_test_subtitle_pair(temp_dir.path(), "second")?;
    common::create_test_file(temp_dir.path(), "broken.en.srt", "garbage")?;
    common::create_test_file(temp_dir.path(), "broken.de.srt", "garbage")?;
    let controller = Controller::with_config(common::test_config())?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;

    assert_eq!(summary.movies, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.segments, 4);
    assert!(temp_dir.path().join("first.lessons.json").exists());
    assert!(temp_dir.path().join("second.lessons.json").exists());
    assert!(temp_dir.path().join("broken.lessons.json").exists());

    let again = controller.run_folder(temp_dir.path().to_path_buf(), false).await?;
    assert_eq!(again.skipped, 3);
    assert_eq!(again.movies, 0);
    Ok(())
}

/// Test folder mode driven from synchronous code
#[test]
fn test_runFolder_withBlockOn_shouldWriteOutput() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle_pair(temp_dir.path(), "scene")?;
    let controller = Controller::with_config(common::test_config())?;

    let summary = tokio_test::block_on(async {
        controller.run_folder(temp_dir.path().to_path_buf(), true).await
    })?;

    assert_eq!(summary.movies, 1);
    assert!(temp_dir.path().join("scene.lessons.json").exists());
    Ok(())
}

/// Test folder mode without any pair
#[tokio::test]
async fn test_runFolder_withoutPairs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "only.en.srt", common::SOURCE_SRT)?;
    let controller = Controller::with_config(common::test_config())?;

    assert!(controller.run_folder(temp_dir.path().to_path_buf(), false).await.is_err());
    assert!(controller.run_folder(temp_dir.path().join("missing"), false).await.is_err());
    Ok(())
}
