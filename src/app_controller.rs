use anyhow::{Context, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::{FileManager, SubtitlePair};
use crate::pipeline::{LessonPipeline, MovieMetadata, ProcessedMovie};

// @module: Application controller for lesson generation runs

/// Counters for one or more processed movies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub movies: usize,
    pub skipped: usize,
    pub failed: usize,
    pub segments: usize,
    pub lessons: usize,
    pub items: usize,
}

impl RunSummary {
    fn from_processed(processed: &ProcessedMovie) -> Self {
        Self {
            movies: 1,
            segments: processed.segments.len(),
            lessons: processed.lesson_count(),
            items: processed.item_count(),
            ..Self::default()
        }
    }

    fn skipped() -> Self {
        Self {
            skipped: 1,
            ..Self::default()
        }
    }

    /// Add another summary's counters to this one
    pub fn absorb(&mut self, other: &RunSummary) {
        self.movies += other.movies;
        self.skipped += other.skipped;
        self.failed += other.failed;
        self.segments += other.segments;
        self.lessons += other.lessons;
        self.items += other.items;
    }
}

/// Main application controller
#[derive(Debug, Clone)]
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Pipeline built from the configuration
    pipeline: LessonPipeline,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let pipeline = LessonPipeline::from_config(&config);
        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process one movie: read both subtitle files, run the pipeline and
    /// write `<slug>.lessons.json` into `output_dir`.
    pub fn process_files(
        &self,
        source_path: &Path,
        target_path: &Path,
        metadata: MovieMetadata,
        output_dir: &Path,
        force_overwrite: bool,
    ) -> Result<RunSummary> {
        let output_path = FileManager::generate_output_path(output_dir, &metadata.slug());
        if output_path.exists() && !force_overwrite {
            warn!(
                "Skipping '{}', lessons already exist at {:?} (use -f to force overwrite)",
                metadata.title, output_path
            );
            return Ok(RunSummary::skipped());
        }

        let source_content = FileManager::read_subtitle_file(source_path)
            .with_context(|| format!("Failed to load source subtitles: {:?}", source_path))?;
        let target_content = FileManager::read_subtitle_file(target_path)
            .with_context(|| format!("Failed to load target subtitles: {:?}", target_path))?;

        let processed = self.pipeline.run(metadata, &source_content, &target_content);
        let summary = RunSummary::from_processed(&processed);

        FileManager::ensure_dir(output_dir)?;
        let json = serde_json::to_string_pretty(&processed)
            .context("Failed to serialize lessons to JSON")?;
        FileManager::write_to_file(&output_path, &json)?;

        info!("Success: {:?}", output_path);
        Ok(summary)
    }

    /// Process every source/target pair found under `input_dir`.
    ///
    /// Movies are independent, so each one runs on its own blocking task.
    /// Output files are written next to the source subtitles. A failing
    /// movie is counted and logged without stopping the others.
    pub async fn run_folder(&self, input_dir: PathBuf, force_overwrite: bool) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        if !input_dir.is_dir() {
            return Err(anyhow::anyhow!("Input directory does not exist: {:?}", input_dir));
        }

        let pairs = FileManager::find_subtitle_pairs(
            &input_dir,
            &self.config.source_language,
            &self.config.target_language,
        )?;

        if pairs.is_empty() {
            return Err(anyhow::anyhow!(
                "No {}/{} subtitle pairs found in directory: {:?}",
                self.config.source_language,
                self.config.target_language,
                input_dir
            ));
        }

        let folder_pb = ProgressBar::new(pairs.len() as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} movies ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        folder_pb.set_style(style.progress_chars("█▓▒░"));
        folder_pb.set_message("Processing movies");

        let mut tasks: FuturesUnordered<_> = pairs
            .into_iter()
            .map(|pair| {
                let controller = self.clone();
                let stem = pair.stem.clone();
                let handle = tokio::task::spawn_blocking(move || controller.process_pair(&pair, force_overwrite));
                async move { (stem, handle.await) }
            })
            .collect();

        let mut summary = RunSummary::default();
        while let Some((stem, joined)) = tasks.next().await {
            match joined {
                Ok(Ok(movie_summary)) => summary.absorb(&movie_summary),
                Ok(Err(e)) => {
                    error!("Error processing '{}': {:#}", stem, e);
                    summary.failed += 1;
                }
                Err(e) => {
                    error!("Task for '{}' did not complete: {}", stem, e);
                    summary.failed += 1;
                }
            }
            folder_pb.set_message(format!("Finished: {}", stem));
            folder_pb.inc(1);
        }

        folder_pb.finish_with_message("Folder processing complete");

        info!(
            "Processed {} movies ({} skipped, {} failed): {} segments, {} lessons, {} items in {:.1}s",
            summary.movies,
            summary.skipped,
            summary.failed,
            summary.segments,
            summary.lessons,
            summary.items,
            start_time.elapsed().as_secs_f64()
        );

        Ok(summary)
    }

    fn process_pair(&self, pair: &SubtitlePair, force_overwrite: bool) -> Result<RunSummary> {
        let output_dir = pair
            .source_path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        self.process_files(
            &pair.source_path,
            &pair.target_path,
            MovieMetadata::new(pair.stem.clone(), None),
            &output_dir,
            force_overwrite,
        )
    }
}
