use anyhow::{Result, Context};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use log::debug;

use crate::errors::ValidationError;
use crate::language_utils;
use crate::subtitle_parser::{self, TimedLine};

// @module: File and directory utilities at the load boundary

/// Subtitle extensions accepted by the loader
pub const SUPPORTED_EXTENSIONS: &[&str] = &["srt"];

// @struct: File operations utility
pub struct FileManager;

/// Source and target subtitle files for the same movie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitlePair {
    /// File stem without the language suffix, e.g. `movie` for `movie.en.srt`
    pub stem: String,
    pub source_path: PathBuf,
    pub target_path: PathBuf,
}

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Reject paths whose extension is not a supported subtitle format
    pub fn check_subtitle_extension<P: AsRef<Path>>(path: P) -> Result<(), ValidationError> {
        let extension = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
            Ok(())
        } else {
            Err(ValidationError::UnsupportedFormat { extension })
        }
    }

    /// Read raw subtitle text after checking the extension
    pub fn read_subtitle_file<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        Self::check_subtitle_extension(path)?;

        if !Self::file_exists(path) {
            return Err(anyhow::anyhow!("Subtitle file not found: {:?}", path));
        }

        Self::read_to_string(path)
    }

    /// Read and parse a subtitle file
    pub fn load_subtitle_file<P: AsRef<Path>>(path: P) -> Result<Vec<TimedLine>> {
        let content = Self::read_subtitle_file(path)?;
        Ok(subtitle_parser::parse(&content))
    }

    // @generates: Output path for a movie's lessons
    pub fn generate_output_path<P: AsRef<Path>>(output_dir: P, slug: &str) -> PathBuf {
        output_dir.as_ref().join(format!("{}.lessons.json", slug))
    }

    /// Find `<stem>.<source>.srt` / `<stem>.<target>.srt` pairs under a directory.
    ///
    /// Language suffixes are compared as ISO codes, so `movie.en.srt` pairs
    /// with `movie.ger.srt` for an `en`/`de` run. Stems with only one side
    /// are ignored. Results are ordered by path.
    pub fn find_subtitle_pairs<P: AsRef<Path>>(
        dir: P,
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<SubtitlePair>> {
        let mut candidates: BTreeMap<PathBuf, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() || Self::check_subtitle_extension(path).is_err() {
                continue;
            }

            // movie.en.srt -> file stem "movie.en" -> ("movie", "en")
            let Some(file_stem) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            let Some((stem, language)) = file_stem.rsplit_once('.') else {
                continue;
            };

            let key = path.with_file_name(stem);
            let slot = candidates.entry(key).or_default();
            if language_utils::language_codes_match(language, source_language) {
                slot.0 = Some(path.to_path_buf());
            } else if language_utils::language_codes_match(language, target_language) {
                slot.1 = Some(path.to_path_buf());
            }
        }

        let pairs: Vec<SubtitlePair> = candidates
            .into_iter()
            .filter_map(|(key, sides)| match sides {
                (Some(source_path), Some(target_path)) => Some(SubtitlePair {
                    stem: key
                        .file_name()
                        .map(|s| s.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    source_path,
                    target_path,
                }),
                _ => None,
            })
            .collect();

        debug!("Found {} subtitle pairs in {:?}", pairs.len(), dir.as_ref());
        Ok(pairs)
    }
}
