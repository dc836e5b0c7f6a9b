use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::alignment::AlignmentConfig;
use crate::errors::ValidationError;
use crate::segmentation::{SegmentationMode, DEFAULT_SEGMENT_DURATION_MS};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Language being learned from (ISO code)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Language being learned (ISO code)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Alignment config
    #[serde(default)]
    pub alignment: AlignmentConfig,

    /// Segmentation config
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Lesson generation config
    #[serde(default)]
    pub lessons: LessonConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Segmentation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    /// Fixed window width in milliseconds
    #[serde(default = "default_segment_duration_ms")]
    pub duration_ms: u64,

    /// Custom breakpoints; when set, replaces fixed windows
    #[serde(default)]
    pub breakpoints_ms: Option<Vec<u64>>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_segment_duration_ms(),
            breakpoints_ms: None,
        }
    }
}

impl SegmentationConfig {
    // @returns: Segmentation mode selected by these settings
    pub fn mode(&self) -> SegmentationMode {
        match &self.breakpoints_ms {
            Some(breakpoints_ms) => SegmentationMode::Custom {
                breakpoints_ms: breakpoints_ms.clone(),
                fallback_duration_ms: self.duration_ms,
            },
            None => SegmentationMode::Fixed {
                duration_ms: self.duration_ms,
            },
        }
    }
}

/// Lesson generation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LessonConfig {
    /// Seed for option and word shuffling
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for LessonConfig {
    fn default() -> Self {
        Self { seed: default_seed() }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "de".to_string()
}

fn default_segment_duration_ms() -> u64 {
    DEFAULT_SEGMENT_DURATION_MS
}

fn default_seed() -> u64 {
    42
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Write configuration as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ValidationError> {
        // Validate languages
        for code in [&self.source_language, &self.target_language] {
            crate::language_utils::get_language_name(code)
                .map_err(|e| ValidationError::InvalidConfig(e.to_string()))?;
        }

        if crate::language_utils::language_codes_match(&self.source_language, &self.target_language) {
            return Err(ValidationError::InvalidConfig(format!(
                "Source and target language are both '{}'",
                self.source_language
            )));
        }

        if self.segmentation.duration_ms == 0 {
            return Err(ValidationError::InvalidConfig(
                "Segment duration must be greater than 0 ms".to_string(),
            ));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            alignment: AlignmentConfig::default(),
            segmentation: SegmentationConfig::default(),
            lessons: LessonConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
