// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use cinefluent::app_config::{self, Config};
use cinefluent::app_controller::Controller;
use cinefluent::pipeline::MovieMetadata;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every processing command
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Source language code (e.g., 'en')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'de')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Seed for shuffling options and words
    #[arg(long)]
    seed: Option<u64>,

    /// Alignment tolerance in milliseconds
    #[arg(long)]
    tolerance_ms: Option<u64>,

    /// Fixed segment width in milliseconds
    #[arg(long)]
    segment_ms: Option<u64>,

    /// Custom segment breakpoints in milliseconds, comma separated
    #[arg(long, value_delimiter = ',')]
    breakpoints: Option<Vec<u64>>,
}

#[derive(Parser, Debug)]
struct ProcessArgs {
    /// Subtitle file in the language the learner knows
    #[arg(value_name = "SOURCE_SRT")]
    source: PathBuf,

    /// Subtitle file in the language being learned
    #[arg(value_name = "TARGET_SRT")]
    target: PathBuf,

    /// Movie title
    #[arg(long)]
    title: String,

    /// Release year
    #[arg(long)]
    year: Option<u16>,

    /// Output directory (defaults to the source file's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct FolderArgs {
    /// Directory containing `<movie>.<lang>.srt` files
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate lessons for one movie from two subtitle files
    Process(ProcessArgs),

    /// Generate lessons for every subtitle pair in a directory
    Folder(FolderArgs),

    /// Generate shell completions for cinefluent
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Cinefluent - language lessons from bilingual movie subtitles
#[derive(Parser, Debug)]
#[command(name = "cinefluent")]
#[command(version)]
#[command(about = "Generate language-learning lessons from bilingual subtitles")]
#[command(long_about = "Cinefluent aligns two subtitle tracks of the same movie, splits them into
time segments and generates vocabulary, cloze, matching and word-order exercises.

EXAMPLES:
    cinefluent process movie.en.srt movie.de.srt --title \"Movie\" --year 2010
    cinefluent process a.srt b.srt --title Movie --breakpoints 0,90000,180000
    cinefluent folder /subtitles/ -s en -t de --seed 7
    cinefluent completions bash > cinefluent.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. If the file doesn't exist,
    a default one will be created automatically. Command line flags override it.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger { level: LevelFilter::Trace }))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and emoji for a level
    fn decoration(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "❌ "),
            Level::Warn => ("1;33", "🚧 "),
            Level::Info => ("1;32", " "),
            Level::Debug => ("1;36", "🔍 "),
            Level::Trace => ("1;35", "📋 "),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, emoji) = Self::decoration(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, emoji, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info by default, updated once the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "cinefluent", &mut std::io::stdout());
            Ok(())
        }
        Commands::Process(args) => run_process(args).await,
        Commands::Folder(args) => run_folder(args).await,
    }
}

async fn run_process(args: ProcessArgs) -> Result<()> {
    let controller = Controller::with_config(load_config(&args.common)?)?;

    let output_dir = match &args.output {
        Some(dir) => dir.clone(),
        None => args.source.parent().unwrap_or(Path::new(".")).to_path_buf(),
    };
    let metadata = MovieMetadata::new(args.title.clone(), args.year);
    let force_overwrite = args.common.force_overwrite;

    // Parsing and generation are CPU-bound; keep them off the async runtime
    let summary = tokio::task::spawn_blocking(move || {
        controller.process_files(&args.source, &args.target, metadata, &output_dir, force_overwrite)
    })
    .await
    .map_err(|e| anyhow!("Processing task failed: {}", e))??;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn run_folder(args: FolderArgs) -> Result<()> {
    let controller = Controller::with_config(load_config(&args.common)?)?;

    let summary = controller
        .run_folder(args.input_dir.clone(), args.common.force_overwrite)
        .await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Load or create the configuration file, then apply command line overrides
fn load_config(options: &CommonArgs) -> Result<Config> {
    // If log level is set via command line, apply it immediately
    if let Some(level) = &options.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);
        let config = Config::default();
        config.save(config_path)?;
        config
    };

    if let Some(source_language) = &options.source_language {
        config.source_language = source_language.clone();
    }
    if let Some(target_language) = &options.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(seed) = options.seed {
        config.lessons.seed = seed;
    }
    if let Some(tolerance_ms) = options.tolerance_ms {
        config.alignment.tolerance_ms = tolerance_ms;
    }
    if let Some(segment_ms) = options.segment_ms {
        config.segmentation.duration_ms = segment_ms;
    }
    if let Some(breakpoints) = &options.breakpoints {
        config.segmentation.breakpoints_ms = Some(breakpoints.clone());
    }
    if let Some(level) = &options.log_level {
        config.log_level = level.clone().into();
    }

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    Ok(config)
}
