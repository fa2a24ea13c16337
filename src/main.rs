// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use cuetrack::app_config::{self, Config, MalformedBlockPolicy};
use cuetrack::file_utils::FileManager;
use cuetrack::{language_utils, timecode, SubtitleDocument, SubtitleNavigator};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every cue of a subtitle file
    Cues {
        /// Subtitle file (SRT or XML caption track)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the cue showing at a given time
    At {
        /// Subtitle file (SRT or XML caption track)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Time in seconds (12.5) or as a timestamp (00:00:12,500)
        #[arg(value_name = "TIME", value_parser = parse_time_arg)]
        time: f64,
    },

    /// Write the parsed cues back out as SRT
    Export {
        /// Subtitle file (SRT or XML caption track)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (defaults to FILE with an .srt extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Drive a navigator with a synthetic playback clock
    Simulate {
        /// Subtitle file (SRT or XML caption track)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Clock tick in milliseconds
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
        tick_ms: u64,

        /// Stop the clock here (defaults to one second after the last cue)
        #[arg(long, value_parser = parse_time_arg)]
        until: Option<f64>,
    },

    /// Generate shell completions for cuetrack
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// cuetrack - subtitle timeline engine for language practice
///
/// Parses SRT files and XML caption tracks into timed cues and exercises the
/// playback navigator against them.
#[derive(Parser, Debug)]
#[command(name = "cuetrack")]
#[command(version)]
#[command(about = "Subtitle timeline inspection tool")]
#[command(long_about = "cuetrack parses subtitle files into timed cues and answers playback queries.

EXAMPLES:
    cuetrack cues movie.en.srt                  # List all cues
    cuetrack at movie.en.srt 00:01:02,500       # Cue text at a time
    cuetrack export captions.xml -o out.srt     # Convert a caption track to SRT
    cuetrack simulate movie.en.srt --tick-ms 50 # Report auto-pause boundaries
    cuetrack completions bash > cuetrack.bash   # Generate bash completions

CONFIGURATION:
    Settings are read from cuetrack.json by default. You can specify a different
    file with --config. When the file doesn't exist, built-in defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "cuetrack.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Skip malformed SRT blocks instead of discarding the whole file
    #[arg(long, global = true)]
    skip_malformed: bool,
}

/// Accept plain seconds or an SRT timestamp
fn parse_time_arg(value: &str) -> Result<f64, String> {
    if let Ok(seconds) = value.trim().parse::<f64>() {
        if seconds.is_finite() {
            return Ok(seconds);
        }
    }
    timecode::parse_timestamp(value).map_err(|e| e.to_string())
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger::new(LevelFilter::Trace)))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
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
    // Info until the configuration says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "cuetrack", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.into());

    match cli.command {
        Commands::Cues { file } => run_cues(&file, &config).await,
        Commands::At { file, time } => run_at(&file, time, &config).await,
        Commands::Export { file, output } => run_export(&file, output, &config).await,
        Commands::Simulate { file, tick_ms, until } => run_simulate(&file, tick_ms, until, &config).await,
        Commands::Completions { .. } => Ok(()),
    }
}

fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = if cli.config_path.exists() {
        Config::from_file(&cli.config_path)?
    } else {
        debug!("Config file not found at {:?}, using defaults", cli.config_path);
        Config::default()
    };

    if let Some(level) = cli.log_level {
        config.log_level = level.into();
    }

    if cli.skip_malformed {
        config.parser.malformed_block_policy = MalformedBlockPolicy::Skip;
    }

    config.normalize().context("Configuration validation failed")?;
    Ok(config)
}

async fn load_document(file: &Path, config: &Config) -> Result<SubtitleDocument> {
    if !FileManager::has_subtitle_extension(file) {
        warn!("{:?} has no subtitle extension, sniffing content anyway", file);
    }

    let content = FileManager::read_subtitle_file(file)?;
    let document = SubtitleDocument::load_async(content, config.parser_config()).await;

    if document.is_empty() {
        warn!("No cues found in {:?}", file);
    }

    Ok(document)
}

async fn run_cues(file: &Path, config: &Config) -> Result<()> {
    let document = load_document(file, config).await?;

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", document.to_srt())?;

    let language = language_utils::get_language_name(document.language())
        .unwrap_or_else(|_| document.language().to_string());
    let spoken: f64 = document.iter().map(|cue| cue.duration()).sum();
    info!(
        "{} {} cues ({}), {} of text on screen",
        document.len(),
        document.dialect(),
        language,
        timecode::format_timestamp(spoken)
    );
    Ok(())
}

async fn run_at(file: &Path, time: f64, config: &Config) -> Result<()> {
    let document = load_document(file, config).await?;
    let navigator = SubtitleNavigator::new(document, config.navigator);

    match navigator.cue_text_for_time(time) {
        Some(text) => println!("{}", text),
        None => println!("(no cue)"),
    }
    Ok(())
}

async fn run_export(file: &Path, output: Option<PathBuf>, config: &Config) -> Result<()> {
    let document = load_document(file, config).await?;
    if document.is_empty() {
        return Err(anyhow!("Nothing to export from {:?}", file));
    }

    let output = output.unwrap_or_else(|| FileManager::export_path(file));
    FileManager::write_to_file(&output, &document.to_srt())?;

    info!("Success: {:?}", output);
    Ok(())
}

async fn run_simulate(file: &Path, tick_ms: u64, until: Option<f64>, config: &Config) -> Result<()> {
    let document = load_document(file, config).await?;
    let last_end = document
        .iter()
        .map(|cue| cue.end)
        .fold(0.0_f64, f64::max);
    let until = until.unwrap_or(last_end + 1.0);

    let mut navigator = SubtitleNavigator::new(document, config.navigator);
    let mut showing: Option<String> = None;
    let mut boundaries = 0;

    info!("Simulating playback to {} every {}ms", timecode::format_timestamp(until), tick_ms);

    let mut tick: u64 = 0;
    loop {
        let now = (tick * tick_ms) as f64 / 1000.0;
        if now > until {
            break;
        }
        tick += 1;

        let text = navigator.cue_text_for_time(now);
        if text != showing {
            if let Some(text) = &text {
                println!("[{}] {}", timecode::format_timestamp(now), text.replace('\n', " | "));
            }
            showing = text;
        }

        if navigator.is_time_close_to_end_of_cue(now) {
            boundaries += 1;
            let replay = navigator.start_of_current_cue().unwrap_or(now);
            println!(
                "[{}] pause  replay->{}  prev->{}  next->{}",
                timecode::format_timestamp(now),
                timecode::format_timestamp(replay),
                timecode::format_timestamp(navigator.start_of_prev_cue(now)),
                timecode::format_timestamp(navigator.start_of_next_cue(now)),
            );
        }
    }

    info!("{} boundaries in {} ticks", boundaries, tick);
    Ok(())
}
