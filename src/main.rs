// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};

use mqxlate::app_config::{Config, LogLevel};
use mqxlate::pipeline::{Pipeline, ProgressEvent};
use mqxlate::termbase::Termbase;
use mqxlate::tm::{TmStore, load_tmx};
use mqxlate::xliff::{self, XliffDocument};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// mqxlate - memoQ XLIFF pretranslation tool
///
/// Pretranslates a bilingual mqxliff file from a TMX reuse memory: exact
/// matches fill empty targets, inline tags are protected throughout, and
/// everything outside the touched targets is written back byte-for-byte.
#[derive(Parser, Debug)]
#[command(name = "mqxlate")]
#[command(version = "0.3.0")]
#[command(about = "memoQ XLIFF pretranslation with reuse-memory matching")]
struct CommandLineOptions {
    /// Input mqxliff file to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    /// Output file path (defaults to <input>.pretranslated.mqxliff)
    #[arg(short, long)]
    output_path: Option<PathBuf>,

    /// TMX reuse-memory file to seed from
    #[arg(long = "tm")]
    tm_path: Option<PathBuf>,

    /// memoQ CSV termbase file
    #[arg(long = "termbase")]
    termbase_path: Option<PathBuf>,

    /// Fuzzy match threshold (0-100, exclusive lower bound)
    #[arg(long)]
    threshold: Option<f64>,

    /// Number of concurrent segment workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Source language override (e.g. 'en', 'en-US')
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language override
    #[arg(short, long)]
    target_language: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let color = Self::color_for_level(record.level());
            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    let options = CommandLineOptions::parse();

    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = if std::path::Path::new(&options.config_path).exists() {
        Config::from_file(&options.config_path)
            .with_context(|| format!("Failed to load config file: {}", options.config_path))?
    } else {
        warn!(
            "Config file not found at '{}', using default configuration.",
            options.config_path
        );
        Config::default()
    };

    if let Some(threshold) = options.threshold {
        config.translation.fuzzy_threshold = threshold;
    }
    if let Some(workers) = options.workers {
        config.translation.workers = workers;
    }
    if let Some(source) = &options.source_language {
        config.source_language = Some(source.clone());
    }
    if let Some(target) = &options.target_language {
        config.target_language = Some(target.clone());
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }
    config.validate().context("Configuration validation failed")?;

    run_pretranslate(options, config).await
}

async fn run_pretranslate(options: CommandLineOptions, config: Config) -> Result<()> {
    let input_path = &options.input_path;
    if input_path.extension().and_then(|e| e.to_str()) != Some("mqxliff") {
        return Err(anyhow!(
            "Input must be an .mqxliff file: {}",
            input_path.display()
        ));
    }

    info!("Analyzing {}", input_path.display());
    let document = XliffDocument::from_file(input_path)?;

    let source_language = config
        .source_language
        .clone()
        .unwrap_or_else(|| document.source_language.clone());
    let target_language = config
        .target_language
        .clone()
        .unwrap_or_else(|| document.target_language.clone());
    info!(
        "Document '{}': {} segments, {} -> {}",
        document.original_file,
        document.segments.len(),
        source_language,
        target_language
    );

    let memory = match &options.tm_path {
        Some(tm_path) => {
            let entries = load_tmx(tm_path, &source_language, &target_language)?;
            info!(
                "Loaded {} memory entries from {}",
                entries.len(),
                tm_path.display()
            );
            TmStore::from_entries(entries)
        }
        None => {
            warn!("No reuse memory given; only skip heuristics will fill targets");
            TmStore::new()
        }
    };

    let mut pipeline =
        Pipeline::new(&config, &source_language, &target_language)?.with_memory(memory);
    if let Some(termbase_path) = &options.termbase_path {
        let termbase = Termbase::from_csv(termbase_path, &source_language, &target_language)?;
        info!(
            "Loaded {} termbase entries from {}",
            termbase.len(),
            termbase_path.display()
        );
        pipeline = pipeline.with_termbase(termbase);
    }

    let segments: Vec<_> = document
        .segments
        .iter()
        .map(|unit| unit.segment.clone())
        .collect();

    // Progress bar driven by pipeline events
    let workload = segments.iter().filter(|s| s.is_translatable()).count() as u64;
    let progress_bar = ProgressBar::new(workload);
    let template_result = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} segments ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(template_result.progress_chars("█▓▒░"));
    progress_bar.set_message("Pretranslating");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let bar = progress_bar.clone();
    let reporter = tokio::spawn(async move {
        while let Some(ProgressEvent::SegmentDone { .. }) = rx.recv().await {
            bar.inc(1);
        }
    });

    let run = pipeline.run(&segments, Some(tx)).await;
    let _ = reporter.await;
    progress_bar.finish_with_message("Done");

    let output_path = options
        .output_path
        .clone()
        .unwrap_or_else(|| input_path.with_extension("pretranslated.mqxliff"));
    xliff::write_file(&output_path, &document, &run.translations)?;

    info!(
        "Wrote {}: {} reused, {} skipped, {} left untranslated of {} segments",
        output_path.display(),
        run.summary.reused,
        run.summary.skipped,
        run.summary.untranslated,
        run.summary.total
    );
    Ok(())
}
