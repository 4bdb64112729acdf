// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use app_controller::Controller;
use export::JsonLinesSink;
use subtitle_loader::SrtLoader;

mod alignment;
mod app_config;
mod app_controller;
mod errors;
mod export;
mod subtitle_loader;
mod track;

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

fn to_level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Align subtitle tracks into flashcard records (default command)
    Align(AlignArgs),

    /// Generate shell completions for jimakudeck
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AlignArgs {
    /// Subtitle files to align; overrides the files in the config
    #[arg(value_name = "SUBTITLE_FILES")]
    subtitle_files: Vec<PathBuf>,

    /// Output file for the aligned records (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Index of the reference track among the input files
    #[arg(short, long)]
    reference_index: Option<usize>,

    /// Fudge budget for timestamp allocation, in milliseconds
    #[arg(short, long)]
    fudge_budget_ms: Option<u64>,

    /// Encoding tried when a file is not valid UTF-8
    #[arg(short, long)]
    encoding: Option<String>,

    /// Role label for each secondary track, in file order (repeatable)
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// jimakudeck - subtitle track alignment for flashcard decks
///
/// Aligns several subtitle tracks of the same video into one consolidated
/// sequence of records, one per reference-track line, with the overlapping
/// text of every other track merged in.
#[derive(Parser, Debug)]
#[command(name = "jimakudeck")]
#[command(version = "0.3.0")]
#[command(about = "Align subtitle tracks into flashcard records")]
#[command(long_about = "jimakudeck matches the lines of secondary subtitle tracks against a \
reference track by temporal overlap and emits one record per reference line, keyed by a \
collision-free start timestamp.

EXAMPLES:
    jimakudeck ja.srt en.srt                      # ja.srt is the reference
    jimakudeck -r 1 ja.srt en.srt                 # en.srt is the reference
    jimakudeck --role Meaning --role Reading ja.srt en.srt readings.srt
    jimakudeck -o deck.jsonl ja.srt en.srt        # write records to a file
    jimakudeck completions bash > jimakudeck.bash # generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Subtitle files to align; overrides the files in the config
    #[arg(value_name = "SUBTITLE_FILES")]
    subtitle_files: Vec<PathBuf>,

    /// Output file for the aligned records (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Index of the reference track among the input files
    #[arg(short, long)]
    reference_index: Option<usize>,

    /// Fudge budget for timestamp allocation, in milliseconds
    #[arg(short, long)]
    fudge_budget_ms: Option<u64>,

    /// Encoding tried when a file is not valid UTF-8
    #[arg(short, long)]
    encoding: Option<String>,

    /// Role label for each secondary track, in file order (repeatable)
    #[arg(long = "role")]
    roles: Vec<String>,

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
    fn get_color_for_level(level: Level) -> &'static str {
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
            let color = Self::get_color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "jimakudeck", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Align(args)) => run_align(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let align_args = AlignArgs {
                subtitle_files: cli.subtitle_files,
                output: cli.output,
                reference_index: cli.reference_index,
                fudge_budget_ms: cli.fudge_budget_ms,
                encoding: cli.encoding,
                roles: cli.roles,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_align(align_args)
        }
    }
}

fn run_align(options: AlignArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(to_level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config: app_config::Config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = app_config::Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if !options.subtitle_files.is_empty() {
        config.subtitle_files = options.subtitle_files;
    }

    if let Some(reference_index) = options.reference_index {
        config.reference_index = reference_index;
    }

    if let Some(fudge_budget_ms) = options.fudge_budget_ms {
        config.fudge_budget_ms = fudge_budget_ms;
    }

    if let Some(encoding) = &options.encoding {
        config.default_encoding = encoding.clone();
    }

    if !options.roles.is_empty() {
        config.roles = options.roles;
    }

    // Update log level in config if specified via command line
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    } else {
        // If log level was not set via command line, update it from config now
        log::set_max_level(to_level_filter(&config.log_level));
    }

    if config.subtitle_files.is_empty() {
        return Err(anyhow!(
            "No subtitle files given; pass them on the command line or list them in {}",
            config_path
        ));
    }

    // Create controller; configuration is validated here
    let controller = Controller::with_config(config)?;
    let loader = SrtLoader;

    // Run the alignment, writing records to the chosen output
    let summary = match &options.output {
        Some(path) => {
            let file = File::create(path)
                .context(format!("Failed to create output file: {}", path.display()))?;
            let mut sink = JsonLinesSink::new(file);
            controller.run(&loader, &mut sink)?
        }
        None => {
            let stdout = std::io::stdout();
            let mut sink = JsonLinesSink::new(stdout.lock());
            controller.run(&loader, &mut sink)?
        }
    };

    if summary.fallback_keys > 0 {
        warn!(
            "{} record key(s) lost the uniqueness guarantee (fudge budget exhausted)",
            summary.fallback_keys
        );
    }

    Ok(())
}
