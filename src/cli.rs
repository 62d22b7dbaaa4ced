use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use digit_formulas::{ReportOptions, SolverConfig, render_report, search, validate_digit_string};
use log::{info, warn};

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Digit formulas - Find every value reachable from a digit string
#[derive(Parser, Debug)]
#[command(name = "digit-formulas")]
#[command(
    about = "Combine the digits of a string, in order, into formulas and list the integer values they reach"
)]
#[command(version)]
pub struct CliArgs {
    /// String of digits to build formulas from
    pub digit_string: String,

    /// Smallest value to print (min > max prints every integer value)
    #[arg(allow_negative_numbers = true)]
    pub min: i64,

    /// Largest value to print
    #[arg(allow_negative_numbers = true)]
    pub max: i64,

    /// 0 keeps one formula per value, otherwise all formulas up to this depth
    pub max_depth: usize,

    /// Any value here fully parenthesizes the output
    pub verbose: Option<String>,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub digit_string: String,
    pub report: ReportOptions,
    pub log_level: LogLevel,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        let report =
            ReportOptions::new(args.min, args.max, args.max_depth).verbose(args.verbose.is_some());
        CliConfig {
            digit_string: args.digit_string,
            report,
            log_level: args.log_level,
        }
    }
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    let args = CliArgs::parse();

    // Validate digit string
    validate_digit_string(&args.digit_string).context("Invalid digit string")?;

    Ok(args.into())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    let solver_config = SolverConfig::with_max_depth(config.report.max_depth);
    info!(
        "Searching for formulas using digits '{}' ({:?})",
        config.digit_string,
        solver_config.retention()
    );

    let result = search(&config.digit_string, &solver_config)
        .with_context(|| format!("Search over '{}' failed", config.digit_string))?;

    let lines = render_report(&result, &config.report);
    if lines.is_empty() {
        warn!(
            "No integer value in [{}, {}] is reachable",
            config.report.min, config.report.max
        );
    }
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
