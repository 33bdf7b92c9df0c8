use clap::{Parser, Subcommand};
use isbn_confirm::engine::{FormatGate, QualityScore};
use isbn_confirm::tools::{
    ReplayReport, format_reject_label, replay_dir, replay_file, trace_limit_from_env,
    trace_root_from_env,
};
use isbn_confirm::{EngineConfig, LineError, RawCandidate};
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "isbntool", version, about = "ISBN confirmation tools")]
struct Cli {
    /// JSON engine config (defaults plus ISBN_* environment overrides otherwise)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay one recorded trace as a scanning session
    Replay {
        #[arg(long)]
        trace: PathBuf,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay every trace under a directory, one session per file
    Batch {
        #[arg(long)]
        root: Option<PathBuf>,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Run the gates on a single read
    Check {
        #[arg(long)]
        payload: String,
        /// Comma-separated line errors; non-numeric entries count as missing
        #[arg(long, default_value = "")]
        errors: String,
        #[arg(long, default_value = "")]
        format: String,
    },
    /// Print the effective engine config as JSON
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Command::Replay { trace, json } => replay_cmd(&trace, json, &config),
        Command::Batch { root, limit } => batch_cmd(root, limit, &config),
        Command::Check {
            payload,
            errors,
            format,
        } => check_cmd(payload, &errors, format, &config),
        Command::Config => config_cmd(&config),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(level);
    }
    let _ = builder.try_init();
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, isbn_confirm::ConfigError> {
    match path {
        Some(path) => EngineConfig::load_json(path),
        None => {
            let config = EngineConfig::from_env();
            config.validate()?;
            Ok(config)
        }
    }
}

fn replay_cmd(trace: &Path, json: bool, config: &EngineConfig) -> ExitCode {
    let report = match replay_file(trace, config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("Failed to replay {}: {}", trace.display(), err);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(err) => {
                eprintln!("Failed to encode report: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }
    ExitCode::SUCCESS
}

fn print_report(report: &ReplayReport) {
    if let Some(path) = &report.path {
        println!("Trace: {}", path.display());
    }
    println!(
        "Reads: {} accepted={} rejected_format={} rejected_quality={} resets={} latched={}",
        report.candidates,
        report.accepted,
        report.rejected_format,
        report.rejected_quality,
        report.streak_resets,
        report.latched
    );
    match &report.confirmation {
        Some(confirmation) => {
            let isbn = &confirmation.event.isbn;
            println!(
                "Confirmed {} at read {} (check digit {}, ISBN-10 {})",
                isbn,
                confirmation.call,
                if isbn.has_valid_check_digit() { "ok" } else { "BAD" },
                isbn.to_isbn10().as_deref().unwrap_or("-")
            );
        }
        None => println!("No confirmation"),
    }
}

fn batch_cmd(root: Option<PathBuf>, limit: Option<usize>, config: &EngineConfig) -> ExitCode {
    let root = root.unwrap_or_else(trace_root_from_env);
    let limit = limit.or_else(trace_limit_from_env);

    if !root.exists() {
        eprintln!("Trace root not found: {}", root.display());
        return ExitCode::FAILURE;
    }

    let results = replay_dir(&root, limit, config);
    if results.is_empty() {
        println!("No traces found under {}", root.display());
        return ExitCode::SUCCESS;
    }

    let total = results.len();
    let mut confirmed = 0usize;
    let mut failed = 0usize;
    for (path, result) in results {
        match result {
            Ok(report) => match &report.confirmation {
                Some(c) => {
                    confirmed += 1;
                    println!("  {}: {} at read {}", path.display(), c.event.isbn, c.call);
                }
                None => println!("  {}: no confirmation", path.display()),
            },
            Err(err) => {
                failed += 1;
                eprintln!("  {}: {}", path.display(), err);
            }
        }
    }

    let rate = confirmed as f64 / total as f64 * 100.0;
    println!(
        "Confirmed {}/{} sessions ({:.2}%), {} unreadable",
        confirmed,
        total,
        rate,
        failed
    );
    ExitCode::SUCCESS
}

fn check_cmd(payload: String, errors: &str, format: String, config: &EngineConfig) -> ExitCode {
    let line_errors: Vec<LineError> = errors
        .split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| LineError::from(tok.parse::<f64>().ok()))
        .collect();
    let candidate = RawCandidate::new(payload, line_errors).format(format);

    let gate = FormatGate::new(config);
    let score = QualityScore::from_line_errors(&candidate.line_errors);

    println!("Payload: {:?}", candidate.payload);
    match gate.check(&candidate) {
        Ok(isbn) => println!(
            "Format: ok ({}, check digit {})",
            isbn,
            if isbn.has_valid_check_digit() { "ok" } else { "BAD" }
        ),
        Err(reject) => println!("Format: rejected ({})", format_reject_label(reject)),
    }
    println!(
        "Quality: {} (threshold {}) {}",
        score,
        config.quality_threshold,
        if score.passes(config.quality_threshold) {
            "ok"
        } else {
            "rejected"
        }
    );
    ExitCode::SUCCESS
}

fn config_cmd(config: &EngineConfig) -> ExitCode {
    match serde_json::to_string_pretty(config) {
        Ok(out) => {
            println!("{}", out);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Failed to encode config: {}", err);
            ExitCode::FAILURE
        }
    }
}
