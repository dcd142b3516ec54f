//! Corpus statistics binary.
//!
//! Runs one aggregation variant over a newline-delimited JSON comment dump
//! and prints the ranked result.
//!
//! ## Usage
//!
//! ```bash
//! corpus_stats <diversity|overlap|depth> <input-file>
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `WORKERS`: worker threads per phase (default: 8)
//! - `TOP_K`: number of ranked results (default: 10)
//! - `RUST_LOG`: log level filter (default: info)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//! - `OUTPUT_FORMAT`: "text" for `label: score` lines, "json" for a JSON array (default: text)

use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use corpus_kernel::{run_cooccurrence, run_diversity, run_thread_depth, Candidate, RunConfig};

/// Initialize the tracing subscriber with JSON or pretty format.
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "corpus_stats=info,corpus_kernel=info".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();
    }
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn print_report(ranked: &[Candidate]) {
    let output_format = std::env::var("OUTPUT_FORMAT").unwrap_or_else(|_| "text".to_string());
    if output_format == "json" {
        match serde_json::to_string_pretty(ranked) {
            Ok(json) => println!("{json}"),
            Err(e) => error!(error = %e, "Failed to serialize report"),
        }
    } else {
        for candidate in ranked {
            println!("{candidate}");
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let mut args = std::env::args().skip(1);
    let (variant, path) = match (args.next(), args.next()) {
        (Some(variant), Some(path)) => (variant, path),
        _ => {
            eprintln!("Usage: corpus_stats <diversity|overlap|depth> <input-file>");
            return ExitCode::FAILURE;
        }
    };

    let config = RunConfig {
        workers: env_usize("WORKERS", 8),
        top_k: env_usize("TOP_K", 10),
    };
    info!(
        variant = %variant,
        input = %path,
        workers = config.workers,
        top_k = config.top_k,
        "Starting corpus run"
    );

    let input = match File::open(&path) {
        Ok(file) => BufReader::new(file),
        Err(e) => {
            error!(input = %path, error = %e, "Failed to open input file");
            return ExitCode::FAILURE;
        }
    };

    let result = match variant.as_str() {
        "diversity" => run_diversity(input, &config),
        "overlap" => run_cooccurrence(input, &config),
        "depth" => run_thread_depth(input, &config),
        other => {
            eprintln!("Unknown variant: {other} (expected diversity, overlap or depth)");
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(ranked) => {
            print_report(&ranked);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}
