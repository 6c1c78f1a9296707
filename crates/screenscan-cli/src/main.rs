// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screenscan: extract a clean, upright, black-and-white screen from photos.
//
// Entry point. Initialises logging, loads the pipeline configuration, and
// processes each input in turn on the blocking thread pool.

mod cli;
mod services;

use std::path::PathBuf;
use std::sync::{Arc, Once};

use clap::Parser;
use screenscan_core::PipelineConfig;
use screenscan_core::error::{Result, ScreenScanError};
use screenscan_core::human_errors::{FailureReason, humanize_error};
use screenscan_vision::ScreenProcessor;
use tracing::{error, info};

use cli::{Cli, ExitCode};
use services::output_dir::output_dir;
use services::worker::{ScreenReport, process_file};

static INIT_TRACING: Once = Once::new();

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
fn init_tracing() {
    INIT_TRACING.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();
    });
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    init_tracing();
    let cli = Cli::parse();

    info!(inputs = cli.inputs.len(), "Screenscan starting");

    let (processor, out_dir) = match setup(&cli) {
        Ok(setup) => setup,
        Err(err) => return report_failure(None, &err, cli.json).into(),
    };

    let mut exit = ExitCode::Success;
    for input in cli.inputs {
        let outcome = run_one(Arc::clone(&processor), input.clone(), out_dir.clone()).await;
        match outcome {
            Ok(report) => print_success(&report, cli.json),
            Err(err) => exit = exit.worst(report_failure(Some(&input), &err, cli.json)),
        }
    }
    exit.into()
}

fn setup(cli: &Cli) -> Result<(Arc<ScreenProcessor>, PathBuf)> {
    let config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let processor = ScreenProcessor::new(config)?;
    let out_dir = output_dir(cli.output_dir.as_deref())?;
    info!(output_dir = %out_dir.display(), "Output directory ready");
    Ok((Arc::new(processor), out_dir))
}

async fn run_one(
    processor: Arc<ScreenProcessor>,
    input: PathBuf,
    out_dir: PathBuf,
) -> Result<ScreenReport> {
    tokio::task::spawn_blocking(move || process_file(&processor, &input, &out_dir))
        .await
        .map_err(|err| ScreenScanError::Io(std::io::Error::other(err)))?
}

fn print_success(report: &ScreenReport, json: bool) {
    if json {
        match serde_json::to_string(report) {
            Ok(line) => println!("{line}"),
            Err(err) => error!(%err, "Failed to serialise report"),
        }
    } else {
        println!("{}", report.output.display());
    }
}

#[derive(serde::Serialize)]
struct FailureLine<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    input: Option<&'a std::path::Path>,
    error: FailureReason,
}

/// Log and print a failure, returning the exit code it maps to.
fn report_failure(input: Option<&std::path::Path>, err: &ScreenScanError, json: bool) -> ExitCode {
    let reason = humanize_error(err);
    error!(kind = reason.kind.code(), detail = %reason.detail, "Processing failed");
    let code = ExitCode::for_failure(reason.kind);
    if json {
        let line = FailureLine { input, error: reason };
        match serde_json::to_string(&line) {
            Ok(line) => println!("{line}"),
            Err(err) => error!(%err, "Failed to serialise failure"),
        }
    } else {
        match input {
            Some(path) => eprintln!("{}: {}", path.display(), reason),
            None => eprintln!("{reason}"),
        }
    }
    code
}
