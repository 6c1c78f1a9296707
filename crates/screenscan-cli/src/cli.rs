// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line arguments and exit codes.

use std::path::PathBuf;

use clap::Parser;
use screenscan_core::human_errors::FailureKind;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,
    /// At least one input failed during processing.
    ProcessingError = 1,
    /// At least one input (or the configuration) was rejected outright.
    InvalidInput = 2,
}

impl ExitCode {
    pub fn for_failure(kind: FailureKind) -> Self {
        match kind {
            FailureKind::InvalidArgument => ExitCode::InvalidInput,
            FailureKind::ProcessingError => ExitCode::ProcessingError,
        }
    }

    /// Combine two outcomes; processing errors outrank input rejections.
    pub fn worst(self, other: ExitCode) -> ExitCode {
        match (self, other) {
            (ExitCode::ProcessingError, _) | (_, ExitCode::ProcessingError) => {
                ExitCode::ProcessingError
            }
            (ExitCode::InvalidInput, _) | (_, ExitCode::InvalidInput) => ExitCode::InvalidInput,
            _ => ExitCode::Success,
        }
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Extract a clean, upright, black-and-white screen from photos
#[derive(Parser, Debug)]
#[command(name = "screenscan")]
#[command(version)]
#[command(about = "Extract a clean, upright, black-and-white screen from photos", long_about = None)]
pub struct Cli {
    /// Source photos (JPEG, PNG, TIFF, ...)
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Directory for the processed PNGs [default: system temp dir]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// JSON pipeline configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print a JSON report per input instead of the bare output path
    #[arg(long)]
    pub json: bool,
}
