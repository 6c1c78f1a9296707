// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Screenscan.

use thiserror::Error;

/// Top-level error type for all Screenscan operations.
#[derive(Debug, Error)]
pub enum ScreenScanError {
    // -- Pipeline entry --
    #[error("invalid input image: {0}")]
    InvalidInput(String),

    // -- Geometry --
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    // -- Raster boundary --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ScreenScanError {
    /// True for errors raised because the caller handed over unusable input,
    /// as opposed to failures while processing it.
    pub fn is_input_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::Config(_) | Self::Serialization(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScreenScanError>;
