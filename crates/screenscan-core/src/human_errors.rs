// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Structured failure reasons for the integration boundary.
//
// Every technical error is mapped to plain English with a clear suggestion,
// and tagged as either an input rejection or a processing failure so callers
// can tell the two apart without parsing messages.

use serde::Serialize;

use crate::error::ScreenScanError;

/// Which side of the boundary a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The caller supplied something unusable (missing, empty, undecodable).
    InvalidArgument,
    /// The input was accepted but processing failed.
    ProcessingError,
}

impl FailureKind {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            FailureKind::InvalidArgument => "INVALID_ARGUMENT",
            FailureKind::ProcessingError => "PROCESSING_ERROR",
        }
    }
}

/// A human-readable failure with an actionable suggestion.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReason {
    pub kind: FailureKind,
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// The underlying technical error, for logs and bug reports.
    pub detail: String,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} {}", self.kind.code(), self.message, self.suggestion)
    }
}

/// Convert a `ScreenScanError` into a `FailureReason`.
pub fn humanize_error(err: &ScreenScanError) -> FailureReason {
    let detail = err.to_string();
    let kind = if err.is_input_rejection() {
        FailureKind::InvalidArgument
    } else {
        FailureKind::ProcessingError
    };
    let (message, suggestion) = match err {
        ScreenScanError::InvalidInput(_) => (
            "This image couldn't be read.",
            "Make sure the file is a JPEG or PNG photo and that it isn't empty.",
        ),
        ScreenScanError::Config(_) => (
            "The processing settings are not valid.",
            "Check the configuration file, or remove it to use the defaults.",
        ),
        ScreenScanError::DegenerateGeometry(_) => (
            "We couldn't straighten the screen in this photo.",
            "Take the photo straight on, with the whole screen visible and its four corners in frame.",
        ),
        ScreenScanError::ImageError(_) => (
            "The processed image couldn't be saved.",
            "Check there is free disk space and that the output folder is writable.",
        ),
        ScreenScanError::Io(_) => (
            "A file couldn't be read or written.",
            "Check the file exists and that you have permission to access the folder.",
        ),
        ScreenScanError::Serialization(_) => (
            "The settings file couldn't be understood.",
            "Make sure the configuration file is valid JSON.",
        ),
    };
    FailureReason {
        kind,
        message: message.into(),
        suggestion: suggestion.into(),
        detail,
    }
}
