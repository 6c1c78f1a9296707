// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-file processing: decode, run the pipeline, write the PNG.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use screenscan_core::error::Result;
use screenscan_core::types::{Quad, Rotation};
use screenscan_vision::{QuadSource, ScreenProcessor, codec};
use serde::Serialize;
use tracing::{info, instrument};

use super::output_dir::claim_output;

/// What was done with one input.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub detection: QuadSource,
    pub quad: Quad,
    pub rotation: Rotation,
    pub score: f64,
    pub processed_at: DateTime<Utc>,
}

/// Process `input` and save the result as a new PNG in `out_dir`.
///
/// Blocking; callers on the async runtime go through `spawn_blocking`.
#[instrument(skip(processor), fields(input = %input.display()))]
pub fn process_file(processor: &ScreenProcessor, input: &Path, out_dir: &Path) -> Result<ScreenReport> {
    let photo = codec::open(input)?;
    let screen = processor.process(&photo)?;

    let png = codec::to_png_bytes(&screen.image)?;
    let processed_at = Utc::now();
    let (output, mut file) = claim_output(out_dir, processed_at)?;
    if let Err(err) = file.write_all(&png).and_then(|()| file.sync_all()) {
        // No truncated PNG under a claimed name.
        let _ = std::fs::remove_file(&output);
        return Err(err.into());
    }

    info!(output = %output.display(), "Screen saved");

    Ok(ScreenReport {
        input: input.to_path_buf(),
        output,
        detection: screen.source,
        quad: screen.quad,
        rotation: screen.rotation,
        score: screen.score,
        processed_at,
    })
}
