// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output directory resolution and file naming.

use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use screenscan_core::error::Result;

/// Return the output directory, creating it if needed.
///
/// Without an explicit choice this is the system temp directory, which plays
/// the part of an app cache dir.
pub fn output_dir(requested: Option<&Path>) -> Result<PathBuf> {
    let dir = match requested {
        Some(dir) => dir.to_path_buf(),
        None => std::env::temp_dir(),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Suffixes tried before giving up on a timestamp.
const MAX_SUFFIX: u32 = 10_000;

/// Create a new, empty `screen_<unix-millis>.png` inside `dir`, adding a
/// numeric suffix if that name is already taken.
///
/// The file is created with `create_new`, so concurrent writers sharing
/// `dir` never end up with the same path.
pub fn claim_output(dir: &Path, at: DateTime<Utc>) -> Result<(PathBuf, File)> {
    let millis = at.timestamp_millis();
    for n in 0..MAX_SUFFIX {
        let name = match n {
            0 => format!("screen_{millis}.png"),
            n => format!("screen_{millis}_{n}.png"),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err.into()),
        }
    }
    Err(std::io::Error::new(
        ErrorKind::AlreadyExists,
        format!("no free output name for timestamp {millis} in {}", dir.display()),
    )
    .into())
}
