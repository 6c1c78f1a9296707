// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenScanError};
use crate::types::OutputSize;

/// How the four detected corners are assigned their roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerOrdering {
    /// Closed-form `x + y` / `x - y` extremes with a winding fix-up.
    #[default]
    SumDiff,
    /// Angle around the centroid; holds up under strong rotation.
    Angular,
}

/// Settings for locating the screen quadrilateral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Gaussian sigma before edge detection (1.1 matches a 5x5 kernel).
    pub blur_sigma: f32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Douglas-Peucker tolerance as a fraction of the contour perimeter.
    pub approx_epsilon_ratio: f64,
    pub corner_ordering: CornerOrdering,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 50.0,
            canny_high: 150.0,
            approx_epsilon_ratio: 0.02,
            corner_ordering: CornerOrdering::SumDiff,
        }
    }
}

/// Settings for the binarization stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    /// Gaussian sigma before thresholding (0.8 matches a 3x3 kernel).
    pub blur_sigma: f32,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self { blur_sigma: 0.8 }
    }
}

/// Full pipeline settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Size of every rectified and final raster.
    pub output: OutputSize,
    pub detection: DetectionConfig,
    pub enhancement: EnhanceConfig,
}

impl PipelineConfig {
    /// Parse and validate a JSON document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.output.width < 2 || self.output.height < 2 {
            return Err(ScreenScanError::Config(format!(
                "output size must be at least 2x2, got {}",
                self.output
            )));
        }
        if !(self.detection.blur_sigma > 0.0) {
            return Err(ScreenScanError::Config(format!(
                "detection blur sigma must be positive, got {}",
                self.detection.blur_sigma
            )));
        }
        if !(self.enhancement.blur_sigma > 0.0) {
            return Err(ScreenScanError::Config(format!(
                "enhancement blur sigma must be positive, got {}",
                self.enhancement.blur_sigma
            )));
        }
        if !(self.detection.approx_epsilon_ratio > 0.0) {
            return Err(ScreenScanError::Config(format!(
                "approximation epsilon ratio must be positive, got {}",
                self.detection.approx_epsilon_ratio
            )));
        }
        if self.detection.canny_low < 0.0 || self.detection.canny_low > self.detection.canny_high {
            return Err(ScreenScanError::Config(format!(
                "canny thresholds must satisfy 0 <= low <= high, got {} / {}",
                self.detection.canny_low, self.detection.canny_high
            )));
        }
        Ok(())
    }
}
