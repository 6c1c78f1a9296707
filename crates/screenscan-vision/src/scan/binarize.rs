// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binarization: grayscale, light blur, and a global Otsu threshold.

use image::{DynamicImage, GrayImage};
use imageproc::contrast::{ThresholdType, otsu_level, threshold};
use imageproc::filter::gaussian_blur_f32;
use screenscan_core::config::EnhanceConfig;
use tracing::{debug, info, instrument};

/// Intensity written for pixels above the threshold.
pub const WHITE: u8 = 255;
/// Intensity written for pixels at or below the threshold.
pub const BLACK: u8 = 0;

/// Turns a rectified image into a two-level black-and-white raster.
#[derive(Debug, Clone, Default)]
pub struct Binarizer {
    config: EnhanceConfig,
}

impl Binarizer {
    pub fn new(config: EnhanceConfig) -> Self {
        Self { config }
    }

    /// Grayscale, blur (sigma 0.8 by default, a 3x3 kernel's worth), then
    /// threshold every pixel against the Otsu level of the blurred image.
    ///
    /// The output has the input's dimensions and contains only [`BLACK`]
    /// and [`WHITE`].
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn binarize(&self, image: &DynamicImage) -> GrayImage {
        let gray = match image {
            DynamicImage::ImageLuma8(gray) => gray.clone(),
            other => other.to_luma8(),
        };
        let blurred = gaussian_blur_f32(&gray, self.config.blur_sigma);
        let level = otsu_level(&blurred);
        debug!(level, "Otsu level computed");

        // Strictly above the level is white; a uniform image gets level 0.
        let binary = threshold(&blurred, level, ThresholdType::Binary);
        info!(level, "Binarization complete");
        binary
    }
}
