// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification: map an ordered quad onto a fixed-size canvas.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use imageproc::geometric_transformations::{Interpolation, Projection, warp_into};
use screenscan_core::error::Result;
use screenscan_core::types::{OutputSize, Quad};
use tracing::{debug, info, instrument};

use crate::geometry::homography::quad_projection;

/// Warps the region inside a quadrilateral onto an `OutputSize` canvas.
#[derive(Debug, Clone, Copy, Default)]
pub struct PerspectiveWarper {
    output: OutputSize,
}

impl PerspectiveWarper {
    pub fn new(output: OutputSize) -> Self {
        Self { output }
    }

    pub fn output(&self) -> OutputSize {
        self.output
    }

    /// Destination corners `(0,0) (W-1,0) (W-1,H-1) (0,H-1)`, in the same
    /// winding as an ordered source quad.
    pub fn destination(&self) -> Quad {
        Quad::full_frame(self.output.width, self.output.height)
    }

    /// The projection taking `quad` (ordered `[tl, tr, br, bl]`) onto the
    /// destination rectangle.
    pub fn projection(&self, quad: &Quad) -> Result<Projection> {
        quad_projection(quad, &self.destination())
    }

    /// Rectify `image` so that `quad` fills the whole output canvas.
    ///
    /// The output is always exactly the configured size; aspect ratio is not
    /// preserved. Grayscale input stays grayscale, anything else is warped as
    /// RGB. Each output pixel is bilinearly sampled through the inverse
    /// homography; samples falling outside the source are black.
    #[instrument(skip(self, image), fields(output = %self.output))]
    pub fn warp(&self, image: &DynamicImage, quad: &Quad) -> Result<DynamicImage> {
        let projection = self.projection(quad)?;
        debug!(?projection, "Projection solved");

        let (out_w, out_h) = self.output.dimensions();
        let warped = match image {
            DynamicImage::ImageLuma8(gray) => {
                let mut output = GrayImage::new(out_w, out_h);
                warp_into(gray, &projection, Interpolation::Bilinear, Luma([0u8]), &mut output);
                DynamicImage::ImageLuma8(output)
            }
            other => {
                let rgb = other.to_rgb8();
                let mut output = RgbImage::new(out_w, out_h);
                warp_into(&rgb, &projection, Interpolation::Bilinear, Rgb([0u8, 0, 0]), &mut output);
                DynamicImage::ImageRgb8(output)
            }
        };

        info!(out_w, out_h, "Perspective correction applied");
        Ok(warped)
    }
}
