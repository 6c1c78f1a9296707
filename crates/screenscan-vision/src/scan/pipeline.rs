// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen processor: runs detection, ordering, rectification, binarization,
// and orientation correction as one call.

use image::{DynamicImage, GrayImage};
use screenscan_core::config::PipelineConfig;
use screenscan_core::error::Result;
use screenscan_core::types::{Quad, Rotation};
use tracing::{info, instrument};

use crate::codec;
use crate::scan::binarize::Binarizer;
use crate::scan::corners::order_with;
use crate::scan::detect::{QuadDetector, QuadSource};
use crate::scan::orientation::OrientationCorrector;
use crate::scan::warp::PerspectiveWarper;

/// Everything the pipeline produced for one input.
#[derive(Debug, Clone)]
pub struct ProcessedScreen {
    /// Binary raster at the configured output size.
    pub image: GrayImage,
    /// The source quad, ordered `[tl, tr, br, bl]`.
    pub quad: Quad,
    pub source: QuadSource,
    pub rotation: Rotation,
    /// Orientation score of the chosen rotation.
    pub score: f64,
}

/// Extracts a clean, upright, binarized screen from a photo.
///
/// Holds only configuration; every call is independent, so one processor can
/// be shared across threads.
///
/// ```ignore
/// let processor = ScreenProcessor::new(PipelineConfig::default())?;
/// let screen = processor.process(&codec::open("photo.jpg")?)?;
/// let png = codec::to_png_bytes(&screen.image)?;
/// ```
#[derive(Debug, Clone)]
pub struct ScreenProcessor {
    config: PipelineConfig,
    detector: QuadDetector,
    warper: PerspectiveWarper,
    binarizer: Binarizer,
    corrector: OrientationCorrector,
}

impl ScreenProcessor {
    /// Build a processor; the configuration is validated first.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: PipelineConfig) -> Self {
        Self {
            detector: QuadDetector::new(config.detection.clone()),
            warper: PerspectiveWarper::new(config.output),
            binarizer: Binarizer::new(config.enhancement.clone()),
            corrector: OrientationCorrector::new(config.output),
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the full pipeline:
    ///
    /// 1. Reject empty or one-pixel-thin input
    /// 2. Detect the dominant quad (full frame if none)
    /// 3. Order its corners
    /// 4. Warp it onto the output canvas
    /// 5. Binarize with Otsu's threshold
    /// 6. Pick the upright rotation and normalise the size
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn process(&self, image: &DynamicImage) -> Result<ProcessedScreen> {
        codec::validate(image)?;

        let detection = self.detector.detect(image);
        let quad = order_with(self.config.detection.corner_ordering, &detection.quad);
        let warped = self.warper.warp(image, &quad)?;
        let binary = self.binarizer.binarize(&warped);
        let oriented = self.corrector.correct(&binary);

        info!(
            fallback = detection.is_fallback(),
            degrees = oriented.rotation.degrees(),
            output = %self.config.output,
            "Screen extracted"
        );

        Ok(ProcessedScreen {
            image: oriented.image,
            quad,
            source: detection.source,
            rotation: oriented.rotation,
            score: oriented.score,
        })
    }
}

impl Default for ScreenProcessor {
    fn default() -> Self {
        Self::from_validated(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::binarize::{BLACK, WHITE};
    use crate::scan::detect::tests::paint_quad;
    use image::{GrayImage, Luma, Rgb, RgbImage};
    use screenscan_core::ScreenScanError;
    use screenscan_core::types::{OutputSize, Point};

    fn is_binary(image: &GrayImage) -> bool {
        image.pixels().all(|p| p.0[0] == BLACK || p.0[0] == WHITE)
    }

    /// Rotate `p` about `centre` by `degrees` (clockwise on screen).
    fn rotate_about(p: Point, centre: Point, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let (dx, dy) = (p.x - centre.x, p.y - centre.y);
        Point::new(
            centre.x + dx * cos - dy * sin,
            centre.y + dx * sin + dy * cos,
        )
    }

    #[test]
    fn empty_input_is_rejected_before_processing() {
        let err = ScreenProcessor::default()
            .process(&DynamicImage::new_rgb8(0, 0))
            .unwrap_err();
        assert!(matches!(err, ScreenScanError::InvalidInput(_)));
    }

    #[test]
    fn one_pixel_wide_input_is_rejected() {
        let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(1, 50, Luma([90u8])));
        let err = ScreenProcessor::default().process(&img).unwrap_err();
        assert!(matches!(err, ScreenScanError::InvalidInput(_)));
    }

    #[test]
    fn corner_block_photo_still_produces_a_screen() {
        let img = GrayImage::from_fn(400, 300, |x, y| {
            Luma([if x < 200 && y < 150 { 30 } else { 220 }])
        });
        let screen = ScreenProcessor::default()
            .process(&DynamicImage::ImageLuma8(img))
            .unwrap();
        assert!(!screen.quad.is_degenerate(), "{:?}", screen.quad);
        assert_eq!(screen.image.dimensions(), (800, 600));
        assert!(is_binary(&screen.image));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = PipelineConfig::default();
        config.output = OutputSize::new(0, 600);
        assert!(matches!(
            ScreenProcessor::new(config),
            Err(ScreenScanError::Config(_))
        ));
    }

    #[test]
    fn blank_photo_uses_full_frame() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(320, 200, Rgb([90, 90, 90])));
        let screen = ScreenProcessor::default().process(&img).unwrap();
        assert_eq!(screen.source, QuadSource::FullFrame);
        assert_eq!(screen.quad, Quad::full_frame(320, 200));
        assert_eq!(screen.image.dimensions(), (800, 600));
        assert!(is_binary(&screen.image));
    }

    #[test]
    fn output_size_follows_config() {
        let mut config = PipelineConfig::default();
        config.output = OutputSize::new(400, 300);
        let processor = ScreenProcessor::new(config).unwrap();
        let img = DynamicImage::ImageLuma8(GrayImage::from_fn(250, 180, |x, _| {
            Luma([(x * 255 / 250) as u8])
        }));
        let screen = processor.process(&img).unwrap();
        assert_eq!(screen.image.dimensions(), (400, 300));
        assert!(is_binary(&screen.image));
    }

    /// A 1000x1200 photo of a card tilted by 6 degrees, covering the
    /// middle of the frame, with dark text lines across it.
    #[test]
    fn tilted_card_end_to_end() {
        let (width, height) = (1000u32, 1200u32);
        let centre = Point::new(500.0, 600.0);
        let (half_w, half_h) = (300.0, 180.0);
        let tilt = 6.0;

        let card = [
            Point::new(centre.x - half_w, centre.y - half_h),
            Point::new(centre.x + half_w, centre.y - half_h),
            Point::new(centre.x + half_w, centre.y + half_h),
            Point::new(centre.x - half_w, centre.y + half_h),
        ]
        .map(|p| rotate_about(p, centre, tilt));

        let mut photo = paint_quad(width, height, card, 35, 225);
        // Text lines: dark bars running along the card's long edge.
        for (x, y, pixel) in photo.enumerate_pixels_mut() {
            if pixel.0[0] != 225 {
                continue;
            }
            let local = rotate_about(Point::new(x as f64, y as f64), centre, -tilt);
            let u = local.x - (centre.x - half_w);
            let v = local.y - (centre.y - half_h);
            let in_margin = u > 40.0 && u < 2.0 * half_w - 40.0;
            if in_margin && v > 40.0 && v < 2.0 * half_h - 40.0 && (v as i64) % 36 < 10 {
                *pixel = Luma([60]);
            }
        }

        let rgb = DynamicImage::ImageLuma8(photo).to_rgb8();
        let screen = ScreenProcessor::default()
            .process(&DynamicImage::ImageRgb8(rgb))
            .unwrap();

        assert!(
            matches!(screen.source, QuadSource::Contour { .. }),
            "card not detected: {:?}",
            screen.source
        );
        for (found, expected) in screen.quad.corners.iter().zip(card.iter()) {
            assert!(
                found.distance(*expected) < 8.0,
                "corner {:?} too far from {:?}",
                found,
                expected
            );
        }

        assert_eq!(screen.image.dimensions(), (800, 600));
        assert!(is_binary(&screen.image));
        assert_eq!(screen.rotation, Rotation::Upright);

        // The card fills the frame: the border rows are card, not background.
        let white_in_row = |y: u32| {
            (0..800)
                .filter(|&x| screen.image.get_pixel(x, y).0[0] == WHITE)
                .count()
        };
        assert!(white_in_row(10) > 700, "top row {}", white_in_row(10));
        assert!(white_in_row(590) > 700, "bottom row {}", white_in_row(590));
    }
}
