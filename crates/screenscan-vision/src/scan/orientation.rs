// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orientation correction: try the four axis-aligned rotations, keep the one
// with the strongest horizontal structure, and normalise the final size.

use image::GrayImage;
use image::imageops::{self, FilterType};
use imageproc::gradients::vertical_sobel;
use screenscan_core::types::{OutputSize, Rotation};
use tracing::{debug, info, instrument};

use crate::scan::binarize::{BLACK, WHITE};

/// Scores how upright a binary raster looks. Higher is more upright.
pub trait OrientationScore {
    fn score(&self, image: &GrayImage) -> f64;
}

/// Sum of saturated absolute vertical Sobel responses.
///
/// Text lines and bezels run horizontally when the image is upright, which
/// produces strong gradients along y.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerticalGradientScore;

impl OrientationScore for VerticalGradientScore {
    fn score(&self, image: &GrayImage) -> f64 {
        horizontal_score(image)
    }
}

/// Sum over all pixels of `min(|dI/dy|, 255)` using a 3x3 Sobel kernel.
pub fn horizontal_score(image: &GrayImage) -> f64 {
    vertical_sobel(image)
        .pixels()
        .map(|p| p.0[0].unsigned_abs().min(255) as u64)
        .sum::<u64>() as f64
}

/// Rotate clockwise by a multiple of 90 degrees.
pub fn rotate(image: &GrayImage, rotation: Rotation) -> GrayImage {
    match rotation {
        Rotation::Upright => image.clone(),
        Rotation::Clockwise90 => imageops::rotate90(image),
        Rotation::Clockwise180 => imageops::rotate180(image),
        Rotation::Clockwise270 => imageops::rotate270(image),
    }
}

/// One rotated copy of the input and its score.
#[derive(Debug, Clone)]
pub struct OrientationCandidate {
    pub rotation: Rotation,
    pub image: GrayImage,
    pub score: f64,
}

/// The corrector's result.
#[derive(Debug, Clone)]
pub struct Oriented {
    /// The winning candidate, resized to the output size.
    pub image: GrayImage,
    pub rotation: Rotation,
    /// Score of the winning candidate before resizing.
    pub score: f64,
}

/// Picks the upright rotation of a binary raster.
#[derive(Debug, Clone)]
pub struct OrientationCorrector<S = VerticalGradientScore> {
    scorer: S,
    output: OutputSize,
}

impl OrientationCorrector<VerticalGradientScore> {
    pub fn new(output: OutputSize) -> Self {
        Self::with_scorer(VerticalGradientScore, output)
    }
}

impl Default for OrientationCorrector<VerticalGradientScore> {
    fn default() -> Self {
        Self::new(OutputSize::default())
    }
}

impl<S: OrientationScore> OrientationCorrector<S> {
    pub fn with_scorer(scorer: S, output: OutputSize) -> Self {
        Self { scorer, output }
    }

    /// Score the input under each rotation, in [`Rotation::ALL`] order.
    pub fn candidates(&self, image: &GrayImage) -> [OrientationCandidate; 4] {
        Rotation::ALL.map(|rotation| {
            let rotated = rotate(image, rotation);
            let score = self.scorer.score(&rotated);
            debug!(degrees = rotation.degrees(), score, "Orientation candidate scored");
            OrientationCandidate {
                rotation,
                image: rotated,
                score,
            }
        })
    }

    /// Rotate to the best-scoring orientation and resize to the output size.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn correct(&self, image: &GrayImage) -> Oriented {
        let winner = select(self.candidates(image));
        info!(
            degrees = winner.rotation.degrees(),
            score = winner.score,
            "Orientation selected"
        );
        Oriented {
            image: normalize_size(winner.image, self.output),
            rotation: winner.rotation,
            score: winner.score,
        }
    }
}

/// The highest-scoring candidate; ties go to the earliest.
pub fn select(candidates: [OrientationCandidate; 4]) -> OrientationCandidate {
    let [first, rest @ ..] = candidates;
    rest.into_iter().fold(first, |best, candidate| {
        if candidate.score > best.score { candidate } else { best }
    })
}

/// Resize a binary raster to `output`, keeping it two-level.
///
/// Area-style averaging is applied and the result snapped back to black and
/// white at the midpoint. Already-sized input is returned as is.
pub fn normalize_size(image: GrayImage, output: OutputSize) -> GrayImage {
    if image.dimensions() == output.dimensions() {
        return image;
    }
    let mut resized = imageops::resize(&image, output.width, output.height, FilterType::Triangle);
    for pixel in resized.pixels_mut() {
        pixel.0[0] = if pixel.0[0] > 127 { WHITE } else { BLACK };
    }
    resized
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// 800x600 with black horizontal bars, like lines of text.
    fn ruled_page() -> GrayImage {
        GrayImage::from_fn(800, 600, |x, y| {
            let bar = y % 40 < 8 && (60..740).contains(&x);
            Luma([if bar { BLACK } else { WHITE }])
        })
    }

    #[test]
    fn upright_page_stays_upright() {
        let oriented = OrientationCorrector::default().correct(&ruled_page());
        assert_eq!(oriented.rotation, Rotation::Upright);
        assert_eq!(oriented.image.dimensions(), (800, 600));
    }

    #[test]
    fn quarter_turned_page_is_derotated() {
        let page = imageops::rotate90(&ruled_page());
        assert_eq!(page.dimensions(), (600, 800));

        let corrector = OrientationCorrector::default();
        let oriented = corrector.correct(&page);
        assert!(
            oriented.rotation.is_quarter_turn(),
            "picked {:?}",
            oriented.rotation
        );

        let independent_max = Rotation::ALL
            .iter()
            .map(|&r| horizontal_score(&rotate(&page, r)))
            .fold(f64::MIN, f64::max);
        assert_eq!(oriented.score, independent_max);

        assert_eq!(oriented.image.dimensions(), (800, 600));
        assert!(horizontal_score(&oriented.image) > horizontal_score(&imageops::resize(
            &page,
            800,
            600,
            FilterType::Nearest
        )));
    }

    #[test]
    fn ties_go_to_the_lowest_rotation() {
        let blank = GrayImage::from_pixel(30, 20, Luma([WHITE]));
        let candidates = OrientationCorrector::default().candidates(&blank);
        assert!(candidates.iter().all(|c| c.score == 0.0));
        let winner = select(candidates);
        assert_eq!(winner.rotation, Rotation::Upright);
    }

    #[test]
    fn candidates_cover_all_rotations() {
        let img = GrayImage::from_pixel(40, 10, Luma([BLACK]));
        let candidates = OrientationCorrector::default().candidates(&img);
        assert_eq!(candidates.each_ref().map(|c| c.rotation), Rotation::ALL);
        assert_eq!(candidates[1].image.dimensions(), (10, 40));
        assert_eq!(candidates[2].image.dimensions(), (40, 10));
    }

    #[test]
    fn custom_scorer_is_used() {
        /// Prefers tall images.
        struct Tall;
        impl OrientationScore for Tall {
            fn score(&self, image: &GrayImage) -> f64 {
                image.height() as f64 - image.width() as f64
            }
        }
        let img = GrayImage::from_pixel(80, 60, Luma([WHITE]));
        let oriented = OrientationCorrector::with_scorer(Tall, OutputSize::new(80, 60)).correct(&img);
        assert_eq!(oriented.rotation, Rotation::Clockwise90);
    }

    #[test]
    fn resize_keeps_two_levels() {
        let img = GrayImage::from_fn(600, 800, |x, y| {
            Luma([if (x / 7 + y / 5) % 2 == 0 { BLACK } else { WHITE }])
        });
        let out = normalize_size(img, OutputSize::CANONICAL);
        assert_eq!(out.dimensions(), (800, 600));
        assert!(out.pixels().all(|p| p.0[0] == BLACK || p.0[0] == WHITE));
    }

    #[test]
    fn saturated_score() {
        // A single white-to-black step: every pixel on the two rows either
        // side of it saturates at 255.
        let img = GrayImage::from_fn(10, 10, |_, y| Luma([if y < 5 { WHITE } else { BLACK }]));
        assert_eq!(horizontal_score(&img), 2.0 * 10.0 * 255.0);
    }
}
