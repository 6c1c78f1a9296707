// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quad detection: find the dominant four-sided boundary in a photo via Canny
// edges, border following, and Douglas-Peucker simplification.

use image::DynamicImage;
use imageproc::contours::{Contour, find_contours};
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::geometry::{arc_length, contour_area};
use screenscan_core::config::DetectionConfig;
use screenscan_core::types::{Point, Quad};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::geometry::polygon::simplify_closed;
use crate::scan::corners::order_with;

/// A traced contour must enclose at least this share of the area of the
/// quad it simplifies to. Open edges traced out and back enclose almost
/// nothing.
const MIN_ENCLOSED_RATIO: f64 = 0.5;

/// Where a detected quad came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum QuadSource {
    /// A traced contour that simplified to exactly four vertices.
    Contour {
        /// Position of the contour in descending-area order.
        rank: usize,
        area: f64,
    },
    /// Nothing simplified to four vertices; the full image bounds are used.
    FullFrame,
}

/// The result of quad detection. Corners are in contour order, not yet
/// canonicalised.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub quad: Quad,
    pub source: QuadSource,
}

impl Detection {
    pub fn is_fallback(&self) -> bool {
        self.source == QuadSource::FullFrame
    }
}

/// Locates the most plausible screen or document boundary in an image.
#[derive(Debug, Clone, Default)]
pub struct QuadDetector {
    config: DetectionConfig,
}

impl QuadDetector {
    pub fn new(config: DetectionConfig) -> Self {
        Self { config }
    }

    /// Find the dominant quadrilateral.
    ///
    /// ## Pipeline
    ///
    /// 1. Convert to grayscale
    /// 2. Gaussian blur (sigma 1.1 by default, a 5x5 kernel's worth)
    /// 3. Canny edge detection (50 / 150 by default)
    /// 4. Trace every contour in the edge map, ignoring nesting
    /// 5. Sort contours by enclosed area, largest first
    /// 6. Simplify each with tolerance `0.02 * perimeter`; the first with
    ///    exactly four vertices that encloses a real region wins
    ///
    /// If no contour qualifies, the full image bounds are returned. That is
    /// a normal outcome, not an error.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &DynamicImage) -> Detection {
        let (width, height) = (image.width(), image.height());

        let gray = image.to_luma8();
        let blurred = gaussian_blur_f32(&gray, self.config.blur_sigma);
        let edges = canny(&blurred, self.config.canny_low, self.config.canny_high);

        let mut contours: Vec<(Contour<i32>, f64)> = find_contours::<i32>(&edges)
            .into_iter()
            .map(|contour| {
                let area = contour_area(&contour.points);
                (contour, area)
            })
            .collect();
        // Stable sort: equal areas keep tracing order.
        contours.sort_by(|a, b| b.1.total_cmp(&a.1));
        debug!(contours = contours.len(), "Contours traced");

        for (rank, (contour, area)) in contours.iter().enumerate() {
            let perimeter = arc_length(&contour.points, true);
            if perimeter <= 0.0 {
                continue;
            }
            let points: Vec<Point> = contour
                .points
                .iter()
                .map(|p| Point::new(p.x as f64, p.y as f64))
                .collect();
            let approx = simplify_closed(&points, self.config.approx_epsilon_ratio * perimeter);
            let [a, b, c, d] = approx[..] else {
                continue;
            };
            let quad = Quad::new([a, b, c, d]);
            if !self.encloses(&quad, *area) {
                debug!(rank, area, "Skipping four-vertex contour that encloses no region");
                continue;
            }
            info!(rank, area, perimeter, "Quadrilateral contour found");
            return Detection {
                quad,
                source: QuadSource::Contour { rank, area: *area },
            };
        }

        warn!(
            contours = contours.len(),
            "No contour simplified to a usable quadrilateral; using the full frame"
        );
        Detection {
            quad: Quad::full_frame(width, height),
            source: QuadSource::FullFrame,
        }
    }

    /// True when `quad` still spans a real region once its corners are
    /// ordered, and the traced contour fills a fair share of it.
    fn encloses(&self, quad: &Quad, traced_area: f64) -> bool {
        let ordered = order_with(self.config.corner_ordering, quad);
        !ordered.is_degenerate() && traced_area >= MIN_ENCLOSED_RATIO * ordered.area()
    }
}
