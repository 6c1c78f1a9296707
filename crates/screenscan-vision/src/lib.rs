// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// screenscan-vision: Screen extraction pipeline for Screenscan.
//
// Finds the dominant quadrilateral in a photo, rectifies it onto a fixed-size
// canvas, binarizes the result with Otsu's method, and picks the upright
// orientation among the four axis-aligned rotations.

pub mod codec;
pub mod geometry;
pub mod scan;

// Re-export the primary structs so callers can use `screenscan_vision::ScreenProcessor` etc.
pub use geometry::homography::quad_projection;
pub use scan::binarize::Binarizer;
pub use scan::corners::{order_corners, order_corners_angular};
pub use scan::detect::{Detection, QuadDetector, QuadSource};
pub use scan::orientation::{OrientationCorrector, OrientationScore, VerticalGradientScore};
pub use scan::pipeline::{ProcessedScreen, ScreenProcessor};
pub use scan::warp::PerspectiveWarper;
