// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Geometry helpers: quad-to-quad projections and Douglas-Peucker
// simplification of traced contours. Points and quads live in
// `screenscan_core::types`.

pub mod homography;
pub mod polygon;

pub use homography::quad_projection;
