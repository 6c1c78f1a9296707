// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Screen extraction pipeline: quad detection, corner ordering, perspective
// rectification, Otsu binarization, and orientation correction.

pub mod binarize;
pub mod corners;
pub mod detect;
pub mod orientation;
pub mod pipeline;
pub mod warp;

pub use binarize::Binarizer;
pub use detect::QuadDetector;
pub use orientation::OrientationCorrector;
pub use pipeline::ScreenProcessor;
pub use warp::PerspectiveWarper;
