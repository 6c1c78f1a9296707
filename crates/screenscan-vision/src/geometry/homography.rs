// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Planar homography between two quadrilaterals.

use imageproc::geometric_transformations::Projection;
use screenscan_core::error::{Result, ScreenScanError};
use screenscan_core::types::Quad;

/// Build the projective transform taking each `src` corner to the `dst`
/// corner at the same index.
///
/// Fails with [`ScreenScanError::DegenerateGeometry`] when either quad is
/// collinear or zero-area, or when no transform fits the corners.
pub fn quad_projection(src: &Quad, dst: &Quad) -> Result<Projection> {
    if src.is_degenerate() {
        return Err(ScreenScanError::DegenerateGeometry(format!(
            "source quadrilateral is collinear or zero-area: {:?}",
            src.corners
        )));
    }
    if dst.is_degenerate() {
        return Err(ScreenScanError::DegenerateGeometry(format!(
            "destination quadrilateral is collinear or zero-area: {:?}",
            dst.corners
        )));
    }

    Projection::from_control_points(control_points(src), control_points(dst)).ok_or_else(|| {
        ScreenScanError::DegenerateGeometry(format!(
            "no projective transform maps {:?} onto {:?}",
            src.corners, dst.corners
        ))
    })
}

fn control_points(quad: &Quad) -> [(f32, f32); 4] {
    quad.corners.map(|p| (p.x as f32, p.y as f32))
}
