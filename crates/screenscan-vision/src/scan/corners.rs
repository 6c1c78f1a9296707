// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering: assign the four detected corners their top-left,
// top-right, bottom-right, bottom-left roles.

use screenscan_core::config::CornerOrdering;
use screenscan_core::types::{Point, Quad, cross};

/// Order corners with the configured strategy.
pub fn order_with(strategy: CornerOrdering, quad: &Quad) -> Quad {
    match strategy {
        CornerOrdering::SumDiff => order_corners(quad),
        CornerOrdering::Angular => order_corners_angular(quad),
    }
}

/// Canonicalise four unordered corners to `[tl, tr, br, bl]`.
///
/// Top-left has the smallest `x + y` and bottom-right the largest. The two
/// `x - y` extremes fill the remaining roles; if they come out mirrored
/// (negative cross product of `tl->tr` and `tl->bl`) they are swapped.
///
/// Exact for upright or mildly skewed quads. Past roughly 45 degrees of
/// rotation the roles can be misassigned; use [`order_corners_angular`].
pub fn order_corners(quad: &Quad) -> Quad {
    let pts = &quad.corners;

    let top_left = first_extreme(pts, Point::sum, Extreme::Min);
    let bottom_right = first_extreme(pts, Point::sum, Extreme::Max);
    let mut top_right = first_extreme(pts, Point::diff, Extreme::Min);
    let mut bottom_left = first_extreme(pts, Point::diff, Extreme::Max);

    if cross(top_left, top_right, bottom_left) < 0.0 {
        std::mem::swap(&mut top_right, &mut bottom_left);
    }

    Quad::new([top_left, top_right, bottom_right, bottom_left])
}

/// Order corners clockwise (on screen) by their angle around the centroid,
/// starting from the corner with the smallest `x + y`.
pub fn order_corners_angular(quad: &Quad) -> Quad {
    let cx = quad.corners.iter().map(|p| p.x).sum::<f64>() / 4.0;
    let cy = quad.corners.iter().map(|p| p.y).sum::<f64>() / 4.0;

    let mut sorted = quad.corners;
    // y grows downwards, so increasing atan2 runs clockwise on screen.
    sorted.sort_by(|a, b| {
        let angle_a = (a.y - cy).atan2(a.x - cx);
        let angle_b = (b.y - cy).atan2(b.x - cx);
        angle_a.total_cmp(&angle_b)
    });

    let start = (0..4)
        .min_by(|&i, &j| sorted[i].sum().total_cmp(&sorted[j].sum()))
        .unwrap_or(0);
    sorted.rotate_left(start);
    Quad::new(sorted)
}

#[derive(Clone, Copy)]
enum Extreme {
    Min,
    Max,
}

/// The first point (by input index) reaching the extreme of `key`.
fn first_extreme(points: &[Point; 4], key: fn(Point) -> f64, extreme: Extreme) -> Point {
    let mut best = points[0];
    let mut best_key = key(best);
    for &p in &points[1..] {
        let k = key(p);
        let better = match extreme {
            Extreme::Min => k < best_key,
            Extreme::Max => k > best_key,
        };
        if better {
            best = p;
            best_key = k;
        }
    }
    best
}
