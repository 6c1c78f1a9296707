// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Douglas-Peucker simplification of traced contours.

use screenscan_core::types::{Point, cross};

/// Simplify a closed curve, keeping only vertices further than `epsilon`
/// from the simplified outline.
///
/// The curve is split at its two mutually farthest points, which are always
/// kept, and each half is reduced as an open polyline. The result carries no
/// repeated closing vertex.
pub fn simplify_closed(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n <= 3 {
        return points.to_vec();
    }

    let a = farthest_from(points, points[0]);
    let b = farthest_from(points, points[a]);
    if a == b {
        // Every point coincides.
        return vec![points[a]];
    }
    let (first, second) = (a.min(b), a.max(b));

    let mut simplified = simplify_open(&points[first..=second], epsilon);
    simplified.pop();

    let wrapped: Vec<Point> = points[second..]
        .iter()
        .chain(points[..=first].iter())
        .copied()
        .collect();
    let mut tail = simplify_open(&wrapped, epsilon);
    tail.pop();

    simplified.extend(tail);
    simplified
}

/// Douglas-Peucker on an open polyline. Both endpoints are kept.
pub fn simplify_open(points: &[Point], epsilon: f64) -> Vec<Point> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }

    let mut keep = vec![false; n];
    keep[0] = true;
    keep[n - 1] = true;

    let mut pending = vec![(0usize, n - 1)];
    while let Some((start, end)) = pending.pop() {
        if end <= start + 1 {
            continue;
        }
        let (index, distance) = (start + 1..end)
            .map(|i| (i, segment_distance(points[i], points[start], points[end])))
            .fold((start, -1.0), |best, candidate| {
                if candidate.1 > best.1 { candidate } else { best }
            });
        if distance > epsilon {
            keep[index] = true;
            pending.push((start, index));
            pending.push((index, end));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(*p))
        .collect()
}

/// Distance from `p` to the line through `a` and `b`, or to `a` when the
/// two coincide.
fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let length = a.distance(b);
    if length == 0.0 {
        return p.distance(a);
    }
    cross(a, b, p).abs() / length
}

fn farthest_from(points: &[Point], origin: Point) -> usize {
    let mut best = 0;
    let mut best_distance = -1.0;
    for (i, p) in points.iter().enumerate() {
        let d = p.distance(origin);
        if d > best_distance {
            best = i;
            best_distance = d;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trace every integer point around the border of an axis-aligned box,
    /// clockwise from the top-left, the way a border follower would.
    fn traced_box(left: i32, top: i32, right: i32, bottom: i32) -> Vec<Point> {
        let mut pts = Vec::new();
        for x in left..right {
            pts.push(Point::new(x as f64, top as f64));
        }
        for y in top..bottom {
            pts.push(Point::new(right as f64, y as f64));
        }
        for x in (left + 1..=right).rev() {
            pts.push(Point::new(x as f64, bottom as f64));
        }
        for y in (top + 1..=bottom).rev() {
            pts.push(Point::new(left as f64, y as f64));
        }
        pts
    }

    #[test]
    fn traced_box_simplifies_to_its_corners() {
        let pts = traced_box(10, 20, 110, 70);
        let epsilon = 0.02 * 300.0;
        let simplified = simplify_closed(&pts, epsilon);
        assert_eq!(simplified.len(), 4, "got {:?}", simplified);
        for corner in [
            Point::new(10.0, 20.0),
            Point::new(110.0, 20.0),
            Point::new(110.0, 70.0),
            Point::new(10.0, 70.0),
        ] {
            assert!(simplified.contains(&corner), "missing {:?}", corner);
        }
    }

    #[test]
    fn start_mid_edge_still_gives_four() {
        let mut pts = traced_box(0, 0, 80, 60);
        pts.rotate_left(37);
        let simplified = simplify_closed(&pts, 0.02 * 280.0);
        assert_eq!(simplified.len(), 4, "got {:?}", simplified);
    }

    #[test]
    fn open_polyline_keeps_the_kink() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.1),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let simplified = simplify_open(&pts, 1.0);
        assert_eq!(
            simplified,
            vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn coincident_points_collapse() {
        let pts = vec![Point::new(4.0, 4.0); 6];
        assert_eq!(simplify_closed(&pts, 1.0), vec![Point::new(4.0, 4.0)]);
    }
}
