// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: image-space points, quadrilaterals, canonical output size,
// and the four axis-aligned rotations.

use serde::{Deserialize, Serialize};

/// Triangles with less area than this (in square pixels) count as collinear.
const COLLINEAR_AREA_EPSILON: f64 = 1e-6;

/// A point in image space (x to the right, y downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// `x + y`, smallest at the top-left of an upright shape.
    pub fn sum(self) -> f64 {
        self.x + self.y
    }

    /// `x - y`, largest towards the top-right of an upright shape.
    pub fn diff(self) -> f64 {
        self.x - self.y
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// 2-D cross product of the vectors `origin -> a` and `origin -> b`.
pub fn cross(origin: Point, a: Point, b: Point) -> f64 {
    (a.x - origin.x) * (b.y - origin.y) - (a.y - origin.y) * (b.x - origin.x)
}

/// Four corner points.
///
/// A quad produced by detection is unordered. After corner ordering the
/// corners are `[top_left, top_right, bottom_right, bottom_left]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quad {
    pub corners: [Point; 4],
}

impl Quad {
    pub const fn new(corners: [Point; 4]) -> Self {
        Self { corners }
    }

    /// The full bounds of a `width` x `height` raster, in canonical order.
    pub fn full_frame(width: u32, height: u32) -> Self {
        let right = width.saturating_sub(1) as f64;
        let bottom = height.saturating_sub(1) as f64;
        Self::new([
            Point::new(0.0, 0.0),
            Point::new(right, 0.0),
            Point::new(right, bottom),
            Point::new(0.0, bottom),
        ])
    }

    /// Shoelace area; positive when the corners run clockwise on screen.
    pub fn signed_area(&self) -> f64 {
        let mut twice = 0.0;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            twice += a.x * b.y - b.x * a.y;
        }
        twice / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// True when the quad has no usable area or any three corners are
    /// collinear. Such a quad cannot define a homography.
    pub fn is_degenerate(&self) -> bool {
        if self.area() < COLLINEAR_AREA_EPSILON {
            return true;
        }
        (0..4).any(|skip| {
            let mut rest = self
                .corners
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, p)| *p);
            match (rest.next(), rest.next(), rest.next()) {
                (Some(a), Some(b), Some(c)) => cross(a, b, c).abs() / 2.0 < COLLINEAR_AREA_EPSILON,
                _ => true,
            }
        })
    }
}

/// Canonical output raster dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: u32,
    pub height: u32,
}

impl OutputSize {
    pub const CANONICAL: OutputSize = OutputSize {
        width: 800,
        height: 600,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for OutputSize {
    fn default() -> Self {
        Self::CANONICAL
    }
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rotations tried by the orientation corrector, clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Upright,
    Clockwise90,
    Clockwise180,
    Clockwise270,
}

impl Rotation {
    /// Every rotation, in tie-break priority order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Upright,
        Rotation::Clockwise90,
        Rotation::Clockwise180,
        Rotation::Clockwise270,
    ];

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Upright => 0,
            Rotation::Clockwise90 => 90,
            Rotation::Clockwise180 => 180,
            Rotation::Clockwise270 => 270,
        }
    }

    /// Whether this rotation swaps width and height.
    pub fn is_quarter_turn(self) -> bool {
        matches!(self, Rotation::Clockwise90 | Rotation::Clockwise270)
    }
}
