//! Yaw (vertical-axis) transforms between item-local and room coordinates.
//!
//! ## Rotation Convention
//!
//! Angles are radians about the vertical axis, matching three.js
//! `rotation.y`. An item with rotation `ρ` faces `(sin ρ, cos ρ)` on the
//! `(x, z)` floor plane and its lateral axis is `(cos ρ, -sin ρ)`.
//! - 0 = facing +z
//! - π/2 = facing +x
//! - π = facing -z
//!
//! Local coordinates use `x` for the lateral offset and `z` for the offset
//! along the facing direction.
//!
//! ## Loose Bounds
//!
//! Rotated rectangles are bounded by rotating the four corners and taking
//! the axis-aligned box of the result. For rectangles this is exact.

use std::f64::consts::TAU;

use crate::geometry::{Point, Rect};

/// A rotation about the vertical axis followed by a translation to `origin`.
#[derive(Debug, Clone, Copy)]
pub struct YawTransform {
    /// Rotation in radians
    pub angle: f64,
    /// Where the local origin lands in the parent frame
    pub origin: Point,
}

impl YawTransform {
    pub fn new(angle: f64, origin: Point) -> Self {
        Self { angle, origin }
    }

    /// Pure translation
    pub fn translation(origin: Point) -> Self {
        Self::new(0.0, origin)
    }

    /// Check if the rotation part is a no-op
    pub fn is_identity(&self) -> bool {
        self.angle.abs() < f64::EPSILON
    }

    /// Map a local point (lateral, forward) into the parent frame.
    ///
    /// ```text
    /// x' = ox + lx * cos(ρ) + lz * sin(ρ)
    /// z' = oz - lx * sin(ρ) + lz * cos(ρ)
    /// ```
    pub fn transform_point(&self, local: Point) -> Point {
        if self.is_identity() {
            return local.offset(self.origin.x, self.origin.z);
        }

        let (sin, cos) = self.angle.sin_cos();
        Point {
            x: self.origin.x + local.x * cos + local.z * sin,
            z: self.origin.z - local.x * sin + local.z * cos,
        }
    }

    /// Rotation of a child whose local rotation is `local`, in `[0, 2π)`
    pub fn transform_angle(&self, local: f64) -> f64 {
        (self.angle + local).rem_euclid(TAU)
    }

    /// Axis-aligned bounds of a local rectangle after the transform (loose bounds).
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        if self.is_identity() {
            return rect.translate(self.origin.x, self.origin.z);
        }

        let corners = [
            Point::new(rect.x, rect.z),
            Point::new(rect.right(), rect.z),
            Point::new(rect.x, rect.far()),
            Point::new(rect.right(), rect.far()),
        ];

        let mut min_x = f64::INFINITY;
        let mut min_z = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_z = f64::NEG_INFINITY;

        for corner in corners {
            let p = self.transform_point(corner);
            min_x = min_x.min(p.x);
            min_z = min_z.min(p.z);
            max_x = max_x.max(p.x);
            max_z = max_z.max(p.z);
        }

        Rect::new(min_x, min_z, max_x - min_x, max_z - min_z)
    }
}
