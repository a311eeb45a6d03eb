//! Geometry primitives shared by the resolver, generator and validator
//!
//! Everything here is plain data. Distances are meters. The floor plane is
//! `(x, z)` with the room origin at one corner; `y` points up.

use serde::{Deserialize, Serialize};

use crate::layout::transform::YawTransform;

/// Tolerance used for all geometric comparisons
pub const EPSILON: f64 = 1e-9;

/// A point on the floor plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn offset(&self, dx: f64, dz: f64) -> Point {
        Point::new(self.x + dx, self.z + dz)
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (other.x - self.x).hypot(other.z - self.z)
    }
}

/// A position in room space; `y` is the base elevation of the item
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the floor plane
    pub fn floor(&self) -> Point {
        Point::new(self.x, self.z)
    }

    /// Whether the item stands on the floor rather than on another item
    pub fn is_floor_standing(&self) -> bool {
        self.y.abs() < EPSILON
    }
}

/// An axis-aligned rectangle on the floor plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub z: f64,
    pub width: f64,
    pub length: f64,
}

impl Rect {
    pub fn new(x: f64, z: f64, width: f64, length: f64) -> Self {
        Self {
            x,
            z,
            width,
            length,
        }
    }

    /// Rectangle of the given half extents around a center
    pub fn centered(center: Point, half_width: f64, half_length: f64) -> Self {
        Self::new(
            center.x - half_width,
            center.z - half_length,
            half_width * 2.0,
            half_length * 2.0,
        )
    }

    /// Far x edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Far z edge
    pub fn far(&self) -> f64 {
        self.z + self.length
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.z + self.length / 2.0)
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Strict interior intersection; rectangles that only touch do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.z < other.far()
            && self.far() > other.z
    }

    /// Whether `other` lies completely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.z >= self.z - EPSILON
            && other.far() <= self.far() + EPSILON
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let z = self.z.min(other.z);
        let right = self.right().max(other.right());
        let far = self.far().max(other.far());
        Rect::new(x, z, right - x, far - z)
    }

    /// Grow the rectangle by `margin` on every side
    pub fn inflate(&self, margin: f64) -> Rect {
        Rect::new(
            self.x - margin,
            self.z - margin,
            self.width + 2.0 * margin,
            self.length + 2.0 * margin,
        )
    }

    pub fn translate(&self, dx: f64, dz: f64) -> Rect {
        Rect::new(self.x + dx, self.z + dz, self.width, self.length)
    }
}

/// Width and length of an allocated floor area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub length: f64,
}

impl Extent {
    pub fn new(width: f64, length: f64) -> Self {
        Self { width, length }
    }

    pub fn area(&self) -> f64 {
        self.width * self.length
    }
}

/// Basic furniture shapes a renderer can draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum Primitive {
    Box {
        width: f64,
        depth: f64,
        height: f64,
    },
    Cylinder {
        radius: f64,
        height: f64,
    },
    RoundedBox {
        width: f64,
        depth: f64,
        height: f64,
        radius: f64,
    },
}

impl Primitive {
    pub fn height(&self) -> f64 {
        match self {
            Primitive::Box { height, .. }
            | Primitive::Cylinder { height, .. }
            | Primitive::RoundedBox { height, .. } => *height,
        }
    }

    /// The floor area the shape covers before rotation
    pub fn footprint(&self) -> Footprint {
        match *self {
            Primitive::Box { width, depth, .. } | Primitive::RoundedBox { width, depth, .. } => {
                Footprint::rect(width, depth)
            }
            Primitive::Cylinder { radius, .. } => Footprint::round(radius * 2.0),
        }
    }

    /// Same shape with a different width (cylinders keep their radius)
    pub fn with_width(&self, new_width: f64) -> Primitive {
        match *self {
            Primitive::Box { depth, height, .. } => Primitive::Box {
                width: new_width,
                depth,
                height,
            },
            Primitive::RoundedBox {
                depth,
                height,
                radius,
                ..
            } => Primitive::RoundedBox {
                width: new_width,
                depth,
                height,
                radius,
            },
            cylinder @ Primitive::Cylinder { .. } => cylinder,
        }
    }
}

/// Outline of a footprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FootprintShape {
    Rect,
    Round,
}

/// Width (local x) by depth (local facing axis) of an item on the floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f64,
    pub depth: f64,
    pub shape: FootprintShape,
}

impl Footprint {
    pub fn rect(width: f64, depth: f64) -> Self {
        Self {
            width,
            depth,
            shape: FootprintShape::Rect,
        }
    }

    pub fn round(diameter: f64) -> Self {
        Self {
            width: diameter,
            depth: diameter,
            shape: FootprintShape::Round,
        }
    }

    /// Radius of the smallest circle around the footprint, whatever its
    /// rotation: half the diagonal of a rectangle, the radius of a disc.
    pub fn bounding_radius(&self) -> f64 {
        match self.shape {
            FootprintShape::Round => self.width / 2.0,
            FootprintShape::Rect => self.width.hypot(self.depth) / 2.0,
        }
    }

    /// Axis-aligned bounds of the footprint placed at `center` with `rotation`
    pub fn bounds_at(&self, center: Point, rotation: f64) -> Rect {
        let local = Rect::centered(Point::origin(), self.width / 2.0, self.depth / 2.0);
        match self.shape {
            FootprintShape::Round => local.translate(center.x, center.z),
            FootprintShape::Rect => YawTransform::new(rotation, center).transform_rect(&local),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(r.right(), 4.0);
        assert_eq!(r.far(), 6.0);
        assert_eq!(r.center(), Point::new(2.5, 4.0));
    }

    #[test]
    fn test_rect_touching_does_not_intersect() {
        let a = Rect::new(0.0, 0.0, 2.0, 2.0);
        let b = Rect::new(2.0, 0.0, 2.0, 2.0);
        let c = Rect::new(1.0, 1.0, 2.0, 2.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&c));
        assert!(c.intersects(&b));
    }

    #[test]
    fn test_rect_union_and_inflate() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(2.0, 3.0, 1.0, 1.0);
        let u = a.union(&b);
        assert_eq!(u, Rect::new(0.0, 0.0, 3.0, 4.0));
        assert_eq!(a.inflate(0.5), Rect::new(-0.5, -0.5, 2.0, 2.0));
    }

    #[test]
    fn test_primitive_footprints() {
        let desk = Primitive::Box {
            width: 1.2,
            depth: 0.6,
            height: 0.74,
        };
        let table = Primitive::Cylinder {
            radius: 0.6,
            height: 0.74,
        };
        assert_eq!(desk.footprint(), Footprint::rect(1.2, 0.6));
        assert_eq!(table.footprint(), Footprint::round(1.2));
        assert_eq!(table.height(), 0.74);
    }

    #[test]
    fn test_bounding_radius() {
        assert!((Footprint::rect(0.6, 0.8).bounding_radius() - 0.5).abs() < EPSILON);
        assert_eq!(Footprint::round(1.2).bounding_radius(), 0.6);
        // thin panels reach far along their length
        let panel = Footprint::rect(2.4, 0.03);
        assert!(panel.bounding_radius() > 1.2);
    }

    #[test]
    fn test_bounds_at_rotated_half_turn() {
        let fp = Footprint::rect(1.2, 0.6);
        let b = fp.bounds_at(Point::new(5.0, 5.0), PI);
        assert!((b.width - 1.2).abs() < 1e-6);
        assert!((b.length - 0.6).abs() < 1e-6);
        assert!((b.center().x - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_floor_standing() {
        assert!(Position::new(1.0, 0.0, 1.0).is_floor_standing());
        assert!(!Position::new(1.0, 0.74, 1.0).is_floor_standing());
    }
}
