//! Point and rectangle math in image-pixel coordinates.
//!
//! The origin is the top-left corner of the loaded image and one unit is one
//! pixel of its native resolution.

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// An axis-aligned rectangle anchored at `(x, y)`.
///
/// While a box is being dragged `width` and `height` follow the pointer and
/// may be negative. [`Rect::normalized`] folds them back into a rectangle
/// with non-negative extents.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle spanned by a drag from `start` to `end`, direction preserved.
    pub fn from_drag(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x - start.x, end.y - start.y)
    }

    /// Same area with the anchor moved to the top-left corner.
    pub fn normalized(&self) -> Rect {
        Rect {
            x: self.x.min(self.x + self.width),
            y: self.y.min(self.y + self.height),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    /// Size gate: true when either extent is strictly larger than `min`.
    pub fn exceeds(&self, min: f32) -> bool {
        self.width.abs() > min || self.height.abs() > min
    }

    /// Corners relative to the anchor, clockwise from the anchor itself.
    fn local_corners(&self) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(self.width, 0.0),
            Point::new(self.width, self.height),
            Point::new(0.0, self.height),
        ]
    }
}

/// Axis-aligned bounding extents of a point set, `None` when empty.
pub fn extents(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(Rect::new(min_x, min_y, max_x - min_x, max_y - min_y))
}

/// Scale, rotation and position reported by an interactive transform handle.
///
/// Rotation is in degrees, clockwise in screen space (y grows downwards).
/// A handle is reset to [`HandleTransform::IDENTITY`] after its geometry has
/// been written back into the shape, so consecutive transforms compose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleTransform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
    pub position: Point,
}

impl HandleTransform {
    pub const IDENTITY: HandleTransform = HandleTransform {
        scale_x: 1.0,
        scale_y: 1.0,
        rotation: 0.0,
        position: Point { x: 0.0, y: 0.0 },
    };

    /// Map a point from the handle's local space into image space.
    ///
    /// `x' = x·sx·cos θ − y·sy·sin θ + px`, `y' = x·sx·sin θ + y·sy·cos θ + py`
    pub fn apply(&self, p: Point) -> Point {
        let (sin, cos) = self.rotation.to_radians().sin_cos();
        let sx = p.x * self.scale_x;
        let sy = p.y * self.scale_y;
        Point::new(
            sx * cos - sy * sin + self.position.x,
            sx * sin + sy * cos + self.position.y,
        )
    }

    /// Apply to a rectangle whose handle is anchored at its top-left corner.
    ///
    /// Rotated results are folded back into their axis-aligned extents.
    pub fn apply_to_rect(&self, rect: &Rect) -> Rect {
        let corners = rect.local_corners().map(|c| self.apply(c));
        // corners is never empty
        extents(&corners).unwrap_or(*rect)
    }
}

impl Default for HandleTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!(close(p1.distance_to(&p2), 5.0));
    }

    #[test]
    fn test_drag_keeps_direction() {
        let r = Rect::from_drag(Point::new(100.0, 80.0), Point::new(10.0, 10.0));
        assert_eq!(r.width, -90.0);
        assert_eq!(r.height, -70.0);

        let n = r.normalized();
        assert_eq!(n, Rect::new(10.0, 10.0, 90.0, 70.0));
    }

    #[test]
    fn test_size_gate() {
        assert!(!Rect::new(0.0, 0.0, 2.0, 3.0).exceeds(5.0));
        assert!(!Rect::new(0.0, 0.0, 5.0, -5.0).exceeds(5.0));
        assert!(Rect::new(0.0, 0.0, -6.0, 0.0).exceeds(5.0));
        assert!(Rect::new(0.0, 0.0, 0.0, 5.5).exceeds(5.0));
    }

    #[test]
    fn test_extents() {
        assert!(extents(&[]).is_none());

        let pts = [
            Point::new(0.0, 0.0),
            Point::new(50.0, 0.0),
            Point::new(25.0, 50.0),
        ];
        assert_eq!(extents(&pts), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
    }

    #[test]
    fn test_identity_transform() {
        let p = Point::new(12.5, -3.0);
        assert_eq!(HandleTransform::IDENTITY.apply(p), p);
    }

    #[test]
    fn test_scale_and_translate() {
        let t = HandleTransform {
            scale_x: 2.0,
            scale_y: 0.5,
            rotation: 0.0,
            position: Point::new(10.0, 20.0),
        };
        let p = t.apply(Point::new(4.0, 8.0));
        assert!(close(p.x, 18.0));
        assert!(close(p.y, 24.0));
    }

    #[test]
    fn test_quarter_turn() {
        let t = HandleTransform {
            rotation: 90.0,
            ..HandleTransform::IDENTITY
        };
        let p = t.apply(Point::new(10.0, 0.0));
        assert!(close(p.x, 0.0));
        assert!(close(p.y, 10.0));
    }

    #[test]
    fn test_rect_transform_uses_anchor_position() {
        let rect = Rect::new(30.0, 40.0, 10.0, 20.0);
        let t = HandleTransform {
            scale_x: 3.0,
            scale_y: 2.0,
            rotation: 0.0,
            position: Point::new(30.0, 40.0),
        };
        assert_eq!(t.apply_to_rect(&rect), Rect::new(30.0, 40.0, 30.0, 40.0));
    }
}
