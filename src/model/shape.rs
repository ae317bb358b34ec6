//! Persisted shape types and partial updates.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::color::ColorHex;
use super::geometry::{Point, Rect, extents};

/// Process-unique shape identity, fixed for the shape's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Allocate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A labelled axis-aligned box. Stored boxes always have non-negative extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub id: ShapeId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub label: String,
    pub color: ColorHex,
}

impl BoundingBox {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Replace the geometry, normalising negative extents.
    pub fn set_rect(&mut self, rect: Rect) {
        let rect = rect.normalized();
        self.x = rect.x;
        self.y = rect.y;
        self.width = rect.width;
        self.height = rect.height;
    }
}

/// A labelled, implicitly closed polygon (last vertex joins the first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub id: ShapeId,
    pub points: Vec<Point>,
    pub label: String,
    pub color: ColorHex,
}

impl Polygon {
    /// Axis-aligned bounding box over all vertices.
    pub fn bounding_box(&self) -> Option<Rect> {
        extents(&self.points)
    }

    /// Move every vertex by `delta`.
    pub fn translate(&mut self, delta: Point) {
        for p in &mut self.points {
            *p = *p + delta;
        }
    }
}

/// Which collection a shape lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Box,
    Polygon,
}

impl ShapeKind {
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Polygon => "polygon",
        }
    }
}

/// Borrowed view of a shape from either collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeRef<'a> {
    Box(&'a BoundingBox),
    Polygon(&'a Polygon),
}

impl ShapeRef<'_> {
    pub fn id(&self) -> ShapeId {
        match self {
            ShapeRef::Box(b) => b.id,
            ShapeRef::Polygon(p) => p.id,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeRef::Box(_) => ShapeKind::Box,
            ShapeRef::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ShapeRef::Box(b) => &b.label,
            ShapeRef::Polygon(p) => &p.label,
        }
    }

    pub fn color(&self) -> &ColorHex {
        match self {
            ShapeRef::Box(b) => &b.color,
            ShapeRef::Polygon(p) => &p.color,
        }
    }

    /// Where an edit menu attaches: a box's top-left corner or a polygon's
    /// first vertex.
    pub fn anchor(&self) -> Option<Point> {
        match self {
            ShapeRef::Box(b) => Some(Point::new(b.x, b.y)),
            ShapeRef::Polygon(p) => p.points.first().copied(),
        }
    }
}

/// New geometry for a shape. Must match the shape's kind to take effect.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect(Rect),
    Points(Vec<Point>),
}

/// A partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapePatch {
    pub label: Option<String>,
    pub color: Option<ColorHex>,
    pub geometry: Option<Geometry>,
}

impl ShapePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: ColorHex) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.geometry = Some(Geometry::Rect(rect));
        self
    }

    pub fn with_points(mut self, points: Vec<Point>) -> Self {
        self.geometry = Some(Geometry::Points(points));
        self
    }
}
