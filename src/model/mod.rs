//! Data model: geometry, colours and persisted shapes.

mod color;
mod geometry;
mod shape;

pub use color::{ColorHex, InvalidColor};
pub use geometry::{HandleTransform, Point, Rect, extents};
pub use shape::{BoundingBox, Geometry, Polygon, ShapeId, ShapeKind, ShapePatch, ShapeRef};
