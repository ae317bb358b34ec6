//! Authoritative storage for the boxes and polygons of the current image.
//!
//! All mutation goes through [`ShapeStore`]. Shapes that fail their admission
//! gate are never stored, and lookups of unknown ids are quiet no-ops.

use crate::constants::{MIN_BOX_SIZE, MIN_POLYGON_VERTICES};
use crate::model::{
    BoundingBox, ColorHex, Geometry, Point, Polygon, ShapeId, ShapeKind, ShapePatch, ShapeRef,
};
use crate::registry::ClassRegistry;

/// Boxes and polygons, each kept in creation order.
#[derive(Debug, Clone)]
pub struct ShapeStore {
    boxes: Vec<BoundingBox>,
    polygons: Vec<Polygon>,
    min_box_size: f32,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::with_min_box_size(MIN_BOX_SIZE)
    }

    /// Store with a custom box size gate.
    pub fn with_min_box_size(min_box_size: f32) -> Self {
        Self {
            boxes: Vec::new(),
            polygons: Vec::new(),
            min_box_size,
        }
    }

    /// Persist a drafted box if it passes the size gate.
    ///
    /// The stored copy has non-negative width and height. Returns `None` when
    /// the draft is too small; the caller drops it.
    pub fn add_box(&mut self, draft: BoundingBox) -> Option<&BoundingBox> {
        if !draft.rect().exceeds(self.min_box_size) {
            log::debug!(
                "Discarded box draft {:.1}x{:.1} (gate {})",
                draft.width,
                draft.height,
                self.min_box_size
            );
            return None;
        }
        let mut stored = draft;
        stored.set_rect(stored.rect());
        log::info!(
            "✅ Created box {} at ({:.1}, {:.1}) {:.1}x{:.1}",
            stored.id,
            stored.x,
            stored.y,
            stored.width,
            stored.height
        );
        self.boxes.push(stored);
        self.boxes.last()
    }

    /// Persist a polygon if it has at least three vertices.
    pub fn add_polygon(
        &mut self,
        points: Vec<Point>,
        label: impl Into<String>,
        color: ColorHex,
    ) -> Option<&Polygon> {
        if points.len() < MIN_POLYGON_VERTICES {
            log::debug!("Discarded polygon draft with {} points", points.len());
            return None;
        }
        let poly = Polygon {
            id: ShapeId::new(),
            points,
            label: label.into(),
            color,
        };
        log::info!("✅ Created polygon {} ({} points)", poly.id, poly.points.len());
        self.polygons.push(poly);
        self.polygons.last()
    }

    /// Apply a partial update to whichever collection holds `id`.
    ///
    /// Returns false if `id` is unknown. Geometry of the wrong kind (points for
    /// a box, a rect for a polygon) and polygon point lists below the vertex
    /// minimum are ignored; the other fields still apply.
    pub fn update_shape(&mut self, id: ShapeId, patch: ShapePatch) -> bool {
        let ShapePatch {
            label,
            color,
            geometry,
        } = patch;

        if let Some(b) = self.boxes.iter_mut().find(|b| b.id == id) {
            match geometry {
                Some(Geometry::Rect(rect)) => b.set_rect(rect),
                Some(Geometry::Points(_)) => {
                    log::warn!("Ignoring point list for box {}", id);
                }
                None => {}
            }
            if let Some(label) = label {
                b.label = label;
            }
            if let Some(color) = color {
                b.color = color;
            }
            return true;
        }

        if let Some(p) = self.polygons.iter_mut().find(|p| p.id == id) {
            match geometry {
                Some(Geometry::Points(points)) if points.len() >= MIN_POLYGON_VERTICES => {
                    p.points = points;
                }
                Some(Geometry::Points(points)) => {
                    log::warn!(
                        "Ignoring {}-point update for polygon {}",
                        points.len(),
                        id
                    );
                }
                Some(Geometry::Rect(_)) => {
                    log::warn!("Ignoring rect for polygon {}", id);
                }
                None => {}
            }
            if let Some(label) = label {
                p.label = label;
            }
            if let Some(color) = color {
                p.color = color;
            }
            return true;
        }

        log::debug!("Update for unknown shape {}", id);
        false
    }

    /// Remove the shape with `id`, reporting which collection it was in.
    pub fn delete_shape(&mut self, id: ShapeId) -> Option<ShapeKind> {
        if let Some(i) = self.boxes.iter().position(|b| b.id == id) {
            self.boxes.remove(i);
            log::info!("🗑️ Deleted box {}", id);
            return Some(ShapeKind::Box);
        }
        if let Some(i) = self.polygons.iter().position(|p| p.id == id) {
            self.polygons.remove(i);
            log::info!("🗑️ Deleted polygon {}", id);
            return Some(ShapeKind::Polygon);
        }
        None
    }

    pub fn find_shape(&self, id: ShapeId) -> Option<ShapeRef<'_>> {
        self.boxes
            .iter()
            .find(|b| b.id == id)
            .map(ShapeRef::Box)
            .or_else(|| {
                self.polygons
                    .iter()
                    .find(|p| p.id == id)
                    .map(ShapeRef::Polygon)
            })
    }

    /// Give shape `id` a new label coloured by the registry.
    ///
    /// Returns the colour applied, or `None` for an unknown id (the registry
    /// still records a colour for the label).
    pub fn apply_label(
        &mut self,
        id: ShapeId,
        label: &str,
        registry: &mut ClassRegistry,
    ) -> Option<ColorHex> {
        let color = registry.color_for(label);
        self.update_shape(
            id,
            ShapePatch::new()
                .with_label(label)
                .with_color(color.clone()),
        )
        .then_some(color)
    }

    /// Recolour `label` in the registry and on every shape carrying it.
    ///
    /// Returns how many shapes changed colour.
    pub fn propagate_color(
        &mut self,
        label: &str,
        color: ColorHex,
        registry: &mut ClassRegistry,
    ) -> usize {
        registry.set_color(label, color.clone());
        let mut count = 0;
        for b in self.boxes.iter_mut().filter(|b| b.label == label) {
            b.color = color.clone();
            count += 1;
        }
        for p in self.polygons.iter_mut().filter(|p| p.label == label) {
            p.color = color.clone();
            count += 1;
        }
        log::debug!("🎨 Recoloured {} shapes labelled '{}' to {}", count, label, color);
        count
    }

    pub fn boxes(&self) -> &[BoundingBox] {
        &self.boxes
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// All shapes in combined order: boxes first, then polygons.
    pub fn iter(&self) -> impl Iterator<Item = ShapeRef<'_>> {
        self.boxes
            .iter()
            .map(ShapeRef::Box)
            .chain(self.polygons.iter().map(ShapeRef::Polygon))
    }

    pub fn len(&self) -> usize {
        self.boxes.len() + self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.polygons.is_empty()
    }

    /// Drop every shape.
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.polygons.clear();
    }
}

impl Default for ShapeStore {
    fn default() -> Self {
        Self::new()
    }
}
