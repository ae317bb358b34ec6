//! Next/previous traversal over the combined shape order.
//!
//! The combined order lists every box in creation order followed by every
//! polygon in creation order. Traversal clamps at both ends.

use crate::model::{ShapeId, ShapeRef};
use crate::store::ShapeStore;

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// Position of `id` in the combined order.
pub fn index_of(store: &ShapeStore, id: ShapeId) -> Option<usize> {
    store.iter().position(|s| s.id() == id)
}

/// Shape at `index` in the combined order.
pub fn shape_at(store: &ShapeStore, index: usize) -> Option<ShapeRef<'_>> {
    let boxes = store.boxes();
    match boxes.get(index) {
        Some(b) => Some(ShapeRef::Box(b)),
        None => store
            .polygons()
            .get(index - boxes.len())
            .map(ShapeRef::Polygon),
    }
}

/// The neighbour of `current` in `direction`, or `None` at either end.
pub fn step(
    store: &ShapeStore,
    current: usize,
    direction: Direction,
) -> Option<(usize, ShapeRef<'_>)> {
    let target = match direction {
        Direction::Next => current.checked_add(1)?,
        Direction::Previous => current.checked_sub(1)?,
    };
    shape_at(store, target).map(|shape| (target, shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoundingBox, ColorHex, Point};

    fn store_with(boxes: usize, polygons: usize) -> ShapeStore {
        let mut store = ShapeStore::new();
        for i in 0..boxes {
            store.add_box(BoundingBox {
                id: ShapeId::new(),
                x: i as f32,
                y: 0.0,
                width: 10.0,
                height: 10.0,
                label: format!("box{}", i),
                color: ColorHex::default(),
            });
        }
        for i in 0..polygons {
            let points = vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(5.0, 10.0),
            ];
            store.add_polygon(points, format!("poly{}", i), ColorHex::default());
        }
        store
    }

    #[test]
    fn test_boxes_before_polygons() {
        let store = store_with(2, 2);
        let labels: Vec<_> = (0..4)
            .map(|i| shape_at(&store, i).unwrap().label().to_string())
            .collect();
        assert_eq!(labels, ["box0", "box1", "poly0", "poly1"]);
        assert!(shape_at(&store, 4).is_none());
    }

    #[test]
    fn test_step_clamps() {
        let store = store_with(1, 1);
        assert!(step(&store, 0, Direction::Previous).is_none());
        assert!(step(&store, 1, Direction::Next).is_none());

        let (i, shape) = step(&store, 0, Direction::Next).unwrap();
        assert_eq!(i, 1);
        assert_eq!(shape.label(), "poly0");

        let (i, shape) = step(&store, 1, Direction::Previous).unwrap();
        assert_eq!(i, 0);
        assert_eq!(shape.label(), "box0");
    }

    #[test]
    fn test_index_of() {
        let store = store_with(1, 1);
        let pid = store.polygons()[0].id;
        assert_eq!(index_of(&store, pid), Some(1));
        assert_eq!(index_of(&store, ShapeId::new()), None);
    }

    #[test]
    fn test_empty_store() {
        let store = ShapeStore::new();
        assert!(shape_at(&store, 0).is_none());
        assert!(step(&store, 0, Direction::Next).is_none());
    }
}
