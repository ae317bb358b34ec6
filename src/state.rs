//! Interaction state: what the editor is doing between two input events.
//!
//! Drawing and selection are exclusive. A polygon cannot be drawn while a
//! shape is selected and nothing can be selected mid-polygon, so the state is
//! a single tagged union rather than a set of independent flags.

use crate::model::{BoundingBox, ColorHex, Point, ShapeId};

/// Floating edit menu attached to the selected shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditMenu {
    pub open: bool,
    pub position: Point,
}

impl EditMenu {
    pub fn open_at(position: Point) -> Self {
        Self {
            open: true,
            position,
        }
    }
}

/// The selected shape, its place in the combined order and its menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub id: ShapeId,
    pub index: usize,
    pub menu: EditMenu,
}

/// Clicked vertices of a polygon under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonDraft {
    pub points: Vec<Point>,
    /// Last pointer position, for the rubber-band segment.
    pub cursor: Option<Point>,
}

impl PolygonDraft {
    /// True when a click at `p` should close the polygon.
    pub fn closes_at(&self, p: Point, radius: f32) -> bool {
        self.points
            .first()
            .is_some_and(|first| first.distance_to(&p) < radius)
    }

    /// Whether the cursor hovers over the closing target.
    pub fn closing_hint(&self, radius: f32) -> bool {
        self.cursor.is_some_and(|c| self.closes_at(c, radius))
    }

    /// Committed points followed by the cursor, for live feedback.
    pub fn preview(&self) -> Vec<Point> {
        let mut pts = self.points.clone();
        if !pts.is_empty() {
            pts.extend(self.cursor);
        }
        pts
    }
}

/// Editor mode.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionState {
    #[default]
    Idle,
    /// A box being dragged out. Width and height may be negative.
    DrawingBox(BoundingBox),
    DrawingPolygon(PolygonDraft),
    Selected(Selection),
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::DrawingBox(_) => "DrawingBox",
            InteractionState::DrawingPolygon(_) => "DrawingPolygon",
            InteractionState::Selected(_) => "Selected",
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            InteractionState::Selected(sel) => Some(sel),
            _ => None,
        }
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selection().map(|s| s.id)
    }

    /// The edit menu, if one is open.
    pub fn open_menu(&self) -> Option<&EditMenu> {
        self.selection().map(|s| &s.menu).filter(|m| m.open)
    }

    pub fn is_drawing_polygon(&self) -> bool {
        matches!(self, InteractionState::DrawingPolygon(_))
    }
}

/// Contents of the edit menu's label and colour inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditFields {
    pub label: String,
    pub color: ColorHex,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PolygonDraft {
        PolygonDraft {
            points: vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0)],
            cursor: None,
        }
    }

    #[test]
    fn test_closing_radius_is_strict() {
        let d = draft();
        assert!(d.closes_at(Point::new(6.0, 6.0), 10.0));
        assert!(!d.closes_at(Point::new(10.0, 0.0), 10.0));
        assert!(!PolygonDraft::default().closes_at(Point::new(0.0, 0.0), 10.0));
    }

    #[test]
    fn test_preview_follows_cursor() {
        let mut d = draft();
        assert_eq!(d.preview().len(), 2);
        assert!(!d.closing_hint(10.0));

        d.cursor = Some(Point::new(3.0, 4.0));
        assert_eq!(d.preview().last(), Some(&Point::new(3.0, 4.0)));
        assert!(d.closing_hint(10.0));
    }

    #[test]
    fn test_open_menu_only_when_selected() {
        assert!(InteractionState::Idle.open_menu().is_none());

        let mut sel = Selection {
            id: ShapeId::new(),
            index: 0,
            menu: EditMenu::open_at(Point::new(1.0, 2.0)),
        };
        assert!(InteractionState::Selected(sel).open_menu().is_some());

        sel.menu.open = false;
        let state = InteractionState::Selected(sel);
        assert!(state.open_menu().is_none());
        assert_eq!(state.selected_id(), Some(sel.id));
    }
}
