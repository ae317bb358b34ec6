//! Message handlers for the annotation editor.
//!
//! Each handler processes one category of messages against the borrowed
//! session parts in [`EditorState`], keeping [`crate::AnnotationSession::update`]
//! a plain dispatcher. No handler fails: input that does not apply to the
//! current state is logged and answered with [`Response::Ignored`].

use crate::keybindings::{KeyAction, KeyBindings, KeyCode};
use crate::message::{DrawMessage, MenuMessage, PointerMessage, Response, ShapeMessage};
use crate::model::{BoundingBox, HandleTransform, Point, Rect, ShapeId, ShapePatch, ShapeRef};
use crate::navigation::{self, Direction};
use crate::registry::ClassRegistry;
use crate::state::{EditFields, EditMenu, InteractionState, PolygonDraft, Selection};
use crate::store::ShapeStore;

/// Session parts a handler may touch.
pub struct EditorState<'a> {
    pub store: &'a mut ShapeStore,
    pub registry: &'a mut ClassRegistry,
    pub interaction: &'a mut InteractionState,
    pub fields: &'a mut EditFields,
    pub close_radius: f32,
}

impl EditorState<'_> {
    /// Select `id`, load its label and colour into the edit fields and open
    /// the menu at `menu_at`.
    fn select(&mut self, id: ShapeId, menu_at: Point) -> Response {
        let Some(shape) = self.store.find_shape(id) else {
            log::debug!("Select of unknown shape {}", id);
            return Response::Ignored;
        };
        self.fields.label = shape.label().to_string();
        self.fields.color = shape.color().clone();
        let index = navigation::index_of(self.store, id).unwrap_or(0);
        *self.interaction = InteractionState::Selected(Selection {
            id,
            index,
            menu: EditMenu::open_at(menu_at),
        });
        log::debug!("🔍 Selected {} (index {})", id, index);
        Response::Changed
    }

    /// Select a shape that was just committed. Its label starts empty.
    fn select_new(&mut self, id: ShapeId, menu_at: Point) -> Response {
        let response = self.select(id, menu_at);
        self.fields.label.clear();
        response
    }

    fn close_menu(&mut self) {
        if let InteractionState::Selected(sel) = &mut *self.interaction {
            sel.menu.open = false;
        }
    }

    /// The selected shape if it is `id`; drags and transforms are
    /// selection-scoped.
    fn selected_shape(&self, id: ShapeId) -> Option<ShapeRef<'_>> {
        if self.interaction.selected_id() != Some(id) {
            log::debug!("Ignoring edit of unselected shape {}", id);
            return None;
        }
        self.store.find_shape(id)
    }
}

/// Handle pointer events on the image surface.
pub fn handle_pointer(msg: PointerMessage, state: &mut EditorState<'_>) -> Response {
    match msg {
        PointerMessage::Down(p) => match &mut *state.interaction {
            InteractionState::DrawingPolygon(draft) => {
                if draft.closes_at(p, state.close_radius) {
                    return finish_polygon(state);
                }
                draft.points.push(p);
                log::debug!(
                    "✏️ Polygon point at ({:.1}, {:.1}), total: {}",
                    p.x,
                    p.y,
                    draft.points.len()
                );
                Response::Changed
            }
            _ => {
                *state.interaction = InteractionState::DrawingBox(BoundingBox {
                    id: ShapeId::new(),
                    x: p.x,
                    y: p.y,
                    width: 0.0,
                    height: 0.0,
                    label: String::new(),
                    color: state.fields.color.clone(),
                });
                log::debug!("✏️ Started box at ({:.1}, {:.1})", p.x, p.y);
                Response::Changed
            }
        },
        PointerMessage::Move(p) => match &mut *state.interaction {
            InteractionState::DrawingBox(draft) => {
                drag_to(draft, p);
                Response::Changed
            }
            InteractionState::DrawingPolygon(draft) if !draft.points.is_empty() => {
                draft.cursor = Some(p);
                Response::Changed
            }
            _ => Response::Ignored,
        },
        PointerMessage::Up(p) => {
            let InteractionState::DrawingBox(draft) = &mut *state.interaction else {
                return Response::Ignored;
            };
            drag_to(draft, p);
            let draft = draft.clone();
            *state.interaction = InteractionState::Idle;
            match state.store.add_box(draft).map(|b| b.id) {
                Some(id) => state.select_new(id, p),
                None => Response::Changed,
            }
        }
    }
}

fn drag_to(draft: &mut BoundingBox, p: Point) {
    let r = Rect::from_drag(Point::new(draft.x, draft.y), p);
    draft.width = r.width;
    draft.height = r.height;
}

/// Commit the polygon draft, or drop it if it has too few points.
fn finish_polygon(state: &mut EditorState<'_>) -> Response {
    let draft = match &mut *state.interaction {
        InteractionState::DrawingPolygon(draft) => std::mem::take(draft),
        _ => return Response::Ignored,
    };
    *state.interaction = InteractionState::Idle;
    let first = draft.points.first().copied();
    let color = state.fields.color.clone();
    let committed = state
        .store
        .add_polygon(draft.points, "", color)
        .map(|p| p.id);
    match (committed, first) {
        (Some(id), Some(first)) => state.select_new(id, first),
        _ => Response::Changed,
    }
}

/// Handle polygon tool controls.
pub fn handle_draw(msg: DrawMessage, state: &mut EditorState<'_>) -> Response {
    match msg {
        DrawMessage::TogglePolygon if state.interaction.is_drawing_polygon() => {
            handle_draw(DrawMessage::StopPolygon, state)
        }
        DrawMessage::TogglePolygon => {
            *state.interaction = InteractionState::DrawingPolygon(PolygonDraft::default());
            log::debug!("✏️ Polygon mode on");
            Response::Changed
        }
        DrawMessage::StopPolygon => {
            if !state.interaction.is_drawing_polygon() {
                return Response::Ignored;
            }
            *state.interaction = InteractionState::Idle;
            log::debug!("❌ Polygon draft discarded");
            Response::Changed
        }
        DrawMessage::FinishPolygon => finish_polygon(state),
    }
}

/// Handle clicks, drags and transforms on existing shapes.
pub fn handle_shape(msg: ShapeMessage, state: &mut EditorState<'_>) -> Response {
    match msg {
        ShapeMessage::Clicked { id, at } => match *state.interaction {
            InteractionState::Idle | InteractionState::Selected(_) => state.select(id, at),
            _ => {
                log::debug!("Selection disabled while {}", state.interaction.name());
                Response::Ignored
            }
        },
        ShapeMessage::DragEnd { id, position } => {
            let patch = match state.selected_shape(id) {
                Some(ShapeRef::Box(b)) => {
                    ShapePatch::new().with_rect(Rect::new(position.x, position.y, b.width, b.height))
                }
                Some(ShapeRef::Polygon(p)) => {
                    let mut moved = p.clone();
                    moved.translate(position);
                    return apply_geometry(state, id, ShapePatch::new().with_points(moved.points));
                }
                None => return Response::Ignored,
            };
            state.store.update_shape(id, patch);
            log::debug!("Moved box {} to ({:.1}, {:.1})", id, position.x, position.y);
            Response::Changed
        }
        ShapeMessage::TransformEnd { id, transform } => {
            let patch = match state.selected_shape(id) {
                Some(shape) => transformed(shape, &transform),
                None => return Response::Ignored,
            };
            apply_geometry(state, id, patch)
        }
        ShapeMessage::VertexDragged {
            id,
            index,
            position,
        } => {
            if !matches!(
                *state.interaction,
                InteractionState::Idle | InteractionState::Selected(_)
            ) {
                return Response::Ignored;
            }
            let Some(ShapeRef::Polygon(poly)) = state.store.find_shape(id) else {
                return Response::Ignored;
            };
            if index >= poly.points.len() {
                log::debug!("Vertex {} out of range for polygon {}", index, id);
                return Response::Ignored;
            }
            let mut points = poly.points.clone();
            points[index] = position;
            state
                .store
                .update_shape(id, ShapePatch::new().with_points(points));
            Response::Changed
        }
    }
}

/// Geometry after baking a handle transform into the shape.
fn transformed(shape: ShapeRef<'_>, transform: &HandleTransform) -> ShapePatch {
    match shape {
        ShapeRef::Box(b) => ShapePatch::new().with_rect(transform.apply_to_rect(&b.rect())),
        ShapeRef::Polygon(p) => {
            ShapePatch::new().with_points(p.points.iter().map(|pt| transform.apply(*pt)).collect())
        }
    }
}

/// Write geometry that was produced by an interactive handle; the handle
/// has to go back to identity afterwards.
fn apply_geometry(state: &mut EditorState<'_>, id: ShapeId, patch: ShapePatch) -> Response {
    if state.store.update_shape(id, patch) {
        log::debug!("Baked handle transform into {}", id);
        Response::ResetHandle(id)
    } else {
        Response::Ignored
    }
}

/// Handle edit menu actions.
pub fn handle_menu(msg: MenuMessage, state: &mut EditorState<'_>) -> Response {
    let selected = state.interaction.selected_id();
    match msg {
        MenuMessage::LabelChanged(label) => {
            let color = match selected {
                Some(id) => state.store.apply_label(id, &label, state.registry),
                None => None,
            }
            .unwrap_or_else(|| state.registry.color_for(&label));
            state.fields.label = label;
            state.fields.color = color;
            Response::Changed
        }
        MenuMessage::ColorChanged(color) => {
            state
                .store
                .propagate_color(&state.fields.label, color.clone(), state.registry);
            state.fields.color = color;
            Response::Changed
        }
        MenuMessage::AddClass => {
            let name = state.fields.label.trim().to_string();
            if !state.registry.add_class(&name, state.fields.color.clone()) {
                log::debug!("Class '{}' not added (empty or known)", name);
            }
            if !name.is_empty() && name != state.fields.label {
                // The shape takes the class name it was registered under.
                if let Some(color) =
                    selected.and_then(|id| state.store.apply_label(id, &name, state.registry))
                {
                    state.fields.color = color;
                }
                state.fields.label = name;
            }
            state.close_menu();
            Response::Changed
        }
        MenuMessage::ClassSelected(name) => {
            let color = state.registry.color_for(&name);
            if let Some(id) = selected {
                state.store.update_shape(
                    id,
                    ShapePatch::new()
                        .with_label(name.as_str())
                        .with_color(color.clone()),
                );
            }
            log::debug!("🏷️ Applied class '{}'", name);
            state.fields.label = name;
            state.fields.color = color;
            state.close_menu();
            Response::Changed
        }
        MenuMessage::Delete => delete_selected(state),
    }
}

/// Delete the selected shape and clear the selection.
pub fn delete_selected(state: &mut EditorState<'_>) -> Response {
    let Some(id) = state.interaction.selected_id() else {
        return Response::Ignored;
    };
    state.store.delete_shape(id);
    *state.interaction = InteractionState::Idle;
    Response::Changed
}

/// Move the selection one step through the combined order.
pub fn handle_navigation(direction: Direction, state: &mut EditorState<'_>) -> Response {
    let Some(sel) = state.interaction.selection().copied() else {
        return Response::Ignored;
    };
    let current = navigation::index_of(state.store, sel.id).unwrap_or(sel.index);
    let Some((index, shape)) = navigation::step(state.store, current, direction) else {
        log::debug!("Navigation {:?} clamped at index {}", direction, current);
        return Response::Ignored;
    };
    let id = shape.id();
    let position = shape.anchor().unwrap_or(sel.menu.position);
    state.fields.label = shape.label().to_string();
    state.fields.color = shape.color().clone();
    *state.interaction = InteractionState::Selected(Selection {
        id,
        index,
        menu: EditMenu::open_at(position),
    });
    log::debug!("🔍 Navigated {:?} to {} (index {})", direction, id, index);
    Response::Changed
}

/// Translate a key press into its bound action.
pub fn handle_key(key: KeyCode, bindings: &KeyBindings, state: &mut EditorState<'_>) -> Response {
    let Some(action) = bindings.action_for_key(key) else {
        return Response::Ignored;
    };
    log::debug!("⌨️ {:?} -> {}", key, action.name());
    match action {
        KeyAction::DeleteSelected => delete_selected(state),
        KeyAction::NextShape => handle_navigation(Direction::Next, state),
        KeyAction::PreviousShape => handle_navigation(Direction::Previous, state),
        KeyAction::CancelPolygon => handle_draw(DrawMessage::StopPolygon, state),
        KeyAction::FinishPolygon => handle_draw(DrawMessage::FinishPolygon, state),
    }
}
