//! Input events and menu actions consumed by the editor.
//!
//! The rendering layer resolves screen positions to image coordinates and
//! hit-tests shapes itself; the core only sees the resolved events below.

use crate::format::ImageInfo;
use crate::keybindings::KeyCode;
use crate::model::{ColorHex, HandleTransform, Point, ShapeId};
use crate::navigation::Direction;

/// Everything that can change session state.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Pointer activity on the bare image surface.
    Pointer(PointerMessage),
    /// Interaction with an existing shape or one of its handles.
    Shape(ShapeMessage),
    /// Polygon tool controls.
    Draw(DrawMessage),
    /// Edit menu actions on the selected shape.
    Menu(MenuMessage),
    /// Move the selection through the combined order.
    Navigate(Direction),
    /// A key was pressed.
    KeyDown(KeyCode),
    /// A different image was loaded; annotations do not carry over.
    ImageChanged(ImageInfo),
}

/// Pointer events on the image surface, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerMessage {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// Events that target a specific shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeMessage {
    /// The shape body was clicked at `at`.
    Clicked { id: ShapeId, at: Point },
    /// A drag of the whole shape ended.
    ///
    /// For a box `position` is the new top-left corner. For a polygon it is
    /// the handle's accumulated offset, applied to every vertex.
    DragEnd { id: ShapeId, position: Point },
    /// A transform handle was released.
    ///
    /// A box's handle is anchored at its top-left corner, so `position` is
    /// where that corner ended up. A polygon's handle sits at the origin of
    /// its points and `position` is an offset.
    TransformEnd {
        id: ShapeId,
        transform: HandleTransform,
    },
    /// Vertex `index` of a polygon was dragged to `position`.
    VertexDragged {
        id: ShapeId,
        index: usize,
        position: Point,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMessage {
    /// Enter polygon mode, or abandon the draft if already in it.
    TogglePolygon,
    /// Abandon the polygon draft.
    StopPolygon,
    /// Commit the polygon draft without a closing click.
    FinishPolygon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MenuMessage {
    /// The label text field changed.
    LabelChanged(String),
    /// The colour field changed.
    ColorChanged(ColorHex),
    /// Save the current label as a reusable class.
    AddClass,
    /// A reusable class was picked from the list.
    ClassSelected(String),
    /// The Delete button was pressed.
    Delete,
}

/// What the rendering layer has to do after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Nothing changed.
    Ignored,
    /// State changed, redraw.
    Changed,
    /// State changed and the interactive handle of this shape must be reset
    /// to identity, because its transform was written into the geometry.
    ResetHandle(ShapeId),
}

impl Response {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Response::Ignored)
    }
}
