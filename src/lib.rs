//! BBAT - Bounding Box Annotation Tool
//!
//! Interaction core of an image annotation editor: turns pointer, key and
//! menu events into boxes and polygons with labels and colours, and exports
//! them as Pascal VOC style XML. Rendering, hit-testing and image decoding
//! belong to the front-end that embeds this crate.
//!
//! ```rust,ignore
//! use bbat::{AnnotationSession, ImageInfo, Message, Point, PointerMessage};
//!
//! let mut session = AnnotationSession::new();
//! session.update(Message::ImageChanged(ImageInfo::new("cat.jpg", 640, 480)));
//! session.update(Message::Pointer(PointerMessage::Down(Point::new(10.0, 10.0))));
//! session.update(Message::Pointer(PointerMessage::Up(Point::new(100.0, 80.0))));
//! let file = session.export()?;
//! ```

pub mod config;
pub mod constants;
pub mod format;
mod handlers;
pub mod keybindings;
pub mod logging;
mod message;
pub mod model;
pub mod navigation;
pub mod registry;
mod session;
pub mod state;
pub mod store;

pub use config::{ConfigError, EditorConfig, LogLevel};
pub use format::{ExportFile, FormatError, ImageInfo, PascalVocFormat};
pub use keybindings::{KeyAction, KeyBindings, KeyCode};
pub use message::{DrawMessage, MenuMessage, Message, PointerMessage, Response, ShapeMessage};
pub use model::{BoundingBox, ColorHex, HandleTransform, Point, Polygon, ShapeId, ShapeRef};
pub use navigation::Direction;
pub use session::AnnotationSession;
