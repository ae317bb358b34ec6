//! Global constants for the annotation core

/// A drawn box is kept only if its width or height exceeds this (image pixels).
pub const MIN_BOX_SIZE: f32 = 5.0;

/// Minimum number of vertices a polygon needs to be persisted.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Clicking within this distance of a draft polygon's first vertex closes it.
pub const POLYGON_CLOSE_RADIUS: f32 = 10.0;

/// Colour of the edit field before the user picks one.
pub const DEFAULT_COLOR: &str = "#FF0000";

/// Placeholder written to `<folder>` in exported documents.
pub const DEFAULT_EXPORT_FOLDER: &str = "images";

/// Placeholder written to `<source><database>` in exported documents.
pub const DEFAULT_DATABASE: &str = "Unknown";

/// File name offered for the downloaded export.
pub const EXPORT_FILENAME: &str = "annotations.xml";

/// MIME type of the downloaded export.
pub const EXPORT_MIME: &str = "text/xml";
