//! Annotation export.
//!
//! The session's shapes are written as a single Pascal VOC style XML
//! document per image. [`PascalVocFormat::parse`] reads such a document
//! back, which is how exports are checked and how external tools' files
//! can be inspected.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bbat::format::{ImageInfo, PascalVocFormat};
//!
//! let image = ImageInfo::new("cat.jpg", 640, 480);
//! let xml = PascalVocFormat::new().export(&store, &image)?;
//! ```

mod error;
mod image_info;
mod pascal_voc;

#[cfg(test)]
mod tests;

pub use error::FormatError;
pub use image_info::ImageInfo;
pub use pascal_voc::{
    ExportFile, ExportOptions, PascalVocFormat, VocAnnotation, VocBndBox, VocObject, round_coord,
};
