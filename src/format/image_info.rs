//! The image being annotated, as far as the exporter needs to know it.

use std::path::Path;

use crate::format::error::FormatError;

/// Reference string and decoded pixel size of the current image.
///
/// Dimensions are `None` until the image has been decoded; export then
/// writes a size of 0x0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// How the image was referenced when loaded (path or URL).
    pub reference: String,
    pub dimensions: Option<(u32, u32)>,
}

impl ImageInfo {
    pub fn new(reference: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            reference: reference.into(),
            dimensions: Some((width, height)),
        }
    }

    /// An image whose pixels are not available.
    pub fn unloaded(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            dimensions: None,
        }
    }

    /// Probe an image file's header for its dimensions.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormatError> {
        let path = path.as_ref();
        let (width, height) = image::image_dimensions(path)?;
        log::debug!("Probed {:?}: {}x{}", path, width, height);
        Ok(Self::new(path.to_string_lossy(), width, height))
    }

    pub fn width(&self) -> u32 {
        self.dimensions.map_or(0, |(w, _)| w)
    }

    pub fn height(&self) -> u32 {
        self.dimensions.map_or(0, |(_, h)| h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unloaded_has_zero_size() {
        let info = ImageInfo::unloaded("cat.jpg");
        assert_eq!((info.width(), info.height()), (0, 0));
    }

    #[test]
    fn test_from_path_reads_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.png");
        image::RgbImage::new(7, 3).save(&path).unwrap();

        let info = ImageInfo::from_path(&path).unwrap();
        assert_eq!(info.dimensions, Some((7, 3)));
        assert!(info.reference.ends_with("tiny.png"));
    }

    #[test]
    fn test_from_path_missing_file() {
        assert!(ImageInfo::from_path("/nonexistent/nothing.png").is_err());
    }
}
