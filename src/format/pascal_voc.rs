//! Pascal VOC XML export of the current image's shapes.
//!
//! Boxes become a standard `<object>` with a `<bndbox>`. Polygons keep
//! their vertices in a `<polygon>` element (`x1, y1, x2, y2, ...`) followed
//! by the axis-aligned `<bndbox>` over those vertices, so VOC readers that
//! only know boxes still get a usable rectangle.

use std::collections::BTreeMap;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::constants::{DEFAULT_DATABASE, DEFAULT_EXPORT_FOLDER, EXPORT_FILENAME, EXPORT_MIME};
use crate::format::error::FormatError;
use crate::format::image_info::ImageInfo;
use crate::model::{Point, Rect};
use crate::store::ShapeStore;

/// Placeholder values written into every document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub folder: String,
    pub database: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            folder: DEFAULT_EXPORT_FOLDER.to_string(),
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

/// A finished export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

/// Integer pixel box as written to `<bndbox>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VocBndBox {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl VocBndBox {
    fn from_rect(rect: &Rect) -> Self {
        let r = rect.normalized();
        Self {
            xmin: round_coord(r.x),
            ymin: round_coord(r.y),
            xmax: round_coord(r.x + r.width),
            ymax: round_coord(r.y + r.height),
        }
    }
}

/// One `<object>` read back from a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocObject {
    pub name: String,
    pub bndbox: VocBndBox,
    /// Vertices in document order; empty for boxes.
    pub polygon: Vec<(i64, i64)>,
}

impl VocObject {
    pub fn is_polygon(&self) -> bool {
        !self.polygon.is_empty()
    }

    /// Polygon vertices as image points.
    pub fn points(&self) -> Vec<Point> {
        self.polygon
            .iter()
            .map(|&(x, y)| Point::new(x as f32, y as f32))
            .collect()
    }
}

/// A parsed annotation document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocAnnotation {
    pub folder: String,
    pub filename: String,
    pub path: String,
    pub database: String,
    pub width: u32,
    pub height: u32,
    pub depth: u32,
    pub objects: Vec<VocObject>,
}

/// Round half toward positive infinity, matching what browser-side tools
/// write for the same coordinates.
pub fn round_coord(v: f32) -> i64 {
    (f64::from(v) + 0.5).floor() as i64
}

/// Pascal VOC writer and reader.
#[derive(Debug, Clone, Default)]
pub struct PascalVocFormat {
    options: ExportOptions,
}

impl PascalVocFormat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ExportOptions) -> Self {
        Self { options }
    }

    /// Serialize every shape in `store` for `image`.
    ///
    /// Missing image dimensions are written as 0x0.
    pub fn export(&self, store: &ShapeStore, image: &ImageInfo) -> Result<String, FormatError> {
        if image.dimensions.is_none() {
            log::warn!(
                "Image '{}' has no dimensions, exporting size 0x0",
                image.reference
            );
        }

        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| FormatError::Xml(e.into()))?;

        open(&mut writer, "annotation")?;
        write_text_element(&mut writer, "folder", &self.options.folder)?;
        write_text_element(&mut writer, "filename", &image.reference)?;
        write_text_element(&mut writer, "path", &image.reference)?;

        open(&mut writer, "source")?;
        write_text_element(&mut writer, "database", &self.options.database)?;
        close(&mut writer, "source")?;

        open(&mut writer, "size")?;
        write_text_element(&mut writer, "width", &image.width().to_string())?;
        write_text_element(&mut writer, "height", &image.height().to_string())?;
        write_text_element(&mut writer, "depth", "3")?;
        close(&mut writer, "size")?;

        write_text_element(&mut writer, "segmented", "0")?;

        for b in store.boxes() {
            open_object(&mut writer, &b.label)?;
            write_bndbox(&mut writer, &VocBndBox::from_rect(&b.rect()))?;
            close(&mut writer, "object")?;
        }

        for poly in store.polygons() {
            let Some(extent) = poly.bounding_box() else {
                continue;
            };
            open_object(&mut writer, &poly.label)?;
            open(&mut writer, "polygon")?;
            for (i, p) in poly.points.iter().enumerate() {
                let n = i + 1;
                write_text_element(&mut writer, &format!("x{}", n), &round_coord(p.x).to_string())?;
                write_text_element(&mut writer, &format!("y{}", n), &round_coord(p.y).to_string())?;
            }
            close(&mut writer, "polygon")?;
            write_bndbox(&mut writer, &VocBndBox::from_rect(&extent))?;
            close(&mut writer, "object")?;
        }

        close(&mut writer, "annotation")?;

        log::info!(
            "📤 Exported {} boxes and {} polygons for '{}'",
            store.boxes().len(),
            store.polygons().len(),
            image.reference
        );

        let result = writer.into_inner();
        String::from_utf8(result).map_err(|_| FormatError::invalid_format("Invalid UTF-8 in XML"))
    }

    /// Export packaged as the `annotations.xml` download.
    pub fn export_file(
        &self,
        store: &ShapeStore,
        image: &ImageInfo,
    ) -> Result<ExportFile, FormatError> {
        Ok(ExportFile {
            filename: EXPORT_FILENAME,
            mime: EXPORT_MIME,
            contents: self.export(store, image)?,
        })
    }

    /// Read a document produced by [`PascalVocFormat::export`], or any
    /// plain VOC file.
    pub fn parse(xml: &str) -> Result<VocAnnotation, FormatError> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut doc = VocAnnotation::default();
        let mut seen_root = false;

        // Current parsing state
        let mut current_element = String::new();
        let mut in_object = false;
        let mut in_bndbox = false;
        let mut in_polygon = false;
        let mut in_size = false;
        let mut in_source = false;

        let mut object = VocObject::default();
        let mut vertices: BTreeMap<usize, (Option<i64>, Option<i64>)> = BTreeMap::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    match name.as_str() {
                        "annotation" => seen_root = true,
                        "object" => {
                            in_object = true;
                            object = VocObject::default();
                            vertices.clear();
                        }
                        "bndbox" => in_bndbox = true,
                        "polygon" => in_polygon = true,
                        "size" => in_size = true,
                        "source" => in_source = true,
                        _ => {}
                    }
                    current_element = name;
                }
                Ok(Event::End(ref e)) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                    match name.as_str() {
                        "object" => {
                            object.polygon = collect_vertices(&vertices)?;
                            doc.objects.push(std::mem::take(&mut object));
                            in_object = false;
                        }
                        "bndbox" => in_bndbox = false,
                        "polygon" => in_polygon = false,
                        "size" => in_size = false,
                        "source" => in_source = false,
                        _ => {}
                    }
                    current_element.clear();
                }
                Ok(Event::Text(ref e)) => {
                    let text = e
                        .unescape()
                        .map_err(|e| FormatError::Xml(e.into()))?
                        .to_string();

                    if in_size {
                        match current_element.as_str() {
                            "width" => doc.width = parse_number(&current_element, &text)?,
                            "height" => doc.height = parse_number(&current_element, &text)?,
                            "depth" => doc.depth = parse_number(&current_element, &text)?,
                            _ => {}
                        }
                    } else if in_source {
                        if current_element == "database" {
                            doc.database = text;
                        }
                    } else if in_object {
                        if in_bndbox {
                            let b = &mut object.bndbox;
                            match current_element.as_str() {
                                "xmin" => b.xmin = parse_coord(&current_element, &text)?,
                                "ymin" => b.ymin = parse_coord(&current_element, &text)?,
                                "xmax" => b.xmax = parse_coord(&current_element, &text)?,
                                "ymax" => b.ymax = parse_coord(&current_element, &text)?,
                                _ => {}
                            }
                        } else if in_polygon {
                            record_vertex(&mut vertices, &current_element, &text)?;
                        } else if current_element == "name" {
                            object.name = text;
                        }
                    } else {
                        match current_element.as_str() {
                            "folder" => doc.folder = text,
                            "filename" => doc.filename = text,
                            "path" => doc.path = text,
                            _ => {}
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(FormatError::Xml(e.into()));
                }
                _ => {}
            }
        }

        if !seen_root {
            return Err(FormatError::missing_field("annotation"));
        }

        log::debug!(
            "Parsed VOC document '{}' with {} objects",
            doc.filename,
            doc.objects.len()
        );
        Ok(doc)
    }
}

fn open_object<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), FormatError> {
    open(writer, "object")?;
    write_text_element(writer, "name", name)?;
    write_text_element(writer, "pose", "Unspecified")?;
    write_text_element(writer, "truncated", "0")?;
    write_text_element(writer, "difficult", "0")?;
    write_text_element(writer, "occluded", "0")?;
    Ok(())
}

fn write_bndbox<W: Write>(writer: &mut Writer<W>, b: &VocBndBox) -> Result<(), FormatError> {
    open(writer, "bndbox")?;
    write_text_element(writer, "xmin", &b.xmin.to_string())?;
    write_text_element(writer, "ymin", &b.ymin.to_string())?;
    write_text_element(writer, "xmax", &b.xmax.to_string())?;
    write_text_element(writer, "ymax", &b.ymax.to_string())?;
    close(writer, "bndbox")
}

fn open<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), FormatError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(|e| FormatError::Xml(e.into()))?;
    Ok(())
}

fn close<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<(), FormatError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(|e| FormatError::Xml(e.into()))?;
    Ok(())
}

/// Write a simple text element.
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> Result<(), FormatError> {
    open(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(|e| FormatError::Xml(e.into()))?;
    close(writer, name)
}

fn parse_number(field: &str, text: &str) -> Result<u32, FormatError> {
    text.trim()
        .parse()
        .map_err(|_| FormatError::invalid_format(format!("{} is not a number: '{}'", field, text)))
}

fn parse_coord(field: &str, text: &str) -> Result<i64, FormatError> {
    text.trim().parse().map_err(|_| {
        FormatError::invalid_coordinates(format!("{} is not an integer: '{}'", field, text))
    })
}

/// Store the value of an `xN`/`yN` element. Other elements inside
/// `<polygon>` are ignored.
fn record_vertex(
    vertices: &mut BTreeMap<usize, (Option<i64>, Option<i64>)>,
    element: &str,
    text: &str,
) -> Result<(), FormatError> {
    let (is_x, index) = match (element.strip_prefix('x'), element.strip_prefix('y')) {
        (Some(rest), _) => (true, rest),
        (_, Some(rest)) => (false, rest),
        _ => return Ok(()),
    };
    let Ok(n) = index.parse::<usize>() else {
        return Ok(());
    };
    if n == 0 {
        return Err(FormatError::invalid_coordinates(format!(
            "polygon vertices are numbered from 1, got '{}'",
            element
        )));
    }
    let value = parse_coord(element, text)?;
    let slot = vertices.entry(n).or_default();
    if is_x {
        slot.0 = Some(value);
    } else {
        slot.1 = Some(value);
    }
    Ok(())
}

fn collect_vertices(
    vertices: &BTreeMap<usize, (Option<i64>, Option<i64>)>,
) -> Result<Vec<(i64, i64)>, FormatError> {
    vertices
        .iter()
        .enumerate()
        .map(|(i, (&n, &(x, y)))| {
            if n != i + 1 {
                return Err(FormatError::invalid_coordinates(format!(
                    "polygon vertex {} is missing",
                    i + 1
                )));
            }
            match (x, y) {
                (Some(x), Some(y)) => Ok((x, y)),
                _ => Err(FormatError::missing_field(format!(
                    "{}{}",
                    if x.is_none() { "x" } else { "y" },
                    n
                ))),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_coord_half_up() {
        assert_eq!(round_coord(2.5), 3);
        assert_eq!(round_coord(2.49), 2);
        assert_eq!(round_coord(-2.5), -2);
        assert_eq!(round_coord(-2.6), -3);
    }

    #[test]
    fn test_parse_rejects_non_voc() {
        let err = PascalVocFormat::parse("<root><a>1</a></root>").unwrap_err();
        assert!(matches!(err, FormatError::MissingField { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_coordinate() {
        let xml = "<annotation><object><name>a</name><bndbox><xmin>ten</xmin></bndbox></object></annotation>";
        let err = PascalVocFormat::parse(xml).unwrap_err();
        assert!(matches!(err, FormatError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_parse_rejects_gap_in_vertices() {
        let xml = "<annotation><object><name>a</name><polygon>\
                   <x1>0</x1><y1>0</y1><x3>5</x3><y3>5</y3>\
                   </polygon></object></annotation>";
        assert!(PascalVocFormat::parse(xml).is_err());
    }

    #[test]
    fn test_parse_reports_half_vertex() {
        let xml = "<annotation><object><name>a</name><polygon>\
                   <x1>0</x1><y1>0</y1><x2>5</x2>\
                   </polygon></object></annotation>";
        let err = PascalVocFormat::parse(xml).unwrap_err();
        assert!(matches!(err, FormatError::MissingField { ref field } if field == "y2"));
    }
}
