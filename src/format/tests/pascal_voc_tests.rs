//! Tests for the Pascal VOC XML export.

use crate::format::{ExportOptions, ImageInfo, PascalVocFormat};
use crate::model::{BoundingBox, ColorHex, Point, ShapeId};
use crate::store::ShapeStore;

fn bbox(x: f32, y: f32, width: f32, height: f32, label: &str) -> BoundingBox {
    BoundingBox {
        id: ShapeId::new(),
        x,
        y,
        width,
        height,
        label: label.to_string(),
        color: ColorHex::default(),
    }
}

fn triangle() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(50.0, 0.0),
        Point::new(25.0, 50.0),
    ]
}

#[test]
fn test_voc_box_scenario() {
    let mut store = ShapeStore::new();
    store.add_box(bbox(10.0, 10.0, 90.0, 70.0, "cat"));

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("cat.jpg", 640, 480))
        .unwrap();

    assert!(xml.contains("<xmin>10</xmin>"));
    assert!(xml.contains("<ymin>10</ymin>"));
    assert!(xml.contains("<xmax>100</xmax>"));
    assert!(xml.contains("<ymax>80</ymax>"));
    assert!(xml.contains("<name>cat</name>"));
}

#[test]
fn test_voc_document_header() {
    let store = ShapeStore::new();
    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("photos/dog.png", 320, 200))
        .unwrap();

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains("<folder>images</folder>"));
    assert!(xml.contains("<filename>photos/dog.png</filename>"));
    assert!(xml.contains("<path>photos/dog.png</path>"));
    assert!(xml.contains("<database>Unknown</database>"));
    assert!(xml.contains("<width>320</width>"));
    assert!(xml.contains("<height>200</height>"));
    assert!(xml.contains("<depth>3</depth>"));
    assert!(xml.contains("<segmented>0</segmented>"));
    assert!(!xml.contains("<object>"));
}

#[test]
fn test_voc_placeholder_fields_per_object() {
    let mut store = ShapeStore::new();
    store.add_box(bbox(0.0, 0.0, 20.0, 20.0, "a"));
    store.add_polygon(triangle(), "b", ColorHex::default());

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("x.jpg", 100, 100))
        .unwrap();

    assert_eq!(xml.matches("<object>").count(), 2);
    assert_eq!(xml.matches("<pose>Unspecified</pose>").count(), 2);
    assert_eq!(xml.matches("<truncated>0</truncated>").count(), 2);
    assert_eq!(xml.matches("<difficult>0</difficult>").count(), 2);
    assert_eq!(xml.matches("<occluded>0</occluded>").count(), 2);
}

#[test]
fn test_voc_polygon_scenario() {
    let mut store = ShapeStore::new();
    store.add_polygon(triangle(), "roof", ColorHex::default());

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("house.jpg", 100, 100))
        .unwrap();

    for tag in [
        "<x1>0</x1>",
        "<y1>0</y1>",
        "<x2>50</x2>",
        "<y2>0</y2>",
        "<x3>25</x3>",
        "<y3>50</y3>",
        "<xmin>0</xmin>",
        "<xmax>50</xmax>",
        "<ymin>0</ymin>",
        "<ymax>50</ymax>",
    ] {
        assert!(xml.contains(tag), "missing {} in\n{}", tag, xml);
    }
    assert!(!xml.contains("<x4>"));
}

#[test]
fn test_voc_polygon_bndbox_encloses_rounded_vertices() {
    let mut store = ShapeStore::new();
    let points = vec![
        Point::new(10.5, 20.25),
        Point::new(60.4, 20.5),
        Point::new(35.75, 70.5),
    ];
    store.add_polygon(points, "kite", ColorHex::default());

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("sky.jpg", 100, 100))
        .unwrap();
    let doc = PascalVocFormat::parse(&xml).unwrap();
    let object = &doc.objects[0];

    assert_eq!(object.polygon, vec![(11, 20), (60, 21), (36, 71)]);
    assert_eq!(object.bndbox.xmin, 11);
    assert_eq!(object.bndbox.ymin, 20);
    assert_eq!(object.bndbox.xmax, 60);
    assert_eq!(object.bndbox.ymax, 71);
}

#[test]
fn test_voc_rounds_at_serialization() {
    let mut store = ShapeStore::new();
    store.add_box(bbox(10.25, 10.5, 20.5, 19.5, "a"));

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("x.jpg", 100, 100))
        .unwrap();

    assert!(xml.contains("<xmin>10</xmin>"));
    assert!(xml.contains("<ymin>11</ymin>"));
    // 10.25 + 20.5 = 30.75, not 10 + 21
    assert!(xml.contains("<xmax>31</xmax>"));
    assert!(xml.contains("<ymax>30</ymax>"));

    // Stored geometry keeps its fractions.
    assert_eq!(store.boxes()[0].x, 10.25);
}

#[test]
fn test_voc_missing_image_dimensions() {
    let mut store = ShapeStore::new();
    store.add_box(bbox(0.0, 0.0, 10.0, 10.0, "a"));

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::unloaded("pending.jpg"))
        .unwrap();

    assert!(xml.contains("<width>0</width>"));
    assert!(xml.contains("<height>0</height>"));
    assert!(xml.contains("<object>"));
}

#[test]
fn test_voc_escapes_labels() {
    let mut store = ShapeStore::new();
    store.add_box(bbox(0.0, 0.0, 10.0, 10.0, "cats & <dogs>"));

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("x.jpg", 10, 10))
        .unwrap();

    assert!(xml.contains("<name>cats &amp; &lt;dogs&gt;</name>"));
}

#[test]
fn test_voc_custom_options() {
    let format = PascalVocFormat::with_options(ExportOptions {
        folder: "VOC2012".to_string(),
        database: "The VOC2012 Database".to_string(),
    });

    let xml = format
        .export(&ShapeStore::new(), &ImageInfo::new("x.jpg", 10, 10))
        .unwrap();

    assert!(xml.contains("<folder>VOC2012</folder>"));
    assert!(xml.contains("<database>The VOC2012 Database</database>"));
}

#[test]
fn test_voc_export_file() {
    let file = PascalVocFormat::new()
        .export_file(&ShapeStore::new(), &ImageInfo::new("x.jpg", 10, 10))
        .unwrap();

    assert_eq!(file.filename, "annotations.xml");
    assert_eq!(file.mime, "text/xml");
    assert!(file.contents.contains("<annotation>"));
}
