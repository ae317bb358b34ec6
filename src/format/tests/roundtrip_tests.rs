//! Export followed by parse.

use crate::format::{ImageInfo, PascalVocFormat, VocBndBox};
use crate::model::{BoundingBox, ColorHex, Point, ShapeId};
use crate::store::ShapeStore;

#[test]
fn test_roundtrip_document_fields() {
    let mut store = ShapeStore::new();
    store.add_box(BoundingBox {
        id: ShapeId::new(),
        x: 10.0,
        y: 10.0,
        width: 90.0,
        height: 70.0,
        label: "cat".to_string(),
        color: ColorHex::default(),
    });

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("cat.jpg", 640, 480))
        .unwrap();
    let doc = PascalVocFormat::parse(&xml).unwrap();

    assert_eq!(doc.folder, "images");
    assert_eq!(doc.filename, "cat.jpg");
    assert_eq!(doc.path, "cat.jpg");
    assert_eq!(doc.database, "Unknown");
    assert_eq!((doc.width, doc.height, doc.depth), (640, 480, 3));
    assert_eq!(doc.objects.len(), 1);

    let obj = &doc.objects[0];
    assert_eq!(obj.name, "cat");
    assert!(!obj.is_polygon());
    assert_eq!(
        obj.bndbox,
        VocBndBox {
            xmin: 10,
            ymin: 10,
            xmax: 100,
            ymax: 80,
        }
    );
}

#[test]
fn test_roundtrip_polygon_vertices() {
    let points = vec![
        Point::new(12.25, 40.75),
        Point::new(80.5, 41.25),
        Point::new(77.75, 99.25),
        Point::new(15.0, 95.5),
    ];
    let mut store = ShapeStore::new();
    store.add_polygon(points.clone(), "field", ColorHex::default());

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("farm.jpg", 128, 128))
        .unwrap();
    let doc = PascalVocFormat::parse(&xml).unwrap();

    let parsed = doc.objects[0].points();
    assert_eq!(parsed.len(), points.len());
    for (a, b) in parsed.iter().zip(&points) {
        assert!((a.x - b.x).abs() <= 0.5, "{:?} vs {:?}", a, b);
        assert!((a.y - b.y).abs() <= 0.5, "{:?} vs {:?}", a, b);
    }
    assert_eq!(
        doc.objects[0].bndbox,
        VocBndBox {
            xmin: 12,
            ymin: 41,
            xmax: 81,
            ymax: 99,
        }
    );
}

#[test]
fn test_roundtrip_empty_label() {
    let mut store = ShapeStore::new();
    store.add_polygon(
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 10.0),
        ],
        "",
        ColorHex::default(),
    );

    let xml = PascalVocFormat::new()
        .export(&store, &ImageInfo::new("x.jpg", 10, 10))
        .unwrap();
    let doc = PascalVocFormat::parse(&xml).unwrap();

    assert_eq!(doc.objects.len(), 1);
    assert_eq!(doc.objects[0].name, "");
    assert_eq!(doc.objects[0].polygon, vec![(0, 0), (10, 0), (0, 10)]);
}
