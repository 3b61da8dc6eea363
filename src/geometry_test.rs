use serde_json::json;

use super::*;

#[test]
fn defaults_are_zero() {
    assert_eq!(Rect::<i32>::default(), Rect::new(0, 0, 0, 0));
    assert_eq!(Point::<f32>::default(), Point::new(0.0, 0.0));
    assert_eq!(Bounds::<f32>::default().width, 0.0);
}

#[test]
fn rect_accessors_read_through_components() {
    let rect = Rect::new(10, 20, 300, 400);
    assert_eq!(rect.x(), 10);
    assert_eq!(rect.y(), 20);
    assert_eq!(rect.width(), 300);
    assert_eq!(rect.height(), 400);
    assert_eq!(rect.position, Point::new(10, 20));
    assert_eq!(rect.size, Size::new(300, 400));
}

#[test]
fn display_matches_export_tool_format() {
    assert_eq!(Point::new(1, 2).to_string(), "X:1 Y:2");
    assert_eq!(Size::new(3, 4).to_string(), "Width:3 Height:4");
    assert_eq!(Rect::new(0, 0, 1024, 768).to_string(), "X:0 Y:0 Width:1024 Height:768");
    let bounds = Bounds { top: 1.5_f32, bottom: 2.0, left: 3.0, right: 4.0, width: 5.0, height: 6.0 };
    assert_eq!(bounds.to_string(), "Top:1.5 Bottom:2 Left:3 Right:4 Width:5 Height:6");
}

#[test]
fn rect_decodes_with_missing_keys_as_zero() {
    let rect = Rect::<i32>::from_json(&json!({ "x": 5, "width": 100 }), &KeyPath::root()).expect("rect");
    assert_eq!(rect, Rect::new(5, 0, 100, 0));
}

#[test]
fn rect_rejects_non_numeric_field() {
    let path = KeyPath::root().key("rect");
    let err = Rect::<i32>::from_json(&json!({ "x": "left" }), &path).expect_err("string x");
    assert_eq!(err.path(), Some("rect.x"));
}

#[test]
fn bounds_keep_redundant_fields_independent() {
    let value = json!({ "top": 10, "bottom": 20, "left": 0, "right": 5, "width": 999, "height": 1 });
    let bounds = Bounds::<f32>::from_json(&value, &KeyPath::root()).expect("bounds");
    assert_eq!(bounds.width, 999.0);
    assert_eq!(bounds.right - bounds.left, 5.0);
}

#[test]
fn point_decodes_floats() {
    let point = Point::<f32>::from_json(&json!({ "x": 12.5, "y": -3 }), &KeyPath::root()).expect("point");
    assert_eq!(point, Point::new(12.5, -3.0));
}

#[test]
fn point_rejects_array() {
    let err = Point::<f32>::from_json(&json!([1, 2]), &KeyPath::root().key("position")).expect_err("array");
    assert!(matches!(err, LayoutError::Malformed { expected: "object", found: "array", .. }));
}

#[test]
fn rect_serialises_flat() {
    let value = serde_json::to_value(Rect::new(1, 2, 3, 4)).expect("serialise");
    assert_eq!(value, json!({ "x": 1, "y": 2, "width": 3, "height": 4 }));
}
