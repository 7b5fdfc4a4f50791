use super::*;

#[test]
fn defaults_per_kind() {
    let r = ShapeDraft::new(ShapeKind::Rectangle, Color::RED);
    assert_eq!((r.x, r.y, r.width, r.height), (100.0, 100.0, 50.0, 75.0));
    assert_eq!(r.rotation, 180.0);
    assert_eq!(r.stroke_width, 3.0);

    let w = ShapeDraft::new(ShapeKind::WideRectangle, Color::RED);
    assert_eq!((w.width, w.height, w.rotation), (75.0, 50.0, 0.0));

    for k in [ShapeKind::Circle, ShapeKind::Hexagon, ShapeKind::Triangle] {
        let d = ShapeDraft::new(k, Color::BLACK);
        assert_eq!((d.width, d.height, d.rotation), (80.0, 80.0, 0.0));
        assert_eq!(d.color, Color::BLACK);
    }
}

#[test]
fn kind_serde_accepts_camel_case_alias() {
    let k: ShapeKind = serde_json::from_str("\"wideRectangle\"").unwrap();
    assert_eq!(k, ShapeKind::WideRectangle);
    assert_eq!(
        serde_json::to_string(&ShapeKind::WideRectangle).unwrap(),
        "\"wide_rectangle\""
    );
}

#[test]
fn draft_fills_missing_fields() {
    let d: ShapeDraft =
        serde_json::from_str(r#"{"kind":"circle","width":40,"height":40}"#).unwrap();
    assert_eq!((d.x, d.y), (100.0, 100.0));
    assert_eq!(d.stroke_width, 3.0);
    assert_eq!(d.color, Color::RED);
}

#[test]
fn patch_clamps_into_bounds_and_ignores_nan() {
    let mut s =
        AnnotationShape::from_draft(ShapeId(1), &ShapeDraft::new(ShapeKind::Circle, Color::RED));
    let patch = ShapePatch {
        width: Some(10_000.0),
        height: Some(1.0),
        rotation: Some(f64::NAN),
        stroke_width: Some(f64::INFINITY),
        x: Some(-5.0),
        y: Some(900.0),
        ..ShapePatch::default()
    };
    patch.apply_to(&mut s, &ShapeBounds::default(), (750.0, 417.0));
    assert_eq!(s.width, 650.0);
    assert_eq!(s.height, 20.0);
    assert_eq!(s.rotation, 0.0);
    assert_eq!(s.stroke_width, 25.0);
    assert_eq!(s.x, 0.0);
    assert_eq!(s.y, 417.0);
}

#[test]
fn attrs_carry_stroke() {
    let s = AnnotationShape::from_draft(
        ShapeId(7),
        &ShapeDraft::new(ShapeKind::Rectangle, Color::RED),
    );
    let a = s.attrs();
    assert_eq!(a.stroke_width, Some(3.0));
    assert_eq!(a.center(), (125.0, 137.5));
    assert!(ShapePatch::default().is_empty());
}
