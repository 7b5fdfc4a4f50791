use super::*;

#[test]
fn defaults_match_editor_surfaces() {
    let cfg = EditorConfig::default();
    assert_eq!((cfg.design.width, cfg.design.height), (800, 467));
    assert_eq!((cfg.preview_export.width, cfg.preview_export.height), (2400, 1400));
    assert_eq!((cfg.print_export.width, cfg.print_export.height), (7080, 4140));
    assert_eq!(cfg.fallback_background, Color::FALLBACK_GRAY);
    assert_eq!(cfg.export_filename, "playmat-personalizado.png");
    cfg.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = EditorConfig::from_json_str(
        r##"{ "drag_margin": 10, "fallback_background": "#000000" }"##,
    )
    .unwrap();
    assert_eq!(cfg.drag_margin, 10.0);
    assert_eq!(cfg.fallback_background, Color::BLACK);
    assert_eq!(cfg.design, EditorConfig::default().design);
    assert_eq!(cfg.shape_bounds, ShapeBounds::default());
}

#[test]
fn invalid_json_is_rejected() {
    let err = EditorConfig::from_json_str(r#"{ "design": { "width": 0, "height": 10 } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("design"));

    let err = EditorConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, PlaymatError::Serde(_)));
}
