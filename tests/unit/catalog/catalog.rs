use super::*;

fn design() -> Canvas {
    Canvas {
        width: 800,
        height: 467,
    }
}

#[test]
fn builtin_presets_are_valid_and_fit_the_design() {
    let cat = Catalog::builtin(design());
    cat.validate().unwrap();
    assert!(cat.preset("blank").unwrap().shapes.is_empty());

    let zones = cat.preset("card_zones").unwrap();
    assert_eq!(zones.shapes.len(), 6);
    for s in &zones.shapes {
        assert!(s.x >= 0.0 && s.y >= 0.0);
        assert!(s.x + s.width <= 800.0, "{s:?}");
        assert!(s.y + s.height <= 467.0, "{s:?}");
    }

    let framed = cat.preset("framed").unwrap();
    let o = framed.overlay.as_ref().unwrap();
    assert_eq!((o.x, o.y, o.width, o.height), (10.0, 10.0, 780.0, 447.0));
    assert_eq!(o.opacity, 0.8);
}

#[test]
fn loads_json_contract() {
    let cat = Catalog::from_json_str(
        r#"{
            "presets": {
                "duel": {
                    "overlay": {"src": "o.png", "x": 0, "y": 0, "width": 800, "height": 467, "opacity": 0.5},
                    "shapes": [{"kind": "hexagon", "width": 60, "height": 40}]
                }
            },
            "logos": {
                "skull": {"src": "logos/skull.svg", "default_filters": {"invert": 100}}
            }
        }"#,
    )
    .unwrap();
    let duel = cat.preset("duel").unwrap();
    assert_eq!(duel.shapes[0].kind, ShapeKind::Hexagon);
    assert_eq!(duel.overlay.as_ref().unwrap().opacity, 0.5);
    assert_eq!(cat.logo("skull").unwrap().default_filters.invert, 100.0);
    assert!(cat.logo("nope").is_err());
    assert!(cat.preset("nope").is_err());
}

#[test]
fn rejects_degenerate_shapes() {
    let err = Catalog::from_json_str(
        r#"{"presets": {"bad": {"shapes": [{"kind": "circle", "width": 0, "height": 10}]}}}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("bad"));
}

#[test]
fn merge_prefers_other() {
    let base = Catalog::builtin(design());
    let other = Catalog::from_json_str(r#"{"presets": {"blank": {"shapes": [{"kind": "circle", "width": 5, "height": 5}]}}}"#)
        .unwrap();
    let merged = base.merged(other);
    assert_eq!(merged.preset("blank").unwrap().shapes.len(), 1);
    assert!(merged.preset("card_zones").is_ok());
}
