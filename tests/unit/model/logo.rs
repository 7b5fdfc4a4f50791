use super::*;

#[test]
fn width_follows_height() {
    let mut l = Logo::new(LogoId(1), AssetRef::new("a.png"), 2.5, 100.0);
    assert_eq!(l.width, 250.0);
    l.set_height(40.0);
    assert_eq!(l.width / l.height, 2.5);
    l.set_aspect_ratio(0.5);
    assert_eq!((l.width, l.height), (20.0, 40.0));
}

#[test]
fn unusable_aspect_becomes_square() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let l = Logo::new(LogoId(1), AssetRef::new("a.png"), bad, 64.0);
        assert_eq!(l.aspect_ratio, 1.0);
        assert_eq!(l.width, 64.0);
    }
}

#[test]
fn defaults_from_json() {
    let l: Logo = serde_json::from_str(
        r#"{"id":3,"src":"l.png","x":1,"y":2,"width":20,"height":10,"aspect_ratio":2}"#,
    )
    .unwrap();
    assert_eq!(l.layer, LogoLayer::Front);
    assert_eq!(l.opacity, 1.0);
    assert!(l.filters.is_identity());
    assert_eq!(l.id.to_string(), "logo-3");
}
