use super::*;
use serde_json::json;

#[test]
fn missing_fields_default_to_identity() {
    let f: FilterSet = serde_json::from_value(json!({})).unwrap();
    assert_eq!(f, FilterSet::IDENTITY);
    assert!(f.is_identity());
    assert!(f.to_chain().is_empty());
    assert_eq!(f.to_css(), "none");

    let f: FilterSet = serde_json::from_value(json!({ "hue": 120 })).unwrap();
    assert_eq!(f.sepia, 0.0);
    assert_eq!(f.brightness, 100.0);
    assert!(!f.is_identity());
}

#[test]
fn chain_order_is_fixed_regardless_of_field_order() {
    let f = FilterSet {
        invert: 10.0,
        saturate: 150.0,
        contrast: 80.0,
        brightness: 120.0,
        hue: 30.0,
        sepia: 40.0,
    };
    let chain = f.to_chain();
    assert_eq!(
        chain,
        vec![
            FilterOp::Sepia(0.4),
            FilterOp::HueRotate(30.0),
            FilterOp::Brightness(1.2),
            FilterOp::Contrast(0.8),
            FilterOp::Saturate(1.5),
            FilterOp::Invert(0.1),
        ]
    );
    assert_eq!(
        f.to_css(),
        "sepia(40%) hue-rotate(30deg) brightness(120%) contrast(80%) saturate(150%) invert(10%)"
    );
}

#[test]
fn hue_wraps_in_chain() {
    let f = FilterSet {
        hue: 390.0,
        ..FilterSet::IDENTITY
    };
    assert_eq!(f.to_chain(), vec![FilterOp::HueRotate(30.0)]);

    let full_turn = FilterSet {
        hue: 360.0,
        ..FilterSet::IDENTITY
    };
    assert!(full_turn.is_identity());
}

#[test]
fn out_of_range_values_are_kept_not_rejected() {
    let f: FilterSet = serde_json::from_value(json!({ "brightness": 250 })).unwrap();
    assert_eq!(f.brightness, 250.0);
    assert_eq!(f.to_chain(), vec![FilterOp::Brightness(2.5)]);
}
