use super::*;

fn sample_pixels() -> Vec<u8> {
    let mut out = Vec::new();
    for a in [0u8, 1, 64, 128, 200, 255] {
        for c in [0u8, 17, 99, 180, 255] {
            let p = crate::Rgba8Premul::from_straight_rgba(c, 255 - c, c / 2, a);
            out.extend_from_slice(&p.to_array());
        }
    }
    out
}

#[test]
fn identity_filters_are_bit_exact_and_borrowed() {
    let px = sample_pixels();
    let out = apply_filters(&px, &FilterSet::default()).unwrap();
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(out.as_ref(), px.as_slice());
}

#[test]
fn explicit_identity_chain_round_trips_opaque_pixels() {
    let px: Vec<u8> = [12u8, 200, 77, 255, 0, 0, 0, 255, 255, 255, 255, 255].to_vec();
    let mut out = px.clone();
    let chain = FilterSet::IDENTITY.ops();
    apply_chain_in_place(&mut out, &chain).unwrap();
    assert_eq!(out, px);
}

#[test]
fn invert_full_on_opaque_pixel() {
    let mut px = vec![10u8, 100, 250, 255];
    let f = FilterSet {
        invert: 100.0,
        ..FilterSet::IDENTITY
    };
    let out = apply_filters(&px, &f).unwrap().into_owned();
    assert_eq!(out, vec![245, 155, 5, 255]);

    apply_chain_in_place(&mut px, &f.to_chain()).unwrap();
    assert_eq!(px, out);
}

#[test]
fn filters_respect_premultiplied_alpha() {
    // 50% alpha white, brightness 50% -> straight 0.5 gray at alpha 0.5 -> premul ~64.
    let px = vec![128u8, 128, 128, 128];
    let f = FilterSet {
        brightness: 50.0,
        ..FilterSet::IDENTITY
    };
    let out = apply_filters(&px, &f).unwrap();
    assert_eq!(out[3], 128);
    for c in &out[0..3] {
        assert!((i32::from(*c) - 64).abs() <= 1, "{c}");
    }
}

#[test]
fn transparent_pixels_stay_transparent() {
    let px = vec![0u8, 0, 0, 0];
    let f = FilterSet {
        invert: 100.0,
        brightness: 300.0,
        ..FilterSet::IDENTITY
    };
    assert_eq!(apply_filters(&px, &f).unwrap().as_ref(), &[0, 0, 0, 0]);
}

#[test]
fn order_matters_invert_is_last() {
    // brightness(0) then invert(100) -> white; the reverse order would be black.
    let px = vec![90u8, 40, 200, 255];
    let f = FilterSet {
        brightness: 0.0,
        invert: 100.0,
        ..FilterSet::IDENTITY
    };
    assert_eq!(apply_filters(&px, &f).unwrap().as_ref(), &[255, 255, 255, 255]);
}

#[test]
fn ragged_buffers_are_rejected() {
    let mut px = vec![1u8, 2, 3];
    assert!(apply_chain_in_place(&mut px, &[FilterOp::Invert(1.0)]).is_err());
}
