use super::*;

fn close(a: [f32; 4], b: [f32; 4]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-3)
}

#[test]
fn identity_amounts_produce_identity_matrices() {
    let px = [0.2, 0.4, 0.6, 1.0];
    for op in [
        FilterOp::Sepia(0.0),
        FilterOp::HueRotate(0.0),
        FilterOp::HueRotate(360.0),
        FilterOp::Brightness(1.0),
        FilterOp::Contrast(1.0),
        FilterOp::Saturate(1.0),
        FilterOp::Invert(0.0),
    ] {
        assert!(op.is_identity(), "{op:?}");
        assert!(close(op.color_matrix().apply(px), px), "{op:?}");
    }
}

#[test]
fn brightness_scales_and_clamps() {
    let out = FilterOp::Brightness(2.0).color_matrix().apply([0.25, 0.6, 0.0, 1.0]);
    assert!(close(out, [0.5, 1.0, 0.0, 1.0]));

    let dark = FilterOp::Brightness(0.0).color_matrix().apply([0.7, 0.7, 0.7, 1.0]);
    assert!(close(dark, [0.0, 0.0, 0.0, 1.0]));
}

#[test]
fn contrast_zero_is_mid_gray() {
    let out = FilterOp::Contrast(0.0).color_matrix().apply([0.9, 0.1, 0.3, 1.0]);
    assert!(close(out, [0.5, 0.5, 0.5, 1.0]));
}

#[test]
fn saturate_zero_is_luminance_gray() {
    let out = FilterOp::Saturate(0.0).color_matrix().apply([1.0, 0.0, 0.0, 1.0]);
    assert!(close(out, [0.213, 0.213, 0.213, 1.0]));
}

#[test]
fn invert_full_and_half() {
    let full = FilterOp::Invert(1.0).color_matrix().apply([0.2, 0.5, 1.0, 1.0]);
    assert!(close(full, [0.8, 0.5, 0.0, 1.0]));

    let half = FilterOp::Invert(0.5).color_matrix().apply([0.0, 1.0, 0.3, 1.0]);
    assert!(close(half, [0.5, 0.5, 0.5, 1.0]));
}

#[test]
fn hue_rotate_wraps_and_preserves_gray() {
    let a = FilterOp::HueRotate(90.0).color_matrix();
    let b = FilterOp::HueRotate(450.0).color_matrix();
    let c = FilterOp::HueRotate(-270.0).color_matrix();
    assert_eq!(a, b);
    assert!(close(a.apply([0.3, 0.6, 0.9, 1.0]), c.apply([0.3, 0.6, 0.9, 1.0])));

    let gray = [0.4, 0.4, 0.4, 1.0];
    assert!(close(a.apply(gray), gray));
}

#[test]
fn sepia_full_tints_white_warm() {
    let out = FilterOp::Sepia(1.0).color_matrix().apply([0.5, 0.5, 0.5, 1.0]);
    assert!(out[0] > out[1] && out[1] > out[2]);
}

#[test]
fn out_of_domain_amounts_are_normalized() {
    assert_eq!(FilterOp::Invert(1.5).normalized(), FilterOp::Invert(1.0));
    assert_eq!(FilterOp::Sepia(-1.0).normalized(), FilterOp::Sepia(0.0));
    assert_eq!(FilterOp::Brightness(-3.0).normalized(), FilterOp::Brightness(0.0));
    assert_eq!(FilterOp::Brightness(2.5).normalized(), FilterOp::Brightness(2.5));
    assert_eq!(FilterOp::HueRotate(f64::NAN).normalized(), FilterOp::HueRotate(0.0));
}

#[test]
fn css_text_uses_percentages_and_degrees() {
    assert_eq!(FilterOp::HueRotate(45.0).to_css(), "hue-rotate(45deg)");
    assert_eq!(FilterOp::Brightness(1.25).to_css(), "brightness(125%)");
    assert_eq!(FilterOp::Sepia(0.333).to_css(), "sepia(33.3%)");
    assert_eq!(FilterOp::Invert(2.0).to_css(), "invert(100%)");
}

#[test]
fn alpha_passes_through_every_matrix() {
    for op in [
        FilterOp::Sepia(0.7),
        FilterOp::HueRotate(200.0),
        FilterOp::Brightness(1.7),
        FilterOp::Contrast(0.3),
        FilterOp::Saturate(1.9),
        FilterOp::Invert(0.4),
    ] {
        let out = op.color_matrix().apply([0.1, 0.5, 0.9, 0.35]);
        assert!((out[3] - 0.35).abs() < 1e-6, "{op:?}");
    }
}
