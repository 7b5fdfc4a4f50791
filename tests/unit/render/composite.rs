use super::*;

fn px(v: [u8; 4]) -> Rgba8Premul {
    Rgba8Premul::from_array(v)
}

#[test]
fn zero_opacity_or_transparent_source_keeps_destination() {
    let dst = px([10, 20, 30, 40]);
    assert_eq!(over(dst, px([200, 200, 200, 200]), 0.0), dst);
    assert_eq!(over(dst, px([0, 0, 0, 0]), 1.0), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    let src = px([255, 0, 0, 255]);
    assert_eq!(over(px([0, 0, 0, 255]), src, 1.0), src);
}

#[test]
fn half_opacity_blends() {
    let out = over(px([0, 0, 255, 255]), px([255, 0, 0, 255]), 0.5);
    assert_eq!(out.to_array(), [128, 0, 127, 255]);
}

#[test]
fn translucent_source_over_transparent_stays_premultiplied() {
    let out = over(Rgba8Premul::transparent(), px([64, 0, 0, 128]), 1.0);
    assert_eq!(out.to_array(), [64, 0, 0, 128]);
}

#[test]
fn buffer_blend_rejects_mismatched_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(over_in_place(&mut [0u8; 3], &[0u8; 3], 1.0).is_err());

    over_in_place(&mut dst, &[0, 0, 0, 0, 9, 9, 9, 255], 1.0).unwrap();
    assert_eq!(dst, vec![0, 0, 0, 0, 9, 9, 9, 255]);
}
