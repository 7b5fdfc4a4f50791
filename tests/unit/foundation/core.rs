use super::*;

#[test]
fn canvas_rejects_empty_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(800, 467).unwrap();
    assert_eq!(c.rect(), Rect::new(0.0, 0.0, 800.0, 467.0));
    assert_eq!(c.pixel_count(), 800 * 467);
}

#[test]
fn premul_rounds_to_nearest() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 255).to_array(),
        [10, 20, 30, 255]
    );
}

#[test]
fn scaling_a_premultiplied_pixel_scales_every_channel() {
    let p = Rgba8Premul::from_array([200, 100, 0, 255]);
    assert_eq!(p.scaled(255), p);
    assert_eq!(p.scaled(0), Rgba8Premul::transparent());
    assert_eq!(p.scaled(128).to_array(), [100, 50, 0, 128]);
}
