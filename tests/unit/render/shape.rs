use super::*;
use crate::foundation::color::Color;
use crate::foundation::core::Rgba8Premul;
use crate::model::shape::{ShapeId, ShapeKind};

const C: Canvas = Canvas {
    width: 200,
    height: 200,
};

fn shape(kind: ShapeKind, rotation: f64) -> AnnotationShape {
    AnnotationShape {
        id: ShapeId(1),
        kind,
        x: 50.0,
        y: 50.0,
        width: 100.0,
        height: 60.0,
        color: Color::RED,
        rotation,
        stroke_width: 4.0,
    }
}

fn is_red(p: Rgba8Premul) -> bool {
    p.r > 200 && p.g < 40 && p.b < 40 && p.a > 200
}

#[test]
fn rectangle_is_stroke_only() {
    let mut s = RasterSurface::new(C).unwrap();
    s.clear(Rgba8Premul::transparent());
    render_shape(&mut s, &shape(ShapeKind::Rectangle, 0.0), C, C).unwrap();

    assert!(is_red(s.pixel(50, 80).unwrap()));
    assert!(is_red(s.pixel(100, 50).unwrap()));
    assert_eq!(s.pixel(100, 80).unwrap(), Rgba8Premul::transparent());
    assert_eq!(s.pixel(10, 10).unwrap(), Rgba8Premul::transparent());
}

#[test]
fn rotation_pivots_on_center() {
    let mut s = RasterSurface::new(C).unwrap();
    s.clear(Rgba8Premul::transparent());
    render_shape(&mut s, &shape(ShapeKind::Rectangle, 90.0), C, C).unwrap();

    // 100x60 box centered at (100, 80) turned a quarter: x spans 70..130, y spans 30..130.
    assert!(is_red(s.pixel(70, 80).unwrap()));
    assert!(is_red(s.pixel(100, 30).unwrap()));
    assert_eq!(s.pixel(50, 80).unwrap(), Rgba8Premul::transparent());
}

#[test]
fn circle_uses_smaller_dimension() {
    let mut s = RasterSurface::new(C).unwrap();
    s.clear(Rgba8Premul::transparent());
    render_shape(&mut s, &shape(ShapeKind::Circle, 0.0), C, C).unwrap();

    // radius 30 around (100, 80)
    assert!(is_red(s.pixel(70, 80).unwrap()));
    assert!(is_red(s.pixel(129, 80).unwrap()));
    assert_eq!(s.pixel(52, 80).unwrap(), Rgba8Premul::transparent());
}

#[test]
fn existing_pixels_survive_standalone_render() {
    let blue = Rgba8Premul::from_straight_rgba(0, 0, 255, 255);
    let mut s = RasterSurface::new(C).unwrap();
    s.clear(blue);
    render_shape(&mut s, &shape(ShapeKind::Triangle, 0.0), C, C).unwrap();
    assert_eq!(s.pixel(100, 90).unwrap(), blue);
    assert_eq!(s.pixel(5, 5).unwrap(), blue);
}

#[test]
fn export_scale_moves_and_thickens_stroke() {
    let big = Canvas {
        width: 400,
        height: 400,
    };
    let mut s = RasterSurface::new(big).unwrap();
    s.clear(Rgba8Premul::transparent());
    render_shape(&mut s, &shape(ShapeKind::Rectangle, 0.0), C, big).unwrap();

    // Left edge at x = 100 with an 8px stroke (96..104).
    assert!(is_red(s.pixel(97, 160).unwrap()));
    assert!(is_red(s.pixel(102, 160).unwrap()));
    assert_eq!(s.pixel(106, 160).unwrap(), Rgba8Premul::transparent());
}
