//! Shape geometry shared by the raster renderer and the vector preview.
//!
//! Every outline is built in a local frame centered on the shape's own center; placement and
//! rotation are applied afterwards by [`pivot_transform`]. Both renderers go through these
//! functions so their silhouettes cannot diverge.

use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::geometry::mapper::LayerAttrs;
use crate::model::shape::ShapeKind;

/// Flattening tolerance used when curves must be expressed as paths.
pub const PATH_TOLERANCE: f64 = 0.05;

/// Local-frame outline for a shape of the given size.
pub fn shape_outline(kind: ShapeKind, width: f64, height: f64) -> BezPath {
    let (hw, hh) = (width / 2.0, height / 2.0);
    match kind {
        ShapeKind::Rectangle | ShapeKind::WideRectangle => {
            Rect::new(-hw, -hh, hw, hh).to_path(PATH_TOLERANCE)
        }
        ShapeKind::Circle => {
            kurbo::Circle::new(Point::ORIGIN, hw.min(hh)).to_path(PATH_TOLERANCE)
        }
        ShapeKind::Hexagon => polygon(&hexagon_vertices(width, height)),
        ShapeKind::Triangle => polygon(&[
            Point::new(0.0, -hh),
            Point::new(-hw, hh),
            Point::new(hw, hh),
        ]),
    }
}

/// Ellipse-inscribed hexagon: vertex `i` sits at angle `i * 60deg` with independent x/y radii,
/// which gives flat top and bottom edges.
pub fn hexagon_vertices(width: f64, height: f64) -> [Point; 6] {
    let (rx, ry) = (width / 2.0, height / 2.0);
    std::array::from_fn(|i| {
        let angle = (i as f64) * std::f64::consts::FRAC_PI_3;
        Point::new(rx * angle.cos(), ry * angle.sin())
    })
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(&first) = it.next() {
        path.move_to(first);
        for &p in it {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

/// Maps the local frame of a layer onto its surface: move to the layer center, then rotate
/// clockwise by `rotation_deg` (y grows downwards).
pub fn pivot_transform(attrs: &LayerAttrs, rotation_deg: f64) -> Affine {
    let (cx, cy) = attrs.center();
    Affine::translate(Vec2::new(cx, cy)) * Affine::rotate(rotation_deg.to_radians())
}

/// Maps image pixel space (`0..image_w`, `0..image_h`) onto the layer box, stretched to fill it
/// and rotated around the box center.
pub fn image_transform(attrs: &LayerAttrs, rotation_deg: f64, image_w: f64, image_h: f64) -> Affine {
    let sx = attrs.width / image_w.max(1e-9);
    let sy = attrs.height / image_h.max(1e-9);
    pivot_transform(attrs, rotation_deg)
        * Affine::translate(Vec2::new(-attrs.width / 2.0, -attrs.height / 2.0))
        * Affine::scale_non_uniform(sx, sy)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/outline.rs"]
mod tests;
