use crate::foundation::core::Canvas;
use crate::foundation::error::PlaymatResult;
use crate::geometry::mapper::to_export_space;
use crate::geometry::outline::{pivot_transform, shape_outline};
use crate::model::shape::AnnotationShape;
use crate::render::composite::over_in_place;
use crate::render::paint::{affine_to_cpu, bezpath_to_cpu, color_to_cpu};
use crate::render::surface::RasterSurface;

/// SVG defaults (miter joins, butt caps) so the raster matches the vector preview.
pub(crate) fn stroke_style(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_join(vello_cpu::kurbo::Join::Miter)
        .with_caps(vello_cpu::kurbo::Cap::Butt)
}

/// Queue the outline of `shape` on `ctx`, mapped from `design` onto `export`.
pub(crate) fn draw_shape(
    ctx: &mut vello_cpu::RenderContext,
    shape: &AnnotationShape,
    design: Canvas,
    export: Canvas,
) {
    let mapped = to_export_space(shape.attrs(), design, export);
    let outline = shape_outline(shape.kind, mapped.width, mapped.height);

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(pivot_transform(&mapped, shape.rotation)));
    ctx.set_paint(color_to_cpu(shape.color));
    ctx.set_stroke(stroke_style(
        mapped.stroke_width.unwrap_or(shape.stroke_width),
    ));
    ctx.stroke_path(&bezpath_to_cpu(&outline));
    tracing::debug!(id = %shape.id, kind = %shape.kind, "shape drawn");
}

/// Stroke a single shape over whatever `target` already holds.
pub fn render_shape(
    target: &mut RasterSurface,
    shape: &AnnotationShape,
    design: Canvas,
    export: Canvas,
) -> PlaymatResult<()> {
    let (w, h) = (target.width_u16(), target.height_u16());
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw_shape(&mut ctx, shape, design, export);
    ctx.flush();

    let mut layer = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut layer);
    over_in_place(target.data_mut(), layer.data_as_u8_slice(), 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/shape.rs"]
mod tests;
