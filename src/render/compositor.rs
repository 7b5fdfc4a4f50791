//! Layered raster compositor.
//!
//! Z-order is fixed: background, behind logos, overlay, front logos, shapes. Every layer is
//! queued on a single vello_cpu context so blending happens inside one render; per-layer
//! filters are applied to that layer's pixels before they are turned into a paint, and opacity
//! is an isolated layer, so neither can affect anything else.

use std::borrow::Cow;

use crate::assets::decode::PreparedImage;
use crate::assets::source::AssetRef;
use crate::assets::store::AssetStore;
use crate::filter::apply::apply_filters;
use crate::filter::set::FilterSet;
use crate::foundation::color::Color;
use crate::foundation::config::EditorConfig;
use crate::foundation::core::{Affine, Canvas};
use crate::foundation::error::{PlaymatError, PlaymatResult};
use crate::geometry::mapper::{LayerAttrs, to_export_space};
use crate::geometry::outline::image_transform;
use crate::model::document::Document;
use crate::model::logo::{Logo, LogoLayer};
use crate::render::paint::{affine_to_cpu, color_to_cpu, image_paint, premul_bytes_to_pixmap};
use crate::render::shape::draw_shape;
use crate::render::surface::RasterSurface;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderSettings {
    /// Fill used when the background image cannot be decoded.
    pub fallback_background: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fallback_background: Color::FALLBACK_GRAY,
        }
    }
}

impl From<&EditorConfig> for RenderSettings {
    fn from(cfg: &EditorConfig) -> Self {
        Self {
            fallback_background: cfg.fallback_background,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundOutcome {
    Image,
    /// The background failed to decode and was replaced with a flat fill.
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayOutcome {
    Absent,
    Drawn,
    /// The overlay failed to decode and was left out.
    Skipped,
}

/// What a render pass actually drew.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderReport {
    pub background: BackgroundOutcome,
    pub overlay: OverlayOutcome,
    pub logos_drawn: usize,
    pub logos_skipped: usize,
    pub shapes_drawn: usize,
}

/// Composite `doc` onto `target` at the `export` resolution.
///
/// Fails with [`PlaymatError::MissingBackground`] before touching `target` when the document
/// has no background. Undecodable assets degrade per layer and are reported, not returned.
/// The pass reads only `doc` and `assets`, so repeating it yields identical pixels.
#[tracing::instrument(skip_all, fields(width = export.width, height = export.height))]
pub fn render(
    target: &mut RasterSurface,
    doc: &Document,
    assets: &AssetStore,
    export: Canvas,
    settings: &RenderSettings,
) -> PlaymatResult<RenderReport> {
    let background = doc.background().ok_or(PlaymatError::MissingBackground)?;
    target.resize(export)?;

    let design = doc.design();
    let mut ctx = vello_cpu::RenderContext::new(target.width_u16(), target.height_u16());
    ctx.set_blend_mode(vello_cpu::peniko::BlendMode::default());

    let full = LayerAttrs::new(0.0, 0.0, export.width_f64(), export.height_f64());
    let drawn = layer_pixels(assets, background, &full)
        .and_then(|img| draw_image(&mut ctx, &img, &full, 0.0, 1.0, &FilterSet::IDENTITY));
    let background = match drawn {
        Ok(()) => BackgroundOutcome::Image,
        Err(e) => {
            tracing::warn!(asset = %background, error = %e, "background unusable, using fallback fill");
            fill_canvas(&mut ctx, export, settings.fallback_background);
            BackgroundOutcome::Fallback
        }
    };

    let mut report = RenderReport {
        background,
        overlay: OverlayOutcome::Absent,
        logos_drawn: 0,
        logos_skipped: 0,
        shapes_drawn: 0,
    };

    for logo in doc.logos_in(LogoLayer::Behind) {
        draw_logo(&mut ctx, logo, assets, design, export, &mut report);
    }

    if let Some(overlay) = doc.overlay() {
        let mapped = to_export_space(overlay.attrs(), design, export);
        let drawn = layer_pixels(assets, &overlay.src, &mapped).and_then(|img| {
            draw_image(&mut ctx, &img, &mapped, 0.0, overlay.opacity, &overlay.filters)
        });
        report.overlay = match drawn {
            Ok(()) => OverlayOutcome::Drawn,
            Err(e) => {
                tracing::warn!(asset = %overlay.src, error = %e, "overlay skipped");
                OverlayOutcome::Skipped
            }
        };
    }

    for logo in doc.logos_in(LogoLayer::Front) {
        draw_logo(&mut ctx, logo, assets, design, export, &mut report);
    }

    for shape in doc.shapes() {
        draw_shape(&mut ctx, shape, design, export);
        report.shapes_drawn += 1;
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut target.pixmap);
    tracing::debug!(?report, "composite finished");
    Ok(report)
}

fn fill_canvas(ctx: &mut vello_cpu::RenderContext, canvas: Canvas, color: Color) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(Affine::IDENTITY));
    ctx.set_paint(color_to_cpu(color));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        canvas.width_f64(),
        canvas.height_f64(),
    ));
}

fn draw_logo(
    ctx: &mut vello_cpu::RenderContext,
    logo: &Logo,
    assets: &AssetStore,
    design: Canvas,
    export: Canvas,
    report: &mut RenderReport,
) {
    let mapped = to_export_space(logo.attrs(), design, export);
    let drawn = layer_pixels(assets, &logo.src, &mapped).and_then(|img| {
        draw_image(ctx, &img, &mapped, logo.rotation, logo.opacity, &logo.filters)
    });
    match drawn {
        Ok(()) => report.logos_drawn += 1,
        Err(e) => {
            tracing::warn!(id = %logo.id, asset = %logo.src, error = %e, "logo skipped");
            report.logos_skipped += 1;
        }
    }
}

/// Pixels of a prepared asset sized for `attrs`; failed or unprepared assets are errors.
fn layer_pixels(
    assets: &AssetStore,
    src: &AssetRef,
    attrs: &LayerAttrs,
) -> PlaymatResult<PreparedImage> {
    assets.require(src)?.pixels_for(attrs.width, attrs.height)
}

/// Stretch `img` into `attrs` (export space), rotated around the box center.
///
/// Every fallible step runs before anything is queued on `ctx`, so an error leaves the pass
/// untouched.
fn draw_image(
    ctx: &mut vello_cpu::RenderContext,
    img: &PreparedImage,
    attrs: &LayerAttrs,
    rotation: f64,
    opacity: f64,
    filters: &FilterSet,
) -> PlaymatResult<()> {
    let opacity = opacity.clamp(0.0, 1.0) as f32;
    if opacity <= 0.0 || attrs.width <= 0.0 || attrs.height <= 0.0 {
        return Ok(());
    }

    let pixels: Cow<'_, [u8]> = apply_filters(img.rgba8_premul.as_slice(), filters)?;
    let pixmap = premul_bytes_to_pixmap(&pixels, img.width, img.height)?;
    let (iw, ih) = (f64::from(img.width), f64::from(img.height));

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(image_transform(attrs, rotation, iw, ih)));
    ctx.set_paint(image_paint(pixmap));
    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
    Ok(())
}
