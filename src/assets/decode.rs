use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{PlaymatError, PlaymatResult};

/// Largest edge of any raster handed to the renderer. SVG rasters above it are refused;
/// decoded images above it are resampled down.
pub const MAX_RASTER_DIM: u32 = 16_384;

#[derive(Clone, Debug)]
/// Raster image decoded to premultiplied RGBA8.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

#[derive(Clone, Debug)]
/// Parsed SVG document, rasterized on demand at the size it is drawn.
pub struct PreparedSvg {
    pub tree: Arc<usvg::Tree>,
}

#[derive(Clone, Debug)]
pub enum PreparedAsset {
    Raster(PreparedImage),
    Svg(PreparedSvg),
}

impl PreparedAsset {
    /// Intrinsic size in pixels (raster) or user units (SVG).
    pub fn natural_size(&self) -> (f64, f64) {
        match self {
            Self::Raster(img) => (f64::from(img.width), f64::from(img.height)),
            Self::Svg(svg) => {
                let s = svg.tree.size();
                (f64::from(s.width()), f64::from(s.height()))
            }
        }
    }

    /// `width / height` of the natural size, or `None` when degenerate.
    pub fn aspect_ratio(&self) -> Option<f64> {
        let (w, h) = self.natural_size();
        let r = w / h;
        (r.is_finite() && r > 0.0).then_some(r)
    }

    /// Premultiplied RGBA8 pixels suitable for drawing into a `width x height` box.
    ///
    /// Raster assets are returned as decoded and left to the renderer's sampler; SVGs are
    /// rasterized at the target size so they stay sharp at print resolution.
    pub fn pixels_for(&self, width: f64, height: f64) -> PlaymatResult<PreparedImage> {
        match self {
            Self::Raster(img) => Ok(img.clone()),
            Self::Svg(svg) => {
                let (w, h) = raster_dims(width, height)?;
                let rgba8_premul = rasterize_svg_to_premul_rgba8(&svg.tree, w, h)?;
                Ok(PreparedImage {
                    width: w,
                    height: h,
                    rgba8_premul: Arc::new(rgba8_premul),
                })
            }
        }
    }
}

fn raster_dims(width: f64, height: f64) -> PlaymatResult<(u32, u32)> {
    fn to_px(v: f64) -> PlaymatResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(PlaymatError::render("svg target box has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }
    let (w, h) = (to_px(width)?, to_px(height)?);
    if w > MAX_RASTER_DIM || h > MAX_RASTER_DIM {
        return Err(PlaymatError::render(format!(
            "svg raster size too large: {w}x{h} (max {MAX_RASTER_DIM}x{MAX_RASTER_DIM})"
        )));
    }
    Ok((w, h))
}

pub fn decode_image(bytes: &[u8]) -> PlaymatResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let mut rgba = dyn_img.to_rgba8();
    let (natural_w, natural_h) = rgba.dimensions();
    if natural_w == 0 || natural_h == 0 {
        return Err(PlaymatError::decode("image has no pixels"));
    }
    if let Some((w, h)) = fit_within(natural_w, natural_h, MAX_RASTER_DIM) {
        tracing::debug!(natural_w, natural_h, w, h, "resampling oversized image");
        rgba = image::imageops::resize(&rgba, w, h, image::imageops::FilterType::Triangle);
    }
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Size scaled down so neither edge exceeds `max`, or `None` when it already fits.
fn fit_within(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    let longest = width.max(height);
    if longest <= max {
        return None;
    }
    let scale = f64::from(max) / f64::from(longest);
    let shrink = |v: u32| ((f64::from(v) * scale).round() as u32).clamp(1, max);
    Some((shrink(width), shrink(height)))
}

pub fn parse_svg(bytes: &[u8]) -> PlaymatResult<PreparedSvg> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    Ok(PreparedSvg {
        tree: Arc::new(tree),
    })
}

/// Decode a payload, sniffing SVG by content when the reference does not say so.
pub fn decode_asset(bytes: &[u8], svg_hint: bool) -> PlaymatResult<PreparedAsset> {
    if svg_hint || looks_like_svg(bytes) {
        return parse_svg(bytes).map(PreparedAsset::Svg);
    }
    decode_image(bytes).map(PreparedAsset::Raster)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let text = String::from_utf8_lossy(head);
    let t = text.trim_start_matches('\u{feff}').trim_start();
    t.starts_with("<svg") || (t.starts_with("<?xml") && text.contains("<svg"))
}

pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PlaymatResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PlaymatError::render("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
