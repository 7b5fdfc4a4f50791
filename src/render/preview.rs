//! Vector preview of a document at design resolution.
//!
//! Emits standalone SVG markup: images become `<image>` elements with CSS `filter` chains and
//! shapes become stroked paths built from the same outlines the raster renderer uses.

use std::borrow::Cow;
use std::fmt;

use crate::assets::source::AssetRef;
use crate::filter::set::FilterSet;
use crate::foundation::color::Color;
use crate::geometry::mapper::LayerAttrs;
use crate::geometry::outline::shape_outline;
use crate::model::document::Document;
use crate::model::logo::LogoLayer;
use crate::model::shape::AnnotationShape;

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewOptions {
    /// Emit `<image>` elements. When off, only the fallback fill and the shapes are written.
    pub include_images: bool,
    /// Fill painted under everything (also visible when the background image is missing).
    pub backdrop: Color,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            include_images: true,
            backdrop: Color::FALLBACK_GRAY,
        }
    }
}

impl PreviewOptions {
    pub fn shapes_only() -> Self {
        Self {
            include_images: false,
            ..Self::default()
        }
    }
}

/// Preview markup of `doc`, written through [`std::fmt::Display`].
pub struct PreviewSvg<'a> {
    doc: &'a Document,
    opts: &'a PreviewOptions,
}

impl<'a> PreviewSvg<'a> {
    pub fn new(doc: &'a Document, opts: &'a PreviewOptions) -> Self {
        Self { doc, opts }
    }
}

impl fmt::Display for PreviewSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (doc, opts) = (self.doc, self.opts);
        let design = doc.design();
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = design.width,
            h = design.height,
        )?;
        writeln!(
            f,
            r#"  <rect width="{}" height="{}" fill="{}"/>"#,
            design.width,
            design.height,
            opts.backdrop.to_hex()
        )?;

        if opts.include_images {
            if let Some(bg) = doc.background() {
                let full = LayerAttrs::new(0.0, 0.0, design.width_f64(), design.height_f64());
                write_image(f, bg, &full, 0.0, 1.0, &FilterSet::IDENTITY)?;
            }
            for logo in doc.logos_in(LogoLayer::Behind) {
                write_image(f, &logo.src, &logo.attrs(), logo.rotation, logo.opacity, &logo.filters)?;
            }
            if let Some(o) = doc.overlay() {
                write_image(f, &o.src, &o.attrs(), 0.0, o.opacity, &o.filters)?;
            }
            for logo in doc.logos_in(LogoLayer::Front) {
                write_image(f, &logo.src, &logo.attrs(), logo.rotation, logo.opacity, &logo.filters)?;
            }
        }

        for shape in doc.shapes() {
            write_shape(f, shape)?;
        }
        f.write_str("</svg>\n")
    }
}

pub fn render_preview_svg(doc: &Document, opts: &PreviewOptions) -> String {
    PreviewSvg::new(doc, opts).to_string()
}

fn pivot_attr(attrs: &LayerAttrs, rotation: f64) -> String {
    let (cx, cy) = attrs.center();
    format!("translate({cx} {cy}) rotate({rotation})")
}

fn write_shape(out: &mut impl fmt::Write, shape: &AnnotationShape) -> fmt::Result {
    let attrs = shape.attrs();
    let d = shape_outline(shape.kind, attrs.width, attrs.height).to_svg();
    let c = shape.color;
    write!(
        out,
        r#"  <path data-id="{}" d="{}" transform="{}" fill="none" stroke="{}" stroke-width="{}""#,
        shape.id,
        d,
        pivot_attr(&attrs, shape.rotation),
        Color::rgb(c.r, c.g, c.b).to_hex(),
        shape.stroke_width,
    )?;
    if c.a < 255 {
        write!(out, r#" stroke-opacity="{}""#, f64::from(c.a) / 255.0)?;
    }
    out.write_str("/>\n")
}

fn write_image(
    out: &mut impl fmt::Write,
    src: &AssetRef,
    attrs: &LayerAttrs,
    rotation: f64,
    opacity: f64,
    filters: &FilterSet,
) -> fmt::Result {
    write!(
        out,
        r#"  <g transform="{}"><image href="{}" x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none""#,
        pivot_attr(attrs, rotation),
        escape_attr(src.as_str()),
        -attrs.width / 2.0,
        -attrs.height / 2.0,
        attrs.width,
        attrs.height,
    )?;
    if opacity < 1.0 {
        write!(out, r#" opacity="{}""#, opacity.clamp(0.0, 1.0))?;
    }
    if !filters.is_identity() {
        write!(out, r#" style="filter: {}""#, filters.to_css())?;
    }
    out.write_str("/></g>\n")
}

fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '"', '<', '>']) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('"', "&quot;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
