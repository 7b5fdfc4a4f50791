//! Playmat is the composition core of a playmat designer.
//!
//! A [`Document`] holds a background image, at most one decorative overlay, any number of
//! logos and stroke-only annotation shapes, all in *design units* on a fixed logical canvas.
//! The same document is drawn two ways:
//!
//! - as SVG markup at design resolution ([`render_preview_svg`]), for interactive previews;
//! - as pixels at an arbitrary export resolution ([`render`], [`export_png`]), for download
//!   and print.
//!
//! # Pipeline overview
//!
//! 1. **Edit**: every mutation goes through [`Document`] methods, which clamp numeric input and
//!    keep the selection and logo aspect invariants.
//! 2. **Prepare**: [`AssetStore::prepare`] front-loads IO and decoding; failures are recorded
//!    per asset, never raised.
//! 3. **Map**: [`to_export_space`] scales design-unit geometry per axis onto the export size.
//! 4. **Composite**: background, behind logos, overlay, front logos, shapes; each image layer
//!    gets its own [`FilterSet`] and opacity.
//!
//! Pixels are premultiplied RGBA8 until they are encoded.
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod export;
mod filter;
mod foundation;
mod geometry;
mod model;
mod render;

pub use assets::decode::{
    PreparedAsset, PreparedImage, PreparedSvg, decode_asset, decode_image, parse_svg,
};
pub use assets::source::{AssetRef, decode_data_uri, normalize_rel_path, read_source};
pub use assets::store::{AssetState, AssetStore};
pub use catalog::{Catalog, LogoEntry, Preset};
pub use export::{ExportProfile, ExportedImage, export_png};
pub use filter::apply::{apply_chain_in_place, apply_filters, filter_pixel};
pub use filter::ops::{ColorMatrix, FilterOp};
pub use filter::set::FilterSet;
pub use foundation::color::Color;
pub use foundation::config::{ENV_MAX_ASSET_BYTES, EditorConfig, ShapeBounds};
pub use foundation::core::{Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use foundation::error::{PlaymatError, PlaymatResult};
pub use foundation::math::{Bounds, clamp_edit};
pub use geometry::mapper::{LayerAttrs, ScaleFactors, to_export_space};
pub use geometry::outline::{
    PATH_TOLERANCE, hexagon_vertices, image_transform, pivot_transform, shape_outline,
};
pub use model::document::{DEFAULT_LOGO_HEIGHT, Document, Selection};
pub use model::logo::{Logo, LogoId, LogoLayer, LogoPatch};
pub use model::overlay::OverlayImage;
pub use model::shape::{AnnotationShape, ShapeDraft, ShapeId, ShapeKind, ShapePatch};
pub use render::composite::{over, over_in_place};
pub use render::compositor::{
    BackgroundOutcome, OverlayOutcome, RenderReport, RenderSettings, render,
};
pub use render::frame::Frame;
pub use render::preview::{PreviewOptions, PreviewSvg, render_preview_svg};
pub use render::session::{RenderOutput, RenderSession, RenderTicket};
pub use render::shape::render_shape;
pub use render::surface::RasterSurface;
