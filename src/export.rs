use serde::{Deserialize, Serialize};

use crate::assets::store::AssetStore;
use crate::foundation::config::EditorConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PlaymatError, PlaymatResult};
use crate::model::document::Document;
use crate::render::compositor::{RenderReport, RenderSettings, render};
use crate::render::surface::RasterSurface;

/// Export resolution choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportProfile {
    /// Download-quality size from the editor config.
    Preview,
    /// Print-quality size from the editor config.
    Print,
    Custom(Canvas),
}

impl ExportProfile {
    pub fn canvas(self, cfg: &EditorConfig) -> Canvas {
        match self {
            Self::Preview => cfg.preview_export,
            Self::Print => cfg.print_export,
            Self::Custom(c) => c,
        }
    }
}

/// A flattened PNG ready to be written or downloaded.
#[derive(Clone, Debug)]
pub struct ExportedImage {
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
    pub report: RenderReport,
}

/// Composite `doc` at the profile's resolution and encode it as PNG.
///
/// Fails with [`PlaymatError::MissingBackground`] when the document has no background.
#[tracing::instrument(skip(doc, assets, cfg))]
pub fn export_png(
    doc: &Document,
    assets: &AssetStore,
    profile: ExportProfile,
    cfg: &EditorConfig,
) -> PlaymatResult<ExportedImage> {
    if doc.background().is_none() {
        return Err(PlaymatError::MissingBackground);
    }
    let canvas = profile.canvas(cfg);
    let mut target = RasterSurface::new(canvas)?;
    let report = render(&mut target, doc, assets, canvas, &RenderSettings::from(cfg))?;
    let png = target.to_frame().encode_png()?;
    tracing::info!(bytes = png.len(), filename = %cfg.export_filename, "export encoded");
    Ok(ExportedImage {
        filename: cfg.export_filename.clone(),
        width: canvas.width,
        height: canvas.height,
        png,
        report,
    })
}
