use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PlaymatError, PlaymatResult};
use crate::foundation::math::Bounds;

/// Environment variable overriding [`EditorConfig::advisory_asset_bytes`].
pub const ENV_MAX_ASSET_BYTES: &str = "PLAYMAT_MAX_ASSET_BYTES";

/// Edit bounds applied by shape mutation entry points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeBounds {
    pub width: Bounds,
    pub height: Bounds,
    pub rotation: Bounds,
    pub stroke_width: Bounds,
}

impl Default for ShapeBounds {
    fn default() -> Self {
        Self {
            width: Bounds::new(20.0, 650.0),
            height: Bounds::new(20.0, 400.0),
            rotation: Bounds::new(0.0, 360.0),
            stroke_width: Bounds::new(1.0, 25.0),
        }
    }
}

/// Editor-wide settings shared by the document model, the renderers and the CLI.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Logical size of the interactive surface; every layer is stored in these units.
    pub design: Canvas,
    /// Download-quality export size.
    pub preview_export: Canvas,
    /// Print-quality export size (23.6" x 13.8" at 300 DPI).
    pub print_export: Canvas,
    pub shape_bounds: ShapeBounds,
    pub logo_height: Bounds,
    /// Distance kept between a dragged entity's top-left corner and the far canvas edges.
    pub drag_margin: f64,
    /// Offset applied to both axes when a logo is duplicated.
    pub duplicate_offset: f64,
    pub fallback_background: Color,
    pub default_shape_color: Color,
    /// Size above which asset payloads are reported; never enforced.
    pub advisory_asset_bytes: u64,
    pub export_filename: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            design: Canvas {
                width: 800,
                height: 467,
            },
            preview_export: Canvas {
                width: 2400,
                height: 1400,
            },
            print_export: Canvas {
                width: 7080,
                height: 4140,
            },
            shape_bounds: ShapeBounds::default(),
            logo_height: Bounds::new(10.0, 467.0),
            drag_margin: 50.0,
            duplicate_offset: 20.0,
            fallback_background: Color::FALLBACK_GRAY,
            default_shape_color: Color::RED,
            advisory_asset_bytes: 10 * 1024 * 1024,
            export_filename: "playmat-personalizado.png".to_owned(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> PlaymatResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| PlaymatError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> PlaymatResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read editor config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(n) = std::env::var(ENV_MAX_ASSET_BYTES)
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&n| n > 0)
        {
            self.advisory_asset_bytes = n;
        }
        self
    }

    pub fn validate(&self) -> PlaymatResult<()> {
        for (name, c) in [
            ("design", self.design),
            ("preview_export", self.preview_export),
            ("print_export", self.print_export),
        ] {
            if c.width == 0 || c.height == 0 {
                return Err(PlaymatError::validation(format!(
                    "{name} canvas must be non-empty"
                )));
            }
        }
        if !self.drag_margin.is_finite() || self.drag_margin < 0.0 {
            return Err(PlaymatError::validation("drag_margin must be >= 0"));
        }
        if !self.duplicate_offset.is_finite() {
            return Err(PlaymatError::validation("duplicate_offset must be finite"));
        }
        if self.export_filename.trim().is_empty() {
            return Err(PlaymatError::validation("export_filename must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
