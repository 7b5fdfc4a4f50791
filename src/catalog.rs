//! Named presets and the logo catalog.
//!
//! Both are plain keyed maps of fixed-shape records: callers look an entry up and copy it
//! into the document. The document assigns ids; catalog records never carry any.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::assets::source::AssetRef;
use crate::filter::set::FilterSet;
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PlaymatError, PlaymatResult};
use crate::model::overlay::OverlayImage;
use crate::model::shape::{ShapeDraft, ShapeKind};

/// Zero or one overlay plus zero or more shapes without ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub overlay: Option<OverlayImage>,
    pub shapes: Vec<ShapeDraft>,
}

/// Logo catalog record. The aspect ratio is derived by decoding `src`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogoEntry {
    pub src: AssetRef,
    #[serde(default)]
    pub default_filters: FilterSet,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub presets: BTreeMap<String, Preset>,
    pub logos: BTreeMap<String, LogoEntry>,
}

impl Catalog {
    pub fn from_json_str(s: &str) -> PlaymatResult<Self> {
        let cat: Self = serde_json::from_str(s).map_err(|e| PlaymatError::serde(e.to_string()))?;
        cat.validate()?;
        Ok(cat)
    }

    pub fn from_json_file(path: &Path) -> PlaymatResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read catalog '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> PlaymatResult<()> {
        for (name, preset) in &self.presets {
            if name.trim().is_empty() {
                return Err(PlaymatError::validation("preset name must not be empty"));
            }
            for (i, s) in preset.shapes.iter().enumerate() {
                if !(s.width > 0.0 && s.height > 0.0 && s.stroke_width > 0.0) {
                    return Err(PlaymatError::validation(format!(
                        "preset '{name}' shape {i}: width, height and stroke_width must be > 0"
                    )));
                }
            }
            if let Some(o) = &preset.overlay
                && !(o.width > 0.0 && o.height > 0.0)
            {
                return Err(PlaymatError::validation(format!(
                    "preset '{name}' overlay must have a positive size"
                )));
            }
        }
        Ok(())
    }

    pub fn preset(&self, name: &str) -> PlaymatResult<&Preset> {
        self.presets
            .get(name)
            .ok_or_else(|| PlaymatError::validation(format!("unknown preset '{name}'")))
    }

    pub fn logo(&self, name: &str) -> PlaymatResult<&LogoEntry> {
        self.logos
            .get(name)
            .ok_or_else(|| PlaymatError::validation(format!("unknown logo '{name}'")))
    }

    /// Presets available without a catalog file.
    ///
    /// They only reference shapes, so no asset files are needed; the overlay-carrying preset
    /// points at `overlays/frame.png` relative to the asset root.
    pub fn builtin(design: Canvas) -> Self {
        let mut presets = BTreeMap::new();
        presets.insert("blank".to_owned(), Preset::default());

        let (w, h) = (design.width_f64(), design.height_f64());
        let zone = |kind: ShapeKind, x: f64, y: f64, zw: f64, zh: f64| {
            ShapeDraft::new(kind, Color::WHITE).at(x, y).sized(zw, zh)
        };

        // Card zones along the lower edge of the mat.
        let card_w = (w * 0.09).round();
        let card_h = (h * 0.26).round();
        let gap = (w * 0.02).round();
        let top = h - card_h - gap;
        let card_zones = (0..5)
            .map(|i| {
                let x = gap + f64::from(i) * (card_w + gap);
                zone(ShapeKind::Rectangle, x, top, card_w, card_h).rotated(0.0)
            })
            .chain(std::iter::once(
                zone(ShapeKind::WideRectangle, w - 2.0 * card_h - gap, top, 2.0 * card_h, card_w)
                    .rotated(0.0),
            ))
            .collect();
        presets.insert(
            "card_zones".to_owned(),
            Preset {
                overlay: None,
                shapes: card_zones,
            },
        );

        presets.insert(
            "framed".to_owned(),
            Preset {
                overlay: Some(
                    OverlayImage::inset(AssetRef::new("overlays/frame.png"), design, 10.0)
                        .with_opacity(0.8),
                ),
                shapes: vec![zone(ShapeKind::Circle, w / 2.0 - 40.0, h / 2.0 - 40.0, 80.0, 80.0)],
            },
        );

        Self {
            presets,
            logos: BTreeMap::new(),
        }
    }

    /// Merge `other` over `self`; entries in `other` win.
    pub fn merged(mut self, other: Catalog) -> Self {
        self.presets.extend(other.presets);
        self.logos.extend(other.logos);
        self
    }
}

#[cfg(test)]
#[path = "../tests/unit/catalog/catalog.rs"]
mod tests;
