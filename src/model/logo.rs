use serde::{Deserialize, Serialize};

use crate::assets::source::AssetRef;
use crate::filter::set::FilterSet;
use crate::geometry::mapper::LayerAttrs;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogoId(pub u64);

impl std::fmt::Display for LogoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "logo-{}", self.0)
    }
}

/// Z bucket of a logo relative to the overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoLayer {
    Behind,
    #[default]
    Front,
}

/// Raster or SVG logo placed on the design surface.
///
/// `width` is always derived from `height * aspect_ratio`; use [`Logo::set_height`] rather than
/// writing the fields directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Logo {
    pub id: LogoId,
    pub src: AssetRef,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub aspect_ratio: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub layer: LogoLayer,
    #[serde(default)]
    pub filters: FilterSet,
}

fn default_opacity() -> f64 {
    1.0
}

/// Aspect ratios that cannot be used fall back to a square.
pub fn sanitize_aspect(aspect_ratio: f64) -> f64 {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    }
}

impl Logo {
    pub fn new(id: LogoId, src: AssetRef, aspect_ratio: f64, height: f64) -> Self {
        let mut logo = Self {
            id,
            src,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            aspect_ratio: sanitize_aspect(aspect_ratio),
            opacity: default_opacity(),
            rotation: 0.0,
            layer: LogoLayer::Front,
            filters: FilterSet::IDENTITY,
        };
        logo.set_height(height);
        logo
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
        self.width = height * self.aspect_ratio;
    }

    /// Replace the aspect ratio (e.g. once the payload is decoded), keeping the height.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) {
        self.aspect_ratio = sanitize_aspect(aspect_ratio);
        self.set_height(self.height);
    }

    pub fn attrs(&self) -> LayerAttrs {
        LayerAttrs::new(self.x, self.y, self.width, self.height)
    }
}

/// Partial update of a logo. There is no width: it always follows the height.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogoPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub height: Option<f64>,
    pub opacity: Option<f64>,
    pub rotation: Option<f64>,
    pub layer: Option<LogoLayer>,
    pub filters: Option<FilterSet>,
}

#[cfg(test)]
#[path = "../../tests/unit/model/logo.rs"]
mod tests;
