use serde::{Deserialize, Serialize};

use crate::assets::source::AssetRef;
use crate::filter::set::FilterSet;
use crate::foundation::core::Canvas;
use crate::geometry::mapper::LayerAttrs;

/// The single decorative image sitting between the behind and front logo buckets.
///
/// Geometry is fixed by the preset that created it; only `opacity` and `filters` are edited.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayImage {
    pub src: AssetRef,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub filters: FilterSet,
}

fn default_opacity() -> f64 {
    1.0
}

impl OverlayImage {
    /// Overlay stretched over the whole design surface.
    pub fn full_canvas(src: AssetRef, design: Canvas) -> Self {
        Self::placed(src, LayerAttrs::new(0.0, 0.0, design.width_f64(), design.height_f64()))
    }

    /// Overlay occupying the design surface minus `margin` on every side.
    pub fn inset(src: AssetRef, design: Canvas, margin: f64) -> Self {
        let w = (design.width_f64() - 2.0 * margin).max(1.0);
        let h = (design.height_f64() - 2.0 * margin).max(1.0);
        Self::placed(src, LayerAttrs::new(margin, margin, w, h))
    }

    pub fn placed(src: AssetRef, attrs: LayerAttrs) -> Self {
        Self {
            src,
            x: attrs.x,
            y: attrs.y,
            width: attrs.width,
            height: attrs.height,
            opacity: default_opacity(),
            filters: FilterSet::IDENTITY,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn attrs(&self) -> LayerAttrs {
        LayerAttrs::new(self.x, self.y, self.width, self.height)
    }
}
