use serde::{Deserialize, Serialize};

use crate::foundation::core::{Affine, Canvas};

/// Per-axis scale from the design surface to an export surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub fn between(design: Canvas, export: Canvas) -> Self {
        Self {
            x: export.width_f64() / design.width_f64(),
            y: export.height_f64() / design.height_f64(),
        }
    }

    /// Stroke widths follow the smaller axis so anisotropic exports never thicken lines.
    pub fn stroke(self) -> f64 {
        self.x.min(self.y)
    }

    pub fn affine(self) -> Affine {
        Affine::scale_non_uniform(self.x, self.y)
    }

    pub fn is_uniform(self) -> bool {
        (self.x - self.y).abs() <= f64::EPSILON * self.x.abs().max(self.y.abs())
    }
}

/// Geometric attributes of one layer, in whatever space the caller is working in.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayerAttrs {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl LayerAttrs {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            stroke_width: None,
        }
    }

    pub fn with_stroke(mut self, stroke_width: f64) -> Self {
        self.stroke_width = Some(stroke_width);
        self
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Map design-unit attributes onto an export surface.
///
/// Always call this with the canonical design-unit values; feeding a previous result back in
/// would compound rounding.
pub fn to_export_space(attrs: LayerAttrs, design: Canvas, export: Canvas) -> LayerAttrs {
    let s = ScaleFactors::between(design, export);
    LayerAttrs {
        x: attrs.x * s.x,
        y: attrs.y * s.y,
        width: attrs.width * s.x,
        height: attrs.height * s.y,
        stroke_width: attrs.stroke_width.map(|w| w * s.stroke()),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/mapper.rs"]
mod tests;
