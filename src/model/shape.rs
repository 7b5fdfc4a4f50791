use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::config::ShapeBounds;
use crate::foundation::math::clamp_edit;
use crate::geometry::mapper::LayerAttrs;

/// Closed set of annotation primitives.
///
/// `WideRectangle` draws exactly like `Rectangle`; only its default size differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[serde(alias = "rect")]
    Rectangle,
    #[serde(alias = "wideRectangle")]
    WideRectangle,
    Circle,
    Hexagon,
    Triangle,
}

impl ShapeKind {
    pub const ALL: [Self; 5] = [
        Self::Rectangle,
        Self::WideRectangle,
        Self::Circle,
        Self::Hexagon,
        Self::Triangle,
    ];

    /// Size given to a freshly added shape of this kind.
    pub fn default_size(self) -> (f64, f64) {
        match self {
            Self::Rectangle => (50.0, 75.0),
            Self::WideRectangle => (75.0, 50.0),
            Self::Circle | Self::Hexagon | Self::Triangle => (80.0, 80.0),
        }
    }

    pub fn default_rotation(self) -> f64 {
        match self {
            Self::Rectangle => 180.0,
            _ => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::WideRectangle => "wide_rectangle",
            Self::Circle => "circle",
            Self::Hexagon => "hexagon",
            Self::Triangle => "triangle",
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(pub u64);

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "shape-{}", self.0)
    }
}

/// Stroke-only vector primitive, stored in design units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationShape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
    /// Clockwise degrees around the shape center.
    pub rotation: f64,
    pub stroke_width: f64,
}

impl AnnotationShape {
    pub fn from_draft(id: ShapeId, draft: &ShapeDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            x: draft.x,
            y: draft.y,
            width: draft.width,
            height: draft.height,
            color: draft.color,
            rotation: draft.rotation,
            stroke_width: draft.stroke_width,
        }
    }

    pub fn attrs(&self) -> LayerAttrs {
        LayerAttrs::new(self.x, self.y, self.width, self.height).with_stroke(self.stroke_width)
    }
}

/// Shape descriptor without an identity, as supplied by presets and add requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeDraft {
    pub kind: ShapeKind,
    #[serde(default = "default_pos")]
    pub x: f64,
    #[serde(default = "default_pos")]
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_stroke")]
    pub stroke_width: f64,
}

fn default_pos() -> f64 {
    100.0
}

fn default_stroke() -> f64 {
    3.0
}

impl ShapeDraft {
    /// Defaults used by the editor's "add shape" buttons.
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        let (width, height) = kind.default_size();
        Self {
            kind,
            x: default_pos(),
            y: default_pos(),
            width,
            height,
            color,
            rotation: kind.default_rotation(),
            stroke_width: default_stroke(),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn rotated(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Partial update of a shape. Values are clamped into [`ShapeBounds`] when applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub color: Option<Color>,
    pub rotation: Option<f64>,
    pub stroke_width: Option<f64>,
}

impl ShapePatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply onto `shape`. Positions are clamped to `[0, max_x] x [0, max_y]`; NaN for a field
    /// leaves the current value untouched.
    pub(crate) fn apply_to(
        &self,
        shape: &mut AnnotationShape,
        bounds: &ShapeBounds,
        (max_x, max_y): (f64, f64),
    ) {
        fn pick(v: Option<f64>, current: f64, clamp: impl Fn(f64) -> f64) -> f64 {
            match v {
                Some(v) if !v.is_nan() => clamp(v),
                _ => current,
            }
        }

        shape.x = pick(self.x, shape.x, |v| clamp_edit(v, 0.0, max_x));
        shape.y = pick(self.y, shape.y, |v| clamp_edit(v, 0.0, max_y));
        shape.width = pick(self.width, shape.width, |v| bounds.width.clamp(v));
        shape.height = pick(self.height, shape.height, |v| bounds.height.clamp(v));
        shape.rotation = pick(self.rotation, shape.rotation, |v| bounds.rotation.clamp(v));
        shape.stroke_width = pick(self.stroke_width, shape.stroke_width, |v| {
            bounds.stroke_width.clamp(v)
        });
        if let Some(c) = self.color {
            shape.color = c;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/shape.rs"]
mod tests;
