use serde::{Deserialize, Serialize};

use crate::filter::ops::FilterOp;

/// Per-layer color adjustments.
///
/// `hue` is in degrees; every other channel is a percentage where the identity is `100` for
/// `brightness`, `contrast` and `saturate` and `0` for `invert` and `sepia`. Missing fields
/// deserialize to their identity value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSet {
    pub hue: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub saturate: f64,
    pub invert: f64,
    pub sepia: f64,
}

impl Default for FilterSet {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl FilterSet {
    pub const IDENTITY: Self = Self {
        hue: 0.0,
        brightness: 100.0,
        contrast: 100.0,
        saturate: 100.0,
        invert: 0.0,
        sepia: 0.0,
    };

    /// All six adjustments in their fixed evaluation order, identity steps included.
    pub fn ops(&self) -> [FilterOp; 6] {
        [
            FilterOp::Sepia(self.sepia / 100.0),
            FilterOp::HueRotate(self.hue),
            FilterOp::Brightness(self.brightness / 100.0),
            FilterOp::Contrast(self.contrast / 100.0),
            FilterOp::Saturate(self.saturate / 100.0),
            FilterOp::Invert(self.invert / 100.0),
        ]
    }

    /// The ordered filter chain with identity steps dropped.
    ///
    /// Order is sepia, hue-rotate, brightness, contrast, saturate, invert.
    pub fn to_chain(&self) -> Vec<FilterOp> {
        self.ops()
            .into_iter()
            .filter(|op| !op.is_identity())
            .map(FilterOp::normalized)
            .collect()
    }

    pub fn is_identity(&self) -> bool {
        self.ops().iter().all(|op| op.is_identity())
    }

    /// CSS `filter` property value for backends with a native filter chain.
    pub fn to_css(&self) -> String {
        let chain = self.to_chain();
        if chain.is_empty() {
            return "none".to_owned();
        }
        chain
            .iter()
            .map(|op| op.to_css())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/set.rs"]
mod tests;
