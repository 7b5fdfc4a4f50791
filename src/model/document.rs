//! The editable document and every mutation entry point.
//!
//! All mutations go through [`Document`] methods so the model invariants hold after each call:
//! ids are unique, at most one entity is selected and the selection never names a removed
//! entity, and every logo keeps `width == height * aspect_ratio`. Failed calls leave the
//! document unchanged.

use serde::{Deserialize, Serialize};

use crate::assets::source::AssetRef;
use crate::assets::store::AssetStore;
use crate::catalog::{LogoEntry, Preset};
use crate::filter::set::FilterSet;
use crate::foundation::color::Color;
use crate::foundation::config::{EditorConfig, ShapeBounds};
use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::{PlaymatError, PlaymatResult};
use crate::foundation::math::{Bounds, clamp_edit};
use crate::model::logo::{Logo, LogoId, LogoLayer, LogoPatch};
use crate::model::overlay::OverlayImage;
use crate::model::shape::{AnnotationShape, ShapeDraft, ShapeId, ShapeKind, ShapePatch};

/// Height given to a freshly added logo, in design units.
pub const DEFAULT_LOGO_HEIGHT: f64 = 100.0;

/// The single selected entity, if any. Shapes and logos can never be selected together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Shape(ShapeId),
    Logo(LogoId),
}

impl Selection {
    pub fn shape(self) -> Option<ShapeId> {
        match self {
            Self::Shape(id) => Some(id),
            _ => None,
        }
    }

    pub fn logo(self) -> Option<LogoId> {
        match self {
            Self::Logo(id) => Some(id),
            _ => None,
        }
    }
}

/// Edit limits taken from [`EditorConfig`]; not part of the serialized document.
#[derive(Clone, Copy, Debug, PartialEq)]
struct EditLimits {
    shape_bounds: ShapeBounds,
    logo_height: Bounds,
    drag_margin: f64,
    duplicate_offset: f64,
}

impl Default for EditLimits {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

impl From<&EditorConfig> for EditLimits {
    fn from(cfg: &EditorConfig) -> Self {
        Self {
            shape_bounds: cfg.shape_bounds,
            logo_height: cfg.logo_height,
            drag_margin: cfg.drag_margin,
            duplicate_offset: cfg.duplicate_offset,
        }
    }
}

fn default_color() -> Color {
    Color::RED
}

/// Owned editor state: background, overlay, logos, shapes and the current selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Document {
    design: Canvas,
    #[serde(default)]
    background: Option<AssetRef>,
    #[serde(default)]
    overlay: Option<OverlayImage>,
    #[serde(default)]
    logos: Vec<Logo>,
    #[serde(default)]
    shapes: Vec<AnnotationShape>,
    #[serde(default)]
    selection: Selection,
    #[serde(default = "default_color")]
    last_used_color: Color,
    #[serde(skip)]
    next_id: u64,
    #[serde(skip)]
    limits: EditLimits,
}

impl Document {
    /// Empty document on `design`. Fails when either edge is zero.
    pub fn new(design: Canvas) -> PlaymatResult<Self> {
        let design = Canvas::new(design.width, design.height)?;
        Ok(Self {
            design,
            background: None,
            overlay: None,
            logos: Vec::new(),
            shapes: Vec::new(),
            selection: Selection::None,
            last_used_color: default_color(),
            next_id: 1,
            limits: EditLimits::default(),
        })
    }

    pub fn with_config(cfg: &EditorConfig) -> PlaymatResult<Self> {
        let mut doc = Self::new(cfg.design)?;
        doc.apply_config(cfg);
        doc.last_used_color = cfg.default_shape_color;
        Ok(doc)
    }

    /// Adopt the edit limits of `cfg`. The design surface of an existing document is kept.
    pub fn apply_config(&mut self, cfg: &EditorConfig) {
        self.limits = EditLimits::from(cfg);
    }

    pub fn from_json_str(s: &str) -> PlaymatResult<Self> {
        let mut doc: Self =
            serde_json::from_str(s).map_err(|e| PlaymatError::serde(e.to_string()))?;
        doc.normalize()?;
        Ok(doc)
    }

    pub fn to_json_string(&self) -> PlaymatResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PlaymatError::serde(e.to_string()))
    }

    /// Re-establish invariants after deserialization.
    ///
    /// Structural problems (empty design, duplicate ids) are errors; out-of-range numbers are
    /// clamped the same way interactive edits are.
    fn normalize(&mut self) -> PlaymatResult<()> {
        self.design = Canvas::new(self.design.width, self.design.height)?;

        let mut seen_shapes = std::collections::HashSet::new();
        if let Some(dup) = self.shapes.iter().find(|s| !seen_shapes.insert(s.id)) {
            return Err(PlaymatError::validation(format!("duplicate shape id {}", dup.id)));
        }
        let mut seen_logos = std::collections::HashSet::new();
        if let Some(dup) = self.logos.iter().find(|l| !seen_logos.insert(l.id)) {
            return Err(PlaymatError::validation(format!("duplicate logo id {}", dup.id)));
        }

        let limits = self.limits;
        for shape in &mut self.shapes {
            sanitize_shape(shape, &limits.shape_bounds);
        }
        for logo in &mut self.logos {
            let height = if logo.height.is_finite() && logo.height > 0.0 {
                logo.height
            } else {
                DEFAULT_LOGO_HEIGHT
            };
            logo.height = limits.logo_height.clamp(height);
            logo.set_aspect_ratio(logo.aspect_ratio);
            logo.x = finite_non_negative(logo.x);
            logo.y = finite_non_negative(logo.y);
            logo.opacity = clamp_edit(logo.opacity, 0.0, 1.0);
            if !logo.rotation.is_finite() {
                logo.rotation = 0.0;
            }
        }
        if let Some(overlay) = &mut self.overlay {
            overlay.opacity = clamp_edit(overlay.opacity, 0.0, 1.0);
        }
        if !self.selection_is_live(self.selection) {
            self.selection = Selection::None;
        }
        self.next_id = 1;
        Ok(())
    }

    // Accessors

    pub fn design(&self) -> Canvas {
        self.design
    }

    pub fn background(&self) -> Option<&AssetRef> {
        self.background.as_ref()
    }

    pub fn overlay(&self) -> Option<&OverlayImage> {
        self.overlay.as_ref()
    }

    /// Logos in creation order.
    pub fn logos(&self) -> &[Logo] {
        &self.logos
    }

    /// Logos of one bucket in creation order.
    pub fn logos_in(&self, layer: LogoLayer) -> impl Iterator<Item = &Logo> + '_ {
        self.logos.iter().filter(move |l| l.layer == layer)
    }

    /// Shapes in creation order.
    pub fn shapes(&self) -> &[AnnotationShape] {
        &self.shapes
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn last_used_color(&self) -> Color {
        self.last_used_color
    }

    pub fn shape(&self, id: ShapeId) -> Option<&AnnotationShape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    pub fn logo(&self, id: LogoId) -> Option<&Logo> {
        self.logos.iter().find(|l| l.id == id)
    }

    /// Every asset the document references, background first.
    pub fn asset_refs(&self) -> impl Iterator<Item = &AssetRef> + '_ {
        self.background
            .iter()
            .chain(self.overlay.iter().map(|o| &o.src))
            .chain(self.logos.iter().map(|l| &l.src))
    }

    fn alloc_id(&mut self) -> u64 {
        let max_existing = self
            .shapes
            .iter()
            .map(|s| s.id.0)
            .chain(self.logos.iter().map(|l| l.id.0))
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(max_existing + 1);
        self.next_id = id + 1;
        id
    }

    fn selection_is_live(&self, sel: Selection) -> bool {
        match sel {
            Selection::None => true,
            Selection::Shape(id) => self.shape(id).is_some(),
            Selection::Logo(id) => self.logo(id).is_some(),
        }
    }

    fn shape_mut(&mut self, id: ShapeId) -> PlaymatResult<&mut AnnotationShape> {
        self.shapes
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| PlaymatError::validation(format!("unknown shape id {id}")))
    }

    fn logo_mut(&mut self, id: LogoId) -> PlaymatResult<&mut Logo> {
        self.logos
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| PlaymatError::validation(format!("unknown logo id {id}")))
    }

    /// Upper-left limit for a shape's top-left corner.
    fn shape_drag_max(&self) -> (f64, f64) {
        let m = self.limits.drag_margin;
        (
            (self.design.width_f64() - m).max(0.0),
            (self.design.height_f64() - m).max(0.0),
        )
    }

    // Background

    /// Set or replace the background. Shapes, logos and the overlay stay where they are.
    pub fn set_background(&mut self, src: AssetRef) {
        self.background = Some(src);
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    // Selection

    pub fn select_shape(&mut self, id: ShapeId) -> PlaymatResult<()> {
        self.shape_mut(id)?;
        self.selection = Selection::Shape(id);
        Ok(())
    }

    pub fn select_logo(&mut self, id: LogoId) -> PlaymatResult<()> {
        self.logo_mut(id)?;
        self.selection = Selection::Logo(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    // Shapes

    /// Add a shape of `kind` with the editor defaults and the last used color, and select it.
    pub fn add_shape(&mut self, kind: ShapeKind) -> ShapeId {
        let draft = ShapeDraft::new(kind, self.last_used_color);
        let id = self.push_shape(&draft);
        self.selection = Selection::Shape(id);
        id
    }

    /// Add a shape from an explicit descriptor and select it.
    pub fn add_shape_draft(&mut self, draft: &ShapeDraft) -> ShapeId {
        let id = self.push_shape(draft);
        self.selection = Selection::Shape(id);
        id
    }

    fn push_shape(&mut self, draft: &ShapeDraft) -> ShapeId {
        let id = ShapeId(self.alloc_id());
        let mut shape = AnnotationShape::from_draft(id, draft);
        sanitize_shape(&mut shape, &self.limits.shape_bounds);
        self.shapes.push(shape);
        id
    }

    /// Apply a partial update. A color change becomes the document's last used color.
    pub fn update_shape(&mut self, id: ShapeId, patch: &ShapePatch) -> PlaymatResult<()> {
        let bounds = self.limits.shape_bounds;
        let max = self.shape_drag_max();
        let shape = self.shape_mut(id)?;
        patch.apply_to(shape, &bounds, max);
        if let Some(c) = patch.color {
            self.last_used_color = c;
        }
        Ok(())
    }

    /// Offset between the pointer and the shape's top-left corner, captured when a drag starts.
    pub fn grab_offset(&self, id: ShapeId, pointer: Point) -> PlaymatResult<Vec2> {
        let shape = self
            .shape(id)
            .ok_or_else(|| PlaymatError::validation(format!("unknown shape id {id}")))?;
        Ok(pointer - Point::new(shape.x, shape.y))
    }

    /// Move a shape so its top-left sits at `pointer - grab`, clamped to the drag area, and
    /// select it.
    pub fn drag_shape(&mut self, id: ShapeId, pointer: Point, grab: Vec2) -> PlaymatResult<()> {
        let (max_x, max_y) = self.shape_drag_max();
        let shape = self.shape_mut(id)?;
        let target = pointer - grab;
        shape.x = clamp_edit(target.x, 0.0, max_x);
        shape.y = clamp_edit(target.y, 0.0, max_y);
        self.selection = Selection::Shape(id);
        Ok(())
    }

    pub fn delete_shape(&mut self, id: ShapeId) -> PlaymatResult<AnnotationShape> {
        let idx = self
            .shapes
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| PlaymatError::validation(format!("unknown shape id {id}")))?;
        if self.selection == Selection::Shape(id) {
            self.selection = Selection::None;
        }
        Ok(self.shapes.remove(idx))
    }

    /// Remove every shape. A logo selection survives.
    pub fn clear_shapes(&mut self) {
        self.shapes.clear();
        if let Selection::Shape(_) = self.selection {
            self.selection = Selection::None;
        }
    }

    /// Remove every shape and drop the selection.
    pub fn clear_all(&mut self) {
        self.shapes.clear();
        self.selection = Selection::None;
    }

    // Presets and overlay

    /// Replace the overlay (or clear it) and the shape list with the preset's content.
    /// Preset shapes receive fresh ids; logos and the background are untouched.
    pub fn apply_preset(&mut self, preset: &Preset) {
        self.overlay = preset.overlay.clone();
        self.shapes.clear();
        for draft in &preset.shapes {
            self.push_shape(draft);
        }
        if let Selection::Shape(_) = self.selection {
            self.selection = Selection::None;
        }
    }

    pub fn set_overlay_opacity(&mut self, opacity: f64) -> PlaymatResult<()> {
        let overlay = self
            .overlay
            .as_mut()
            .ok_or_else(|| PlaymatError::validation("document has no overlay"))?;
        overlay.opacity = clamp_edit(opacity, 0.0, 1.0);
        Ok(())
    }

    pub fn set_overlay_filters(&mut self, filters: FilterSet) -> PlaymatResult<()> {
        let overlay = self
            .overlay
            .as_mut()
            .ok_or_else(|| PlaymatError::validation("document has no overlay"))?;
        overlay.filters = filters;
        Ok(())
    }

    // Logos

    /// Add a logo centered on the design surface, in the front bucket, and select it.
    ///
    /// `aspect_ratio` comes from decoding the payload; pass `1.0` when that failed.
    pub fn add_logo(&mut self, src: AssetRef, aspect_ratio: f64, filters: FilterSet) -> LogoId {
        let id = LogoId(self.alloc_id());
        let height = self.limits.logo_height.clamp(DEFAULT_LOGO_HEIGHT);
        let mut logo = Logo::new(id, src, aspect_ratio, height);
        logo.x = ((self.design.width_f64() - logo.width) / 2.0).max(0.0);
        logo.y = ((self.design.height_f64() - logo.height) / 2.0).max(0.0);
        logo.filters = filters;
        self.logos.push(logo);
        self.selection = Selection::Logo(id);
        id
    }

    /// Add a logo from a catalog record: its default filters are copied and the aspect ratio
    /// comes from decoding `entry.src` once (a square when that fails).
    pub fn add_logo_from_catalog(&mut self, entry: &LogoEntry, assets: &mut AssetStore) -> LogoId {
        let aspect_ratio = assets.aspect_ratio(&entry.src);
        self.add_logo(entry.src.clone(), aspect_ratio, entry.default_filters)
    }

    pub fn update_logo(&mut self, id: LogoId, patch: &LogoPatch) -> PlaymatResult<()> {
        let design = self.design;
        let height_bounds = self.limits.logo_height;
        let rotation_bounds = self.limits.shape_bounds.rotation;
        let logo = self.logo_mut(id)?;

        if let Some(h) = patch.height.filter(|h| !h.is_nan()) {
            logo.set_height(height_bounds.clamp(h));
        }
        if let Some(o) = patch.opacity.filter(|o| !o.is_nan()) {
            logo.opacity = clamp_edit(o, 0.0, 1.0);
        }
        if let Some(r) = patch.rotation.filter(|r| !r.is_nan()) {
            logo.rotation = rotation_bounds.clamp(r);
        }
        if let Some(layer) = patch.layer {
            logo.layer = layer;
        }
        if let Some(filters) = patch.filters {
            logo.filters = filters;
        }

        let (max_x, max_y) = logo_drag_max(design, logo);
        if let Some(x) = patch.x.filter(|x| !x.is_nan()) {
            logo.x = clamp_edit(x, 0.0, max_x);
        }
        if let Some(y) = patch.y.filter(|y| !y.is_nan()) {
            logo.y = clamp_edit(y, 0.0, max_y);
        }
        Ok(())
    }

    /// Logo counterpart of [`Document::drag_shape`]; the clamp uses the logo's own size.
    pub fn drag_logo(&mut self, id: LogoId, pointer: Point, grab: Vec2) -> PlaymatResult<()> {
        let design = self.design;
        let logo = self.logo_mut(id)?;
        let (max_x, max_y) = logo_drag_max(design, logo);
        let target = pointer - grab;
        logo.x = clamp_edit(target.x, 0.0, max_x);
        logo.y = clamp_edit(target.y, 0.0, max_y);
        self.selection = Selection::Logo(id);
        Ok(())
    }

    /// Copy a logo under a fresh id, shifted by the duplicate offset, and select the copy.
    pub fn duplicate_logo(&mut self, id: LogoId) -> PlaymatResult<LogoId> {
        let mut copy = self
            .logo(id)
            .cloned()
            .ok_or_else(|| PlaymatError::validation(format!("unknown logo id {id}")))?;
        let new_id = LogoId(self.alloc_id());
        copy.id = new_id;
        copy.x += self.limits.duplicate_offset;
        copy.y += self.limits.duplicate_offset;
        self.logos.push(copy);
        self.selection = Selection::Logo(new_id);
        Ok(new_id)
    }

    pub fn delete_logo(&mut self, id: LogoId) -> PlaymatResult<Logo> {
        let idx = self
            .logos
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| PlaymatError::validation(format!("unknown logo id {id}")))?;
        if self.selection == Selection::Logo(id) {
            self.selection = Selection::None;
        }
        Ok(self.logos.remove(idx))
    }

    /// Record the decoded aspect ratio of a logo. Returns `false` when the logo was deleted in
    /// the meantime; the late result is then dropped.
    pub fn resolve_logo_aspect(&mut self, id: LogoId, aspect_ratio: f64) -> bool {
        match self.logos.iter_mut().find(|l| l.id == id) {
            Some(logo) => {
                logo.set_aspect_ratio(aspect_ratio);
                true
            }
            None => {
                tracing::debug!(%id, "dropping aspect ratio for removed logo");
                false
            }
        }
    }
}

fn logo_drag_max(design: Canvas, logo: &Logo) -> (f64, f64) {
    (
        (design.width_f64() - logo.width).max(0.0),
        (design.height_f64() - logo.height).max(0.0),
    )
}

/// Core-level sanity for shapes that bypass the edit bounds: sizes and stroke must be positive.
fn sanitize_shape(shape: &mut AnnotationShape, bounds: &ShapeBounds) {
    fn positive_or(v: f64, fallback: f64) -> f64 {
        if v.is_finite() && v > 0.0 { v } else { fallback }
    }
    let (dw, dh) = shape.kind.default_size();
    shape.width = positive_or(shape.width, dw);
    shape.height = positive_or(shape.height, dh);
    shape.stroke_width = positive_or(shape.stroke_width, bounds.stroke_width.min);
    shape.x = finite_non_negative(shape.x);
    shape.y = finite_non_negative(shape.y);
    if !shape.rotation.is_finite() {
        shape.rotation = 0.0;
    }
}

fn finite_non_negative(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/model/document.rs"]
mod tests;
