use crate::assets::store::AssetStore;
use crate::foundation::core::Canvas;
use crate::foundation::error::PlaymatResult;
use crate::model::document::Document;
use crate::render::compositor::{RenderReport, RenderSettings, render};
use crate::render::frame::Frame;
use crate::render::surface::RasterSurface;

/// Handle for one requested render. Only the most recently issued ticket may draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderTicket {
    generation: u64,
    export: Canvas,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn export(&self) -> Canvas {
        self.export
    }
}

#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub frame: Frame,
    pub report: RenderReport,
}

/// Owns the raster target and serializes passes over it.
///
/// Work that completes out of order (e.g. an asset decode finishing after the user already
/// changed the document) presents its ticket to [`RenderSession::finish`]; stale tickets are
/// rejected without touching the target.
#[derive(Debug)]
pub struct RenderSession {
    target: RasterSurface,
    generation: u64,
    settings: RenderSettings,
}

impl RenderSession {
    pub fn new(initial: Canvas, settings: RenderSettings) -> PlaymatResult<Self> {
        Ok(Self {
            target: RasterSurface::new(initial)?,
            generation: 0,
            settings,
        })
    }

    /// Issue a ticket, invalidating every earlier one.
    pub fn begin(&mut self, export: Canvas) -> RenderTicket {
        self.generation += 1;
        RenderTicket {
            generation: self.generation,
            export,
        }
    }

    pub fn is_current(&self, ticket: &RenderTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Draw for `ticket`, or return `Ok(None)` when a newer ticket was issued meanwhile.
    pub fn finish(
        &mut self,
        ticket: RenderTicket,
        doc: &Document,
        assets: &AssetStore,
    ) -> PlaymatResult<Option<RenderOutput>> {
        if !self.is_current(&ticket) {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale render"
            );
            return Ok(None);
        }
        let report = render(&mut self.target, doc, assets, ticket.export, &self.settings)?;
        Ok(Some(RenderOutput {
            frame: self.target.to_frame(),
            report,
        }))
    }

    /// Begin and finish in one step.
    pub fn render(
        &mut self,
        doc: &Document,
        assets: &AssetStore,
        export: Canvas,
    ) -> PlaymatResult<RenderOutput> {
        let ticket = self.begin(export);
        let report = render(&mut self.target, doc, assets, ticket.export, &self.settings)?;
        Ok(RenderOutput {
            frame: self.target.to_frame(),
            report,
        })
    }

    pub fn surface(&self) -> &RasterSurface {
        &self.target
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
