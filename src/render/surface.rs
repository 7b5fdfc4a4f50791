use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{PlaymatError, PlaymatResult};
use crate::render::frame::Frame;

/// Owned CPU raster target. Pixels are premultiplied RGBA8.
pub struct RasterSurface {
    width: u16,
    height: u16,
    pub(crate) pixmap: vello_cpu::Pixmap,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

fn dims(canvas: Canvas) -> PlaymatResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| PlaymatError::render("surface width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| PlaymatError::render("surface height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(PlaymatError::render("surface must be non-empty"));
    }
    Ok((w, h))
}

impl RasterSurface {
    pub fn new(canvas: Canvas) -> PlaymatResult<Self> {
        let (width, height) = dims(canvas)?;
        Ok(Self {
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    pub(crate) fn width_u16(&self) -> u16 {
        self.width
    }

    pub(crate) fn height_u16(&self) -> u16 {
        self.height
    }

    /// Reallocate when the size changes; the contents are unspecified afterwards.
    pub fn resize(&mut self, canvas: Canvas) -> PlaymatResult<()> {
        let (width, height) = dims(canvas)?;
        if self.width != width || self.height != height {
            *self = Self {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
            };
        }
        Ok(())
    }

    pub fn clear(&mut self, color: Rgba8Premul) {
        let rgba = color.to_array();
        for px in self.pixmap.data_as_u8_slice_mut().chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Premultiplied RGBA8 bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        self.pixmap.data_as_u8_slice_mut()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let d = self.data();
        Some(Rgba8Premul {
            r: d[i],
            g: d[i + 1],
            b: d[i + 2],
            a: d[i + 3],
        })
    }

    /// Copy the pixels out as a [`Frame`].
    pub fn to_frame(&self) -> Frame {
        Frame {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.data().to_vec(),
            premultiplied: true,
        }
    }
}
