//! Source-over blending of a separately rendered layer onto existing pixels.
//!
//! vello_cpu's `render_to_pixmap` replaces its target, so a shape drawn on its own pixmap is
//! folded back onto the surface here.

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PlaymatError, PlaymatResult};

/// Blend `src` over `dst` with an extra layer opacity. Both pixels are premultiplied.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul, opacity: f32) -> Rgba8Premul {
    let weight = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    let src = src.scaled(weight);
    if src.a == 0 {
        return dst;
    }
    let keep = 255 - src.a;
    let dst = dst.scaled(keep);
    Rgba8Premul {
        r: src.r.saturating_add(dst.r),
        g: src.g.saturating_add(dst.g),
        b: src.b.saturating_add(dst.b),
        a: src.a.saturating_add(dst.a),
    }
}

/// Blend a whole premultiplied RGBA8 buffer over another of the same size.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> PlaymatResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(PlaymatError::render(format!(
            "layer buffer of {} bytes does not match target of {} bytes",
            src.len(),
            dst.len()
        )));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let s = Rgba8Premul::from_array([s[0], s[1], s[2], s[3]]);
        if s.a == 0 {
            continue;
        }
        let blended = over(Rgba8Premul::from_array([d[0], d[1], d[2], d[3]]), s, opacity);
        d.copy_from_slice(&blended.to_array());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
