use std::borrow::Cow;

use crate::filter::ops::{ColorMatrix, FilterOp};
use crate::filter::set::FilterSet;
use crate::foundation::error::{PlaymatError, PlaymatResult};

/// Apply `filters` to a premultiplied RGBA8 buffer.
///
/// Returns the input untouched (borrowed) when the filter set is the identity, so identity
/// filters are bit-exact.
pub fn apply_filters<'a>(rgba8_premul: &'a [u8], filters: &FilterSet) -> PlaymatResult<Cow<'a, [u8]>> {
    let chain = filters.to_chain();
    if chain.is_empty() {
        return Ok(Cow::Borrowed(rgba8_premul));
    }
    let mut out = rgba8_premul.to_vec();
    apply_chain_in_place(&mut out, &chain)?;
    Ok(Cow::Owned(out))
}

/// Apply an ordered chain of filter operations in place.
///
/// Each step is evaluated in straight-alpha float space and clamped to `[0, 1]` before the
/// next one runs; quantization back to 8 bits happens once at the end.
pub fn apply_chain_in_place(rgba8_premul: &mut [u8], chain: &[FilterOp]) -> PlaymatResult<()> {
    if !rgba8_premul.len().is_multiple_of(4) {
        return Err(PlaymatError::render(
            "filter input must be tightly packed rgba8",
        ));
    }
    if chain.is_empty() {
        return Ok(());
    }
    let matrices: Vec<ColorMatrix> = chain.iter().map(|op| op.color_matrix()).collect();
    for px in rgba8_premul.chunks_exact_mut(4) {
        let out = filter_pixel([px[0], px[1], px[2], px[3]], &matrices);
        px.copy_from_slice(&out);
    }
    Ok(())
}

/// Run one premultiplied pixel through a sequence of color matrices.
pub fn filter_pixel(px: [u8; 4], matrices: &[ColorMatrix]) -> [u8; 4] {
    let pa = f32::from(px[3]) / 255.0;
    if pa <= 0.0 {
        return [0, 0, 0, 0];
    }

    // premul -> straight
    let inv_a = 1.0 / pa;
    let mut straight = [
        (f32::from(px[0]) / 255.0 * inv_a).clamp(0.0, 1.0),
        (f32::from(px[1]) / 255.0 * inv_a).clamp(0.0, 1.0),
        (f32::from(px[2]) / 255.0 * inv_a).clamp(0.0, 1.0),
        pa,
    ];
    for m in matrices {
        straight = m.apply(straight);
    }

    // straight -> premul
    let [r, g, b, a] = straight;
    let q = |v: f32| -> u8 { (v * 255.0).round().clamp(0.0, 255.0) as u8 };
    [q(r * a), q(g * a), q(b * a), q(a)]
}

#[cfg(test)]
#[path = "../../tests/unit/filter/apply.rs"]
mod tests;
