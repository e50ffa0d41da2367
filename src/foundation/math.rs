use crate::foundation::core::{CHANNEL_MAX, Rgba16};

/// Scale an 8-bit channel to 16 bits so that 0xff maps to 0xffff.
pub(crate) fn widen_u8(v: u8) -> u16 {
    u16::from(v) * 257
}

/// Rec. 601 luma on 16-bit channels, weighted by alpha.
///
/// Transparent pixels read as black. Pure white yields exactly [`CHANNEL_MAX`].
pub(crate) fn luma601(c: Rgba16) -> u16 {
    let y = (299 * u32::from(c.r) + 587 * u32::from(c.g) + 114 * u32::from(c.b)) / 1000;
    let y = (y * u32::from(c.a) + u32::from(CHANNEL_MAX) / 2) / u32::from(CHANNEL_MAX);
    y.min(u32::from(CHANNEL_MAX)) as u16
}

/// Straight-alpha `src` over an opaque `dst`; the result is opaque.
///
/// Fully opaque `src` comes back unchanged, so the blend reduces to a plain copy.
pub(crate) fn over_opaque(src: Rgba16, dst: Rgba16) -> Rgba16 {
    let max = u32::from(CHANNEL_MAX);
    let a = u32::from(src.a);
    let mix = |s: u16, d: u16| {
        ((u32::from(s) * a + u32::from(d) * (max - a) + max / 2) / max) as u16
    };
    Rgba16::new(mix(src.r, dst.r), mix(src.g, dst.g), mix(src.b, dst.b), CHANNEL_MAX)
}

/// `floor(i * range / n)` without intermediate overflow.
pub(crate) fn even_step(i: usize, n: usize, range: u32) -> u32 {
    debug_assert!(n > 0 && i < n);
    ((i as u64 * u64::from(range)) / n as u64) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
