use crate::foundation::core::{Bounds, Raster};
use crate::foundation::error::{GlyphError, GlyphResult};

/// Nearest-neighbor resample of `src` to exactly `width` x `height` pixels placed at `origin`.
///
/// Output pixel `(x, y)` (relative to `origin`) copies source pixel
/// `(floor(x * src_w / width), floor(y * src_h / height))`, clamped into the source bounds.
/// Channels are copied verbatim; there is no blending.
///
/// Zero target sizes and empty sources fail with [`GlyphError::InvalidDimension`].
pub fn resample_nearest(
    src: &Raster,
    width: u32,
    height: u32,
    origin: (i64, i64),
) -> GlyphResult<Raster> {
    if width == 0 || height == 0 {
        return Err(GlyphError::invalid_dimension(format!(
            "resample target must be positive, got {width}x{height}"
        )));
    }
    let src_bounds = src.bounds();
    if src_bounds.is_empty() {
        return Err(GlyphError::invalid_dimension(format!(
            "resample source is empty ({}x{})",
            src_bounds.width, src_bounds.height
        )));
    }

    let x_map = axis_map(src_bounds.width, width);
    let y_map = axis_map(src_bounds.height, height);
    let src_w = src_bounds.width as usize;
    let src_px = src.pixels();

    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for &sy in &y_map {
        let row = &src_px[sy * src_w..(sy + 1) * src_w];
        pixels.extend(x_map.iter().map(|&sx| row[sx]));
    }

    Raster::from_pixels(Bounds::new(origin.0, origin.1, width, height), pixels)
}

/// Source index for every output index along one axis.
fn axis_map(src_len: u32, dst_len: u32) -> Vec<usize> {
    let max = src_len as usize - 1;
    (0..dst_len)
        .map(|i| {
            let s = (u64::from(i) * u64::from(src_len) / u64::from(dst_len)) as usize;
            s.min(max)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resample.rs"]
mod tests;
