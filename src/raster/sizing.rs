use crate::foundation::error::{GlyphError, GlyphResult};

/// Width used when neither target dimension is given.
pub const DEFAULT_TARGET_WIDTH: u32 = 80;

/// Typical terminal cell width divided by its height.
///
/// Measure it by dividing the width of the cursor box in your terminal by its height.
pub const TEXT_PIXEL_RATIO: f64 = 6.0 / 14.0;

/// Character-grid size resolved for one source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetSize {
    /// Columns.
    pub width: u32,
    /// Rows.
    pub height: u32,
}

impl TargetSize {
    /// Resolve the grid for a `src_width` x `src_height` source.
    ///
    /// A zero `width` or `height` is derived from the other one keeping the source aspect ratio
    /// (both zero means `width = 80`). The height is then scaled by `pixel_ratio` to
    /// compensate for glyphs being taller than wide. Derived values never drop below 1.
    pub fn resolve(
        src_width: u32,
        src_height: u32,
        width: u32,
        height: u32,
        pixel_ratio: f64,
    ) -> GlyphResult<Self> {
        if src_width == 0 || src_height == 0 {
            return Err(GlyphError::invalid_dimension(format!(
                "source image is empty ({src_width}x{src_height})"
            )));
        }
        if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
            return Err(GlyphError::invalid_dimension(format!(
                "pixel ratio must be a positive number, got {pixel_ratio}"
            )));
        }

        let (mut w, mut h) = (width, height);
        if w == 0 && h == 0 {
            w = DEFAULT_TARGET_WIDTH;
        }
        if h == 0 {
            h = scale(src_height, w, src_width);
        }
        if w == 0 {
            w = scale(src_width, h, src_height);
        }
        let h = ((f64::from(h) * pixel_ratio) as u32).max(1);

        Ok(Self {
            width: w.max(1),
            height: h,
        })
    }
}

/// `trunc(v * num / den)` clamped to `u32`.
fn scale(v: u32, num: u32, den: u32) -> u32 {
    let out = u64::from(v) * u64::from(num) / u64::from(den);
    out.min(u64::from(u32::MAX)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/raster/sizing.rs"]
mod tests;
