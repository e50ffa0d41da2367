use crate::foundation::core::{Raster, Rgba16};
use crate::foundation::math::over_opaque;

/// Persistent full-size frame that diff frames are composited onto.
///
/// The canvas takes the bounds of the first frame and stays fully opaque. [`Canvas::composite`]
/// mutates it in place, so readers that need a stable frame must take a
/// [`Canvas::snapshot`] (or resample the content) before the next call.
#[derive(Clone, Debug)]
pub struct Canvas {
    raster: Raster,
}

impl Canvas {
    /// Canvas sized to `first`, over an opaque black background.
    pub fn new(first: &Raster) -> Self {
        Self::with_background(first, Rgba16::BLACK)
    }

    /// Canvas sized to `first`; pixels `first` leaves transparent show `background`.
    pub fn with_background(first: &Raster, background: Rgba16) -> Self {
        let mut canvas = Self {
            raster: Raster::filled(first.bounds(), background.opaque()),
        };
        canvas.composite(first);
        canvas
    }

    /// Composite every non-transparent pixel of `frame` that overlaps the canvas.
    ///
    /// Opaque pixels replace the canvas pixel, zero-alpha pixels leave it untouched, and
    /// partially transparent pixels are blended over it. Nothing outside the canvas bounds is
    /// written. Returns the number of pixels written.
    pub fn composite(&mut self, frame: &Raster) -> u64 {
        let region = self.raster.bounds().intersect(frame.bounds());
        if region.is_empty() {
            return 0;
        }

        let canvas_bounds = self.raster.bounds();
        let frame_bounds = frame.bounds();
        let canvas_w = canvas_bounds.width as usize;
        let run = region.width as usize;
        let src_x = (region.x - frame_bounds.x) as u32;
        let dst_x = (region.x - canvas_bounds.x) as usize;

        let mut written = 0u64;
        let dst_px = self.raster.pixels_mut();
        for y in region.y..region.bottom() {
            let src_row = frame.row((y - frame_bounds.y) as u32);
            let src = &src_row[src_x as usize..src_x as usize + run];
            let dst_start = (y - canvas_bounds.y) as usize * canvas_w + dst_x;
            let dst = &mut dst_px[dst_start..dst_start + run];
            for (d, s) in dst.iter_mut().zip(src) {
                if !s.is_transparent() {
                    *d = over_opaque(*s, *d);
                    written += 1;
                }
            }
        }
        written
    }

    /// Current canvas content. Invalidated by the next [`Canvas::composite`].
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Owned copy of the current content, safe to hand to another stage.
    pub fn snapshot(&self) -> Raster {
        self.raster.clone()
    }

    /// Consume the canvas, returning its content.
    pub fn into_raster(self) -> Raster {
        self.raster
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/accumulate.rs"]
mod tests;
