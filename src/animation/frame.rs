use crate::foundation::core::{Bounds, Raster};
use crate::foundation::error::{GlyphError, GlyphResult};

/// How many times an animation asks to be played.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopCount {
    /// Repeat until cancelled.
    #[default]
    Infinite,
    /// Play this many passes.
    Finite(u32),
}

/// One raw, possibly partial frame of an animated source.
///
/// `raster.bounds()` is the diff region relative to the canvas. `delay` is in delay units
/// (1/100 s for GIF sources).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Pixels of the changed region, positioned relative to the canvas.
    pub raster: Raster,
    /// Display duration in delay units.
    pub delay: u32,
}

impl AnimationFrame {
    /// Pair a raster with its display duration.
    pub fn new(raster: Raster, delay: u32) -> Self {
        Self { raster, delay }
    }
}

/// Ordered animation frames plus the source's loop request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Animation {
    frames: Vec<AnimationFrame>,
    loop_count: LoopCount,
}

impl Animation {
    /// Wrap decoded frames. An animation needs at least one frame to establish the canvas.
    pub fn new(frames: Vec<AnimationFrame>, loop_count: LoopCount) -> GlyphResult<Self> {
        if frames.is_empty() {
            return Err(GlyphError::EmptySequence);
        }
        Ok(Self { frames, loop_count })
    }

    /// Frames in display order.
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// Per-frame delays, index-aligned with [`Animation::frames`].
    pub fn delays(&self) -> Vec<u32> {
        self.frames.iter().map(|f| f.delay).collect()
    }

    /// Requested loop behavior.
    pub fn loop_count(&self) -> LoopCount {
        self.loop_count
    }

    /// Bounds of the first frame, which define the canvas.
    pub fn canvas_bounds(&self) -> Bounds {
        self.frames[0].raster.bounds()
    }

    /// Number of frames (never zero).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false`; empty animations cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
