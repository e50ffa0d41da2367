use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use crate::animation::frame::{Animation, AnimationFrame, LoopCount};
use crate::foundation::core::Raster;
use crate::foundation::error::GlyphResult;

/// A decoded input image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// Single raster.
    Still(Raster),
    /// Multi-frame GIF.
    Animated(Animation),
}

impl Source {
    /// First displayed raster: the still itself, or the first animation frame.
    pub fn first_raster(&self) -> &Raster {
        match self {
            Self::Still(raster) => raster,
            Self::Animated(animation) => &animation.frames()[0].raster,
        }
    }
}

/// Decode a still image in any enabled format.
pub fn decode_still(bytes: &[u8]) -> GlyphResult<Raster> {
    let img = image::load_from_memory(bytes)?;
    Ok(Raster::from_dynamic(&img))
}

/// Decode every frame of a GIF, with delays in hundredths of a second.
///
/// Each frame keeps its offset on the logical screen. GIF sources do not expose a loop count
/// through the decoder, so the result always asks for endless playback.
pub fn decode_animation(bytes: &[u8]) -> GlyphResult<Animation> {
    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    let mut frames = Vec::new();
    for frame in decoder.into_frames() {
        let frame = frame?;
        let (numer, denom) = frame.delay().numer_denom_ms();
        let raster = Raster::from_rgba8_image(
            frame.buffer(),
            i64::from(frame.left()),
            i64::from(frame.top()),
        );
        frames.push(AnimationFrame::new(raster, centiseconds(numer, denom)));
    }
    tracing::debug!(frames = frames.len(), "decoded gif");
    Animation::new(frames, LoopCount::Infinite)
}

/// Sniff the format and decode; GIFs with more than one frame become [`Source::Animated`].
pub fn decode(bytes: &[u8]) -> GlyphResult<Source> {
    let format = image::guess_format(bytes)?;
    if format == image::ImageFormat::Gif {
        let animation = decode_animation(bytes)?;
        if animation.len() > 1 {
            return Ok(Source::Animated(animation));
        }
        let first = animation.frames()[0].raster.clone();
        return Ok(Source::Still(first.with_origin(0, 0)));
    }
    decode_still(bytes).map(Source::Still)
}

/// Read and [`decode`] a file.
pub fn load_path(path: &Path) -> GlyphResult<Source> {
    let bytes = std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    decode(&bytes)
}

fn centiseconds(numer_ms: u32, denom: u32) -> u32 {
    let denom = u64::from(denom.max(1)) * 10;
    ((u64::from(numer_ms) + denom / 2) / denom) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/source/decode.rs"]
mod tests;
