//! glyphreel renders still and animated raster images as grids of text glyphs.
//!
//! The pipeline for animated sources is:
//!
//! - Accumulate incremental GIF frames onto a persistent [`Canvas`]
//! - Resample each full frame to the character grid with [`resample_nearest`]
//! - Quantize every pixel to a [`Palette`] glyph with [`render_text`]
//! - Play the resulting [`TextFrame`] sequence to a [`TextSink`] with a [`Player`]
//!
//! [`render_still`] and [`render_animation`] wrap the first three steps behind a
//! [`RenderConfig`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod palette;
pub(crate) mod playback;
pub(crate) mod raster;
pub(crate) mod render;
pub(crate) mod source;

pub use crate::foundation::core::{Bounds, CHANNEL_MAX, Raster, Rgba16};
pub use crate::foundation::error::{GlyphError, GlyphResult};

pub use crate::animation::accumulate::Canvas;
pub use crate::animation::frame::{Animation, AnimationFrame, LoopCount};
pub use crate::config::render_config::{PaletteChoice, PipelineMode, RenderConfig};
pub use crate::palette::charsets::charset_names;
pub use crate::palette::palette::{Glyph, Palette};
pub use crate::playback::clock::{CancelToken, Clock, ManualClock, SystemClock};
pub use crate::playback::scheduler::{
    LoopMode, PlaybackOpts, PlaybackReport, PlaybackState, Player, frame_delay,
};
pub use crate::playback::sink::{
    CLEAR_SCREEN, InMemorySink, SinkFrame, TerminalSink, TextSink, write_text_frames,
};
pub use crate::raster::resample::resample_nearest;
pub use crate::raster::sizing::{DEFAULT_TARGET_WIDTH, TEXT_PIXEL_RATIO, TargetSize};
pub use crate::render::pipeline::{
    RenderStats, render_animation, render_animation_with_stats, render_still,
};
pub use crate::render::text::{RowDispatch, TextFrame, render_text};
pub use crate::source::decode::{Source, decode, decode_animation, decode_still, load_path};
