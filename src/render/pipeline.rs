use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::animation::accumulate::Canvas;
use crate::animation::frame::Animation;
use crate::config::render_config::{PipelineMode, RenderConfig};
use crate::foundation::core::Raster;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::palette::palette::Palette;
use crate::raster::resample::resample_nearest;
use crate::raster::sizing::TargetSize;
use crate::render::text::{RowDispatch, TextFrame, render_text};

/// Counters for one animation render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rendered (always the source frame count).
    pub frames_total: u64,
    /// Source pixels copied onto the canvas across all frames.
    pub pixels_composited: u64,
    /// Wall time spent accumulating, resampling and rendering.
    pub elapsed: Duration,
}

/// Resample and render a still image.
///
/// The grid size is resolved from the raster's own size and `config`.
pub fn render_still(raster: &Raster, config: &RenderConfig) -> GlyphResult<TextFrame> {
    config.validate()?;
    let palette = config.palette()?;
    let size = config.target_size(raster.width(), raster.height())?;
    let resized = resample_nearest(raster, size.width, size.height, (0, 0))?;
    Ok(render_text(&resized, &palette, config.row_dispatch))
}

/// Render every frame of an animation, in source order.
///
/// See [`render_animation_with_stats`].
pub fn render_animation(animation: &Animation, config: &RenderConfig) -> GlyphResult<Vec<TextFrame>> {
    render_animation_with_stats(animation, config).map(|(frames, _)| frames)
}

/// Render every frame of an animation and report counters.
///
/// Frames are accumulated onto a canvas sized to the first frame, resampled to the grid
/// resolved from that first frame, and rendered to text. The returned sequence has one
/// frame per source frame, in source order, regardless of [`PipelineMode`].
#[tracing::instrument(skip_all, fields(frames = animation.len(), mode = ?config.pipeline))]
pub fn render_animation_with_stats(
    animation: &Animation,
    config: &RenderConfig,
) -> GlyphResult<(Vec<TextFrame>, RenderStats)> {
    config.validate()?;
    let palette = config.palette()?;
    let bounds = animation.canvas_bounds();
    let size = config.target_size(bounds.width, bounds.height)?;

    let started = Instant::now();
    let (frames, pixels_composited) = match config.pipeline {
        PipelineMode::Sync => render_sync(animation, &palette, size, config.row_dispatch)?,
        PipelineMode::Staged => {
            let pool = build_thread_pool(config.threads)?;
            render_staged(animation, &palette, size, config.row_dispatch, &pool)?
        }
    };
    let stats = RenderStats {
        frames_total: frames.len() as u64,
        pixels_composited,
        elapsed: started.elapsed(),
    };

    let secs = stats.elapsed.as_secs_f64();
    tracing::info!(
        frames = stats.frames_total,
        width = size.width,
        height = size.height,
        elapsed_ms = stats.elapsed.as_millis() as u64,
        fps = if secs > 0.0 { stats.frames_total as f64 / secs } else { 0.0 },
        "rendered animation"
    );
    Ok((frames, stats))
}

fn render_sync(
    animation: &Animation,
    palette: &Palette,
    size: TargetSize,
    dispatch: RowDispatch,
) -> GlyphResult<(Vec<TextFrame>, u64)> {
    let frames = animation.frames();
    let mut out = Vec::with_capacity(frames.len());
    let mut canvas = Canvas::new(&frames[0].raster);
    let mut composited = frames[0].raster.bounds().area();

    for (i, frame) in frames.iter().enumerate() {
        if i > 0 {
            composited += canvas.composite(&frame.raster);
        }
        // Resampling produces an owned raster, so the canvas may advance right after.
        let resized = resample_nearest(canvas.raster(), size.width, size.height, (0, 0))?;
        out.push(render_text(&resized, palette, dispatch));
        tracing::debug!(frame = i, "rendered frame (sync)");
    }
    Ok((out, composited))
}

fn render_staged(
    animation: &Animation,
    palette: &Palette,
    size: TargetSize,
    dispatch: RowDispatch,
    pool: &rayon::ThreadPool,
) -> GlyphResult<(Vec<TextFrame>, u64)> {
    let frames = animation.frames();
    let n = frames.len();
    // Results never outnumber frames, so workers never block on send.
    let (tx, rx) = mpsc::sync_channel::<(usize, TextFrame)>(n);
    let mut composited = frames[0].raster.bounds().area();

    // `in_place_scope` returns only after every spawned render has finished.
    pool.in_place_scope(|scope| -> GlyphResult<()> {
        let mut canvas = Canvas::new(&frames[0].raster);
        for (i, frame) in frames.iter().enumerate() {
            if i > 0 {
                composited += canvas.composite(&frame.raster);
            }
            // Copy-then-dispatch: the worker owns its input before the canvas advances.
            let resized = resample_nearest(canvas.raster(), size.width, size.height, (0, 0))?;
            let tx = tx.clone();
            scope.spawn(move |_| {
                let text = render_text(&resized, palette, dispatch);
                if tx.send((i, text)).is_err() {
                    tracing::warn!(frame = i, "staged render result dropped");
                }
            });
            tracing::debug!(frame = i, "dispatched frame (staged)");
        }
        Ok(())
    })?;
    drop(tx);

    let mut slots: Vec<Option<TextFrame>> = vec![None; n];
    for (i, text) in rx.try_iter() {
        slots[i] = Some(text);
    }
    let out = slots
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            slot.ok_or_else(|| {
                GlyphError::validation(format!("internal error: frame {i} missing after staged render"))
            })
        })
        .collect::<GlyphResult<Vec<_>>>()?;
    Ok((out, composited))
}

fn build_thread_pool(threads: Option<usize>) -> GlyphResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(GlyphError::validation("render 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("glyphreel-render-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| GlyphError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
