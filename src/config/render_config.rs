use std::path::Path;

use crate::foundation::error::{GlyphError, GlyphResult};
use crate::palette::palette::Palette;
use crate::raster::sizing::{DEFAULT_TARGET_WIDTH, TEXT_PIXEL_RATIO, TargetSize};
use crate::render::text::RowDispatch;

/// Where the glyph palette comes from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteChoice {
    /// A built-in character set by name.
    Named(String),
    /// Explicit glyphs, ordered empty to solid.
    Glyphs(String),
}

impl Default for PaletteChoice {
    fn default() -> Self {
        Self::Named("default".to_string())
    }
}

/// How animation frames move through accumulation, resampling and rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    /// Accumulate, resample and render each frame before starting the next.
    #[default]
    Sync,
    /// Accumulate and resample on the calling thread, render on a worker pool.
    Staged,
}

/// Rendering configuration bundle.
///
/// Loadable from JSON; every field is optional and falls back to its default.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output columns; 0 derives from `target_height`.
    pub target_width: u32,
    /// Output rows before pixel-ratio correction; 0 derives from `target_width`.
    pub target_height: u32,
    /// Glyph width divided by glyph height, applied to the row count.
    pub pixel_ratio: f64,
    /// Glyph palette.
    pub palette: PaletteChoice,
    /// Reverse the palette for dark-on-light output.
    pub invert: bool,
    /// Animation pipeline model.
    pub pipeline: PipelineMode,
    /// Worker threads for the staged pipeline; `None` uses rayon defaults.
    pub threads: Option<usize>,
    /// Row parallelism inside a single frame.
    pub row_dispatch: RowDispatch,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
            target_height: 0,
            pixel_ratio: TEXT_PIXEL_RATIO,
            palette: PaletteChoice::default(),
            invert: false,
            pipeline: PipelineMode::default(),
            threads: None,
            row_dispatch: RowDispatch::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a JSON configuration and validate it.
    pub fn from_json_str(s: &str) -> GlyphResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| GlyphError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|e| {
            GlyphError::Other(anyhow::Error::new(e).context(format!(
                "read render config '{}'",
                path.display()
            )))
        })?;
        Self::from_json_str(&s)
    }

    /// Check every setting that would otherwise fail mid-render.
    pub fn validate(&self) -> GlyphResult<()> {
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(GlyphError::invalid_dimension(format!(
                "pixel ratio must be a positive number, got {}",
                self.pixel_ratio
            )));
        }
        if self.threads == Some(0) {
            return Err(GlyphError::validation("'threads' must be >= 1 when set"));
        }
        self.palette()?;
        Ok(())
    }

    /// Build the configured palette, reversed when `invert` is set.
    pub fn palette(&self) -> GlyphResult<Palette> {
        let palette = match &self.palette {
            PaletteChoice::Named(name) => Palette::named(name)?,
            PaletteChoice::Glyphs(glyphs) => Palette::from_chars(glyphs)?,
        };
        Ok(if self.invert {
            palette.reversed()
        } else {
            palette
        })
    }

    /// Character grid for a source of the given pixel size.
    pub fn target_size(&self, src_width: u32, src_height: u32) -> GlyphResult<TargetSize> {
        TargetSize::resolve(
            src_width,
            src_height,
            self.target_width,
            self.target_height,
            self.pixel_ratio,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/render_config.rs"]
mod tests;
