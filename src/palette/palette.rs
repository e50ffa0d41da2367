use crate::foundation::core::{CHANNEL_MAX, Rgba16};
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::foundation::math::{even_step, luma601};
use crate::palette::charsets;

/// One display glyph with its assigned luminance level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Glyph {
    /// Character drawn for this level.
    pub ch: char,
    /// Luminance level on the 16-bit channel scale.
    pub luminance: u16,
}

/// Ordered glyph set, darkest (index 0) to lightest.
///
/// Every palette owns its own luminance table, built once in [`Palette::new`]; palettes are
/// immutable afterwards and never share lookup state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    glyphs: Box<[Glyph]>,
    // Strictly increasing copy of the glyph luminances, searched by `quantize`.
    levels: Box<[u16]>,
}

impl Palette {
    /// Largest supported glyph count; beyond it luminance levels would repeat.
    pub const MAX_GLYPHS: usize = CHANNEL_MAX as usize;

    /// Build a palette from glyphs ordered darkest to lightest.
    ///
    /// Glyph `i` of `n` gets luminance `floor(i * CHANNEL_MAX / n)`: the first glyph is 0 and
    /// levels are evenly spaced without duplicates.
    pub fn new<I>(glyphs: I) -> GlyphResult<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let chars: Vec<char> = glyphs.into_iter().collect();
        let n = chars.len();
        if n == 0 {
            return Err(GlyphError::EmptyPalette);
        }
        if n > Self::MAX_GLYPHS {
            return Err(GlyphError::validation(format!(
                "palette has {n} glyphs, at most {} are supported",
                Self::MAX_GLYPHS
            )));
        }

        let glyphs: Box<[Glyph]> = chars
            .into_iter()
            .enumerate()
            .map(|(i, ch)| Glyph {
                ch,
                luminance: even_step(i, n, u32::from(CHANNEL_MAX)) as u16,
            })
            .collect();
        let levels = glyphs.iter().map(|g| g.luminance).collect();
        Ok(Self { glyphs, levels })
    }

    /// Build a palette from the characters of `s`, in order.
    pub fn from_chars(s: &str) -> GlyphResult<Self> {
        Self::new(s.chars())
    }

    /// Build one of the built-in character sets, see [`charset_names`](crate::charset_names).
    pub fn named(name: &str) -> GlyphResult<Self> {
        let set = charsets::builtin(name).ok_or_else(|| {
            GlyphError::validation(format!(
                "unknown character set '{name}' (known: {})",
                charsets::charset_names().join(", ")
            ))
        })?;
        Self::from_chars(set)
    }

    /// Glyph order reversed, with luminance reassigned by the same even spacing.
    ///
    /// Reversing turns light-on-dark output into dark-on-light output.
    pub fn reversed(&self) -> Self {
        let n = self.glyphs.len();
        let glyphs: Box<[Glyph]> = self
            .glyphs
            .iter()
            .rev()
            .enumerate()
            .map(|(i, g)| Glyph {
                ch: g.ch,
                luminance: even_step(i, n, u32::from(CHANNEL_MAX)) as u16,
            })
            .collect();
        let levels = glyphs.iter().map(|g| g.luminance).collect();
        Self { glyphs, levels }
    }

    /// Glyph whose luminance is nearest to the luma of `color`.
    ///
    /// Ties go to the lower index. Transparent pixels read as black.
    pub fn quantize(&self, color: Rgba16) -> Glyph {
        self.glyphs[self.nearest_index(luma601(color))]
    }

    /// Index of the level nearest to `y`, preferring the lower index on ties.
    pub fn nearest_index(&self, y: u16) -> usize {
        let hi = self.levels.partition_point(|&l| l < y);
        if hi == 0 {
            return 0;
        }
        if hi == self.levels.len() {
            return hi - 1;
        }
        let below = y - self.levels[hi - 1];
        let above = self.levels[hi] - y;
        if below <= above { hi - 1 } else { hi }
    }

    /// Glyphs, darkest first.
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Characters, darkest first.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().map(|g| g.ch)
    }

    /// Number of glyphs (always at least one).
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false`; empty palettes cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/palette/palette.rs"]
mod tests;
