use std::fmt;

use rayon::prelude::*;

use crate::foundation::core::Raster;
use crate::palette::palette::{Glyph, Palette};

/// Immutable grid of palette glyphs, one per rendered cell, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextFrame {
    width: u32,
    height: u32,
    cells: Vec<Glyph>,
}

impl TextFrame {
    /// Columns.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Glyph] {
        &self.cells
    }

    /// Cell at column `x`, row `y`.
    pub fn cell(&self, x: u32, y: u32) -> Option<Glyph> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[y as usize * self.width as usize + x as usize])
    }

    /// Cells of row `y`.
    pub fn row(&self, y: u32) -> &[Glyph] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    /// Row `y` as a string, without a line terminator.
    pub fn line(&self, y: u32) -> String {
        self.row(y).iter().map(|g| g.ch).collect()
    }

    /// Every row as a string, top to bottom.
    pub fn lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.line(y)).collect()
    }
}

impl fmt::Display for TextFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for g in self.row(y) {
                write!(f, "{}", g.ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// How [`render_text`] spreads work across rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowDispatch {
    /// One row after another on the calling thread.
    Sequential,
    /// One unit of work per row on the current rayon pool, joined before returning.
    #[default]
    Parallel,
}

/// Quantize every pixel of `raster` to `palette`, producing a grid of the same size.
///
/// Each cell depends only on its own pixel and the immutable palette, so rows are
/// independent. In parallel mode all rows are joined before the frame is returned.
pub fn render_text(raster: &Raster, palette: &Palette, dispatch: RowDispatch) -> TextFrame {
    let width = raster.width();
    let height = raster.height();
    let mut cells = vec![
        Glyph {
            ch: ' ',
            luminance: 0,
        };
        raster.pixels().len()
    ];

    let row_len = (width as usize).max(1);
    let fill_row = |(y, out): (usize, &mut [Glyph])| {
        for (cell, &px) in out.iter_mut().zip(raster.row(y as u32)) {
            *cell = palette.quantize(px);
        }
    };
    match dispatch {
        RowDispatch::Sequential => cells.chunks_mut(row_len).enumerate().for_each(fill_row),
        RowDispatch::Parallel => cells
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(fill_row),
    }

    TextFrame {
        width,
        height,
        cells,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
