use crate::foundation::error::{GlyphError, GlyphResult};
use crate::foundation::math::widen_u8;

/// Largest value of a single color channel.
pub const CHANNEL_MAX: u16 = u16::MAX;

/// Straight-alpha RGBA color with 16-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba16 {
    /// Red channel.
    pub r: u16,
    /// Green channel.
    pub g: u16,
    /// Blue channel.
    pub b: u16,
    /// Alpha channel; 0 is fully transparent.
    pub a: u16,
}

impl Rgba16 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, CHANNEL_MAX);
    /// Opaque white.
    pub const WHITE: Self = Self::new(CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX, CHANNEL_MAX);

    /// Build a color from 16-bit channels.
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(widen_u8(r), widen_u8(g), widen_u8(b), widen_u8(a))
    }

    /// Returns `true` when alpha is zero.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Same color with the alpha channel forced to fully opaque.
    pub fn opaque(self) -> Self {
        Self {
            a: CHANNEL_MAX,
            ..self
        }
    }
}

/// Integer pixel rectangle: origin plus size. `x`/`y` may be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Bounds {
    /// Rectangle at `(x, y)` of the given size.
    pub const fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin.
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        self.y + i64::from(self.height)
    }

    /// Number of pixels covered.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Returns `true` when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` when `(x, y)` lies inside.
    pub fn contains(self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Overlap of two rectangles; an empty rectangle when they are disjoint.
    pub fn intersect(self, other: Bounds) -> Bounds {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return Bounds::new(x0, y0, 0, 0);
        }
        Bounds::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32)
    }
}

/// Rectangular pixel buffer positioned at `bounds`.
///
/// Pixels are stored row-major, `bounds.width * bounds.height` entries, straight alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    bounds: Bounds,
    pixels: Vec<Rgba16>,
}

impl Raster {
    /// Raster of `bounds` filled with `fill`.
    pub fn filled(bounds: Bounds, fill: Rgba16) -> Self {
        let len = bounds.area() as usize;
        Self {
            bounds,
            pixels: vec![fill; len],
        }
    }

    /// Wrap an existing pixel buffer. The buffer length must match the bounds.
    pub fn from_pixels(bounds: Bounds, pixels: Vec<Rgba16>) -> GlyphResult<Self> {
        if pixels.len() as u64 != bounds.area() {
            return Err(GlyphError::validation(format!(
                "raster expects {} pixels for {}x{}, got {}",
                bounds.area(),
                bounds.width,
                bounds.height,
                pixels.len()
            )));
        }
        Ok(Self { bounds, pixels })
    }

    /// Convert a decoded 8-bit RGBA image, placing its top-left corner at `(x, y)`.
    pub fn from_rgba8_image(img: &image::RgbaImage, x: i64, y: i64) -> Self {
        let pixels = img
            .pixels()
            .map(|p| Rgba16::from_rgba8(p[0], p[1], p[2], p[3]))
            .collect();
        Self {
            bounds: Bounds::new(x, y, img.width(), img.height()),
            pixels,
        }
    }

    /// Convert any decoded image, keeping 16-bit precision when the source has it.
    pub fn from_dynamic(img: &image::DynamicImage) -> Self {
        let buf = img.to_rgba16();
        let pixels = buf
            .pixels()
            .map(|p| Rgba16::new(p[0], p[1], p[2], p[3]))
            .collect();
        Self {
            bounds: Bounds::from_size(buf.width(), buf.height()),
            pixels,
        }
    }

    /// Position and size.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Row-major pixel buffer.
    pub fn pixels(&self) -> &[Rgba16] {
        &self.pixels
    }

    pub(crate) fn pixels_mut(&mut self) -> &mut [Rgba16] {
        &mut self.pixels
    }

    /// Pixels of row `y`, counted from the top of the raster (not in absolute coordinates).
    pub fn row(&self, y: u32) -> &[Rgba16] {
        let w = self.bounds.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Pixel at absolute coordinates, `None` outside the bounds.
    pub fn at(&self, x: i64, y: i64) -> Option<Rgba16> {
        self.index_of(x, y).map(|i| self.pixels[i])
    }

    pub(crate) fn index_of(&self, x: i64, y: i64) -> Option<usize> {
        if !self.bounds.contains(x, y) {
            return None;
        }
        let lx = (x - self.bounds.x) as usize;
        let ly = (y - self.bounds.y) as usize;
        Some(ly * self.bounds.width as usize + lx)
    }

    /// Same pixels moved so the top-left corner sits at `(x, y)`.
    pub fn with_origin(mut self, x: i64, y: i64) -> Self {
        self.bounds.x = x;
        self.bounds.y = y;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
