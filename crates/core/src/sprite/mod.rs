pub mod atlas;

/// An opaque display color.
pub type Color = palette::Srgb<u8>;

/// `None` is transparent: drawing it leaves whatever is underneath.
pub type Pixel = Option<Color>;

/// A small immutable pixel grid, addressed `rows[y][x]`.
///
/// Rows may be ragged (the arrows are); the advance width of a sprite is the
/// length of its first row.
#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    rows: &'static [&'static [Pixel]],
}

impl Sprite {
    pub const fn new(rows: &'static [&'static [Pixel]]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &'static [&'static [Pixel]] {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Pack a color as `0xRRGGBB`.
pub fn pack_rgb(color: Color) -> u32 {
    (u32::from(color.red) << 16) | (u32::from(color.green) << 8) | u32::from(color.blue)
}
