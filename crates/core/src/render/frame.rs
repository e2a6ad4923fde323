use crate::sprite::{Pixel, Sprite};

/// One full display update for a 32x8 matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pixels: [[Pixel; Frame::WIDTH]; Frame::HEIGHT],
}

impl Frame {
    pub const WIDTH: usize = 32;
    pub const HEIGHT: usize = 8;

    pub fn new() -> Self {
        Self {
            pixels: [[None; Self::WIDTH]; Self::HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        self.pixels.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    /// Rows top to bottom, each left to right.
    pub fn rows(&self) -> impl Iterator<Item = &[Pixel; Frame::WIDTH]> {
        self.pixels.iter()
    }

    /// Composite `sprite` with its top-left corner at (`x`, `y`).
    ///
    /// Transparent sprite pixels leave the frame untouched and anything
    /// falling off the edge of the frame is clipped.
    pub fn draw(&mut self, sprite: &Sprite, x: usize, y: usize) {
        for (dy, row) in sprite.rows().iter().enumerate() {
            let Some(frame_row) = self.pixels.get_mut(y + dy) else {
                break;
            };

            for (dx, pixel) in row.iter().enumerate() {
                if let (Some(color), Some(slot)) = (pixel, frame_row.get_mut(x + dx)) {
                    *slot = Some(*color);
                }
            }
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}
