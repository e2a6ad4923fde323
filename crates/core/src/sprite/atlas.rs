//! Every sprite the clock can draw: route badges, direction arrows, and a
//! 3x7 font covering the characters that appear in arrival text.

use super::{Color, Pixel, Sprite};

const Z: Pixel = None;
const W: Pixel = Some(Color::new(0xff, 0xff, 0xff));
const X: Pixel = Some(Color::new(0x00, 0x00, 0x00));
const Y: Pixel = Some(Color::new(200, 200, 0));
const R: Pixel = Some(Color::new(0xff, 0x00, 0x00));
const G: Pixel = Some(Color::new(0x00, 0xb7, 0x19));
const L: Pixel = Some(Color::new(0xb3, 0xeb, 0xf2));

// ============================================================================
// Arrows
// ============================================================================

pub const UP_ARROW: Sprite = Sprite::new(&[
    &[R],
    &[R, R],
    &[R, R, R],
    &[R],
    &[R],
    &[R],
    &[R],
    &[R],
]);

pub const DOWN_ARROW: Sprite = Sprite::new(&[
    &[R],
    &[R],
    &[R],
    &[R],
    &[R],
    &[R, R, R],
    &[R, R],
    &[R],
]);

// ============================================================================
// Route badges
// ============================================================================

/// Yellow BMT bullet with a black R.
pub const R_BULLET: Sprite = Sprite::new(&[
    &[Z, Y, Y, Y, Y, Y, Y, Z],
    &[Y, Y, X, X, X, X, Y, Y],
    &[Y, Y, X, Y, Y, X, Y, Y],
    &[Y, Y, X, X, X, Y, Y, Y],
    &[Y, Y, X, Y, X, Y, Y, Y],
    &[Y, Y, X, Y, Y, X, Y, Y],
    &[Y, Y, X, Y, Y, X, Y, Y],
    &[Z, Y, Y, Y, Y, Y, Y, Z],
]);

/// Green Lexington Av bullet showing both the 4 and the 5.
pub const FOUR_FIVE_BULLET: Sprite = Sprite::new(&[
    &[Z, W, G, W, G, G, G, Z],
    &[G, W, G, W, G, G, G, G],
    &[G, W, W, W, G, G, G, G],
    &[G, G, G, W, L, L, L, G],
    &[G, G, G, W, L, G, G, G],
    &[G, G, G, G, L, L, L, G],
    &[G, G, G, G, G, G, L, G],
    &[Z, G, G, G, L, L, L, Z],
]);

// ============================================================================
// Font
// ============================================================================

const DIGIT_0: Sprite = Sprite::new(&[
    &[W, W, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, W, W],
]);

const DIGIT_1: Sprite = Sprite::new(&[
    &[Z, W, Z],
    &[W, W, Z],
    &[Z, W, Z],
    &[Z, W, Z],
    &[Z, W, Z],
    &[Z, W, Z],
    &[W, W, W],
]);

const DIGIT_2: Sprite = Sprite::new(&[
    &[W, W, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[W, W, W],
    &[W, Z, Z],
    &[W, Z, Z],
    &[W, W, W],
]);

const DIGIT_3: Sprite = Sprite::new(&[
    &[W, W, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[W, W, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[W, W, W],
]);

const DIGIT_4: Sprite = Sprite::new(&[
    &[W, Z, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, W, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[Z, Z, W],
]);

const DIGIT_5: Sprite = Sprite::new(&[
    &[W, W, W],
    &[W, Z, Z],
    &[W, Z, Z],
    &[W, W, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[W, W, W],
]);

const DIGIT_6: Sprite = Sprite::new(&[
    &[W, W, W],
    &[W, Z, Z],
    &[W, Z, Z],
    &[W, W, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, W, W],
]);

const DIGIT_7: Sprite = Sprite::new(&[
    &[W, W, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[Z, W, Z],
    &[Z, W, Z],
    &[Z, W, Z],
]);

const DIGIT_8: Sprite = Sprite::new(&[
    &[W, W, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, W, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, W, W],
]);

const DIGIT_9: Sprite = Sprite::new(&[
    &[W, W, W],
    &[W, Z, W],
    &[W, Z, W],
    &[W, W, W],
    &[Z, Z, W],
    &[Z, Z, W],
    &[W, W, W],
]);

const SPACE: Sprite = Sprite::new(&[
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
]);

const COMMA: Sprite = Sprite::new(&[
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, Z, Z],
    &[Z, W, Z],
    &[W, Z, Z],
]);

/// Look up the font sprite for `ch`, if the font has one.
pub fn glyph(ch: char) -> Option<&'static Sprite> {
    match ch {
        '0' => Some(&DIGIT_0),
        '1' => Some(&DIGIT_1),
        '2' => Some(&DIGIT_2),
        '3' => Some(&DIGIT_3),
        '4' => Some(&DIGIT_4),
        '5' => Some(&DIGIT_5),
        '6' => Some(&DIGIT_6),
        '7' => Some(&DIGIT_7),
        '8' => Some(&DIGIT_8),
        '9' => Some(&DIGIT_9),
        ' ' => Some(&SPACE),
        ',' => Some(&COMMA),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_coverage() {
        for ch in "0123456789 ,".chars() {
            let sprite = glyph(ch).unwrap();
            assert_eq!(sprite.width(), 3, "glyph {ch:?}");
            assert_eq!(sprite.height(), 7, "glyph {ch:?}");
        }

        assert!(glyph('A').is_none());
        assert!(glyph('.').is_none());
    }

    #[test]
    fn test_badges_are_square() {
        for badge in [R_BULLET, FOUR_FIVE_BULLET] {
            assert_eq!(badge.width(), 8);
            assert_eq!(badge.height(), 8);
            assert!(badge.rows().iter().all(|row| row.len() == 8));

            // Rounded corners are transparent
            assert_eq!(badge.rows()[0][0], None);
            assert_eq!(badge.rows()[7][7], None);
        }
    }
}
