//! Built-in 5x7 pixel face.
//!
//! Used whenever no outline font is available. Glyphs cover printable ASCII
//! from space to `_`; lowercase letters fold to uppercase and anything else
//! renders as a hollow box.

use crate::bitmap::Bitmap;
use crate::blend::Rgba;

/// Glyph cell width in font units.
pub const CELL_WIDTH: u32 = 5;
/// Glyph cell height in font units.
pub const CELL_HEIGHT: u32 = 7;
/// Horizontal advance in font units (cell plus one column of spacing).
pub const ADVANCE_UNITS: u32 = 6;

/// Font units per pixel of font size.
const UNITS_PER_PX: f32 = 0.1;

const FIRST: u32 = 32;

/// Box drawn for characters outside the table.
static MISSING: [u8; 7] = [0x1f, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1f];

/// Row bitmasks, bit 4 is the leftmost column.
#[rustfmt::skip]
static GLYPHS: [[u8; 7]; 64] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x04, 0x04, 0x04, 0x04, 0x00, 0x04, 0x00], // '!'
    [0x0a, 0x0a, 0x00, 0x00, 0x00, 0x00, 0x00], // '"'
    [0x0a, 0x1f, 0x0a, 0x1f, 0x0a, 0x00, 0x00], // '#'
    [0x04, 0x0e, 0x14, 0x0e, 0x05, 0x0e, 0x04], // '$'
    [0x19, 0x1a, 0x04, 0x0b, 0x13, 0x00, 0x00], // '%'
    [0x0c, 0x12, 0x0c, 0x12, 0x13, 0x0d, 0x00], // '&'
    [0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00], // "'"
    [0x04, 0x08, 0x08, 0x08, 0x08, 0x04, 0x00], // '('
    [0x04, 0x02, 0x02, 0x02, 0x02, 0x04, 0x00], // ')'
    [0x00, 0x15, 0x0e, 0x15, 0x00, 0x00, 0x00], // '*'
    [0x00, 0x04, 0x04, 0x1f, 0x04, 0x04, 0x00], // '+'
    [0x00, 0x00, 0x00, 0x00, 0x04, 0x04, 0x08], // ','
    [0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00], // '-'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x04, 0x00], // '.'
    [0x01, 0x02, 0x04, 0x08, 0x10, 0x00, 0x00], // '/'
    [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e], // '0'
    [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e], // '1'
    [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f], // '2'
    [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e], // '3'
    [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02], // '4'
    [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e], // '5'
    [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e], // '6'
    [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08], // '7'
    [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e], // '8'
    [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c], // '9'
    [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00], // ':'
    [0x00, 0x04, 0x00, 0x00, 0x04, 0x04, 0x08], // ';'
    [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02], // '<'
    [0x00, 0x00, 0x1f, 0x00, 0x1f, 0x00, 0x00], // '='
    [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08], // '>'
    [0x0e, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // '?'
    [0x0e, 0x11, 0x17, 0x15, 0x17, 0x10, 0x0e], // '@'
    [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11], // 'A'
    [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e], // 'B'
    [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e], // 'C'
    [0x1e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1e], // 'D'
    [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f], // 'E'
    [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10], // 'F'
    [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f], // 'G'
    [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11], // 'H'
    [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e], // 'I'
    [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0c], // 'J'
    [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11], // 'K'
    [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f], // 'L'
    [0x11, 0x1b, 0x15, 0x11, 0x11, 0x11, 0x11], // 'M'
    [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11], // 'N'
    [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e], // 'O'
    [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10], // 'P'
    [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d], // 'Q'
    [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11], // 'R'
    [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e], // 'S'
    [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04], // 'T'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e], // 'U'
    [0x11, 0x11, 0x11, 0x11, 0x11, 0x0a, 0x04], // 'V'
    [0x11, 0x11, 0x11, 0x15, 0x15, 0x1b, 0x11], // 'W'
    [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11], // 'X'
    [0x11, 0x11, 0x0a, 0x04, 0x04, 0x04, 0x04], // 'Y'
    [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f], // 'Z'
    [0x0e, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0e], // '['
    [0x10, 0x08, 0x04, 0x02, 0x01, 0x00, 0x00], // '\\'
    [0x0e, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0e], // ']'
    [0x04, 0x0a, 0x11, 0x00, 0x00, 0x00, 0x00], // '^'
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1f], // '_'
];

/// Row bitmasks of the glyph drawn for `ch`.
pub fn glyph_rows(ch: char) -> &'static [u8; 7] {
    glyph_index(ch).map_or(&MISSING, |i| &GLYPHS[i])
}

/// Whether `ch` has its own glyph.
pub fn has_glyph(ch: char) -> bool {
    glyph_index(ch).is_some()
}

fn glyph_index(ch: char) -> Option<usize> {
    let code = ch.to_ascii_uppercase() as u32;
    code.checked_sub(FIRST)
        .map(|i| i as usize)
        .filter(|&i| i < GLYPHS.len())
}

/// Size of one font unit at `size` px.
pub fn unit(size: f32) -> f32 {
    size * UNITS_PER_PX
}

/// Advance width of one character.
pub fn advance(size: f32) -> f32 {
    ADVANCE_UNITS as f32 * unit(size)
}

/// Draw `ch` with its cell's top-left corner at `(x, top)`.
pub fn draw_glyph(target: &mut Bitmap, ch: char, x: f32, top: f32, size: f32, color: Rgba) {
    let rows = glyph_rows(ch);
    let unit = unit(size);
    if unit <= 0.0 {
        return;
    }

    let x0 = x.floor() as i64;
    let y0 = top.floor() as i64;
    let x1 = (x + CELL_WIDTH as f32 * unit).ceil() as i64;
    let y1 = (top + CELL_HEIGHT as f32 * unit).ceil() as i64;

    for py in y0..y1 {
        let gy = ((py as f32 + 0.5 - top) / unit).floor();
        if gy < 0.0 || gy >= CELL_HEIGHT as f32 {
            continue;
        }
        let row = rows[gy as usize];
        for px in x0..x1 {
            let gx = ((px as f32 + 0.5 - x) / unit).floor();
            if gx < 0.0 || gx >= CELL_WIDTH as f32 {
                continue;
            }
            if row & (0x10 >> gx as u32) != 0 {
                target.blend_over(px, py, color, 1.0);
            }
        }
    }
}
