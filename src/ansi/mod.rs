//! ANSI escape sequence generation.
//!
//! Only what a full-frame true-color redraw needs: cursor positioning,
//! 24-bit SGR colors and the attributes [`TextAttributes`] can carry.

mod output;
pub mod sequences;

pub use output::AnsiWriter;

use crate::color::Rgba;
use crate::style::TextAttributes;
use std::io::{self, Write};

/// Write a u8 as decimal digits without formatting overhead.
#[inline]
fn write_u8_decimal(w: &mut impl Write, n: u8) -> io::Result<()> {
    if n >= 100 {
        w.write_all(&[b'0' + n / 100, b'0' + (n / 10) % 10, b'0' + n % 10])
    } else if n >= 10 {
        w.write_all(&[b'0' + n / 10, b'0' + n % 10])
    } else {
        w.write_all(&[b'0' + n])
    }
}

/// Write a u32 as decimal digits.
#[inline]
fn write_u32_decimal(w: &mut impl Write, n: u32) -> io::Result<()> {
    if let Ok(small) = u8::try_from(n) {
        return write_u8_decimal(w, small);
    }
    let mut buf = [0u8; 10];
    let mut i = buf.len();
    let mut val = n;
    while val > 0 {
        i -= 1;
        buf[i] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    w.write_all(&buf[i..])
}

fn write_rgb(w: &mut impl Write, prefix: &[u8], color: Rgba) -> io::Result<()> {
    let (r, g, b) = color.to_rgb_u8();
    w.write_all(prefix)?;
    write_u8_decimal(w, r)?;
    w.write_all(b";")?;
    write_u8_decimal(w, g)?;
    w.write_all(b";")?;
    write_u8_decimal(w, b)?;
    w.write_all(b"m")
}

/// `ESC[38;2;r;g;bm`. Alpha is ignored; blend before calling.
pub fn write_fg_color(w: &mut impl Write, color: Rgba) -> io::Result<()> {
    write_rgb(w, b"\x1b[38;2;", color)
}

/// `ESC[48;2;r;g;bm`.
pub fn write_bg_color(w: &mut impl Write, color: Rgba) -> io::Result<()> {
    write_rgb(w, b"\x1b[48;2;", color)
}

/// Move the cursor to a 0-indexed `(row, col)`.
pub fn write_cursor_position(w: &mut impl Write, row: u32, col: u32) -> io::Result<()> {
    w.write_all(b"\x1b[")?;
    write_u32_decimal(w, row.saturating_add(1))?;
    w.write_all(b";")?;
    write_u32_decimal(w, col.saturating_add(1))?;
    w.write_all(b"H")
}

/// SGR codes for each attribute, in output order.
const ATTRIBUTE_CODES: [(TextAttributes, &[u8]); 5] = [
    (TextAttributes::BOLD, b"1"),
    (TextAttributes::DIM, b"2"),
    (TextAttributes::ITALIC, b"3"),
    (TextAttributes::UNDERLINE, b"4"),
    (TextAttributes::STRIKETHROUGH, b"9"),
];

/// Write one SGR sequence enabling `attrs`. Writes nothing if empty.
pub fn write_attributes(w: &mut impl Write, attrs: TextAttributes) -> io::Result<()> {
    if attrs.is_empty() {
        return Ok(());
    }
    w.write_all(b"\x1b[")?;
    let mut first = true;
    for (flag, code) in ATTRIBUTE_CODES {
        if attrs.contains(flag) {
            if !first {
                w.write_all(b";")?;
            }
            w.write_all(code)?;
            first = false;
        }
    }
    w.write_all(b"m")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_true_color_sequences() {
        assert_eq!(
            written(|w| write_fg_color(w, Rgba::from_rgb_u8(255, 128, 0))),
            "\x1b[38;2;255;128;0m"
        );
        assert_eq!(
            written(|w| write_bg_color(w, Rgba::BLACK)),
            "\x1b[48;2;0;0;0m"
        );
    }

    #[test]
    fn test_cursor_position_is_one_based() {
        assert_eq!(written(|w| write_cursor_position(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(written(|w| write_cursor_position(w, 9, 1234)), "\x1b[10;1235H");
    }

    #[test]
    fn test_attributes_combined() {
        let attrs = TextAttributes::BOLD | TextAttributes::UNDERLINE;
        assert_eq!(written(|w| write_attributes(w, attrs)), "\x1b[1;4m");
        assert_eq!(written(|w| write_attributes(w, TextAttributes::empty())), "");
    }

    #[test]
    fn test_decimal_writer() {
        assert_eq!(written(|w| write_u32_decimal(w, 0)), "0");
        assert_eq!(written(|w| write_u32_decimal(w, 255)), "255");
        assert_eq!(written(|w| write_u32_decimal(w, 256)), "256");
        assert_eq!(written(|w| write_u32_decimal(w, u32::MAX)), "4294967295");
    }
}
