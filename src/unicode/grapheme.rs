//! Grapheme cluster iteration.

use crate::unicode::width::{WidthMethod, display_width_with_method};
use unicode_segmentation::UnicodeSegmentation;

/// Grapheme metadata for layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GraphemeInfo {
    /// Byte offset of the cluster in the source string.
    pub byte_offset: usize,
    /// Byte length of the cluster.
    pub byte_len: usize,
    /// Column where the cluster starts, counted from the start of its line.
    pub col_offset: u32,
    /// Display width in columns (tabs expand to the next stop, line breaks are 0).
    pub width: u32,
}

/// Iterate over extended grapheme clusters in a string.
pub fn graphemes(s: &str) -> impl Iterator<Item = &str> {
    s.graphemes(true)
}

/// Iterate over grapheme clusters with byte indices.
pub fn grapheme_indices(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.grapheme_indices(true)
}

/// Whether a cluster ends a line (`\n`, `\r\n`, or a lone `\r`).
#[must_use]
pub fn is_line_break(grapheme: &str) -> bool {
    matches!(grapheme, "\n" | "\r\n" | "\r")
}

/// Compute grapheme info for a string.
///
/// Columns restart at zero after every line break so tab stops stay
/// aligned per line.
#[must_use]
pub fn grapheme_info(s: &str, tab_width: u32, method: WidthMethod) -> Vec<GraphemeInfo> {
    let mut infos = Vec::new();
    let mut col = 0u32;
    let tab_width = tab_width.max(1);

    for (byte_offset, grapheme) in s.grapheme_indices(true) {
        let width = if grapheme == "\t" {
            tab_width - (col % tab_width)
        } else if is_line_break(grapheme) {
            0
        } else {
            u32::try_from(display_width_with_method(grapheme, method)).unwrap_or(u32::MAX)
        };

        infos.push(GraphemeInfo {
            byte_offset,
            byte_len: grapheme.len(),
            col_offset: col,
            width,
        });

        if is_line_break(grapheme) {
            col = 0;
        } else {
            col = col.saturating_add(width);
        }
    }

    infos
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphemes_ascii() {
        let g: Vec<_> = graphemes("hello").collect();
        assert_eq!(g, vec!["h", "e", "l", "l", "o"]);
    }

    #[test]
    fn test_graphemes_emoji() {
        // Family emoji (ZWJ sequence)
        assert_eq!(graphemes("👨‍👩‍👧").count(), 1);
        // Thumbs up with skin tone modifier
        assert_eq!(graphemes("👍🏽").count(), 1);
    }

    #[test]
    fn test_graphemes_combining() {
        // e + combining acute accent
        assert_eq!(graphemes("e\u{0301}").count(), 1);
    }

    #[test]
    fn test_crlf_is_one_line_break() {
        let g: Vec<_> = graphemes("a\r\nb").collect();
        assert_eq!(g, vec!["a", "\r\n", "b"]);
        assert!(is_line_break(g[1]));
        assert!(!is_line_break("a"));
    }

    #[test]
    fn test_grapheme_info_tabs() {
        let infos = grapheme_info("ab\tc", 4, WidthMethod::WcWidth);
        assert_eq!(infos.len(), 4);
        assert_eq!(infos[2].col_offset, 2);
        assert_eq!(infos[2].width, 2);
        assert_eq!(infos[3].col_offset, 4);
    }

    #[test]
    fn test_grapheme_info_resets_column_after_newline() {
        let infos = grapheme_info("ab\ncd", 4, WidthMethod::WcWidth);
        assert_eq!(infos[2].width, 0);
        assert_eq!(infos[3].col_offset, 0);
        assert_eq!(infos[4].col_offset, 1);
    }

    #[test]
    fn test_grapheme_info_byte_offsets() {
        let infos = grapheme_info("é漢", 4, WidthMethod::WcWidth);
        assert_eq!(infos[0].byte_offset, 0);
        assert_eq!(infos[0].byte_len, 2);
        assert_eq!(infos[1].byte_offset, 2);
        assert_eq!(infos[1].width, 2);
    }
}
