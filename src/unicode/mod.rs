//! Unicode utilities for grapheme segmentation and display width.
//!
//! Layout measures every cluster in terminal columns; these helpers wrap
//! `unicode-segmentation` and `unicode-width` behind one width policy.

mod grapheme;
mod width;

pub use grapheme::{GraphemeInfo, grapheme_indices, grapheme_info, graphemes, is_line_break};
pub use width::{
    WidthMethod, display_width, display_width_char, display_width_with_method, is_wide,
    is_zero_width,
};
