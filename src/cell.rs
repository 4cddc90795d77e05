//! Terminal cell type representing a single character position.
//!
//! A [`FrameBuffer`](crate::FrameBuffer) is a grid of cells. Each cell holds
//! one grapheme cluster (or nothing) with its colors and attributes. Wide
//! clusters (CJK, most emoji) occupy two cells: the first carries the content,
//! the second is a [`CellContent::Continuation`].
//!
//! # Examples
//!
//! ```
//! use textfx::{Cell, Rgba, Style};
//!
//! let cell = Cell::new('A', Style::fg(Rgba::GREEN));
//! assert_eq!(cell.display_width(), 1);
//!
//! let emoji = Cell::from_grapheme("👍🏽", Style::NONE);
//! assert_eq!(emoji.display_width(), 2);
//! assert_eq!(emoji.symbol(), "👍🏽");
//! ```

use crate::color::Rgba;
use crate::style::{Style, TextAttributes};
use crate::unicode::{display_width, display_width_char};
use std::borrow::Cow;

/// Content of a terminal cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CellContent {
    /// Single-codepoint character.
    Char(char),
    /// Multi-codepoint grapheme cluster (emoji sequences, combining marks).
    Grapheme(Box<str>),
    /// Empty/cleared cell.
    #[default]
    Empty,
    /// Continuation of a wide cluster from the previous cell.
    Continuation,
}

impl CellContent {
    /// Get the display width of this content.
    #[must_use]
    pub fn display_width(&self) -> usize {
        match self {
            Self::Char(c) => display_width_char(*c),
            Self::Grapheme(s) => display_width(s),
            Self::Empty => 1,
            Self::Continuation => 0,
        }
    }

    /// Check if this is a continuation cell.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        matches!(self, Self::Continuation)
    }

    /// Check if this is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The text this content renders as (`" "` for empty, `""` for continuation).
    #[must_use]
    pub fn symbol(&self) -> Cow<'_, str> {
        match self {
            Self::Char(c) => Cow::Owned(c.to_string()),
            Self::Grapheme(s) => Cow::Borrowed(s),
            Self::Empty => Cow::Borrowed(" "),
            Self::Continuation => Cow::Borrowed(""),
        }
    }
}

/// A single terminal cell with content and styling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    /// The character or grapheme content.
    pub content: CellContent,
    /// Foreground color.
    pub fg: Rgba,
    /// Background color.
    pub bg: Rgba,
    /// Text rendering attributes.
    pub attributes: TextAttributes,
}

impl Cell {
    /// Create a new cell with a single character.
    #[must_use]
    pub fn new(ch: char, style: Style) -> Self {
        Self {
            content: CellContent::Char(ch),
            fg: style.fg.unwrap_or(Rgba::WHITE),
            bg: style.bg.unwrap_or(Rgba::TRANSPARENT),
            attributes: style.attributes,
        }
    }

    /// Create a cell from a grapheme cluster string.
    ///
    /// Single-codepoint strings become [`CellContent::Char`]; an empty string
    /// becomes [`CellContent::Empty`].
    #[must_use]
    pub fn from_grapheme(s: &str, style: Style) -> Self {
        let mut chars = s.chars();
        let content = match (chars.next(), chars.next()) {
            (None, _) => CellContent::Empty,
            (Some(c), None) => CellContent::Char(c),
            _ => CellContent::Grapheme(s.into()),
        };

        Self {
            content,
            fg: style.fg.unwrap_or(Rgba::WHITE),
            bg: style.bg.unwrap_or(Rgba::TRANSPARENT),
            attributes: style.attributes,
        }
    }

    /// Create a cleared/empty cell with the specified background.
    #[must_use]
    pub fn clear(bg: Rgba) -> Self {
        Self {
            content: CellContent::Empty,
            fg: Rgba::WHITE,
            bg,
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a continuation cell (placeholder for wide clusters).
    #[must_use]
    pub fn continuation(bg: Rgba) -> Self {
        Self {
            content: CellContent::Continuation,
            fg: Rgba::WHITE,
            bg,
            attributes: TextAttributes::empty(),
        }
    }

    /// Get the display width of this cell.
    #[must_use]
    pub fn display_width(&self) -> usize {
        self.content.display_width()
    }

    /// Check if this is a continuation cell.
    #[must_use]
    pub fn is_continuation(&self) -> bool {
        self.content.is_continuation()
    }

    /// Check if this cell is empty/cleared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// The text this cell renders as.
    #[must_use]
    pub fn symbol(&self) -> Cow<'_, str> {
        self.content.symbol()
    }

    /// Scale this cell's colors by a global opacity factor.
    pub fn blend_with_opacity(&mut self, opacity: f32) {
        self.fg = self.fg.multiply_alpha(opacity);
        self.bg = self.bg.multiply_alpha(opacity);
    }

    /// Blend this cell over a background cell using alpha compositing.
    ///
    /// Non-empty content replaces the background's content unless its
    /// foreground is fully transparent.
    #[must_use]
    pub fn blend_over(self, background: &Cell) -> Cell {
        let keep_background = self.content.is_empty() || self.fg.is_transparent();
        let (content, attributes) = if keep_background {
            (background.content.clone(), background.attributes)
        } else {
            (self.content, self.attributes)
        };
        let fg = if keep_background {
            background.fg
        } else {
            self.fg.blend_over(background.bg)
        };

        Cell {
            content,
            fg,
            bg: self.bg.blend_over(background.bg),
            attributes,
        }
    }
}
