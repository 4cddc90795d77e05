//! Text styling with attributes and colors.
//!
//! - [`TextAttributes`]: bitflags for bold, dim, italic, underline
//! - [`Style`]: colors plus attributes, cheap to copy
//!
//! Effects derive per-cluster styles from the base style in the
//! [`TextFormat`](crate::layout::TextFormat): opacity scales the foreground
//! alpha, and [`TextAttributes::BOLD`] / [`TextAttributes::DIM`] stand in
//! for glyph scaling on a cell grid.
//!
//! # Examples
//!
//! ```
//! use textfx::{Rgba, Style};
//!
//! let base = Style::fg(Rgba::WHITE).with_bg(Rgba::BLACK);
//! let ghost = base.with_fg_alpha(0.25).with_dim();
//! assert_eq!(ghost.bg, Some(Rgba::BLACK));
//! ```

use crate::color::Rgba;
use bitflags::bitflags;

bitflags! {
    /// Text rendering attributes.
    ///
    /// Attributes combine with bitwise OR. Not all terminals support all of them.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TextAttributes: u8 {
        /// Bold/increased intensity.
        const BOLD          = 0x01;
        /// Dim/decreased intensity.
        const DIM           = 0x02;
        /// Italic (not widely supported).
        const ITALIC        = 0x04;
        /// Underlined text.
        const UNDERLINE     = 0x08;
        /// Strikethrough text.
        const STRIKETHROUGH = 0x10;
    }
}

/// Complete text style: colors and attributes.
///
/// `None` for a color means "use the terminal default".
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Style {
    /// Foreground color (None = terminal default).
    pub fg: Option<Rgba>,
    /// Background color (None = terminal default).
    pub bg: Option<Rgba>,
    /// Text rendering attributes.
    pub attributes: TextAttributes,
}

impl Style {
    /// Empty style with no colors or attributes.
    pub const NONE: Self = Self {
        fg: None,
        bg: None,
        attributes: TextAttributes::empty(),
    };

    /// Create a style with only foreground color.
    #[must_use]
    pub const fn fg(color: Rgba) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            attributes: TextAttributes::empty(),
        }
    }

    /// Create a style with only background color.
    #[must_use]
    pub const fn bg(color: Rgba) -> Self {
        Self {
            fg: None,
            bg: Some(color),
            attributes: TextAttributes::empty(),
        }
    }

    /// Return a new style with the specified foreground color.
    #[must_use]
    pub const fn with_fg(self, color: Rgba) -> Self {
        Self {
            fg: Some(color),
            ..self
        }
    }

    /// Return a new style with the specified background color.
    #[must_use]
    pub const fn with_bg(self, color: Rgba) -> Self {
        Self {
            bg: Some(color),
            ..self
        }
    }

    /// Return a new style with the specified attributes added.
    #[must_use]
    pub const fn with_attributes(self, attrs: TextAttributes) -> Self {
        Self {
            attributes: self.attributes.union(attrs),
            ..self
        }
    }

    /// Return a new style with the bold attribute added.
    #[must_use]
    pub const fn with_bold(self) -> Self {
        self.with_attributes(TextAttributes::BOLD)
    }

    /// Return a new style with the dim attribute added.
    #[must_use]
    pub const fn with_dim(self) -> Self {
        self.with_attributes(TextAttributes::DIM)
    }

    /// Scale the foreground alpha, defaulting an unset foreground to white.
    #[must_use]
    pub fn with_fg_alpha(self, factor: f32) -> Self {
        let fg = self.fg.unwrap_or(Rgba::WHITE).multiply_alpha(factor);
        self.with_fg(fg)
    }

    /// Check if this style has any non-default properties.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attributes.is_empty()
    }

    /// Merge two styles, with `other` taking precedence for set values.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attributes: self.attributes | other.attributes,
        }
    }
}
