//! Text layout: turning a string into positioned grapheme clusters.
//!
//! [`TextFormat`] is the immutable formatting configuration; a
//! [`LayoutService`] applies it to a string inside a box and returns a
//! [`TextLayout`]. [`MonospaceLayout`] lays text out on a terminal cell
//! grid.

mod monospace;

pub use monospace::MonospaceLayout;

use crate::buffer::FrameBuffer;
use crate::cluster::GraphemeCluster;
use crate::color::Rgba;
use crate::style::Style;
use crate::unicode::WidthMethod;

/// Horizontal alignment of each line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlignment {
    #[default]
    Left,
    Right,
    Center,
    /// Widen inter-word gaps to fill the box; the last line stays left.
    Justify,
}

/// Vertical placement of the block of lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Reading direction within a line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowDirection {
    #[default]
    LeftToRight,
    /// Mirror cluster positions within the box.
    RightToLeft,
}

/// What to do with text that does not fit the box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextTrimming {
    /// Produce every cluster, even outside the box.
    #[default]
    None,
    /// Drop clusters past the edge.
    Clip,
    /// Stop at the last fitting cluster and draw the trimming sign there.
    CharacterEllipsis,
    /// Like `CharacterEllipsis`, but back up to the last word break.
    WordEllipsis,
}

impl TextTrimming {
    #[must_use]
    pub fn uses_sign(self) -> bool {
        matches!(self, Self::CharacterEllipsis | Self::WordEllipsis)
    }
}

/// Line wrapping mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextWrapping {
    /// Only hard line breaks start new lines.
    #[default]
    NoWrap,
    /// Break after the last whitespace that fits, or mid-word if none.
    Word,
    /// Break at any cluster boundary.
    Character,
}

/// Formatting for laying out text.
///
/// # Examples
///
/// ```
/// use textfx::layout::{TextAlignment, TextFormat, TextWrapping};
///
/// let format = TextFormat::default()
///     .with_alignment(TextAlignment::Center)
///     .with_wrapping(TextWrapping::Word);
/// assert_eq!(format.trimming_sign, "…");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TextFormat {
    pub alignment: TextAlignment,
    pub vertical_alignment: VerticalAlignment,
    pub direction: FlowDirection,
    pub trimming: TextTrimming,
    pub wrapping: TextWrapping,
    pub tab_width: u32,
    pub width_method: WidthMethod,
    /// Base style every cluster is drawn with.
    pub style: Style,
    pub trimming_sign: String,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            alignment: TextAlignment::Left,
            vertical_alignment: VerticalAlignment::Center,
            direction: FlowDirection::LeftToRight,
            trimming: TextTrimming::None,
            wrapping: TextWrapping::NoWrap,
            tab_width: 4,
            width_method: WidthMethod::WcWidth,
            style: Style::fg(Rgba::WHITE),
            trimming_sign: "\u{2026}".to_string(),
        }
    }
}

impl TextFormat {
    #[must_use]
    pub fn with_alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_trimming(mut self, trimming: TextTrimming) -> Self {
        self.trimming = trimming;
        self
    }

    #[must_use]
    pub fn with_wrapping(mut self, wrapping: TextWrapping) -> Self {
        self.wrapping = wrapping;
        self
    }

    #[must_use]
    pub fn with_tab_width(mut self, tab_width: u32) -> Self {
        self.tab_width = tab_width.max(1);
        self
    }

    #[must_use]
    pub fn with_width_method(mut self, method: WidthMethod) -> Self {
        self.width_method = method;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_trimming_sign(mut self, sign: impl Into<String>) -> Self {
        self.trimming_sign = sign.into();
        self
    }
}

/// Lays out a string as positioned clusters.
///
/// Implementations must yield clusters in logical order, mark a trailing
/// truncated cluster with `is_trimmed`, and return the same result for the
/// same inputs.
pub trait LayoutService {
    fn layout(&self, text: &str, format: &TextFormat, width: u32, height: u32) -> TextLayout;
}

/// Result of laying out one string.
#[derive(Clone, Debug)]
pub struct TextLayout {
    clusters: Vec<GraphemeCluster>,
    width: u32,
    height: u32,
    line_count: usize,
    format: TextFormat,
}

impl TextLayout {
    #[must_use]
    pub fn new(
        clusters: Vec<GraphemeCluster>,
        width: u32,
        height: u32,
        line_count: usize,
        format: TextFormat,
    ) -> Self {
        Self {
            clusters,
            width,
            height,
            line_count,
            format,
        }
    }

    #[must_use]
    pub fn clusters(&self) -> &[GraphemeCluster] {
        &self.clusters
    }

    #[must_use]
    pub fn into_clusters(self) -> Vec<GraphemeCluster> {
        self.clusters
    }

    /// Box size `(width, height)` in cells.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    #[must_use]
    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    /// Text drawn in place of a trimmed cluster.
    #[must_use]
    pub fn trimming_sign(&self) -> &str {
        &self.format.trimming_sign
    }

    /// Whether layout stopped early at a trimming sign.
    #[must_use]
    pub fn is_trimmed(&self) -> bool {
        self.clusters.last().is_some_and(|c| c.is_trimmed)
    }

    /// The text a cluster is drawn as.
    #[must_use]
    pub fn display_text<'a>(&'a self, cluster: &'a GraphemeCluster) -> &'a str {
        if cluster.is_trimmed {
            self.trimming_sign()
        } else {
            &cluster.characters
        }
    }

    /// Draw every cluster at rest, in the format's style.
    pub fn draw(&self, buffer: &mut FrameBuffer) {
        for cluster in &self.clusters {
            buffer.draw_cluster(
                cluster.layout_bounds.x,
                cluster.layout_bounds.y,
                self.display_text(cluster),
                self.format.style,
            );
        }
    }
}
