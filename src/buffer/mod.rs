//! Cell-based frame buffer with alpha blending.
//!
//! [`FrameBuffer`] is the draw target handed to effects. It is a 2D grid of
//! cells that supports:
//!
//! - **Text drawing**: whole strings or single clusters at fractional positions
//! - **Opacity stacking**: fade groups of draw calls
//! - **Alpha blending**: Porter-Duff "over" compositing per cell
//!
//! # Examples
//!
//! ```
//! use textfx::{FrameBuffer, Rgba, Style};
//!
//! let mut buf = FrameBuffer::new(20, 3);
//! buf.clear(Rgba::BLACK);
//! buf.draw_text(0, 1, "hello", Style::fg(Rgba::WHITE));
//!
//! buf.push_opacity(0.5);
//! buf.draw_cluster(6.4, 1.0, "!", Style::fg(Rgba::WHITE));
//! buf.pop_opacity();
//!
//! assert_eq!(buf.row_text(1).trim_end(), "hello !");
//! ```

mod opacity;

pub use opacity::OpacityStack;

use crate::cell::Cell;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::style::Style;
use crate::unicode::{graphemes, is_line_break};

/// Cell grid that effects draw into.
///
/// Coordinates are (x, y) with (0, 0) at the top-left corner.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    cells: Vec<Cell>,
    opacity_stack: OpacityStack,
}

impl FrameBuffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// Zero dimensions are clamped to 1.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let size = (width as usize).saturating_mul(height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::clear(Rgba::TRANSPARENT); size],
            opacity_stack: OpacityStack::new(),
        }
    }

    /// Create a buffer, rejecting zero dimensions.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self::new(width, height))
    }

    /// Get buffer dimensions.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get buffer width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get buffer height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn cell_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let row_offset = (y as usize).checked_mul(self.width as usize)?;
        row_offset.checked_add(x as usize)
    }

    /// Get cell at position.
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<&Cell> {
        self.cell_index(x, y).and_then(|idx| self.cells.get(idx))
    }

    /// Set cell at position, replacing it (after applying the current opacity).
    pub fn set(&mut self, x: u32, y: u32, mut cell: Cell) {
        let opacity = self.opacity_stack.current();
        if opacity < 1.0 {
            cell.blend_with_opacity(opacity);
        }
        if let Some(dest) = self.cell_index(x, y).and_then(|idx| self.cells.get_mut(idx)) {
            *dest = cell;
        }
    }

    /// Set cell with alpha blending over existing content.
    pub fn set_blended(&mut self, x: u32, y: u32, mut cell: Cell) {
        let opacity = self.opacity_stack.current();
        if opacity < 1.0 {
            cell.blend_with_opacity(opacity);
        }
        if let Some(dest) = self.cell_index(x, y).and_then(|idx| self.cells.get_mut(idx)) {
            *dest = cell.blend_over(dest);
        }
    }

    /// Clear entire buffer with background color.
    pub fn clear(&mut self, bg: Rgba) {
        self.cells.fill(Cell::clear(bg));
    }

    /// Draw text at a cell position, handling grapheme clusters and wide characters.
    ///
    /// Line breaks are skipped; callers position each line themselves.
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, style: Style) {
        let mut col = x;
        for grapheme in graphemes(text) {
            if is_line_break(grapheme) {
                continue;
            }
            col = col.saturating_add(self.put_cluster(col, y, grapheme, style));
        }
    }

    /// Draw one cluster at a fractional layout position.
    ///
    /// The position is rounded to the nearest cell; clusters that land
    /// outside the grid are dropped.
    pub fn draw_cluster(&mut self, x: f32, y: f32, text: &str, style: Style) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        let (col, row) = (x.round(), y.round());
        if col < 0.0 || row < 0.0 || col >= self.width as f32 || row >= self.height as f32 {
            return;
        }
        if is_line_break(text) {
            return;
        }
        self.put_cluster(col as u32, row as u32, text, style);
    }

    /// Write one cluster and its continuation cells. Returns columns consumed.
    fn put_cluster(&mut self, x: u32, y: u32, grapheme: &str, style: Style) -> u32 {
        let cell = Cell::from_grapheme(grapheme, style);
        let width = cell.display_width() as u32;
        if width == 0 || cell.is_empty() {
            return 0;
        }
        // A wide cluster cut by the right edge is not drawn at all.
        if x.saturating_add(width) > self.width {
            return width;
        }
        let bg = cell.bg;
        self.set_blended(x, y, cell);
        for i in 1..width {
            self.set_blended(x + i, y, Cell::continuation(bg));
        }
        width
    }

    /// Push an opacity layer; draws are faded by the product of all layers.
    pub fn push_opacity(&mut self, opacity: f32) {
        self.opacity_stack.push(opacity);
    }

    /// Pop the top opacity layer.
    pub fn pop_opacity(&mut self) {
        self.opacity_stack.pop();
    }

    /// Run `draw` inside an opacity layer.
    pub fn with_opacity<F>(&mut self, opacity: f32, draw: F)
    where
        F: FnOnce(&mut Self),
    {
        self.push_opacity(opacity);
        draw(self);
        self.pop_opacity();
    }

    /// Get the current combined opacity.
    #[must_use]
    pub fn current_opacity(&self) -> f32 {
        self.opacity_stack.current()
    }

    /// Resize buffer, clearing contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Get raw cell slice.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over cells with positions.
    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        let width = self.width as usize;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i % width) as u32, (i / width) as u32, cell))
    }

    /// The visible text of one row (continuation cells contribute nothing).
    #[must_use]
    pub fn row_text(&self, y: u32) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|cell| cell.symbol().into_owned())
            .collect()
    }

    /// The visible text of every row, trailing blanks trimmed.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellContent;

    #[test]
    fn test_buffer_creation_clamps_zero() {
        let buf = FrameBuffer::new(0, 0);
        assert_eq!(buf.size(), (1, 1));
        assert!(FrameBuffer::try_new(0, 5).is_err());
        assert_eq!(FrameBuffer::try_new(4, 2).unwrap().cells().len(), 8);
    }

    #[test]
    fn test_draw_text_ascii() {
        let mut buf = FrameBuffer::new(10, 1);
        buf.draw_text(2, 0, "abc", Style::NONE);
        assert_eq!(buf.row_text(0), "  abc     ");
    }

    #[test]
    fn test_draw_text_wide_sets_continuation() {
        let mut buf = FrameBuffer::new(6, 1);
        buf.draw_text(0, 0, "中a", Style::NONE);
        assert!(!buf.get(0, 0).unwrap().is_continuation());
        assert!(buf.get(1, 0).unwrap().is_continuation());
        assert_eq!(buf.get(2, 0).unwrap().content, CellContent::Char('a'));
        assert_eq!(buf.to_lines(), vec!["中a".to_string()]);
    }

    #[test]
    fn test_wide_cluster_at_edge_dropped() {
        let mut buf = FrameBuffer::new(3, 1);
        buf.draw_text(2, 0, "中", Style::NONE);
        assert!(buf.get(2, 0).unwrap().is_empty());
    }

    #[test]
    fn test_draw_cluster_rounds_and_clips() {
        let mut buf = FrameBuffer::new(5, 2);
        buf.draw_cluster(1.6, 0.4, "x", Style::NONE);
        assert_eq!(buf.get(2, 0).unwrap().content, CellContent::Char('x'));

        buf.draw_cluster(-0.6, 0.0, "y", Style::NONE);
        buf.draw_cluster(4.6, 0.0, "y", Style::NONE);
        buf.draw_cluster(f32::NAN, 0.0, "y", Style::NONE);
        assert!(!buf.row_text(0).contains('y'));
    }

    #[test]
    fn test_opacity_layer_fades_foreground() {
        let mut buf = FrameBuffer::new(2, 1);
        buf.clear(Rgba::BLACK);
        buf.with_opacity(0.5, |b| b.draw_cluster(0.0, 0.0, "a", Style::fg(Rgba::WHITE)));
        let cell = buf.get(0, 0).unwrap();
        assert!((cell.fg.r - 0.5).abs() < 1e-5);
        assert_eq!(cell.bg, Rgba::BLACK);
        assert!((buf.current_opacity() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_zero_opacity_leaves_cell_untouched() {
        let mut buf = FrameBuffer::new(2, 1);
        buf.draw_text(0, 0, "a", Style::NONE);
        buf.with_opacity(0.0, |b| b.draw_cluster(0.0, 0.0, "b", Style::NONE));
        assert_eq!(buf.get(0, 0).unwrap().content, CellContent::Char('a'));
    }

    #[test]
    fn test_iter_cells_positions() {
        let buf = FrameBuffer::new(3, 2);
        let last = buf.iter_cells().last().unwrap();
        assert_eq!((last.0, last.1), (2, 1));
    }
}
