//! Buffered ANSI frame writer with state tracking.

use crate::ansi::{self, sequences};
use crate::buffer::FrameBuffer;
use crate::cell::Cell;
use crate::color::Rgba;
use crate::error::Result;
use crate::style::TextAttributes;
use std::io::Write;

/// Buffered writer that serialises [`FrameBuffer`] frames as true-color ANSI.
///
/// Colors and attributes are only emitted when they change between cells.
/// Translucent cells are composited over [`background`](Self::background)
/// since terminals have no alpha.
pub struct AnsiWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    background: Rgba,

    current_fg: Option<Rgba>,
    current_bg: Option<Rgba>,
    current_attrs: TextAttributes,
}

impl<W: Write> AnsiWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(8192),
            background: Rgba::BLACK,
            current_fg: None,
            current_bg: None,
            current_attrs: TextAttributes::empty(),
        }
    }

    /// Color translucent cells are composited over (opaque black by default).
    #[must_use]
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background.with_alpha(1.0);
        self
    }

    #[must_use]
    pub fn background(&self) -> Rgba {
        self.background
    }

    /// Forget the tracked terminal state; the next cell re-emits everything.
    pub fn reset_state(&mut self) {
        self.current_fg = None;
        self.current_bg = None;
        self.current_attrs = TextAttributes::empty();
    }

    /// Queue a raw string (e.g. one of [`sequences`]).
    pub fn write_str(&mut self, s: &str) {
        self.buffer.extend_from_slice(s.as_bytes());
    }

    /// Queue a whole frame with its top-left corner at the screen origin.
    pub fn write_frame(&mut self, frame: &FrameBuffer) {
        self.write_frame_at(frame, 0, 0);
    }

    /// Queue a whole frame with its top-left corner at `(row, col)`.
    pub fn write_frame_at(&mut self, frame: &FrameBuffer, row: u32, col: u32) {
        for y in 0..frame.height() {
            let _ = ansi::write_cursor_position(&mut self.buffer, row + y, col);
            for x in 0..frame.width() {
                if let Some(cell) = frame.get(x, y) {
                    self.write_cell(cell);
                }
            }
        }
        self.write_str(sequences::RESET);
        self.reset_state();
    }

    fn write_cell(&mut self, cell: &Cell) {
        if cell.is_continuation() {
            return;
        }
        let bg = cell.bg.blend_over(self.background);
        let fg = cell.fg.blend_over(bg);

        self.set_attributes(cell.attributes);
        self.set_bg(bg);
        self.set_fg(fg);
        self.buffer.extend_from_slice(cell.symbol().as_bytes());
    }

    fn set_attributes(&mut self, attrs: TextAttributes) {
        if self.current_attrs == attrs {
            return;
        }
        // Turning attributes off has no single portable code; reset instead.
        if !(self.current_attrs - attrs).is_empty() {
            self.write_str(sequences::RESET);
            self.reset_state();
        }
        let _ = ansi::write_attributes(&mut self.buffer, attrs - self.current_attrs);
        self.current_attrs = attrs;
    }

    fn set_fg(&mut self, color: Rgba) {
        if self.current_fg != Some(color) {
            let _ = ansi::write_fg_color(&mut self.buffer, color);
            self.current_fg = Some(color);
        }
    }

    fn set_bg(&mut self, color: Rgba) {
        if self.current_bg != Some(color) {
            let _ = ansi::write_bg_color(&mut self.buffer, color);
            self.current_bg = Some(color);
        }
    }

    /// Bytes queued but not yet flushed.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Write queued bytes to the underlying writer and flush it.
    pub fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.writer.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        self.writer.flush()?;
        Ok(())
    }

    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
