//! Opacity stack for layered effect drawing.
//!
//! Effects open one layer per cluster (the cell-grid analogue of a
//! per-glyph drawing layer); nested layers multiply.

/// Stack of opacity values that multiply together.
#[derive(Clone, Debug)]
pub struct OpacityStack {
    stack: Vec<f32>,
    current: f32,
}

impl OpacityStack {
    /// Create a new opacity stack with full opacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: Vec::new(),
            current: 1.0,
        }
    }

    /// Push an opacity layer. Non-finite values count as fully transparent.
    pub fn push(&mut self, opacity: f32) {
        let opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.stack.push(self.current);
        self.current *= opacity;
    }

    /// Pop the top layer. Popping an empty stack is a no-op.
    pub fn pop(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.current = prev;
        }
    }

    /// Clear the stack, resetting to full opacity.
    pub fn clear(&mut self) {
        self.stack.clear();
        self.current = 1.0;
    }

    /// Number of open layers.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Get the current combined opacity value.
    #[must_use]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Check if current opacity is fully opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.current >= 1.0
    }

    /// Check if current opacity is fully transparent.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.current <= 0.0
    }
}

impl Default for OpacityStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_layers_multiply_and_restore() {
        let mut s = OpacityStack::new();
        s.push(0.8);
        s.push(0.5);
        assert!((s.current() - 0.4).abs() < 1e-6);
        assert_eq!(s.depth(), 2);
        s.pop();
        assert!((s.current() - 0.8).abs() < 1e-6);
        s.pop();
        assert_eq!(s.current(), 1.0);
        assert!(s.is_opaque());
    }

    #[test]
    fn test_clamping_and_nan() {
        let mut s = OpacityStack::new();
        s.push(2.0);
        assert_eq!(s.current(), 1.0);
        s.push(f32::NAN);
        assert!(s.is_transparent());
        s.clear();
        assert_eq!(s.depth(), 0);
        assert!(s.is_opaque());
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut s = OpacityStack::default();
        s.pop();
        assert_eq!(s.current(), 1.0);
    }
}
