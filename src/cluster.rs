//! Grapheme cluster model.
//!
//! A [`GraphemeCluster`] is one user-perceived character as produced by a
//! [`LayoutService`](crate::layout::LayoutService): the text it covers, where
//! it sits in the source string, its geometry in layout space (terminal
//! cells), and its animation state.
//!
//! The animation fields are only written by the
//! [`AnimationScheduler`](crate::animation::AnimationScheduler); everything
//! else treats clusters as read-only.

/// Axis-aligned rectangle in layout space, measured in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Rectangle at the origin with no extent.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point `(x, y)`.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// The same rectangle shifted by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// One user-perceived character and its animation state.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphemeCluster {
    /// Exact substring this cluster covers.
    pub characters: String,
    /// Byte offset in the source string.
    pub offset: usize,
    /// Byte length in the source string.
    pub length: usize,
    /// Bounds as laid out, in cells.
    pub layout_bounds: Rect,
    /// Anchor rectangle adjusted for horizontal alignment.
    ///
    /// `(draw_bounds.x, draw_bounds.y)` is the pivot effects scale and
    /// move around; the glyph itself is placed at `layout_bounds`.
    pub draw_bounds: Rect,
    /// Set on the last cluster before a truncation point; effects draw the
    /// layout's trimming sign in its place.
    pub is_trimmed: bool,
    progress: f32,
    animation_finished: bool,
}

impl GraphemeCluster {
    /// Create a cluster whose draw bounds equal its layout bounds.
    #[must_use]
    pub fn new(characters: impl Into<String>, offset: usize, length: usize, bounds: Rect) -> Self {
        Self {
            characters: characters.into(),
            offset,
            length,
            layout_bounds: bounds,
            draw_bounds: bounds,
            is_trimmed: false,
            progress: 0.0,
            animation_finished: false,
        }
    }

    /// Cluster with only text, for diffing without geometry.
    #[must_use]
    pub fn from_text(characters: &str) -> Self {
        Self::new(characters, 0, characters.len(), Rect::ZERO)
    }

    #[must_use]
    pub fn with_draw_bounds(mut self, draw_bounds: Rect) -> Self {
        self.draw_bounds = draw_bounds;
        self
    }

    #[must_use]
    pub fn with_trimmed(mut self, trimmed: bool) -> Self {
        self.is_trimmed = trimmed;
        self
    }

    /// Animation progress in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether this cluster's animation has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.animation_finished
    }

    /// Content equality used by the diff engine.
    ///
    /// Two clusters are equal when they cover the same text and agree on
    /// whether they stand in for a trimming sign. Geometry is ignored.
    #[must_use]
    pub fn content_eq(&self, other: &GraphemeCluster) -> bool {
        self.characters == other.characters && self.is_trimmed == other.is_trimmed
    }

    pub(crate) fn set_progress(&mut self, progress: f32) {
        self.progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub(crate) fn finish(&mut self) {
        self.progress = 1.0;
        self.animation_finished = true;
    }

    pub(crate) fn reset_animation(&mut self) {
        self.progress = 0.0;
        self.animation_finished = false;
    }
}

/// Build text-only clusters from a string, one per grapheme.
///
/// Offsets and lengths are filled in; bounds are zero.
#[must_use]
pub fn clusters_from_text(text: &str) -> Vec<GraphemeCluster> {
    crate::unicode::grapheme_indices(text)
        .map(|(offset, g)| GraphemeCluster::new(g, offset, g.len(), Rect::ZERO))
        .collect()
}
