//! The host that ties layout, diffing, scheduling and effects together.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use textfx::{AnimatedText, FrameBuffer, FrameTiming};
//!
//! let mut text = AnimatedText::new(20, 1);
//! text.set_text("hello");
//!
//! let mut timing = FrameTiming::default();
//! while {
//!     timing = timing.next(Duration::from_millis(16));
//!     text.update(timing);
//!     text.is_animating()
//! } {}
//!
//! let mut frame = FrameBuffer::new(20, 1);
//! text.draw(&mut frame);
//! assert_eq!(frame.row_text(0).trim(), "hello");
//! ```

use std::fmt;

use crate::animation::{AnimationScheduler, FrameTiming, RedrawState};
use crate::buffer::FrameBuffer;
use crate::diff::DiffOptions;
use crate::effect::{EffectContext, Fade, TextEffect};
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log_with};
use crate::layout::{LayoutService, MonospaceLayout, TextFormat, TextLayout};

type BoxedLayout = Box<dyn LayoutService + Send>;

/// Animated text in a fixed-size box.
///
/// Owns the previous and current text, the format, the layouts of both,
/// the scheduler and the active effect. Call [`update`](Self::update) once
/// per frame and [`draw`](Self::draw) to render it.
pub struct AnimatedText {
    old_text: String,
    new_text: String,
    format: TextFormat,
    width: u32,
    height: u32,
    layout_service: BoxedLayout,
    effect: Option<Box<dyn TextEffect>>,
    scheduler: AnimationScheduler,
    old_layout: Option<TextLayout>,
    new_layout: Option<TextLayout>,
}

impl AnimatedText {
    /// Empty text in a `width` x `height` box (zero sizes are clamped to 1),
    /// animated with [`Fade`].
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let effect = Fade::default();
        Self {
            old_text: String::new(),
            new_text: String::new(),
            format: TextFormat::default(),
            width: width.max(1),
            height: height.max(1),
            layout_service: Box::new(MonospaceLayout),
            scheduler: AnimationScheduler::new(effect.animation_config()),
            effect: Some(Box::new(effect)),
            old_layout: None,
            new_layout: None,
        }
    }

    #[must_use]
    pub fn with_layout_service<L>(mut self, service: L) -> Self
    where
        L: LayoutService + Send + 'static,
    {
        self.layout_service = Box::new(service);
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_effect(mut self, effect: Option<Box<dyn TextEffect>>) -> Self {
        self.set_effect(effect);
        self
    }

    /// Replace the displayed text; the old text becomes the animation source.
    ///
    /// Setting the text already shown while idle is a no-op: it would only
    /// diff to `Stay` ops, so no transition is started. While animating, the
    /// same text is accepted and requests a text change.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.new_text && !self.scheduler.is_animating() {
            return;
        }
        self.old_text = std::mem::replace(&mut self.new_text, text);
        self.scheduler.request_text_change();
    }

    /// The current (target) text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.new_text
    }

    /// The text being animated away from.
    #[must_use]
    pub fn old_text(&self) -> &str {
        &self.old_text
    }

    pub fn set_format(&mut self, format: TextFormat) {
        if format == self.format {
            return;
        }
        self.format = format;
        self.request_layout_change();
    }

    #[must_use]
    pub fn format(&self) -> &TextFormat {
        &self.format
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize the box, clamping zero sizes to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.request_layout_change();
    }

    /// Resize the box, rejecting zero sizes.
    pub fn try_resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        self.resize(width, height);
        Ok(())
    }

    /// Swap the active effect. The scheduler adopts the effect's timing;
    /// `None` disables animation.
    pub fn set_effect(&mut self, effect: Option<Box<dyn TextEffect>>) {
        if let Some(effect) = &effect {
            emit_log_with(LogLevel::Debug, || format!("effect -> {}", effect.name()));
            self.scheduler.set_config(effect.animation_config());
        }
        self.effect = effect;
    }

    /// Name of the active effect, if any.
    #[must_use]
    pub fn effect_name(&self) -> Option<&'static str> {
        self.effect.as_ref().map(|effect| effect.name())
    }

    pub fn set_diff_options(&mut self, options: DiffOptions) {
        self.scheduler.set_diff_options(options);
    }

    /// Register an observer for `Idle` / `Animating` transitions.
    pub fn on_state_changed<F>(&mut self, observer: F)
    where
        F: FnMut(RedrawState) + Send + 'static,
    {
        self.scheduler.on_state_changed(observer);
    }

    #[must_use]
    pub fn state(&self) -> RedrawState {
        self.scheduler.state()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scheduler.is_animating()
    }

    #[must_use]
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    #[must_use]
    pub fn old_layout(&self) -> Option<&TextLayout> {
        self.old_layout.as_ref()
    }

    #[must_use]
    pub fn new_layout(&self) -> Option<&TextLayout> {
        self.new_layout.as_ref()
    }

    fn request_layout_change(&mut self) {
        // A pending text change relayouts both texts anyway.
        if self.scheduler.state() == RedrawState::TextChanged {
            return;
        }
        self.scheduler
            .request_layout_change(self.new_layout.is_some());
    }

    fn layout(&self, text: &str) -> TextLayout {
        self.layout_service
            .layout(text, &self.format, self.width, self.height)
    }

    /// Run one frame: rebuild on a pending change, advance progress, then
    /// let the effect update.
    pub fn update(&mut self, timing: FrameTiming) {
        if self.effect.is_none() {
            if self.scheduler.state().is_pending_change() || self.new_layout.is_none() {
                self.new_layout = Some(self.layout(&self.new_text));
                self.old_layout = None;
            }
            self.scheduler.stop();
            return;
        }

        let pending = self.scheduler.state();
        if pending.is_pending_change() {
            self.rebuild_layouts(pending);
        }

        let (old, new) = (&self.old_layout, &self.new_layout);
        self.scheduler.tick(timing, |_| {
            let (old, new) = (old.as_ref()?, new.as_ref()?);
            Some((old.clusters().to_vec(), new.clusters().to_vec()))
        });

        if let Some(effect) = self.effect.as_mut() {
            let ctx = EffectContext {
                old_text: &self.old_text,
                new_text: &self.new_text,
                transition: self.scheduler.transition(),
                old_layout: self.old_layout.as_ref(),
                new_layout: self.new_layout.as_ref(),
                state: self.scheduler.state(),
            };
            effect.update(&ctx, timing);
        }
    }

    fn rebuild_layouts(&mut self, pending: RedrawState) {
        match pending {
            RedrawState::TextChanged => {
                self.old_layout = Some(self.layout(&self.old_text));
                self.new_layout = Some(self.layout(&self.new_text));
            }
            RedrawState::LayoutChanged => {
                // Animate from what is on screen: the current text under the
                // previous format and size.
                self.old_layout = self.new_layout.take();
                self.old_text.clone_from(&self.new_text);
                if self.old_layout.is_some() {
                    self.new_layout = Some(self.layout(&self.new_text));
                }
            }
            RedrawState::Idle | RedrawState::Animating => {}
        }
    }

    /// Draw the current frame into `target`.
    pub fn draw(&self, target: &mut FrameBuffer) {
        let ctx = EffectContext {
            old_text: &self.old_text,
            new_text: &self.new_text,
            transition: self.scheduler.transition(),
            old_layout: self.old_layout.as_ref(),
            new_layout: self.new_layout.as_ref(),
            state: self.scheduler.state(),
        };
        match &self.effect {
            Some(effect) => effect.draw(&ctx, target),
            None => ctx.draw_idle(target),
        }
    }
}

impl fmt::Debug for AnimatedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedText")
            .field("old_text", &self.old_text)
            .field("new_text", &self.new_text)
            .field("size", &(self.width, self.height))
            .field("effect", &self.effect_name())
            .field("state", &self.scheduler.state())
            .finish_non_exhaustive()
    }
}
