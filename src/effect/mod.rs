//! Pluggable per-cluster drawing effects.
//!
//! An effect reads a transition and the live progress of its clusters and
//! draws them into a [`FrameBuffer`]. Effects never mutate the transition.
//!
//! | Effect | Insert | Remove | Move / Stay | Update |
//! |---|---|---|---|---|
//! | [`Fade`] | fade in | fade out | glide | cross-fade |
//! | [`MotionBlur`] | rise with smear | sink with smear | glide with smear | cross-fade |
//! | [`Elastic`] | drop in, bounce | fall away | glide, overshoot | both |
//! | [`Zoom`] | elastic grow | elastic shrink | glide, overshoot | both |

mod easing;
mod elastic;
mod fade;
mod motion_blur;
mod zoom;

pub use easing::Easing;
pub use elastic::Elastic;
pub use fade::Fade;
pub use motion_blur::MotionBlur;
pub use zoom::Zoom;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::animation::{AnimationConfig, FrameTiming, RedrawState, Transition};
use crate::buffer::FrameBuffer;
use crate::cluster::GraphemeCluster;
use crate::diff::DiffKind;
use crate::layout::TextLayout;
use crate::style::Style;

/// Timing the built-in effects use unless configured otherwise.
pub const DEFAULT_EFFECT_CONFIG: AnimationConfig =
    AnimationConfig::new(Duration::from_millis(800), Duration::from_millis(10));

/// Everything an effect may look at while updating or drawing.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    pub old_text: &'a str,
    pub new_text: &'a str,
    pub transition: &'a Transition,
    pub old_layout: Option<&'a TextLayout>,
    pub new_layout: Option<&'a TextLayout>,
    pub state: RedrawState,
}

impl EffectContext<'_> {
    /// Base style clusters are drawn with.
    #[must_use]
    pub fn style(&self) -> Style {
        self.new_layout
            .or(self.old_layout)
            .map_or_else(Style::default, |layout| layout.format().style)
    }

    /// Text an old cluster is drawn as (its layout's trimming sign if trimmed).
    #[must_use]
    pub fn old_text_of<'c>(&'c self, cluster: &'c GraphemeCluster) -> &'c str {
        match self.old_layout {
            Some(layout) => layout.display_text(cluster),
            None => &cluster.characters,
        }
    }

    /// Text a new cluster is drawn as.
    #[must_use]
    pub fn new_text_of<'c>(&'c self, cluster: &'c GraphemeCluster) -> &'c str {
        match self.new_layout {
            Some(layout) => layout.display_text(cluster),
            None => &cluster.characters,
        }
    }

    /// Draw the new layout at rest.
    pub fn draw_idle(&self, target: &mut FrameBuffer) {
        if let Some(layout) = self.new_layout {
            layout.draw(target);
        }
    }
}

/// A visual effect for text transitions.
pub trait TextEffect: Send {
    /// Short lowercase name.
    fn name(&self) -> &'static str;

    /// Duration and stagger the scheduler should use with this effect.
    fn animation_config(&self) -> AnimationConfig;

    /// Per-frame hook, called after progress has been advanced.
    fn update(&mut self, _ctx: &EffectContext<'_>, _timing: FrameTiming) {}

    /// Draw the current frame.
    fn draw(&self, ctx: &EffectContext<'_>, target: &mut FrameBuffer);
}

/// Per-op drawing, dispatched by [`draw_ops`].
pub(crate) trait OpPainter {
    fn insert(&self, ctx: &EffectContext<'_>, new: &GraphemeCluster, target: &mut FrameBuffer);

    fn remove(&self, ctx: &EffectContext<'_>, old: &GraphemeCluster, target: &mut FrameBuffer);

    fn reposition(
        &self,
        ctx: &EffectContext<'_>,
        old: &GraphemeCluster,
        new: &GraphemeCluster,
        target: &mut FrameBuffer,
    );

    fn update(
        &self,
        ctx: &EffectContext<'_>,
        old: &GraphemeCluster,
        new: &GraphemeCluster,
        target: &mut FrameBuffer,
    );
}

/// Draw idle text, or every op of the transition in order.
pub(crate) fn draw_ops<P: OpPainter>(painter: &P, ctx: &EffectContext<'_>, target: &mut FrameBuffer) {
    if ctx.state == RedrawState::Idle {
        ctx.draw_idle(target);
        return;
    }

    let transition = ctx.transition;
    for op in transition.ops() {
        let old = transition.old_cluster(op);
        let new = transition.new_cluster(op);
        match (op.kind, old, new) {
            (DiffKind::Insert, _, Some(new)) => painter.insert(ctx, new, target),
            (DiffKind::Remove, Some(old), _) => painter.remove(ctx, old, target),
            (DiffKind::Move | DiffKind::Stay, Some(old), Some(new)) => {
                // Pairs whose content changed are drawn by their Update op.
                if old.content_eq(new) {
                    painter.reposition(ctx, old, new, target);
                }
            }
            (DiffKind::Update, Some(old), Some(new)) => painter.update(ctx, old, new, target),
            _ => {}
        }
    }
}

/// Interpolated cell position between two clusters.
pub(crate) fn lerp_position(old: &GraphemeCluster, new: &GraphemeCluster, t: f32) -> (f32, f32) {
    let (ox, oy) = (old.layout_bounds.x, old.layout_bounds.y);
    let (nx, ny) = (new.layout_bounds.x, new.layout_bounds.y);
    (ox + (nx - ox) * t, oy + (ny - oy) * t)
}

/// The built-in effects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EffectKind {
    #[default]
    Fade,
    MotionBlur,
    Elastic,
    Zoom,
}

impl EffectKind {
    pub const ALL: [Self; 4] = [Self::Fade, Self::MotionBlur, Self::Elastic, Self::Zoom];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::MotionBlur => "motion-blur",
            Self::Elastic => "elastic",
            Self::Zoom => "zoom",
        }
    }

    /// Construct the effect with its default configuration.
    #[must_use]
    pub fn build(self) -> Box<dyn TextEffect> {
        match self {
            Self::Fade => Box::new(Fade::default()),
            Self::MotionBlur => Box::new(MotionBlur::default()),
            Self::Elastic => Box::new(Elastic::default()),
            Self::Zoom => Box::new(Zoom::default()),
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown effect name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownEffect(pub String);

impl fmt::Display for UnknownEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown effect '{}'", self.0)
    }
}

impl std::error::Error for UnknownEffect {}

impl FromStr for EffectKind {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted || (wanted == "default" && *kind == Self::Fade))
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DiffOptions;
    use crate::layout::{LayoutService, MonospaceLayout, TextFormat, VerticalAlignment};

    pub(crate) struct Fixture {
        pub old: TextLayout,
        pub new: TextLayout,
        pub transition: Transition,
    }

    impl Fixture {
        pub fn new(old: &str, new: &str) -> Self {
            let format = TextFormat::default().with_vertical_alignment(VerticalAlignment::Top);
            let old = MonospaceLayout.layout(old, &format, 12, 3);
            let new = MonospaceLayout.layout(new, &format, 12, 3);
            let transition = Transition::new(
                old.clusters().to_vec(),
                new.clusters().to_vec(),
                DiffOptions::default(),
            );
            Self {
                old,
                new,
                transition,
            }
        }

        pub fn ctx(&self, state: RedrawState) -> EffectContext<'_> {
            EffectContext {
                old_text: "",
                new_text: "",
                transition: &self.transition,
                old_layout: Some(&self.old),
                new_layout: Some(&self.new),
                state,
            }
        }

        /// Set every cluster's progress.
        pub fn at(mut self, progress: f32) -> Self {
            let (_, old, new) = self.transition.parts_mut();
            for cluster in old.iter_mut().chain(new.iter_mut()) {
                cluster.set_progress(progress);
            }
            self
        }
    }

    pub(crate) fn render(effect: &dyn TextEffect, fixture: &Fixture, state: RedrawState) -> FrameBuffer {
        let mut buf = FrameBuffer::new(12, 3);
        effect.draw(&fixture.ctx(state), &mut buf);
        buf
    }

    #[test]
    fn test_effect_kind_round_trip_names() {
        for kind in EffectKind::ALL {
            assert_eq!(kind.name().parse::<EffectKind>(), Ok(kind));
            assert_eq!(kind.build().name(), kind.name());
        }
        assert_eq!("Motion_Blur".parse::<EffectKind>(), Ok(EffectKind::MotionBlur));
        assert_eq!("default".parse::<EffectKind>(), Ok(EffectKind::Fade));
        assert!("sparkle".parse::<EffectKind>().is_err());
    }

    #[test]
    fn test_builtin_default_timing() {
        for kind in EffectKind::ALL {
            assert_eq!(kind.build().animation_config(), DEFAULT_EFFECT_CONFIG);
        }
    }

    #[test]
    fn test_idle_draws_new_layout_for_every_effect() {
        let fixture = Fixture::new("old", "new");
        for kind in EffectKind::ALL {
            let buf = render(kind.build().as_ref(), &fixture, RedrawState::Idle);
            assert_eq!(buf.to_lines()[0], "new", "{kind}");
        }
    }

    #[test]
    fn test_finished_transition_shows_new_text_for_every_effect() {
        let fixture = Fixture::new("cart", "cat").at(1.0);
        for kind in EffectKind::ALL {
            let buf = render(kind.build().as_ref(), &fixture, RedrawState::Animating);
            assert_eq!(buf.to_lines()[0], "cat", "{kind}");
        }
    }

    #[test]
    fn test_unstarted_transition_shows_old_text_for_every_effect() {
        let fixture = Fixture::new("cart", "cat").at(0.0);
        for kind in EffectKind::ALL {
            let buf = render(kind.build().as_ref(), &fixture, RedrawState::Animating);
            assert_eq!(buf.to_lines()[0], "cart", "{kind}");
        }
    }

    #[test]
    fn test_context_uses_trimming_sign() {
        let fixture = Fixture::new("a", "b");
        let ctx = fixture.ctx(RedrawState::Animating);
        let trimmed = GraphemeCluster::from_text("z").with_trimmed(true);
        assert_eq!(ctx.new_text_of(&trimmed), "…");
        assert_eq!(ctx.old_text_of(&GraphemeCluster::from_text("q")), "q");
    }
}
