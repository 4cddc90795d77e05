use super::{
    DEFAULT_EFFECT_CONFIG, Easing, EffectContext, OpPainter, TextEffect, draw_ops, lerp_position,
};
use crate::animation::AnimationConfig;
use crate::buffer::FrameBuffer;
use crate::cluster::GraphemeCluster;

/// The default effect: clusters fade in and out, moved clusters glide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    config: AnimationConfig,
    easing: Easing,
}

impl Fade {
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            easing: Easing::CubicOut,
        }
    }

    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::new(DEFAULT_EFFECT_CONFIG)
    }
}

impl TextEffect for Fade {
    fn name(&self) -> &'static str {
        "fade"
    }

    fn animation_config(&self) -> AnimationConfig {
        self.config
    }

    fn draw(&self, ctx: &EffectContext<'_>, target: &mut FrameBuffer) {
        draw_ops(self, ctx, target);
    }
}

impl OpPainter for Fade {
    fn insert(&self, ctx: &EffectContext<'_>, new: &GraphemeCluster, target: &mut FrameBuffer) {
        let t = self.easing.apply(new.progress());
        let bounds = new.layout_bounds;
        target.with_opacity(t, |buf| {
            buf.draw_cluster(bounds.x, bounds.y, ctx.new_text_of(new), ctx.style());
        });
    }

    fn remove(&self, ctx: &EffectContext<'_>, old: &GraphemeCluster, target: &mut FrameBuffer) {
        let t = self.easing.apply(old.progress());
        let bounds = old.layout_bounds;
        target.with_opacity(1.0 - t, |buf| {
            buf.draw_cluster(bounds.x, bounds.y, ctx.old_text_of(old), ctx.style());
        });
    }

    fn reposition(
        &self,
        ctx: &EffectContext<'_>,
        old: &GraphemeCluster,
        new: &GraphemeCluster,
        target: &mut FrameBuffer,
    ) {
        let t = self.easing.apply(old.progress());
        let (x, y) = lerp_position(old, new, t);
        target.draw_cluster(x, y, ctx.old_text_of(old), ctx.style());
    }

    fn update(
        &self,
        ctx: &EffectContext<'_>,
        old: &GraphemeCluster,
        new: &GraphemeCluster,
        target: &mut FrameBuffer,
    ) {
        self.remove(ctx, old, target);
        self.insert(ctx, new, target);
    }
}
