use super::{
    DEFAULT_EFFECT_CONFIG, Easing, EffectContext, OpPainter, TextEffect, draw_ops, lerp_position,
};
use crate::animation::AnimationConfig;
use crate::buffer::FrameBuffer;
use crate::cluster::GraphemeCluster;
use crate::style::Style;

/// Below this zoom a cluster is drawn dim.
const SMALL: f32 = 0.5;

/// Clusters grow in and shrink out on an elastic curve.
///
/// Cells cannot scale, so zoom is rendered as intensity: the glyph fades
/// with its size, turns dim while small and bold while it overshoots.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Zoom {
    config: AnimationConfig,
}

impl Zoom {
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self { config }
    }

    fn draw_zoomed(
        target: &mut FrameBuffer,
        cluster: &GraphemeCluster,
        text: &str,
        style: Style,
        zoom: f32,
    ) {
        let style = if zoom > 1.0 {
            style.with_bold()
        } else if zoom < SMALL {
            style.with_dim()
        } else {
            style
        };
        let bounds = cluster.layout_bounds;
        target.with_opacity(zoom.clamp(0.0, 1.0), |buf| {
            buf.draw_cluster(bounds.x, bounds.y, text, style);
        });
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(DEFAULT_EFFECT_CONFIG)
    }
}

impl TextEffect for Zoom {
    fn name(&self) -> &'static str {
        "zoom"
    }

    fn animation_config(&self) -> AnimationConfig {
        self.config
    }

    fn draw(&self, ctx: &EffectContext<'_>, target: &mut FrameBuffer) {
        draw_ops(self, ctx, target);
    }
}

impl OpPainter for Zoom {
    fn insert(&self, ctx: &EffectContext<'_>, new: &GraphemeCluster, target: &mut FrameBuffer) {
        let zoom = Easing::ElasticOut.apply(new.progress());
        Self::draw_zoomed(target, new, ctx.new_text_of(new), ctx.style(), zoom);
    }

    fn remove(&self, ctx: &EffectContext<'_>, old: &GraphemeCluster, target: &mut FrameBuffer) {
        let zoom = Easing::ElasticIn.apply(1.0 - old.progress());
        Self::draw_zoomed(target, old, ctx.old_text_of(old), ctx.style(), zoom);
    }

    fn reposition(
        &self,
        ctx: &EffectContext<'_>,
        old: &GraphemeCluster,
        new: &GraphemeCluster,
        target: &mut FrameBuffer,
    ) {
        let t = Easing::ElasticOut.apply(old.progress());
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
