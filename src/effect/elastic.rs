use super::{
    DEFAULT_EFFECT_CONFIG, Easing, EffectContext, OpPainter, TextEffect, draw_ops, lerp_position,
};
use crate::animation::AnimationConfig;
use crate::buffer::FrameBuffer;
use crate::cluster::GraphemeCluster;

/// Inserted clusters drop in from above and bounce; removed clusters fall
/// away. Moves overshoot their target before settling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Elastic {
    config: AnimationConfig,
    /// Rows an inserted cluster falls before landing.
    drop: f32,
}

impl Elastic {
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self { config, drop: 1.0 }
    }

    #[must_use]
    pub fn with_drop(mut self, rows: f32) -> Self {
        self.drop = rows.max(0.0);
        self
    }
}

impl Default for Elastic {
    fn default() -> Self {
        Self::new(DEFAULT_EFFECT_CONFIG)
    }
}

impl TextEffect for Elastic {
    fn name(&self) -> &'static str {
        "elastic"
    }

    fn animation_config(&self) -> AnimationConfig {
        self.config
    }

    fn draw(&self, ctx: &EffectContext<'_>, target: &mut FrameBuffer) {
        draw_ops(self, ctx, target);
    }
}

impl OpPainter for Elastic {
    fn insert(&self, ctx: &EffectContext<'_>, new: &GraphemeCluster, target: &mut FrameBuffer) {
        let p = new.progress();
        let opacity = Easing::CubicOut.apply(p);
        let landing = Easing::ElasticOut.apply(p);
        let bounds = new.layout_bounds;
        let y = bounds.y - self.drop * bounds.height * (1.0 - landing);
        target.with_opacity(opacity, |buf| {
            buf.draw_cluster(bounds.x, y, ctx.new_text_of(new), ctx.style());
        });
    }

    fn remove(&self, ctx: &EffectContext<'_>, old: &GraphemeCluster, target: &mut FrameBuffer) {
        let p = old.progress();
        let opacity = Easing::CubicIn.apply(1.0 - p);
        let fall = Easing::ElasticOut.apply(p);
        let bounds = old.layout_bounds;
        let y = bounds.y + 0.5 * bounds.height * fall;
        target.with_opacity(opacity, |buf| {
            buf.draw_cluster(bounds.x, y, ctx.old_text_of(old), ctx.style());
        });
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::RedrawState;
    use crate::effect::tests::{Fixture, render};

    #[test]
    fn test_insert_starts_above_its_row() {
        // Row 1 so there is a row above to fall from.
        let fixture = Fixture::new("", "x\na").at(0.02);
        let buf = render(&Elastic::default(), &fixture, RedrawState::Animating);
        assert_eq!(buf.get(0, 0).unwrap().symbol(), "a");
        assert!(buf.get(0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_insert_lands_on_its_row() {
        let fixture = Fixture::new("", "a").at(0.9);
        let buf = render(&Elastic::default(), &fixture, RedrawState::Animating);
        assert_eq!(buf.get(0, 0).unwrap().symbol(), "a");
    }

    #[test]
    fn test_removal_fades_out() {
        let fixture = Fixture::new("a", "").at(0.5);
        let buf = render(&Elastic::default(), &fixture, RedrawState::Animating);
        let faded = buf
            .iter_cells()
            .find(|(_, _, c)| c.symbol() == "a")
            .map(|(_, _, c)| c.fg.a)
            .unwrap();
        // cubic-in(0.5) = 0.125
        assert!((faded - 0.125).abs() < 1e-4);
    }
}
