use super::{
    DEFAULT_EFFECT_CONFIG, Easing, EffectContext, OpPainter, TextEffect, draw_ops, lerp_position,
};
use crate::animation::AnimationConfig;
use crate::buffer::FrameBuffer;
use crate::cluster::GraphemeCluster;
use crate::style::Style;

/// Longest smear, in copies.
const MAX_TRAIL: u32 = 3;

/// Moving clusters leave a dimmed smear behind them.
///
/// Inserts rise one row into place and removals sink one row away; moves
/// glide horizontally. The smear is longest mid-motion and vanishes at both
/// ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionBlur {
    config: AnimationConfig,
    trail: u32,
}

impl MotionBlur {
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            trail: MAX_TRAIL,
        }
    }

    /// Cap the smear length (0 disables it).
    #[must_use]
    pub fn with_trail(mut self, trail: u32) -> Self {
        self.trail = trail;
        self
    }

    /// Draw `text` at `(x, y)` with up to `self.trail` fading copies behind
    /// it along `(dx, dy)`, the unit direction of travel.
    #[allow(clippy::too_many_arguments)]
    fn draw_smeared(
        &self,
        target: &mut FrameBuffer,
        (x, y): (f32, f32),
        (dx, dy): (f32, f32),
        eased: f32,
        opacity: f32,
        text: &str,
        style: Style,
    ) {
        // 0 at rest, 1 at the midpoint of the motion.
        let blur = (4.0 * eased * (1.0 - eased)).clamp(0.0, 1.0);
        let copies = (blur * self.trail as f32).ceil() as u32;
        let dim = style.with_dim();
        for k in (1..=copies).rev() {
            let fade = blur * 0.5f32.powi(k as i32);
            let (sx, sy) = (x - dx * k as f32, y - dy * k as f32);
            target.with_opacity(opacity * fade, |buf| buf.draw_cluster(sx, sy, text, dim));
        }
        target.with_opacity(opacity, |buf| buf.draw_cluster(x, y, text, style));
    }
}

/// Unit step from `from` towards `to`; 0 when they coincide.
///
/// `f32::signum` maps 0.0 to 1.0, so it cannot be used directly.
fn direction(from: f32, to: f32) -> f32 {
    let delta = to - from;
    if delta == 0.0 { 0.0 } else { delta.signum() }
}

impl Default for MotionBlur {
    fn default() -> Self {
        Self::new(DEFAULT_EFFECT_CONFIG)
    }
}

impl TextEffect for MotionBlur {
    fn name(&self) -> &'static str {
        "motion-blur"
    }

    fn animation_config(&self) -> AnimationConfig {
        self.config
    }

    fn draw(&self, ctx: &EffectContext<'_>, target: &mut FrameBuffer) {
        draw_ops(self, ctx, target);
    }
}

impl OpPainter for MotionBlur {
    fn insert(&self, ctx: &EffectContext<'_>, new: &GraphemeCluster, target: &mut FrameBuffer) {
        let eased = Easing::CubicOut.apply(new.progress());
        let bounds = new.layout_bounds;
        let rise = bounds.height * (1.0 - eased);
        self.draw_smeared(
            target,
            (bounds.x, bounds.y + rise),
            (0.0, -1.0),
            eased,
            eased,
            ctx.new_text_of(new),
            ctx.style(),
        );
    }

    fn remove(&self, ctx: &EffectContext<'_>, old: &GraphemeCluster, target: &mut FrameBuffer) {
        let eased = Easing::CubicIn.apply(old.progress());
        let bounds = old.layout_bounds;
        self.draw_smeared(
            target,
            (bounds.x, bounds.y + bounds.height * eased),
            (0.0, 1.0),
            eased,
            1.0 - eased,
            ctx.old_text_of(old),
            ctx.style(),
        );
    }

    fn reposition(
        &self,
        ctx: &EffectContext<'_>,
        old: &GraphemeCluster,
        new: &GraphemeCluster,
        target: &mut FrameBuffer,
    ) {
        let eased = Easing::CubicOut.apply(old.progress());
        let position = lerp_position(old, new, eased);
        let dx = direction(old.layout_bounds.x, new.layout_bounds.x);
        let dy = direction(old.layout_bounds.y, new.layout_bounds.y);
        let text = ctx.old_text_of(old);
        if dx == 0.0 && dy == 0.0 {
            target.draw_cluster(position.0, position.1, text, ctx.style());
        } else {
            self.draw_smeared(target, position, (dx, dy), eased, 1.0, text, ctx.style());
        }
    }

    fn update(
        &self,
        ctx: &EffectContext<'_>,
        old: &GraphemeCluster,
        new: &GraphemeCluster,
        target: &mut FrameBuffer,
    ) {
        let old_t = Easing::CubicOut.apply(old.progress());
        let new_t = Easing::CubicOut.apply(new.progress());
        let (ob, nb) = (old.layout_bounds, new.layout_bounds);
        target.with_opacity(1.0 - old_t, |buf| {
            buf.draw_cluster(ob.x, ob.y, ctx.old_text_of(old), ctx.style());
        });
        target.with_opacity(new_t, |buf| {
            buf.draw_cluster(nb.x, nb.y, ctx.new_text_of(new), ctx.style());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::RedrawState;
    use crate::effect::tests::{Fixture, render};
    use crate::style::TextAttributes;

    #[test]
    fn test_move_leaves_dim_smear_mid_motion() {
        // "ab" -> "ba": b travels left from column 1 to column 0.
        let fixture = Fixture::new("ab", "ba").at(0.2);
        let buf = render(&MotionBlur::default(), &fixture, RedrawState::Animating);
        let smear = buf
            .iter_cells()
            .filter(|(_, _, cell)| cell.symbol() == "b")
            .count();
        assert!(smear > 1, "expected a smear, found {smear} copies");
        assert!(
            buf.iter_cells()
                .any(|(_, _, c)| c.symbol() == "b" && c.attributes.contains(TextAttributes::DIM))
        );
    }

    #[test]
    fn test_horizontal_move_smears_along_its_row() {
        let fixture = Fixture::new("ab", "ba").at(0.2);
        let buf = render(&MotionBlur::default(), &fixture, RedrawState::Animating);
        let rows: Vec<u32> = buf
            .iter_cells()
            .filter(|(_, _, cell)| cell.symbol() == "b")
            .map(|(_, y, _)| y)
            .collect();
        assert!(rows.iter().all(|&y| y == 0), "{rows:?}");
    }

    #[test]
    fn test_stay_below_first_row_is_not_smeared() {
        // Row 1 "ab" stays put while row 0 is substituted.
        let fixture = Fixture::new("x\nab", "y\nab").at(0.2);
        let buf = render(&MotionBlur::default(), &fixture, RedrawState::Animating);
        for glyph in ["a", "b"] {
            let cells: Vec<(u32, u32)> = buf
                .iter_cells()
                .filter(|(_, _, cell)| cell.symbol() == glyph)
                .map(|(x, y, _)| (x, y))
                .collect();
            assert_eq!(cells.len(), 1, "{glyph} drawn at {cells:?}");
            assert_eq!(cells[0].1, 1);
        }
    }

    #[test]
    fn test_direction_of_still_axis_is_zero() {
        assert_eq!(direction(2.0, 2.0), 0.0);
        assert_eq!(direction(2.0, 0.0), -1.0);
        assert_eq!(direction(0.0, 3.5), 1.0);
    }

    #[test]
    fn test_no_trail_draws_single_copy() {
        let fixture = Fixture::new("ab", "ba").at(0.2);
        let blur = MotionBlur::default().with_trail(0);
        let buf = render(&blur, &fixture, RedrawState::Animating);
        let copies = buf
            .iter_cells()
            .filter(|(_, _, cell)| cell.symbol() == "b")
            .count();
        assert_eq!(copies, 1);
    }

    #[test]
    fn test_insert_rises_from_below() {
        let fixture = Fixture::new("", "a").at(0.1);
        let blur = MotionBlur::default().with_trail(0);
        let buf = render(&blur, &fixture, RedrawState::Animating);
        // cubic-out(0.1) = 0.271, so the glyph is still one row down.
        assert_eq!(buf.get(0, 1).unwrap().symbol(), "a");
        assert!(buf.get(0, 0).unwrap().is_empty());
    }
}
