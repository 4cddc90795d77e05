//! Redraw state machine and per-tick progress update.

use std::time::Duration;

use super::state::{AnimationConfig, FrameTiming, RedrawState};
use super::transition::{Transition, stagger_offsets};
use crate::cluster::GraphemeCluster;
use crate::diff::{DiffOptions, DiffSummary};
use crate::event::{LogLevel, REDRAW_STATE_EVENT, emit_event, emit_log, emit_log_with};

type StateObserver = Box<dyn FnMut(RedrawState) + Send>;

/// Drives a [`Transition`] from a text or layout change to completion.
///
/// The scheduler is tick driven: the host reports changes with
/// [`request_text_change`](Self::request_text_change) or
/// [`request_layout_change`](Self::request_layout_change) and then calls
/// [`tick`](Self::tick) once per frame. On the first tick after a change the
/// caller-supplied closure produces fresh old/new clusters, which are diffed
/// and animated from that tick's timestamp.
///
/// Every state change goes through one transition function. Entering
/// [`RedrawState::Idle`] or [`RedrawState::Animating`] notifies observers;
/// the change states do not.
pub struct AnimationScheduler {
    state: RedrawState,
    config: AnimationConfig,
    diff_options: DiffOptions,
    transition: Transition,
    start_time: Duration,
    observers: Vec<StateObserver>,
}

impl AnimationScheduler {
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            state: RedrawState::Idle,
            config,
            diff_options: DiffOptions::default(),
            transition: Transition::default(),
            start_time: Duration::ZERO,
            observers: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_diff_options(mut self, options: DiffOptions) -> Self {
        self.diff_options = options;
        self
    }

    #[must_use]
    pub fn state(&self) -> RedrawState {
        self.state
    }

    /// Whether anything is pending or animating.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.state != RedrawState::Idle
    }

    #[must_use]
    pub fn config(&self) -> AnimationConfig {
        self.config
    }

    /// Replace the timing configuration; applies from the next tick.
    pub fn set_config(&mut self, config: AnimationConfig) {
        if config.duration.is_zero() {
            emit_log(
                LogLevel::Warn,
                "animation duration is zero, clusters will complete instantly",
            );
        }
        self.config = config;
    }

    #[must_use]
    pub fn diff_options(&self) -> DiffOptions {
        self.diff_options
    }

    pub fn set_diff_options(&mut self, options: DiffOptions) {
        self.diff_options = options;
    }

    /// The current transition (empty before the first change).
    #[must_use]
    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Time at which the current transition started.
    #[must_use]
    pub fn start_time(&self) -> Duration {
        self.start_time
    }

    /// Register an observer for announced state changes.
    pub fn on_state_changed<F>(&mut self, observer: F)
    where
        F: FnMut(RedrawState) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// The displayed text changed. Silent until the next tick.
    pub fn request_text_change(&mut self) {
        self.transition_to(RedrawState::TextChanged);
    }

    /// Format or size changed.
    ///
    /// Without a layout of the current text there is nothing to animate
    /// from, so the request collapses straight to `Idle`.
    pub fn request_layout_change(&mut self, has_layout: bool) {
        if has_layout {
            self.transition_to(RedrawState::LayoutChanged);
        } else {
            self.transition_to(RedrawState::Idle);
        }
    }

    /// Drop any transition in flight and go idle.
    pub fn stop(&mut self) {
        self.transition_to(RedrawState::Idle);
    }

    /// Run one frame.
    ///
    /// In a change state, `rebuild` is called with that state and returns the
    /// old and new clusters to diff, or `None` if no layout is available (the
    /// scheduler then goes idle). While animating, progress is advanced.
    pub fn tick<F>(&mut self, timing: FrameTiming, rebuild: F)
    where
        F: FnOnce(RedrawState) -> Option<(Vec<GraphemeCluster>, Vec<GraphemeCluster>)>,
    {
        if self.state.is_pending_change() {
            match rebuild(self.state) {
                Some((old, new)) => self.begin(old, new, timing),
                None => self.transition_to(RedrawState::Idle),
            }
        }

        if self.state == RedrawState::Animating {
            self.advance(timing);
        }
    }

    /// Diff `old` against `new` and start animating at `timing.total`.
    pub fn begin(
        &mut self,
        old: Vec<GraphemeCluster>,
        new: Vec<GraphemeCluster>,
        timing: FrameTiming,
    ) {
        let transition = Transition::new(old, new, self.diff_options);
        emit_log_with(LogLevel::Debug, || {
            let s = DiffSummary::of(transition.ops());
            format!(
                "diff {} -> {} clusters: {} insert, {} remove, {} update, {} move, {} stay",
                transition.old().len(),
                transition.new_clusters().len(),
                s.inserts,
                s.removes,
                s.updates,
                s.moves,
                s.stays
            )
        });
        self.transition = transition;
        self.start_time = timing.total;
        self.transition_to(RedrawState::Animating);
    }

    /// Advance every cluster by one tick. Returns the unfinished count.
    ///
    /// A cluster with stagger offset `k` starts at `delay * k` after the
    /// transition began and finishes `duration` later. Before its start its
    /// progress is held at zero; in between it grows by `elapsed / duration`
    /// per tick. A cluster referenced by several ops is advanced once, with
    /// the offset of the first op that references it.
    pub fn advance(&mut self, timing: FrameTiming) -> usize {
        let duration = self.config.duration;
        let delay = self.config.effective_delay();
        let elapsed = timing.total.saturating_sub(self.start_time);
        let step = if duration.is_zero() {
            1.0
        } else {
            (timing.elapsed.as_secs_f64() / duration.as_secs_f64()) as f32
        };

        let clock = Clock {
            duration,
            delay,
            elapsed,
            step,
        };

        let (ops, old, new) = self.transition.parts_mut();
        let offsets = stagger_offsets(ops);
        let mut seen_old = vec![false; old.len()];
        let mut seen_new = vec![false; new.len()];
        let mut unfinished = 0;

        for (op, &offset) in ops.iter().zip(&offsets) {
            for (index, clusters, seen) in [
                (op.old_cluster, &mut *old, &mut seen_old),
                (op.new_cluster, &mut *new, &mut seen_new),
            ] {
                let Some(i) = index else { continue };
                let (Some(cluster), Some(seen)) = (clusters.get_mut(i), seen.get_mut(i)) else {
                    debug_assert!(false, "{:?} op references missing cluster {i}", op.kind);
                    emit_log_with(LogLevel::Warn, || {
                        format!("skipping {} op with missing cluster {i}", op.kind.name())
                    });
                    continue;
                };
                if *seen {
                    continue;
                }
                *seen = true;
                if !clock.advance(cluster, offset) {
                    unfinished += 1;
                }
            }
        }

        if unfinished == 0 {
            self.transition_to(RedrawState::Idle);
        }
        unfinished
    }

    fn transition_to(&mut self, next: RedrawState) {
        let previous = self.state;
        if previous == next {
            return;
        }
        self.state = next;
        emit_log_with(LogLevel::Debug, || {
            format!("redraw state {previous} -> {next}")
        });

        if next.notifies() {
            emit_event(REDRAW_STATE_EVENT, next.name());
            for observer in &mut self.observers {
                observer(next);
            }
        }
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationScheduler")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("ops", &self.transition.ops().len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

struct Clock {
    duration: Duration,
    delay: Duration,
    elapsed: Duration,
    step: f32,
}

impl Clock {
    /// Returns whether the cluster is finished.
    fn advance(&self, cluster: &mut GraphemeCluster, offset: usize) -> bool {
        if cluster.is_finished() {
            return true;
        }
        if self.duration.is_zero() {
            cluster.finish();
            return true;
        }

        let start = self
            .delay
            .saturating_mul(u32::try_from(offset).unwrap_or(u32::MAX));
        if self.elapsed < start {
            cluster.set_progress(0.0);
            return false;
        }
        if self.elapsed >= start.saturating_add(self.duration) {
            cluster.finish();
            return true;
        }
        cluster.set_progress(cluster.progress() + self.step);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::clusters_from_text;
    use crate::diff::DiffKind;
    use std::sync::{Arc, Mutex};

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn at(total: u64, elapsed: u64) -> FrameTiming {
        FrameTiming::new(ms(total), ms(elapsed))
    }

    fn recorder(scheduler: &mut AnimationScheduler) -> Arc<Mutex<Vec<RedrawState>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        scheduler.on_state_changed(move |state| sink.lock().unwrap().push(state));
        seen
    }

    fn start(scheduler: &mut AnimationScheduler, old: &str, new: &str, timing: FrameTiming) {
        scheduler.request_text_change();
        scheduler.tick(timing, |_| {
            Some((clusters_from_text(old), clusters_from_text(new)))
        });
    }

    fn new_progress(scheduler: &AnimationScheduler) -> Vec<f32> {
        scheduler
            .transition()
            .new_clusters()
            .iter()
            .map(GraphemeCluster::progress)
            .collect()
    }

    #[test]
    fn test_text_change_is_silent_until_tick() {
        let mut s = AnimationScheduler::default();
        let seen = recorder(&mut s);
        s.request_text_change();
        assert_eq!(s.state(), RedrawState::TextChanged);
        assert!(s.is_animating());
        assert!(seen.lock().unwrap().is_empty());

        s.tick(at(0, 16), |state| {
            assert_eq!(state, RedrawState::TextChanged);
            Some((clusters_from_text("a"), clusters_from_text("ab")))
        });
        assert_eq!(s.state(), RedrawState::Animating);
        assert_eq!(*seen.lock().unwrap(), vec![RedrawState::Animating]);
    }

    #[test]
    fn test_layout_change_without_layout_collapses_to_idle() {
        let mut s = AnimationScheduler::default();
        let seen = recorder(&mut s);
        s.request_text_change();
        s.request_layout_change(false);
        assert_eq!(s.state(), RedrawState::Idle);
        assert_eq!(*seen.lock().unwrap(), vec![RedrawState::Idle]);
    }

    #[test]
    fn test_rebuild_without_layout_goes_idle() {
        let mut s = AnimationScheduler::default();
        s.request_layout_change(true);
        assert_eq!(s.state(), RedrawState::LayoutChanged);
        s.tick(at(0, 16), |_| None);
        assert_eq!(s.state(), RedrawState::Idle);
    }

    #[test]
    fn test_staggered_inserts() {
        let config = AnimationConfig::new(ms(800), ms(100));
        let mut s = AnimationScheduler::new(config);
        start(&mut s, "", "abc", at(1000, 10));

        s.tick(at(1050, 50), |_| None);
        let p = new_progress(&s);
        assert!(p[0] > 0.0);
        assert!(p[1].abs() < f32::EPSILON);
        assert!(p[2].abs() < f32::EPSILON);

        s.tick(at(1150, 100), |_| None);
        let p = new_progress(&s);
        assert!(p[0] > 0.0);
        assert!(p[1] > 0.0);
        assert!(p[2].abs() < f32::EPSILON);
    }

    #[test]
    fn test_groups_stagger_independently() {
        let config = AnimationConfig::new(ms(800), ms(100));
        let mut s = AnimationScheduler::new(config);
        // One removal then two inserts: the removal and the first insert
        // both lead their groups.
        start(&mut s, "q", "xy", at(0, 16));
        let t = s.transition();
        let kinds: Vec<_> = t.ops().iter().map(|op| op.kind).collect();
        assert_eq!(kinds, vec![DiffKind::Remove, DiffKind::Insert, DiffKind::Insert]);
        assert!(t.old()[0].progress() > 0.0);
        assert!(t.new_clusters()[0].progress() > 0.0);
        assert!(t.new_clusters()[1].progress().abs() < f32::EPSILON);
    }

    #[test]
    fn test_runs_to_idle_at_deadline() {
        let config = AnimationConfig::new(ms(100), ms(10));
        let mut s = AnimationScheduler::new(config);
        let seen = recorder(&mut s);
        start(&mut s, "ab", "ba", at(0, 16));

        let mut timing = at(0, 16);
        while timing.total < ms(110) {
            timing = timing.next(ms(16));
            s.tick(timing, |_| None);
            if timing.total < ms(100) {
                assert_eq!(s.state(), RedrawState::Animating);
            }
        }
        assert_eq!(s.state(), RedrawState::Idle);
        assert_eq!(s.transition().unfinished(), 0);
        assert!(
            s.transition()
                .new_clusters()
                .iter()
                .all(|c| (c.progress() - 1.0).abs() < f32::EPSILON)
        );
        assert_eq!(
            *seen.lock().unwrap(),
            vec![RedrawState::Animating, RedrawState::Idle]
        );
    }

    #[test]
    fn test_zero_duration_completes_instantly() {
        let config = AnimationConfig::new(Duration::ZERO, ms(10));
        let mut s = AnimationScheduler::new(config);
        start(&mut s, "abc", "xyz", at(0, 16));
        assert_eq!(s.state(), RedrawState::Idle);
        assert!(s.transition().old().iter().all(GraphemeCluster::is_finished));
    }

    #[test]
    fn test_zero_delay_starts_together() {
        let config = AnimationConfig::new(ms(500), Duration::ZERO);
        let mut s = AnimationScheduler::new(config);
        start(&mut s, "", "abcd", at(0, 20));
        let p = new_progress(&s);
        assert!(p.iter().all(|v| (v - p[0]).abs() < f32::EPSILON && *v > 0.0));
    }

    #[test]
    fn test_new_change_supersedes_running_animation() {
        let mut s = AnimationScheduler::new(AnimationConfig::new(ms(800), ms(10)));
        let seen = recorder(&mut s);
        start(&mut s, "", "abc", at(0, 16));
        s.tick(at(400, 16), |_| None);
        assert!(new_progress(&s)[0] > 0.0);

        start(&mut s, "abc", "abd", at(416, 16));
        assert_eq!(s.state(), RedrawState::Animating);
        assert_eq!(s.start_time(), ms(416));
        assert_eq!(s.transition().new_clusters()[2].characters, "d");
        assert!(new_progress(&s).iter().all(|p| *p < 0.1));
        assert_eq!(
            *seen.lock().unwrap(),
            vec![RedrawState::Animating, RedrawState::Animating]
        );
    }

    #[test]
    fn test_idle_is_not_reannounced() {
        let mut s = AnimationScheduler::default();
        let seen = recorder(&mut s);
        s.stop();
        s.request_layout_change(false);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_shared_cluster_advanced_once_per_tick() {
        let config = AnimationConfig::new(ms(1000), Duration::ZERO);
        let mut s = AnimationScheduler::new(config).with_diff_options(
            DiffOptions::default().with_substitute_in_place(true),
        );
        // Update + Stay reference the same pair of clusters.
        start(&mut s, "a", "z", at(0, 100));
        let p = s.transition().new_clusters()[0].progress();
        assert!((p - 0.1).abs() < 1e-4, "progress {p}");
    }

    #[test]
    fn test_empty_transition_goes_idle() {
        let mut s = AnimationScheduler::default();
        start(&mut s, "", "", at(0, 16));
        assert_eq!(s.state(), RedrawState::Idle);
    }
}
