//! Scheduler state, timing input and configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Phase of the redraw state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RedrawState {
    /// Nothing to animate; the new layout is drawn as is.
    #[default]
    Idle,
    /// Text changed; the next tick rebuilds both layouts and diffs them.
    TextChanged,
    /// Format or size changed; the next tick relayouts and diffs.
    LayoutChanged,
    /// Clusters are animating.
    Animating,
}

impl RedrawState {
    /// Whether entering this state is announced to observers.
    ///
    /// The change states are internal staging steps and stay silent.
    #[must_use]
    pub fn notifies(self) -> bool {
        matches!(self, Self::Idle | Self::Animating)
    }

    /// Whether the next tick has to rebuild the transition.
    #[must_use]
    pub fn is_pending_change(self) -> bool {
        matches!(self, Self::TextChanged | Self::LayoutChanged)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TextChanged => "text_changed",
            Self::LayoutChanged => "layout_changed",
            Self::Animating => "animating",
        }
    }
}

impl fmt::Display for RedrawState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Timing of one frame, supplied by the host's clock.
///
/// `total` increases monotonically; `elapsed` is the time since the
/// previous tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameTiming {
    pub total: Duration,
    pub elapsed: Duration,
}

impl FrameTiming {
    #[must_use]
    pub fn new(total: Duration, elapsed: Duration) -> Self {
        Self { total, elapsed }
    }

    /// Timing for the tick after this one, `delta` later.
    #[must_use]
    pub fn next(self, delta: Duration) -> Self {
        Self {
            total: self.total.saturating_add(delta),
            elapsed: delta,
        }
    }
}

/// Duration of one cluster's animation and the stagger between clusters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationConfig {
    pub duration: Duration,
    pub delay_per_cluster: Duration,
}

impl AnimationConfig {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(10);

    #[must_use]
    pub const fn new(duration: Duration, delay_per_cluster: Duration) -> Self {
        Self {
            duration,
            delay_per_cluster,
        }
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_delay_per_cluster(mut self, delay: Duration) -> Self {
        self.delay_per_cluster = delay;
        self
    }

    /// The stagger actually applied: never longer than the duration.
    #[must_use]
    pub fn effective_delay(&self) -> Duration {
        self.delay_per_cluster.min(self.duration)
    }

    /// Reject configurations that cannot drive progress.
    ///
    /// The scheduler accepts a zero duration (it completes instantly); this
    /// check is for callers that want to treat it as a mistake.
    pub fn validated(self) -> Result<Self> {
        if self.duration.is_zero() {
            return Err(Error::InvalidDuration(self.duration));
        }
        Ok(self)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DURATION, Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_idle_and_animating_notify() {
        assert!(RedrawState::Idle.notifies());
        assert!(RedrawState::Animating.notifies());
        assert!(!RedrawState::TextChanged.notifies());
        assert!(!RedrawState::LayoutChanged.notifies());
        assert!(RedrawState::LayoutChanged.is_pending_change());
        assert_eq!(RedrawState::TextChanged.to_string(), "text_changed");
    }

    #[test]
    fn test_effective_delay_clamped_to_duration() {
        let config = AnimationConfig::new(Duration::from_millis(50), Duration::from_millis(80));
        assert_eq!(config.effective_delay(), Duration::from_millis(50));
        assert_eq!(
            AnimationConfig::default().effective_delay(),
            Duration::from_millis(10)
        );
    }

    #[test]
    fn test_validated_rejects_zero_duration() {
        let zero = AnimationConfig::default().with_duration(Duration::ZERO);
        assert!(matches!(zero.validated(), Err(Error::InvalidDuration(_))));
        assert!(AnimationConfig::default().validated().is_ok());
    }

    #[test]
    fn test_frame_timing_next() {
        let t = FrameTiming::default().next(Duration::from_millis(16));
        let t = t.next(Duration::from_millis(17));
        assert_eq!(t.total, Duration::from_millis(33));
        assert_eq!(t.elapsed, Duration::from_millis(17));
    }
}
