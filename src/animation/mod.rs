//! Animation scheduling for cluster transitions.
//!
//! - [`RedrawState`]: the state machine phases
//! - [`Transition`]: old/new clusters plus the diff between them
//! - [`AnimationScheduler`]: turns change requests and frame ticks into
//!   per-cluster progress
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use textfx::animation::{AnimationConfig, AnimationScheduler, FrameTiming, RedrawState};
//! use textfx::cluster::clusters_from_text;
//!
//! let config = AnimationConfig::new(Duration::from_millis(100), Duration::ZERO);
//! let mut scheduler = AnimationScheduler::new(config);
//!
//! scheduler.request_text_change();
//! let mut timing = FrameTiming::default();
//! scheduler.tick(timing, |_| Some((clusters_from_text("cat"), clusters_from_text("cart"))));
//! assert_eq!(scheduler.state(), RedrawState::Animating);
//!
//! while scheduler.is_animating() {
//!     timing = timing.next(Duration::from_millis(16));
//!     scheduler.tick(timing, |_| None);
//! }
//! assert!(timing.total >= Duration::from_millis(100));
//! ```

mod scheduler;
mod state;
mod transition;

pub use scheduler::AnimationScheduler;
pub use state::{AnimationConfig, FrameTiming, RedrawState};
pub use transition::{StaggerGroup, Transition, stagger_offsets};
