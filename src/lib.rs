//! `textfx` - per-grapheme animated text transitions for cell grids
//!
//! When a string changes, its grapheme clusters are diffed against the
//! previous version and each cluster is animated on its own: inserted,
//! removed, moved or updated, with a staggered wave per kind of change.
//!
//! The pieces, leaf first:
//!
//! - [`diff`]: Heckel-style diff over [`GraphemeCluster`] sequences.
//! - [`animation`]: the redraw state machine and per-tick progress update.
//! - [`layout`]: [`TextFormat`] and the [`MonospaceLayout`] service.
//! - [`effect`]: the [`TextEffect`] trait and the built-in effects.
//! - [`buffer`] / [`ansi`]: the cell grid effects draw into, and its
//!   terminal serialisation.
//! - [`AnimatedText`]: the host that runs all of the above once per frame.
//!
//! # Example
//!
//! ```
//! use textfx::{FrameBuffer, Rgba, Style, Cell};
//!
//! let mut frame = FrameBuffer::new(8, 1);
//! frame.set(0, 0, Cell::new('>', Style::fg(Rgba::GREEN)));
//! frame.draw_text(2, 0, "ready", Style::NONE);
//! assert_eq!(frame.row_text(0).trim_end(), "> ready");
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for color and timing math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow animation::AnimationConfig etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::float_cmp)] // Exact endpoints are part of the easing contract
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod animated_text;
pub mod animation;
pub mod ansi;
pub mod buffer;
pub mod cell;
pub mod cluster;
pub mod color;
pub mod diff;
pub mod effect;
pub mod error;
pub mod event;
pub mod layout;
pub mod style;
pub mod unicode;

// Re-export core types at crate root
pub use cell::{Cell, CellContent};
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use style::{Style, TextAttributes};

// Draw target
pub use ansi::AnsiWriter;
pub use buffer::{FrameBuffer, OpacityStack};

// Diff and scheduling
pub use animation::{AnimationConfig, AnimationScheduler, FrameTiming, RedrawState, Transition};
pub use cluster::{GraphemeCluster, Rect};
pub use diff::{DiffKind, DiffOp, DiffOptions, diff, diff_with};

// Layout, effects and the host
pub use animated_text::AnimatedText;
pub use effect::{EffectContext, EffectKind, TextEffect};
pub use layout::{
    FlowDirection, LayoutService, MonospaceLayout, TextAlignment, TextFormat, TextLayout,
    TextTrimming, TextWrapping, VerticalAlignment,
};
pub use unicode::WidthMethod;
