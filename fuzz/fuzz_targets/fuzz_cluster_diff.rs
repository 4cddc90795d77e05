//! Fuzz target for the grapheme-cluster diff.
//!
//! Diffs two arbitrary strings and checks that the script stays in bounds,
//! replays to the new sequence, and can be animated to completion.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use std::time::Duration;
use textfx::cluster::clusters_from_text;
use textfx::diff::replay;
use textfx::{AnimationConfig, AnimationScheduler, DiffOptions, FrameTiming, RedrawState, diff_with};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    old: &'a str,
    new: &'a str,
    substitute_in_place: bool,
    duration_ms: u16,
    delay_ms: u8,
}

fuzz_target!(|input: Input<'_>| {
    let old = clusters_from_text(input.old);
    let new = clusters_from_text(input.new);
    let options = DiffOptions::default().with_substitute_in_place(input.substitute_in_place);

    let ops = diff_with(&old, &new, options);
    let rebuilt = replay(&old, &new, &ops).expect("script leaves a gap or is out of bounds");
    let expected: Vec<&str> = new.iter().map(|c| c.characters.as_str()).collect();
    assert_eq!(rebuilt, expected);

    // Every transition terminates once the worst-case deadline has passed.
    let config = AnimationConfig::new(
        Duration::from_millis(u64::from(input.duration_ms)),
        Duration::from_millis(u64::from(input.delay_ms)),
    );
    let mut scheduler = AnimationScheduler::new(config).with_diff_options(options);
    scheduler.begin(old, new, FrameTiming::default());
    let deadline = config.effective_delay() * (ops.len() as u32) + config.duration;
    scheduler.advance(FrameTiming::new(deadline, deadline));
    assert_eq!(scheduler.state(), RedrawState::Idle);
});
