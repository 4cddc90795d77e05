//! Scheduler tick and full-frame benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use textfx::cluster::clusters_from_text;
use textfx::{
    AnimatedText, AnimationConfig, AnimationScheduler, AnsiWriter, EffectKind, FrameBuffer,
    FrameTiming,
};

const FRAME: Duration = Duration::from_millis(16);

fn scheduler_advance(c: &mut Criterion) {
    let old = clusters_from_text("the quick brown fox jumps over the lazy dog");
    let new = clusters_from_text("the lazy dog naps under the quick brown fox");
    let config = AnimationConfig::new(Duration::from_secs(3600), Duration::from_millis(10));

    c.bench_function("scheduler_advance_43_clusters", |b| {
        let mut scheduler = AnimationScheduler::new(config);
        scheduler.begin(old.clone(), new.clone(), FrameTiming::default());
        let mut timing = FrameTiming::default();
        b.iter(|| {
            timing = timing.next(FRAME);
            black_box(scheduler.advance(timing))
        });
    });

    c.bench_function("scheduler_begin_43_clusters", |b| {
        let mut scheduler = AnimationScheduler::new(config);
        b.iter(|| {
            scheduler.begin(
                black_box(old.clone()),
                black_box(new.clone()),
                FrameTiming::default(),
            )
        });
    });
}

fn animated_frame(c: &mut Criterion) {
    for effect in EffectKind::ALL {
        c.bench_function(&format!("frame_{effect}_update_draw_write"), |b| {
            let mut text = AnimatedText::new(48, 2).with_effect(Some(effect.build()));
            let mut frame = FrameBuffer::new(48, 2);
            let mut writer = AnsiWriter::new(std::io::sink());
            let mut timing = FrameTiming::default();
            let mut flip = false;
            b.iter(|| {
                if !text.is_animating() {
                    flip = !flip;
                    text.set_text(if flip {
                        "animated text transitions"
                    } else {
                        "transitions of animated text"
                    });
                }
                timing = timing.next(FRAME);
                text.update(timing);
                frame.clear(textfx::Rgba::TRANSPARENT);
                text.draw(&mut frame);
                writer.write_frame(&frame);
                let _ = writer.flush();
            });
        });
    }
}

criterion_group!(benches, scheduler_advance, animated_frame);
criterion_main!(benches);
