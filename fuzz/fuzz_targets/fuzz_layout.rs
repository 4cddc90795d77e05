//! Fuzz target for monospace layout.
//!
//! Lays out arbitrary text under arbitrary formats and checks that every
//! cluster lands inside the box and that layout is repeatable.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textfx::{
    FlowDirection, LayoutService, MonospaceLayout, TextAlignment, TextFormat, TextTrimming,
    TextWrapping, VerticalAlignment,
};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    text: &'a str,
    width: u8,
    height: u8,
    alignment: u8,
    vertical: u8,
    trimming: u8,
    wrapping: u8,
    rtl: bool,
}

fn pick<T: Copy>(options: &[T], n: u8) -> T {
    options[n as usize % options.len()]
}

fuzz_target!(|input: Input<'_>| {
    let format = TextFormat::default()
        .with_alignment(pick(
            &[
                TextAlignment::Left,
                TextAlignment::Right,
                TextAlignment::Center,
                TextAlignment::Justify,
            ],
            input.alignment,
        ))
        .with_vertical_alignment(pick(
            &[
                VerticalAlignment::Top,
                VerticalAlignment::Center,
                VerticalAlignment::Bottom,
            ],
            input.vertical,
        ))
        .with_trimming(pick(
            &[
                TextTrimming::None,
                TextTrimming::Clip,
                TextTrimming::CharacterEllipsis,
                TextTrimming::WordEllipsis,
            ],
            input.trimming,
        ))
        .with_wrapping(pick(
            &[TextWrapping::NoWrap, TextWrapping::Word, TextWrapping::Character],
            input.wrapping,
        ))
        .with_direction(if input.rtl {
            FlowDirection::RightToLeft
        } else {
            FlowDirection::LeftToRight
        });
    let (width, height) = (u32::from(input.width).max(1), u32::from(input.height).max(1));

    let layout = MonospaceLayout.layout(input.text, &format, width, height);
    let again = MonospaceLayout.layout(input.text, &format, width, height);
    assert_eq!(layout.clusters(), again.clusters());

    // Offsets increase in logical order.
    for pair in layout.clusters().windows(2) {
        assert!(pair[0].offset < pair[1].offset);
    }
    for cluster in layout.clusters() {
        assert!(cluster.layout_bounds.x.is_finite() && cluster.layout_bounds.y.is_finite());
    }
});
