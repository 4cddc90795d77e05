//! Cell-grid layout for monospace terminals.

use super::{
    FlowDirection, LayoutService, TextAlignment, TextFormat, TextLayout, TextTrimming,
    TextWrapping, VerticalAlignment,
};
use crate::cluster::{GraphemeCluster, Rect};
use crate::unicode::{display_width_with_method, grapheme_indices, is_line_break};

/// Lays text out on a grid where every row is one cell tall.
///
/// # Examples
///
/// ```
/// use textfx::layout::{LayoutService, MonospaceLayout, TextFormat, TextTrimming};
///
/// let format = TextFormat::default().with_trimming(TextTrimming::CharacterEllipsis);
/// let layout = MonospaceLayout.layout("hello world", &format, 8, 1);
/// assert_eq!(layout.clusters().len(), 8);
/// assert!(layout.is_trimmed());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MonospaceLayout;

#[derive(Clone, Copy, Debug)]
struct Item {
    index: usize,
    width: u32,
    is_space: bool,
    is_break: bool,
    trimmed: bool,
}

#[derive(Debug, Default)]
struct Line {
    items: Vec<Item>,
    /// Ended by a soft wrap rather than a hard break or the end of text.
    wrapped: bool,
}

impl Line {
    fn width(&self) -> u32 {
        self.items.iter().map(|item| item.width).sum()
    }

    /// Width without trailing whitespace and line breaks.
    fn visible_width(&self) -> u32 {
        let end = self.visible_end();
        self.items[..end].iter().map(|item| item.width).sum()
    }

    fn visible_end(&self) -> usize {
        self.items
            .iter()
            .rposition(|item| !item.is_space && !item.is_break)
            .map_or(0, |i| i + 1)
    }
}

impl LayoutService for MonospaceLayout {
    fn layout(&self, text: &str, format: &TextFormat, width: u32, height: u32) -> TextLayout {
        let graphemes: Vec<(usize, &str)> = grapheme_indices(text).collect();
        if graphemes.is_empty() {
            return TextLayout::new(Vec::new(), width, height, 0, format.clone());
        }

        let lines = break_lines(&graphemes, format, width);
        let lines = trim_lines(lines, format, width, height);
        let clusters = position(&graphemes, &lines, format, width, height);
        TextLayout::new(clusters, width, height, lines.len(), format.clone())
    }
}

fn measure(grapheme: &str, col: u32, format: &TextFormat) -> u32 {
    if grapheme == "\t" {
        let tab = format.tab_width.max(1);
        tab - (col % tab)
    } else if is_line_break(grapheme) {
        0
    } else {
        u32::try_from(display_width_with_method(grapheme, format.width_method)).unwrap_or(u32::MAX)
    }
}

fn break_lines(graphemes: &[(usize, &str)], format: &TextFormat, width: u32) -> Vec<Line> {
    let word_wrap = format.wrapping == TextWrapping::Word;
    let mut lines = Vec::new();
    let mut current = Line::default();
    let mut col = 0u32;
    // Position in `current.items` just after the last whitespace.
    let mut last_space: Option<usize> = None;

    for (index, &(_, grapheme)) in graphemes.iter().enumerate() {
        if is_line_break(grapheme) {
            current.items.push(Item {
                index,
                width: 0,
                is_space: false,
                is_break: true,
                trimmed: false,
            });
            lines.push(std::mem::take(&mut current));
            col = 0;
            last_space = None;
            continue;
        }

        let is_space = grapheme.chars().all(char::is_whitespace);
        let mut cluster_width = measure(grapheme, col, format);

        // Whitespace hangs past the edge under word wrapping.
        let overflows = col > 0 && col.saturating_add(cluster_width) > width;
        if format.wrapping != TextWrapping::NoWrap && overflows && !(word_wrap && is_space) {
            let carried = match last_space {
                Some(pos) if word_wrap => current.items.split_off(pos),
                _ => Vec::new(),
            };
            current.wrapped = true;
            lines.push(std::mem::replace(
                &mut current,
                Line {
                    items: carried,
                    wrapped: false,
                },
            ));
            col = current.width();
            last_space = None;
            cluster_width = measure(grapheme, col, format);
        }

        current.items.push(Item {
            index,
            width: cluster_width,
            is_space,
            is_break: false,
            trimmed: false,
        });
        col = col.saturating_add(cluster_width);
        if word_wrap && is_space {
            last_space = Some(current.items.len());
        }
    }

    lines.push(current);
    lines
}

fn trim_lines(mut lines: Vec<Line>, format: &TextFormat, width: u32, height: u32) -> Vec<Line> {
    if format.trimming == TextTrimming::None {
        return lines;
    }

    let max_rows = (height as usize).max(1);
    let more_rows = lines
        .get(max_rows..)
        .is_some_and(|rest| rest.iter().any(|line| !line.items.is_empty()));
    lines.truncate(max_rows);

    let last_row = lines.len().saturating_sub(1);
    let mut kept = Vec::with_capacity(lines.len());
    for (row, mut line) in lines.into_iter().enumerate() {
        let fit = fitting_len(&line.items, width);
        let mut cut = line.items[fit..]
            .iter()
            .any(|item| !item.is_space && !item.is_break);
        line.items.truncate(fit);
        if row == last_row && more_rows {
            cut = true;
        }

        if cut && format.trimming.uses_sign() {
            while line.items.last().is_some_and(|item| item.is_break) {
                line.items.pop();
            }
            if format.trimming == TextTrimming::WordEllipsis {
                if let Some(pos) = line.items.iter().rposition(|item| item.is_space) {
                    line.items.truncate(pos + 1);
                }
            }
            if let Some(last) = line.items.last_mut() {
                last.trimmed = true;
            }
            line.wrapped = false;
            kept.push(line);
            break;
        }
        kept.push(line);
    }
    kept
}

/// Number of leading items that fit in `width` columns.
fn fitting_len(items: &[Item], width: u32) -> usize {
    let mut col = 0u32;
    for (i, item) in items.iter().enumerate() {
        col = col.saturating_add(item.width);
        if col > width {
            return i;
        }
    }
    items.len()
}

fn position(
    graphemes: &[(usize, &str)],
    lines: &[Line],
    format: &TextFormat,
    width: u32,
    height: u32,
) -> Vec<GraphemeCluster> {
    let box_width = i64::from(width);
    let rows = i64::try_from(lines.len()).unwrap_or(i64::MAX);
    let top = match format.vertical_alignment {
        VerticalAlignment::Top => 0,
        VerticalAlignment::Center => (i64::from(height) - rows).div_euclid(2),
        VerticalAlignment::Bottom => i64::from(height) - rows,
    };

    let mut clusters = Vec::new();
    for (row, line) in lines.iter().enumerate() {
        let y = (top + row as i64) as f32;
        let visible = i64::from(line.visible_width());
        let left = match format.alignment {
            TextAlignment::Left | TextAlignment::Justify => 0,
            TextAlignment::Right => box_width - visible,
            TextAlignment::Center => (box_width - visible).div_euclid(2),
        };

        let gaps = if format.alignment == TextAlignment::Justify && line.wrapped {
            justify_gaps(line, (box_width - visible).max(0) as u32)
        } else {
            vec![0; line.items.len()]
        };

        let mut x = left;
        for (item, extra) in line.items.iter().zip(gaps) {
            let (offset, grapheme) = graphemes[item.index];
            let cluster_width = i64::from(item.width);
            let cell_x = match format.direction {
                FlowDirection::LeftToRight => x,
                FlowDirection::RightToLeft => box_width - x - cluster_width,
            };
            let bounds = Rect::new(cell_x as f32, y, item.width as f32, 1.0);
            clusters.push(
                GraphemeCluster::new(grapheme, offset, grapheme.len(), bounds)
                    .with_draw_bounds(draw_bounds(bounds, format.alignment))
                    .with_trimmed(item.trimmed),
            );
            x += cluster_width + i64::from(extra);
        }
    }
    clusters
}

/// Extra columns after each item so inner whitespace fills `extra` columns.
fn justify_gaps(line: &Line, extra: u32) -> Vec<u32> {
    let end = line.visible_end();
    let spaces: Vec<usize> = (0..end).filter(|&i| line.items[i].is_space).collect();
    let mut gaps = vec![0; line.items.len()];
    if spaces.is_empty() || extra == 0 {
        return gaps;
    }
    let count = spaces.len() as u32;
    for (n, &i) in spaces.iter().enumerate() {
        gaps[i] = extra / count + u32::from((n as u32) < extra % count);
    }
    gaps
}

/// Anchor rectangle for effects: the aligned edge, vertically centered.
fn draw_bounds(bounds: Rect, alignment: TextAlignment) -> Rect {
    let y = bounds.y + bounds.height * 0.5;
    let x = match alignment {
        TextAlignment::Left | TextAlignment::Justify => bounds.x,
        TextAlignment::Right => bounds.right(),
        TextAlignment::Center => bounds.x + bounds.width * 0.5,
    };
    Rect::new(x, y, bounds.width, bounds.height)
}
