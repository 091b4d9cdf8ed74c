//! Labeled rendering of the captured pane.

use crate::display_width::{char_width, display_width};
use crate::pane::{Line, flatten};
use crate::search::Position;

/// Compose the styled buffer with each label drawn over its match.
///
/// The pane model is left untouched. Text runs are prefixed with
/// `text_attrs` and labels with `label_attrs`. Each label replaces as many
/// source characters as it needs to cover its own width; when that swallows
/// part of a wide glyph the gap is filled with spaces, so every row keeps the
/// width it was captured with. Positions with an empty label are skipped.
pub fn render(
    lines: &[Line],
    positions: &[Position],
    labels: &[String],
    text_attrs: &str,
    label_attrs: &str,
) -> String {
    let raw = flatten(lines);
    let mut order: Vec<usize> = (0..positions.len().min(labels.len())).collect();
    order.sort_by_key(|&i| positions[i].offset);

    let mut out = String::with_capacity(raw.len() * 2);
    let mut cut = 0;

    for i in order {
        let (position, label) = (&positions[i], &labels[i]);
        if label.is_empty() || position.offset < cut || position.offset > raw.len() {
            continue;
        }

        out.push_str(text_attrs);
        out.push_str(&raw[cut..position.offset]);
        out.push_str(label_attrs);
        out.push_str(label);

        let label_width = display_width(label);
        let mut covered = 0;
        let mut consumed = 0;
        for c in raw[position.offset..].chars() {
            if covered >= label_width || c == '\r' || c == '\n' {
                break;
            }
            covered += char_width(c);
            consumed += c.len_utf8();
        }
        if covered > label_width {
            out.push_str(&" ".repeat(covered - label_width));
        }
        cut = position.offset + consumed;
    }

    out.push_str(text_attrs);
    out.push_str(&raw[cut..]);
    out
}
