//! Greedy, script-aware line wrapping for card titles.
//!
//! Lines are packed top to bottom and returned bottom to top, because titles
//! grow upward from the date line. When the title runs out of vertical room
//! the current line is replaced by the previous candidate plus an ellipsis.

use super::script::{is_cjk, tokenize};
use crate::fonts::ResolvedFont;

/// Appended to the last line of a truncated title.
pub const ELLIPSIS: &str = "…";

/// Width of a string as it would be drawn.
pub trait TextMeasurer {
    fn text_width(&self, text: &str) -> f32;
}

impl TextMeasurer for ResolvedFont {
    fn text_width(&self, text: &str) -> f32 {
        super::shaper::shape(self, text).width
    }
}

/// Wrapped lines, bottom line first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WrappedBlock {
    pub lines: Vec<String>,
    /// True when the title did not fit and was cut short.
    pub truncated: bool,
}

impl WrappedBlock {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines from the top of the block down, i.e. in reading order.
    pub fn reading_order(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().rev().map(String::as_str)
    }

    /// Vertical position of line `index` when the block sits on `anchor_y`.
    pub fn line_y(&self, index: usize, anchor_y: f32, line_height: f32) -> f32 {
        anchor_y - (index + 1) as f32 * line_height
    }
}

/// Wraps `text` into lines no wider than `max_width`.
///
/// A single token wider than `max_width` still gets a line of its own.
/// Truncation compares `available_height` against `line_height * (index - 1)`
/// where `index` is the position of the token that overflowed.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    text: &str,
    measurer: &M,
    max_width: f32,
    available_height: f32,
    line_height: f32,
) -> WrappedBlock {
    if text.is_empty() {
        return WrappedBlock::default();
    }

    let tokens = tokenize(text);
    // A missing successor counts as non-CJK, so a trailing CJK token gets a space.
    let next_is_cjk = |index: usize| tokens.get(index + 1).is_some_and(|t| is_cjk(t));
    let with_spacing = |index: usize, base: &str| {
        let token = tokens[index].as_str();
        let mut s = String::with_capacity(base.len() + token.len() + 1);
        s.push_str(base);
        s.push_str(token);
        if !is_cjk(token) || !next_is_cjk(index) {
            s.push(' ');
        }
        s
    };

    let mut lines = Vec::new();
    let mut line = String::new();
    let mut last_line = String::new();
    let mut truncated = false;

    for index in 0..tokens.len() {
        let candidate = with_spacing(index, &line);
        if measurer.text_width(&candidate) > max_width && index > 0 {
            if available_height < line_height * (index as f32 - 1.0) {
                line = format!("{}{}", last_line, ELLIPSIS);
                truncated = true;
                break;
            }
            lines.push(std::mem::take(&mut line));
            last_line.clear();
            line = with_spacing(index, "");
        } else {
            last_line = std::mem::replace(&mut line, candidate);
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines.reverse();
    WrappedBlock { lines, truncated }
}
