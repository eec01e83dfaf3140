//! Terminal cell-width helpers
//!
//! Widths are measured in terminal cells, not chars: east-asian wide and
//! fullwidth glyphs advance the cursor by two cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";

pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Take the longest prefix of `s` that fits in `width` cells.
pub fn truncate_to_width(s: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            return &s[..idx];
        }
        used += w;
    }
    s
}

/// Pad or ellipsize `s` so it occupies exactly `width` cells.
pub fn fit_width(s: &str, width: usize) -> String {
    let current = display_width(s);
    if current <= width {
        return pad_to(s.to_string(), current, width);
    }

    if width <= ELLIPSIS.len() {
        let head = truncate_to_width(s, width);
        let used = display_width(head);
        return pad_to(head.to_string(), used, width);
    }

    let head = truncate_to_width(s, width - ELLIPSIS.len());
    let mut out = String::with_capacity(head.len() + ELLIPSIS.len());
    out.push_str(head);
    out.push_str(ELLIPSIS);
    // a wide glyph that did not fit leaves a one-cell gap
    let used = display_width(&out);
    pad_to(out, used, width)
}

fn pad_to(mut s: String, used: usize, width: usize) -> String {
    s.extend(std::iter::repeat_n(' ', width.saturating_sub(used)));
    s
}

/// Split `width` into three near-equal spans, remainder going to the last one.
pub fn three_columns(width: usize) -> [usize; 3] {
    let span = width / 3;
    [span, span, width - 2 * span]
}
