//! Line layout of the browsing panel
//!
//! Turns the menu and its labels into plain styled lines. Painting them is
//! left to the caller so the layout can be checked without a terminal.

use crate::model::{Columns, Displayable, Listing, MenuState, fit_width, three_columns, truncate_to_width};

/// Lines above the first menu row: status, context, search, spacer, header
pub const HEADER_LINES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Bold,
    /// Column header
    Inverted,
    /// Row under the cursor
    Selected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    pub style: LineStyle,
}

impl DisplayLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Context text shown above the menu
#[derive(Clone, Debug)]
pub struct Labels {
    pub status: String,
    pub context: String,
    pub search: String,
    pub columns: Columns,
}

/// Menu rows that fit in a panel of `height` lines.
pub fn menu_rows(height: usize) -> usize {
    height.saturating_sub(HEADER_LINES)
}

pub fn header_text(columns: Columns, width: usize) -> String {
    match columns {
        Columns::Tabular(labels) => {
            let spans = three_columns(width);
            let mut text = String::new();
            for (i, (label, span)) in labels.iter().zip(spans).enumerate() {
                if i + 1 < labels.len() {
                    text.push_str(&fit_width(label, span.saturating_sub(1)));
                    text.push(' ');
                } else {
                    text.push_str(&fit_width(label, span));
                }
            }
            text
        }
        Columns::Single(label) => fit_width(label, width),
    }
}

/// Lay out one frame of `width` x `height` cells.
///
/// Reads only: rows that are not loaded yet come out blank.
pub fn render<L>(menu: &MenuState, items: &L, labels: &Labels, width: usize, height: usize) -> Vec<DisplayLine>
where
    L: Listing + ?Sized,
{
    let clip = |text: &str| truncate_to_width(text, width).to_string();

    let mut lines = vec![
        DisplayLine::new(clip(&labels.status), LineStyle::Bold),
        DisplayLine::new(clip(&labels.context), LineStyle::Plain),
        DisplayLine::new(clip(&labels.search), LineStyle::Plain),
        DisplayLine::new("", LineStyle::Plain),
        DisplayLine::new(clip(&header_text(labels.columns, width)), LineStyle::Inverted),
    ];

    for index in menu.visible_range() {
        let text = items
            .item(index)
            .map(|item| item.display_text(width))
            .unwrap_or_default();
        let style = if index == menu.selected_index() {
            LineStyle::Selected
        } else {
            LineStyle::Plain
        };
        lines.push(DisplayLine::new(clip(&text), style));
    }

    lines.truncate(height);
    lines
}
