//! Layout rendering (banner, browsing panel)

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use super::renderer::{DisplayLine, LineStyle};

const BANNER: [&str; 5] = [
    r"  ____ ___  ____     ____ _     ___ _____ _   _ _____",
    r" / ___/ _ \| __ )   / ___| |   |_ _| ____| \ | |_   _|",
    r"| |  | | | |  _ \  | |   | |    | ||  _| |  \| | | |",
    r"| |__| |_| | |_) | | |___| |___ | || |___| |\  | | |",
    r" \____\___/|____/   \____|_____|___|_____|_| \_| |_|",
];

/// Banner art plus one spacer line
pub const BANNER_HEIGHT: u16 = BANNER.len() as u16 + 1;

pub fn render_banner(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = BANNER.iter().map(|line| Line::raw(*line)).collect();
    let banner = Paragraph::new(lines).style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(banner, area);
}

fn line_style(style: LineStyle) -> Style {
    match style {
        LineStyle::Plain => Style::default(),
        LineStyle::Bold => Style::default().add_modifier(Modifier::BOLD),
        LineStyle::Inverted | LineStyle::Selected => Style::default().add_modifier(Modifier::REVERSED),
    }
}

pub fn render_panel(frame: &mut Frame, area: Rect, lines: Vec<DisplayLine>) {
    let lines: Vec<Line> = lines
        .into_iter()
        .map(|line| Line::styled(line.text, line_style(line.style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}
