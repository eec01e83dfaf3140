//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules:
//!
//! - `renderer`: Terminal-independent line layout of the browsing panel
//! - `layout`: Banner and panel painting

mod renderer;
mod layout;

use ratatui::{
    layout::{Constraint, Direction, Layout, Position},
    Frame,
};

use crate::model::{AppModel, InputMode, Remote, display_width};

use renderer::{Labels, render};

use layout::BANNER_HEIGHT;

pub struct AppView;

impl AppView {
    /// Menu rows available on a terminal `height` lines tall.
    pub fn viewport_rows(height: u16) -> usize {
        renderer::menu_rows(height.saturating_sub(BANNER_HEIGHT) as usize)
    }

    pub fn render<R: Remote>(frame: &mut Frame, model: &AppModel<R>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BANNER_HEIGHT), // Banner
                Constraint::Min(0),                // Status, labels and menu
            ])
            .split(frame.area());

        layout::render_banner(frame, chunks[0]);

        let panel = chunks[1];
        let labels = Labels {
            status: model.status().unwrap_or_default().to_string(),
            context: model.context().title(),
            search: model.search_line(),
            columns: model.context().columns(),
        };
        let lines = render(
            model.menu(),
            model,
            &labels,
            panel.width as usize,
            panel.height as usize,
        );
        layout::render_panel(frame, panel, lines);

        // Put the cursor at the end of the query being typed
        if matches!(model.input(), InputMode::Search { .. }) && panel.height > 2 {
            let column = display_width(&labels.search).min(panel.width.saturating_sub(1) as usize);
            frame.set_cursor_position(Position::new(panel.x + column as u16, panel.y + 2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::{MockRemote, device, playlists, tracks};
    use ratatui::{Terminal, backend::TestBackend, style::Modifier};

    async fn model() -> AppModel<MockRemote> {
        let remote = MockRemote::new(tracks(30), playlists(2), vec![device("d1", "Laptop")]);
        AppModel::new(remote, 10).await.unwrap()
    }

    fn rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    #[tokio::test]
    async fn paints_banner_labels_and_menu() {
        let mut model = model().await;
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        model.prepare_frame(AppView::viewport_rows(20)).await.unwrap();
        model.menu_mut().move_down(2);
        model.set_status("PLAYBACK STARTED");

        terminal.draw(|frame| AppView::render(frame, &model)).unwrap();
        let rows = rows(&terminal);

        let top = BANNER_HEIGHT as usize;
        assert!(rows[0].contains("____"));
        assert_eq!(rows[top], "PLAYBACK STARTED");
        assert_eq!(rows[top + 1], "SAVED TRACKS");
        assert!(rows[top + 4].starts_with("TRACK"));
        assert!(rows[top + 5].starts_with("Track 0"));
        assert!(rows[top + 7].starts_with("Track 2"));
        assert_eq!(rows.len(), 20);
        assert!(rows[19].starts_with("Track 8"));

        let buffer = terminal.backend().buffer();
        assert!(buffer[(0, (top + 7) as u16)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(0, (top + 6) as u16)].modifier.contains(Modifier::REVERSED));
    }

    #[tokio::test]
    async fn search_input_shows_query_and_cursor() {
        let mut model = model().await;
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        model.begin_search();
        model.push_search_char('a');
        model.push_search_char('b');

        terminal.draw(|frame| AppView::render(frame, &model)).unwrap();
        let top = BANNER_HEIGHT;
        assert_eq!(rows(&terminal)[top as usize + 2], "SEARCH / ab");
        terminal.backend_mut().assert_cursor_position(Position::new(11, top + 2));
    }

    #[test]
    fn viewport_rows_exclude_banner_and_labels() {
        assert_eq!(AppView::viewport_rows(20), 20 - BANNER_HEIGHT as usize - 5);
        assert_eq!(AppView::viewport_rows(4), 0);
    }
}
