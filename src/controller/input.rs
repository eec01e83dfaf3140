//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::{InputMode, Remote};
use super::AppController;

/// What a key press asks the application to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    Up,
    Down,
    PageUp,
    PageDown,
    PreviousTrack,
    NextTrack,
    TogglePlayback,
    ToggleShuffle,
    Queue,
    Activate,
    SavedTracks,
    Playlists,
    Devices,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchCommit,
    SearchCancel,
}

/// Map a key press onto a command for the current input mode.
pub fn command_for(key: KeyEvent, mode: &InputMode) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    if let InputMode::Search { .. } = mode {
        return match key.code {
            KeyCode::Enter => Some(Command::SearchCommit),
            KeyCode::Esc => Some(Command::SearchCancel),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Char(c) => Some(Command::SearchInput(c)),
            _ => None,
        };
    }

    let command = match key.code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Up => Command::Up,
        KeyCode::Down => Command::Down,
        KeyCode::PageUp => Command::PageUp,
        KeyCode::PageDown => Command::PageDown,
        KeyCode::Left => Command::PreviousTrack,
        KeyCode::Right => Command::NextTrack,
        KeyCode::Char(' ') => Command::TogglePlayback,
        KeyCode::Char('s') => Command::ToggleShuffle,
        KeyCode::Char('e') => Command::Queue,
        KeyCode::Enter => Command::Activate,
        KeyCode::Char('t') => Command::SavedTracks,
        KeyCode::Char('p') => Command::Playlists,
        KeyCode::Char('d') => Command::Devices,
        KeyCode::Char('/') => Command::StartSearch,
        _ => return None,
    };
    Some(command)
}

impl<R: Remote> AppController<R> {
    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        match command_for(key, self.model.input()) {
            Some(command) => self.execute(command).await,
            None => Ok(()),
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<()> {
        tracing::trace!(?command, "Executing command");
        let page = self.model.menu().viewport_size();

        match command {
            Command::Quit => self.model.quit(),
            Command::Up => self.model.menu_mut().move_up(1),
            Command::Down => self.model.menu_mut().move_down(1),
            Command::PageUp => self.model.menu_mut().move_up(page),
            Command::PageDown => self.model.menu_mut().move_down(page),
            Command::PreviousTrack => self.previous_track().await?,
            Command::NextTrack => self.next_track().await?,
            Command::TogglePlayback => self.toggle_playback().await?,
            Command::ToggleShuffle => self.toggle_shuffle().await?,
            Command::Queue => self.queue_selection().await?,
            Command::Activate => self.activate_selection().await?,
            Command::SavedTracks => self.model.show_saved_tracks().await?,
            Command::Playlists => self.model.show_playlists().await?,
            Command::Devices => self.model.show_devices().await?,
            Command::StartSearch => self.model.begin_search(),
            Command::SearchInput(c) => self.model.push_search_char(c),
            Command::SearchBackspace => self.model.pop_search_char(),
            Command::SearchCommit => self.commit_search().await?,
            Command::SearchCancel => self.model.cancel_search(),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::testing::{MockRemote, device, playlists, tracks};
    use crate::model::{AppModel, ContextKind};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn searching() -> InputMode {
        InputMode::Search {
            query: String::new(),
        }
    }

    #[test]
    fn browse_keys() {
        let browse = InputMode::Browse;
        assert_eq!(command_for(press(KeyCode::Char('q')), &browse), Some(Command::Quit));
        assert_eq!(command_for(press(KeyCode::PageDown), &browse), Some(Command::PageDown));
        assert_eq!(command_for(press(KeyCode::Left), &browse), Some(Command::PreviousTrack));
        assert_eq!(command_for(press(KeyCode::Char(' ')), &browse), Some(Command::TogglePlayback));
        assert_eq!(command_for(press(KeyCode::Char('e')), &browse), Some(Command::Queue));
        assert_eq!(command_for(press(KeyCode::Char('/')), &browse), Some(Command::StartSearch));
        assert_eq!(command_for(press(KeyCode::Char('x')), &browse), None);
    }

    #[test]
    fn search_mode_captures_characters() {
        let mode = searching();
        assert_eq!(command_for(press(KeyCode::Char('q')), &mode), Some(Command::SearchInput('q')));
        assert_eq!(command_for(press(KeyCode::Enter), &mode), Some(Command::SearchCommit));
        assert_eq!(command_for(press(KeyCode::Esc), &mode), Some(Command::SearchCancel));
        assert_eq!(command_for(press(KeyCode::Up), &mode), None);
    }

    #[test]
    fn ctrl_c_always_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(key, &InputMode::Browse), Some(Command::Quit));
        assert_eq!(command_for(key, &searching()), Some(Command::Quit));
    }

    async fn controller() -> AppController<MockRemote> {
        let remote = MockRemote::new(tracks(40), playlists(3), vec![device("d1", "Laptop")]);
        AppController::new(AppModel::new(remote, 10).await.unwrap())
    }

    #[tokio::test]
    async fn paging_moves_by_the_viewport() {
        let mut c = controller().await;
        c.model_mut().prepare_frame(7).await.unwrap();

        c.handle_key_event(press(KeyCode::PageDown)).await.unwrap();
        assert_eq!(c.model().menu().selected_index(), 7);
        c.handle_key_event(press(KeyCode::Down)).await.unwrap();
        c.handle_key_event(press(KeyCode::PageUp)).await.unwrap();
        assert_eq!(c.model().menu().selected_index(), 1);
    }

    #[tokio::test]
    async fn typed_search_is_applied_on_enter() {
        let mut c = controller().await;
        for code in [KeyCode::Char('/'), KeyCode::Char('3'), KeyCode::Char('9'), KeyCode::Enter] {
            c.handle_key_event(press(code)).await.unwrap();
        }

        assert_eq!(c.model().input(), &InputMode::Browse);
        assert_eq!(c.model().context().query(), Some("39"));
    }

    #[tokio::test]
    async fn context_keys_switch_contexts() {
        let mut c = controller().await;
        c.handle_key_event(press(KeyCode::Char('p'))).await.unwrap();
        assert_eq!(c.model().context(), &ContextKind::Playlists);
        c.handle_key_event(press(KeyCode::Char('d'))).await.unwrap();
        assert_eq!(c.model().context(), &ContextKind::Devices);
        c.handle_key_event(press(KeyCode::Char('t'))).await.unwrap();
        assert_eq!(c.model().context(), &ContextKind::SavedTracks);
    }

    #[tokio::test]
    async fn releases_are_ignored() {
        let mut c = controller().await;
        let mut key = press(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        c.handle_key_event(key).await.unwrap();
        assert!(!c.model().should_quit());

        c.handle_key_event(press(KeyCode::Char('q'))).await.unwrap();
        assert!(c.model().should_quit());
    }
}
