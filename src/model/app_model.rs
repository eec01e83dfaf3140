//! Main application model with state management
//!
//! The model is owned by the control loop alone. Everything that changes
//! when the user switches what is being browsed (context tag, backing
//! collection, search ranking and menu) lives in [`ActiveContext`] and is
//! swapped as one unit by a single transition method per navigation command.

use anyhow::Result;

use crate::error::{CollectionError, MenuError};

use super::context::ContextKind;
use super::items::{Device, Item, ItemRef, Playlist};
use super::menu::{Listing, MenuState};
use super::paged::PagedCollection;
use super::remote::Remote;
use super::search::{Ranking, SearchIndex};

/// Whether keystrokes drive the menu or edit the search query
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Browse,
    Search {
        query: String,
    },
}

/// Collection backing the active context. Saved tracks and playlists live
/// for the whole session in [`AppModel`]; the others are owned here.
enum Source<R: Remote> {
    SavedTracks,
    Playlists,
    Playlist(PagedCollection<R::PlaylistTracks>),
    Devices(PagedCollection<R::Devices>),
}

struct ActiveContext<R: Remote> {
    kind: ContextKind,
    source: Source<R>,
    ranking: Ranking,
    menu: MenuState,
}

impl<R: Remote> ActiveContext<R> {
    fn new(kind: ContextKind, source: Source<R>, len: usize) -> Self {
        Self {
            kind,
            source,
            ranking: Ranking::PassThrough,
            menu: MenuState::new(len),
        }
    }
}

/// Main application model containing all state
pub struct AppModel<R: Remote> {
    remote: R,
    page_size: usize,
    saved_tracks: PagedCollection<R::SavedTracks>,
    playlists: PagedCollection<R::Playlists>,
    active: ActiveContext<R>,
    search_index: SearchIndex,
    device: Option<Device>,
    status: Option<String>,
    input: InputMode,
    should_quit: bool,
}

impl<R: Remote> AppModel<R> {
    /// Build the initial state: saved tracks on screen, first device selected.
    pub async fn new(remote: R, page_size: usize) -> Result<Self> {
        let mut devices = PagedCollection::new(remote.devices(), page_size);
        let device = match devices.get(0).await {
            Ok(device) => Some(device.clone()),
            Err(CollectionError::OutOfRange { .. }) => None,
            Err(e) => return Err(e.into()),
        };
        tracing::info!(device = ?device.as_ref().map(|d| &d.name), "Initial playback device");

        let mut saved_tracks = PagedCollection::new(remote.saved_tracks(), page_size);
        let len = saved_tracks.length().await?;
        let playlists = PagedCollection::new(remote.playlists(), page_size);

        Ok(Self {
            remote,
            page_size,
            saved_tracks,
            playlists,
            active: ActiveContext::new(ContextKind::SavedTracks, Source::SavedTracks, len),
            search_index: SearchIndex::default(),
            device,
            status: None,
            input: InputMode::Browse,
            should_quit: false,
        })
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn context(&self) -> &ContextKind {
        &self.active.kind
    }

    pub fn menu(&self) -> &MenuState {
        &self.active.menu
    }

    pub fn menu_mut(&mut self) -> &mut MenuState {
        &mut self.active.menu
    }

    // ========================================================================
    // Context transitions
    // ========================================================================

    pub async fn show_saved_tracks(&mut self) -> Result<()> {
        let len = self.saved_tracks.length().await?;
        self.switch_to(ActiveContext::new(ContextKind::SavedTracks, Source::SavedTracks, len));
        Ok(())
    }

    pub async fn show_playlists(&mut self) -> Result<()> {
        let len = self.playlists.length().await?;
        self.switch_to(ActiveContext::new(ContextKind::Playlists, Source::Playlists, len));
        Ok(())
    }

    pub async fn open_playlist(&mut self, playlist: Playlist) -> Result<()> {
        let mut tracks = PagedCollection::new(self.remote.playlist_tracks(&playlist), self.page_size);
        let len = tracks.length().await?;
        self.switch_to(ActiveContext::new(
            ContextKind::Playlist(playlist),
            Source::Playlist(tracks),
            len,
        ));
        Ok(())
    }

    /// Devices are listed fresh every time.
    pub async fn show_devices(&mut self) -> Result<()> {
        let mut devices = PagedCollection::new(self.remote.devices(), self.page_size);
        let len = devices.length().await?;
        self.switch_to(ActiveContext::new(ContextKind::Devices, Source::Devices(devices), len));
        Ok(())
    }

    /// Rank the whole base collection of the current context by `query`.
    /// A blank query shows the base collection again.
    pub async fn apply_search(&mut self, query: &str) -> Result<()> {
        let index = &self.search_index;
        let (len, ranking) = match &mut self.active.source {
            Source::SavedTracks => {
                let results = index.search(query, self.saved_tracks.load_all().await?);
                (results.len(), results.into_ranking())
            }
            Source::Playlists => {
                let results = index.search(query, self.playlists.load_all().await?);
                (results.len(), results.into_ranking())
            }
            Source::Playlist(tracks) => {
                let results = index.search(query, tracks.load_all().await?);
                (results.len(), results.into_ranking())
            }
            Source::Devices(devices) => {
                let results = index.search(query, devices.load_all().await?);
                (results.len(), results.into_ranking())
            }
        };

        let base = self.active.kind.base().clone();
        let kind = match ranking {
            Ranking::PassThrough => base,
            Ranking::Ranked(_) => ContextKind::SearchResult {
                origin: Box::new(base),
                query: query.trim().to_string(),
            },
        };
        tracing::info!(query, results = len, "Search applied");

        self.active.kind = kind;
        self.active.ranking = ranking;
        self.active.menu = MenuState::new(len);
        Ok(())
    }

    fn switch_to(&mut self, next: ActiveContext<R>) {
        tracing::info!(context = %next.kind.title(), items = next.menu.len(), "Switching context");
        self.active = next;
    }

    // ========================================================================
    // Frame preparation & selection
    // ========================================================================

    /// Size the viewport and fetch whatever it is about to show.
    pub async fn prepare_frame(&mut self, viewport_size: usize) -> Result<()> {
        self.active.menu.set_viewport_size(viewport_size);
        if self.active.menu.is_empty() {
            return Ok(());
        }

        let range = self.active.menu.visible_range();
        let last = range.end.saturating_sub(1).max(self.active.menu.selected_index());
        let Some(last) = self.active.ranking.source_index(last) else {
            return Ok(());
        };
        if matches!(self.active.ranking, Ranking::Ranked(_)) {
            // searches materialise the whole collection up front
            return Ok(());
        }

        match self.ensure_loaded(last).await {
            Ok(()) => Ok(()),
            Err(CollectionError::OutOfRange { len, .. }) => {
                tracing::warn!(expected = self.active.menu.len(), len, "Collection shrank, resetting menu");
                self.active.menu = MenuState::new(len);
                self.active.menu.set_viewport_size(viewport_size);
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn ensure_loaded(&mut self, index: usize) -> Result<(), CollectionError> {
        match &mut self.active.source {
            Source::SavedTracks => self.saved_tracks.ensure_loaded(index).await,
            Source::Playlists => self.playlists.ensure_loaded(index).await,
            Source::Playlist(tracks) => tracks.ensure_loaded(index).await,
            Source::Devices(devices) => devices.ensure_loaded(index).await,
        }
    }

    /// Owned copy of the item under the cursor.
    pub fn selection(&self) -> Result<Item, MenuError> {
        self.active.menu.selection(self).map(ItemRef::to_item)
    }

    // ========================================================================
    // Device, status line & input mode
    // ========================================================================

    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    pub fn set_device(&mut self, device: Device) {
        tracing::info!(device = %device.name, "Playback device selected");
        self.device = Some(device);
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(status = %message, "Status message");
        self.status = Some(message);
    }

    pub fn input(&self) -> &InputMode {
        &self.input
    }

    pub fn begin_search(&mut self) {
        self.input = InputMode::Search {
            query: String::new(),
        };
    }

    pub fn push_search_char(&mut self, c: char) {
        if let InputMode::Search { query } = &mut self.input {
            query.push(c);
        }
    }

    pub fn pop_search_char(&mut self) {
        if let InputMode::Search { query } = &mut self.input {
            query.pop();
        }
    }

    pub fn cancel_search(&mut self) {
        self.input = InputMode::Browse;
    }

    /// Leave search input, returning the typed query.
    pub fn finish_search(&mut self) -> Option<String> {
        match std::mem::take(&mut self.input) {
            InputMode::Search { query } => Some(query),
            InputMode::Browse => None,
        }
    }

    /// Text of the search line: the query being typed, else the one applied.
    pub fn search_line(&self) -> String {
        match &self.input {
            InputMode::Search { query } => format!("SEARCH / {query}"),
            InputMode::Browse => self
                .active
                .kind
                .query()
                .map(|query| format!("SEARCH / {query}"))
                .unwrap_or_default(),
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

impl<R: Remote> Listing for AppModel<R> {
    fn item(&self, index: usize) -> Option<ItemRef<'_>> {
        let index = self.active.ranking.source_index(index)?;
        match &self.active.source {
            Source::SavedTracks => self.saved_tracks.item(index),
            Source::Playlists => self.playlists.item(index),
            Source::Playlist(tracks) => tracks.item(index),
            Source::Devices(devices) => devices.item(index),
        }
    }
}
