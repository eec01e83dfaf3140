//! The logical collection currently being browsed

use super::items::Playlist;

/// Column header shown above the menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Columns {
    /// Three near-equal spans, remainder to the last
    Tabular([&'static str; 3]),
    Single(&'static str),
}

const TRACK_COLUMNS: Columns = Columns::Tabular(["TRACK", "ALBUM", "ARTIST"]);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextKind {
    SavedTracks,
    Playlist(Playlist),
    Playlists,
    Devices,
    /// A ranked view over the base collection of `origin`
    SearchResult {
        origin: Box<ContextKind>,
        query: String,
    },
}

impl ContextKind {
    /// The browsable collection behind this context.
    pub fn base(&self) -> &ContextKind {
        match self {
            ContextKind::SearchResult { origin, .. } => origin.base(),
            other => other,
        }
    }

    /// Context URI passed along when a track is played from here.
    pub fn context_uri(&self) -> Option<&str> {
        match self.base() {
            ContextKind::Playlist(playlist) => Some(playlist.uri.as_str()),
            _ => None,
        }
    }

    pub fn title(&self) -> String {
        match self {
            ContextKind::SavedTracks => "SAVED TRACKS".to_string(),
            ContextKind::Playlist(playlist) => format!("PLAYLIST: {}", playlist.name),
            ContextKind::Playlists => "USER PLAYLISTS".to_string(),
            ContextKind::Devices => "DEVICES".to_string(),
            ContextKind::SearchResult { origin, .. } => origin.title(),
        }
    }

    pub fn columns(&self) -> Columns {
        match self {
            ContextKind::SavedTracks | ContextKind::Playlist(_) => TRACK_COLUMNS,
            ContextKind::Playlists => Columns::Single("PLAYLIST NAME"),
            ContextKind::Devices => Columns::Single("DEVICE NAME"),
            ContextKind::SearchResult { origin, .. } => origin.columns(),
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            ContextKind::SearchResult { query, .. } => Some(query),
            _ => None,
        }
    }
}
