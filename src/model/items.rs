//! Menu item types: tracks, playlists and playback devices

use super::text::{fit_width, three_columns};

/// Anything that can be shown as a menu row and ranked by search.
pub trait Displayable {
    /// Row text occupying exactly `width` terminal cells.
    fn display_text(&self, width: usize) -> String;

    /// Concatenated fields used for fuzzy ranking.
    fn search_text(&self) -> String;
}

/// A track from the saved-tracks library or a playlist
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub album: String,
    pub artist: String,
    /// Empty for entries that cannot be played (local files, episodes, removed tracks)
    pub uri: String,
}

impl Track {
    pub fn is_playable(&self) -> bool {
        !self.uri.is_empty()
    }
}

impl Displayable for Track {
    fn display_text(&self, width: usize) -> String {
        let [name, album, artist] = three_columns(width);
        format!(
            "{} {} {}",
            fit_width(&self.name, name.saturating_sub(1)),
            fit_width(&self.album, album.saturating_sub(1)),
            fit_width(&self.artist, artist),
        )
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.album, self.artist)
    }
}

/// One of the user's playlists
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub uri: String,
    pub name: String,
}

impl Displayable for Playlist {
    fn display_text(&self, width: usize) -> String {
        fit_width(&self.name, width)
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }
}

/// A Spotify Connect playback device
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Device {
    pub id: String,
    pub name: String,
}

impl Displayable for Device {
    fn display_text(&self, width: usize) -> String {
        fit_width(&self.name, width)
    }

    fn search_text(&self) -> String {
        self.name.clone()
    }
}

/// Borrowed view of whichever item sits at a menu position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemRef<'a> {
    Track(&'a Track),
    Playlist(&'a Playlist),
    Device(&'a Device),
}

impl ItemRef<'_> {
    pub fn to_item(self) -> Item {
        match self {
            ItemRef::Track(track) => Item::Track(track.clone()),
            ItemRef::Playlist(playlist) => Item::Playlist(playlist.clone()),
            ItemRef::Device(device) => Item::Device(device.clone()),
        }
    }
}

impl Displayable for ItemRef<'_> {
    fn display_text(&self, width: usize) -> String {
        match self {
            ItemRef::Track(track) => track.display_text(width),
            ItemRef::Playlist(playlist) => playlist.display_text(width),
            ItemRef::Device(device) => device.display_text(width),
        }
    }

    fn search_text(&self) -> String {
        match self {
            ItemRef::Track(track) => track.search_text(),
            ItemRef::Playlist(playlist) => playlist.search_text(),
            ItemRef::Device(device) => device.search_text(),
        }
    }
}

/// Owned copy of a selected item, detached from the collection it came from
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Track(Track),
    Playlist(Playlist),
    Device(Device),
}

/// Conversion of a concrete item into the shared borrowed view.
pub trait AsItemRef {
    fn as_item_ref(&self) -> ItemRef<'_>;
}

impl AsItemRef for Track {
    fn as_item_ref(&self) -> ItemRef<'_> {
        ItemRef::Track(self)
    }
}

impl AsItemRef for Playlist {
    fn as_item_ref(&self) -> ItemRef<'_> {
        ItemRef::Playlist(self)
    }
}

impl AsItemRef for Device {
    fn as_item_ref(&self) -> ItemRef<'_> {
        ItemRef::Device(self)
    }
}
