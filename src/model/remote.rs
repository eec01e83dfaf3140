//! The remote service as seen by the application: page sources for every
//! browsable context plus the playback commands the menu can trigger.

use anyhow::Result;

use super::items::{Device, Playlist, Track};
use super::paged::PageSource;

/// Snapshot of the remote player
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub shuffle: bool,
}

#[allow(async_fn_in_trait)]
pub trait Remote {
    type SavedTracks: PageSource<Item = Track>;
    type Playlists: PageSource<Item = Playlist>;
    type PlaylistTracks: PageSource<Item = Track>;
    type Devices: PageSource<Item = Device>;

    fn saved_tracks(&self) -> Self::SavedTracks;
    fn playlists(&self) -> Self::Playlists;
    fn playlist_tracks(&self, playlist: &Playlist) -> Self::PlaylistTracks;
    fn devices(&self) -> Self::Devices;

    async fn playback_state(&self) -> Result<Option<PlaybackState>>;

    /// Start `track` on `device`. With a context URI playback continues
    /// through that context after the track.
    async fn play_track(&self, device: &Device, track: &Track, context_uri: Option<&str>) -> Result<()>;

    async fn resume(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn add_to_queue(&self, track: &Track) -> Result<()>;
    async fn next_track(&self) -> Result<()>;
    async fn previous_track(&self) -> Result<()>;
    async fn set_shuffle(&self, state: bool) -> Result<()>;
    async fn transfer_playback(&self, device: &Device) -> Result<()>;
}
