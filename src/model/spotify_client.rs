//! Spotify API client wrapper implementing [`Remote`]

use std::sync::Arc;

use anyhow::Result;
use rspotify::{
    AuthCodeSpotify, ClientError,
    http::HttpError,
    model::{
        self as spotify, Offset, PlayContextId, PlayableId, PlayableItem, PlaylistId, TrackId,
    },
    prelude::*,
};

use crate::error::{ApiStatus, FetchError};

use super::items::{Device, Playlist, Track};
use super::paged::{Page, PageSource};
use super::remote::{PlaybackState, Remote};

/// Spotify API client shared by the page sources it hands out
#[derive(Clone)]
pub struct SpotifyClient {
    client: Arc<AuthCodeSpotify>,
}

impl SpotifyClient {
    pub fn new(client: AuthCodeSpotify) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Lift unsuccessful HTTP answers into [`ApiStatus`] so callers can match on
/// the status code.
fn api_error(e: ClientError) -> anyhow::Error {
    let status = match &e {
        ClientError::Http(http) => match http.as_ref() {
            HttpError::StatusCode(response) => Some(response.status().as_u16()),
            HttpError::Client(_) => None,
        },
        _ => None,
    };
    match status {
        Some(status) => ApiStatus {
            status,
            message: e.to_string(),
        }
        .into(),
        None => e.into(),
    }
}

fn remote_error(e: ClientError) -> FetchError {
    FetchError::Remote(api_error(e))
}

fn limit_offset(offset: usize, limit: usize) -> Result<(u32, u32), FetchError> {
    let convert = |v: usize| {
        u32::try_from(v).map_err(|_| FetchError::Malformed(format!("page bound {v} exceeds u32")))
    };
    Ok((convert(limit)?, convert(offset)?))
}

/// Reject non-empty pages that do not start where they were asked to.
fn check_offset(asked: u32, answered: u32, is_empty: bool) -> Result<(), FetchError> {
    if !is_empty && answered != asked {
        return Err(FetchError::Malformed(format!(
            "asked for offset {asked}, got {answered}"
        )));
    }
    Ok(())
}

fn to_track(track: &spotify::FullTrack) -> Track {
    Track {
        name: track.name.clone(),
        album: track.album.name.clone(),
        artist: track.artists.first().map(|a| a.name.clone()).unwrap_or_default(),
        uri: track
            .id
            .as_ref()
            .map(|id| format!("spotify:track:{}", id.id()))
            .unwrap_or_default(),
    }
}

// ============================================================================
// Page sources
// ============================================================================

pub struct SavedTracksSource {
    client: Arc<AuthCodeSpotify>,
}

impl PageSource for SavedTracksSource {
    type Item = Track;

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page<Track>, FetchError> {
        let (limit, offset) = limit_offset(offset, limit)?;
        tracing::debug!(offset, limit, "API: current_user_saved_tracks");
        let page = self
            .client
            .current_user_saved_tracks_manual(None, Some(limit), Some(offset))
            .await
            .map_err(remote_error)?;
        check_offset(offset, page.offset, page.items.is_empty())?;

        Ok(Page {
            items: page.items.iter().map(|saved| to_track(&saved.track)).collect(),
            total: page.total as usize,
        })
    }
}

pub struct PlaylistsSource {
    client: Arc<AuthCodeSpotify>,
}

impl PageSource for PlaylistsSource {
    type Item = Playlist;

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page<Playlist>, FetchError> {
        let (limit, offset) = limit_offset(offset, limit)?;
        tracing::debug!(offset, limit, "API: current_user_playlists");
        let page = self
            .client
            .current_user_playlists_manual(Some(limit), Some(offset))
            .await
            .map_err(remote_error)?;
        check_offset(offset, page.offset, page.items.is_empty())?;

        let items = page
            .items
            .into_iter()
            .map(|playlist| Playlist {
                id: playlist.id.id().to_string(),
                uri: format!("spotify:playlist:{}", playlist.id.id()),
                name: playlist.name,
            })
            .collect();

        Ok(Page {
            items,
            total: page.total as usize,
        })
    }
}

pub struct PlaylistTracksSource {
    client: Arc<AuthCodeSpotify>,
    playlist_id: String,
}

impl PageSource for PlaylistTracksSource {
    type Item = Track;

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page<Track>, FetchError> {
        let (limit, offset) = limit_offset(offset, limit)?;
        let id = PlaylistId::from_id(self.playlist_id.as_str())
            .map_err(|e| FetchError::Malformed(format!("playlist id {:?}: {e}", self.playlist_id)))?;
        tracing::debug!(playlist = %self.playlist_id, offset, limit, "API: playlist_items");

        let page = self
            .client
            .playlist_items_manual(id, None, None, Some(limit), Some(offset))
            .await
            .map_err(remote_error)?;
        check_offset(offset, page.offset, page.items.is_empty())?;

        // Keep every entry so positions line up with the server; episodes,
        // local files and removed tracks become unplayable rows.
        let items = page
            .items
            .iter()
            .map(|item| match &item.track {
                Some(PlayableItem::Track(track)) if !item.is_local => to_track(track),
                Some(PlayableItem::Track(track)) => Track {
                    uri: String::new(),
                    ..to_track(track)
                },
                Some(PlayableItem::Episode(episode)) => Track {
                    name: episode.name.clone(),
                    album: episode.show.name.clone(),
                    artist: episode.show.publisher.clone(),
                    uri: String::new(),
                },
                _ => Track {
                    name: "(unavailable)".to_string(),
                    ..Track::default()
                },
            })
            .collect();

        Ok(Page {
            items,
            total: page.total as usize,
        })
    }
}

/// The devices endpoint is not paged, so every request lists all devices
/// and slices out the requested window.
pub struct DevicesSource {
    client: Arc<AuthCodeSpotify>,
}

impl PageSource for DevicesSource {
    type Item = Device;

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page<Device>, FetchError> {
        tracing::debug!(offset, limit, "API: device");
        let devices: Vec<Device> = self
            .client
            .device()
            .await
            .map_err(remote_error)?
            .into_iter()
            .filter_map(|device| {
                // restricted devices have no id and cannot be targeted
                Some(Device {
                    id: device.id?,
                    name: device.name,
                })
            })
            .collect();

        let total = devices.len();
        Ok(Page {
            items: devices.into_iter().skip(offset).take(limit).collect(),
            total,
        })
    }
}

// ============================================================================
// Remote
// ============================================================================

impl Remote for SpotifyClient {
    type SavedTracks = SavedTracksSource;
    type Playlists = PlaylistsSource;
    type PlaylistTracks = PlaylistTracksSource;
    type Devices = DevicesSource;

    fn saved_tracks(&self) -> SavedTracksSource {
        SavedTracksSource {
            client: self.client.clone(),
        }
    }

    fn playlists(&self) -> PlaylistsSource {
        PlaylistsSource {
            client: self.client.clone(),
        }
    }

    fn playlist_tracks(&self, playlist: &Playlist) -> PlaylistTracksSource {
        PlaylistTracksSource {
            client: self.client.clone(),
            playlist_id: playlist.id.clone(),
        }
    }

    fn devices(&self) -> DevicesSource {
        DevicesSource {
            client: self.client.clone(),
        }
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>> {
        let playback = self
            .client
            .current_playback(None, None::<Vec<_>>)
            .await
            .map_err(api_error)?;
        if let Some(ref playback) = playback {
            tracing::trace!(
                is_playing = playback.is_playing,
                shuffle = playback.shuffle_state,
                device = ?playback.device.name,
                "API: current_playback"
            );
        }
        Ok(playback.map(|playback| PlaybackState {
            is_playing: playback.is_playing,
            shuffle: playback.shuffle_state,
        }))
    }

    async fn play_track(&self, device: &Device, track: &Track, context_uri: Option<&str>) -> Result<()> {
        tracing::debug!(uri = %track.uri, device = %device.id, context = ?context_uri, "API: play_track");

        match context_uri.and_then(|uri| uri.strip_prefix("spotify:playlist:")) {
            Some(playlist_id) => {
                // Offset::Uri starts the context at the chosen track
                let context = PlayContextId::Playlist(PlaylistId::from_id(playlist_id)?);
                self.client
                    .start_context_playback(
                        context,
                        Some(device.id.as_str()),
                        Some(Offset::Uri(track.uri.clone())),
                        None,
                    )
                    .await
                    .map_err(api_error)?;
            }
            None => {
                let id = TrackId::from_uri(&track.uri)?;
                self.client
                    .start_uris_playback([PlayableId::Track(id)], Some(device.id.as_str()), None, None)
                    .await
                    .map_err(api_error)?;
            }
        }
        Ok(())
    }

    async fn resume(&self) -> Result<()> {
        tracing::debug!("API: resume_playback");
        self
            .client
            .resume_playback(None, None)
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        tracing::debug!("API: pause_playback");
        self
            .client
            .pause_playback(None)
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn add_to_queue(&self, track: &Track) -> Result<()> {
        tracing::debug!(uri = %track.uri, "API: add_item_to_queue");
        let id = TrackId::from_uri(&track.uri)?;
        self
            .client
            .add_item_to_queue(PlayableId::Track(id), None)
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn next_track(&self) -> Result<()> {
        tracing::debug!("API: next_track");
        self
            .client
            .next_track(None)
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn previous_track(&self) -> Result<()> {
        tracing::debug!("API: previous_track");
        self
            .client
            .previous_track(None)
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn set_shuffle(&self, state: bool) -> Result<()> {
        tracing::debug!(state, "API: shuffle");
        self
            .client
            .shuffle(state, None)
            .await
            .map_err(api_error)?;
        Ok(())
    }

    async fn transfer_playback(&self, device: &Device) -> Result<()> {
        tracing::debug!(device = %device.id, "API: transfer_playback");
        self
            .client
            .transfer_playback(&device.id, Some(true))
            .await
            .map_err(api_error)?;
        Ok(())
    }
}
