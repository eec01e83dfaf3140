//! In-memory remote used by unit tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::error::{ApiStatus, FetchError};

use super::items::{Device, Playlist, Track};
use super::paged::{Page, PageSource};
use super::remote::{PlaybackState, Remote};

pub fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track {
            name: format!("Track {i}"),
            album: format!("Album {}", i / 10),
            artist: format!("Artist {}", i % 3),
            uri: format!("spotify:track:{i}"),
        })
        .collect()
}

pub fn playlists(n: usize) -> Vec<Playlist> {
    (0..n)
        .map(|i| Playlist {
            id: format!("pl{i}"),
            uri: format!("spotify:playlist:pl{i}"),
            name: format!("Playlist {i}"),
        })
        .collect()
}

pub fn device(id: &str, name: &str) -> Device {
    Device {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// Page source over a shared vector that records every request.
#[derive(Clone)]
pub struct VecSource<T> {
    items: Arc<Mutex<Vec<T>>>,
    calls: Arc<Mutex<Vec<(usize, usize)>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl<T: Clone> VecSource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(Mutex::new(items)),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_next: Arc::new(Mutex::new(false)),
        }
    }

    /// `(offset, limit)` of every fetch so far
    pub fn calls(&self) -> Vec<(usize, usize)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_items(&self, items: Vec<T>) {
        *self.items.lock().unwrap() = items;
    }

    pub fn fail_next(&self) {
        *self.fail_next.lock().unwrap() = true;
    }
}

impl<T: Clone> PageSource for VecSource<T> {
    type Item = T;

    async fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page<T>, FetchError> {
        self.calls.lock().unwrap().push((offset, limit));
        if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
            return Err(FetchError::Remote(
                ApiStatus {
                    status: 503,
                    message: "status code 503 Service Unavailable".to_string(),
                }
                .into(),
            ));
        }

        let items = self.items.lock().unwrap();
        let end = (offset + limit).min(items.len());
        Ok(Page {
            items: items.get(offset..end).map(<[T]>::to_vec).unwrap_or_default(),
            total: items.len(),
        })
    }
}

#[derive(Clone)]
pub struct MockRemote {
    pub saved: VecSource<Track>,
    pub playlists: VecSource<Playlist>,
    pub devices: VecSource<Device>,
    playlist_tracks: Arc<Mutex<HashMap<String, VecSource<Track>>>>,
    playback: Arc<Mutex<Option<PlaybackState>>>,
    commands: Arc<Mutex<Vec<String>>>,
    fail_with: Arc<Mutex<Option<u16>>>,
}

impl MockRemote {
    pub fn new(saved: Vec<Track>, playlists: Vec<Playlist>, devices: Vec<Device>) -> Self {
        Self {
            saved: VecSource::new(saved),
            playlists: VecSource::new(playlists),
            devices: VecSource::new(devices),
            playlist_tracks: Arc::new(Mutex::new(HashMap::new())),
            playback: Arc::new(Mutex::new(None)),
            commands: Arc::new(Mutex::new(Vec::new())),
            fail_with: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_playlist_tracks(self, playlist_id: &str, tracks: Vec<Track>) -> Self {
        self.playlist_tracks
            .lock()
            .unwrap()
            .insert(playlist_id.to_string(), VecSource::new(tracks));
        self
    }

    pub fn set_playback(&self, state: Option<PlaybackState>) {
        *self.playback.lock().unwrap() = state;
    }

    /// Make the next playback command fail with HTTP `status`.
    pub fn fail_next_command(&self, status: u16) {
        *self.fail_with.lock().unwrap() = Some(status);
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }

    fn record(&self, command: String) -> Result<()> {
        if let Some(status) = self.fail_with.lock().unwrap().take() {
            return Err(ApiStatus {
                status,
                message: format!("http error: status code {status}"),
            }
            .into());
        }
        self.commands.lock().unwrap().push(command);
        Ok(())
    }
}

impl Remote for MockRemote {
    type SavedTracks = VecSource<Track>;
    type Playlists = VecSource<Playlist>;
    type PlaylistTracks = VecSource<Track>;
    type Devices = VecSource<Device>;

    fn saved_tracks(&self) -> Self::SavedTracks {
        self.saved.clone()
    }

    fn playlists(&self) -> Self::Playlists {
        self.playlists.clone()
    }

    fn playlist_tracks(&self, playlist: &Playlist) -> Self::PlaylistTracks {
        self.playlist_tracks
            .lock()
            .unwrap()
            .entry(playlist.id.clone())
            .or_insert_with(|| VecSource::new(Vec::new()))
            .clone()
    }

    fn devices(&self) -> Self::Devices {
        self.devices.clone()
    }

    async fn playback_state(&self) -> Result<Option<PlaybackState>> {
        Ok(*self.playback.lock().unwrap())
    }

    async fn play_track(&self, device: &Device, track: &Track, context_uri: Option<&str>) -> Result<()> {
        self.record(format!(
            "play {} on {} in {}",
            track.uri,
            device.id,
            context_uri.unwrap_or("-")
        ))
    }

    async fn resume(&self) -> Result<()> {
        self.record("resume".to_string())
    }

    async fn pause(&self) -> Result<()> {
        self.record("pause".to_string())
    }

    async fn add_to_queue(&self, track: &Track) -> Result<()> {
        self.record(format!("queue {}", track.uri))
    }

    async fn next_track(&self) -> Result<()> {
        self.record("next".to_string())
    }

    async fn previous_track(&self) -> Result<()> {
        self.record("previous".to_string())
    }

    async fn set_shuffle(&self, state: bool) -> Result<()> {
        self.record(format!("shuffle {state}"))
    }

    async fn transfer_playback(&self, device: &Device) -> Result<()> {
        self.record(format!("transfer {}", device.id))
    }
}
