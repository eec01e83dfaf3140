//! Navigation-related controller methods (search, activation)

use anyhow::Result;

use crate::model::{Item, Remote};
use super::AppController;

impl<R: Remote> AppController<R> {
    pub async fn commit_search(&mut self) -> Result<()> {
        let Some(query) = self.model.finish_search() else {
            return Ok(());
        };
        tracing::debug!(query, "Performing search");
        self.model.apply_search(&query).await
    }

    /// Enter on the selection: play a track, open a playlist or pick a device.
    pub async fn activate_selection(&mut self) -> Result<()> {
        match self.model.selection()? {
            Item::Track(track) => self.play_track(&track).await,
            Item::Playlist(playlist) => {
                tracing::debug!(playlist = %playlist.name, "Opening playlist");
                self.model.open_playlist(playlist).await
            }
            Item::Device(device) => self.select_device(device).await,
        }
    }
}
