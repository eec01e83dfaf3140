//! Playback control methods

use anyhow::Result;

use crate::error::NO_DEVICE_MESSAGE;
use crate::model::{Device, Item, Remote, Track};

use super::AppController;

impl<R: Remote> AppController<R> {
    pub async fn play_track(&mut self, track: &Track) -> Result<()> {
        let refusal = match self.model.device() {
            None => Some(NO_DEVICE_MESSAGE),
            Some(_) if !track.is_playable() => Some("THIS ITEM CANNOT BE PLAYED"),
            Some(device) => {
                let context_uri = self.model.context().context_uri();
                self.model.remote().play_track(device, track, context_uri).await?;
                tracing::info!(track = %track.name, device = %device.name, context = ?context_uri, "Playing track");
                None
            }
        };

        if let Some(message) = refusal {
            self.model.set_status(message);
        }
        Ok(())
    }

    pub async fn toggle_playback(&mut self) -> Result<()> {
        let is_playing = self
            .model
            .remote()
            .playback_state()
            .await?
            .is_some_and(|state| state.is_playing);
        tracing::debug!(is_playing, "Toggling playback");

        if is_playing {
            self.model.remote().pause().await?;
            self.model.set_status("PLAYBACK PAUSED");
        } else {
            self.model.remote().resume().await?;
            self.model.set_status("PLAYBACK STARTED");
        }
        Ok(())
    }

    /// Flip shuffle on the current playback. Nothing happens when idle.
    pub async fn toggle_shuffle(&mut self) -> Result<()> {
        let Some(state) = self.model.remote().playback_state().await? else {
            tracing::debug!("No playback to shuffle");
            return Ok(());
        };

        let shuffle = !state.shuffle;
        self.model.remote().set_shuffle(shuffle).await?;
        self.model.set_status(if shuffle { "SHUFFLE ON" } else { "SHUFFLE OFF" });
        Ok(())
    }

    pub async fn queue_selection(&mut self) -> Result<()> {
        match self.model.selection()? {
            Item::Track(track) if track.is_playable() => {
                self.model.remote().add_to_queue(&track).await?;
                tracing::info!(track = %track.name, "Added track to queue");
                self.model.set_status(format!("ADDED {} TO THE QUEUE", track.name));
            }
            _ => self.model.set_status("ONLY TRACKS CAN BE QUEUED"),
        }
        Ok(())
    }

    pub async fn next_track(&mut self) -> Result<()> {
        self.model.remote().next_track().await?;
        tracing::info!("Skipped to next track");
        Ok(())
    }

    pub async fn previous_track(&mut self) -> Result<()> {
        self.model.remote().previous_track().await?;
        tracing::info!("Went back to previous track");
        Ok(())
    }

    /// Target `device` from now on, moving playback there if something is playing.
    pub async fn select_device(&mut self, device: Device) -> Result<()> {
        let playing = self
            .model
            .remote()
            .playback_state()
            .await?
            .is_some_and(|state| state.is_playing);
        if playing {
            self.model.remote().transfer_playback(&device).await?;
        }

        self.model.set_status(format!("USING DEVICE: {}", device.name));
        self.model.set_device(device);
        Ok(())
    }
}
