//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! drives model transitions and issues playback commands.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `playback`: Playback control methods
//! - `navigation`: Context switching, search and activation

mod input;
mod playback;
mod navigation;

use anyhow::Result;

use crate::error::status_message;
use crate::model::{AppModel, Remote};

/// Sole owner of the application model
pub struct AppController<R: Remote> {
    pub(crate) model: AppModel<R>,
}

impl<R: Remote> AppController<R> {
    pub fn new(model: AppModel<R>) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &AppModel<R> {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AppModel<R> {
        &mut self.model
    }

    /// Turn a recoverable failure into the status line.
    ///
    /// Unrecognised failures are handed back so the loop can end.
    pub fn report(&mut self, error: anyhow::Error) -> Result<()> {
        match status_message(&error) {
            Some(message) => {
                tracing::warn!(error = %format!("{error:#}"), status = %message, "Recovered from failure");
                self.model.set_status(message);
                Ok(())
            }
            None => {
                tracing::error!(error = %format!("{error:#}"), "Unrecoverable failure");
                Err(error)
            }
        }
    }
}
