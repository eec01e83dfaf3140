//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `text`: Terminal cell width helpers for fixed-width rows
//! - `items`: Tracks, playlists and devices plus their row rendering
//! - `paged`: Lazily paged remote collections
//! - `menu`: Selection cursor and scrolling viewport
//! - `search`: Fuzzy ranking of a loaded collection
//! - `context`: What is being browsed and how it is labelled
//! - `remote`: The Spotify operations the app depends on
//! - `spotify_client`: rspotify-backed implementation of `remote`
//! - `app_model`: Main application model with state management methods

mod text;
mod items;
mod paged;
mod menu;
mod search;
mod context;
mod remote;
mod spotify_client;
mod app_model;

#[cfg(test)]
pub(crate) mod testing;

pub use text::{display_width, fit_width, three_columns, truncate_to_width};

pub use items::{Device, Displayable, Item, Track};

pub use paged::DEFAULT_PAGE_SIZE;

pub use menu::{Listing, MenuState};

pub use context::{Columns, ContextKind};

pub use remote::{PlaybackState, Remote};

pub use spotify_client::SpotifyClient;

pub use app_model::{AppModel, InputMode};
