//! Error types shared by the collection, menu and configuration layers
//!
//! Remote and menu failures that the user can act on are turned into a
//! status-line message by [`status_message`]; everything else propagates to
//! `main` and ends the session.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by a page source.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote API call itself failed
    #[error(transparent)]
    Remote(#[from] anyhow::Error),

    /// The remote answered with data that cannot be turned into a page
    #[error("malformed page: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum CollectionError {
    /// Index past the end of a collection whose size is known
    #[error("index {index} out of range for collection of {len} items")]
    OutOfRange { index: usize, len: usize },

    #[error("failed to fetch page: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MenuError {
    #[error("nothing is selected")]
    EmptySelection,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config line {line} is not KEY=value: {content:?}")]
    Parse { line: usize, content: String },

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },

    #[error("missing {key} (set it in the config file or via {env})")]
    Missing { key: &'static str, env: &'static str },
}

/// Unsuccessful HTTP status answered by the Web API
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiStatus {
    pub status: u16,
    pub message: String,
}

pub const NO_DEVICE_MESSAGE: &str = "NO DEVICE SPECIFIED... PRESS d";

/// Map a recoverable failure onto the text shown in the status line.
///
/// Returns `None` for failures the interface cannot recover from.
pub fn status_message(error: &anyhow::Error) -> Option<String> {
    if let Some(MenuError::EmptySelection) = error.downcast_ref::<MenuError>() {
        return Some("NOTHING SELECTED".to_string());
    }

    let status = api_status(error)?;
    let message = match status {
        // also what Spotify answers with NO_ACTIVE_DEVICE
        404 => NO_DEVICE_MESSAGE,
        403 => "ACTION FORBIDDEN... IS THIS A PREMIUM ACCOUNT?",
        401 => "AUTHENTICATION EXPIRED... PLEASE RESTART",
        429 => "RATE LIMITED... WAIT A MOMENT",
        _ => return None,
    };
    Some(message.to_string())
}

/// HTTP status of the first [`ApiStatus`] in the chain. Page failures keep
/// theirs inside [`FetchError::Remote`].
fn api_status(error: &anyhow::Error) -> Option<u16> {
    if let Some(api) = error.downcast_ref::<ApiStatus>() {
        return Some(api.status);
    }
    error.chain().find_map(|cause| {
        if let Some(api) = cause.downcast_ref::<ApiStatus>() {
            return Some(api.status);
        }
        match cause.downcast_ref::<FetchError>() {
            Some(FetchError::Remote(inner)) => inner.downcast_ref::<ApiStatus>().map(|api| api.status),
            _ => None,
        }
    })
}
