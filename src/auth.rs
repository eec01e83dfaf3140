//! OAuth login through rspotify
//!
//! The first run opens the authorization page and asks for the redirect URL
//! on the terminal; afterwards the cached token is reused and refreshed
//! automatically.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use rspotify::{AuthCodeSpotify, Config, OAuth, prelude::*};

use crate::config::Credentials;

pub const SCOPES: &str = "user-library-read user-modify-playback-state user-read-playback-state playlist-read-private playlist-read-collaborative";

fn build_client(credentials: &Credentials, token_cache: &Path) -> AuthCodeSpotify {
    let creds = rspotify::Credentials::new(&credentials.client_id, &credentials.client_secret);
    let oauth = OAuth {
        redirect_uri: credentials.redirect_uri.clone(),
        scopes: SCOPES
            .split_whitespace()
            .map(|s| s.to_string())
            .collect::<HashSet<String>>(),
        ..Default::default()
    };
    let config = Config {
        token_cached: true,
        token_refreshing: true,
        cache_path: token_cache.to_path_buf(),
        ..Default::default()
    };
    AuthCodeSpotify::with_config(creds, oauth, config)
}

/// Log in before the terminal UI takes over stdin and stdout.
pub async fn authorize(credentials: &Credentials, token_cache: &Path) -> Result<AuthCodeSpotify> {
    if let Some(dir) = token_cache.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create token cache directory {}", dir.display()))?;
    }

    let spotify = build_client(credentials, token_cache);
    let url = spotify.get_authorize_url(false)?;
    tracing::info!(cache = %token_cache.display(), "Requesting access token");
    spotify
        .prompt_for_token(&url)
        .await
        .context("authorization with Spotify failed")?;

    let user = spotify.me().await?;
    tracing::info!(user_id = %user.id, "Authorized");
    Ok(spotify)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://127.0.0.1:8888/callback".to_string(),
        }
    }

    #[test]
    fn client_caches_and_refreshes_tokens() {
        let spotify = build_client(&credentials(), Path::new("cache/token.json"));

        assert!(spotify.config.token_cached);
        assert!(spotify.config.token_refreshing);
        assert_eq!(spotify.config.cache_path, Path::new("cache/token.json"));
        assert_eq!(spotify.oauth.redirect_uri, "http://127.0.0.1:8888/callback");
        assert_eq!(spotify.oauth.scopes.len(), 5);
        assert!(spotify.oauth.scopes.contains("user-modify-playback-state"));
    }

    #[test]
    fn authorize_url_carries_the_client_id() {
        let spotify = build_client(&credentials(), Path::new("token.json"));
        let url = spotify.get_authorize_url(false).unwrap();
        assert!(url.contains("client_id=id"));
    }
}
