//! Command line and config file handling
//!
//! Settings come from three places, highest precedence first: command line
//! flags, the `KEY=value` config file, then built-in defaults. Credentials
//! missing from the file are looked up in the `RSPOTIFY_*` environment.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::error::ConfigError;
use crate::model::DEFAULT_PAGE_SIZE;

/// Largest page the Web API hands out
const MAX_PAGE_SIZE: usize = 50;
const DEFAULT_TOKEN_CACHE: &str = ".cache/token.json";
const DEFAULT_LOG_DIR: &str = ".logs";

/// Terminal browser and remote control for a Spotify library
#[derive(Parser, Debug)]
#[command(name = "cob")]
#[command(version)]
pub struct Cli {
    /// Path to the KEY=value config file
    #[arg(short, long, env = "COB_CONFIG", default_value = "config")]
    pub config: PathBuf,

    /// Items requested per page (1-50)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub page_size: Option<u32>,

    /// Directory for the rolling log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub credentials: Credentials,
    pub page_size: usize,
    pub token_cache: PathBuf,
    pub log_dir: PathBuf,
}

/// Parse `KEY=value` lines. Blank lines and `#` comments are skipped, and so
/// are keys whose value is empty.
pub fn parse_pairs(text: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut pairs = HashMap::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::Parse {
                line: number + 1,
                content: line.to_string(),
            });
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() {
            return Err(ConfigError::Parse {
                line: number + 1,
                content: line.to_string(),
            });
        }
        if !value.is_empty() {
            pairs.insert(key.to_string(), value.to_string());
        }
    }
    Ok(pairs)
}

/// Read the config file. A file that does not exist counts as empty.
pub fn load_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_pairs(&text),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl Settings {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = load_file(&cli.config)?;
        Self::resolve(cli, &file, |name| std::env::var(name).ok())
    }

    /// Merge flags, file values and defaults. `env` looks up environment
    /// variables for credentials the file does not provide.
    pub fn resolve<E>(cli: &Cli, file: &HashMap<String, String>, env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let credential = |key: &'static str, var: &'static str| {
            file.get(key)
                .cloned()
                .or_else(|| env(var).filter(|v| !v.trim().is_empty()))
                .ok_or(ConfigError::Missing { key, env: var })
        };

        let credentials = Credentials {
            client_id: credential("CLIENT_ID", "RSPOTIFY_CLIENT_ID")?,
            client_secret: credential("CLIENT_SECRET", "RSPOTIFY_CLIENT_SECRET")?,
            redirect_uri: credential("REDIRECT_URI", "RSPOTIFY_REDIRECT_URI")?,
        };

        let page_size = match (cli.page_size, file.get("PAGE_SIZE")) {
            (Some(size), _) => size as usize,
            (None, Some(value)) => parse_page_size(value)?,
            (None, None) => DEFAULT_PAGE_SIZE,
        };

        let token_cache = file
            .get("TOKEN_CACHE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_CACHE));

        let log_dir = cli
            .log_dir
            .clone()
            .or_else(|| file.get("LOG_DIR").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR));

        Ok(Self {
            credentials,
            page_size,
            token_cache,
            log_dir,
        })
    }
}

fn parse_page_size(value: &str) -> Result<usize, ConfigError> {
    value
        .parse::<usize>()
        .ok()
        .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
        .ok_or_else(|| ConfigError::Invalid {
            key: "PAGE_SIZE".to_string(),
            value: value.to_string(),
        })
}
