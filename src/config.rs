//! Client configuration from environment variables.
use std::{env, path::PathBuf, str::FromStr, time::Duration};

use log::LevelFilter;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL of the game server.
    pub server_url: String,
    /// Refresh the snapshot this often; `None` disables polling.
    pub poll_interval: Option<Duration>,
    pub http_timeout: Duration,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub ui: UiConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            poll_interval: None,
            http_timeout: Duration::from_secs(10),
            log_file: PathBuf::from("openhs_client.log"),
            log_level: LevelFilter::Info,
            ui: UiConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `OPENHS_SERVER_URL` - game server base URL (default: `http://localhost:8080`)
    /// - `OPENHS_POLL_SECS` - snapshot refresh interval, 0 disables (default: 0)
    /// - `OPENHS_HTTP_TIMEOUT_SECS` - per-request timeout (default: 10)
    /// - `OPENHS_LOG_FILE` - diagnostic log path (default: `openhs_client.log`)
    /// - `OPENHS_LOG_LEVEL` - `off`, `error`, `warn`, `info`, `debug` or `trace` (default: `info`)
    /// - `OPENHS_LOG_PANEL_HEIGHT` - game log panel height in lines (default: 8)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("OPENHS_SERVER_URL").filter(|url| !url.trim().is_empty()) {
            config.server_url = url.trim().to_string();
        }
        if let Some(secs) = parse::<u64, _>(&lookup, "OPENHS_POLL_SECS") {
            config.poll_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(secs) = parse::<u64, _>(&lookup, "OPENHS_HTTP_TIMEOUT_SECS") {
            config.http_timeout = Duration::from_secs(secs.max(1));
        }
        if let Some(path) = lookup("OPENHS_LOG_FILE") {
            config.log_file = PathBuf::from(path);
        }
        if let Some(level) = parse::<LevelFilter, _>(&lookup, "OPENHS_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(height) = parse::<u16, _>(&lookup, "OPENHS_LOG_PANEL_HEIGHT") {
            config.ui.log_panel_height = height.max(3);
        }

        config
    }
}

/// Terminal layout and pacing.
#[derive(Clone, Debug)]
pub struct UiConfig {
    /// Height of the game log panel, borders included.
    pub log_panel_height: u16,
    /// How long to wait for input before redrawing.
    pub tick_rate: Duration,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            log_panel_height: 8,
            tick_rate: Duration::from_millis(50),
        }
    }
}

fn parse<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}
