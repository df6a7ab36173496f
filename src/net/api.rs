//! HTTP client for the game server.

use std::time::Duration;

use log::debug;
use reqwest::StatusCode;
use thiserror::Error;

use crate::client::ActionRequest;
use crate::snapshot::{GameSnapshot, SnapshotError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("could not reach the game server: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed game snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl ApiError {
    /// Text shown to the user: the server's own words when it gave any.
    pub fn reason(&self) -> String {
        match self {
            ApiError::Status { status, body } => {
                let body = body.trim();
                if body.is_empty() {
                    format!("server answered {status}")
                } else {
                    body.to_string()
                }
            }
            ApiError::Transport(_) => "could not reach the game server".to_string(),
            ApiError::Snapshot(err) => format!("malformed game snapshot ({err})"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/game`
    pub async fn fetch_game(&self) -> Result<GameSnapshot, ApiError> {
        let url = format!("{}/api/game", self.base_url);
        debug!("GET {url}");
        let response = self.http.get(&url).send().await?;
        Self::read_snapshot(response).await
    }

    /// `POST /api/action`; the answer is the next snapshot.
    pub async fn send_action(&self, request: &ActionRequest) -> Result<GameSnapshot, ApiError> {
        let url = format!("{}/api/action", self.base_url);
        debug!("POST {url} {request:?}");
        let response = self.http.post(&url).json(request).send().await?;
        Self::read_snapshot(response).await
    }

    async fn read_snapshot(response: reqwest::Response) -> Result<GameSnapshot, ApiError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }
        Ok(GameSnapshot::from_json(&body)?)
    }
}
