mod github_source;

use crate::event::EventRecord;

pub use github_source::{DEFAULT_API_URL, GithubSource};

/// Error type for fetching a user's events.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("No such user '{0}'")]
    UserNotFound(String),

    #[error("Received bad status code: {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode events: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Token is not a valid header value")]
    InvalidToken,
}

/// Where activity feeds come from.
#[async_trait::async_trait]
pub trait EventSource {
    /// Returns the user's recent events, most recent first.
    async fn fetch_events(&self, username: &str) -> Result<Vec<EventRecord>, FetchError>;
}
