use reqwest::{
    Client, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{
    event::EventRecord,
    source::{EventSource, FetchError},
};

/// Base URL of the public GitHub REST API.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Reads public events from the GitHub REST API.
pub struct GithubSource {
    http: Client,
    api_url: String,
}

impl GithubSource {
    pub fn new(api_url: &str, token: Option<&str>, timeout: Duration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Some(token) = token {
            let mut value = HeaderValue::try_from(format!("Bearer {}", token.trim()))
                .map_err(|_| FetchError::InvalidToken)?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    fn events_url(&self, username: &str) -> String {
        format!("{}/users/{username}/events", self.api_url)
    }
}

#[async_trait::async_trait]
impl EventSource for GithubSource {
    #[instrument(skip(self))]
    async fn fetch_events(&self, username: &str) -> Result<Vec<EventRecord>, FetchError> {
        let url = self.events_url(username);
        debug!("Fetching {url}");
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(FetchError::UserNotFound(username.to_string())),
            status if !status.is_success() => return Err(FetchError::UnexpectedStatus(status)),
            _ => {}
        }

        let body = response.bytes().await?;
        let records: Vec<EventRecord> = serde_json::from_slice(&body)?;
        debug!("Received {} events", records.len());
        Ok(records)
    }
}
