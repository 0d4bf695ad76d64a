mod app_error;

use clap::Parser;
use std::{io::Write, time::Duration};
use tracing::info;

use crate::{
    feed::write_feed,
    source::{DEFAULT_API_URL, EventSource, GithubSource},
};

pub use app_error::AppError;

/// Prints a summary of a GitHub user's recent public activity.
#[derive(Parser, Debug)]
#[command(name = "github-activity", version, about)]
pub struct Cli {
    /// GitHub user whose activity is shown
    #[arg(value_parser = parse_username)]
    pub username: String,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Token for authenticated requests, which get a higher rate limit
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "GITHUB_ACTIVITY_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

/// Suffix GitHub gives the accounts of GitHub Apps, e.g. `dependabot[bot]`.
const BOT_SUFFIX: &str = "[bot]";

/// GitHub logins are ASCII letters, digits and hyphens, optionally followed by
/// the bot suffix.
fn parse_username(raw: &str) -> Result<String, String> {
    if raw.is_empty() {
        return Err("username must not be empty".to_string());
    }
    let login = raw.strip_suffix(BOT_SUFFIX).unwrap_or(raw);
    if login.is_empty() || !login.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(format!("'{raw}' is not a valid GitHub username"));
    }
    Ok(raw.to_string())
}

/// Fetches the user's events and prints the report to stdout.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    let source = GithubSource::new(
        &cli.api_url,
        cli.token.as_deref(),
        Duration::from_secs(cli.timeout_secs),
    )?;
    report(&source, &cli.username, &mut std::io::stdout()).await
}

/// Fetches the user's events from `source` and writes the report to `out`.
pub async fn report<W: Write>(
    source: &(dyn EventSource + Send + Sync),
    username: &str,
    out: &mut W,
) -> Result<(), AppError> {
    let records = source.fetch_events(username).await?;
    info!("Fetched {} events for {username}", records.len());
    write_feed(out, username, &records)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        event::{EventRecord, Repo},
        source::FetchError,
    };
    use clap::CommandFactory;
    use serde_json::json;

    /// Serves a fixed feed, or reports every user as missing.
    struct StaticSource {
        records: Option<Vec<EventRecord>>,
    }

    #[async_trait::async_trait]
    impl EventSource for StaticSource {
        async fn fetch_events(&self, username: &str) -> Result<Vec<EventRecord>, FetchError> {
            self.records
                .clone()
                .ok_or_else(|| FetchError::UserNotFound(username.to_string()))
        }
    }

    fn record(event_type: &str) -> EventRecord {
        EventRecord {
            event_type: event_type.to_string(),
            repo: Repo {
                name: "acme/widgets".to_string(),
            },
            payload: json!({}),
        }
    }

    #[test]
    fn test_command_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_requires_exactly_one_username() {
        assert!(Cli::try_parse_from(["github-activity"]).is_err());
        assert!(Cli::try_parse_from(["github-activity", "alice", "bob"]).is_err());

        let cli = Cli::try_parse_from(["github-activity", "alice"]).unwrap();
        assert_eq!(cli.username, "alice");
        assert_eq!(cli.timeout_secs, 30);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "github-activity",
            "--api-url",
            "http://localhost:8080",
            "--timeout-secs",
            "5",
            "alice",
        ])
        .unwrap();
        assert_eq!(cli.api_url, "http://localhost:8080");
        assert_eq!(cli.timeout_secs, 5);
    }

    #[test]
    fn test_username_validation() {
        assert_eq!(parse_username("octo-cat42").unwrap(), "octo-cat42");
        assert!(parse_username("").is_err());
        assert!(parse_username("../admin").is_err());
        assert!(parse_username("alice bob").is_err());
    }

    #[test]
    fn test_bot_usernames() {
        assert_eq!(parse_username("dependabot[bot]").unwrap(), "dependabot[bot]");
        assert!(parse_username("[bot]").is_err());
        assert!(parse_username("dependabot[bot]x").is_err());
        assert!(parse_username("depend[bot]abot").is_err());

        let cli = Cli::try_parse_from(["github-activity", "github-actions[bot]"]).unwrap();
        assert_eq!(cli.username, "github-actions[bot]");
    }

    #[tokio::test]
    async fn test_report() {
        let source = StaticSource {
            records: Some(vec![record("WatchEvent"), record("PublicEvent")]),
        };
        let mut out = Vec::new();
        report(&source, "alice", &mut out).await.unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "alice's GitHub activity:\n\
             • starred repo 'acme/widgets';\n\n\
             • Made repo 'acme/widgets' public.\n"
        );
    }

    #[tokio::test]
    async fn test_report_missing_user() {
        let source = StaticSource { records: None };
        let mut out = Vec::new();
        let error = report(&source, "ghost", &mut out).await.unwrap_err();
        assert!(matches!(error, AppError::UserNotFound(ref user) if user == "ghost"));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_report_unknown_event_writes_nothing() {
        let source = StaticSource {
            records: Some(vec![record("WatchEvent"), record("TeleportEvent")]),
        };
        let mut out = Vec::new();
        let error = report(&source, "alice", &mut out).await.unwrap_err();
        assert_eq!(error.as_ref(), "UNKNOWN_EVENT_TYPE");
        assert!(out.is_empty());
    }
}
