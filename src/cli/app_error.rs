use tracing::warn;

use crate::{feed::FeedError, render::RenderError, source::FetchError};

/// Error type for a run of the tool.
///
/// Every failure is reduced to one of these kinds. The kind doubles as a
/// stable error code in SCREAMING_SNAKE_CASE, e.g. `USER_NOT_FOUND`.
#[derive(Debug, thiserror::Error, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AppError {
    #[error("No such user '{0}'!")]
    UserNotFound(String),

    #[error("{0}")]
    TransportFailure(FetchError),

    #[error("{0}")]
    DecodeFailure(String),

    #[error("Unknown event type: '{0}'")]
    UnknownEventType(String),

    #[error("GitHub token is not a valid header value")]
    InvalidToken,

    #[error("Failed to write report: {0}")]
    OutputFailure(std::io::Error),
}

impl AppError {
    /// Logs the error with its code.
    pub fn log(&self) {
        let error_code = self.as_ref();
        warn!("Failing with {error_code}: {self}");
    }
}

/// Converts fetch errors into application errors.
impl From<FetchError> for AppError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::UserNotFound(user) => AppError::UserNotFound(user),
            FetchError::Decode(e) => AppError::DecodeFailure(e.to_string()),
            FetchError::InvalidToken => AppError::InvalidToken,
            e @ (FetchError::UnexpectedStatus(_) | FetchError::Transport(_)) => {
                AppError::TransportFailure(e)
            }
        }
    }
}

/// Converts render errors into application errors.
impl From<RenderError> for AppError {
    fn from(error: RenderError) -> Self {
        match error {
            RenderError::UnknownEventType(tag) => AppError::UnknownEventType(tag),
            e @ RenderError::MalformedPayload { .. } => AppError::DecodeFailure(e.to_string()),
        }
    }
}

/// Converts report errors into application errors.
impl From<FeedError> for AppError {
    fn from(error: FeedError) -> Self {
        match error {
            FeedError::Render(e) => e.into(),
            FeedError::Output(e) => AppError::OutputFailure(e),
        }
    }
}
