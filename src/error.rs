use slack_api::http::{self, SlackSender};
use thiserror::Error;

/// Broad category of a failed scrape, for callers that branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Slack rejected the call (bad token, unknown channel, rate limit, ...).
    Api,
    /// The request never got a response.
    Transport,
    /// The response body wasn't the JSON we expected.
    Parse,
    /// The requested range contained no messages.
    NoMessages,
}

/// Why `scrape` produced no summary. `Display` gives the plain message: Slack's error code, the
/// client's error text, or `no messages`.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("{0}")]
    Api(String),
    #[error("{0}")]
    Transport(String),
    #[error("{source}")]
    Parse {
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("no messages")]
    NoMessages,
}

impl ScrapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScrapeError::Api(_) => ErrorKind::Api,
            ScrapeError::Transport(_) => ErrorKind::Transport,
            ScrapeError::Parse { .. } => ErrorKind::Parse,
            ScrapeError::NoMessages => ErrorKind::NoMessages,
        }
    }
}

impl<C: SlackSender> From<http::Error<C>> for ScrapeError {
    fn from(e: http::Error<C>) -> Self {
        match e {
            http::Error::Slack(reason) => ScrapeError::Api(reason),
            http::Error::CannotParse(source, body) => ScrapeError::Parse { source, body },
            http::Error::Client(cause) => ScrapeError::Transport(cause.to_string()),
        }
    }
}
