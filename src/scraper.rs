//! One-shot scrape of a channel: fetch a page of history and aggregate it.

use derive_new::new;
use log::{error, info, warn};
use slack_api::http::channels::{self, HistoryRequest};
use slack_api::http::SlackSender;
use slack_api::{ChannelId, Timestamp};

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::error::ScrapeError;
use crate::metadata::Summary;

/// Page size used when a request doesn't name one. This is the most `channels.history` returns.
pub const DEFAULT_COUNT: u32 = 1000;

#[derive(Clone, Debug, PartialEq, Eq, new)]
pub struct ScrapeRequest {
    pub channel: ChannelId,
    /// Only messages after this.
    #[new(default)]
    pub start: Option<Timestamp>,
    /// Only messages before this.
    #[new(default)]
    pub end: Option<Timestamp>,
    #[new(default)]
    pub count: Option<u32>,
}

impl ScrapeRequest {
    fn history_request(&self) -> HistoryRequest {
        let mut request = HistoryRequest::new(self.channel);
        request.count = Some(self.count.unwrap_or(DEFAULT_COUNT));
        request.start = self.start;
        request.end = self.end;
        request
    }
}

/// Fetches one page of `request.channel` and summarizes it.
///
/// Nothing here panics or retries; every failure, including an empty range, comes back as a
/// `ScrapeError` so a periodic caller can log it and move on to the next channel.
pub fn scrape<C: SlackSender>(
    client: &C,
    token: &str,
    request: &ScrapeRequest,
) -> Result<Summary, ScrapeError> {
    let response =
        channels::history(client, token, &request.history_request()).map_err(|e| {
            let e = ScrapeError::from(e);
            error!("channels.history for {} failed: {}", request.channel, e);
            e
        })?;

    if response.has_more == Some(true) {
        warn!(
            "{} has more messages in range than were returned; only the newest {} were read",
            request.channel,
            response.messages.len()
        );
    }

    let mut summary = aggregate(&response.messages).ok_or_else(|| {
        warn!("no messages in {}", request.channel);
        ScrapeError::NoMessages
    })?;
    summary.channel_id = Some(request.channel);

    info!(
        "scraped {} messages by {} authors from {}",
        response.messages.len(),
        summary.user_metadata.len(),
        request.channel
    );
    Ok(summary)
}

/// Scrapes every channel in `config`, in order, with the configured token.
pub fn scrape_configured<C: SlackSender>(
    client: &C,
    config: &Config,
) -> Vec<(ChannelId, Result<Summary, ScrapeError>)> {
    config
        .requests()
        .into_iter()
        .map(|request| (request.channel, scrape(client, &config.token, &request)))
        .collect()
}
