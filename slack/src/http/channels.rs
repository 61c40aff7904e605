//! Read the message history of a public channel.

use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::timestamp::Timestamp;
use crate::types::Message;
use crate::ChannelId;

/// Fetches history of messages and events from a channel.
///
/// Wraps https://api.slack.com/methods/channels.history

api_call!(history, "channels.history", HistoryRequest => HistoryResponse);

#[derive(Clone, Debug, Serialize, new)]
pub struct HistoryRequest {
    /// Channel to fetch history for.
    pub channel: ChannelId,
    /// Number of messages to return, between 1 and 1000.
    #[new(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Start of time range of messages to include in results.
    #[new(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    /// End of time range of messages to include in results.
    #[new(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct HistoryResponse {
    #[allow(dead_code)]
    ok: bool,
    /// Newest first.
    #[serde(default)]
    pub messages: Vec<Message>,
    pub has_more: Option<bool>,
    pub latest: Option<Timestamp>,
    pub is_limited: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::test_support::Canned;
    use crate::http::Error;

    lazy_static::lazy_static! {
        static ref CHANNEL: ChannelId = "CAGMCM14K".parse().unwrap();
    }

    const HISTORY: &str = r#"{
        "ok": true,
        "latest": "1525306421.000207",
        "messages": [
            {"type": "message", "user": "UAJHFUB0C", "text": "second", "ts": "1525306421.000207"},
            {"type": "message", "user": "UAJHFUB0C", "text": "first", "ts": "1525306400.000100"}
        ],
        "has_more": false,
        "pin_count": 0
    }"#;

    #[test]
    fn test_history() {
        let client = Canned::ok(HISTORY);
        let response = history(&client, "xoxp-token", &HistoryRequest::new(*CHANNEL)).unwrap();

        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.has_more, Some(false));
        assert_eq!(response.messages[0].text, "second");

        let sent = client.sent.borrow();
        assert_eq!(sent[0].0, "https://slack.com/api/channels.history");
        assert_eq!(sent[0].1, "token=xoxp-token&channel=CAGMCM14K");
    }

    #[test]
    fn test_history_bounds() {
        let client = Canned::ok(HISTORY);
        let mut request = HistoryRequest::new(*CHANNEL);
        request.count = Some(50);
        request.start = Some("1525306400.000000".parse().unwrap());
        request.end = Some("1525306500.000000".parse().unwrap());
        history(&client, "t", &request).unwrap();

        assert_eq!(
            client.sent.borrow()[0].1,
            "token=t&channel=CAGMCM14K&count=50&start=1525306400.000000&end=1525306500.000000"
        );
    }

    #[test]
    fn test_history_slack_error() {
        let client = Canned::ok(r#"{"ok": false, "error": "channel_not_found"}"#);
        match history(&client, "t", &HistoryRequest::new(*CHANNEL)) {
            Err(Error::Slack(cause)) => assert_eq!(cause, "channel_not_found"),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_history_not_json() {
        let client = Canned::ok("<html>502 Bad Gateway</html>");
        match history(&client, "t", &HistoryRequest::new(*CHANNEL)) {
            Err(Error::CannotParse(_, body)) => assert!(body.contains("Bad Gateway")),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_history_client_failure() {
        let client = Canned::failing("connection reset by peer");
        match history(&client, "t", &HistoryRequest::new(*CHANNEL)) {
            Err(Error::Client(e)) => assert_eq!(e.to_string(), "connection reset by peer"),
            other => panic!("{:?}", other),
        }
    }
}
