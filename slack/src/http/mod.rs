//! Functionality for sending requests to Slack.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Base URL that every Web API method name is appended to.
pub const SLACK_API_URL: &str = "https://slack.com/api/";

/// Anything that can deliver a Web API call and hand back the raw response body.
pub trait SlackSender {
    type Error: ::std::error::Error + 'static;

    /// POST `params` as a form-encoded body, with `token` as the first field.
    fn send_structured<T: ::serde::Serialize>(
        &self,
        method_url: &str,
        token: &str,
        params: &T,
    ) -> Result<String, Self::Error>;
}

/// Encodes the request body the way Slack expects form posts: `token=...&field=...`.
pub fn form_body<T: ::serde::Serialize>(
    token: &str,
    params: &T,
) -> Result<String, ::serde_urlencoded::ser::Error> {
    let mut body = ::serde_urlencoded::to_string(&[("token", token)])?;
    let rest = ::serde_urlencoded::to_string(params)?;
    if !rest.is_empty() {
        body.push('&');
        body.push_str(&rest);
    }
    Ok(body)
}

/// Why the blocking reqwest client could not deliver a call.
#[cfg(feature = "reqwest")]
#[derive(Debug, Error)]
pub enum SendError {
    #[error("could not encode request: {0}")]
    Encode(#[from] ::serde_urlencoded::ser::Error),
    #[error("{0}")]
    Http(#[from] ::reqwest::Error),
}

#[cfg(feature = "reqwest")]
impl SlackSender for ::reqwest::blocking::Client {
    type Error = SendError;

    /// Make an API call to Slack. Takes a struct that describes the request params
    fn send_structured<T: ::serde::Serialize>(
        &self,
        method_url: &str,
        token: &str,
        params: &T,
    ) -> Result<String, SendError> {
        let body = form_body(token, params)?;
        let text = self
            .post(method_url)
            .header(
                ::reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()?
            .text()?;
        Ok(text)
    }
}

macro_rules! api_call {
    ($name:ident, $strname:expr, $reqty:ty => $okty:ty) => {
        pub fn $name<C: $crate::http::SlackSender>(
            client: &C,
            token: &str,
            request: &$reqty,
        ) -> Result<$okty, $crate::http::Error<C>> {
            api_call_internal!(client, token, $strname, request, $okty)
        }
    };
}

macro_rules! api_call_internal {
    ($client:expr, $token:expr, $strname:expr, $request:expr, $okty:ty) => {{
        use $crate::http::Error;

        let url = format!("{}{}", $crate::http::SLACK_API_URL, $strname);
        ::log::debug!("POST {}", url);
        let bytes = $client
            .send_structured(&url, $token, $request)
            .map_err(Error::Client)?;

        match ::serde_json::from_str::<$crate::http::IsError>(&bytes) {
            // Complete failure, can't do anything with the bytes
            Err(e) => Err(Error::CannotParse(e, bytes)),
            // Slack sent us an error
            Ok($crate::http::IsError { ok: false, error }) => {
                Err(Error::Slack(error.unwrap_or_default()))
            }
            // Slack sent us an success result
            Ok($crate::http::IsError { ok: true, .. }) => {
                match ::serde_json::from_str::<$okty>(&bytes) {
                    Ok(r) => Ok(r),
                    Err(e) => Err(Error::CannotParse(e, bytes)),
                }
            }
        }
    }};
}

/// The envelope every Web API response shares.
#[derive(Clone, Debug, Deserialize)]
pub struct IsError {
    pub ok: bool,
    pub error: Option<String>,
}

#[derive(Error)]
pub enum Error<C: SlackSender> {
    /// Slack answered with `ok: false`; holds its error code, e.g. `channel_not_found`.
    #[error("{0}")]
    Slack(String),
    #[error("{0}\n{pretty}", pretty = pretty_json(.1))]
    CannotParse(#[source] ::serde_json::Error, String),
    #[error("{0}")]
    Client(#[source] C::Error),
}

fn pretty_json(text: &str) -> String {
    ::serde_json::from_str::<::serde_json::Value>(text)
        .and_then(|v| ::serde_json::to_string_pretty(&v))
        .unwrap_or_else(|_| String::from(text))
}

impl<C: SlackSender> fmt::Debug for Error<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Slack(reason) => write!(f, "Slack({:?})", reason),
            Error::CannotParse(e, json) => write!(f, "CannotParse({:?}, {:?})", e, json),
            Error::Client(e) => write!(f, "Client({:?})", e),
        }
    }
}

pub mod channels;

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::RefCell;
    use std::io;

    use super::{form_body, SlackSender};

    /// Answers every call with a fixed body and remembers what was sent.
    pub struct Canned {
        pub response: Result<String, String>,
        pub sent: RefCell<Vec<(String, String)>>,
    }

    impl Canned {
        pub fn ok(body: &str) -> Self {
            Canned {
                response: Ok(body.to_string()),
                sent: RefCell::new(Vec::new()),
            }
        }

        pub fn failing(reason: &str) -> Self {
            Canned {
                response: Err(reason.to_string()),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl SlackSender for Canned {
        type Error = io::Error;

        fn send_structured<T: ::serde::Serialize>(
            &self,
            method_url: &str,
            token: &str,
            params: &T,
        ) -> Result<String, io::Error> {
            let body = form_body(token, params).map_err(io::Error::other)?;
            self.sent.borrow_mut().push((method_url.to_string(), body));
            self.response.clone().map_err(io::Error::other)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(::serde::Serialize)]
    struct Params {
        channel: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<u32>,
    }

    #[test]
    fn form_body_puts_token_first() {
        let body = form_body(
            "xoxp-1",
            &Params {
                channel: "C1",
                count: Some(10),
            },
        )
        .unwrap();
        assert_eq!(body, "token=xoxp-1&channel=C1&count=10");

        let body = form_body(
            "xoxp-1",
            &Params {
                channel: "C1",
                count: None,
            },
        )
        .unwrap();
        assert_eq!(body, "token=xoxp-1&channel=C1");
    }

    #[test]
    fn cannot_parse_display_is_pretty() {
        let e = ::serde_json::from_str::<IsError>("{}").unwrap_err();
        let err: Error<test_support::Canned> = Error::CannotParse(e, "{\"a\":1}".into());
        let shown = err.to_string();
        assert!(shown.contains("missing field"));
        assert!(shown.contains("\"a\": 1"));
    }

    #[cfg(feature = "reqwest")]
    #[test]
    fn reqwest_unreachable_host() {
        let client = ::reqwest::blocking::Client::new();
        let params = Params {
            channel: "C1",
            count: None,
        };
        // Nothing listens on the discard port
        match client.send_structured("http://127.0.0.1:9/channels.history", "t", &params) {
            Err(SendError::Http(_)) => {}
            other => panic!("{:?}", other),
        }
    }
}
