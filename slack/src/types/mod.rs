//! Records returned by the history endpoints.
//!
//! Slack keeps adding fields to these objects, so unlike request types they accept and ignore
//! anything they don't name.

use serde::Deserialize;

use crate::id::*;
use crate::timestamp::Timestamp;

mod message;
pub use self::message::{Message, MessageReply, Subtype};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct File {
    pub id: Option<FileId>,
    pub name: Option<String>,
    pub title: Option<String>,
    pub filetype: Option<String>,
    pub mimetype: Option<String>,
    pub pretty_type: Option<String>,
    pub created: Option<Timestamp>,
    pub user: Option<AuthorId>,
    pub size: Option<u64>,
    /// Only present on text snippets.
    pub lines: Option<u32>,
    pub comments_count: Option<u32>,
    pub is_starred: Option<bool>,
    pub num_stars: Option<u32>,
    pub reactions: Option<Vec<Reaction>>,
    pub permalink: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct FileComment {
    pub id: Option<String>,
    pub comment: Option<String>,
    pub user: Option<AuthorId>,
    pub timestamp: Option<Timestamp>,
    pub created: Option<Timestamp>,
    pub is_intro: Option<bool>,
    pub reactions: Option<Vec<Reaction>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Reaction {
    #[serde(default)]
    pub name: String,
    pub count: Option<u32>,
    pub users: Option<Vec<AuthorId>>,
}

// TODO: unfurls and app attachments carry dozens more fields; add them once something reads them
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Attachment {
    pub id: Option<i64>,
    pub fallback: Option<String>,
    #[serde(default)]
    pub text: String,
    pub title: Option<String>,
    pub title_link: Option<String>,
    pub author_name: Option<String>,
    pub from_url: Option<String>,
    pub service_name: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Edited {
    pub ts: Option<Timestamp>,
    pub user: Option<AuthorId>,
}
