//! The report types produced by aggregation.
//!
//! Serialized field names follow what downstream consumers of the scraper read: zero counters,
//! false flags and empty lists are left out, and subtype counters sit directly on the user
//! object keyed by subtype name.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use slack_api::types::{File, Reaction, Subtype};
use slack_api::{AuthorId, ChannelId, Timestamp};

fn is_zero(n: &u32) -> bool {
    *n == 0
}

fn is_false(b: &bool) -> bool {
    !*b
}

pub(crate) fn reaction_total(reactions: &[Reaction]) -> u32 {
    reactions.iter().filter_map(|r| r.count).sum()
}

/// One counter per enumerated subtype, plus a bucket for subtypes this build doesn't know.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubtypeCounts {
    known: [u32; Subtype::KNOWN],
    other: BTreeMap<String, u32>,
}

impl Default for SubtypeCounts {
    fn default() -> Self {
        SubtypeCounts {
            known: [0; Subtype::KNOWN],
            other: BTreeMap::new(),
        }
    }
}

impl SubtypeCounts {
    pub fn increment(&mut self, subtype: &Subtype) {
        match subtype.slot() {
            Some(slot) => self.known[slot] += 1,
            None => *self.other.entry(subtype.as_str().to_string()).or_insert(0) += 1,
        }
    }

    pub fn get(&self, subtype: &Subtype) -> u32 {
        match subtype.slot() {
            Some(slot) => self.known[slot],
            None => self.other.get(subtype.as_str()).copied().unwrap_or(0),
        }
    }

    /// Non-zero counters as `(subtype name, count)`, enumerated subtypes first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        Subtype::KNOWN_NAMES
            .iter()
            .zip(self.known.iter())
            .filter(|(_, count)| **count > 0)
            .map(|(name, count)| (*name, *count))
            .chain(self.other.iter().map(|(name, count)| (name.as_str(), *count)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl Serialize for SubtypeCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (name, count) in self.iter() {
            map.serialize_entry(name, &count)?;
        }
        map.end()
    }
}

/// Everything counted for one author over one page of history.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UserMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthorId>,
    #[serde(skip_serializing_if = "is_zero")]
    pub messages: u32,
    #[serde(flatten)]
    pub subtypes: SubtypeCounts,
    /// Threads this author started that have replies.
    #[serde(skip_serializing_if = "is_zero")]
    pub threads: u32,
    /// Replies by other people on those threads.
    #[serde(skip_serializing_if = "is_zero")]
    pub thread_replies: u32,
    /// Messages this author posted inside threads.
    #[serde(skip_serializing_if = "is_zero")]
    pub thread_comments: u32,
    /// Reactions received, summed over all reaction kinds.
    #[serde(skip_serializing_if = "is_zero")]
    pub reactions: u32,
    #[serde(skip_serializing_if = "is_false")]
    pub is_starred: bool,
    #[serde(skip_serializing_if = "is_zero")]
    pub num_stars: u32,
    #[serde(skip_serializing_if = "is_false")]
    pub bot: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_metadata: Vec<FileMetadata>,
}

impl UserMetadata {
    pub fn new(user: Option<AuthorId>) -> Self {
        UserMetadata {
            user,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reactions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<u32>,
    #[serde(skip_serializing_if = "is_false")]
    pub is_starred: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_stars: Option<u32>,
}

impl FileMetadata {
    /// Summarizes a shared file. Zero comment and star counts are treated as absent.
    pub fn from_file(file: &File) -> Self {
        let mut metadata = FileMetadata {
            file_type: file.filetype.clone(),
            lines: file.lines,
            reactions: file.reactions.as_deref().map(reaction_total),
            comments_count: file.comments_count.filter(|n| *n > 0),
            ..Default::default()
        };

        if let Some(stars) = file.num_stars.filter(|n| *n > 0) {
            metadata.is_starred = true;
            metadata.num_stars = Some(stars);
        }

        metadata
    }
}

/// The result of scraping one channel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// `ts` of the newest message read. Pass it as the next scrape's `start` to pick up from here.
    pub timestamp: Option<Timestamp>,
    pub user_metadata: Vec<UserMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
}

impl Summary {
    pub fn user(&self, id: &AuthorId) -> Option<&UserMetadata> {
        self.user_metadata
            .iter()
            .find(|metadata| metadata.user.as_ref() == Some(id))
    }

    pub fn total_messages(&self) -> u32 {
        self.user_metadata.iter().map(|m| m.messages).sum()
    }
}
