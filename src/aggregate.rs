//! Folds a page of channel history into one `UserMetadata` per author.

use std::collections::HashMap;

use log::{debug, trace};
use slack_api::types::{Message, Subtype};
use slack_api::{AuthorId, Timestamp};

use crate::metadata::{reaction_total, FileMetadata, Summary, UserMetadata};

/// Who a message is attributed to: a file comment's author, else the posting bot, else the user.
pub fn resolve_author(message: &Message) -> Option<AuthorId> {
    match &message.comment {
        Some(comment) => comment.user,
        None => message.bot_id.map(AuthorId::Bot).or(message.user),
    }
}

/// Accumulates history one message at a time.
///
/// Messages are looked up by every identifier they carry (`user`, `bot_id` and a comment's
/// `user`), so a message is folded into an existing record if any of them is that record's
/// author. When more than one record matches, the one created first wins.
#[derive(Debug, Default)]
pub struct Aggregator {
    user_metadata: Vec<UserMetadata>,
    /// Author of each record -> its position in `user_metadata`.
    index: HashMap<AuthorId, usize>,
    /// The record for messages that name nobody.
    anonymous: Option<usize>,
    timestamp: Option<Timestamp>,
    seen: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, message: &Message) {
        if self.seen == 0 {
            self.timestamp = message.ts;
        }
        self.seen += 1;

        let slot = match self.find(message) {
            Some(slot) => slot,
            None => self.insert(resolve_author(message)),
        };
        self.user_metadata[slot].record(message);
    }

    fn find(&self, message: &Message) -> Option<usize> {
        let aliases = [
            message.user,
            message.bot_id.map(AuthorId::Bot),
            message.comment.as_ref().and_then(|comment| comment.user),
        ];

        let found = aliases
            .iter()
            .flatten()
            .filter_map(|id| self.index.get(id).copied())
            .min();

        match found {
            Some(slot) => Some(slot),
            None if resolve_author(message).is_none() => self.anonymous,
            None => None,
        }
    }

    fn insert(&mut self, user: Option<AuthorId>) -> usize {
        let slot = self.user_metadata.len();
        trace!("new author {:?} at {}", user, slot);
        match user {
            Some(id) => {
                self.index.insert(id, slot);
            }
            None => self.anonymous = Some(slot),
        }
        self.user_metadata.push(UserMetadata::new(user));
        slot
    }

    /// `None` if no messages were added.
    pub fn finish(self) -> Option<Summary> {
        if self.seen == 0 {
            return None;
        }
        debug!(
            "aggregated {} messages into {} authors",
            self.seen,
            self.user_metadata.len()
        );
        Some(Summary {
            timestamp: self.timestamp,
            user_metadata: self.user_metadata,
            channel_id: None,
        })
    }
}

/// Aggregates a newest-first page of history. Returns `None` for an empty page.
pub fn aggregate(messages: &[Message]) -> Option<Summary> {
    let mut aggregator = Aggregator::new();
    for message in messages {
        aggregator.add(message);
    }
    aggregator.finish()
}

fn replies_not_by(message: &Message, author: Option<AuthorId>) -> u32 {
    message
        .replies
        .iter()
        .flatten()
        .filter(|reply| reply.user != author)
        .count() as u32
}

impl UserMetadata {
    /// Adds one message's worth of activity to this author's counters.
    pub fn record(&mut self, message: &Message) {
        if let Some(subtype) = &message.subtype {
            if *subtype == Subtype::FileShare {
                if let Some(file) = message.shared_file() {
                    self.file_metadata.push(FileMetadata::from_file(file));
                }
            }

            match subtype {
                Subtype::ReplyBroadcast => self.thread_comments += 1,
                Subtype::BotMessage => {
                    if message.thread_ts.is_some() {
                        self.threads += 1;
                        self.thread_replies +=
                            replies_not_by(message, message.bot_id.map(AuthorId::Bot));
                    }
                }
                Subtype::ThreadBroadcast | Subtype::ChannelJoin => {}
                other => self.subtypes.increment(other),
            }
        }

        // A bot thread parent is also counted here, so it shows up twice in `threads`.
        if message.thread_ts.is_some() && message.root.is_none() && message.attachments.is_none()
        {
            if message.replies.is_some() {
                self.threads += 1;
                self.thread_replies += replies_not_by(message, message.user);
            } else {
                self.thread_comments += 1;
            }
        }

        if let Some(reactions) = &message.reactions {
            self.reactions += reaction_total(reactions);
        }

        if message.is_starred == Some(true) {
            self.is_starred = true;
        }

        if let Some(stars) = message.num_stars {
            self.num_stars += stars;
        }

        // The original of a broadcast reply is already in history as a thread message
        if !message.is_subtype(&Subtype::ThreadBroadcast) {
            self.messages += 1;
        }

        if message.bot_id.is_some() {
            self.bot = true;
        }
    }
}
