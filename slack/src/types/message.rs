use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;
use uuid::Uuid;

use super::{Attachment, Edited, File, FileComment, Reaction};
use crate::id::*;
use crate::timestamp::Timestamp;

macro_rules! subtypes {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// The `subtype` tag of a message. Plain user messages have none.
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Subtype {
            $($variant,)+
            /// Anything not listed above, kept verbatim.
            Other(String),
        }

        impl Subtype {
            /// Wire names of every enumerated subtype, in declaration order.
            pub const KNOWN_NAMES: &'static [&'static str] = &[$($name),+];
            pub const KNOWN: usize = Self::KNOWN_NAMES.len();

            pub fn as_str(&self) -> &str {
                match self {
                    $(Subtype::$variant => $name,)+
                    Subtype::Other(name) => name.as_str(),
                }
            }
        }

        impl<'a> From<&'a str> for Subtype {
            fn from(name: &'a str) -> Self {
                match name {
                    $($name => Subtype::$variant,)+
                    other => Subtype::Other(other.to_string()),
                }
            }
        }
    };
}

subtypes! {
    BotAdd => "bot_add",
    BotRemove => "bot_remove",
    BotMessage => "bot_message",
    ChannelArchive => "channel_archive",
    ChannelJoin => "channel_join",
    ChannelLeave => "channel_leave",
    ChannelName => "channel_name",
    ChannelPurpose => "channel_purpose",
    ChannelTopic => "channel_topic",
    ChannelUnarchive => "channel_unarchive",
    FileComment => "file_comment",
    FileMention => "file_mention",
    FileShare => "file_share",
    GroupArchive => "group_archive",
    GroupJoin => "group_join",
    GroupLeave => "group_leave",
    GroupName => "group_name",
    GroupPurpose => "group_purpose",
    GroupTopic => "group_topic",
    GroupUnarchive => "group_unarchive",
    MeMessage => "me_message",
    MessageChanged => "message_changed",
    MessageDeleted => "message_deleted",
    MessageReplied => "message_replied",
    PinnedItem => "pinned_item",
    ReplyBroadcast => "reply_broadcast",
    ReminderAdd => "reminder_add",
    SlackbotResponse => "slackbot_response",
    ShRoomCreated => "sh_room_created",
    ThreadBroadcast => "thread_broadcast",
    Tombstone => "tombstone",
    UnpinnedItem => "unpinned_item",
}

impl Subtype {
    /// Index of this subtype in `KNOWN_NAMES`, `None` when it isn't one of them.
    pub fn slot(&self) -> Option<usize> {
        Self::KNOWN_NAMES
            .iter()
            .position(|name| *name == self.as_str())
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct SubtypeVisitor;

impl<'de> Visitor<'de> for SubtypeVisitor {
    type Value = Subtype;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a message subtype name")
    }

    fn visit_str<E>(self, value: &str) -> Result<Subtype, E>
    where
        E: de::Error,
    {
        Ok(Subtype::from(value))
    }
}

impl<'de> Deserialize<'de> for Subtype {
    fn deserialize<D>(deserializer: D) -> Result<Subtype, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(SubtypeVisitor)
    }
}

impl Serialize for Subtype {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// One entry of a history response.
///
/// A single flat record covers every subtype; which optional fields are filled in depends on
/// `subtype`. Thread parents carry `replies`, file shares carry `file` (or `files` on newer
/// payloads), file comments carry `comment`, and broadcast thread replies carry `root`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Message {
    pub subtype: Option<Subtype>,
    pub ts: Option<Timestamp>,
    pub user: Option<AuthorId>,
    pub bot_id: Option<BotId>,
    pub username: Option<String>,
    #[serde(default)]
    pub text: String,
    pub client_msg_id: Option<Uuid>,
    pub edited: Option<Edited>,
    pub thread_ts: Option<Timestamp>,
    pub parent_user_id: Option<AuthorId>,
    pub reply_count: Option<u32>,
    pub replies: Option<Vec<MessageReply>>,
    pub root: Option<Box<Message>>,
    pub reactions: Option<Vec<Reaction>>,
    pub attachments: Option<Vec<Attachment>>,
    pub file: Option<File>,
    pub files: Option<Vec<File>>,
    pub comment: Option<FileComment>,
    pub is_starred: Option<bool>,
    pub num_stars: Option<u32>,
}

impl Message {
    pub fn is_subtype(&self, subtype: &Subtype) -> bool {
        self.subtype.as_ref() == Some(subtype)
    }

    /// The file a `file_share` is about. Older payloads use `file`, newer ones a `files` list.
    pub fn shared_file(&self) -> Option<&File> {
        self.file
            .as_ref()
            .or_else(|| self.files.as_ref().and_then(|files| files.first()))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct MessageReply {
    pub user: Option<AuthorId>,
    pub ts: Option<Timestamp>,
}
