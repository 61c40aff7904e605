use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest ID accepted. Slack documents 9 and 11 byte IDs but reserves the right to grow them.
pub const ID_LENGTH: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} must be a 1-{max} byte string starting with one of {expected:?}, found {found:?}")]
pub struct IdError {
    kind: &'static str,
    max: usize,
    expected: &'static [char],
    found: String,
}

macro_rules! make_id {
    ($name:ident, $($firstchar:literal),+) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name {
            len: u8,
            buf: [u8; ID_LENGTH],
        }

        impl $name {
            #[inline]
            pub fn as_str(&self) -> &str {
                // buf is only ever filled from a &str
                ::std::str::from_utf8(&self.buf[..self.len as usize]).unwrap_or_default()
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(input: &str) -> Result<Self, IdError> {
                let error = || IdError {
                    kind: stringify!($name),
                    max: ID_LENGTH,
                    expected: &[$($firstchar),+],
                    found: input.to_string(),
                };

                if input.is_empty() || input.len() > ID_LENGTH {
                    return Err(error());
                }
                match input.chars().next() {
                    $(Some($firstchar))|+ => {
                        let mut output = $name {
                            len: input.len() as u8,
                            buf: [0; ID_LENGTH],
                        };
                        output.buf[..input.len()].copy_from_slice(input.as_bytes());
                        Ok(output)
                    }
                    _ => Err(error()),
                }
            }
        }

        impl<'a> TryFrom<&'a str> for $name {
            type Error = IdError;

            #[inline]
            fn try_from(input: &'a str) -> Result<Self, IdError> {
                input.parse()
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            #[inline]
            fn deserialize<D>(deserializer: D) -> Result<$name, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                struct IdVisitor;

                impl<'de> ::serde::de::Visitor<'de> for IdVisitor {
                    type Value = $name;

                    #[inline]
                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        write!(formatter, "a 1-{} byte {}", ID_LENGTH, stringify!($name))
                    }

                    #[inline]
                    fn visit_str<E>(self, input: &str) -> Result<$name, E>
                    where
                        E: ::serde::de::Error,
                    {
                        input.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(IdVisitor)
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self)
            }
        }
    };
}

make_id!(BotId, 'B');
make_id!(UserId, 'U', 'W');
make_id!(ChannelId, 'C');
make_id!(FileId, 'F');

/// Whoever wrote a message: a human account or a bot integration.
///
/// History records put either kind of ID in the same fields (`user` on replies and comments), so
/// they are compared through this type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AuthorId {
    User(UserId),
    Bot(BotId),
}

impl AuthorId {
    pub fn as_str(&self) -> &str {
        match self {
            AuthorId::User(id) => id.as_str(),
            AuthorId::Bot(id) => id.as_str(),
        }
    }

    pub fn is_bot(&self) -> bool {
        matches!(self, AuthorId::Bot(_))
    }
}

impl FromStr for AuthorId {
    type Err = IdError;

    fn from_str(input: &str) -> Result<Self, IdError> {
        input
            .parse::<UserId>()
            .map(AuthorId::User)
            .or_else(|_| input.parse::<BotId>().map(AuthorId::Bot))
            .map_err(|_| IdError {
                kind: "AuthorId",
                max: ID_LENGTH,
                expected: &['U', 'W', 'B'],
                found: input.to_string(),
            })
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<UserId> for AuthorId {
    fn from(id: UserId) -> Self {
        AuthorId::User(id)
    }
}

impl From<BotId> for AuthorId {
    fn from(id: BotId) -> Self {
        AuthorId::Bot(id)
    }
}
