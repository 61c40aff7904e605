//! Per-user engagement metadata for a Slack channel.
//!
//! [`scrape`] reads one page of a channel's history and folds it into a [`Summary`]: one
//! [`UserMetadata`] per author with message, thread, reaction, star and file-share counts.
//! [`aggregate`] does the folding on its own for callers that already have the messages.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod logger;
pub mod metadata;
pub mod scraper;

pub use crate::aggregate::{aggregate, resolve_author, Aggregator};
pub use crate::config::{ChannelConfig, Config, ConfigError};
pub use crate::error::{ErrorKind, ScrapeError};
pub use crate::metadata::{FileMetadata, SubtypeCounts, Summary, UserMetadata};
pub use crate::scraper::{scrape, scrape_configured, ScrapeRequest, DEFAULT_COUNT};
pub use slack_api;
