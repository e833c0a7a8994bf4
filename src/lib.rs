//! Podcast RSS feed parser for Rust.
//!
//! This crate turns a podcast syndication feed into a strongly-typed
//! [`Podcast`]: channel metadata, a sorted set of category paths, and the
//! episode list.
//!
//! # Features
//!
//! - **Single pass**: Feeds are interpreted directly from the XML event
//!   stream. No document tree is built.
//! - **iTunes vocabulary**: Owners, nested categories, artwork, durations and
//!   explicit flags from the `itunes:` namespace.
//! - **Normalized values**: Lowercase `xx-yy` languages, durations in seconds,
//!   `>`-delimited category paths, RFC 2822 dates as timestamps.
//! - **Serde Support**: Optional serialization with the `serde` feature.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use podcast_feed_rs::{parse_file, ParserConfig};
//!
//! let podcast = parse_file("feed.xml", ParserConfig::default()).unwrap();
//!
//! println!("{:?} ({} episodes)", podcast.title, podcast.episodes.len());
//! for path in &podcast.categories {
//!     println!("Category: {}", path);
//! }
//! ```
//!
//! # Callback API
//!
//! [`parse`] reports through a completion callback that runs exactly once,
//! with the error (if any) and the podcast built so far:
//!
//! ```rust
//! use podcast_feed_rs::parse;
//!
//! parse("not a feed", |err, podcast| {
//!     assert!(err.is_some());
//!     assert!(podcast.episodes.is_empty());
//! });
//! ```
//!
//! # Module Structure
//!
//! - [`objects`] - Podcast, episode and enclosure records
//! - [`reader`] - The feed interpreter and parse entry points
//! - [`events`] - XML event source over `quick-xml`
//! - [`context`] - Stack of open elements
//! - [`mapping`] - Element-to-field rules
//! - [`categories`] - Category path construction
//! - [`config`] - Parser configuration
//! - [`error`] - Error types
//!
//! # Optional Features
//!
//! - `serde` - Enable serde serialization/deserialization support
//! - `cli` - Build the `feed_summary` command-line tool

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod categories;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod mapping;
pub mod objects;
pub mod reader;

// Re-export commonly used types at the crate root
pub use config::{DescriptionMode, EpisodeOrder, ParserConfig};
pub use error::{Error, Result};
pub use objects::{Description, Enclosure, Episode, Owner, Podcast};
pub use reader::{
    parse, parse_feed, parse_feed_with_config, parse_file, parse_partial, parse_with_config,
    FeedReader,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
