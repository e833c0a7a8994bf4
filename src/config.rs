//! Parser configuration.
//!
//! # Example
//!
//! ```rust
//! use podcast_feed_rs::config::{DescriptionMode, EpisodeOrder, ParserConfig};
//!
//! let config = ParserConfig::new()
//!     .with_description(DescriptionMode::Single)
//!     .with_episode_order(EpisodeOrder::NewestFirst);
//! assert_eq!(config.episode_order, EpisodeOrder::NewestFirst);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// How channel descriptions are stored on the podcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptionMode {
    /// `itunes:subtitle` is the short description, `description` the long one
    #[default]
    Split,
    /// `description` is the only description; `itunes:subtitle` is kept as a subtitle
    Single,
}

impl DescriptionMode {
    /// Returns the string representation of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptionMode::Split => "split",
            DescriptionMode::Single => "single",
        }
    }
}

impl FromStr for DescriptionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "split" => Ok(DescriptionMode::Split),
            "single" => Ok(DescriptionMode::Single),
            _ => Err(Error::InvalidConfig(format!("Unknown description mode: {}", s))),
        }
    }
}

impl fmt::Display for DescriptionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order of the episode list in the parsed podcast.
///
/// Feed authors do not guarantee chronological order, so document order and
/// date order can differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EpisodeOrder {
    /// The order in which `item` elements closed in the document
    #[default]
    Document,
    /// Most recently published first; undated episodes last
    NewestFirst,
}

impl EpisodeOrder {
    /// Returns the string representation of this order.
    pub fn as_str(&self) -> &'static str {
        match self {
            EpisodeOrder::Document => "document",
            EpisodeOrder::NewestFirst => "newest-first",
        }
    }
}

impl FromStr for EpisodeOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "document" => Ok(EpisodeOrder::Document),
            "newest-first" | "newest" => Ok(EpisodeOrder::NewestFirst),
            _ => Err(Error::InvalidConfig(format!("Unknown episode order: {}", s))),
        }
    }
}

impl fmt::Display for EpisodeOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration options for the feed parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// How channel descriptions are stored
    pub description: DescriptionMode,
    /// Order of the final episode list
    pub episode_order: EpisodeOrder,
}

impl ParserConfig {
    /// Creates a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the description mode.
    pub fn with_description(mut self, description: DescriptionMode) -> Self {
        self.description = description;
        self
    }

    /// Sets the episode order.
    pub fn with_episode_order(mut self, episode_order: EpisodeOrder) -> Self {
        self.episode_order = episode_order;
        self
    }
}
