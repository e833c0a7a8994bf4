//! Podcast - the channel-level record produced for every parsed feed.

use chrono::{DateTime, FixedOffset};

use crate::config::DescriptionMode;
use crate::objects::episode::Episode;

/// The channel description.
///
/// Which variant a podcast carries is fixed by the [`DescriptionMode`] it was
/// parsed with.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Description {
    /// Short (`itunes:subtitle`) and long (`description`) text
    Parts {
        /// Short description
        short: Option<String>,
        /// Long description
        long: Option<String>,
    },
    /// A single description text
    Text(Option<String>),
}

impl Default for Description {
    fn default() -> Self {
        Description::Parts {
            short: None,
            long: None,
        }
    }
}

impl Description {
    /// Creates an empty description for the given mode.
    pub fn for_mode(mode: DescriptionMode) -> Self {
        match mode {
            DescriptionMode::Split => Description::default(),
            DescriptionMode::Single => Description::Text(None),
        }
    }

    /// Returns the short description. Single-text descriptions have none.
    pub fn short(&self) -> Option<&str> {
        match self {
            Description::Parts { short, .. } => short.as_deref(),
            Description::Text(_) => None,
        }
    }

    /// Returns the long description, or the single text.
    pub fn long(&self) -> Option<&str> {
        match self {
            Description::Parts { long, .. } => long.as_deref(),
            Description::Text(text) => text.as_deref(),
        }
    }

    /// Returns true if no description text was found.
    pub fn is_empty(&self) -> bool {
        self.short().is_none() && self.long().is_none()
    }
}

/// The podcast owner from `itunes:owner`.
///
/// Always present on a [`Podcast`], possibly with both fields unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Owner {
    /// Owner name
    pub name: Option<String>,
    /// Owner contact email
    pub email: Option<String>,
}

/// A parsed podcast feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Podcast {
    /// Show title
    pub title: Option<String>,
    /// Show website
    pub link: Option<String>,
    /// Lowercase `xx-yy` locale
    pub language: Option<String>,
    /// Channel description
    pub description: Description,
    /// `itunes:subtitle`, when descriptions are stored as a single text
    pub subtitle: Option<String>,
    /// Show artwork URL
    pub image: Option<String>,
    /// Copyright notice
    pub copyright: Option<String>,
    /// Show owner
    pub owner: Owner,
    /// Explicit content flag
    pub explicit: bool,
    /// Unique `>`-delimited category paths, sorted ascending
    pub categories: Vec<String>,
    /// Episodes, in the configured order
    pub episodes: Vec<Episode>,
    /// Last update time; derived from the first episode when the channel has none
    pub updated: Option<DateTime<FixedOffset>>,
    /// Cache lifetime in minutes
    pub ttl: Option<u64>,
}

impl Podcast {
    /// Creates a new empty podcast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty podcast whose description follows the given mode.
    pub fn with_description_mode(mode: DescriptionMode) -> Self {
        Self {
            description: Description::for_mode(mode),
            ..Self::default()
        }
    }

    /// Returns the number of episodes.
    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }

    /// Returns the episode with the latest publication time.
    pub fn latest_episode(&self) -> Option<&Episode> {
        self.episodes
            .iter()
            .filter(|e| e.published.is_some())
            .max_by_key(|e| e.published)
    }

    /// Finds an episode by guid.
    pub fn find_episode(&self, guid: &str) -> Option<&Episode> {
        self.episodes
            .iter()
            .find(|e| e.guid.as_deref() == Some(guid))
    }

    /// Returns true if the podcast is filed under the given category path.
    pub fn has_category(&self, path: &str) -> bool {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(path))
            .is_ok()
    }

    /// Returns the summed duration of all episodes that declare one.
    ///
    /// The sum saturates at `u64::MAX`.
    pub fn total_duration(&self) -> u64 {
        self.episodes
            .iter()
            .filter_map(|e| e.duration)
            .fold(0, u64::saturating_add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::common::parse_timestamp;

    fn episode(guid: &str, published: &str) -> Episode {
        Episode {
            guid: Some(guid.to_string()),
            published: parse_timestamp(published),
            ..Episode::new()
        }
    }

    #[test]
    fn test_podcast_new() {
        let podcast = Podcast::new();
        assert!(podcast.title.is_none());
        assert!(podcast.owner.name.is_none());
        assert!(!podcast.explicit);
        assert!(podcast.description.is_empty());
        assert_eq!(podcast.episode_count(), 0);
    }

    #[test]
    fn test_description_modes() {
        let split = Podcast::with_description_mode(DescriptionMode::Split);
        assert!(matches!(split.description, Description::Parts { .. }));

        let single = Podcast::with_description_mode(DescriptionMode::Single);
        assert_eq!(single.description, Description::Text(None));
    }

    #[test]
    fn test_description_accessors() {
        let parts = Description::Parts {
            short: Some("short".to_string()),
            long: Some("long".to_string()),
        };
        assert_eq!(parts.short(), Some("short"));
        assert_eq!(parts.long(), Some("long"));

        let text = Description::Text(Some("only".to_string()));
        assert_eq!(text.short(), None);
        assert_eq!(text.long(), Some("only"));
        assert!(!text.is_empty());
    }

    #[test]
    fn test_latest_episode() {
        let mut podcast = Podcast::new();
        podcast.episodes.push(episode("a", "Mon, 01 Jun 2015 10:00:00 GMT"));
        podcast.episodes.push(episode("b", "Wed, 01 Jul 2015 10:00:00 GMT"));
        podcast.episodes.push(Episode::new());

        let latest = podcast.latest_episode().unwrap();
        assert_eq!(latest.guid.as_deref(), Some("b"));
        assert!(podcast.find_episode("a").is_some());
        assert!(podcast.find_episode("z").is_none());
    }

    #[test]
    fn test_has_category() {
        let mut podcast = Podcast::new();
        podcast.categories = vec!["Technology".to_string(), "Technology>Gadgets".to_string()];
        assert!(podcast.has_category("Technology>Gadgets"));
        assert!(!podcast.has_category("Gadgets"));
    }

    #[test]
    fn test_total_duration() {
        let mut podcast = Podcast::new();
        let mut first = Episode::new();
        first.duration = Some(600);
        let mut second = Episode::new();
        second.duration = Some(45);
        podcast.episodes = vec![first, second, Episode::new()];
        assert_eq!(podcast.total_duration(), 645);
    }

    #[test]
    fn test_total_duration_saturates() {
        let mut podcast = Podcast::new();
        let mut first = Episode::new();
        first.duration = Some(u64::MAX);
        let mut second = Episode::new();
        second.duration = Some(5);
        podcast.episodes = vec![first, second];
        assert_eq!(podcast.total_duration(), u64::MAX);
    }
}
