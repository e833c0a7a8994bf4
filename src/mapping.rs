//! Field mapping from element text to record fields.
//!
//! Each element that owns a record (`channel`, `itunes:owner`, `item`, and the
//! channel `image`) carries a [`FieldTable`] describing what to do with the
//! text of its direct children. A child either writes its text verbatim under
//! its own name, writes it under another name, or runs it through a transform
//! that yields one or more typed fields.

use std::fmt;

use chrono::{DateTime, FixedOffset};

use crate::objects::{
    normalize_language, parse_duration, parse_explicit, parse_integer, parse_timestamp,
    Description, Episode, Owner, Podcast,
};

/// A typed value destined for a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain text
    Text(String),
    /// An integer; `None` when the text did not coerce
    Integer(Option<u64>),
    /// A timestamp; `None` when the text did not coerce
    Timestamp(Option<DateTime<FixedOffset>>),
    /// A boolean flag
    Flag(bool),
}

/// Converts trimmed element text into field assignments.
pub type Transform = fn(&str) -> Vec<(&'static str, FieldValue)>;

/// What to do with the text of one child element.
#[derive(Clone, Copy)]
pub enum FieldRule {
    /// Store the text under the element's own name
    Verbatim,
    /// Store the text under another field name
    Rename(&'static str),
    /// Derive fields from the text
    Transform(Transform),
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRule::Verbatim => write!(f, "Verbatim"),
            FieldRule::Rename(field) => write!(f, "Rename({:?})", field),
            FieldRule::Transform(_) => write!(f, "Transform"),
        }
    }
}

impl FieldRule {
    /// Writes `text` into `target`. `element` is the child element's name,
    /// used as the field name by [`FieldRule::Verbatim`].
    pub fn apply(&self, element: &'static str, text: &str, target: &mut dyn FieldTarget) {
        match *self {
            FieldRule::Verbatim => target.assign(element, FieldValue::Text(text.to_string())),
            FieldRule::Rename(field) => target.assign(field, FieldValue::Text(text.to_string())),
            FieldRule::Transform(transform) => {
                for (field, value) in transform(text) {
                    target.assign(field, value);
                }
            }
        }
    }
}

/// Rules for the direct children of one parent element.
#[derive(Debug)]
pub struct FieldTable {
    rules: &'static [(&'static str, FieldRule)],
}

impl FieldTable {
    /// Resolves the rule for a child element, along with the table's own copy
    /// of the element name.
    pub fn resolve(&self, element: &str) -> Option<(&'static str, FieldRule)> {
        self.rules
            .iter()
            .find(|(name, _)| *name == element)
            .map(|&(name, rule)| (name, rule))
    }
}

/// A record that accepts field assignments by name.
///
/// Unknown field names and mistyped values are ignored.
pub trait FieldTarget {
    /// Assigns `value` to the field called `field`.
    fn assign(&mut self, field: &str, value: FieldValue);
}

// ============================================================================
// Transforms
// ============================================================================

fn language_field(text: &str) -> Vec<(&'static str, FieldValue)> {
    vec![("language", FieldValue::Text(normalize_language(text)))]
}

fn ttl_field(text: &str) -> Vec<(&'static str, FieldValue)> {
    vec![("ttl", FieldValue::Integer(parse_integer(text)))]
}

fn updated_field(text: &str) -> Vec<(&'static str, FieldValue)> {
    vec![("updated", FieldValue::Timestamp(parse_timestamp(text)))]
}

fn published_field(text: &str) -> Vec<(&'static str, FieldValue)> {
    vec![("published", FieldValue::Timestamp(parse_timestamp(text)))]
}

fn duration_field(text: &str) -> Vec<(&'static str, FieldValue)> {
    vec![("duration", FieldValue::Integer(parse_duration(text)))]
}

fn explicit_field(text: &str) -> Vec<(&'static str, FieldValue)> {
    vec![("explicit", FieldValue::Flag(parse_explicit(text)))]
}

// ============================================================================
// Tables
// ============================================================================

/// Channel children when descriptions are split into short and long parts.
pub static CHANNEL_FIELDS: FieldTable = FieldTable {
    rules: &[
        ("title", FieldRule::Verbatim),
        ("link", FieldRule::Verbatim),
        ("copyright", FieldRule::Verbatim),
        ("language", FieldRule::Transform(language_field)),
        ("itunes:subtitle", FieldRule::Rename("description.short")),
        ("description", FieldRule::Rename("description.long")),
        ("itunes:explicit", FieldRule::Transform(explicit_field)),
        ("ttl", FieldRule::Transform(ttl_field)),
        ("pubDate", FieldRule::Transform(updated_field)),
        ("lastBuildDate", FieldRule::Transform(updated_field)),
    ],
};

/// Channel children when the description is a single text.
pub static CHANNEL_FIELDS_SINGLE: FieldTable = FieldTable {
    rules: &[
        ("title", FieldRule::Verbatim),
        ("link", FieldRule::Verbatim),
        ("copyright", FieldRule::Verbatim),
        ("language", FieldRule::Transform(language_field)),
        ("itunes:subtitle", FieldRule::Rename("subtitle")),
        ("description", FieldRule::Verbatim),
        ("itunes:explicit", FieldRule::Transform(explicit_field)),
        ("ttl", FieldRule::Transform(ttl_field)),
        ("pubDate", FieldRule::Transform(updated_field)),
        ("lastBuildDate", FieldRule::Transform(updated_field)),
    ],
};

/// Children of the RSS channel `image` element.
pub static IMAGE_FIELDS: FieldTable = FieldTable {
    rules: &[("url", FieldRule::Rename("image"))],
};

/// Children of `itunes:owner`.
pub static OWNER_FIELDS: FieldTable = FieldTable {
    rules: &[
        ("itunes:name", FieldRule::Rename("name")),
        ("itunes:email", FieldRule::Rename("email")),
    ],
};

/// Children of `item`.
pub static ITEM_FIELDS: FieldTable = FieldTable {
    rules: &[
        ("title", FieldRule::Verbatim),
        ("guid", FieldRule::Verbatim),
        ("itunes:summary", FieldRule::Rename("description")),
        ("itunes:author", FieldRule::Rename("author")),
        ("pubDate", FieldRule::Transform(published_field)),
        ("itunes:duration", FieldRule::Transform(duration_field)),
        ("itunes:explicit", FieldRule::Transform(explicit_field)),
    ],
};

// ============================================================================
// Targets
// ============================================================================

impl FieldTarget for Podcast {
    fn assign(&mut self, field: &str, value: FieldValue) {
        match (field, value) {
            ("title", FieldValue::Text(text)) => self.title = Some(text),
            ("link", FieldValue::Text(text)) => self.link = Some(text),
            ("copyright", FieldValue::Text(text)) => self.copyright = Some(text),
            ("language", FieldValue::Text(text)) => self.language = Some(text),
            ("subtitle", FieldValue::Text(text)) => self.subtitle = Some(text),
            ("image", FieldValue::Text(text)) => self.image = Some(text),
            ("description", FieldValue::Text(text)) => {
                self.description = Description::Text(Some(text));
            }
            ("description.short", FieldValue::Text(text)) => {
                if let Description::Parts { short, .. } = &mut self.description {
                    *short = Some(text);
                }
            }
            ("description.long", FieldValue::Text(text)) => {
                if let Description::Parts { long, .. } = &mut self.description {
                    *long = Some(text);
                }
            }
            ("explicit", FieldValue::Flag(flag)) => self.explicit = flag,
            ("ttl", FieldValue::Integer(ttl)) => self.ttl = ttl,
            ("updated", FieldValue::Timestamp(updated)) => self.updated = updated,
            _ => {}
        }
    }
}

impl FieldTarget for Owner {
    fn assign(&mut self, field: &str, value: FieldValue) {
        match (field, value) {
            ("name", FieldValue::Text(text)) => self.name = Some(text),
            ("email", FieldValue::Text(text)) => self.email = Some(text),
            _ => {}
        }
    }
}

impl FieldTarget for Episode {
    fn assign(&mut self, field: &str, value: FieldValue) {
        match (field, value) {
            ("title", FieldValue::Text(text)) => self.title = Some(text),
            ("guid", FieldValue::Text(text)) => self.guid = Some(text),
            ("description", FieldValue::Text(text)) => self.description = Some(text),
            ("author", FieldValue::Text(text)) => self.author = Some(text),
            ("published", FieldValue::Timestamp(published)) => self.published = published,
            ("duration", FieldValue::Integer(duration)) => self.duration = duration,
            ("explicit", FieldValue::Flag(flag)) => self.explicit = flag,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let (name, rule) = CHANNEL_FIELDS.resolve("title").unwrap();
        assert_eq!(name, "title");
        assert!(matches!(rule, FieldRule::Verbatim));

        let (_, rule) = OWNER_FIELDS.resolve("itunes:name").unwrap();
        assert!(matches!(rule, FieldRule::Rename("name")));

        assert!(ITEM_FIELDS.resolve("itunes:keywords").is_none());
        assert!(CHANNEL_FIELDS.resolve("Title").is_none());
    }

    #[test]
    fn test_verbatim_and_rename() {
        let mut owner = Owner::default();
        let (name, rule) = OWNER_FIELDS.resolve("itunes:email").unwrap();
        rule.apply(name, "john.doe@example.com", &mut owner);
        assert_eq!(owner.email.as_deref(), Some("john.doe@example.com"));

        let mut episode = Episode::new();
        let (name, rule) = ITEM_FIELDS.resolve("guid").unwrap();
        rule.apply(name, "urn:ep:1", &mut episode);
        assert_eq!(episode.guid.as_deref(), Some("urn:ep:1"));
    }

    #[test]
    fn test_transforms() {
        let mut podcast = Podcast::new();
        for (element, text) in [
            ("language", "de"),
            ("ttl", "60"),
            ("itunes:explicit", "yes"),
            ("pubDate", "Tue, 02 Jun 2015 10:00:00 GMT"),
        ] {
            let (name, rule) = CHANNEL_FIELDS.resolve(element).unwrap();
            rule.apply(name, text, &mut podcast);
        }
        assert_eq!(podcast.language.as_deref(), Some("de-de"));
        assert_eq!(podcast.ttl, Some(60));
        assert!(podcast.explicit);
        assert!(podcast.updated.is_some());
    }

    #[test]
    fn test_split_description() {
        let mut podcast = Podcast::new();
        for (element, text) in [("itunes:subtitle", "Short"), ("description", "Long")] {
            let (name, rule) = CHANNEL_FIELDS.resolve(element).unwrap();
            rule.apply(name, text, &mut podcast);
        }
        assert_eq!(podcast.description.short(), Some("Short"));
        assert_eq!(podcast.description.long(), Some("Long"));
        assert!(podcast.subtitle.is_none());
    }

    #[test]
    fn test_single_description() {
        let mut podcast = Podcast::with_description_mode(crate::config::DescriptionMode::Single);
        for (element, text) in [("itunes:subtitle", "Short"), ("description", "Long")] {
            let (name, rule) = CHANNEL_FIELDS_SINGLE.resolve(element).unwrap();
            rule.apply(name, text, &mut podcast);
        }
        assert_eq!(podcast.description, Description::Text(Some("Long".to_string())));
        assert_eq!(podcast.subtitle.as_deref(), Some("Short"));
    }

    #[test]
    fn test_episode_transforms() {
        let mut episode = Episode::new();
        for (element, text) in [("itunes:duration", "1:03:13"), ("pubDate", "garbage")] {
            let (name, rule) = ITEM_FIELDS.resolve(element).unwrap();
            rule.apply(name, text, &mut episode);
        }
        assert_eq!(episode.duration, Some(3793));
        assert!(episode.published.is_none());
    }

    #[test]
    fn test_mistyped_assignment_is_ignored() {
        let mut episode = Episode::new();
        episode.assign("duration", FieldValue::Text("10".to_string()));
        episode.assign("unknown", FieldValue::Flag(true));
        assert!(episode.duration.is_none());
        assert_eq!(episode, Episode::new());
    }
}
