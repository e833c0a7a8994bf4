//! Episode - a single `item` entry in a podcast feed.

use chrono::{DateTime, FixedOffset};

use crate::objects::common::parse_integer;

/// The downloadable media asset of an episode.
///
/// Populated from the attributes of an `enclosure` element; the element has
/// no text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enclosure {
    /// Size in bytes, from the `length` attribute
    pub filesize: Option<u64>,
    /// MIME type, from the `type` attribute
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub media_type: Option<String>,
    /// Media URL
    pub url: Option<String>,
}

impl Enclosure {
    /// Builds an enclosure from `enclosure` element attributes.
    ///
    /// A missing or non-numeric `length` leaves `filesize` unset.
    pub fn from_attributes(attrs: &[(String, String)]) -> Self {
        let mut enclosure = Enclosure::default();
        for (key, value) in attrs {
            match key.as_str() {
                "length" => enclosure.filesize = parse_integer(value),
                "type" => enclosure.media_type = Some(value.clone()),
                "url" => enclosure.url = Some(value.clone()),
                _ => {}
            }
        }
        enclosure
    }
}

/// A podcast episode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Episode {
    /// Globally unique identifier
    pub guid: Option<String>,
    /// Episode title
    pub title: Option<String>,
    /// Episode summary (`itunes:summary`)
    pub description: Option<String>,
    /// Publication time (`pubDate`)
    pub published: Option<DateTime<FixedOffset>>,
    /// Episode artwork; `None` unless the item carries its own `itunes:image`
    pub image: Option<String>,
    /// Episode author (`itunes:author`)
    pub author: Option<String>,
    /// Running time in seconds
    pub duration: Option<u64>,
    /// Explicit content flag
    pub explicit: bool,
    /// Free-text categories, in document order
    pub categories: Vec<String>,
    /// Media asset, if the item had an `enclosure`
    pub enclosure: Option<Enclosure>,
}

impl Episode {
    /// Creates a new episode with all fields at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the URL of the episode media, if any.
    pub fn media_url(&self) -> Option<&str> {
        self.enclosure.as_ref().and_then(|e| e.url.as_deref())
    }
}
