//! Podcast feed reader.
//!
//! [`FeedReader`] interprets a stream of [`FeedEvent`]s in a single pass and
//! builds a [`Podcast`] in place. It never materializes a document tree: the
//! only state it holds is the chain of open elements, the category node being
//! read, the episode being read and the result so far.
//!
//! Most callers want one of the entry points:
//!
//! - [`parse`] - completion-callback style, invoked exactly once
//! - [`parse_feed`] - returns `Result<Podcast>`
//! - [`parse_partial`] - returns the error together with the partial result
//! - [`parse_file`] - reads and parses a feed file
//!
//! # Example
//!
//! ```rust
//! use podcast_feed_rs::reader::parse;
//!
//! let xml = r#"<rss><channel>
//!   <title>All About Everything</title>
//!   <item><title>Episode 1</title><itunes:duration>1:03:13</itunes:duration></item>
//! </channel></rss>"#;
//!
//! parse(xml, |err, podcast| {
//!     assert!(err.is_none());
//!     assert_eq!(podcast.title.as_deref(), Some("All About Everything"));
//!     assert_eq!(podcast.episodes[0].duration, Some(3793));
//! });
//! ```

use std::cmp::Reverse;
use std::fs;
use std::path::Path;

use log::{debug, trace, warn};

use crate::categories::{normalize_paths, CategoryPathBuilder};
use crate::config::{DescriptionMode, EpisodeOrder, ParserConfig};
use crate::context::{ContextStack, Frame, Target};
use crate::error::{Error, Result};
use crate::events::{FeedEvent, XmlEventSource};
use crate::mapping::{
    FieldRule, FieldTable, FieldTarget, CHANNEL_FIELDS, CHANNEL_FIELDS_SINGLE, IMAGE_FIELDS,
    ITEM_FIELDS, OWNER_FIELDS,
};
use crate::objects::{Enclosure, Episode, Podcast};

/// Where a new element sits relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// The parent is the document element
    Document,
    /// The parent is the channel
    Channel,
    /// The parent is a channel category node
    Category,
    /// Anywhere else
    Other,
}

/// Accumulated text of the most recently written element occurrence.
#[derive(Debug)]
struct TextRun {
    frame: u64,
    text: String,
}

/// A single-pass podcast feed interpreter.
///
/// Feed it events with [`FeedReader::handle`] (or the per-event methods) in
/// document order. Once the document element closes the result is finalized
/// and further events are ignored.
#[derive(Debug)]
pub struct FeedReader {
    config: ParserConfig,
    stack: ContextStack,
    categories: CategoryPathBuilder,
    podcast: Podcast,
    episode: Option<Episode>,
    text_run: Option<TextRun>,
    complete: bool,
}

impl Default for FeedReader {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedReader {
    /// Creates a reader with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates a reader with the given configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            stack: ContextStack::new(),
            categories: CategoryPathBuilder::new(),
            podcast: Podcast::with_description_mode(config.description),
            episode: None,
            text_run: None,
            complete: false,
        }
    }

    /// Dispatches one event.
    pub fn handle(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Start { name, attributes } => self.start_element(&name, attributes),
            FeedEvent::Text(text) => self.text(&text),
            FeedEvent::End { name } => self.end_element(&name),
        }
    }

    /// Returns true once the document element has closed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// The podcast built so far.
    pub fn podcast(&self) -> &Podcast {
        &self.podcast
    }

    /// Consumes the reader, returning the podcast built so far.
    ///
    /// Before [`FeedReader::is_complete`] the result is partial: categories
    /// are unsorted, an open episode is dropped and `updated` is not derived.
    pub fn into_podcast(self) -> Podcast {
        self.podcast
    }

    /// Handles an element start.
    pub fn start_element(&mut self, name: &str, attributes: Vec<(String, String)>) {
        if self.complete {
            return;
        }

        let depth = self.stack.depth();
        let placement = self.stack.top().map(|parent| {
            if depth == 1 {
                Placement::Document
            } else if parent.name() == "channel" && parent.target() == Some(Target::Podcast) {
                Placement::Channel
            } else if parent.is_category() {
                Placement::Category
            } else {
                Placement::Other
            }
        });

        let frame = Frame::new(name, attributes);
        let frame = match placement {
            // The document element itself carries nothing.
            None => frame,
            Some(placement) => self.open_child(frame, placement),
        };
        self.stack.push(frame);
    }

    /// Tags a new frame according to its name and placement, and applies the
    /// side effects of attribute-only elements.
    fn open_child(&mut self, frame: Frame, placement: Placement) -> Frame {
        match (frame.name(), placement) {
            ("channel", Placement::Document) => {
                frame.with_target(Target::Podcast, self.channel_fields())
            }
            ("itunes:image", Placement::Channel) => {
                if let Some(href) = frame.attribute("href") {
                    self.podcast.image = Some(href.to_string());
                }
                frame
            }
            ("image", Placement::Channel) => frame.with_target(Target::Podcast, &IMAGE_FIELDS),
            ("itunes:owner", Placement::Channel) => {
                frame.with_target(Target::Owner, &OWNER_FIELDS)
            }
            ("itunes:category", Placement::Channel) => self.open_category(frame, false),
            ("itunes:category", Placement::Category) => self.open_category(frame, true),
            ("itunes:category", _) => {
                debug!("ignoring itunes:category outside the channel category tree");
                frame
            }
            ("item", Placement::Channel) => {
                self.episode = Some(Episode::new());
                frame.with_target(Target::Episode, &ITEM_FIELDS)
            }
            _ => {
                if let Some(episode) = self.episode.as_mut() {
                    match frame.name() {
                        "itunes:image" => {
                            if let Some(href) = frame.attribute("href") {
                                episode.image = Some(href.to_string());
                            }
                        }
                        "enclosure" => {
                            episode.enclosure = Some(Enclosure::from_attributes(frame.attributes()));
                        }
                        _ => {}
                    }
                }
                frame
            }
        }
    }

    /// Field table for the channel, per the configured description mode.
    fn channel_fields(&self) -> &'static FieldTable {
        match self.config.description {
            DescriptionMode::Split => &CHANNEL_FIELDS,
            DescriptionMode::Single => &CHANNEL_FIELDS_SINGLE,
        }
    }

    /// Opens a channel category node and records its path.
    fn open_category(&mut self, frame: Frame, nested: bool) -> Frame {
        let Some(name) = frame.attribute("text") else {
            debug!("ignoring itunes:category without a text attribute");
            return frame;
        };

        let path = if nested {
            self.categories.descend(name)
        } else {
            self.categories.begin(name)
        };
        self.podcast.categories.push(path.to_string());
        frame.as_category()
    }

    /// Handles a run of text content.
    pub fn text(&mut self, text: &str) {
        if self.complete {
            return;
        }

        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let (Some(frame), Some(parent)) = (self.stack.top(), self.stack.parent()) else {
            return;
        };

        let frame_id = frame.id();
        let rule = match (parent.target(), parent.fields()) {
            (Some(target), Some(fields)) => fields
                .resolve(frame.name())
                .map(|(field, rule)| (target, field, rule)),
            _ => None,
        };
        let episode_category = self.episode.is_some() && frame.name() == "category";

        if rule.is_none() && !episode_category {
            return;
        }

        let continued = self.extend_run(frame_id, text);
        let run = match self.text_run.as_ref() {
            Some(run) => run.text.clone(),
            None => return,
        };

        if let Some((target, field, rule)) = rule {
            self.write_field(target, field, rule, &run);
        }

        if episode_category {
            if let Some(episode) = self.episode.as_mut() {
                match episode.categories.last_mut() {
                    Some(last) if continued => *last = run,
                    _ => episode.categories.push(run),
                }
            }
        }
    }

    /// Appends `text` to the run for `frame`, starting a new run if the last
    /// one belonged to another element occurrence. Returns true if the run
    /// was continued.
    fn extend_run(&mut self, frame: u64, text: &str) -> bool {
        match self.text_run.as_mut() {
            Some(run) if run.frame == frame => {
                run.text.push(' ');
                run.text.push_str(text);
                true
            }
            _ => {
                self.text_run = Some(TextRun {
                    frame,
                    text: text.to_string(),
                });
                false
            }
        }
    }

    /// Applies a field rule to the record behind `target`.
    fn write_field(&mut self, target: Target, field: &'static str, rule: FieldRule, text: &str) {
        let record: &mut dyn FieldTarget = match target {
            Target::Podcast => &mut self.podcast,
            Target::Owner => &mut self.podcast.owner,
            Target::Episode => match self.episode.as_mut() {
                Some(episode) => episode,
                None => return,
            },
        };
        rule.apply(field, text, record);
    }

    /// Handles an element end.
    pub fn end_element(&mut self, name: &str) {
        if self.complete {
            return;
        }

        let Some(frame) = self.stack.pop() else {
            debug!("ignoring </{}> with no open element", name);
            return;
        };

        if frame.is_category() {
            self.categories.ascend();
        }

        if frame.target() == Some(Target::Episode) {
            if let Some(episode) = self.episode.take() {
                trace!("sealed episode {:?}", episode.title);
                self.podcast.episodes.push(episode);
            }
        }

        if self.stack.is_empty() {
            self.finalize();
        }
    }

    /// Finalizes the podcast once the document element has closed.
    fn finalize(&mut self) {
        normalize_paths(&mut self.podcast.categories);

        if self.config.episode_order == EpisodeOrder::NewestFirst {
            // Stable: equal or missing dates keep document order, undated last.
            self.podcast
                .episodes
                .sort_by_key(|e| (e.published.is_none(), Reverse(e.published)));
        }

        if self.podcast.updated.is_none() {
            self.podcast.updated = self.podcast.episodes.first().and_then(|e| e.published);
        }

        self.text_run = None;
        self.complete = true;
        debug!(
            "finished feed {:?}: {} episode(s), {} category path(s)",
            self.podcast.title,
            self.podcast.episodes.len(),
            self.podcast.categories.len()
        );
    }
}

/// Parses a complete feed document and reports the outcome to `callback`.
///
/// `callback` runs exactly once. On success it receives no error and the
/// finished podcast. On failure it receives the error and whatever was built
/// before the failure, which may be incomplete or inconsistent.
pub fn parse<B, F>(feed: B, callback: F)
where
    B: AsRef<[u8]>,
    F: FnOnce(Option<Error>, Podcast),
{
    parse_with_config(feed, ParserConfig::default(), callback);
}

/// Like [`parse`], with an explicit configuration.
pub fn parse_with_config<B, F>(feed: B, config: ParserConfig, callback: F)
where
    B: AsRef<[u8]>,
    F: FnOnce(Option<Error>, Podcast),
{
    let (error, podcast) = parse_partial_with_config(feed, config);
    callback(error, podcast);
}

/// Parses a feed, returning the error (if any) alongside the podcast.
pub fn parse_partial<B: AsRef<[u8]>>(feed: B) -> (Option<Error>, Podcast) {
    parse_partial_with_config(feed, ParserConfig::default())
}

/// Like [`parse_partial`], with an explicit configuration.
pub fn parse_partial_with_config<B: AsRef<[u8]>>(
    feed: B,
    config: ParserConfig,
) -> (Option<Error>, Podcast) {
    let mut reader = FeedReader::with_config(config);

    for event in XmlEventSource::from_reader(feed.as_ref()) {
        match event {
            Ok(event) => reader.handle(event),
            Err(e) => {
                warn!("feed parsing failed: {}", e);
                return (Some(e), reader.into_podcast());
            }
        }
    }

    if !reader.is_complete() {
        let error = Error::Malformed("document ended before the root element closed".to_string());
        return (Some(error), reader.into_podcast());
    }
    (None, reader.into_podcast())
}

/// Convenience function to parse a complete feed document.
pub fn parse_feed<B: AsRef<[u8]>>(feed: B) -> Result<Podcast> {
    parse_feed_with_config(feed, ParserConfig::default())
}

/// Like [`parse_feed`], with an explicit configuration.
pub fn parse_feed_with_config<B: AsRef<[u8]>>(feed: B, config: ParserConfig) -> Result<Podcast> {
    match parse_partial_with_config(feed, config) {
        (Some(e), _) => Err(e),
        (None, podcast) => Ok(podcast),
    }
}

/// Reads and parses a feed file.
///
/// The whole file is read into memory before parsing starts.
pub fn parse_file<P: AsRef<Path>>(path: P, config: ParserConfig) -> Result<Podcast> {
    let bytes = fs::read(path)?;
    parse_feed_with_config(bytes, config)
}
