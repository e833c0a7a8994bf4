//! XML event source.
//!
//! Wraps a `quick-xml` [`Reader`] and reduces its output to the three events
//! the feed interpreter consumes: element start, text and element end. Errors
//! are yielded in-stream, after which the source is exhausted.
//!
//! `quick-xml` is a tokenizer more than a validating parser, so the source
//! adds the document-level checks it leaves out: exactly one document element,
//! no text outside it, and every element closed by end of input.
//!
//! # Example
//!
//! ```rust
//! use podcast_feed_rs::events::{FeedEvent, XmlEventSource};
//!
//! let xml = "<rss><channel><title>Show</title></channel></rss>";
//! let events: Vec<_> = XmlEventSource::from_reader(xml.as_bytes())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(events[2], FeedEvent::Start { name: "title".into(), attributes: vec![] });
//! assert_eq!(events[3], FeedEvent::Text("Show".into()));
//! ```

use std::io::BufRead;
use std::str;

use quick_xml::events::BytesStart;
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;

use crate::error::{Error, Result};

/// An event delivered to the feed interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// An element opened
    Start {
        /// Qualified element name, e.g. `itunes:category`
        name: String,
        /// Attributes as (qualified name, unescaped value) pairs
        attributes: Vec<(String, String)>,
    },
    /// A run of text or CDATA content
    Text(String),
    /// An element closed
    End {
        /// Qualified element name
        name: String,
    },
}

/// Intermediate event data (owned, to release the read buffer).
enum ParsedEvent {
    Start { name: String, attrs: Vec<(String, String)> },
    Empty { name: String, attrs: Vec<(String, String)> },
    End { name: String },
    Text { text: String },
    Eof,
}

/// A well-formedness-checked stream of [`FeedEvent`]s.
pub struct XmlEventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
    seen_root: bool,
    pending_end: Option<String>,
    done: bool,
}

impl<R: BufRead> XmlEventSource<R> {
    /// Creates an event source from a buffered reader.
    pub fn from_reader(reader: R) -> Self {
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.config_mut().trim_text(true);

        Self {
            reader: xml_reader,
            buf: Vec::with_capacity(4096),
            depth: 0,
            seen_root: false,
            pending_end: None,
            done: false,
        }
    }

    /// Reads the next feed event, or `None` at a clean end of input.
    fn read_next(&mut self) -> Result<Option<FeedEvent>> {
        // A self-closing element was reported as a start; report its end now.
        if let Some(name) = self.pending_end.take() {
            self.depth = self.depth.saturating_sub(1);
            return Ok(Some(FeedEvent::End { name }));
        }

        loop {
            self.buf.clear();

            let parsed = {
                let event = self.reader.read_event_into(&mut self.buf)?;
                match event {
                    XmlEvent::Start(ref e) => ParsedEvent::Start {
                        name: element_name(e)?,
                        attrs: extract_attrs(e)?,
                    },
                    XmlEvent::Empty(ref e) => ParsedEvent::Empty {
                        name: element_name(e)?,
                        attrs: extract_attrs(e)?,
                    },
                    XmlEvent::End(ref e) => ParsedEvent::End {
                        name: str::from_utf8(e.name().as_ref())?.to_string(),
                    },
                    XmlEvent::Text(ref e) => ParsedEvent::Text {
                        text: e.unescape()?.into_owned(),
                    },
                    XmlEvent::CData(ref e) => ParsedEvent::Text {
                        text: str::from_utf8(e.as_ref())?.to_string(),
                    },
                    XmlEvent::Eof => ParsedEvent::Eof,
                    // Declarations, comments, processing instructions, DOCTYPE
                    _ => continue,
                }
            };

            match parsed {
                ParsedEvent::Start { name, attrs } => {
                    self.open(&name)?;
                    return Ok(Some(FeedEvent::Start {
                        name,
                        attributes: attrs,
                    }));
                }
                ParsedEvent::Empty { name, attrs } => {
                    self.open(&name)?;
                    self.pending_end = Some(name.clone());
                    return Ok(Some(FeedEvent::Start {
                        name,
                        attributes: attrs,
                    }));
                }
                ParsedEvent::End { name } => {
                    self.depth = self.depth.saturating_sub(1);
                    return Ok(Some(FeedEvent::End { name }));
                }
                ParsedEvent::Text { text } => {
                    if self.depth == 0 {
                        if text.trim().is_empty() {
                            continue;
                        }
                        return Err(Error::Malformed(
                            "text outside of the document element".to_string(),
                        ));
                    }
                    return Ok(Some(FeedEvent::Text(text)));
                }
                ParsedEvent::Eof => {
                    if self.depth > 0 {
                        return Err(Error::Malformed(format!(
                            "document ended with {} unclosed element(s)",
                            self.depth
                        )));
                    }
                    if !self.seen_root {
                        return Err(Error::Malformed("no document element".to_string()));
                    }
                    return Ok(None);
                }
            }
        }
    }

    /// Records an element start, rejecting a second document element.
    fn open(&mut self, name: &str) -> Result<()> {
        if self.depth == 0 {
            if self.seen_root {
                return Err(Error::Malformed(format!(
                    "junk after document element: <{}>",
                    name
                )));
            }
            self.seen_root = true;
        }
        self.depth += 1;
        Ok(())
    }
}

impl<R: BufRead> Iterator for XmlEventSource<R> {
    type Item = Result<FeedEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_next() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Extracts the qualified name of a start or empty element.
fn element_name(e: &BytesStart<'_>) -> Result<String> {
    Ok(str::from_utf8(e.name().as_ref())?.to_string())
}

/// Extracts attributes from a BytesStart element as owned data.
fn extract_attrs(e: &BytesStart<'_>) -> Result<Vec<(String, String)>> {
    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((key, value));
    }
    Ok(attrs)
}
