//! Context stack of open elements.
//!
//! Every element start pushes a [`Frame`] and every element end pops one, so
//! the stack mirrors the chain of ancestors of the element being read. A frame
//! may name a write target for its children along with the field table that
//! maps their text onto that target. Frames without either still occupy a
//! slot so that depth stays correct.

use crate::mapping::FieldTable;

/// A record that element text can be written into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The podcast itself
    Podcast,
    /// The podcast's owner
    Owner,
    /// The episode currently being read
    Episode,
}

/// An open element.
///
/// Frames are built before they are pushed and not modified afterwards.
#[derive(Debug)]
pub struct Frame {
    id: u64,
    name: String,
    attributes: Vec<(String, String)>,
    target: Option<Target>,
    fields: Option<&'static FieldTable>,
    category: bool,
}

impl Frame {
    /// Creates an inert frame for an element.
    pub fn new(name: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            attributes,
            target: None,
            fields: None,
            category: false,
        }
    }

    /// Routes the text of this element's children into `target` through `fields`.
    pub fn with_target(mut self, target: Target, fields: &'static FieldTable) -> Self {
        self.target = Some(target);
        self.fields = Some(fields);
        self
    }

    /// Marks this frame as a node of the channel category tree.
    pub fn as_category(mut self) -> Self {
        self.category = true;
        self
    }

    /// Occurrence id, unique within one stack.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Element name as written in the document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up an attribute value by name.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes, in document order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Write target for this element's children.
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    /// Field table for this element's children.
    pub fn fields(&self) -> Option<&'static FieldTable> {
        self.fields
    }

    /// Returns true if this frame opened a channel category node.
    pub fn is_category(&self) -> bool {
        self.category
    }
}

/// The chain of currently open elements, innermost last.
#[derive(Debug, Default)]
pub struct ContextStack {
    frames: Vec<Frame>,
    next_id: u64,
}

impl ContextStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes a frame, assigning it a fresh occurrence id.
    pub fn push(&mut self, mut frame: Frame) {
        frame.id = self.next_id;
        self.next_id += 1;
        self.frames.push(frame);
    }

    /// Pops the innermost frame. Returns `None` on an empty stack.
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// The innermost open element.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// The parent of the innermost open element.
    pub fn parent(&self) -> Option<&Frame> {
        let len = self.frames.len();
        if len < 2 {
            return None;
        }
        self.frames.get(len - 2)
    }

    /// Number of open elements.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no element is open.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::OWNER_FIELDS;

    #[test]
    fn test_push_pop() {
        let mut stack = ContextStack::new();
        assert!(stack.is_empty());
        assert!(stack.top().is_none());

        stack.push(Frame::new("rss", Vec::new()));
        stack.push(Frame::new("channel", Vec::new()));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().unwrap().name(), "channel");
        assert_eq!(stack.parent().unwrap().name(), "rss");

        let popped = stack.pop().unwrap();
        assert_eq!(popped.name(), "channel");
        assert!(stack.parent().is_none());
        stack.pop();
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_occurrence_ids_are_unique() {
        let mut stack = ContextStack::new();
        stack.push(Frame::new("title", Vec::new()));
        let first = stack.pop().unwrap().id();
        stack.push(Frame::new("title", Vec::new()));
        let second = stack.top().unwrap().id();
        assert_ne!(first, second);
    }

    #[test]
    fn test_frame_tags() {
        let frame = Frame::new("itunes:owner", Vec::new()).with_target(Target::Owner, &OWNER_FIELDS);
        assert_eq!(frame.target(), Some(Target::Owner));
        assert!(frame.fields().is_some());
        assert!(!frame.is_category());

        let inert = Frame::new("itunes:category", vec![("text".to_string(), "Arts".to_string())])
            .as_category();
        assert!(inert.target().is_none());
        assert!(inert.is_category());
        assert_eq!(inert.attribute("text"), Some("Arts"));
        assert_eq!(inert.attribute("missing"), None);
    }
}
