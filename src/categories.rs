//! Category path construction for nested `itunes:category` elements.
//!
//! iTunes categories nest: a `Technology` category may contain a `Gadgets`
//! subcategory. Each visited node contributes its full path from the root,
//! joined with [`PATH_DELIMITER`], so the tree
//!
//! ```text
//! Technology
//! └── Gadgets
//! ```
//!
//! yields `Technology` and `Technology>Gadgets`.

/// Separator between category names in a path.
pub const PATH_DELIMITER: char = '>';

/// Tracks the category node currently open in the channel.
///
/// The builder holds the paths of the open nodes, root first. Entering a
/// nested category extends its parent's path, and leaving one ascends to the
/// parent.
#[derive(Debug, Default)]
pub struct CategoryPathBuilder {
    trail: Vec<String>,
}

impl CategoryPathBuilder {
    /// Creates a builder with no open category.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full path of the current node.
    pub fn current_path(&self) -> Option<&str> {
        self.trail.last().map(String::as_str)
    }

    /// Opens a top-level category and returns its path.
    pub fn begin(&mut self, name: &str) -> &str {
        self.trail.clear();
        self.descend(name)
    }

    /// Opens a category under the current node and returns its path.
    ///
    /// With no node open this starts a new root.
    pub fn descend(&mut self, name: &str) -> &str {
        let path = match self.trail.last() {
            Some(parent) => format!("{}{}{}", parent, PATH_DELIMITER, name),
            None => name.to_string(),
        };
        self.trail.push(path);
        self.current_path().unwrap_or_default()
    }

    /// Closes the current node, ascending to its parent.
    pub fn ascend(&mut self) {
        self.trail.pop();
    }
}

/// Sorts category paths ascending and drops duplicates.
pub fn normalize_paths(paths: &mut Vec<String>) {
    paths.sort();
    paths.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths() {
        let mut builder = CategoryPathBuilder::new();
        let mut paths = Vec::new();

        paths.push(builder.begin("A").to_string());
        paths.push(builder.descend("A1").to_string());
        paths.push(builder.descend("A11").to_string());
        paths.push(builder.descend("A111").to_string());
        builder.ascend();
        builder.ascend();
        builder.ascend();
        assert_eq!(builder.current_path(), Some("A"));
        paths.push(builder.descend("A2").to_string());
        builder.ascend();
        builder.ascend();
        assert!(builder.current_path().is_none());

        normalize_paths(&mut paths);
        assert_eq!(paths, vec!["A", "A>A1", "A>A1>A11", "A>A1>A11>A111", "A>A2"]);
    }

    #[test]
    fn test_begin_resets_trail() {
        let mut builder = CategoryPathBuilder::new();
        builder.begin("Technology");
        assert_eq!(builder.descend("Gadgets"), "Technology>Gadgets");

        assert_eq!(builder.begin("Arts"), "Arts");
        builder.ascend();
        assert!(builder.current_path().is_none());
    }

    #[test]
    fn test_ascend_on_empty_is_noop() {
        let mut builder = CategoryPathBuilder::new();
        builder.ascend();
        assert!(builder.current_path().is_none());
        assert_eq!(builder.descend("Music"), "Music");
    }

    #[test]
    fn test_normalize_paths() {
        let mut paths = vec![
            "TV & Film".to_string(),
            "Technology".to_string(),
            "Technology>Gadgets".to_string(),
            "Technology".to_string(),
        ];
        normalize_paths(&mut paths);
        assert_eq!(paths, vec!["TV & Film", "Technology", "Technology>Gadgets"]);
    }
}
