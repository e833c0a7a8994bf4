//! Error types for the podcast feed parser.

use thiserror::Error;

/// Errors that can occur while parsing a podcast feed.
///
/// Only structural document errors are represented here. Missing optional
/// fields, unrecognized elements and values that fail to coerce are absorbed
/// by the parser and never surface as an `Error`.
#[derive(Error, Debug)]
pub enum Error {
    /// XML parsing error reported by the underlying engine
    #[error("XML parsing error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    /// XML attribute parsing error
    #[error("XML attribute error: {0}")]
    XmlAttribute(#[from] quick_xml::events::attributes::AttrError),

    /// Document structure the engine accepted but a feed cannot have
    #[error("Malformed document: {0}")]
    Malformed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type alias for feed parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display() {
        let err = Error::Malformed("no document element".to_string());
        assert_eq!(err.to_string(), "Malformed document: no document element");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.xml");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
