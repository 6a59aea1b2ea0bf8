//! HTML document layer
//!
//! Turns raw bytes into a [`Document`] by handing them to a parsing engine, and exposes the
//! resulting tree through lightweight [`Node`] handles. Tokenizing and tree construction are done
//! by html5ever; this crate owns the node arena, the mapping between arena nodes and handles,
//! the encoding metadata of a document and the construction of new nodes and fragments.
use crate::errors::ParseFailure;

pub mod config;
pub mod document;
pub mod engine;
pub mod errors;
pub mod node;
pub mod options;

pub use config::ParseConfig;
pub use document::{Document, DocumentFragment};
pub use errors::{Error, ParseError};
pub use node::{Node, NodeType};
pub use options::{ParseOptions, DEFAULT_PARSE_OPTIONS};

/// Parses the given HTML string with the default configuration. A string the engine cannot
/// handle results in an empty document.
pub fn html_compile(html: &str) -> Document {
    Document::parse(html.as_bytes(), &ParseConfig::default()).unwrap_or_else(ParseFailure::into_fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile() {
        let doc = html_compile("<title>x</title>");
        let root = doc.root().unwrap();

        assert_eq!(doc.name(root).unwrap(), "html");
        assert_eq!(doc.content(root).unwrap(), "x");
    }
}
