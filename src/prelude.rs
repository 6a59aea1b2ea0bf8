pub use hedera_html::config::ParseConfig;
pub use hedera_html::document::builder::DocumentBuilder;
pub use hedera_html::document::{Document, DocumentFragment, DocumentId};
pub use hedera_html::engine::{Html5Engine, ParseEngine};
pub use hedera_html::errors::{Error, ParseError, ParseFailure, Severity};
pub use hedera_html::node::{Node, NodeType};
pub use hedera_html::options::{ParseOptions, DEFAULT_PARSE_OPTIONS};

pub use hedera_shared::encoding::DEFAULT_ENCODING;
pub use hedera_shared::node::NodeId;
