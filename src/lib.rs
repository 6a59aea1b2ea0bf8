//! Hedera: an HTML document object model on top of html5ever
//!
//! The actual work is done by the workspace crates; this crate re-exports them and provides the
//! `hedera-parser` command line tool.
pub use hedera_html as html;
pub use hedera_shared as shared;

pub mod prelude;
