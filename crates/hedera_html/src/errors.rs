//! Error results that can be returned from the document layer
use crate::node::NodeType;
use core::fmt;
use hedera_shared::node::NodeId;
use thiserror::Error;

/// Severity of a diagnostic reported while parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// Parser diagnostic that defines a (non-fatal) problem on the given line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Diagnostic message
    pub message: String,
    /// Line number (1-based) in the input, 0 when unknown
    pub line: u64,
    pub severity: Severity,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };

        if self.line > 0 {
            write!(f, "{kind} at line {}: {}", self.line, self.message)
        } else {
            write!(f, "{kind}: {}", self.message)
        }
    }
}

/// Errors returned by document and node operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("parse failed: {0}")]
    ParseFailed(String),

    #[error("set meta encoding failed: {0}")]
    EncodingSetFailed(String),

    #[error("node {0} has been removed from its document")]
    StaleNode(NodeId),

    #[error("node {0} belongs to another document")]
    ForeignNode(NodeId),

    #[error("expected a {expected} node, found a {found} node")]
    InvalidNodeType { expected: NodeType, found: NodeType },

    #[error("hierarchy request error: {0}")]
    HierarchyRequest(String),
}

/// Result that can be returned which holds either T or an Error
pub type Result<T> = std::result::Result<T, Error>;

/// A failed parse. The error is accompanied by an empty but fully usable fallback value so callers
/// can carry on without handling a missing document.
#[derive(Debug)]
pub struct ParseFailure<T> {
    error: Error,
    fallback: T,
}

impl<T> ParseFailure<T> {
    pub(crate) fn new(error: Error, fallback: T) -> Self {
        Self { error, fallback }
    }

    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Returns the empty value produced in place of the parse result
    pub fn into_fallback(self) -> T {
        self.fallback
    }

    pub fn into_parts(self) -> (Error, T) {
        (self.error, self.fallback)
    }
}

impl<T> fmt::Display for ParseFailure<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl<T: fmt::Debug> std::error::Error for ParseFailure<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
