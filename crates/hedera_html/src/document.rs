use core::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

pub mod builder;
pub mod document_impl;
pub mod fragment;
pub mod meta;

pub use document_impl::Document;
pub use fragment::DocumentFragment;

static NEXT_DOCUMENT_ID: AtomicUsize = AtomicUsize::new(1);

/// Identity of a document. Every document gets a fresh id, so a node handle can always tell which
/// document it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DocumentId(usize);

impl DocumentId {
    pub(crate) fn next() -> Self {
        Self(NEXT_DOCUMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "doc#{}", self.0)
    }
}
