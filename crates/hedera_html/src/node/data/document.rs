/// Quirks mode the engine settled on for a document
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuirksMode {
    Quirks,
    LimitedQuirks,
    #[default]
    NoQuirks,
}

/// Data structure for the document node
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentData {
    pub quirks_mode: QuirksMode,
}
