//! Encoding label helpers
//!
//! Labels handed to us may come from C-style sources that carry a trailing NUL terminator, or
//! from user input with stray whitespace. Everything that reaches the engine or is stored on a
//! document goes through [`normalize_label`] first. An empty label is a valid value meaning
//! "nothing declared".
pub use encoding_rs::Encoding;

/// Encoding used when the caller does not supply one
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Not a real encoding: it asks for entity-only output and can never be declared inside a
/// document.
pub const PSEUDO_ENCODING_HTML: &str = "html";

/// Strips NUL terminators and surrounding whitespace from a label or url.
#[must_use]
pub fn normalize_label(label: &str) -> &str {
    label.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}

/// Looks up the encoding for the given label. Returns `None` for empty or unknown labels.
#[must_use]
pub fn lookup(label: &str) -> Option<&'static Encoding> {
    let label = normalize_label(label);
    if label.is_empty() {
        return None;
    }

    Encoding::for_label(label.as_bytes())
}

/// Returns the lowercase canonical name of an encoding, e.g. `latin1` -> `windows-1252`
#[must_use]
pub fn canonical_name(encoding: &'static Encoding) -> String {
    encoding.name().to_ascii_lowercase()
}

/// Detects a byte order mark at the start of the input. Returns the encoding it announces and the
/// length of the mark.
#[must_use]
pub fn sniff_bom(content: &[u8]) -> Option<(&'static Encoding, usize)> {
    Encoding::for_bom(content)
}
