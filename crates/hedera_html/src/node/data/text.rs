/// Data structure for text and CDATA nodes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextData {
    /// Actual text
    pub value: String,
}

impl TextData {
    pub(crate) fn with_value(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true when the text only consists of whitespace
    pub fn is_blank(&self) -> bool {
        self.value.chars().all(|c| c.is_ascii_whitespace())
    }
}
