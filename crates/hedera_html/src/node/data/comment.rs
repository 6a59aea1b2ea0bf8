/// Data structure for comment nodes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommentData {
    pub value: String,
}

impl CommentData {
    pub(crate) fn with_value(value: &str) -> Self {
        Self {
            value: value.to_owned(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}
