//! Parse configuration
//!
//! Everything a parse needs is carried by an explicit [`ParseConfig`] value. There is no process
//! wide default encoding to mutate: callers that want another default build a config once and
//! pass it along.
use crate::options::ParseOptions;
use hedera_shared::encoding::{normalize_label, DEFAULT_ENCODING};
use url::Url;

#[derive(Clone, Debug, PartialEq)]
pub struct ParseConfig {
    /// Declared encoding of the input bytes. Empty means "not declared".
    input_encoding: String,
    /// Encoding requested for output
    output_encoding: String,
    /// Source url of the input, if any
    url: Option<Url>,
    options: ParseOptions,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            input_encoding: String::new(),
            output_encoding: DEFAULT_ENCODING.to_string(),
            url: None,
            options: ParseOptions::default(),
        }
    }
}

impl ParseConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input_encoding(mut self, encoding: &str) -> Self {
        self.input_encoding = normalize_label(encoding).to_string();
        self
    }

    /// Sets the output encoding. An empty label resets it to the default encoding.
    #[must_use]
    pub fn with_output_encoding(mut self, encoding: &str) -> Self {
        let encoding = normalize_label(encoding);
        self.output_encoding = if encoding.is_empty() {
            DEFAULT_ENCODING.to_string()
        } else {
            encoding.to_string()
        };
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: Url) -> Self {
        self.url = Some(url);
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the declared input encoding, or "" when none was declared
    pub fn input_encoding(&self) -> &str {
        &self.input_encoding
    }

    pub fn output_encoding(&self) -> &str {
        &self.output_encoding
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ParseConfig::default();
        assert_eq!(config.input_encoding(), "");
        assert_eq!(config.output_encoding(), DEFAULT_ENCODING);
        assert!(config.url().is_none());
        assert_eq!(config.options(), ParseOptions::default());
    }

    #[test]
    fn labels_are_normalized() {
        let config = ParseConfig::new()
            .with_input_encoding("iso-8859-1\0")
            .with_output_encoding(" \0");

        assert_eq!(config.input_encoding(), "iso-8859-1");
        assert_eq!(config.output_encoding(), DEFAULT_ENCODING);
    }

    #[test]
    fn builder() {
        let url = Url::parse("https://example.org/index.html").unwrap();
        let config = ParseConfig::new()
            .with_url(url.clone())
            .with_options(ParseOptions::RECOVER | ParseOptions::NOBLANKS);

        assert_eq!(config.url(), Some(&url));
        assert!(config.options().contains(ParseOptions::NOBLANKS));
        assert!(!config.options().contains(ParseOptions::NOERROR));
    }
}
