use crate::config::ParseConfig;
use crate::document::Document;
use crate::engine::EngineTree;
use hedera_shared::encoding::DEFAULT_ENCODING;

/// This struct will be used to create fully initialized documents
pub struct DocumentBuilder;

impl DocumentBuilder {
    /// Creates a new, empty document: a document node without any children. The declared input
    /// encoding of the config is kept, or the default encoding when none is declared.
    #[must_use]
    pub fn new_document(config: &ParseConfig) -> Document {
        Document::new(
            config.url().cloned(),
            Self::input_encoding(config, None),
            config.output_encoding().to_string(),
        )
    }

    /// Wraps a tree produced by the engine into a document
    pub(crate) fn from_engine_tree(tree: EngineTree, config: &ParseConfig, content_len: usize) -> Document {
        let input_encoding = Self::input_encoding(config, Some(&tree));

        Document::from_tree(
            tree,
            config.url().cloned(),
            input_encoding,
            config.output_encoding().to_string(),
            content_len,
        )
    }

    /// The declared encoding wins. Otherwise the encoding the engine decoded with, or the default
    /// encoding when nothing was decoded at all.
    fn input_encoding(config: &ParseConfig, tree: Option<&EngineTree>) -> String {
        if !config.input_encoding().is_empty() {
            return config.input_encoding().to_string();
        }

        tree.map_or_else(|| DEFAULT_ENCODING.to_string(), EngineTree::encoding_name)
    }
}
