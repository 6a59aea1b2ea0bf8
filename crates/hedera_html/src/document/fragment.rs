use crate::document::Document;
use crate::engine::{EngineInput, EngineTree, Html5Engine, ParseEngine};
use crate::errors::{Error, ParseFailure, Result};
use crate::node::node_impl::{NodeData, NodeImpl};
use crate::node::Node;
use crate::options::ParseOptions;
use hedera_shared::node::NodeId;
use log::{debug, warn};
use url::Url;

/// Element fragments are parsed in
const FRAGMENT_CONTEXT: &str = "body";

/// Defines a document fragment. The fragment lives in the arena of its document but is not part
/// of the document tree until it is appended somewhere.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DocumentFragment {
    node: Node,
}

impl DocumentFragment {
    /// Returns the document fragment node holding the fragment content
    pub fn node(&self) -> Node {
        self.node
    }

    pub fn children(&self, document: &Document) -> Result<Vec<Node>> {
        document.children(self.node)
    }

    pub fn is_empty(&self, document: &Document) -> Result<bool> {
        Ok(document.child_count(self.node)? == 0)
    }
}

impl Document {
    /// Creates a new, empty fragment
    pub fn create_document_fragment(&mut self) -> DocumentFragment {
        DocumentFragment {
            node: self.register(NodeData::DocumentFragment),
        }
    }

    /// Parses the input as content of a `<body>` element. The resulting nodes are placed below a
    /// new fragment in this document.
    pub fn parse_fragment(
        &mut self,
        input: &[u8],
        url: Option<&Url>,
        options: ParseOptions,
    ) -> std::result::Result<DocumentFragment, ParseFailure<DocumentFragment>> {
        self.parse_fragment_with(&Html5Engine, input, url, options)
    }

    /// Parses a fragment with the given engine. The input is decoded with the input encoding of
    /// this document. Empty input results in an empty fragment.
    pub fn parse_fragment_with(
        &mut self,
        engine: &dyn ParseEngine,
        input: &[u8],
        url: Option<&Url>,
        options: ParseOptions,
    ) -> std::result::Result<DocumentFragment, ParseFailure<DocumentFragment>> {
        let fragment = self.create_document_fragment();
        if input.is_empty() {
            return Ok(fragment);
        }

        let encoding = self.input_encoding().to_string();
        let request = EngineInput {
            content: input,
            url,
            encoding: Some(encoding.as_str()).filter(|label| !label.is_empty()),
            options,
        };

        let Some(tree) = engine.parse_fragment(&request, FRAGMENT_CONTEXT) else {
            warn!("failed to parse fragment of {} bytes, using an empty fragment", input.len());
            return Err(ParseFailure::new(
                Error::ParseFailed(format!("no fragment could be built from {} bytes", input.len())),
                fragment,
            ));
        };

        let imported = self.import_tree(&tree, fragment.node.id());
        self.add_diagnostics(tree.diagnostics);
        debug!("imported {imported} fragment nodes into document {}", self.id());

        Ok(fragment)
    }

    /// Moves the children of the fragment to the end of the parent. The fragment is empty
    /// afterwards and can be reused.
    pub fn append_fragment(&mut self, parent: Node, fragment: &DocumentFragment) -> Result<()> {
        self.append_child(parent, fragment.node)
    }

    /// Copies everything below the root of the tree into this document, below the given parent.
    /// Returns the number of copied nodes.
    fn import_tree(&mut self, tree: &EngineTree, parent: NodeId) -> usize {
        let mut count = 0;
        let mut stack: Vec<(NodeId, NodeId)> = tree
            .arena
            .node_ref(tree.root)
            .map(|root| root.children().iter().rev().map(|&id| (id, parent)).collect())
            .unwrap_or_default();

        while let Some((source_id, target_parent)) = stack.pop() {
            let Some(source) = tree.arena.node_ref(source_id) else {
                continue;
            };

            let node_id = self.arena.register_node(NodeImpl::new(source.data.clone()));
            self.arena.attach_node(node_id, target_parent, None);
            count += 1;

            stack.extend(source.children().iter().rev().map(|&id| (id, node_id)));
        }

        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParseConfig;
    use crate::document::builder::DocumentBuilder;

    struct FailingEngine;

    impl ParseEngine for FailingEngine {
        fn parse_document(&self, _input: &EngineInput<'_>) -> Option<EngineTree> {
            None
        }

        fn parse_fragment(&self, _input: &EngineInput<'_>, _context: &str) -> Option<EngineTree> {
            None
        }
    }

    fn names(doc: &Document, nodes: &[Node]) -> Vec<String> {
        nodes
            .iter()
            .map(|&node| doc.name(node).unwrap().to_string())
            .collect()
    }

    #[test]
    fn parse_fragment() {
        let mut doc = Document::parse(b"<p>main</p>", &ParseConfig::default()).unwrap();
        let count = doc.node_count();

        let fragment = doc
            .parse_fragment(b"<b>bold</b> and <i>italic</i>", None, ParseOptions::default())
            .unwrap();

        let children = fragment.children(&doc).unwrap();
        assert_eq!(names(&doc, &children), vec!["b", "#text", "i"]);
        assert_eq!(doc.content(fragment.node()).unwrap(), "bold and italic");
        assert!(!doc.is_attached(fragment.node()).unwrap());
        assert!(!doc.is_attached(children[0]).unwrap());

        // fragment node + b + "bold" + " and " + i + "italic"
        assert_eq!(doc.node_count(), count + 6);
        assert_eq!(doc.content(doc.root().unwrap()).unwrap(), "main");
    }

    #[test]
    fn fragment_is_spliced() {
        let mut doc = Document::parse(b"<ul id=list></ul>", &ParseConfig::default()).unwrap();
        let body = doc.children(doc.root().unwrap()).unwrap()[1];
        let list = doc.first_child(body).unwrap().unwrap();

        let fragment = doc
            .parse_fragment(b"<li>a</li><li>b</li>", None, ParseOptions::default())
            .unwrap();
        doc.append_fragment(list, &fragment).unwrap();

        assert!(fragment.is_empty(&doc).unwrap());
        let items = doc.children(list).unwrap();
        assert_eq!(names(&doc, &items), vec!["li", "li"]);
        assert!(doc.is_attached(items[1]).unwrap());
        assert_eq!(doc.content(list).unwrap(), "ab");
    }

    #[test]
    fn empty_fragment() {
        let mut doc = DocumentBuilder::new_document(&ParseConfig::default());
        let fragment = doc.parse_fragment(b"", None, ParseOptions::default()).unwrap();

        assert!(fragment.node().is_fragment());
        assert!(fragment.is_empty(&doc).unwrap());
        assert_eq!(doc.name(fragment.node()).unwrap(), "#document-fragment");
    }

    #[test]
    fn failed_fragment_has_fallback() {
        let mut doc = DocumentBuilder::new_document(&ParseConfig::default());
        let failure = doc
            .parse_fragment_with(&FailingEngine, b"<p>x</p>", None, ParseOptions::default())
            .unwrap_err();

        assert!(matches!(failure.error(), Error::ParseFailed(_)));
        let fragment = failure.into_fallback();
        assert!(fragment.is_empty(&doc).unwrap());
    }

    #[test]
    fn fragment_uses_document_encoding() {
        let config = ParseConfig::new().with_input_encoding("iso-8859-1");
        let mut doc = Document::parse(b"<p>x</p>", &config).unwrap();

        let fragment = doc
            .parse_fragment(b"<p>caf\xE9</p>", None, ParseOptions::empty())
            .unwrap();
        assert_eq!(doc.content(fragment.node()).unwrap(), "café");
    }

    #[test]
    fn fragment_options() {
        let mut doc = DocumentBuilder::new_document(&ParseConfig::default());
        let fragment = doc
            .parse_fragment(
                b"<p>a</p>\n  <p>b</p>",
                None,
                ParseOptions::default() | ParseOptions::NOBLANKS,
            )
            .unwrap();

        assert_eq!(fragment.children(&doc).unwrap().len(), 2);
    }
}
