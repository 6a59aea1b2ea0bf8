use crate::config::ParseConfig;
use crate::document::builder::DocumentBuilder;
use crate::document::DocumentId;
use crate::engine::{EngineInput, EngineTree, Html5Engine, ParseEngine};
use crate::errors::{Error, ParseError, ParseFailure, Result};
use crate::node::arena::NodeArena;
use crate::node::data::comment::CommentData;
use crate::node::data::document::{DocumentData, QuirksMode};
use crate::node::data::element::{Attribute, ElementData};
use crate::node::data::text::TextData;
use crate::node::node_impl::{NodeData, NodeImpl};
use crate::node::{Node, NodeType};
use core::fmt;
use hedera_shared::node::NodeId;
use log::{debug, warn};
use url::Url;

/// Defines a document
///
/// The document exclusively owns the arena holding all its nodes. Nodes handed out are plain
/// handles; every operation on them goes through the document, which validates them first.
#[derive(Debug)]
pub struct Document {
    id: DocumentId,
    /// Holds and owns all nodes in the document. The document node is always its root node.
    pub(crate) arena: NodeArena,
    /// URL of the given document (if any)
    url: Option<Url>,
    input_encoding: String,
    output_encoding: String,
    /// Number of bytes the document was parsed from
    content_len: usize,
    quirks_mode: QuirksMode,
    /// Diagnostics reported while parsing
    diagnostics: Vec<ParseError>,
}

impl Document {
    pub(crate) fn new(url: Option<Url>, input_encoding: String, output_encoding: String) -> Self {
        let mut arena = NodeArena::new();
        arena.register_node(NodeImpl::new(NodeData::Document(DocumentData::default())));

        Self {
            id: DocumentId::next(),
            arena,
            url,
            input_encoding,
            output_encoding,
            content_len: 0,
            quirks_mode: QuirksMode::default(),
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn from_tree(
        tree: EngineTree,
        url: Option<Url>,
        input_encoding: String,
        output_encoding: String,
        content_len: usize,
    ) -> Self {
        Self {
            id: DocumentId::next(),
            arena: tree.arena,
            url,
            input_encoding,
            output_encoding,
            content_len,
            quirks_mode: tree.quirks_mode,
            diagnostics: tree.diagnostics,
        }
    }

    /// Parses the content into a document with the default html5ever engine
    pub fn parse(content: &[u8], config: &ParseConfig) -> std::result::Result<Self, ParseFailure<Self>> {
        Self::parse_with(&Html5Engine, content, config)
    }

    /// Parses the content into a document with the given engine.
    ///
    /// Empty content is not an error: it results in an empty document. When the engine cannot
    /// produce a tree, the failure carries an empty document as fallback.
    pub fn parse_with(
        engine: &dyn ParseEngine,
        content: &[u8],
        config: &ParseConfig,
    ) -> std::result::Result<Self, ParseFailure<Self>> {
        if content.is_empty() {
            debug!("empty input, creating an empty document");
            return Ok(DocumentBuilder::new_document(config));
        }

        let input = EngineInput {
            content,
            url: config.url(),
            encoding: Some(config.input_encoding()).filter(|label| !label.is_empty()),
            options: config.options(),
        };

        match engine.parse_document(&input) {
            Some(tree) => {
                let document = DocumentBuilder::from_engine_tree(tree, config, content.len());
                debug!(
                    "parsed {} bytes into document {} ({} nodes)",
                    content.len(),
                    document.id,
                    document.node_count()
                );
                Ok(document)
            }
            None => {
                warn!("failed to parse {} bytes of html, using an empty document", content.len());
                Err(ParseFailure::new(
                    Error::ParseFailed(format!("no document could be built from {} bytes", content.len())),
                    DocumentBuilder::new_document(config),
                ))
            }
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn input_encoding(&self) -> &str {
        &self.input_encoding
    }

    pub fn output_encoding(&self) -> &str {
        &self.output_encoding
    }

    /// Length in bytes of the content this document was parsed from
    pub fn content_len(&self) -> usize {
        self.content_len
    }

    /// Number of live nodes, attached or not
    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    pub fn quirks_mode(&self) -> QuirksMode {
        self.quirks_mode
    }

    pub fn diagnostics(&self) -> &[ParseError] {
        &self.diagnostics
    }

    pub(crate) fn add_diagnostics(&mut self, diagnostics: Vec<ParseError>) {
        self.diagnostics.extend(diagnostics);
    }

    /// Returns the document node at the top of the tree
    pub fn document_node(&self) -> Node {
        Node::new(NodeId::root(), NodeType::Document, self.id)
    }

    pub(crate) fn document_node_id(&self) -> NodeId {
        NodeId::root()
    }

    /// Returns the root element of the document, or `None` when the document has none. Every call
    /// returns a handle to the same node.
    pub fn root(&self) -> Option<Node> {
        self.arena
            .node_ref(NodeId::root())?
            .children()
            .iter()
            .copied()
            .find(|&id| self.arena.node_ref(id).is_some_and(|node| node.type_of() == NodeType::Element))
            .and_then(|id| self.wrap(id))
    }

    /// Creates a new element. The element is not attached anywhere.
    pub fn create_element_node(&mut self, tag: &str) -> Node {
        self.register(NodeData::Element(ElementData::new(tag, None, Vec::new())))
    }

    /// Creates a new CDATA section. Empty data is allowed.
    pub fn create_cdata(&mut self, data: &str) -> Node {
        self.register(NodeData::CData(TextData::with_value(data)))
    }

    pub fn create_text_node(&mut self, text: &str) -> Node {
        self.register(NodeData::Text(TextData::with_value(text)))
    }

    pub fn create_comment(&mut self, text: &str) -> Node {
        self.register(NodeData::Comment(CommentData::with_value(text)))
    }

    pub(crate) fn register(&mut self, data: NodeData) -> Node {
        let node = NodeImpl::new(data);
        let node_type = node.type_of();
        let node_id = self.arena.register_node(node);

        Node::new(node_id, node_type, self.id)
    }

    /// Wraps a live node of this document into a handle
    pub(crate) fn wrap(&self, node_id: NodeId) -> Option<Node> {
        let node = self.arena.node_ref(node_id)?;
        Some(Node::new(node_id, node.type_of(), self.id))
    }

    /// Resolves a node handle. Fails when the node belongs to another document or has been
    /// removed.
    pub(crate) fn node_data(&self, node: Node) -> Result<&NodeImpl> {
        if node.document() != self.id {
            return Err(Error::ForeignNode(node.id()));
        }

        self.arena.node_ref(node.id()).ok_or(Error::StaleNode(node.id()))
    }

    pub(crate) fn node_data_mut(&mut self, node: Node) -> Result<&mut NodeImpl> {
        if node.document() != self.id {
            return Err(Error::ForeignNode(node.id()));
        }

        self.arena.node_mut(node.id()).ok_or(Error::StaleNode(node.id()))
    }

    fn element_data(&self, node: Node) -> Result<&ElementData> {
        let data = self.node_data(node)?;
        data.get_element_data().ok_or(Error::InvalidNodeType {
            expected: NodeType::Element,
            found: data.type_of(),
        })
    }

    fn element_data_mut(&mut self, node: Node) -> Result<&mut ElementData> {
        let data = self.node_data_mut(node)?;
        let found = data.type_of();
        data.get_element_data_mut().ok_or(Error::InvalidNodeType {
            expected: NodeType::Element,
            found,
        })
    }

    pub fn node_type(&self, node: Node) -> Result<NodeType> {
        self.node_data(node).map(NodeImpl::type_of)
    }

    /// Returns the node name: the tag name for elements, `#text`, `#comment` and friends for the
    /// other nodes.
    pub fn name(&self, node: Node) -> Result<&str> {
        self.node_data(node).map(NodeImpl::name)
    }

    /// Returns the text content of the node. For elements, documents and fragments this is the
    /// text of all descendant text and CDATA nodes.
    pub fn content(&self, node: Node) -> Result<String> {
        let data = self.node_data(node)?;

        match &data.data {
            NodeData::Text(text) | NodeData::CData(text) => Ok(text.value.clone()),
            NodeData::Comment(comment) => Ok(comment.value.clone()),
            NodeData::DocType(_) => Ok(String::new()),
            NodeData::Document(_) | NodeData::DocumentFragment | NodeData::Element(_) => Ok(self
                .arena
                .descendants(node.id())
                .into_iter()
                .filter_map(|id| self.arena.node_ref(id).and_then(NodeImpl::get_text_data))
                .map(TextData::value)
                .collect()),
        }
    }

    pub fn attribute(&self, node: Node, name: &str) -> Result<Option<&str>> {
        Ok(self.element_data(node)?.attribute(name))
    }

    pub fn attributes(&self, node: Node) -> Result<&[Attribute]> {
        Ok(self.element_data(node)?.attributes())
    }

    pub fn parent(&self, node: Node) -> Result<Option<Node>> {
        Ok(self.node_data(node)?.parent_id().and_then(|id| self.wrap(id)))
    }

    pub fn children(&self, node: Node) -> Result<Vec<Node>> {
        Ok(self
            .node_data(node)?
            .children()
            .iter()
            .filter_map(|&id| self.wrap(id))
            .collect())
    }

    pub fn first_child(&self, node: Node) -> Result<Option<Node>> {
        Ok(self
            .node_data(node)?
            .children()
            .first()
            .and_then(|&id| self.wrap(id)))
    }

    pub fn child_count(&self, node: Node) -> Result<usize> {
        Ok(self.node_data(node)?.children().len())
    }

    /// Returns true when the node is part of the document tree
    pub fn is_attached(&self, node: Node) -> Result<bool> {
        self.node_data(node)?;
        Ok(self.arena.has_ancestor(node.id(), NodeId::root()))
    }

    pub fn set_attribute(&mut self, node: Node, name: &str, value: &str) -> Result<()> {
        self.element_data_mut(node)?.set_attribute(name, value);
        Ok(())
    }

    /// Removes the attribute. Returns true when the element had it.
    pub fn remove_attribute(&mut self, node: Node, name: &str) -> Result<bool> {
        Ok(self.element_data_mut(node)?.remove_attribute(name))
    }

    /// Appends the child as last child of the parent. A child that is attached elsewhere is moved.
    /// Appending a document fragment moves the children of the fragment instead.
    pub fn append_child(&mut self, parent: Node, child: Node) -> Result<()> {
        let parent_data = self.node_data(parent)?;
        if !parent_data.is_container() {
            return Err(Error::HierarchyRequest(format!(
                "a {} node cannot have children",
                parent_data.type_of()
            )));
        }

        let child_type = self.node_data(child)?.type_of();
        if child_type == NodeType::Document {
            return Err(Error::HierarchyRequest("the document node cannot be inserted".into()));
        }

        if self.arena.has_ancestor(parent.id(), child.id()) {
            return Err(Error::HierarchyRequest(format!(
                "node {} cannot be appended to itself or one of its descendants",
                child.id()
            )));
        }

        if child_type == NodeType::DocumentFragment {
            let children = self.node_data(child)?.children.clone();
            for node_id in children {
                self.arena.attach_node(node_id, parent.id(), None);
            }
            return Ok(());
        }

        if !self.arena.attach_node(child.id(), parent.id(), None) {
            return Err(Error::HierarchyRequest(format!(
                "node {} cannot be appended to node {}",
                child.id(),
                parent.id()
            )));
        }

        Ok(())
    }

    /// Detaches the node from its parent. The node stays alive and can be attached again.
    pub fn unlink(&mut self, node: Node) -> Result<()> {
        self.node_data(node)?;
        self.arena.detach_node(node.id());
        Ok(())
    }

    /// Removes the node and all its descendants from the document. Handles to any of the removed
    /// nodes become stale. Returns the number of removed nodes.
    pub fn remove(&mut self, node: Node) -> Result<usize> {
        self.node_data(node)?;
        if node.id().is_root() {
            return Err(Error::HierarchyRequest("the document node cannot be removed".into()));
        }

        Ok(self.arena.delete_subtree(node.id()))
    }

    /// Renders the node and its subtree in a tree-like structure
    pub fn print_tree(&self, node: Node) -> Result<String> {
        self.node_data(node)?;

        let mut output = String::new();
        self.write_tree(&mut output, node.id(), "", true)
            .map_err(|_| Error::StaleNode(node.id()))?;

        Ok(output)
    }

    /// Print a node and all its children in a tree-like structure
    fn write_tree(&self, f: &mut dyn fmt::Write, node_id: NodeId, prefix: &str, last: bool) -> fmt::Result {
        let Some(node) = self.arena.node_ref(node_id) else {
            return Ok(());
        };

        let branch = if last { "└─ " } else { "├─ " };
        write!(f, "{prefix}{branch}")?;

        match &node.data {
            NodeData::Document(_) => writeln!(f, "Document")?,
            NodeData::DocumentFragment => writeln!(f, "DocumentFragment")?,
            NodeData::DocType(doctype) => writeln!(
                f,
                r#"<!DOCTYPE {} "{}" "{}">"#,
                doctype.name, doctype.public_id, doctype.system_id
            )?,
            NodeData::Element(element) => {
                write!(f, "<{}", element.name)?;
                for attr in &element.attributes {
                    write!(f, " {}={}", attr.name, attr.value)?;
                }
                writeln!(f, ">")?;
            }
            NodeData::Text(text) => writeln!(f, r#""{}""#, text.value)?,
            NodeData::CData(text) => writeln!(f, "<![CDATA[{}]]>", text.value)?,
            NodeData::Comment(comment) => writeln!(f, "<!-- {} -->", comment.value)?,
        }

        let prefix = format!("{prefix}{}", if last { "   " } else { "│  " });
        let len = node.children.len();
        for (i, child_id) in node.children.iter().enumerate() {
            self.write_tree(f, *child_id, &prefix, i + 1 == len)?;
        }

        Ok(())
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, NodeId::root(), "", true)
    }
}
