//! Node identity layer
//!
//! A [`Node`] is a small `Copy` value: the arena id of the node, its type and the id of the
//! document it belongs to. It holds no reference to the document and never keeps it alive. All
//! access goes through a [`Document`](crate::document::Document), which checks that the node
//! belongs to it and is still alive.
use crate::document::DocumentId;
use core::fmt;
use hedera_shared::node::NodeId;

pub mod arena;
pub mod data;
pub mod node_impl;

pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
pub const MATHML_NAMESPACE: &str = "http://www.w3.org/1998/Math/MathML";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Different types of nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    DocumentFragment,
    DocType,
    Element,
    Text,
    CData,
    Comment,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Document => "document",
            NodeType::DocumentFragment => "document fragment",
            NodeType::DocType => "doctype",
            NodeType::Element => "element",
            NodeType::Text => "text",
            NodeType::CData => "cdata",
            NodeType::Comment => "comment",
        };
        write!(f, "{name}")
    }
}

/// Handle to a node inside a document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Node {
    id: NodeId,
    node_type: NodeType,
    document: DocumentId,
}

impl Node {
    pub(crate) fn new(id: NodeId, node_type: NodeType, document: DocumentId) -> Self {
        Self {
            id,
            node_type,
            document,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Id of the document this node belongs to
    pub fn document(&self) -> DocumentId {
        self.document
    }

    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    pub fn is_cdata(&self) -> bool {
        self.node_type == NodeType::CData
    }

    pub fn is_comment(&self) -> bool {
        self.node_type == NodeType::Comment
    }

    pub fn is_fragment(&self) -> bool {
        self.node_type == NodeType::DocumentFragment
    }
}
