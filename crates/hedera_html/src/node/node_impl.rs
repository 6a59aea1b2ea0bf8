use crate::node::data::comment::CommentData;
use crate::node::data::doctype::DocTypeData;
use crate::node::data::document::DocumentData;
use crate::node::data::element::ElementData;
use crate::node::data::text::TextData;
use crate::node::NodeType;
use hedera_shared::node::NodeId;

/// Actual data of a node, one variant per node type
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    /// Represents a document
    Document(DocumentData),
    /// Represents a document fragment
    DocumentFragment,
    /// Represents a doctype
    DocType(DocTypeData),
    /// Represents an element
    Element(ElementData),
    /// Represents a text
    Text(TextData),
    /// Represents a CDATA section
    CData(TextData),
    /// Represents a comment
    Comment(CommentData),
}

/// Node structure as stored inside a node arena
#[derive(Debug, Clone, PartialEq)]
pub struct NodeImpl {
    /// parent of the node, if any
    pub parent: Option<NodeId>,
    /// any children of the node
    pub children: Vec<NodeId>,
    /// actual data of the node
    pub data: NodeData,
}

impl NodeImpl {
    #[must_use]
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    pub fn type_of(&self) -> NodeType {
        match self.data {
            NodeData::Document(_) => NodeType::Document,
            NodeData::DocumentFragment => NodeType::DocumentFragment,
            NodeData::DocType(_) => NodeType::DocType,
            NodeData::Element(_) => NodeType::Element,
            NodeData::Text(_) => NodeType::Text,
            NodeData::CData(_) => NodeType::CData,
            NodeData::Comment(_) => NodeType::Comment,
        }
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        self.children.as_slice()
    }

    /// Returns true when this node can hold children
    pub fn is_container(&self) -> bool {
        matches!(
            self.data,
            NodeData::Document(_) | NodeData::DocumentFragment | NodeData::Element(_)
        )
    }

    /// Node name as the DOM reports it
    pub fn name(&self) -> &str {
        match &self.data {
            NodeData::Document(_) => "#document",
            NodeData::DocumentFragment => "#document-fragment",
            NodeData::DocType(data) => &data.name,
            NodeData::Element(data) => &data.name,
            NodeData::Text(_) => "#text",
            NodeData::CData(_) => "#cdata-section",
            NodeData::Comment(_) => "#comment",
        }
    }

    pub fn get_element_data(&self) -> Option<&ElementData> {
        if let NodeData::Element(data) = &self.data {
            return Some(data);
        }
        None
    }

    pub fn get_element_data_mut(&mut self) -> Option<&mut ElementData> {
        if let NodeData::Element(data) = &mut self.data {
            return Some(data);
        }
        None
    }

    /// Returns the text of text and CDATA nodes
    pub fn get_text_data(&self) -> Option<&TextData> {
        match &self.data {
            NodeData::Text(data) | NodeData::CData(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_text_data_mut(&mut self) -> Option<&mut TextData> {
        match &mut self.data {
            NodeData::Text(data) | NodeData::CData(data) => Some(data),
            _ => None,
        }
    }

    /// Returns true for an html element with the given tag name
    pub fn is_element_named(&self, tag: &str) -> bool {
        self.get_element_data().is_some_and(|data| data.is_named(tag))
    }

    /// Returns true for a plain text node (CDATA excluded)
    pub fn is_text_node(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }
}
