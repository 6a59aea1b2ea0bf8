//! Encoding declared inside the document
//!
//! The declaration lives in a `<meta>` element in the head, either as `<meta charset="X">` or as
//! `<meta http-equiv="Content-Type" content="text/html; charset=X">`.
use crate::document::Document;
use crate::errors::{Error, Result};
use crate::node::data::element::{Attribute, ElementData};
use crate::node::node_impl::{NodeData, NodeImpl};
use hedera_shared::encoding::PSEUDO_ENCODING_HTML;
use hedera_shared::node::NodeId;
use log::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Declaration {
    /// `<meta charset>`
    Charset,
    /// `<meta http-equiv="Content-Type">`
    ContentType,
}

/// Returns the charset named in a content-type value like `text/html; charset=utf-8`
fn charset_from_content(content: &str) -> Option<&str> {
    let start = content.to_ascii_lowercase().find("charset=")? + "charset=".len();
    let value = content.get(start..)?.trim_start();
    let value = value.trim_start_matches(['"', '\'']);

    let end = value
        .find(|c: char| c == ';' || c == '"' || c == '\'' || c.is_whitespace())
        .unwrap_or(value.len());

    value.get(..end).filter(|charset| !charset.is_empty())
}

/// Checks that the label survives being written into a meta element and read back. Trailing NUL
/// terminators are not part of the label.
fn declarable_label(encoding: &str) -> Result<&str> {
    let label = encoding.trim_end_matches('\0');

    if label.contains(|c: char| c == ';' || c == '"' || c == '\'' || c == '\0' || c.is_whitespace()) {
        return Err(Error::EncodingSetFailed(format!(
            "'{}' is not a valid encoding label",
            label.escape_default()
        )));
    }
    if label.eq_ignore_ascii_case(PSEUDO_ENCODING_HTML) {
        return Err(Error::EncodingSetFailed(format!(
            "'{label}' cannot be declared as document encoding"
        )));
    }

    Ok(label)
}

impl Document {
    fn find_child_element(&self, parent: NodeId, tag: &str) -> Option<NodeId> {
        self.arena
            .node_ref(parent)?
            .children()
            .iter()
            .copied()
            .find(|&id| self.arena.node_ref(id).is_some_and(|node| node.is_element_named(tag)))
    }

    /// Finds the head element, either below the html element or at the top level
    fn find_head(&self) -> Option<NodeId> {
        let document = self.document_node_id();

        self.find_child_element(document, "head").or_else(|| {
            let html = self.find_child_element(document, "html")?;
            self.find_child_element(html, "head")
        })
    }

    /// Node whose children are searched for declarations: the head when there is one, otherwise
    /// the html element or the document itself.
    fn meta_scope(&self) -> NodeId {
        let document = self.document_node_id();

        self.find_head()
            .or_else(|| self.find_child_element(document, "html"))
            .unwrap_or(document)
    }

    /// Finds the first meta element in the scope that declares an encoding
    fn find_declaration(&self, scope: NodeId) -> Option<(NodeId, Declaration)> {
        let children = self.arena.node_ref(scope)?.children();

        children.iter().find_map(|&id| {
            let element = self
                .arena
                .node_ref(id)
                .filter(|node| node.is_element_named("meta"))
                .and_then(NodeImpl::get_element_data)?;

            if element.attribute("charset").is_some() {
                return Some((id, Declaration::Charset));
            }

            let is_content_type = element
                .attribute("http-equiv")
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("content-type"));
            let has_charset = element
                .attribute("content")
                .and_then(charset_from_content)
                .is_some();

            (is_content_type && has_charset).then_some((id, Declaration::ContentType))
        })
    }

    fn declared_value(&self, node_id: NodeId, declaration: Declaration) -> Option<&str> {
        let element = self.arena.node_ref(node_id).and_then(NodeImpl::get_element_data)?;

        match declaration {
            Declaration::Charset => element.attribute("charset").map(str::trim),
            Declaration::ContentType => element.attribute("content").and_then(charset_from_content),
        }
    }

    /// Returns the encoding declared in the document metadata, or an empty string when there is
    /// none.
    pub fn meta_encoding(&self) -> String {
        self.find_declaration(self.meta_scope())
            .and_then(|(node_id, declaration)| self.declared_value(node_id, declaration))
            .unwrap_or_default()
            .to_string()
    }

    /// Declares the encoding in the document metadata. An empty encoding removes the declaration.
    ///
    /// Fails when the document has no head element to hold the declaration, when the `html`
    /// pseudo encoding is requested, or when the label contains whitespace, quotes or `;`.
    pub fn set_meta_encoding(&mut self, encoding: &str) -> Result<()> {
        let encoding = declarable_label(encoding)?;

        let head = self
            .find_head()
            .ok_or_else(|| Error::EncodingSetFailed("document has no head element".into()))?;

        match self.find_declaration(head) {
            Some((node_id, _)) if encoding.is_empty() => {
                debug!("removing meta encoding declaration");
                self.arena.delete_subtree(node_id);
            }
            None if encoding.is_empty() => {}
            Some((node_id, declaration)) => {
                if self.declared_value(node_id, declaration) == Some(encoding) {
                    return Ok(());
                }

                let Some(element) = self.arena.node_mut(node_id).and_then(NodeImpl::get_element_data_mut) else {
                    return Err(Error::EncodingSetFailed("meta element disappeared".into()));
                };
                match declaration {
                    Declaration::Charset => element.set_attribute("charset", encoding),
                    Declaration::ContentType => {
                        element.set_attribute("content", &format!("text/html; charset={encoding}"))
                    }
                }
            }
            None => {
                debug!("adding meta encoding declaration for {encoding}");
                let meta = ElementData::new(
                    "meta",
                    None,
                    vec![
                        Attribute {
                            name: "http-equiv".into(),
                            value: "Content-Type".into(),
                        },
                        Attribute {
                            name: "content".into(),
                            value: format!("text/html; charset={encoding}"),
                        },
                    ],
                );
                let node_id = self.arena.register_node(NodeImpl::new(NodeData::Element(meta)));
                if !self.arena.attach_node(node_id, head, Some(0)) {
                    return Err(Error::EncodingSetFailed("cannot attach meta element".into()));
                }
            }
        }

        Ok(())
    }
}
