//! Tree sink that lets html5ever build its tree straight into a [`NodeArena`]
use crate::engine::report::Report;
use crate::node::arena::NodeArena;
use crate::node::data::comment::CommentData;
use crate::node::data::doctype::DocTypeData;
use crate::node::data::document::{DocumentData, QuirksMode};
use crate::node::data::element::{Attribute, ElementData};
use crate::node::data::text::TextData;
use crate::node::node_impl::{NodeData, NodeImpl};
use hedera_shared::node::NodeId;
use html5ever::tendril::StrTendril;
use html5ever::tokenizer::{TagKind, Token, TokenSink, TokenSinkResult};
use html5ever::tree_builder::{
    ElemName, ElementFlags, NodeOrText, QuirksMode as EngineQuirksMode, TreeBuilder, TreeBuilderOpts, TreeSink,
};
use html5ever::{Attribute as EngineAttribute, LocalName, Namespace, QualName};
use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// Owned element name handed back to the tree builder
#[derive(Debug, Clone)]
pub(crate) struct OwnedElemName(QualName);

impl ElemName for OwnedElemName {
    fn ns(&self) -> &Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// Everything the sink produced
pub(crate) struct SinkOutput {
    pub(crate) arena: NodeArena,
    pub(crate) document: NodeId,
    pub(crate) quirks_mode: QuirksMode,
    pub(crate) report: Report,
}

pub(crate) struct ArenaSink {
    arena: RefCell<NodeArena>,
    /// Document node (parent of <html>)
    document: NodeId,
    /// Template element -> fragment holding its contents
    template_contents: RefCell<HashMap<NodeId, NodeId>>,
    quirks_mode: Cell<QuirksMode>,
    /// Line the tree builder is currently at
    line: Cell<u64>,
    report: RefCell<Report>,
}

impl ArenaSink {
    pub(crate) fn new(report: Report) -> Self {
        let mut arena = NodeArena::new();
        let document = arena.register_node(NodeImpl::new(NodeData::Document(DocumentData::default())));

        Self {
            arena: RefCell::new(arena),
            document,
            template_contents: RefCell::new(HashMap::new()),
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
            line: Cell::new(0),
            report: RefCell::new(report),
        }
    }

    fn new_node(&self, data: NodeData) -> NodeId {
        self.arena.borrow_mut().register_node(NodeImpl::new(data))
    }

    /// Appends text to the given text node. Returns false when the node is not a text node.
    fn merge_text(arena: &mut NodeArena, target: Option<NodeId>, text: &str) -> bool {
        let data = target
            .and_then(|id| arena.node_mut(id))
            .filter(|node| node.is_text_node())
            .and_then(NodeImpl::get_text_data_mut);

        match data {
            Some(data) => {
                data.value.push_str(text);
                true
            }
            None => false,
        }
    }

    fn previous_sibling(arena: &NodeArena, node_id: NodeId) -> Option<NodeId> {
        let parent = arena.node_ref(node_id)?.parent_id()?;
        let children = arena.node_ref(parent)?.children();
        let position = children.iter().position(|&id| id == node_id)?;

        children.get(position.checked_sub(1)?).copied()
    }
}

/// Sits between the tokenizer and the tree builder and records the names of all start tags found
/// in the input. Elements the tree builder synthesises never show up here.
pub(crate) struct StartTagRecorder {
    builder: TreeBuilder<NodeId, ArenaSink>,
    start_tags: RefCell<HashSet<String>>,
}

impl StartTagRecorder {
    pub(crate) fn new(sink: ArenaSink, opts: TreeBuilderOpts) -> Self {
        Self {
            builder: TreeBuilder::new(sink, opts),
            start_tags: RefCell::new(HashSet::new()),
        }
    }

    /// Finishes the tree and returns it together with the recorded start tag names
    pub(crate) fn finish(self) -> (SinkOutput, HashSet<String>) {
        (self.builder.sink.finish(), self.start_tags.into_inner())
    }
}

impl TokenSink for StartTagRecorder {
    type Handle = NodeId;

    fn process_token(&self, token: Token, line_number: u64) -> TokenSinkResult<Self::Handle> {
        if let Token::TagToken(tag) = &token {
            if tag.kind == TagKind::StartTag {
                self.start_tags.borrow_mut().insert(tag.name.to_string());
            }
        }

        self.builder.process_token(token, line_number)
    }

    fn end(&self) {
        self.builder.end();
    }

    fn adjusted_current_node_present_but_not_in_html_namespace(&self) -> bool {
        self.builder.adjusted_current_node_present_but_not_in_html_namespace()
    }
}

fn convert_attributes(attrs: Vec<EngineAttribute>) -> Vec<Attribute> {
    attrs
        .into_iter()
        .map(|attr| {
            let name = match &attr.name.prefix {
                Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                None => attr.name.local.to_string(),
            };
            Attribute {
                name,
                value: attr.value.to_string(),
            }
        })
        .collect()
}

impl TreeSink for ArenaSink {
    type Handle = NodeId;
    type Output = SinkOutput;
    type ElemName<'a>
        = OwnedElemName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        let mut arena = self.arena.into_inner();

        // Template contents are kept as regular children of the template element
        for (template, contents) in self.template_contents.into_inner() {
            let children = arena
                .node_ref(contents)
                .map(|node| node.children.clone())
                .unwrap_or_default();
            for child in children {
                arena.attach_node(child, template, None);
            }
            arena.delete_subtree(contents);
        }

        if let Some(NodeData::Document(data)) = arena.node_mut(self.document).map(|node| &mut node.data) {
            data.quirks_mode = self.quirks_mode.get();
        }

        SinkOutput {
            arena,
            document: self.document,
            quirks_mode: self.quirks_mode.get(),
            report: self.report.into_inner(),
        }
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.report.borrow_mut().error(msg, self.line.get());
    }

    fn get_document(&self) -> Self::Handle {
        self.document
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> OwnedElemName {
        let arena = self.arena.borrow();
        let name = arena
            .node_ref(*target)
            .and_then(NodeImpl::get_element_data)
            .map(|data| {
                QualName::new(
                    None,
                    Namespace::from(data.namespace.as_str()),
                    LocalName::from(data.name.as_str()),
                )
            });

        OwnedElemName(name.unwrap_or_else(|| QualName::new(None, Namespace::from(""), LocalName::from(""))))
    }

    fn create_element(&self, name: QualName, attrs: Vec<EngineAttribute>, flags: ElementFlags) -> Self::Handle {
        let data = ElementData::new(&*name.local, Some(&*name.ns), convert_attributes(attrs));
        let node_id = self.new_node(NodeData::Element(data));

        if flags.template {
            let contents = self.new_node(NodeData::DocumentFragment);
            self.template_contents.borrow_mut().insert(node_id, contents);
        }

        node_id
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        self.new_node(NodeData::Comment(CommentData::with_value(&text)))
    }

    fn create_pi(&self, target: StrTendril, data: StrTendril) -> Self::Handle {
        // Processing instructions do not exist in html, keep them as a comment
        let value = format!("?{target} {data}");
        self.new_node(NodeData::Comment(CommentData::with_value(&value)))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => {
                arena.attach_node(node, *parent, None);
            }
            NodeOrText::AppendText(text) => {
                let last = arena.node_ref(*parent).and_then(|node| node.children.last().copied());
                if Self::merge_text(&mut arena, last, &text) {
                    return;
                }

                let node_id = arena.register_node(NodeImpl::new(NodeData::Text(TextData::with_value(&text))));
                arena.attach_node(node_id, *parent, None);
            }
        }
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut arena = self.arena.borrow_mut();
        match new_node {
            NodeOrText::AppendNode(node) => {
                arena.insert_before(node, *sibling);
            }
            NodeOrText::AppendText(text) => {
                let previous = Self::previous_sibling(&arena, *sibling);
                if Self::merge_text(&mut arena, previous, &text) {
                    return;
                }

                let node_id = arena.register_node(NodeImpl::new(NodeData::Text(TextData::with_value(&text))));
                arena.insert_before(node_id, *sibling);
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let has_parent = self
            .arena
            .borrow()
            .node_ref(*element)
            .and_then(NodeImpl::parent_id)
            .is_some();

        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(&self, name: StrTendril, public_id: StrTendril, system_id: StrTendril) {
        let node_id = self.new_node(NodeData::DocType(DocTypeData::new(&name, &public_id, &system_id)));
        self.arena.borrow_mut().attach_node(node_id, self.document, None);
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        self.template_contents
            .borrow()
            .get(target)
            .copied()
            .unwrap_or(*target)
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, mode: EngineQuirksMode) {
        let mode = match mode {
            EngineQuirksMode::Quirks => QuirksMode::Quirks,
            EngineQuirksMode::LimitedQuirks => QuirksMode::LimitedQuirks,
            EngineQuirksMode::NoQuirks => QuirksMode::NoQuirks,
        };
        self.quirks_mode.set(mode);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<EngineAttribute>) {
        let mut arena = self.arena.borrow_mut();
        let Some(element) = arena.node_mut(*target).and_then(NodeImpl::get_element_data_mut) else {
            return;
        };

        for attr in convert_attributes(attrs) {
            element.add_attribute_if_missing(&attr.name, &attr.value);
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.arena.borrow_mut().detach_node(*target);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        let mut arena = self.arena.borrow_mut();
        let children = arena
            .node_ref(*node)
            .map(|node| node.children.clone())
            .unwrap_or_default();

        for child in children {
            arena.attach_node(child, *new_parent, None);
        }
    }

    fn set_current_line(&self, line_number: u64) {
        self.line.set(line_number);
    }
}
