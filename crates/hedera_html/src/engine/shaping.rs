//! Applies the tree shaping parse options to a freshly built tree
use crate::engine::report::Report;
use crate::node::arena::NodeArena;
use crate::node::data::doctype::DocTypeData;
use crate::node::data::text::TextData;
use crate::node::node_impl::{NodeData, NodeImpl};
use crate::node::NodeType;
use crate::options::ParseOptions;
use hedera_shared::node::NodeId;
use log::debug;
use std::collections::HashSet;

/// Elements in which whitespace is content
const WHITESPACE_PRESERVING: [&str; 4] = ["pre", "textarea", "script", "style"];

/// Inline elements. Whitespace following one of them separates words and is kept.
const INLINE_ELEMENTS: [&str; 29] = [
    "a", "abbr", "b", "bdi", "bdo", "big", "cite", "code", "dfn", "em", "font", "i", "img", "input", "kbd",
    "label", "mark", "q", "s", "samp", "select", "small", "span", "strong", "sub", "sup", "tt", "u", "var",
];

/// Shapes a complete document tree
pub(crate) fn shape_document(
    arena: &mut NodeArena,
    document: NodeId,
    start_tags: &HashSet<String>,
    options: ParseOptions,
    report: &mut Report,
) {
    let pruned = prune_unreachable(arena, document);
    if pruned > 0 {
        debug!("pruned {pruned} detached nodes");
    }

    if options.contains(ParseOptions::NOIMPLIED) {
        unwrap_implied(arena, document, start_tags);
    }

    if !options.contains(ParseOptions::NODEFDTD) && insert_default_doctype(arena, document) {
        report.warning("no doctype found, default doctype inserted", 0);
    }

    shape_common(arena, document, options);
}

/// Shapes a parsed fragment below the given container
pub(crate) fn shape_fragment(arena: &mut NodeArena, container: NodeId, options: ParseOptions) {
    shape_common(arena, container, options);
}

fn shape_common(arena: &mut NodeArena, root: NodeId, options: ParseOptions) {
    if options.contains(ParseOptions::NOBLANKS) {
        let removed = remove_blanks(arena, root);
        debug!("removed {removed} blank text nodes");
    }

    if options.contains(ParseOptions::COMPACT) {
        merge_adjacent_text(arena, root);
        arena.shrink_to_fit();
    }
}

/// Frees every node that cannot be reached from the root. The tree builder leaves those behind
/// when it moves nodes around.
fn prune_unreachable(arena: &mut NodeArena, root: NodeId) -> usize {
    let reachable: HashSet<NodeId> = arena.descendants(root).into_iter().collect();
    let detached: Vec<NodeId> = arena.ids().filter(|id| !reachable.contains(id)).collect();

    detached
        .into_iter()
        .filter_map(|id| arena.delete_node(id))
        .count()
}

fn find_child_element(arena: &NodeArena, parent: NodeId, tag: &str) -> Option<NodeId> {
    arena
        .node_ref(parent)?
        .children()
        .iter()
        .copied()
        .find(|&id| arena.node_ref(id).is_some_and(|node| node.is_element_named(tag)))
}

/// Unwraps the html, head and body elements the tree builder created without a start tag in the
/// input. `start_tags` holds the names of all start tags the tokenizer produced.
fn unwrap_implied(arena: &mut NodeArena, document: NodeId, start_tags: &HashSet<String>) {
    let Some(html) = find_child_element(arena, document, "html") else {
        return;
    };

    for tag in ["head", "body"] {
        if start_tags.contains(tag) {
            continue;
        }
        if let Some(node_id) = find_child_element(arena, html, tag) {
            arena.unwrap_node(node_id);
        }
    }

    if !start_tags.contains("html") {
        arena.unwrap_node(html);
    }
}

/// Inserts the default doctype when the document has none. Returns true when inserted.
fn insert_default_doctype(arena: &mut NodeArena, document: NodeId) -> bool {
    let has_doctype = arena.node_ref(document).is_some_and(|node| {
        node.children()
            .iter()
            .any(|&id| arena.node_ref(id).map(NodeImpl::type_of) == Some(NodeType::DocType))
    });
    if has_doctype {
        return false;
    }

    let node_id = arena.register_node(NodeImpl::new(NodeData::DocType(DocTypeData::html4_transitional())));
    arena.attach_node(node_id, document, Some(0))
}

fn in_whitespace_preserving_element(arena: &NodeArena, node_id: NodeId) -> bool {
    let mut current = arena.node_ref(node_id).and_then(NodeImpl::parent_id);
    while let Some(parent_id) = current {
        let Some(parent) = arena.node_ref(parent_id) else {
            break;
        };
        if WHITESPACE_PRESERVING.iter().any(|tag| parent.is_element_named(tag)) {
            return true;
        }
        current = parent.parent_id();
    }

    false
}

fn follows_inline_element(arena: &NodeArena, node_id: NodeId) -> bool {
    let Some(parent) = arena.node_ref(node_id).and_then(NodeImpl::parent_id) else {
        return false;
    };
    let Some(siblings) = arena.node_ref(parent).map(NodeImpl::children) else {
        return false;
    };

    siblings
        .iter()
        .position(|&id| id == node_id)
        .and_then(|pos| pos.checked_sub(1))
        .and_then(|pos| siblings.get(pos))
        .and_then(|&id| arena.node_ref(id))
        .is_some_and(|node| INLINE_ELEMENTS.iter().any(|tag| node.is_element_named(tag)))
}

/// Removes whitespace-only text nodes, except inside whitespace preserving elements and after
/// inline elements. Returns the number of removed nodes.
fn remove_blanks(arena: &mut NodeArena, root: NodeId) -> usize {
    let blanks: Vec<NodeId> = arena
        .descendants(root)
        .into_iter()
        .filter(|&id| {
            arena.node_ref(id).is_some_and(|node| {
                node.is_text_node() && node.get_text_data().is_some_and(TextData::is_blank)
            }) && !in_whitespace_preserving_element(arena, id)
                && !follows_inline_element(arena, id)
        })
        .collect();

    blanks
        .into_iter()
        .map(|id| arena.delete_subtree(id))
        .sum()
}

/// Merges runs of adjacent text nodes into the first node of the run
fn merge_adjacent_text(arena: &mut NodeArena, root: NodeId) {
    for node_id in arena.descendants(root) {
        let Some(children) = arena.node_ref(node_id).map(|node| node.children.clone()) else {
            continue;
        };

        let mut run_start: Option<NodeId> = None;
        for child in children {
            let text = arena
                .node_ref(child)
                .filter(|node| node.is_text_node())
                .and_then(NodeImpl::get_text_data)
                .map(|data| data.value.clone());

            match (run_start, text) {
                (Some(start), Some(text)) => {
                    if let Some(data) = arena.node_mut(start).and_then(NodeImpl::get_text_data_mut) {
                        data.value.push_str(&text);
                    }
                    arena.delete_subtree(child);
                }
                (None, Some(_)) => run_start = Some(child),
                (_, None) => run_start = None,
            }
        }
    }
}
