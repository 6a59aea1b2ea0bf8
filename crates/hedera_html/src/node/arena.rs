use crate::node::node_impl::NodeImpl;
use hedera_shared::node::NodeId;

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    generation: u32,
    node: Option<NodeImpl>,
}

/// The node arena is the single source for nodes in a document (or parsed fragment).
///
/// Freed slots are reused with a bumped generation, so a `NodeId` of a freed node never resolves
/// to the node that takes its place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeArena {
    slots: Vec<Slot>,
    /// Indices of freed slots
    free: Vec<usize>,
    /// Number of live nodes
    count: usize,
}

impl NodeArena {
    /// Creates a new NodeArena
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.count
    }

    /// Registers an unattached node into the arena
    pub fn register_node(&mut self, node: NodeImpl) -> NodeId {
        self.count += 1;

        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(index) {
                slot.node = Some(node);
                return NodeId::new(index, slot.generation);
            }
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });

        NodeId::new(index, 0)
    }

    /// Gets the node with the given id
    pub fn node_ref(&self, node_id: NodeId) -> Option<&NodeImpl> {
        self.slots
            .get(node_id.index())
            .filter(|slot| slot.generation == node_id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut NodeImpl> {
        self.slots
            .get_mut(node_id.index())
            .filter(|slot| slot.generation == node_id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    /// Iterates over the ids of all live nodes
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.node.is_some())
            .map(|(index, slot)| NodeId::new(index, slot.generation))
    }

    pub fn contains(&self, node_id: NodeId) -> bool {
        self.node_ref(node_id).is_some()
    }

    /// Frees a single node. Parent and children links are not touched, see `delete_subtree` for
    /// that.
    pub fn delete_node(&mut self, node_id: NodeId) -> Option<NodeImpl> {
        let slot = self
            .slots
            .get_mut(node_id.index())
            .filter(|slot| slot.generation == node_id.generation())?;

        let node = slot.node.take()?;
        slot.generation = node_id.next_generation().generation();
        self.free.push(node_id.index());
        self.count -= 1;

        Some(node)
    }

    /// Detaches the node and frees it together with all its descendants. Returns the number of
    /// freed nodes.
    pub fn delete_subtree(&mut self, node_id: NodeId) -> usize {
        self.detach_node(node_id);

        let ids = self.descendants(node_id);
        ids.into_iter()
            .filter_map(|id| self.delete_node(id))
            .count()
    }

    /// Returns the node and all its descendants in document order
    pub fn descendants(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![node_id];

        while let Some(id) = stack.pop() {
            let Some(node) = self.node_ref(id) else {
                continue;
            };
            result.push(id);
            stack.extend(node.children.iter().rev());
        }

        result
    }

    /// Returns true when `ancestor` is `node_id` itself or one of its ancestors
    pub fn has_ancestor(&self, node_id: NodeId, ancestor: NodeId) -> bool {
        let mut current = Some(node_id);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node_ref(id).and_then(NodeImpl::parent_id);
        }

        false
    }

    /// Attaches the node to the parent at the given position in the children (or at the end when
    /// no position is given). A node that is already attached somewhere is moved. Returns false
    /// when the attach would create a cycle or one of the nodes does not exist.
    pub fn attach_node(&mut self, node_id: NodeId, parent_id: NodeId, position: Option<usize>) -> bool {
        if !self.contains(node_id) || !self.contains(parent_id) {
            return false;
        }

        // Check if the parent lives inside the node. This would keep adding the node to itself
        if self.has_ancestor(parent_id, node_id) {
            return false;
        }

        self.detach_node(node_id);

        let Some(parent) = self.node_mut(parent_id) else {
            return false;
        };

        // Make sure position can never be larger than the number of children in the parent
        match position {
            Some(position) if position <= parent.children.len() => parent.children.insert(position, node_id),
            _ => parent.children.push(node_id),
        }

        if let Some(node) = self.node_mut(node_id) {
            node.parent = Some(parent_id);
        }

        true
    }

    /// Inserts the node right before the given sibling. Returns false when the sibling has no
    /// parent or the insert would create a cycle.
    pub fn insert_before(&mut self, node_id: NodeId, sibling_id: NodeId) -> bool {
        if node_id == sibling_id {
            return false;
        }

        let Some(parent_id) = self.node_ref(sibling_id).and_then(NodeImpl::parent_id) else {
            return false;
        };
        if !self.contains(node_id) || self.has_ancestor(parent_id, node_id) {
            return false;
        }

        self.detach_node(node_id);

        let Some(position) = self
            .node_ref(parent_id)
            .and_then(|parent| parent.children.iter().position(|&id| id == sibling_id))
        else {
            return false;
        };

        self.attach_node(node_id, parent_id, Some(position))
    }

    /// Removes the node from its parent. The node itself stays in the arena.
    pub fn detach_node(&mut self, node_id: NodeId) {
        let Some(parent_id) = self.node_ref(node_id).and_then(NodeImpl::parent_id) else {
            return;
        };

        if let Some(parent) = self.node_mut(parent_id) {
            parent.children.retain(|&id| id != node_id);
        }
        if let Some(node) = self.node_mut(node_id) {
            node.parent = None;
        }
    }

    /// Replaces the node by its children in its parent, then frees the node
    pub fn unwrap_node(&mut self, node_id: NodeId) {
        let Some(node) = self.node_ref(node_id) else {
            return;
        };
        let children = node.children.clone();

        match node.parent_id() {
            Some(_) => {
                for child in children {
                    self.insert_before(child, node_id);
                }
            }
            None => {
                for child in children {
                    self.detach_node(child);
                }
            }
        }

        self.delete_subtree(node_id);
    }

    /// Releases unused capacity
    pub fn shrink_to_fit(&mut self) {
        self.slots.shrink_to_fit();
        self.free.shrink_to_fit();
        for node in self.slots.iter_mut().filter_map(|slot| slot.node.as_mut()) {
            node.children.shrink_to_fit();
            if let Some(text) = node.get_text_data_mut() {
                text.value.shrink_to_fit();
            }
        }
    }
}
