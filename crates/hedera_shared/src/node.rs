use derive_more::Display;

/// A `NodeId` is a unique identifier for a node in a node arena.
///
/// The index addresses the arena slot, the generation tells apart the different nodes that have
/// lived in that slot. Once a node is freed, its slot is reused with a higher generation so any
/// `NodeId` still referring to the old node no longer resolves.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, PartialOrd, Ord)]
#[display("{index}:{generation}")]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl From<usize> for NodeId {
    /// Converts a usize into a first generation `NodeId`
    fn from(value: usize) -> Self {
        Self {
            index: value,
            generation: 0,
        }
    }
}

impl From<NodeId> for usize {
    /// Converts a `NodeId` into its slot index
    fn from(value: NodeId) -> Self {
        value.index
    }
}

impl NodeId {
    pub const ROOT_NODE: usize = 0;

    #[must_use]
    pub fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the id of the document node, which always lives in the first slot
    #[must_use]
    pub fn root() -> Self {
        Self::from(Self::ROOT_NODE)
    }

    /// Returns true when this nodeId is the root node
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.index == Self::ROOT_NODE && self.generation == 0
    }

    /// Returns the slot index
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Returns the id the same slot gets once the current node has been freed
    #[must_use]
    pub fn next_generation(&self) -> Self {
        Self {
            index: self.index,
            generation: self.generation.wrapping_add(1),
        }
    }
}
