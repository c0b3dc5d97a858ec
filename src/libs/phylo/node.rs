/// Position of a node in the tree arena.
pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// None for the root.
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Leaf names are genome names; inner nodes are usually unnamed.
    pub name: Option<String>,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
