pub mod io;
pub mod ops;
pub mod stat;
pub mod traversal;

use super::node::{Node, NodeId};

/// A phylogeny in arena form. Only topology and leaf names matter for scaffolding.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    pub(super) nodes: Vec<Node>,
    pub(super) root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unlinked node.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Ignored for ids outside the arena.
    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
        ops::add_child(self, parent_id, child_id)
    }

    pub fn postorder(&self, start_node: &NodeId) -> Vec<NodeId> {
        traversal::postorder(self, *start_node)
    }

    /// Leaf names below the root, left to right.
    pub fn get_leaf_names(&self) -> Vec<String> {
        if let Some(root) = self.root {
            stat::get_leaf_names(self, root)
        } else {
            Vec::new()
        }
    }

    pub fn from_spec(spec: &io::TreeSpec) -> Result<Tree, String> {
        io::from_spec(spec)
    }
}
