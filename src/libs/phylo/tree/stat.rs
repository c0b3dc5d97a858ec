use super::traversal;
use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Get IDs of all leaves in subtree rooted at `id`, left to right.
pub fn get_leaves(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    traversal::preorder(tree, id)
        .into_iter()
        .filter(|&n| tree.get_node(n).map_or(false, |node| node.is_leaf()))
        .collect()
}

/// Get names of all named leaves in subtree.
pub fn get_leaf_names(tree: &Tree, id: NodeId) -> Vec<String> {
    get_leaves(tree, id)
        .into_iter()
        .filter_map(|leaf_id| tree.get_node(leaf_id).and_then(|n| n.name.clone()))
        .collect()
}
