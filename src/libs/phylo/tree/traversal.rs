use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Node ids from `start_node` down, children left to right.
pub fn preorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = vec![start_node];

    while let Some(id) = stack.pop() {
        if let Some(node) = tree.get_node(id) {
            result.push(id);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    result
}

/// Node ids with every node after all of its descendants.
pub fn postorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = preorder_mirrored(tree, start_node);
    result.reverse();
    result
}

// Root -> children in reverse order; reversed, this is a postorder.
fn preorder_mirrored(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = vec![start_node];

    while let Some(id) = stack.pop() {
        if let Some(node) = tree.get_node(id) {
            result.push(id);
            for &child in &node.children {
                stack.push(child);
            }
        }
    }

    result
}
