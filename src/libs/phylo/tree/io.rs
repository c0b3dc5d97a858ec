use super::Tree;
use crate::libs::phylo::node::NodeId;
use serde::{Deserialize, Serialize};

/// A tree as nested objects, the shape it takes inside a dataset document:
/// `{"children": [{"name": "a"}, {"children": [{"name": "b"}, {"name": "c"}]}]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeSpec>,
}

impl TreeSpec {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            children: Vec::new(),
        }
    }

    pub fn inner(children: Vec<TreeSpec>) -> Self {
        Self {
            name: None,
            children,
        }
    }
}

/// Build the arena tree from its nested description.
pub fn from_spec(spec: &TreeSpec) -> Result<Tree, String> {
    let mut tree = Tree::new();
    let root = add_spec(&mut tree, spec)?;
    tree.set_root(root);
    Ok(tree)
}

fn add_spec(tree: &mut Tree, spec: &TreeSpec) -> Result<NodeId, String> {
    let id = tree.add_node();
    if let Some(node) = tree.get_node_mut(id) {
        node.name = spec.name.clone();
    }
    for child in &spec.children {
        let child_id = add_spec(tree, child)?;
        tree.add_child(id, child_id)?;
    }
    Ok(id)
}
