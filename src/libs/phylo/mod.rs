pub mod consistency;
pub mod node;
pub mod tree;

pub use consistency::ConsistencyOracle;
pub use node::{Node, NodeId};
pub use tree::io::TreeSpec;
pub use tree::Tree;
