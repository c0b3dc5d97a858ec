//! Tree-consistent multicolors: the genome groups a phylogeny vouches for.
//!
//! Ancestral positions are unknown in an unrooted tree, so by default every branch
//! contributes both groups it separates. A rooted reading takes only the clades below
//! each node.

use super::node::NodeId;
use super::tree::Tree;
use crate::libs::error::{Result, ScaffoldError};
use crate::libs::multicolor::{Genome, Multicolor};
use itertools::Itertools;
use std::collections::BTreeSet;

#[derive(Debug, Clone)]
pub struct ConsistencyOracle {
    consistent: Vec<Multicolor>,
    full: Multicolor,
}

impl ConsistencyOracle {
    pub fn new(tree: &Tree, rooted: bool) -> Result<Self> {
        let root = tree.get_root().ok_or(ScaffoldError::EmptyTree)?;

        let names = tree.get_leaf_names();
        if names.is_empty() {
            return Err(ScaffoldError::EmptyTree);
        }
        if let Some(dup) = names.iter().duplicates().next() {
            return Err(ScaffoldError::InvalidInput(format!(
                "leaf name {} appears more than once",
                dup
            )));
        }
        let full = Multicolor::from_names(&names);

        let clades = clade_multicolors(tree, root);
        let mut found: BTreeSet<Multicolor> = BTreeSet::new();
        found.insert(full.clone());
        for (id, clade) in clades.iter().enumerate() {
            if clade.is_empty() || tree.get_node(id).is_none() {
                continue;
            }
            found.insert(clade.clone());
            if !rooted && id != root {
                // Leaves of a clade are unique, so the complement is well defined.
                let rest = full.try_sub(clade)?;
                if !rest.is_empty() {
                    found.insert(rest);
                }
            }
        }

        let consistent = found
            .into_iter()
            .sorted_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)))
            .collect();

        Ok(Self { consistent, full })
    }

    /// The guidance set, largest first.
    pub fn consistent_multicolors(&self) -> &[Multicolor] {
        &self.consistent
    }

    pub fn has_genome(&self, genome: &Genome) -> bool {
        self.full.contains(genome)
    }
}

/// Multicolor of named leaves under every node, indexed by NodeId.
fn clade_multicolors(tree: &Tree, root: NodeId) -> Vec<Multicolor> {
    let mut clades = vec![Multicolor::new(); tree.len()];
    for id in tree.postorder(&root) {
        let Some(node) = tree.get_node(id) else {
            continue;
        };
        clades[id] = if node.is_leaf() {
            match &node.name {
                Some(name) => Multicolor::from_genomes([Genome::new(name.as_str())]),
                None => Multicolor::new(),
            }
        } else {
            node.children
                .iter()
                .fold(Multicolor::new(), |acc, &c| &acc + &clades[c])
        };
    }
    clades
}
