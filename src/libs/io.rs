//! Dataset documents: a tree, the breakpoint graph edges and the run settings in one JSON
//! file.
//!
//! ```text
//! {
//!   "tree": {"children": [{"children": [{"name": "a"}, {"name": "b"}]}, {"name": "c"}]},
//!   "edges": [
//!     {"v1": "1h", "v2": "2t", "multicolor": ["c"]},
//!     {"v1": "1h", "multicolor": ["a", "b"]},
//!     {"v1": "2t", "repeat": "L1h", "multicolor": ["a"]}
//!   ],
//!   "targets": ["a", "b"],
//!   "exclude": ["c"],
//!   "config": {"repeats": false}
//! }
//! ```

use crate::libs::bg::{BGEdge, BreakpointGraph, RepeatTag, Vertex};
use crate::libs::config::ScaffoldConfig;
use crate::libs::error::{Result, ScaffoldError};
use crate::libs::multicolor::Multicolor;
use crate::libs::phylo::{Tree, TreeSpec};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One edge of the breakpoint graph. Without `v2` it is the open end at `v1`, tagged with
/// `repeat` (`<name>h` or `<name>t`) when given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub v1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    pub multicolor: Multicolor,
}

impl EdgeSpec {
    pub fn vertices(&self) -> Result<(Vertex, Vertex)> {
        let v1 = Vertex::block(self.v1.as_str());
        match (&self.v2, &self.repeat) {
            (Some(v2), None) => Ok((v1, Vertex::block(v2.as_str()))),
            (None, None) => Ok((v1, Vertex::infinity(self.v1.as_str()))),
            (None, Some(tag)) => {
                let tag = RepeatTag::parse(tag).ok_or_else(|| {
                    ScaffoldError::InvalidInput(format!(
                        "repeat tag {} of {} does not end in h or t",
                        tag, self.v1
                    ))
                })?;
                Ok((v1, Vertex::tagged_infinity(self.v1.as_str(), tag)))
            }
            (Some(v2), Some(_)) => Err(ScaffoldError::InvalidInput(format!(
                "edge {} -- {} joins two extremities but carries a repeat tag",
                self.v1, v2
            ))),
        }
    }
}

impl From<&BGEdge> for EdgeSpec {
    fn from(edge: &BGEdge) -> Self {
        let (v1, other) = match edge.regular_vertex() {
            Some(v) if v == &edge.vertex1 => (&edge.vertex1, &edge.vertex2),
            _ => (&edge.vertex2, &edge.vertex1),
        };
        let (v2, repeat) = match other {
            Vertex::Block(name) => (Some(name.clone()), None),
            Vertex::Infinity { repeat, .. } => (None, repeat.as_ref().map(|t| t.to_string())),
        };
        Self {
            v1: v1.anchor().to_string(),
            v2,
            repeat,
            multicolor: edge.multicolor.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub tree: TreeSpec,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub config: ScaffoldConfig,
}

impl Dataset {
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ScaffoldError::InvalidInput(e.to_string()))
    }

    /// Read a dataset from a file, or standard input for `stdin`.
    pub fn from_file(infile: &str) -> Result<Self> {
        let mut text = String::new();
        intspan::reader(infile)
            .read_to_string(&mut text)
            .map_err(|e| ScaffoldError::InvalidInput(format!("{}: {}", infile, e)))?;
        Self::from_json(&text)
    }

    pub fn tree(&self) -> Result<Tree> {
        Tree::from_spec(&self.tree).map_err(ScaffoldError::InvalidInput)
    }

    /// Build the breakpoint graph; edges between the same two vertices are merged.
    pub fn graph(&self) -> Result<BreakpointGraph> {
        let mut graph = BreakpointGraph::new();
        for edge in &self.edges {
            let (v1, v2) = edge.vertices()?;
            if edge.multicolor.is_empty() {
                return Err(ScaffoldError::InvalidInput(format!(
                    "edge {} -- {} has no genomes",
                    v1, v2
                )));
            }
            graph.add_edge(v1, v2, edge.multicolor.clone());
        }
        Ok(graph)
    }

    /// Replace the edges with those of `graph`, in arena order.
    pub fn set_graph(&mut self, graph: &BreakpointGraph) {
        self.edges = graph.edges().map(|(_, e)| EdgeSpec::from(e)).collect();
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScaffoldError::InvalidInput(e.to_string()))
    }

    pub fn targets(&self) -> Multicolor {
        Multicolor::from_names(&self.targets)
    }

    pub fn exclude(&self) -> Multicolor {
        Multicolor::from_names(&self.exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::bg::RepeatEnd;

    const DATASET: &str = r#"{
        "tree": {"children": [{"children": [{"name": "a"}, {"name": "b"}]}, {"name": "c"}]},
        "edges": [
            {"v1": "1h", "v2": "2t", "multicolor": ["c"]},
            {"v1": "2t", "v2": "1h", "multicolor": ["c"]},
            {"v1": "1h", "multicolor": ["a", "b"]},
            {"v1": "2t", "repeat": "L1h", "multicolor": ["a"]}
        ],
        "exclude": ["c"],
        "config": {"repeats": true}
    }"#;

    #[test]
    fn test_dataset() {
        let dataset = Dataset::from_json(DATASET).unwrap();
        assert!(dataset.config.repeats);
        assert_eq!(dataset.config.parallel, 1);
        assert!(dataset.targets().is_empty());
        assert_eq!(dataset.exclude(), Multicolor::from_names(&["c"]));
        assert_eq!(dataset.tree().unwrap().get_leaf_names(), vec!["a", "b", "c"]);

        let graph = dataset.graph().unwrap();
        assert_eq!(graph.edge_count(), 3);
        assert_eq!(
            graph
                .get_edge_by_two_vertices(&Vertex::block("1h"), &Vertex::block("2t"))
                .unwrap()
                .multicolor,
            Multicolor::from_names(&["c", "c"])
        );
        let tagged = Vertex::tagged_infinity("2t", RepeatTag::new("L1", RepeatEnd::Head));
        assert!(graph.has_vertex(&tagged));
    }

    #[test]
    fn test_graph_round_trip() {
        let mut dataset = Dataset::from_json(DATASET).unwrap();
        let graph = dataset.graph().unwrap();
        dataset.set_graph(&graph);

        assert_eq!(dataset.edges.len(), 3);
        assert_eq!(dataset.edges[0].multicolor, Multicolor::from_names(&["c", "c"]));
        assert_eq!(dataset.edges[2].repeat.as_deref(), Some("L1h"));
        assert_eq!(dataset.edges[2].v2, None);

        let again = Dataset::from_json(&dataset.to_json().unwrap()).unwrap();
        assert_eq!(again.graph().unwrap().edge_count(), 3);
        assert_eq!(again.config, dataset.config);
    }

    #[test]
    fn test_bad_edges() {
        let edge = EdgeSpec {
            v1: "1h".to_string(),
            v2: None,
            repeat: Some("L1x".to_string()),
            multicolor: Multicolor::from_names(&["a"]),
        };
        assert!(matches!(edge.vertices(), Err(ScaffoldError::InvalidInput(_))));

        let edge = EdgeSpec {
            v2: Some("2t".to_string()),
            repeat: Some("L1h".to_string()),
            ..edge
        };
        assert!(edge.vertices().is_err());

        assert!(Dataset::from_json(r#"{"edges": []}"#).is_err());
        let empty = r#"{"tree": {"name": "a"}, "edges": [{"v1": "1h", "multicolor": []}]}"#;
        assert!(Dataset::from_json(empty).unwrap().graph().is_err());
    }
}
