use super::graph::BreakpointGraph;
use super::vertex::Vertex;
use crate::libs::error::{Result, ScaffoldError};
use crate::libs::multicolor::Multicolor;

/// A 2-break on a breakpoint graph: the `multicolor` part of two edges is removed and
/// re-attached as two new vertex pairs over the same four vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KBreak {
    pub start_edges: Vec<(Vertex, Vertex)>,
    pub result_edges: Vec<(Vertex, Vertex)>,
    pub multicolor: Multicolor,
}

impl KBreak {
    pub fn new(
        start_edges: Vec<(Vertex, Vertex)>,
        result_edges: Vec<(Vertex, Vertex)>,
        multicolor: Multicolor,
    ) -> Result<Self> {
        if start_edges.len() != 2 || result_edges.len() != 2 {
            return Err(ScaffoldError::InvalidKBreak(format!(
                "expected 2 start and 2 result edges, got {} and {}",
                start_edges.len(),
                result_edges.len()
            )));
        }
        let mut start: Vec<&Vertex> = start_edges.iter().flat_map(|(a, b)| [a, b]).collect();
        let mut result: Vec<&Vertex> = result_edges.iter().flat_map(|(a, b)| [a, b]).collect();
        start.sort();
        result.sort();
        if start != result {
            return Err(ScaffoldError::InvalidKBreak(
                "start and result edges must span the same vertices".to_string(),
            ));
        }
        if multicolor.is_empty() {
            return Err(ScaffoldError::InvalidKBreak("empty multicolor".to_string()));
        }
        Ok(Self {
            start_edges,
            result_edges,
            multicolor,
        })
    }
}

impl BreakpointGraph {
    /// Apply `kbreak` in place, merging the multicolor into any existing result edge.
    ///
    /// Every start edge must carry the whole multicolor. A result pair of two infinity
    /// vertices closes both open ends and is not added to the graph.
    pub fn apply_kbreak(&mut self, kbreak: &KBreak) -> Result<()> {
        for (v1, v2) in &kbreak.start_edges {
            let present = self
                .get_edge_by_two_vertices(v1, v2)
                .map_or(false, |e| kbreak.multicolor.is_subset(&e.multicolor));
            if !present {
                return Err(ScaffoldError::InvalidKBreak(format!(
                    "edge {} -- {} does not carry {}",
                    v1, v2, kbreak.multicolor
                )));
            }
        }

        for (v1, v2) in &kbreak.start_edges {
            self.subtract_multicolor(v1, v2, &kbreak.multicolor)?;
        }
        for (v1, v2) in &kbreak.result_edges {
            if v1.is_irregular() && v2.is_irregular() {
                continue;
            }
            self.add_edge(v1.clone(), v2.clone(), kbreak.multicolor.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(names: &[&str]) -> Multicolor {
        Multicolor::from_names(names)
    }

    #[test]
    fn test_kbreak_validation() {
        let (v1, v2) = (Vertex::block("1h"), Vertex::block("2t"));
        let (iv1, iv2) = (Vertex::infinity("1h"), Vertex::infinity("2t"));

        assert!(KBreak::new(
            vec![(v1.clone(), iv1.clone()), (v2.clone(), iv2.clone())],
            vec![(v1.clone(), v2.clone()), (iv1.clone(), iv2.clone())],
            mc(&["a"]),
        )
        .is_ok());

        assert!(KBreak::new(
            vec![(v1.clone(), iv1.clone()), (v2.clone(), iv2.clone())],
            vec![(v1.clone(), v2.clone()), (iv1.clone(), v1.clone())],
            mc(&["a"]),
        )
        .is_err());

        assert!(KBreak::new(vec![(v1.clone(), iv1.clone())], vec![(v1, iv1)], mc(&["a"])).is_err());
    }

    #[test]
    fn test_apply_kbreak_joins_ends() {
        let (v1, v2) = (Vertex::block("1h"), Vertex::block("2t"));
        let (iv1, iv2) = (Vertex::infinity("1h"), Vertex::infinity("2t"));

        let mut graph = BreakpointGraph::new();
        graph.add_edge(v1.clone(), iv1.clone(), mc(&["a", "b"]));
        graph.add_edge(v2.clone(), iv2.clone(), mc(&["a"]));
        graph.add_edge(v1.clone(), v2.clone(), mc(&["b"]));

        let kbreak = KBreak::new(
            vec![(v1.clone(), iv1.clone()), (v2.clone(), iv2.clone())],
            vec![(v1.clone(), v2.clone()), (iv1.clone(), iv2.clone())],
            mc(&["a"]),
        )
        .unwrap();
        graph.apply_kbreak(&kbreak).unwrap();

        assert_eq!(
            graph.get_edge_by_two_vertices(&v1, &v2).unwrap().multicolor,
            mc(&["a", "b"])
        );
        assert_eq!(
            graph.get_edge_by_two_vertices(&v1, &iv1).unwrap().multicolor,
            mc(&["b"])
        );
        assert!(graph.get_edge_by_two_vertices(&v2, &iv2).is_none());
        assert!(graph.get_edge_by_two_vertices(&iv1, &iv2).is_none());
        assert_eq!(graph.irregular_edge_count(), 1);

        // nothing left to break on the second end
        assert!(graph.apply_kbreak(&kbreak).is_err());
    }
}
