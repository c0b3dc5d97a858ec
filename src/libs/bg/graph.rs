use super::vertex::Vertex;
use crate::libs::multicolor::Multicolor;
use crate::libs::error::{Result, ScaffoldError};
use indexmap::IndexMap;
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

/// EdgeId is an index into the graph's edge arena.
pub type EdgeId = usize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BGEdge {
    pub vertex1: Vertex,
    pub vertex2: Vertex,
    pub multicolor: Multicolor,
}

impl BGEdge {
    pub fn new(vertex1: Vertex, vertex2: Vertex, multicolor: Multicolor) -> Self {
        Self {
            vertex1,
            vertex2,
            multicolor,
        }
    }

    /// An edge to an infinity vertex: an open fragment end.
    pub fn is_irregular(&self) -> bool {
        self.vertex1.is_irregular() || self.vertex2.is_irregular()
    }

    pub fn irregular_vertex(&self) -> Option<&Vertex> {
        if self.vertex1.is_irregular() {
            Some(&self.vertex1)
        } else if self.vertex2.is_irregular() {
            Some(&self.vertex2)
        } else {
            None
        }
    }

    /// For irregular edges, the extremity the open end hangs off.
    pub fn regular_vertex(&self) -> Option<&Vertex> {
        if self.vertex1.is_regular() {
            Some(&self.vertex1)
        } else if self.vertex2.is_regular() {
            Some(&self.vertex2)
        } else {
            None
        }
    }

    pub fn has_vertex(&self, v: &Vertex) -> bool {
        &self.vertex1 == v || &self.vertex2 == v
    }
}

fn pair_key(v1: &Vertex, v2: &Vertex) -> (Vertex, Vertex) {
    if v1 <= v2 {
        (v1.clone(), v2.clone())
    } else {
        (v2.clone(), v1.clone())
    }
}

/// A breakpoint graph: vertices are extremities (plus infinity vertices), edges carry the
/// multicolor of genomes sharing the adjacency.
///
/// Edges live in an arena; deleting an edge leaves a hole so ids stay stable while callers
/// collect a batch of ids and delete afterwards. Parallel edges are always merged, so a pair
/// of vertices has at most one edge.
#[derive(Debug, Clone, Default)]
pub struct BreakpointGraph {
    edges: Vec<Option<BGEdge>>,
    adjacency: IndexMap<Vertex, Vec<EdgeId>>,
    pairs: HashMap<(Vertex, Vertex), EdgeId>,
}

impl BreakpointGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `multicolor` between two vertices, merging into an existing edge if present.
    /// An empty multicolor adds nothing.
    pub fn add_edge(&mut self, v1: Vertex, v2: Vertex, multicolor: Multicolor) -> Option<EdgeId> {
        if multicolor.is_empty() {
            return None;
        }
        let key = pair_key(&v1, &v2);
        if let Some(&id) = self.pairs.get(&key) {
            if let Some(edge) = self.edges[id].as_mut() {
                edge.multicolor = &edge.multicolor + &multicolor;
                return Some(id);
            }
        }

        let id = self.edges.len();
        self.adjacency.entry(v1.clone()).or_default().push(id);
        if v1 != v2 {
            self.adjacency.entry(v2.clone()).or_default().push(id);
        }
        self.edges.push(Some(BGEdge::new(v1, v2, multicolor)));
        self.pairs.insert(key, id);
        Some(id)
    }

    pub fn add_bgedge(&mut self, edge: BGEdge) -> Option<EdgeId> {
        self.add_edge(edge.vertex1, edge.vertex2, edge.multicolor)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&BGEdge> {
        self.edges.get(id).and_then(|e| e.as_ref())
    }

    /// All live edges with their ids, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &BGEdge)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(id, e)| e.as_ref().map(|e| (id, e)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.adjacency.keys()
    }

    pub fn has_vertex(&self, v: &Vertex) -> bool {
        self.adjacency.contains_key(v)
    }

    pub fn edges_by_vertex<'a>(
        &'a self,
        v: &Vertex,
    ) -> impl Iterator<Item = (EdgeId, &'a BGEdge)> + 'a {
        self.adjacency
            .get(v)
            .into_iter()
            .flatten()
            .filter_map(move |&id| self.edge(id).map(|e| (id, e)))
    }

    /// The first irregular edge at `v`. In the no-repeat model there is at most one.
    pub fn irregular_edge_by_vertex(&self, v: &Vertex) -> Option<(EdgeId, &BGEdge)> {
        self.edges_by_vertex(v).find(|(_, e)| e.is_irregular())
    }

    pub fn irregular_edges_by_vertex<'a>(
        &'a self,
        v: &Vertex,
    ) -> impl Iterator<Item = (EdgeId, &'a BGEdge)> + 'a {
        self.edges_by_vertex(v).filter(|(_, e)| e.is_irregular())
    }

    pub fn get_edge_by_two_vertices(&self, v1: &Vertex, v2: &Vertex) -> Option<&BGEdge> {
        self.pairs
            .get(&pair_key(v1, v2))
            .and_then(|&id| self.edge(id))
    }

    /// Union of the multicolors of all edges incident to `v`.
    pub fn surrounding_multicolor(&self, v: &Vertex) -> Multicolor {
        self.edges_by_vertex(v)
            .fold(Multicolor::new(), |acc, (_, e)| &acc + &e.multicolor)
    }

    /// Union of the multicolors of the irregular edges incident to `v`.
    pub fn full_irregular_multicolor(&self, v: &Vertex) -> Multicolor {
        self.irregular_edges_by_vertex(v)
            .fold(Multicolor::new(), |acc, (_, e)| &acc + &e.multicolor)
    }

    pub fn irregular_edge_count(&self) -> usize {
        self.edges().filter(|(_, e)| e.is_irregular()).count()
    }

    /// Total number of genome occurrences on irregular edges.
    pub fn irregular_mass(&self) -> usize {
        self.edges()
            .filter(|(_, e)| e.is_irregular())
            .map(|(_, e)| e.multicolor.len())
            .sum()
    }

    pub fn delete_edge(&mut self, id: EdgeId) -> Option<BGEdge> {
        let edge = self.edges.get_mut(id)?.take()?;
        self.pairs.remove(&pair_key(&edge.vertex1, &edge.vertex2));
        for v in [&edge.vertex1, &edge.vertex2] {
            let now_empty = match self.adjacency.get_mut(v) {
                Some(ids) => {
                    ids.retain(|&e| e != id);
                    ids.is_empty()
                }
                None => false,
            };
            if now_empty {
                self.adjacency.shift_remove(v);
            }
        }
        Some(edge)
    }

    /// Delete a batch of previously collected edges.
    pub fn delete_edges(&mut self, ids: &[EdgeId]) {
        for &id in ids {
            self.delete_edge(id);
        }
    }

    /// Delete `v` together with every edge incident to it.
    pub fn delete_vertex(&mut self, v: &Vertex) {
        let ids: Vec<EdgeId> = self.edges_by_vertex(v).map(|(id, _)| id).collect();
        self.delete_edges(&ids);
        self.adjacency.shift_remove(v);
    }

    /// Remove `multicolor` from the edge between `v1` and `v2`; the edge disappears once empty.
    pub fn subtract_multicolor(&mut self, v1: &Vertex, v2: &Vertex, multicolor: &Multicolor) -> Result<()> {
        let id = *self.pairs.get(&pair_key(v1, v2)).ok_or_else(|| {
            ScaffoldError::InvalidKBreak(format!("no edge between {} and {}", v1, v2))
        })?;
        let remaining = match self.edge(id) {
            Some(edge) => edge.multicolor.try_sub(multicolor)?,
            None => {
                return Err(ScaffoldError::InvalidKBreak(format!(
                    "no edge between {} and {}",
                    v1, v2
                )))
            }
        };
        if remaining.is_empty() {
            self.delete_edge(id);
        } else if let Some(edge) = self.edges[id].as_mut() {
            edge.multicolor = remaining;
        }
        Ok(())
    }

    /// Split into connected components, each returned as an independent deep copy.
    /// Components come out in the order of their first vertex.
    pub fn connected_components_subgraphs(&self) -> Vec<BreakpointGraph> {
        let n = self.adjacency.len();
        let mut uf = UnionFind::<usize>::new(n);
        for (_, edge) in self.edges() {
            if let (Some(a), Some(b)) = (
                self.adjacency.get_index_of(&edge.vertex1),
                self.adjacency.get_index_of(&edge.vertex2),
            ) {
                uf.union(a, b);
            }
        }

        let mut slot_of: IndexMap<usize, usize> = IndexMap::new();
        for i in 0..n {
            let root = uf.find(i);
            let next = slot_of.len();
            slot_of.entry(root).or_insert(next);
        }

        let mut components = vec![BreakpointGraph::new(); slot_of.len()];
        for (_, edge) in self.edges() {
            if let Some(i) = self.adjacency.get_index_of(&edge.vertex1) {
                let slot = slot_of[&uf.find(i)];
                components[slot].add_bgedge(edge.clone());
            }
        }
        components
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mc(names: &[&str]) -> Multicolor {
        Multicolor::from_names(names)
    }

    fn sample() -> BreakpointGraph {
        // 1h -- 2t   with open ends at both, and an isolated 3h -- 4t
        let mut graph = BreakpointGraph::new();
        graph.add_edge(Vertex::block("1h"), Vertex::block("2t"), mc(&["a"]));
        graph.add_edge(Vertex::block("1h"), Vertex::infinity("1h"), mc(&["b"]));
        graph.add_edge(Vertex::block("2t"), Vertex::infinity("2t"), mc(&["b"]));
        graph.add_edge(Vertex::block("3h"), Vertex::block("4t"), mc(&["a", "b"]));
        graph
    }

    #[test]
    fn test_add_merges_parallel_edges() {
        let mut graph = sample();
        let id1 = graph.add_edge(Vertex::block("2t"), Vertex::block("1h"), mc(&["c"]));
        assert_eq!(id1, Some(0));
        assert_eq!(graph.edge_count(), 4);
        let edge = graph
            .get_edge_by_two_vertices(&Vertex::block("1h"), &Vertex::block("2t"))
            .unwrap();
        assert_eq!(edge.multicolor, mc(&["a", "c"]));

        assert_eq!(graph.add_edge(Vertex::block("x"), Vertex::block("y"), Multicolor::new()), None);
    }

    #[test]
    fn test_vertex_queries() {
        let graph = sample();
        let v = Vertex::block("1h");
        assert_eq!(graph.edges_by_vertex(&v).count(), 2);
        let (_, iedge) = graph.irregular_edge_by_vertex(&v).unwrap();
        assert_eq!(iedge.irregular_vertex(), Some(&Vertex::infinity("1h")));
        assert_eq!(iedge.regular_vertex(), Some(&v));
        assert!(iedge.irregular_vertex().and_then(|iv| iv.repeat()).is_none());
        assert_eq!(graph.surrounding_multicolor(&v), mc(&["a", "b"]));
        assert_eq!(graph.full_irregular_multicolor(&v), mc(&["b"]));
        assert!(graph.irregular_edge_by_vertex(&Vertex::block("3h")).is_none());
        assert_eq!(graph.irregular_edge_count(), 2);
        assert_eq!(graph.irregular_mass(), 2);
    }

    #[test]
    fn test_delete_and_components() {
        let mut graph = sample();
        let components = graph.connected_components_subgraphs();
        assert_eq!(components.len(), 2);
        assert_eq!(components[0].edge_count(), 3);
        assert_eq!(components[1].edge_count(), 1);

        // the copies are independent
        let mut first = components[0].clone();
        first.delete_vertex(&Vertex::block("1h"));
        assert_eq!(first.edge_count(), 1);
        assert_eq!(graph.edge_count(), 4);

        // cutting the support edge splits the component
        graph.delete_edge(0);
        assert!(graph.get_edge_by_two_vertices(&Vertex::block("1h"), &Vertex::block("2t")).is_none());
        assert_eq!(graph.connected_components_subgraphs().len(), 3);
    }

    #[test]
    fn test_subtract_multicolor() {
        let mut graph = sample();
        let (v3, v4) = (Vertex::block("3h"), Vertex::block("4t"));
        graph.subtract_multicolor(&v3, &v4, &mc(&["a"])).unwrap();
        assert_eq!(graph.get_edge_by_two_vertices(&v3, &v4).unwrap().multicolor, mc(&["b"]));

        assert!(graph.subtract_multicolor(&v3, &v4, &mc(&["a"])).is_err());

        graph.subtract_multicolor(&v4, &v3, &mc(&["b"])).unwrap();
        assert!(graph.get_edge_by_two_vertices(&v3, &v4).is_none());
        assert!(!graph.has_vertex(&v3));
    }
}
