//! Carving the candidate subnets of one connected component.
//!
//! Both filters work on a private copy of the component: doomed edges are collected first
//! and deleted in one batch, then the remainder is re-split into connected subnets.

use crate::libs::bg::{BreakpointGraph, EdgeId, RepeatEnd, Vertex};
use crate::libs::multicolor::Multicolor;
use log::debug;
use std::collections::{BTreeSet, HashMap};

/// Irregular edges that can take part in a join for `target`, plus the regular edges
/// supporting a pair of them.
pub fn irregular_subnets(
    mut cc: BreakpointGraph,
    target: &Multicolor,
    exclude: &Multicolor,
) -> Vec<BreakpointGraph> {
    let mut to_remove: Vec<EdgeId> = Vec::new();
    for (id, edge) in cc.edges() {
        if !edge.is_irregular() {
            continue;
        }
        let reason = if !target.is_subset(&edge.multicolor) {
            Some("no target multicolor")
        } else if !edge.multicolor.is_disjoint(exclude) {
            Some("contains excluded genomes")
        } else if target
            .iter_colors()
            .any(|g| edge.multicolor.multiplicity(g) > 1)
        {
            Some("target genome present more than once")
        } else {
            None
        };
        if let Some(reason) = reason {
            debug!(
                "removing {} -- {} {}: {}",
                edge.vertex1, edge.vertex2, edge.multicolor, reason
            );
            to_remove.push(id);
        }
    }
    cc.delete_edges(&to_remove);

    let mut to_remove: Vec<EdgeId> = Vec::new();
    for (id, edge) in cc.edges() {
        if edge.is_irregular() {
            continue;
        }
        let supported = cc.irregular_edge_by_vertex(&edge.vertex1).is_some()
            && cc.irregular_edge_by_vertex(&edge.vertex2).is_some();
        if !supported {
            debug!(
                "removing {} -- {} {}: does not support a pair of irregular edges",
                edge.vertex1, edge.vertex2, edge.multicolor
            );
            to_remove.push(id);
        }
    }
    cc.delete_edges(&to_remove);

    cc.connected_components_subgraphs()
        .into_iter()
        .filter(|g| !g.is_empty())
        .collect()
}

/// Subnets of the repeat-aware filter, with the repeat ends each block vertex still offers.
#[derive(Debug, Clone, Default)]
pub struct RepeatSubnets {
    pub subnets: Vec<BreakpointGraph>,
    /// Repeats whose head is open at a vertex.
    pub h_support: HashMap<Vertex, BTreeSet<String>>,
    /// Repeats whose tail is open at a vertex.
    pub t_support: HashMap<Vertex, BTreeSet<String>>,
}

impl RepeatSubnets {
    pub fn has_head(&self, v: &Vertex, repeat: &str) -> bool {
        self.h_support.get(v).map_or(false, |s| s.contains(repeat))
    }

    pub fn has_tail(&self, v: &Vertex, repeat: &str) -> bool {
        self.t_support.get(v).map_or(false, |s| s.contains(repeat))
    }

    /// Repeats with both a head and a tail end somewhere in `subnet`.
    pub fn repeats_in(&self, subnet: &BreakpointGraph) -> BTreeSet<String> {
        let mut heads = BTreeSet::new();
        let mut tails = BTreeSet::new();
        for v in subnet.vertices().filter(|v| v.is_regular()) {
            if let Some(s) = self.h_support.get(v) {
                heads.extend(s.iter().cloned());
            }
            if let Some(s) = self.t_support.get(v) {
                tails.extend(s.iter().cloned());
            }
        }
        heads.intersection(&tails).cloned().collect()
    }
}

/// Repeat-aware filter.
///
/// A tagged irregular edge stays only if it carries every target genome exactly once, and
/// then records its repeat end at the block vertex. An untagged irregular edge with an
/// excluded genome takes its block vertex out entirely. A regular edge stays only between
/// a head and a tail end of a common repeat.
pub fn repeat_subnets(
    mut cc: BreakpointGraph,
    target: &Multicolor,
    exclude: &Multicolor,
) -> RepeatSubnets {
    let mut result = RepeatSubnets::default();

    let mut to_remove: Vec<EdgeId> = Vec::new();
    let mut to_remove_vertices: Vec<Vertex> = Vec::new();
    for (id, edge) in cc.edges() {
        if !edge.is_irregular() {
            continue;
        }
        let (Some(iv), Some(v)) = (edge.irregular_vertex(), edge.regular_vertex()) else {
            // an infinity-to-infinity edge joins nothing
            continue;
        };
        match iv.repeat() {
            Some(tag) => {
                if !target.is_subset(&edge.multicolor)
                    || target
                        .iter_colors()
                        .any(|g| edge.multicolor.multiplicity(g) > 1)
                {
                    debug!("removing repeat edge {} -- {} {}", v, iv, edge.multicolor);
                    to_remove.push(id);
                    continue;
                }
                let support = match tag.end {
                    RepeatEnd::Head => &mut result.h_support,
                    RepeatEnd::Tail => &mut result.t_support,
                };
                support
                    .entry(v.clone())
                    .or_default()
                    .insert(tag.name.clone());
            }
            None => {
                if !edge.multicolor.is_disjoint(exclude) {
                    debug!("removing vertex {}: open end of excluded genomes", v);
                    to_remove_vertices.push(v.clone());
                }
            }
        }
    }

    cc.delete_edges(&to_remove);
    for v in &to_remove_vertices {
        result.h_support.remove(v);
        result.t_support.remove(v);
        cc.delete_vertex(v);
    }

    let mut to_remove: Vec<EdgeId> = Vec::new();
    for (id, edge) in cc.edges() {
        if edge.is_irregular() {
            continue;
        }
        let (v1, v2) = (&edge.vertex1, &edge.vertex2);
        if !shares_repeat(&result.h_support, v1, &result.t_support, v2)
            && !shares_repeat(&result.t_support, v1, &result.h_support, v2)
        {
            to_remove.push(id);
        }
    }
    cc.delete_edges(&to_remove);

    result.subnets = cc
        .connected_components_subgraphs()
        .into_iter()
        .filter(|g| !g.is_empty())
        .collect();
    result
}

fn shares_repeat(
    a: &HashMap<Vertex, BTreeSet<String>>,
    v1: &Vertex,
    b: &HashMap<Vertex, BTreeSet<String>>,
    v2: &Vertex,
) -> bool {
    match (a.get(v1), b.get(v2)) {
        (Some(s1), Some(s2)) => !s1.is_disjoint(s2),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::bg::RepeatTag;

    fn mc(names: &[&str]) -> Multicolor {
        Multicolor::from_names(names)
    }

    fn v(name: &str) -> Vertex {
        Vertex::block(name)
    }

    fn iv(name: &str) -> Vertex {
        Vertex::infinity(name)
    }

    fn tagged(name: &str, repeat: &str, end: RepeatEnd) -> Vertex {
        Vertex::tagged_infinity(name, RepeatTag::new(repeat, end))
    }

    #[test]
    fn test_single_join() {
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), iv("1h"), mc(&["a", "b"]));
        graph.add_edge(v("2t"), iv("2t"), mc(&["a", "b"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["c"]));

        let subnets = irregular_subnets(graph.clone(), &mc(&["a", "b"]), &Multicolor::new());
        assert_eq!(subnets.len(), 1);
        assert_eq!(subnets[0].edge_count(), 3);

        // nothing fits a target nobody carries
        assert!(irregular_subnets(graph, &mc(&["c"]), &Multicolor::new()).is_empty());
    }

    #[test]
    fn test_partial_target_excluded() {
        // both ends miss genome b, so the support edge is not a candidate
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), iv("1h"), mc(&["a"]));
        graph.add_edge(v("2t"), iv("2t"), mc(&["a"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["b"]));

        let subnets = irregular_subnets(graph, &mc(&["a", "b"]), &Multicolor::new());
        assert!(subnets
            .iter()
            .all(|s| s.edges().all(|(_, e)| e.is_irregular())));
        assert!(subnets.is_empty());
    }

    #[test]
    fn test_exclude_and_multiplicity() {
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), iv("1h"), mc(&["a", "c"]));
        graph.add_edge(v("2t"), iv("2t"), mc(&["a"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["b"]));
        graph.add_edge(v("3h"), iv("3h"), mc(&["a", "a"]));
        graph.add_edge(v("4t"), iv("4t"), mc(&["a"]));
        graph.add_edge(v("3h"), v("4t"), mc(&["b"]));

        // c is complete, so 1h is no longer an open end of interest
        let subnets = irregular_subnets(graph.clone(), &mc(&["a"]), &mc(&["c"]));
        // only the lone open ends at 2t and 4t survive, without support
        assert_eq!(subnets.len(), 2);
        assert!(subnets.iter().all(|s| s.edge_count() == 1));

        let subnets = irregular_subnets(graph, &mc(&["a"]), &Multicolor::new());
        assert_eq!(subnets.len(), 2);
        assert_eq!(subnets.iter().map(|s| s.edge_count()).max(), Some(3));
    }

    #[test]
    fn test_filter_idempotent() {
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), iv("1h"), mc(&["a"]));
        graph.add_edge(v("2t"), iv("2t"), mc(&["a", "b"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["b"]));
        graph.add_edge(v("2t"), v("5h"), mc(&["c"]));

        let target = mc(&["a"]);
        let once = irregular_subnets(graph.clone(), &target, &Multicolor::new());
        let twice: Vec<BreakpointGraph> = once
            .iter()
            .flat_map(|s| irregular_subnets(s.clone(), &target, &Multicolor::new()))
            .collect();
        let again = irregular_subnets(graph, &target, &Multicolor::new());

        let edges = |gs: &[BreakpointGraph]| -> Vec<String> {
            gs.iter()
                .flat_map(|g| {
                    g.edges()
                        .map(|(_, e)| format!("{} {} {}", e.vertex1, e.vertex2, e.multicolor))
                        .collect::<Vec<_>>()
                })
                .collect()
        };
        assert_eq!(edges(&once), edges(&twice));
        assert_eq!(edges(&once), edges(&again));
    }

    #[test]
    fn test_repeat_subnets() {
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), tagged("1h", "r", RepeatEnd::Tail), mc(&["a"]));
        graph.add_edge(v("2t"), tagged("2t", "r", RepeatEnd::Head), mc(&["a"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["b"]));
        // a support edge between two tails of the same repeat is useless
        graph.add_edge(v("3h"), tagged("3h", "r", RepeatEnd::Tail), mc(&["a"]));
        graph.add_edge(v("1h"), v("3h"), mc(&["b"]));
        // open end of a complete genome
        graph.add_edge(v("4t"), tagged("4t", "r", RepeatEnd::Head), mc(&["a"]));
        graph.add_edge(v("4t"), iv("4t"), mc(&["c"]));
        graph.add_edge(v("3h"), v("4t"), mc(&["b"]));

        let result = repeat_subnets(graph, &mc(&["a"]), &mc(&["c"]));
        assert!(result.has_tail(&v("1h"), "r"));
        assert!(result.has_head(&v("2t"), "r"));
        assert!(!result.h_support.contains_key(&v("4t")));

        let regular: Vec<(String, String)> = result
            .subnets
            .iter()
            .flat_map(|s| {
                s.edges()
                    .filter(|(_, e)| !e.is_irregular())
                    .map(|(_, e)| (e.vertex1.to_string(), e.vertex2.to_string()))
                    .collect::<Vec<_>>()
            })
            .collect();
        assert_eq!(regular, vec![("1h".to_string(), "2t".to_string())]);

        let joined = result
            .subnets
            .iter()
            .find(|s| s.has_vertex(&v("2t")))
            .unwrap();
        assert_eq!(result.repeats_in(joined).into_iter().collect::<Vec<_>>(), vec!["r"]);
    }

    #[test]
    fn test_repeat_edge_needs_single_target() {
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), tagged("1h", "r", RepeatEnd::Tail), mc(&["a", "a"]));
        graph.add_edge(v("2t"), tagged("2t", "r", RepeatEnd::Head), mc(&["b"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["b"]));

        let result = repeat_subnets(graph, &mc(&["a"]), &Multicolor::new());
        assert!(result.t_support.is_empty());
        assert!(result.h_support.is_empty());
        assert!(result.subnets.is_empty());
    }
}
