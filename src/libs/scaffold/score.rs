//! Assembly scores: how much a join lowers the number of tree-consistent parts needed to
//! explain the colors around its two fragment ends.

use super::AssemblyPoint;
use crate::libs::bg::{BreakpointGraph, Vertex};
use crate::libs::error::{Result, ScaffoldError};
use crate::libs::multicolor::Multicolor;
use log::trace;
use std::collections::HashMap;

/// Everything the scores of one pass share: the unfiltered graph, the guidance and the
/// target multicolor.
#[derive(Debug, Clone)]
pub struct Scoring<'a> {
    graph: &'a BreakpointGraph,
    guidance: &'a [Multicolor],
    target: &'a Multicolor,
    full: Multicolor,
    target_split: Vec<Multicolor>,
}

impl<'a> Scoring<'a> {
    pub fn new(graph: &'a BreakpointGraph, guidance: &'a [Multicolor], target: &'a Multicolor) -> Self {
        let full = guidance
            .iter()
            .max_by_key(|m| m.len())
            .map(|m| m.collapse())
            .unwrap_or_default();
        let target_split = target.split_colors(guidance, false);
        Self {
            graph,
            guidance,
            target,
            full,
            target_split,
        }
    }

    pub fn target(&self) -> &Multicolor {
        self.target
    }

    /// Tree-consistent parts of the target.
    pub fn target_split(&self) -> &[Multicolor] {
        &self.target_split
    }

    /// One less than the number of parts of the target.
    pub fn offset(&self) -> i64 {
        self.target_split.len() as i64 - 1
    }

    /// Lowest score a matching join must reach.
    pub fn threshold(&self) -> i64 {
        if self.offset() == 0 {
            1
        } else {
            2
        }
    }

    fn surrounding(&self, v: &Vertex) -> Multicolor {
        self.graph.surrounding_multicolor(v).collapse()
    }

    /// Score the join of `v1` and `v2` given their irregular multicolors and the support
    /// multicolor between them. Inputs are taken as given, callers collapse them.
    fn before_after<F>(
        &self,
        im1: &Multicolor,
        im2: &Multicolor,
        support: &Multicolor,
        s1: &Multicolor,
        s2: &Multicolor,
        mut split: F,
    ) -> Result<(usize, usize)>
    where
        F: FnMut(&Multicolor) -> usize,
    {
        let c1 = self.full.try_sub(s1)?;
        let c2 = self.full.try_sub(s2)?;
        let c = c1.intersect(&c2);
        let ca = c1.try_sub(&c)?;
        let cb = c2.try_sub(&c)?;

        let s = if self.target.is_subset(support) {
            support.try_sub(self.target)?
        } else {
            support.clone()
        };

        let before = split(&(im1 + &ca)) + split(&(im2 + &cb)) + split(&(&s + &c));
        let after = split(&(&im1.try_sub(self.target)? + &ca))
            + split(&(&im2.try_sub(self.target)? + &cb))
            + split(&(&(&s + self.target) + &c));
        trace!(
            "c1={} c2={} c={} s={} before={} after={}",
            c1,
            c2,
            c,
            s,
            before,
            after
        );
        Ok((before, after))
    }

    /// Score one support edge of a no-repeat subnet.
    pub fn score_pair(&self, subnet: &BreakpointGraph, v1: &Vertex, v2: &Vertex) -> Result<AssemblyPoint> {
        let im1 = irregular_multicolor(subnet, v1)?;
        let im2 = irregular_multicolor(subnet, v2)?;
        let support = subnet
            .get_edge_by_two_vertices(v1, v2)
            .map(|e| e.multicolor.collapse())
            .unwrap_or_default();

        let s1 = self.surrounding(v1);
        let s2 = self.surrounding(v2);
        let guidance = self.guidance;
        let (before, after) =
            self.before_after(&im1, &im2, &support, &s1, &s2, |m| m.split_size(guidance))?;

        let after = after as i64 + self.offset();
        Ok(AssemblyPoint {
            v1: v1.clone(),
            v2: v2.clone(),
            score: before as i64 - after,
            before,
            after: after.max(0) as usize,
            repeat: None,
            s_support: self
                .target
                .intersect(&support)
                .colors()
                .iter()
                .map(|g| g.name().to_string())
                .collect(),
        })
    }
}

fn irregular_multicolor(graph: &BreakpointGraph, v: &Vertex) -> Result<Multicolor> {
    graph
        .irregular_edge_by_vertex(v)
        .map(|(_, e)| e.multicolor.collapse())
        .ok_or_else(|| ScaffoldError::MissingIrregularEdge(v.to_string()))
}

/// Scores of every support edge in a no-repeat subnet.
pub fn support_edge_scores(scoring: &Scoring, subnet: &BreakpointGraph) -> Result<Vec<AssemblyPoint>> {
    subnet
        .edges()
        .filter(|(_, e)| !e.is_irregular())
        .map(|(_, e)| scoring.score_pair(subnet, &e.vertex1, &e.vertex2))
        .collect()
}

/// Repeat-aware scoring with memoized split sizes and vertex neighbourhoods.
///
/// Irregular multicolors are the union of every open end at a vertex in the unfiltered
/// graph, since one extremity may be open towards several repeat copies.
#[derive(Debug)]
pub struct RepeatScorer<'s, 'a> {
    scoring: &'s Scoring<'a>,
    splits: HashMap<Multicolor, usize>,
    surroundings: HashMap<Vertex, Multicolor>,
    irregulars: HashMap<Vertex, Multicolor>,
}

impl<'s, 'a> RepeatScorer<'s, 'a> {
    pub fn new(scoring: &'s Scoring<'a>) -> Self {
        Self {
            scoring,
            splits: HashMap::new(),
            surroundings: HashMap::new(),
            irregulars: HashMap::new(),
        }
    }

    pub fn scoring(&self) -> &Scoring<'a> {
        self.scoring
    }

    fn surrounding(&mut self, v: &Vertex) -> Multicolor {
        let graph = self.scoring.graph;
        self.surroundings
            .entry(v.clone())
            .or_insert_with(|| graph.surrounding_multicolor(v).collapse())
            .clone()
    }

    fn irregular(&mut self, v: &Vertex) -> Multicolor {
        let graph = self.scoring.graph;
        self.irregulars
            .entry(v.clone())
            .or_insert_with(|| graph.full_irregular_multicolor(v).collapse())
            .clone()
    }

    /// Score joining `v1` to `v2` through a copy of `repeat`.
    pub fn score(&mut self, v1: &Vertex, v2: &Vertex, repeat: &str) -> Result<AssemblyPoint> {
        let s1 = self.surrounding(v1);
        let s2 = self.surrounding(v2);
        let im1 = self.irregular(v1);
        let im2 = self.irregular(v2);
        let scoring = self.scoring;
        let support = scoring
            .graph
            .get_edge_by_two_vertices(v1, v2)
            .map(|e| e.multicolor.collapse())
            .unwrap_or_default();

        let guidance = scoring.guidance;
        let splits = &mut self.splits;
        let (before, after) = scoring.before_after(&im1, &im2, &support, &s1, &s2, |m| {
            *splits
                .entry(m.clone())
                .or_insert_with(|| m.split_size(guidance))
        })?;

        let after = after as i64 + scoring.offset();
        Ok(AssemblyPoint {
            v1: v1.clone(),
            v2: v2.clone(),
            score: before as i64 - after,
            before,
            after: after.max(0) as usize,
            repeat: Some(repeat.to_string()),
            s_support: scoring
                .target
                .intersect(&support)
                .colors()
                .iter()
                .map(|g| g.name().to_string())
                .collect(),
        })
    }

    /// Distinct multicolors whose split size has been computed.
    pub fn cached_splits(&self) -> usize {
        self.splits.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::bg::{RepeatEnd, RepeatTag};

    fn mc(names: &[&str]) -> Multicolor {
        Multicolor::from_names(names)
    }

    fn v(name: &str) -> Vertex {
        Vertex::block(name)
    }

    #[test]
    fn test_two_genome_join() {
        let guidance = vec![mc(&["a", "b"]), mc(&["a"]), mc(&["b"])];
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), Vertex::infinity("1h"), mc(&["a", "b"]));
        graph.add_edge(v("2t"), Vertex::infinity("2t"), mc(&["a", "b"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["a", "b"]));

        let target = mc(&["a", "b"]);
        let scoring = Scoring::new(&graph, &guidance, &target);
        assert_eq!(scoring.offset(), 0);
        assert_eq!(scoring.threshold(), 1);

        let points = support_edge_scores(&scoring, &graph).unwrap();
        assert_eq!(points.len(), 1);
        let p = &points[0];
        // before: {a,b} + {a,b} + {} ; after: {} + {} + {a,b}
        assert_eq!((p.before, p.after), (2, 1));
        assert_eq!(p.score, 1);
        assert!(p.score >= scoring.threshold());
        assert_eq!(p.s_support, vec!["a", "b"]);
    }

    #[test]
    fn test_offset_and_threshold() {
        let guidance = vec![mc(&["a", "b", "c"]), mc(&["a"]), mc(&["b"]), mc(&["c"])];
        let graph = BreakpointGraph::new();
        let target = mc(&["a", "b"]);
        let scoring = Scoring::new(&graph, &guidance, &target);
        assert_eq!(scoring.target_split(), &[mc(&["a"]), mc(&["b"])]);
        assert_eq!(scoring.offset(), 1);
        assert_eq!(scoring.threshold(), 2);
    }

    #[test]
    fn test_score_symmetry() {
        let guidance = vec![
            mc(&["a", "b", "c"]),
            mc(&["a", "b"]),
            mc(&["a"]),
            mc(&["b"]),
            mc(&["c"]),
        ];
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), Vertex::infinity("1h"), mc(&["a", "c"]));
        graph.add_edge(v("2t"), Vertex::infinity("2t"), mc(&["a"]));
        graph.add_edge(v("1h"), v("2t"), mc(&["b"]));
        graph.add_edge(v("2t"), v("7h"), mc(&["c"]));

        let target = mc(&["a"]);
        let scoring = Scoring::new(&graph, &guidance, &target);
        let forward = scoring.score_pair(&graph, &v("1h"), &v("2t")).unwrap();
        let backward = scoring.score_pair(&graph, &v("2t"), &v("1h")).unwrap();
        assert_eq!(forward.before, backward.before);
        assert_eq!(forward.after, backward.after);
        assert_eq!(forward.score, backward.score);
    }

    #[test]
    fn test_missing_irregular_edge() {
        let guidance = vec![mc(&["a"])];
        let mut graph = BreakpointGraph::new();
        graph.add_edge(v("1h"), v("2t"), mc(&["a"]));
        let target = mc(&["a"]);
        let scoring = Scoring::new(&graph, &guidance, &target);
        assert!(matches!(
            support_edge_scores(&scoring, &graph),
            Err(ScaffoldError::MissingIrregularEdge(_))
        ));
    }

    #[test]
    fn test_repeat_scorer_memo() {
        let guidance = vec![mc(&["a", "b"]), mc(&["a"]), mc(&["b"])];
        let mut graph = BreakpointGraph::new();
        graph.add_edge(
            v("1h"),
            Vertex::tagged_infinity("1h", RepeatTag::new("r", RepeatEnd::Tail)),
            mc(&["a", "b"]),
        );
        graph.add_edge(
            v("2t"),
            Vertex::tagged_infinity("2t", RepeatTag::new("r", RepeatEnd::Head)),
            mc(&["a", "b"]),
        );

        let target = mc(&["a", "b"]);
        let scoring = Scoring::new(&graph, &guidance, &target);
        let mut scorer = RepeatScorer::new(&scoring);

        let p = scorer.score(&v("1h"), &v("2t"), "r").unwrap();
        // before: {a,b} + {a,b} + {} ; after: {} + {} + {a,b}
        assert_eq!((p.before, p.after, p.score), (2, 1, 1));
        assert_eq!(p.repeat.as_deref(), Some("r"));
        assert!(p.s_support.is_empty());

        let cached = scorer.cached_splits();
        let again = scorer.score(&v("2t"), &v("1h"), "r").unwrap();
        assert_eq!(again.score, p.score);
        assert_eq!(scorer.cached_splits(), cached);
    }
}
