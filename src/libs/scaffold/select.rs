use super::AssemblyPoint;
use crate::libs::bg::{RepeatEnd, Vertex};
use crate::libs::matching::max_weight_matching;
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Pick a vertex-disjoint set of joins with the largest total score.
///
/// Candidates below `threshold` never enter the matching.
pub fn select_by_matching(candidates: Vec<AssemblyPoint>, threshold: i64) -> Vec<AssemblyPoint> {
    let mut index: IndexMap<Vertex, usize> = IndexMap::new();
    let mut by_pair: HashMap<(usize, usize), AssemblyPoint> = HashMap::new();
    let mut edges: Vec<(usize, usize, i64)> = Vec::new();

    for point in candidates {
        if point.score < threshold {
            continue;
        }
        let i = vertex_index(&mut index, &point.v1);
        let j = vertex_index(&mut index, &point.v2);
        edges.push((i, j, point.score));
        by_pair.insert((j, i), point.reversed());
        by_pair.insert((i, j), point);
    }
    if edges.is_empty() {
        return Vec::new();
    }

    let mate = max_weight_matching(index.len(), &edges);

    // every matched pair shows up twice, once from each end
    let mut visited: HashSet<usize> = HashSet::new();
    let mut selected = Vec::new();
    for (i, m) in mate.iter().enumerate() {
        let Some(j) = *m else {
            continue;
        };
        if visited.contains(&i) || visited.contains(&j) {
            continue;
        }
        visited.insert(i);
        visited.insert(j);
        if let Some(point) = by_pair.remove(&(i, j)) {
            selected.push(point);
        }
    }
    debug!("{} of {} candidates matched", selected.len(), edges.len());
    selected
}

fn vertex_index(index: &mut IndexMap<Vertex, usize>, v: &Vertex) -> usize {
    let next = index.len();
    *index.entry(v.clone()).or_insert(next)
}

// (weight, smaller vertex, its end, larger vertex, its end); v1 is the tail end of the
// repeat copy and v2 the head end
fn repeat_sort_key(p: &AssemblyPoint) -> (i64, &Vertex, RepeatEnd, &Vertex, RepeatEnd) {
    let tail = (&p.v1, RepeatEnd::Tail);
    let head = (&p.v2, RepeatEnd::Head);
    let (a, b) = if head.0 < tail.0 {
        (head, tail)
    } else {
        (tail, head)
    };
    (p.score, a.0, a.1, b.0, b.1)
}

/// Greedy selection, one repeat at a time. Each candidate runs from the tail end of a
/// repeat copy (`v1`) to its head end (`v2`).
///
/// Within a repeat, candidates are taken by descending score, ties broken by descending
/// vertex and end order. A vertex joined once is not joined again, whichever repeat
/// comes next.
pub fn select_greedy_per_repeat(candidates: Vec<AssemblyPoint>) -> Vec<AssemblyPoint> {
    let by_repeat = candidates
        .into_iter()
        .filter(|p| p.repeat.is_some())
        .into_group_map_by(|p| p.repeat.clone().unwrap_or_default());

    let mut visited: HashSet<Vertex> = HashSet::new();
    let mut selected = Vec::new();
    for repeat in by_repeat.keys().sorted() {
        let group = &by_repeat[repeat];
        let ordered = group
            .iter()
            .sorted_by(|x, y| repeat_sort_key(y).cmp(&repeat_sort_key(x)));
        for p in ordered {
            let (t, h) = (&p.v1, &p.v2);
            if visited.contains(t) || visited.contains(h) {
                continue;
            }
            visited.insert(t.clone());
            visited.insert(h.clone());
            selected.push(p.clone());
        }
    }
    selected
}
