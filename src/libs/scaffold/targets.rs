use crate::libs::multicolor::Multicolor;
use itertools::Itertools;
use std::collections::BTreeSet;

/// Expand the requested genomes into the ordered list of target multicolors.
///
/// The request is split into tree-consistent parts, every guidance clade inside a part is
/// added, and then every union of two or more pairwise-disjoint collected multicolors.
/// Larger targets come first; equal sizes are ordered by their canonical element list.
pub fn expand_targets(requested: &Multicolor, guidance: &[Multicolor]) -> Vec<Multicolor> {
    if requested.is_empty() {
        return Vec::new();
    }

    let parts = requested.split_colors(guidance, false);
    let mut collected: Vec<Multicolor> = parts.iter().cloned().unique().collect();
    for part in &parts {
        for clade in guidance {
            if !clade.is_empty() && clade.is_subset(part) && !collected.contains(clade) {
                collected.push(clade.clone());
            }
        }
    }

    let mut all: BTreeSet<Multicolor> = collected.iter().cloned().collect();
    extend_disjoint(&collected, 0, &Multicolor::new(), 0, &mut all);

    all.into_iter()
        .sorted_by(|a, b| {
            b.len()
                .cmp(&a.len())
                .then_with(|| a.canonical().cmp(&b.canonical()))
        })
        .collect()
}

// Depth-first enumeration of pairwise-disjoint combinations. A candidate is disjoint
// from every chosen member iff it is disjoint from their union.
fn extend_disjoint(
    pool: &[Multicolor],
    start: usize,
    acc: &Multicolor,
    depth: usize,
    out: &mut BTreeSet<Multicolor>,
) {
    for i in start..pool.len() {
        if !pool[i].is_disjoint(acc) {
            continue;
        }
        let next = acc + &pool[i];
        if depth + 1 >= 2 {
            out.insert(next.clone());
        }
        extend_disjoint(pool, i + 1, &next, depth + 1, out);
    }
}
