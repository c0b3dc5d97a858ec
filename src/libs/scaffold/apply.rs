use super::AssemblyPoint;
use crate::libs::bg::{BreakpointGraph, KBreak, RepeatEnd, RepeatTag, Vertex};
use crate::libs::error::{Result, ScaffoldError};
use crate::libs::multicolor::Multicolor;
use log::debug;

/// Commit joins for `target`: the open ends at `v1` and `v2` become the adjacency
/// `v1 -- v2`.
///
/// A plain join consumes the irregular edge at each vertex that carries the target. A
/// repeat join consumes the tail end of the repeat copy at `v1` and its head end at `v2`.
pub fn assemble_points(
    graph: &mut BreakpointGraph,
    points: &[AssemblyPoint],
    target: &Multicolor,
) -> Result<()> {
    for point in points {
        let (v1, v2) = (&point.v1, &point.v2);
        let (iv1, iv2) = match &point.repeat {
            Some(name) => (
                Vertex::tagged_infinity(v1.anchor(), RepeatTag::new(name.as_str(), RepeatEnd::Tail)),
                Vertex::tagged_infinity(v2.anchor(), RepeatTag::new(name.as_str(), RepeatEnd::Head)),
            ),
            None => (
                open_end(graph, v1, target)?,
                open_end(graph, v2, target)?,
            ),
        };
        debug!(
            "({}, {}) x ({}, {}) score={}",
            v1, iv1, v2, iv2, point.score
        );

        let kbreak = KBreak::new(
            vec![(v1.clone(), iv1.clone()), (v2.clone(), iv2.clone())],
            vec![(v1.clone(), v2.clone()), (iv1, iv2)],
            target.clone(),
        )?;
        graph.apply_kbreak(&kbreak)?;
    }
    Ok(())
}

// The infinity vertex of the open end at `v` that carries `target`.
fn open_end(graph: &BreakpointGraph, v: &Vertex, target: &Multicolor) -> Result<Vertex> {
    graph
        .irregular_edges_by_vertex(v)
        .find(|(_, e)| target.is_subset(&e.multicolor))
        .and_then(|(_, e)| e.irregular_vertex().cloned())
        .ok_or_else(|| ScaffoldError::MissingIrregularEdge(v.to_string()))
}
