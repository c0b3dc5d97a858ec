use super::apply::assemble_points;
use super::score::{support_edge_scores, RepeatScorer, Scoring};
use super::select::{select_by_matching, select_greedy_per_repeat};
use super::subnet::{irregular_subnets, repeat_subnets, RepeatSubnets};
use super::targets::expand_targets;
use super::AssemblyPoint;
use crate::libs::bg::BreakpointGraph;
use crate::libs::config::ScaffoldConfig;
use crate::libs::error::{Result, ScaffoldError};
use crate::libs::multicolor::Multicolor;
use crate::libs::phylo::{ConsistencyOracle, Tree};
use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

/// An applied join and the pass it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyRecord {
    #[serde(flatten)]
    pub point: AssemblyPoint,
    /// Genomes joined by this point.
    pub target: Multicolor,
    /// Tree-consistent parts of the target.
    pub target_split: Vec<Multicolor>,
}

/// Owns the breakpoint graph for a whole run and mutates it one pass at a time.
#[derive(Debug, Clone)]
pub struct Scaffolder {
    graph: BreakpointGraph,
    oracle: ConsistencyOracle,
    exclude: Multicolor,
    repeats: bool,
}

impl Scaffolder {
    /// Every genome on the graph and in `exclude` must be a leaf of `tree`.
    pub fn new(
        graph: BreakpointGraph,
        tree: &Tree,
        exclude: Multicolor,
        config: &ScaffoldConfig,
    ) -> Result<Self> {
        let oracle = ConsistencyOracle::new(tree, config.rooted)?;
        for (_, edge) in graph.edges() {
            check_genomes(&oracle, &edge.multicolor)?;
        }
        check_genomes(&oracle, &exclude)?;

        Ok(Self {
            graph,
            oracle,
            exclude: exclude.collapse(),
            repeats: config.repeats,
        })
    }

    pub fn graph(&self) -> &BreakpointGraph {
        &self.graph
    }

    pub fn into_graph(self) -> BreakpointGraph {
        self.graph
    }

    pub fn oracle(&self) -> &ConsistencyOracle {
        &self.oracle
    }

    /// Target multicolors for the requested genomes, in processing order.
    pub fn targets(&self, requested: &Multicolor) -> Result<Vec<Multicolor>> {
        check_genomes(&self.oracle, requested)?;
        Ok(expand_targets(
            &requested.collapse(),
            self.oracle.consistent_multicolors(),
        ))
    }

    /// Find the joins for `target` on the current graph without changing it.
    pub fn identify(&self, target: &Multicolor) -> Result<Vec<AssemblyPoint>> {
        let scoring = Scoring::new(&self.graph, self.oracle.consistent_multicolors(), target);
        let components = self.graph.connected_components_subgraphs();

        let per_subnet: Vec<Vec<AssemblyPoint>> = if self.repeats {
            let filtered: Vec<RepeatSubnets> = components
                .into_par_iter()
                .map(|cc| repeat_subnets(cc, target, &self.exclude))
                .collect();
            let jobs: Vec<(&RepeatSubnets, &BreakpointGraph)> = filtered
                .iter()
                .flat_map(|f| f.subnets.iter().map(move |s| (f, s)))
                .collect();
            debug!("{} repeat subnets", jobs.len());
            jobs.into_par_iter()
                .map(|(support, subnet)| repeat_points(&scoring, support, subnet))
                .collect::<Result<_>>()?
        } else {
            let subnets: Vec<BreakpointGraph> = components
                .into_par_iter()
                .flat_map_iter(|cc| irregular_subnets(cc, target, &self.exclude))
                .collect();
            debug!("{} subnets", subnets.len());
            subnets
                .par_iter()
                .map(|subnet| {
                    let candidates = support_edge_scores(&scoring, subnet)?;
                    Ok(select_by_matching(candidates, scoring.threshold()))
                })
                .collect::<Result<_>>()?
        };

        Ok(per_subnet.into_iter().flatten().collect())
    }

    /// Run every pass for the requested genomes and return the applied joins.
    pub fn run(&mut self, requested: &Multicolor) -> Result<Vec<AssemblyRecord>> {
        let targets = self.targets(requested)?;
        info!(
            "{} requested genomes expand to {} target multicolors",
            requested.collapse().len(),
            targets.len()
        );

        let mut records = Vec::new();
        for target in &targets {
            let points = self.identify(target)?;
            info!("target {}: {} assembly points", target, points.len());

            assemble_points(&mut self.graph, &points, target)?;

            let target_split = target.split_colors(self.oracle.consistent_multicolors(), false);
            records.extend(points.into_iter().map(|point| AssemblyRecord {
                point,
                target: target.clone(),
                target_split: target_split.clone(),
            }));
        }
        info!(
            "{} assembly points applied, {} open ends left",
            records.len(),
            self.graph.irregular_edge_count()
        );
        Ok(records)
    }
}

fn check_genomes(oracle: &ConsistencyOracle, multicolor: &Multicolor) -> Result<()> {
    match multicolor.iter_colors().find(|g| !oracle.has_genome(g)) {
        Some(g) => Err(ScaffoldError::UnknownGenome(g.to_string())),
        None => Ok(()),
    }
}

// Candidates of one repeat-aware subnet, scored per repeat and picked greedily.
fn repeat_points(
    scoring: &Scoring,
    support: &RepeatSubnets,
    subnet: &BreakpointGraph,
) -> Result<Vec<AssemblyPoint>> {
    let mut scorer = RepeatScorer::new(scoring);
    let mut candidates = Vec::new();
    for repeat in support.repeats_in(subnet) {
        for (_, edge) in subnet.edges().filter(|(_, e)| !e.is_irregular()) {
            let (a, b) = if edge.vertex1 <= edge.vertex2 {
                (&edge.vertex1, &edge.vertex2)
            } else {
                (&edge.vertex2, &edge.vertex1)
            };
            // a join always runs from the tail end to the head end of the copy
            let mut pairs = Vec::new();
            if support.has_head(a, &repeat) && support.has_tail(b, &repeat) {
                pairs.push((b, a));
            }
            if support.has_tail(a, &repeat) && support.has_head(b, &repeat) {
                pairs.push((a, b));
            }
            for (t, h) in pairs {
                let point = scorer.score(t, h, &repeat)?;
                // repeat joins need a score above one
                if point.score > 1 {
                    candidates.push(point);
                }
            }
        }
    }
    Ok(select_greedy_per_repeat(candidates))
}
