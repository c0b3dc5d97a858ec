//! Multisets of genome labels ("multicolors") and their tree-consistent splitting.

use crate::libs::error::{Result, ScaffoldError};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Add;

/// A genome label. Compared and ordered by name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Genome(String);

impl Genome {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Genome {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// An immutable multiset of genomes.
///
/// Multiplicities are always positive; a genome with multiplicity zero is not stored.
/// Equality, ordering and hashing follow the canonical (sorted) element list, so a
/// `Multicolor` is directly usable as a deduplication key.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Multicolor {
    counts: BTreeMap<Genome, usize>,
}

impl Multicolor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from individual genomes; repeated genomes raise the multiplicity.
    pub fn from_genomes<I, G>(genomes: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: Into<Genome>,
    {
        let mut counts = BTreeMap::new();
        for genome in genomes {
            *counts.entry(genome.into()).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        Self::from_genomes(names.iter().map(|n| Genome::new(n.as_ref())))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of elements, multiplicity included.
    pub fn len(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn multiplicity(&self, genome: &Genome) -> usize {
        self.counts.get(genome).copied().unwrap_or(0)
    }

    pub fn contains(&self, genome: &Genome) -> bool {
        self.counts.contains_key(genome)
    }

    /// Distinct genomes.
    pub fn colors(&self) -> BTreeSet<Genome> {
        self.counts.keys().cloned().collect()
    }

    pub fn iter_colors(&self) -> impl Iterator<Item = &Genome> {
        self.counts.keys()
    }

    /// Same genomes, each with multiplicity one.
    pub fn collapse(&self) -> Self {
        Self {
            counts: self.counts.keys().map(|g| (g.clone(), 1)).collect(),
        }
    }

    /// Sorted element list with multiplicity. Used as the hash key and for output.
    pub fn canonical(&self) -> Vec<&Genome> {
        self.counts
            .iter()
            .flat_map(|(g, &n)| std::iter::repeat(g).take(n))
            .collect()
    }

    /// `self <= other`: every genome of `self` is present in `other` at least as often.
    pub fn is_subset(&self, other: &Multicolor) -> bool {
        self.counts
            .iter()
            .all(|(g, &n)| other.multiplicity(g) >= n)
    }

    pub fn is_disjoint(&self, other: &Multicolor) -> bool {
        self.counts.keys().all(|g| !other.contains(g))
    }

    pub fn intersect(&self, other: &Multicolor) -> Self {
        let counts = self
            .counts
            .iter()
            .filter_map(|(g, &n)| {
                let m = n.min(other.multiplicity(g));
                (m > 0).then(|| (g.clone(), m))
            })
            .collect();
        Self { counts }
    }

    /// Multiset difference. `other` must be a subset of `self`.
    pub fn try_sub(&self, other: &Multicolor) -> Result<Self> {
        if !other.is_subset(self) {
            return Err(ScaffoldError::NotSubset {
                minuend: self.to_string(),
                subtrahend: other.to_string(),
            });
        }
        let mut counts = self.counts.clone();
        for (g, &n) in &other.counts {
            if let Some(c) = counts.get_mut(g) {
                *c -= n;
                if *c == 0 {
                    counts.remove(g);
                }
            }
        }
        Ok(Self { counts })
    }

    /// Decompose into the smallest number of guidance-aligned parts.
    ///
    /// Guidance entries are tried largest first, and each is taken as many times as it
    /// still fits into the remainder. With `account_for_multiplicity` off, guidance entries
    /// are collapsed first, so each clade counts its genomes once while the input keeps its
    /// multiplicities. Genomes that no guidance entry covers become singleton parts.
    pub fn split_colors(
        &self,
        guidance: &[Multicolor],
        account_for_multiplicity: bool,
    ) -> Vec<Multicolor> {
        let guidance: Vec<Multicolor> = guidance
            .iter()
            .map(|g| {
                if account_for_multiplicity {
                    g.clone()
                } else {
                    g.collapse()
                }
            })
            .filter(|g| !g.is_empty())
            .unique()
            .sorted_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)))
            .collect();

        let mut result = Vec::new();
        let mut rest = self.clone();
        for g in &guidance {
            while g.is_subset(&rest) {
                // Containment was just checked.
                rest = match rest.try_sub(g) {
                    Ok(r) => r,
                    Err(_) => break,
                };
                result.push(g.clone());
            }
        }
        for genome in rest.canonical() {
            result.push(Multicolor::from_genomes([genome.clone()]));
        }
        result
    }

    /// Number of parts in the tree-consistent split, guidance multiplicity ignored.
    pub fn split_size(&self, guidance: &[Multicolor]) -> usize {
        self.split_colors(guidance, false).len()
    }

    pub fn names(&self) -> Vec<String> {
        self.canonical().iter().map(|g| g.name().to_string()).collect()
    }
}

impl Add for &Multicolor {
    type Output = Multicolor;

    fn add(self, other: &Multicolor) -> Multicolor {
        let mut counts = self.counts.clone();
        for (g, &n) in &other.counts {
            *counts.entry(g.clone()).or_insert(0) += n;
        }
        Multicolor { counts }
    }
}

impl Add for Multicolor {
    type Output = Multicolor;

    fn add(self, other: Multicolor) -> Multicolor {
        &self + &other
    }
}

impl fmt::Display for Multicolor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.canonical().iter().join(","))
    }
}

impl Serialize for Multicolor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.canonical())
    }
}

impl<'de> Deserialize<'de> for Multicolor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let genomes = Vec::<Genome>::deserialize(deserializer)?;
        Ok(Multicolor::from_genomes(genomes))
    }
}
