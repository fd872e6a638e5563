//! Finite sets of permutations

use std::{
    collections::{hash_set, BTreeMap, HashSet},
    fmt::{self, Display},
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::permutation::{PatternMatcher, Permutation};

/// A finite set of permutations, possibly of different lengths
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermSet {
    permutations: HashSet<Permutation>,
}

impl PermSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the set of all permutations of length `n`.
    pub fn all(n: usize) -> Self {
        Permutation::all(n).collect()
    }

    /// Add a permutation, returning whether it was not present before.
    pub fn insert(&mut self, permutation: Permutation) -> bool {
        self.permutations.insert(permutation)
    }

    /// Return whether `permutation` is an element of the set.
    pub fn contains(&self, permutation: &Permutation) -> bool {
        self.permutations.contains(permutation)
    }

    /// Return the number of elements.
    pub fn len(&self) -> usize {
        self.permutations.len()
    }

    /// Return whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.permutations.is_empty()
    }

    /// Iterate over the elements in no particular order.
    pub fn iter(&self) -> hash_set::Iter<'_, Permutation> {
        self.permutations.iter()
    }

    /// Return the elements ordered by length and then lexicographically.
    pub fn sorted(&self) -> Vec<&Permutation> {
        self.permutations
            .iter()
            .sorted_by(|left, right| left.len().cmp(&right.len()).then(left.cmp(right)))
            .collect()
    }

    /// Split the set by the length of its elements.
    pub fn by_length(&self) -> BTreeMap<usize, PermSet> {
        let mut layers: BTreeMap<usize, PermSet> = BTreeMap::new();
        for permutation in &self.permutations {
            layers
                .entry(permutation.len())
                .or_default()
                .insert(permutation.clone());
        }

        layers
    }

    /// Return the elements contained in `self` or `other`.
    pub fn union(&self, other: &PermSet) -> PermSet {
        self.permutations
            .union(&other.permutations)
            .cloned()
            .collect()
    }

    /// Return the elements contained in both `self` and `other`.
    pub fn intersection(&self, other: &PermSet) -> PermSet {
        self.permutations
            .intersection(&other.permutations)
            .cloned()
            .collect()
    }

    /// Return the elements of `self` that are not in `other`.
    pub fn difference(&self, other: &PermSet) -> PermSet {
        self.permutations
            .difference(&other.permutations)
            .cloned()
            .collect()
    }

    /// Return the elements that do not contain any other element.
    pub fn minimal_elements(&self) -> PermSet {
        let mut minimal: Vec<PatternMatcher> = Vec::new();

        // elements of equal length cannot contain each other,
        // so checking against shorter minimal elements suffices
        for permutation in self.sorted() {
            if !minimal.iter().any(|matcher| {
                matcher.pattern().len() < permutation.len() && matcher.occurs_in(permutation)
            }) {
                minimal.push(PatternMatcher::new(permutation));
            }
        }

        minimal
            .into_iter()
            .map(|matcher| matcher.pattern().clone())
            .collect()
    }

    /// Return all permutations obtained by deleting one entry of an element.
    pub fn covers(&self) -> PermSet {
        self.permutations
            .iter()
            .flat_map(|permutation| permutation.covers())
            .collect()
    }

    /// Return all permutations obtained by inserting one entry into an element.
    pub fn covered_by(&self) -> PermSet {
        self.permutations
            .iter()
            .flat_map(|permutation| permutation.covered_by())
            .collect()
    }

    /// Return all permutations contained in some element.
    pub fn downset(&self) -> PermSet {
        let mut result = PermSet::new();
        // patterns of elements already in the result were added with them
        for permutation in self.sorted().into_iter().rev() {
            if result.contains(permutation) {
                continue;
            }
            result.extend(permutation.downset().into_iter().flatten());
        }

        result
    }

    /// Return whether the set is closed under taking patterns.
    ///
    /// It suffices to check that every cover of every element is present.
    pub fn is_downset(&self) -> bool {
        self.permutations.iter().all(|permutation| {
            permutation
                .covers()
                .iter()
                .all(|cover| self.permutations.contains(cover))
        })
    }

    /// Return the elements that avoid every permutation in `basis`.
    pub fn avoiders(&self, basis: &PermSet) -> PermSet {
        let matchers: Vec<PatternMatcher> = basis.iter().map(PatternMatcher::new).collect();

        self.permutations
            .iter()
            .filter(|permutation| !matchers.iter().any(|matcher| matcher.occurs_in(permutation)))
            .cloned()
            .collect()
    }

    /// Treat `self` as the elements of a class of length at most `max_length`
    /// and return the basis elements of that class up to the same length.
    ///
    /// These are the permutations outside the set all of whose covers are in the set.
    pub fn guess_basis(&self, max_length: usize) -> PermSet {
        let mut basis = PermSet::new();

        let empty = Permutation::default();
        if !self.contains(&empty) {
            basis.insert(empty);
            return basis;
        }

        let layers = self.by_length();
        for length in 1..=max_length {
            let Some(previous) = layers.get(&(length - 1)) else {
                log::debug!("no elements of length {}, stopping", length - 1);
                break;
            };

            let candidates: HashSet<Permutation> = previous
                .iter()
                .flat_map(|permutation| permutation.covered_by())
                .filter(|candidate| !self.contains(candidate))
                .collect();
            log::debug!(
                "{} candidates for basis elements of length {length}",
                candidates.len()
            );

            basis.extend(candidates.into_iter().filter(|candidate| {
                candidate
                    .covers()
                    .iter()
                    .all(|cover| self.contains(cover))
            }));
        }

        basis
    }

    /// Return the sum of `statistic` over all elements.
    pub fn total_statistic<F>(&self, statistic: F) -> usize
    where
        F: Fn(&Permutation) -> usize,
    {
        self.permutations.iter().map(statistic).sum()
    }

    /// Return how many elements take each value of `statistic`.
    pub fn distribution<K, F>(&self, statistic: F) -> BTreeMap<K, usize>
    where
        K: Ord,
        F: Fn(&Permutation) -> K,
    {
        let mut counts = BTreeMap::new();
        for permutation in &self.permutations {
            *counts.entry(statistic(permutation)).or_insert(0) += 1;
        }

        counts
    }
}

impl FromIterator<Permutation> for PermSet {
    fn from_iter<T: IntoIterator<Item = Permutation>>(iter: T) -> Self {
        Self {
            permutations: iter.into_iter().collect(),
        }
    }
}

impl Extend<Permutation> for PermSet {
    fn extend<T: IntoIterator<Item = Permutation>>(&mut self, iter: T) {
        self.permutations.extend(iter)
    }
}

impl From<HashSet<Permutation>> for PermSet {
    fn from(permutations: HashSet<Permutation>) -> Self {
        Self { permutations }
    }
}

impl IntoIterator for PermSet {
    type Item = Permutation;
    type IntoIter = hash_set::IntoIter<Permutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.permutations.into_iter()
    }
}

impl<'a> IntoIterator for &'a PermSet {
    type Item = &'a Permutation;
    type IntoIter = hash_set::Iter<'a, Permutation>;

    fn into_iter(self) -> Self::IntoIter {
        self.permutations.iter()
    }
}

impl Display for PermSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.sorted().iter().join(", "))
    }
}
