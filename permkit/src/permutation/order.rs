//! Neighbourhoods of a permutation in the pattern order

use std::collections::{HashMap, HashSet};

use super::Permutation;

impl Permutation {
    /// Return the permutations obtained by deleting a single entry.
    pub fn covers(&self) -> HashSet<Permutation> {
        (0..self.len())
            .map(|index| self.without_index(index))
            .collect()
    }

    /// Return the permutations obtained by inserting a single entry.
    pub fn covered_by(&self) -> HashSet<Permutation> {
        let n = self.len();
        let mut result = HashSet::new();

        for index in 0..=n {
            for value in 0..=n {
                let mut values: Vec<usize> = self
                    .values
                    .iter()
                    .map(|&other| if other >= value { other + 1 } else { other })
                    .collect();
                values.insert(index, value);
                result.insert(Self::from_vec_unchecked(values));
            }
        }

        result
    }

    /// Delete the entry at a position that is known to exist.
    fn without_index(&self, index: usize) -> Permutation {
        let removed = self.values[index];

        Self::from_vec_unchecked(
            self.values
                .iter()
                .filter(|&&value| value != removed)
                .map(|&value| if value > removed { value - 1 } else { value })
                .collect(),
        )
    }

    /// Return the permutations of length at most `height` that contain `self`,
    /// grouped by length.
    ///
    /// The result has `height + 1` entries; those below the length of `self` are empty.
    pub fn upset(&self, height: usize) -> Vec<HashSet<Permutation>> {
        let mut layers = vec![HashSet::new(); self.len().min(height + 1)];
        if self.len() > height {
            return layers;
        }

        layers.push(HashSet::from([self.clone()]));
        for length in self.len() + 1..=height {
            let next: HashSet<Permutation> = layers[length - 1]
                .iter()
                .flat_map(|permutation| permutation.covered_by())
                .collect();
            log::trace!("upset of {self}: {} permutations of length {length}", next.len());
            layers.push(next);
        }

        layers
    }

    /// Return the permutations contained in `self`, grouped by length.
    pub fn downset(&self) -> Vec<HashSet<Permutation>> {
        let mut layers = Vec::with_capacity(self.len() + 1);
        self.walk_downset(|layer| {
            layers.push(layer.keys().cloned().collect::<HashSet<_>>());
        });
        layers.reverse();

        layers
    }

    /// Return the number of permutations of each length contained in `self`.
    pub fn downset_profile(&self) -> Vec<usize> {
        let mut profile = Vec::with_capacity(self.len() + 1);
        self.walk_downset(|layer| profile.push(layer.len()));
        profile.reverse();

        profile
    }

    /// Visit the layers of the downset from the longest to the shortest.
    ///
    /// Each pattern is stored with the smallest position from which further
    /// deletions have to be tried. Deleting positions in non-decreasing order
    /// reaches every subsequence, so larger starting points never find anything new.
    fn walk_downset<F>(&self, mut visit: F)
    where
        F: FnMut(&HashMap<Permutation, usize>),
    {
        let mut current = HashMap::from([(self.clone(), 0)]);
        visit(&current);

        for length in (0..self.len()).rev() {
            let mut next: HashMap<Permutation, usize> = HashMap::new();

            for (permutation, start) in &current {
                for index in *start..=length {
                    let pattern = permutation.without_index(index);
                    next.entry(pattern)
                        .and_modify(|existing| *existing = (*existing).min(index))
                        .or_insert(index);
                }
            }

            visit(&next);
            current = next;
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashSet;

    use quickcheck_macros::quickcheck;
    use test_log::test;

    use crate::permutation::{test_util::perm, Permutation};

    #[test]
    fn covers() {
        let covers = perm("2413").covers();
        assert_eq!(covers, HashSet::from([perm("132"), perm("312"), perm("213"), perm("231")]));
        assert!(Permutation::default().covers().is_empty());
    }

    #[test]
    fn covered_by() {
        assert_eq!(
            perm("1").covered_by(),
            HashSet::from([perm("12"), perm("21")])
        );
        assert_eq!(perm("12").covered_by().len(), 5);
        assert_eq!(Permutation::default().covered_by(), HashSet::from([perm("1")]));
    }

    #[test]
    fn upset() {
        let layers = perm("21").upset(4);
        assert_eq!(layers.len(), 5);
        assert!(layers[0].is_empty() && layers[1].is_empty());
        assert_eq!(layers[2].len(), 1);
        assert_eq!(layers[3].len(), 5);
        assert_eq!(layers[4].len(), 23);

        assert_eq!(perm("321").upset(2).len(), 3);
    }

    #[test]
    fn downset() {
        let layers = perm("2413").downset();
        assert_eq!(layers.len(), 5);
        assert_eq!(layers[0], HashSet::from([Permutation::default()]));
        assert_eq!(layers[2], HashSet::from([perm("12"), perm("21")]));
        assert_eq!(layers[4], HashSet::from([perm("2413")]));
        assert_eq!(perm("2413").downset_profile(), vec![1, 1, 2, 4, 1]);
        assert_eq!(perm("12345").downset_profile(), vec![1, 1, 1, 1, 1, 1]);
    }

    #[quickcheck]
    fn downset_matches_involvement(p: Permutation) -> bool {
        if p.len() > 6 {
            return true;
        }

        let layers = p.downset();
        (0..=p.len()).all(|length| {
            let contained: HashSet<Permutation> = Permutation::all(length)
                .filter(|pattern| pattern.involved_in(&p))
                .collect();
            layers[length] == contained
        })
    }

    #[quickcheck]
    fn covers_and_covered_by_are_dual(p: Permutation) -> bool {
        p.covered_by()
            .iter()
            .all(|bigger| bigger.covers().contains(&p))
    }
}
