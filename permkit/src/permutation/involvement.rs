//! Pattern containment and occurrences of patterns

use std::collections::BTreeMap;

use itertools::Itertools;

use super::Permutation;

/// A pattern prepared for repeated containment tests.
///
/// Entries of the pattern are matched from right to left. For every position
/// of the pattern we remember the later position holding the next smaller value
/// and the one holding the next larger value. A candidate entry of the text only
/// has to be compared against the entries already matched at those two positions.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: Permutation,
    /// Later position with the largest value below the value at this position
    lower: Vec<Option<usize>>,
    /// Later position with the smallest value above the value at this position
    upper: Vec<Option<usize>>,
}

impl PatternMatcher {
    /// Prepare `pattern` for containment tests.
    pub fn new(pattern: &Permutation) -> Self {
        let values = pattern.values();
        let n = values.len();
        let mut lower = vec![None; n];
        let mut upper = vec![None; n];

        for i in 0..n {
            let mut max_below: Option<usize> = None;
            let mut min_above: Option<usize> = None;

            for j in i + 1..n {
                if values[j] < values[i] {
                    if max_below.map_or(true, |below| values[j] > values[below]) {
                        max_below = Some(j);
                    }
                } else if min_above.map_or(true, |above| values[j] < values[above]) {
                    min_above = Some(j);
                }
            }

            lower[i] = max_below;
            upper[i] = min_above;
        }

        Self {
            pattern: pattern.clone(),
            lower,
            upper,
        }
    }

    /// Return the pattern this matcher looks for.
    pub fn pattern(&self) -> &Permutation {
        &self.pattern
    }

    /// Return whether the pattern occurs in `text`.
    pub fn occurs_in(&self, text: &Permutation) -> bool {
        self.occurs_in_with_suffix(text, 0)
    }

    /// Return whether the pattern occurs in `text` such that the last
    /// `last_require` entries of the pattern are matched by the last
    /// `last_require` entries of `text`.
    ///
    /// With `last_require == 0` this is plain containment.
    /// Values of `last_require` beyond the length of the pattern are capped.
    pub fn occurs_in_with_suffix(&self, text: &Permutation, last_require: usize) -> bool {
        let n = self.pattern.len();
        let m = text.len();

        let last_require = last_require.min(n);

        if n > m {
            return false;
        }
        if n <= 1 {
            return true;
        }

        let mut indices = vec![0; n];

        if last_require == 0 {
            for last in (0..m).rev() {
                indices[n - 1] = last;
                if self.extend(text, &mut indices, n - 1) {
                    return true;
                }
            }

            return false;
        }

        for offset in 1..=last_require {
            indices[n - offset] = m - offset;
        }
        if !(n - last_require..n).all(|position| self.fits(text, &indices, position)) {
            return false;
        }

        self.extend(text, &mut indices, n - last_require)
    }

    /// Check whether the entry of `text` chosen for `position`
    /// respects the order of the entries matched at later positions.
    fn fits(&self, text: &Permutation, indices: &[usize], position: usize) -> bool {
        let value = text[indices[position]];

        self.lower[position].map_or(true, |below| value > text[indices[below]])
            && self.upper[position].map_or(true, |above| value < text[indices[above]])
    }

    /// Try to match the pattern positions `0..matched` given that
    /// the positions from `matched` onwards are matched already.
    fn extend(&self, text: &Permutation, indices: &mut [usize], matched: usize) -> bool {
        if matched == 0 {
            return true;
        }

        let position = matched - 1;
        // every earlier pattern position needs its own text position
        for candidate in (position..indices[matched]).rev() {
            indices[position] = candidate;
            if self.fits(text, indices, position) && self.extend(text, indices, position) {
                return true;
            }
        }

        false
    }
}

/// Return whether `entries` is order-isomorphic to `pattern`.
fn is_order_isomorphic(entries: &[usize], pattern: &Permutation) -> bool {
    entries.len() == pattern.len()
        && (0..entries.len()).tuple_combinations().all(|(i, j)| {
            (entries[i] < entries[j]) == (pattern[i] < pattern[j])
        })
}

impl Permutation {
    /// Return whether `self` occurs as a pattern in `text`.
    pub fn involved_in(&self, text: &Permutation) -> bool {
        PatternMatcher::new(self).occurs_in(text)
    }

    /// Return whether `self` occurs in `text` using the last `last_require`
    /// entries of `text` for its last `last_require` entries.
    pub fn involved_in_with_suffix(&self, text: &Permutation, last_require: usize) -> bool {
        PatternMatcher::new(self).occurs_in_with_suffix(text, last_require)
    }

    /// Return whether `self` contains `pattern`.
    pub fn involves(&self, pattern: &Permutation) -> bool {
        pattern.involved_in(self)
    }

    /// Return whether `self` avoids `pattern`.
    pub fn avoids(&self, pattern: &Permutation) -> bool {
        !self.involves(pattern)
    }

    /// Return whether `self` avoids every permutation in `basis`.
    pub fn avoids_all<'a, I>(&self, basis: I) -> bool
    where
        I: IntoIterator<Item = &'a Permutation>,
    {
        basis.into_iter().all(|pattern| self.avoids(pattern))
    }

    /// Return the occurrences of `pattern` in `self`,
    /// each given by the values of the entries that form it.
    pub fn copies(&self, pattern: &Permutation) -> Vec<Vec<usize>> {
        if pattern.len() > self.len() {
            return Vec::new();
        }

        self.values
            .iter()
            .copied()
            .combinations(pattern.len())
            .filter(|entries| is_order_isomorphic(entries, pattern))
            .collect()
    }

    /// Return the number of occurrences of `pattern` in `self`.
    pub fn num_copies(&self, pattern: &Permutation) -> usize {
        if pattern.len() > self.len() {
            return 0;
        }

        self.values
            .iter()
            .copied()
            .combinations(pattern.len())
            .filter(|entries| is_order_isomorphic(entries, pattern))
            .count()
    }

    /// Return the starting positions of the occurrences of `pattern`
    /// that use consecutive positions of `self`.
    pub fn contiguous_copies(&self, pattern: &Permutation) -> Vec<usize> {
        if pattern.is_empty() {
            return (0..=self.len()).collect();
        }

        self.values
            .windows(pattern.len())
            .enumerate()
            .filter(|(_, window)| is_order_isomorphic(window, pattern))
            .map(|(start, _)| start)
            .collect()
    }

    /// Count how often each permutation of length `k` occurs in `self`.
    pub fn pattern_counts(&self, k: usize) -> BTreeMap<Permutation, usize> {
        let mut result = BTreeMap::new();
        if k > self.len() {
            return result;
        }

        for entries in self.values.iter().copied().combinations(k) {
            *result.entry(Self::pattern_of(&entries)).or_insert(0) += 1;
        }

        result
    }

    /// Return the proportion of subsequences of length `|pattern|`
    /// that form an occurrence of `pattern`.
    pub fn density_of(&self, pattern: &Permutation) -> f64 {
        if pattern.len() > self.len() {
            return 0.0;
        }

        let subsequences = num::integer::binomial(self.len() as u128, pattern.len() as u128);
        self.num_copies(pattern) as f64 / subsequences as f64
    }

    /// Return all permutations of length `n` containing the maximum
    /// number of occurrences of `pattern`.
    pub fn optimizers(pattern: &Permutation, n: usize) -> Vec<Permutation> {
        let mut best = 0;
        let mut result = Vec::new();

        for candidate in Permutation::all(n) {
            let copies = candidate.num_copies(pattern);
            if copies > best {
                best = copies;
                result.clear();
            }
            if copies == best {
                result.push(candidate);
            }
        }

        log::debug!(
            "{} permutations of length {n} contain {best} copies of {pattern}",
            result.len()
        );

        result
    }
}

#[cfg(test)]
mod test {
    use quickcheck_macros::quickcheck;
    use test_log::test;

    use super::PatternMatcher;
    use crate::permutation::{test_util::perm, Permutation};

    /// Containment by brute force over all subsequences
    fn naive_involvement(pattern: &Permutation, text: &Permutation) -> bool {
        !text.copies(pattern).is_empty()
    }

    #[test]
    fn involvement() {
        assert!(perm("123456").avoids(&perm("231")));
        assert!(perm("123456").involves(&perm("123")));
        assert!(!perm("123").involved_in(&perm("31542")));
        assert!(perm("213").involved_in(&perm("54213")));
        assert!(perm("132").involved_in(&perm("4132")));
        assert!(!perm("231").involved_in(&perm("1234")));
        assert!(perm("1").involved_in(&perm("21")));
        assert!(Permutation::default().involved_in(&Permutation::default()));
        assert!(!perm("12").involved_in(&perm("1")));
    }

    #[test]
    fn involvement_with_suffix() {
        let pattern = perm("12");
        // the only copies of 12 in 2 1 3 use the last entry
        assert!(pattern.involved_in_with_suffix(&perm("213"), 1));
        // 2 3 1 contains 12 but not ending in its last entry
        assert!(!pattern.involved_in_with_suffix(&perm("231"), 1));
        assert!(pattern.involved_in_with_suffix(&perm("231"), 0));
        assert!(perm("231").involved_in_with_suffix(&perm("2431"), 2));
        assert!(!perm("231").involved_in_with_suffix(&perm("3412"), 2));
    }

    #[test]
    fn avoids_all() {
        let basis = vec![perm("123"), perm("132")];
        assert!(perm("3421").avoids_all(&basis));
        assert!(!perm("2143").avoids_all(&basis));
        let empty: Vec<Permutation> = Vec::new();
        assert!(perm("2143").avoids_all(&empty));
    }

    #[test]
    fn copies() {
        let p = perm("1324");
        assert_eq!(p.copies(&perm("132")), vec![vec![0, 2, 1]]);
        assert_eq!(p.num_copies(&perm("123")), 2);
        assert_eq!(perm("21435").contiguous_copies(&perm("21")), vec![0, 2]);
        assert_eq!(perm("1234").contiguous_copies(&perm("12")), vec![0, 1, 2]);

        let counts = p.pattern_counts(3);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts[&perm("123")], 2);
        assert_eq!(counts[&perm("132")], 1);
        assert_eq!(counts[&perm("213")], 1);
    }

    #[test]
    fn density() {
        assert_eq!(perm("1324").density_of(&perm("123")), 0.5);
        assert_eq!(perm("12").density_of(&perm("123")), 0.0);
        assert_eq!(Permutation::identity(5).density_of(&perm("12")), 1.0);
    }

    #[test]
    fn optimizers() {
        let best = Permutation::optimizers(&perm("21"), 3);
        assert_eq!(best, vec![perm("321")]);

        let best = Permutation::optimizers(&perm("132"), 4);
        assert!(best.iter().all(|p| p.num_copies(&perm("132")) == 3));
        assert!(best.contains(&perm("1432")));
    }

    #[test]
    fn matcher_is_reusable() {
        let matcher = PatternMatcher::new(&perm("2413"));
        assert_eq!(matcher.pattern(), &perm("2413"));
        assert!(matcher.occurs_in(&perm("25314")));
        assert!(!matcher.occurs_in(&perm("12345")));
        assert!(!matcher.occurs_in(&perm("3142")));
    }

    #[quickcheck]
    fn matches_naive_involvement(pattern: Permutation, text: Permutation) -> bool {
        let pattern = pattern
            .delete_indices(&(4.min(pattern.len())..pattern.len()).collect::<Vec<_>>())
            .unwrap();
        pattern.involved_in(&text) == naive_involvement(&pattern, &text)
    }

    #[quickcheck]
    fn deletions_are_contained(text: Permutation, index: usize) -> bool {
        if text.is_empty() {
            return true;
        }

        let pattern = text.delete_index(index % text.len()).unwrap();
        pattern.involved_in(&text) && text.involves(&pattern)
    }

    #[quickcheck]
    fn suffix_involvement_uses_last_entry(pattern: Permutation, text: Permutation) -> bool {
        if text.is_empty() || pattern.is_empty() {
            return true;
        }

        let last = text.len() - 1;
        let expected = text
            .copies(&pattern)
            .iter()
            .any(|entries| entries.last() == Some(&text[last]));

        pattern.involved_in_with_suffix(&text, 1) == expected
    }
}
