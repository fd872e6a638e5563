//! Intervals, simple permutations and the substitution decomposition
//!
//! An interval is a set of consecutive positions whose values are consecutive as well.

use super::Permutation;
use crate::error::Error;

impl Permutation {
    /// Return, for each length `k`, the starting positions of the intervals
    /// of length `k`, where `2 <= k < n`.
    ///
    /// The result always has at least two (empty) entries for lengths 0 and 1.
    pub fn all_intervals(&self) -> Vec<Vec<usize>> {
        let n = self.len();
        let mut blocks = vec![Vec::new(); n.max(2)];

        for start in 0..n {
            let mut minimum = self.values[start];
            let mut maximum = self.values[start];

            for end in start + 1..n {
                let length = end - start + 1;
                if length >= n {
                    break;
                }

                minimum = minimum.min(self.values[end]);
                maximum = maximum.max(self.values[end]);
                if maximum - minimum == length - 1 {
                    blocks[length].push(start);
                }
            }
        }

        blocks
    }

    /// Return the patterns formed by the intervals found by
    /// [`Permutation::all_intervals`], shortest first.
    pub fn interval_patterns(&self) -> Vec<Permutation> {
        self.all_intervals()
            .iter()
            .enumerate()
            .flat_map(|(length, starts)| {
                starts
                    .iter()
                    .map(move |&start| Self::pattern_of(&self.values[start..start + length]))
            })
            .collect()
    }

    /// Return the maximal monotone intervals of length at least two
    /// as pairs of their first and last position.
    ///
    /// If `with_ones` is set, every position not covered by such an interval
    /// is added as an interval of length one, and the result is sorted.
    pub fn all_monotone_intervals(&self, with_ones: bool) -> Vec<(usize, usize)> {
        let mut result = Vec::new();
        let mut current: Option<(usize, bool)> = None;

        for (index, pair) in self.values.windows(2).enumerate() {
            let step = if pair[1] == pair[0] + 1 {
                Some(true)
            } else if pair[0] == pair[1] + 1 {
                Some(false)
            } else {
                None
            };

            match (current, step) {
                (Some((_, ascending)), Some(step)) if ascending == step => {}
                (_, step) => {
                    if let Some((start, _)) = current {
                        result.push((start, index));
                    }
                    current = step.map(|ascending| (index, ascending));
                }
            }
        }
        if let Some((start, _)) = current {
            result.push((start, self.len() - 1));
        }

        if with_ones {
            let mut covered = vec![false; self.len()];
            for &(start, end) in &result {
                covered[start..=end].iter_mut().for_each(|flag| *flag = true);
            }

            result.extend(
                covered
                    .iter()
                    .enumerate()
                    .filter(|(_, &flag)| !flag)
                    .map(|(index, _)| (index, index)),
            );
            result.sort_unstable();
        }

        result
    }

    /// Return the permutation obtained by collapsing
    /// every maximal monotone interval into a single entry.
    pub fn monotone_quotient(&self) -> Permutation {
        let representatives: Vec<usize> = self
            .all_monotone_intervals(true)
            .iter()
            .map(|&(start, _)| self.values[start])
            .collect();

        Self::pattern_of(&representatives)
    }

    /// Return `(length, start)` of a longest proper interval of length at least two,
    /// or [None] if the permutation is simple.
    pub fn maximal_interval(&self) -> Option<(usize, usize)> {
        let n = self.len();

        for length in (2..n).rev() {
            for start in 0..=n - length {
                let window = &self.values[start..start + length];
                let minimum = window.iter().min()?;
                let maximum = window.iter().max()?;
                if maximum - minimum == length - 1 {
                    return Some((length, start));
                }
            }
        }

        None
    }

    /// Return `(length, end)` of some proper interval of length at least two,
    /// where `end` is its last position, or [None] if the permutation is simple.
    ///
    /// Shorter intervals are found first.
    pub fn simple_location(&self) -> Option<(usize, usize)> {
        let n = self.len();
        let mut minima = self.values.clone();
        let mut maxima = self.values.clone();

        // after round `width`, minima[j] and maxima[j] describe
        // the window of `width + 1` entries that ends at `j`
        for width in 1..n.saturating_sub(1) {
            for end in (width..n).rev() {
                minima[end] = minima[end - 1].min(self.values[end]);
                maxima[end] = maxima[end - 1].max(self.values[end]);

                if maxima[end] - minima[end] == width {
                    return Some((width + 1, end));
                }
            }
        }

        None
    }

    /// Return whether the permutation has no proper intervals.
    ///
    /// Permutations of length at most two are simple.
    pub fn is_simple(&self) -> bool {
        self.len() <= 2 || self.simple_location().is_none()
    }

    /// Decompose `self` into a simple skeleton and one component per entry of it,
    /// such that inflating the skeleton by the components gives back `self`.
    pub fn decomposition(&self) -> (Permutation, Vec<Permutation>) {
        let mut skeleton = self.clone();
        let mut components = vec![Self::identity(1); self.len()];

        while let Some((length, start)) = skeleton.maximal_interval() {
            let end = start + length;
            let block = Self::pattern_of(&skeleton.values[start..end])
                .inflate(&components[start..end])
                .expect("one component per entry of the block");

            let mut values = skeleton.values[..=start].to_vec();
            values.extend_from_slice(&skeleton.values[end..]);
            skeleton = Self::pattern_of(&values);

            let mut merged = components[..start].to_vec();
            merged.push(block);
            merged.extend_from_slice(&components[end..]);
            components = merged;
        }

        (skeleton, components)
    }

    /// Substitute the `i`-th component for the `i`-th entry.
    ///
    /// Returns [`Error::ComponentCountMismatch`] if there is
    /// not exactly one component per entry.
    pub fn inflate(&self, components: &[Permutation]) -> Result<Permutation, Error> {
        if components.len() != self.len() {
            return Err(Error::ComponentCountMismatch {
                expected: self.len(),
                found: components.len(),
            });
        }

        // smallest value used by the component at each position
        let mut shifts = vec![0; self.len()];
        let mut shift = 0;
        for position in self.positions() {
            shifts[position] = shift;
            shift += components[position].len();
        }

        Ok(Self::from_vec_unchecked(
            components
                .iter()
                .zip(shifts)
                .flat_map(|(component, shift)| component.iter().map(move |value| value + shift))
                .collect(),
        ))
    }
}
