//! Positional statistics of permutations
//!
//! All positions are 0-based.

use super::Permutation;

impl Permutation {
    /// Return the positions `i` with `p(i) > p(i + 1)`.
    pub fn descents(&self) -> Vec<usize> {
        self.adjacent_positions(|left, right| left > right)
    }

    /// Return the positions `i` with `p(i) < p(i + 1)`.
    pub fn ascents(&self) -> Vec<usize> {
        self.adjacent_positions(|left, right| left < right)
    }

    /// Return the positions `i` where `p(i)` and `p(i + 1)` differ by one.
    pub fn bonds(&self) -> Vec<usize> {
        self.adjacent_positions(|left, right| left.abs_diff(right) == 1)
    }

    fn adjacent_positions<F>(&self, condition: F) -> Vec<usize>
    where
        F: Fn(usize, usize) -> bool,
    {
        self.values
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| condition(pair[0], pair[1]))
            .map(|(index, _)| index)
            .collect()
    }

    /// Return the positions of entries larger than both neighbours.
    pub fn peaks(&self) -> Vec<usize> {
        self.values
            .windows(3)
            .enumerate()
            .filter(|(_, triple)| triple[0] < triple[1] && triple[1] > triple[2])
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Return the positions of entries smaller than both neighbours.
    pub fn valleys(&self) -> Vec<usize> {
        self.values
            .windows(3)
            .enumerate()
            .filter(|(_, triple)| triple[0] > triple[1] && triple[1] < triple[2])
            .map(|(index, _)| index + 1)
            .collect()
    }

    /// Return the sum of `i + 1` over all descents `i`.
    pub fn major_index(&self) -> usize {
        self.descents().iter().map(|descent| descent + 1).sum()
    }

    /// Return the positions of the left-to-right minima.
    pub fn ltr_min(&self) -> Vec<usize> {
        records(self.values.iter().copied().enumerate(), |new, old| new < old)
    }

    /// Return the positions of the left-to-right maxima.
    pub fn ltr_max(&self) -> Vec<usize> {
        records(self.values.iter().copied().enumerate(), |new, old| new > old)
    }

    /// Return the positions of the right-to-left minima,
    /// listed from right to left.
    pub fn rtl_min(&self) -> Vec<usize> {
        records(self.values.iter().copied().enumerate().rev(), |new, old| {
            new < old
        })
    }

    /// Return the positions of the right-to-left maxima,
    /// listed from right to left.
    pub fn rtl_max(&self) -> Vec<usize> {
        records(self.values.iter().copied().enumerate().rev(), |new, old| {
            new > old
        })
    }

    /// Return all pairs `(i, j)` with `i < j` and `p(i) > p(j)`.
    pub fn inversions(&self) -> Vec<(usize, usize)> {
        self.pairs(|left, right| left > right)
    }

    /// Return all pairs `(i, j)` with `i < j` and `p(i) < p(j)`.
    pub fn noninversions(&self) -> Vec<(usize, usize)> {
        self.pairs(|left, right| left < right)
    }

    fn pairs<F>(&self, condition: F) -> Vec<(usize, usize)>
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut result = Vec::new();
        for (i, &left) in self.values.iter().enumerate() {
            for (j, &right) in self.values.iter().enumerate().skip(i + 1) {
                if condition(left, right) {
                    result.push((i, j));
                }
            }
        }

        result
    }

    /// Return the number of inversions.
    pub fn num_inversions(&self) -> usize {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &left)| {
                self.values[i + 1..]
                    .iter()
                    .filter(|&&right| right < left)
                    .count()
            })
            .sum()
    }

    /// Return the minimum taxicab distance between two points of the plot.
    ///
    /// Permutations with fewer than two entries have breadth equal to their length.
    pub fn breadth(&self) -> usize {
        let mut minimum = self.len();
        for (i, &left) in self.values.iter().enumerate() {
            for (j, &right) in self.values.iter().enumerate().skip(i + 1) {
                minimum = minimum.min(j - i + left.abs_diff(right));
            }
        }

        minimum
    }

    /// Return the length of a longest increasing subsequence.
    pub fn longest_increasing_subsequence(&self) -> usize {
        patience_length(self.values.iter().copied())
    }

    /// Return the length of a longest decreasing subsequence.
    pub fn longest_decreasing_subsequence(&self) -> usize {
        patience_length(self.values.iter().rev().copied())
    }

    /// Return the start and length of the first longest run of consecutive
    /// positions with increasing values.
    pub fn max_ascending_run(&self) -> (usize, usize) {
        self.longest_run(|left, right| left < right)
    }

    /// Return the start and length of the first longest run of consecutive
    /// positions with decreasing values.
    pub fn max_descending_run(&self) -> (usize, usize) {
        self.longest_run(|left, right| left > right)
    }

    fn longest_run<F>(&self, continues: F) -> (usize, usize)
    where
        F: Fn(usize, usize) -> bool,
    {
        if self.is_empty() {
            return (0, 0);
        }

        let mut best = (0, 1);
        let mut start = 0;
        for (index, pair) in self.values.windows(2).enumerate() {
            if !continues(pair[0], pair[1]) {
                start = index + 1;
            }

            let length = index + 2 - start;
            if length > best.1 {
                best = (start, length);
            }
        }

        best
    }
}

/// Positions whose value beats every value seen before it in iteration order.
fn records<I, F>(entries: I, beats: F) -> Vec<usize>
where
    I: Iterator<Item = (usize, usize)>,
    F: Fn(usize, usize) -> bool,
{
    let mut result = Vec::new();
    let mut current: Option<usize> = None;

    for (index, value) in entries {
        if current.map_or(true, |record| beats(value, record)) {
            result.push(index);
            current = Some(value);
        }
    }

    result
}

/// Length of a longest increasing subsequence, by patience sorting.
fn patience_length<I: Iterator<Item = usize>>(values: I) -> usize {
    let mut tops: Vec<usize> = Vec::new();

    for value in values {
        match tops.binary_search(&value) {
            Ok(_) => {}
            Err(position) if position == tops.len() => tops.push(value),
            Err(position) => tops[position] = value,
        }
    }

    tops.len()
}
