//! Module for representing a permutation as a sequence of values

pub mod intervals;
pub mod involvement;
pub mod order;
pub mod rank;
pub mod render;
pub mod statistics;
pub mod symmetry;

use std::{
    fmt::Display,
    ops::{Add, Index, Mul, Sub},
    str::FromStr,
};

use itertools::Itertools;
use num::{BigUint, One};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::error::Error;

pub use involvement::PatternMatcher;
pub use render::Style;
pub use symmetry::Symmetry;

/// A permutation of the values `0..n`, stored in one-line notation.
///
/// The entry at position `i` is the image of `i`.
/// Permutations are ordered lexicographically by their one-line notation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation {
    values: Vec<usize>,
}

/// Check that `values` contains every element of `0..values.len()` exactly once.
fn is_permutation(values: &[usize]) -> bool {
    let mut seen = vec![false; values.len()];

    for &value in values {
        match seen.get_mut(value) {
            Some(flag) if !*flag => *flag = true,
            _ => return false,
        }
    }

    true
}

impl Permutation {
    /// Create a [Permutation] from its one-line notation.
    ///
    /// Returns [`Error::NotAPermutation`] if `values` is not
    /// an arrangement of `0..values.len()`.
    pub fn from_vec(values: Vec<usize>) -> Result<Self, Error> {
        if !is_permutation(&values) {
            return Err(Error::NotAPermutation(values));
        }

        Ok(Self { values })
    }

    /// Create a [Permutation] from values that are known to form one.
    pub(crate) fn from_vec_unchecked(values: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&values));
        Self { values }
    }

    /// Return the [Permutation] that is order-isomorphic to the given entries.
    ///
    /// For example, `[215, -99, 30, 12, 0]` standardises to `5 1 4 3 2`.
    ///
    /// Returns [`Error::DuplicateEntries`] if two entries are equal.
    pub fn standardize<T: Ord>(entries: &[T]) -> Result<Self, Error> {
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_by(|&a, &b| entries[a].cmp(&entries[b]));

        if order
            .iter()
            .tuple_windows()
            .any(|(&a, &b)| entries[a] == entries[b])
        {
            return Err(Error::DuplicateEntries);
        }

        Ok(Self::from_order(&order))
    }

    /// Standardise entries that are already known to be distinct.
    pub(crate) fn pattern_of(entries: &[usize]) -> Self {
        let mut order: Vec<usize> = (0..entries.len()).collect();
        order.sort_unstable_by_key(|&index| entries[index]);

        Self::from_order(&order)
    }

    /// `order[rank]` is the position which receives value `rank`.
    fn from_order(order: &[usize]) -> Self {
        let mut values = vec![0; order.len()];
        for (rank, &index) in order.iter().enumerate() {
            values[index] = rank;
        }

        Self::from_vec_unchecked(values)
    }

    /// Create a [Permutation] from the decimal digits of a number,
    /// e.g. `4132` gives `4 1 3 2`.
    pub fn from_digits(number: u64) -> Result<Self, Error> {
        let digits: Vec<u32> = number
            .to_string()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect();

        Self::standardize(&digits)
    }

    /// Return the identity permutation of length `n`.
    pub fn identity(n: usize) -> Self {
        Self::monotone_increasing(n)
    }

    /// Return `1 2 ... n`.
    pub fn monotone_increasing(n: usize) -> Self {
        Self::from_vec_unchecked((0..n).collect())
    }

    /// Return `n ... 2 1`.
    pub fn monotone_decreasing(n: usize) -> Self {
        Self::from_vec_unchecked((0..n).rev().collect())
    }

    /// Return a uniformly random permutation of length `n`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let mut values: Vec<usize> = (0..n).collect();
        values.shuffle(rng);

        Self::from_vec_unchecked(values)
    }

    /// Return a uniformly random permutation of length `n`
    /// that avoids every pattern in `basis`.
    ///
    /// Permutations are sampled uniformly and rejected
    /// until one satisfies all requirements of `options`.
    ///
    /// Returns [`Error::SamplingExhausted`] if
    /// [`RandomAvoiderOptions::max_attempts`] is exceeded.
    pub fn random_avoider<R: Rng + ?Sized>(
        n: usize,
        basis: &[Permutation],
        options: RandomAvoiderOptions,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let matchers: Vec<PatternMatcher> = basis.iter().map(PatternMatcher::new).collect();

        let mut attempts: u64 = 0;
        loop {
            if options.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(Error::SamplingExhausted(attempts));
            }
            attempts += 1;

            let candidate = Self::random(n, rng);

            if options.involution && !candidate.is_involution() {
                continue;
            }
            if options.simple && !candidate.is_simple() {
                continue;
            }
            if matchers.iter().all(|matcher| !matcher.occurs_in(&candidate)) {
                log::debug!("found avoider {candidate} after {attempts} attempts");
                return Ok(candidate);
            }

            if options.log_every.is_some_and(|every| attempts % every == 0) {
                log::debug!("tested {attempts} permutations");
            }
        }
    }

    /// Return an iterator over all permutations of length `n`
    /// in lexicographic order.
    pub fn all(n: usize) -> impl Iterator<Item = Permutation> {
        (0..n).permutations(n).map(Self::from_vec_unchecked)
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return whether this is the permutation of length zero.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the one-line notation as a slice.
    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Return an iterator over the entries from left to right.
    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.values.iter()
    }

    /// Evaluate the permutation at `index`.
    ///
    /// # Panics
    /// `index` is not smaller than the length.
    pub fn apply(&self, index: usize) -> usize {
        self.values[index]
    }

    /// Return the position of each value, i.e. the one-line notation of the inverse.
    pub(crate) fn positions(&self) -> Vec<usize> {
        let mut positions = vec![0; self.len()];
        for (index, &value) in self.values.iter().enumerate() {
            positions[value] = index;
        }

        positions
    }

    /// Return the group-theoretic inverse.
    pub fn inverse(&self) -> Self {
        Self::from_vec_unchecked(self.positions())
    }

    /// Return the functional composition `self ∘ other`,
    /// which maps `i` to `self(other(i))`.
    ///
    /// Returns [`Error::LengthMismatch`] if the lengths differ.
    pub fn compose(&self, other: &Permutation) -> Result<Self, Error> {
        if self.len() != other.len() {
            return Err(Error::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }

        Ok(Self::from_vec_unchecked(
            other.values.iter().map(|&value| self.values[value]).collect(),
        ))
    }

    /// Raise the permutation to the given power.
    /// Negative powers are powers of the inverse.
    pub fn pow(&self, exponent: i64) -> Self {
        let mut base = if exponent < 0 {
            self.inverse()
        } else {
            self.clone()
        };
        let mut remaining = exponent.unsigned_abs();
        let mut result = Self::identity(self.len());

        while remaining > 0 {
            if remaining & 1 == 1 {
                result = &result * &base;
            }
            base = &base * &base;
            remaining >>= 1;
        }

        result
    }

    /// Return the cycle decomposition.
    ///
    /// Every cycle starts with its smallest element and
    /// cycles are sorted by their first element.
    /// Fixed points are reported as cycles of length one.
    pub fn cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.len()];
        let mut result = Vec::new();

        for start in 0..self.len() {
            if visited[start] {
                continue;
            }

            let mut cycle = vec![start];
            visited[start] = true;

            let mut current = self.values[start];
            while current != start {
                visited[current] = true;
                cycle.push(current);
                current = self.values[current];
            }

            result.push(cycle);
        }

        result
    }

    /// Return the order of the permutation in the symmetric group,
    /// i.e. the least common multiple of its cycle lengths.
    ///
    /// The order grows faster than any fixed width integer, so it is computed exactly.
    pub fn order(&self) -> BigUint {
        self.cycles()
            .iter()
            .fold(BigUint::one(), |acc, cycle| {
                num::integer::lcm(acc, BigUint::from(cycle.len()))
            })
    }

    /// Return whether the permutation is its own inverse.
    pub fn is_involution(&self) -> bool {
        self.values
            .iter()
            .enumerate()
            .all(|(index, &value)| self.values[value] == index)
    }

    /// Return the positions `i` with `p(i) = i`.
    pub fn fixed_points(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(index, value)| index == *value)
            .map(|(index, _)| index)
            .collect()
    }

    /// Return the direct sum, which places `other` above and to the right of `self`.
    pub fn direct_sum(&self, other: &Permutation) -> Self {
        let shift = self.len();

        Self::from_vec_unchecked(
            self.values
                .iter()
                .copied()
                .chain(other.values.iter().map(|value| value + shift))
                .collect(),
        )
    }

    /// Return the skew sum, which places `other` below and to the right of `self`.
    pub fn skew_sum(&self, other: &Permutation) -> Self {
        let shift = other.len();

        Self::from_vec_unchecked(
            self.values
                .iter()
                .map(|value| value + shift)
                .chain(other.values.iter().copied())
                .collect(),
        )
    }

    /// Return whether `self` is the direct sum of two shorter permutations.
    pub fn sum_decomposable(&self) -> bool {
        self.first_sum_split().is_some()
    }

    /// Length of the shortest nonempty proper prefix
    /// that consists of the smallest values.
    fn first_sum_split(&self) -> Option<usize> {
        let mut maximum = 0;
        for (index, &value) in self.values.iter().enumerate().take(self.len().saturating_sub(1)) {
            maximum = maximum.max(value);
            if maximum == index {
                return Some(index + 1);
            }
        }

        None
    }

    /// Length of the shortest nonempty proper prefix
    /// that consists of the largest values.
    fn first_skew_split(&self) -> Option<usize> {
        let n = self.len();
        let mut minimum = n;
        for (index, &value) in self.values.iter().enumerate().take(n.saturating_sub(1)) {
            minimum = minimum.min(value);
            if minimum == n - index - 1 {
                return Some(index + 1);
            }
        }

        None
    }

    /// Return the sum-indecomposable permutations whose direct sum is `self`.
    pub fn sum_decomposition(&self) -> Vec<Permutation> {
        let mut components = Vec::new();
        let mut rest = self.clone();

        while !rest.is_empty() {
            match rest.first_sum_split() {
                Some(split) => {
                    components.push(Self::from_vec_unchecked(rest.values[..split].to_vec()));
                    rest = Self::from_vec_unchecked(
                        rest.values[split..].iter().map(|value| value - split).collect(),
                    );
                }
                None => {
                    components.push(rest);
                    break;
                }
            }
        }

        components
    }

    /// Return whether `self` is the skew sum of two shorter permutations.
    pub fn skew_decomposable(&self) -> bool {
        self.first_skew_split().is_some()
    }

    /// Return the skew-indecomposable permutations whose skew sum is `self`.
    pub fn skew_decomposition(&self) -> Vec<Permutation> {
        let mut components = Vec::new();
        let mut rest = self.clone();

        while !rest.is_empty() {
            match rest.first_skew_split() {
                Some(split) => {
                    let shift = rest.len() - split;
                    components.push(Self::from_vec_unchecked(
                        rest.values[..split].iter().map(|value| value - shift).collect(),
                    ));
                    rest = Self::from_vec_unchecked(rest.values[split..].to_vec());
                }
                None => {
                    components.push(rest);
                    break;
                }
            }
        }

        components
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                length: self.len(),
            });
        }

        Ok(())
    }

    fn check_value(&self, value: usize) -> Result<(), Error> {
        if value >= self.len() {
            return Err(Error::ValueOutOfRange {
                value,
                length: self.len(),
            });
        }

        Ok(())
    }

    /// Return the permutation obtained by deleting the entry at position `index`.
    pub fn delete_index(&self, index: usize) -> Result<Self, Error> {
        self.check_index(index)?;
        let removed = self.values[index];

        Ok(Self::from_vec_unchecked(
            self.values
                .iter()
                .filter(|&&value| value != removed)
                .map(|&value| if value > removed { value - 1 } else { value })
                .collect(),
        ))
    }

    /// Return the permutation obtained by deleting the entry with value `value`.
    pub fn delete_value(&self, value: usize) -> Result<Self, Error> {
        self.check_value(value)?;

        Ok(Self::from_vec_unchecked(
            self.values
                .iter()
                .filter(|&&other| other != value)
                .map(|&other| if other > value { other - 1 } else { other })
                .collect(),
        ))
    }

    /// Return the permutation obtained by deleting the entries at all given positions.
    pub fn delete_indices(&self, indices: &[usize]) -> Result<Self, Error> {
        let mut remove = vec![false; self.len()];
        for &index in indices {
            self.check_index(index)?;
            remove[index] = true;
        }

        let kept: Vec<usize> = self
            .values
            .iter()
            .zip(&remove)
            .filter(|(_, &removed)| !removed)
            .map(|(&value, _)| value)
            .collect();

        Ok(Self::pattern_of(&kept))
    }

    /// Return the permutation obtained by deleting the entries with the given values.
    pub fn delete_values(&self, values: &[usize]) -> Result<Self, Error> {
        let mut remove = vec![false; self.len()];
        for &value in values {
            self.check_value(value)?;
            remove[value] = true;
        }

        let kept: Vec<usize> = self
            .values
            .iter()
            .copied()
            .filter(|&value| !remove[value])
            .collect();

        Ok(Self::pattern_of(&kept))
    }

    /// Return the permutation obtained by inserting a new entry with value `value`
    /// right before position `index`.
    /// Entries with values of at least `value` move up by one.
    ///
    /// Both `index` and `value` may equal the length,
    /// which appends the entry at the right or on top respectively.
    pub fn insert(&self, index: usize, value: usize) -> Result<Self, Error> {
        let length = self.len();
        if index > length {
            return Err(Error::IndexOutOfRange { index, length });
        }
        if value > length {
            return Err(Error::ValueOutOfRange { value, length });
        }

        let mut values: Vec<usize> = self
            .values
            .iter()
            .map(|&other| if other >= value { other + 1 } else { other })
            .collect();
        values.insert(index, value);

        Ok(Self::from_vec_unchecked(values))
    }

    /// Return the pattern formed by the entries at the given positions.
    pub fn restrict_indices(&self, indices: &[usize]) -> Result<Self, Error> {
        let mut keep = vec![false; self.len()];
        for &index in indices {
            self.check_index(index)?;
            keep[index] = true;
        }

        let kept: Vec<usize> = self
            .values
            .iter()
            .zip(&keep)
            .filter(|(_, &kept)| kept)
            .map(|(&value, _)| value)
            .collect();

        Ok(Self::pattern_of(&kept))
    }

    /// Return the pattern formed by the entries with the given values.
    pub fn restrict_values(&self, values: &[usize]) -> Result<Self, Error> {
        let mut keep = vec![false; self.len()];
        for &value in values {
            self.check_value(value)?;
            keep[value] = true;
        }

        let kept: Vec<usize> = self
            .values
            .iter()
            .copied()
            .filter(|&value| keep[value])
            .collect();

        Ok(Self::pattern_of(&kept))
    }

    /// Return the children of `self` in the generating tree of a class,
    /// obtained by appending a new last entry.
    ///
    /// Only the values in `insertion_values` are tried, and each resulting
    /// permutation is kept if `test` accepts it. Every child is returned together
    /// with the values that may be appended to it in turn: values that were
    /// rejected for `self` stay rejected for all children.
    pub fn right_extensions<F>(
        &self,
        insertion_values: &[usize],
        mut test: F,
    ) -> Vec<(Permutation, Vec<usize>)>
    where
        F: FnMut(&Permutation) -> bool,
    {
        let mut accepted = Vec::new();
        let mut admissible = Vec::new();

        for &new_value in insertion_values {
            let mut values: Vec<usize> = self
                .values
                .iter()
                .map(|&value| if value < new_value { value } else { value + 1 })
                .collect();
            values.push(new_value);
            let child = Self::from_vec_unchecked(values);

            if test(&child) {
                accepted.push((child, new_value));
                admissible.push(new_value);
            }
        }

        accepted
            .into_iter()
            .map(|(child, new_value)| {
                let mut child_values: Vec<usize> = admissible
                    .iter()
                    .map(|&value| if value < new_value { value } else { value + 1 })
                    .collect();
                child_values.push(new_value);
                child_values.sort_unstable();

                (child, child_values)
            })
            .collect()
    }
}

/// Requirements for [`Permutation::random_avoider`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RandomAvoiderOptions {
    /// Only accept simple permutations
    pub simple: bool,
    /// Only accept involutions
    pub involution: bool,
    /// Log the number of attempts every so many rejections
    pub log_every: Option<u64>,
    /// Give up after this many attempts
    pub max_attempts: Option<u64>,
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = Error;

    fn try_from(values: Vec<usize>) -> Result<Self, Self::Error> {
        Self::from_vec(values)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.values
    }
}

impl FromStr for Permutation {
    type Err = Error;

    /// Parse a permutation from a sequence of integers.
    ///
    /// Integers may be separated by whitespace or commas and may be
    /// surrounded by brackets. Without separators every character is a digit,
    /// so `"35124"`, `"3 5 1 2 4"` and `"[3, 5, 1, 2, 4]"` are the same permutation.
    /// The entries are standardised, hence only their relative order matters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| Error::Parse {
            input: s.to_owned(),
            reason,
        };

        let trimmed = s
            .trim()
            .trim_start_matches(|c| c == '[' || c == '(')
            .trim_end_matches(|c| c == ']' || c == ')')
            .trim();
        let is_separator = |c: char| c.is_whitespace() || c == ',';

        let entries: Vec<i64> = if trimmed.contains(is_separator) {
            trimmed
                .split(is_separator)
                .filter(|token| !token.is_empty())
                .map(|token| token.parse::<i64>().map_err(|err| parse_error(err.to_string())))
                .collect::<Result<_, _>>()?
        } else {
            trimmed
                .chars()
                .map(|c| {
                    c.to_digit(10)
                        .map(i64::from)
                        .ok_or_else(|| parse_error(format!("unexpected character `{c}`")))
                })
                .collect::<Result<_, _>>()?
        };

        Self::standardize(&entries).map_err(|err| parse_error(err.to_string()))
    }
}

impl Display for Permutation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.values.iter().map(|value| value + 1).join(" "))
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<'a> IntoIterator for &'a Permutation {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl Mul for &Permutation {
    type Output = Permutation;

    /// Functional composition, see [`Permutation::compose`].
    ///
    /// # Panics
    /// The permutations have different lengths.
    fn mul(self, rhs: Self) -> Self::Output {
        assert_eq!(
            self.len(),
            rhs.len(),
            "only permutations of equal length can be composed"
        );

        Permutation::from_vec_unchecked(
            rhs.values
                .iter()
                .map(|&value| self.values[value])
                .collect(),
        )
    }
}

impl Add for &Permutation {
    type Output = Permutation;

    /// Direct sum, see [`Permutation::direct_sum`].
    fn add(self, rhs: Self) -> Self::Output {
        self.direct_sum(rhs)
    }
}

impl Sub for &Permutation {
    type Output = Permutation;

    /// Skew sum, see [`Permutation::skew_sum`].
    fn sub(self, rhs: Self) -> Self::Output {
        self.skew_sum(rhs)
    }
}


#[cfg(test)]
mod test {
    use num::{BigUint, One, ToPrimitive};
    use quickcheck_macros::quickcheck;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use test_log::test;

    use super::{test_util::perm, Permutation, RandomAvoiderOptions};
    use crate::error::Error;

    #[test]
    fn parse_variants() {
        let expected = Permutation::from_vec(vec![2, 4, 0, 1, 3]).unwrap();

        assert_eq!(perm("35124"), expected);
        assert_eq!(perm("3 5 1 2 4"), expected);
        assert_eq!(perm("[3, 5, 1, 2, 4]"), expected);
        assert_eq!(perm("30 50 10 -2 40"), perm("3 5 2 1 4"));
        assert_eq!(perm(""), Permutation::default());
        assert_eq!(Permutation::from_digits(4132).unwrap(), perm("4132"));

        assert!(matches!("3a1".parse::<Permutation>(), Err(Error::Parse { .. })));
        assert!(matches!("1 1".parse::<Permutation>(), Err(Error::Parse { .. })));
    }

    #[test]
    fn standardize() {
        assert_eq!(
            Permutation::standardize(&[215, -99, 30, 12, 0]).unwrap(),
            perm("51432")
        );
        assert_eq!(
            Permutation::standardize(&['c', 'a', 'b']).unwrap(),
            perm("312")
        );
        assert_eq!(
            Permutation::standardize(&[1, 2, 1]),
            Err(Error::DuplicateEntries)
        );
    }

    #[test]
    fn from_vec_validates() {
        assert!(Permutation::from_vec(vec![0, 2, 1]).is_ok());
        assert_eq!(
            Permutation::from_vec(vec![0, 2, 2]),
            Err(Error::NotAPermutation(vec![0, 2, 2]))
        );
        assert!(Permutation::from_vec(vec![1, 2]).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(perm("4132").to_string(), "4 1 3 2");
        assert_eq!(Permutation::default().to_string(), "");
        assert_eq!(Permutation::monotone_decreasing(5).to_string(), "5 4 3 2 1");
    }

    #[test]
    fn apply_and_compose() {
        assert_eq!(perm("4132").apply(2), 2);

        let p = perm("2314");
        let q = perm("4132");
        assert_eq!(p.compose(&q).unwrap(), perm("4213"));
        assert_eq!(&p * &q, perm("4213"));
        assert_eq!(
            p.compose(&perm("21")),
            Err(Error::LengthMismatch { left: 4, right: 2 })
        );
    }

    #[test]
    fn powers() {
        let p = perm("2341");
        assert_eq!(p.pow(0), Permutation::identity(4));
        assert_eq!(p.pow(1), p);
        assert_eq!(p.pow(2), perm("3412"));
        assert_eq!(p.pow(-1), p.inverse());
        assert_eq!(p.order(), BigUint::from(4u32));
        assert_eq!(perm("214365").order(), BigUint::from(2u32));
        assert_eq!(perm("231546").order(), BigUint::from(6u32));
        assert_eq!(Permutation::default().order(), BigUint::one());
    }

    #[test]
    fn order_of_long_prime_cycles() {
        let primes: Vec<usize> = (2..=107usize)
            .filter(|&n| (2..n).all(|divisor| n % divisor != 0))
            .collect();

        let mut values = Vec::new();
        for &prime in &primes {
            let start = values.len();
            values.extend((1..prime).map(|offset| start + offset));
            values.push(start);
        }
        let p = Permutation::from_vec(values).unwrap();
        assert_eq!(p.len(), 1371);

        let product = primes
            .iter()
            .fold(BigUint::one(), |acc, &prime| acc * BigUint::from(prime));
        assert!(product > BigUint::from(u128::MAX));
        assert_eq!(p.order(), product);
    }

    #[test]
    fn cycles() {
        assert_eq!(perm("3142").cycles(), vec![vec![0, 2, 3, 1]]);
        assert_eq!(
            perm("21354").cycles(),
            vec![vec![0, 1], vec![2], vec![3, 4]]
        );
        assert!(perm("21354").is_involution());
        assert!(!perm("3142").is_involution());
        assert_eq!(perm("521436").fixed_points(), vec![1, 3, 5]);
    }

    #[test]
    fn sums() {
        let p = Permutation::monotone_increasing(10);
        assert_eq!(&p + &p, Permutation::monotone_increasing(20));
        let q = Permutation::monotone_decreasing(10);
        assert_eq!(&q - &q, Permutation::monotone_decreasing(20));

        assert_eq!(
            perm("312").direct_sum(&perm("1234")),
            perm("3124567")
        );
        assert_eq!(perm("312").skew_sum(&perm("1234")), perm("7561234"));
    }

    #[test]
    fn sum_decompositions() {
        let p = &(&perm("1") + &perm("312")) + &perm("21");
        assert!(p.sum_decomposable());
        assert_eq!(
            p.sum_decomposition(),
            vec![perm("1"), perm("312"), perm("21")]
        );
        assert!(!p.reverse().sum_decomposable());
        assert!(perm("1").sum_decomposition() == vec![perm("1")]);
        assert!(Permutation::default().sum_decomposition().is_empty());

        let q = &(&perm("12") - &perm("1")) - &perm("213");
        assert!(q.skew_decomposable());
        assert_eq!(
            q.skew_decomposition(),
            vec![perm("12"), perm("1"), perm("213")]
        );
        assert!(!q.complement().skew_decomposable());
    }

    #[test]
    fn delete_and_insert() {
        let p = perm("35214");
        assert_eq!(p.delete_index(2).unwrap(), perm("2413"));
        assert_eq!(p.delete_indices(&[2, 4]).unwrap(), perm("231"));
        assert_eq!(p.delete_values(&[4]).unwrap(), perm("3214"));
        assert_eq!(p.delete_index(2).unwrap(), p.delete_value(1).unwrap());
        assert_eq!(
            p.delete_index(5),
            Err(Error::IndexOutOfRange {
                index: 5,
                length: 5
            })
        );

        assert_eq!(perm("2413").insert(2, 1).unwrap(), perm("35214"));
        assert_eq!(perm("21").insert(2, 2).unwrap(), perm("213"));
        assert!(perm("21").insert(3, 0).is_err());
        assert!(perm("21").insert(0, 3).is_err());
    }

    #[test]
    fn restrict() {
        let p = perm("35214");
        assert_eq!(p.restrict_indices(&[0, 1, 4]).unwrap(), perm("132"));
        assert_eq!(p.restrict_values(&[0, 1, 2]).unwrap(), perm("321"));
        assert!(p.restrict_values(&[7]).is_err());
    }

    #[test]
    fn right_extensions_of_root() {
        let children = Permutation::default().right_extensions(&[0], |_| true);
        assert_eq!(children, vec![(perm("1"), vec![0, 1])]);

        let children = perm("1").right_extensions(&[0, 1], |_| true);
        assert_eq!(
            children,
            vec![(perm("21"), vec![0, 1, 2]), (perm("12"), vec![0, 1, 2])]
        );
    }

    #[test]
    fn right_extensions_propagate_rejections() {
        // appending a new maximum to 12 creates 123
        let children = perm("12").right_extensions(&[0, 1, 2], |child| child != &perm("123"));
        assert_eq!(
            children,
            vec![(perm("231"), vec![0, 1, 2]), (perm("132"), vec![0, 1, 2])]
        );
    }

    #[test]
    fn all_permutations() {
        let all: Vec<Permutation> = Permutation::all(3).collect();
        assert_eq!(
            all,
            vec![
                perm("123"),
                perm("132"),
                perm("213"),
                perm("231"),
                perm("312"),
                perm("321")
            ]
        );
        assert_eq!(Permutation::all(0).count(), 1);
        assert_eq!(Permutation::all(5).count(), 120);
    }

    #[test]
    fn random_permutations() {
        let mut rng = Pcg64::seed_from_u64(7);
        let p = Permutation::random(10, &mut rng);
        assert_eq!(p.len(), 10);

        let basis = vec![perm("123")];
        let avoider = Permutation::random_avoider(
            8,
            &basis,
            RandomAvoiderOptions::default(),
            &mut rng,
        )
        .unwrap();
        assert!(avoider.avoids(&perm("123")));

        let options = RandomAvoiderOptions {
            max_attempts: Some(50),
            ..Default::default()
        };
        assert_eq!(
            Permutation::random_avoider(6, &[perm("1")], options, &mut rng),
            Err(Error::SamplingExhausted(50))
        );
    }

    #[test]
    fn serde_roundtrip_validates() {
        let p = perm("3142");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[2,0,3,1]");
        assert_eq!(serde_json::from_str::<Permutation>(&json).unwrap(), p);
        assert!(serde_json::from_str::<Permutation>("[0,0]").is_err());
    }

    #[quickcheck]
    fn insert_then_delete(p: Permutation, index: usize, value: usize) -> bool {
        let index = index % (p.len() + 1);
        let value = value % (p.len() + 1);

        let inserted = p.insert(index, value).unwrap();
        inserted.delete_index(index).unwrap() == p && inserted[index] == value
    }

    #[quickcheck]
    fn inverse_composes_to_identity(p: Permutation) -> bool {
        p.compose(&p.inverse()).unwrap() == Permutation::identity(p.len())
            && p.pow(p.order().to_i64().unwrap()) == Permutation::identity(p.len())
    }

    #[quickcheck]
    fn decompositions_sum_back(p: Permutation) -> bool {
        let sum = p
            .sum_decomposition()
            .iter()
            .fold(Permutation::default(), |acc, component| &acc + component);
        let skew = p
            .skew_decomposition()
            .iter()
            .fold(Permutation::default(), |acc, component| &acc - component);

        sum == p && skew == p
    }
}
