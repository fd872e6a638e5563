//! Bijection between permutations of length `n` and the integers `0..n!`
//!
//! The ranking is the linear-time scheme of Myrvold and Ruskey,
//! which is not the lexicographic ranking.

use super::Permutation;
use crate::error::Error;

/// Return `n!` or [None] if it does not fit into [u128].
fn factorial(n: usize) -> Option<u128> {
    (1..=n).try_fold(1u128, |acc, factor| acc.checked_mul(factor as u128))
}

impl Permutation {
    /// Return the permutation of length `n` with the given rank.
    ///
    /// Inverse of [`Permutation::rank`].
    /// Returns [`Error::RankOutOfRange`] if `rank >= n!`.
    pub fn from_rank(rank: u128, n: usize) -> Result<Self, Error> {
        if factorial(n).is_some_and(|count| rank >= count) {
            return Err(Error::RankOutOfRange { rank, length: n });
        }

        let mut values: Vec<usize> = (0..n).collect();
        let mut remaining = rank;
        for i in (1..=n).rev() {
            // i <= n, so the remainder fits into usize
            #[allow(clippy::cast_possible_truncation)]
            let j = (remaining % i as u128) as usize;
            values.swap(i - 1, j);
            remaining /= i as u128;
        }

        Ok(Self::from_vec_unchecked(values))
    }

    /// Return the rank of this permutation among all permutations of its length.
    ///
    /// Returns [`Error::RankOverflow`] if the permutation is too long
    /// for its rank to fit into [u128].
    pub fn rank(&self) -> Result<u128, Error> {
        let n = self.len();
        if factorial(n).is_none() {
            return Err(Error::RankOverflow(n));
        }

        let mut values = self.values.clone();
        let mut positions = self.positions();

        let mut result = 0u128;
        let mut multiplier = 1u128;
        for i in (0..n).rev() {
            result += values[i] as u128 * multiplier;
            multiplier *= (i + 1) as u128;

            let j = positions[i];
            positions[values[i]] = j;
            positions[i] = i;
            values.swap(i, j);
        }

        Ok(result)
    }
}
