//! Symmetries of the square acting on permutations

use std::collections::BTreeSet;

use super::Permutation;

/// Generators of the symmetry group of the square,
/// viewed as acting on the plot of a permutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symmetry {
    /// Mirror along the vertical axis
    Reverse,
    /// Mirror along the horizontal axis
    Complement,
    /// Mirror along the main diagonal
    Inverse,
}

impl Permutation {
    /// Return the permutation read from right to left.
    pub fn reverse(&self) -> Self {
        Self::from_vec_unchecked(self.values.iter().rev().copied().collect())
    }

    /// Return the permutation obtained by replacing each value `v` by `n - 1 - v`.
    pub fn complement(&self) -> Self {
        let n = self.len();
        Self::from_vec_unchecked(self.values.iter().map(|value| n - 1 - value).collect())
    }

    /// Return the reverse of the complement (a rotation by 180 degrees).
    pub fn reverse_complement(&self) -> Self {
        let n = self.len();
        Self::from_vec_unchecked(self.values.iter().rev().map(|value| n - 1 - value).collect())
    }

    /// Apply one of the generating symmetries.
    pub fn apply_symmetry(&self, symmetry: Symmetry) -> Self {
        match symmetry {
            Symmetry::Reverse => self.reverse(),
            Symmetry::Complement => self.complement(),
            Symmetry::Inverse => self.inverse(),
        }
    }

    /// Return the images of `self` under all eight symmetries of the square.
    pub fn symmetries(&self) -> BTreeSet<Permutation> {
        let mut result = BTreeSet::from([self.clone()]);

        for symmetry in [Symmetry::Reverse, Symmetry::Complement, Symmetry::Inverse] {
            let images: Vec<Permutation> = result
                .iter()
                .map(|permutation| permutation.apply_symmetry(symmetry))
                .collect();
            result.extend(images);
        }

        result
    }

    /// Return whether `self` is the lexicographically least of its symmetries.
    pub fn is_representative(&self) -> bool {
        self.symmetries().first() == Some(self)
    }
}
