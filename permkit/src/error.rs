//! Error-handling module for the crate

use thiserror::Error;

/// Error-Collection for all the possible Errors occurring in this crate
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The given entries are not exactly the values `0..n`
    #[error("the sequence {0:?} is not a permutation of 0..{len}", len = .0.len())]
    NotAPermutation(Vec<usize>),
    /// Standardisation requires pairwise distinct entries
    #[error("entries must be pairwise distinct")]
    DuplicateEntries,
    /// A string could not be parsed as a permutation
    #[error("unable to parse permutation `{input}`: {reason}")]
    Parse {
        /// The string that was given
        input: String,
        /// What went wrong
        reason: String,
    },
    /// Position outside of the permutation
    #[error("index {index} is out of range for a permutation of length {length}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Length of the permutation
        length: usize,
    },
    /// Value outside of the permutation
    #[error("value {value} is out of range for a permutation of length {length}")]
    ValueOutOfRange {
        /// The offending value
        value: usize,
        /// Length of the permutation
        length: usize,
    },
    /// Two permutations were expected to have the same length
    #[error("permutations of different lengths ({left} and {right}) cannot be composed")]
    LengthMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },
    /// There are fewer than `rank + 1` permutations of the requested length
    #[error("rank {rank} is out of range for permutations of length {length}")]
    RankOutOfRange {
        /// The requested rank
        rank: u128,
        /// The requested length
        length: usize,
    },
    /// The rank of permutations of this length does not fit into [u128]
    #[error("ranks of permutations of length {0} do not fit into 128 bits")]
    RankOverflow(usize),
    /// Inflation needs one component per entry
    #[error("expected {expected} components for inflation, found {found}")]
    ComponentCountMismatch {
        /// Length of the skeleton
        expected: usize,
        /// Number of given components
        found: usize,
    },
    /// A class was queried beyond the lengths it can describe
    #[error("layer of length {requested} is not available, only {available} layers are known")]
    InvalidClassLength {
        /// The requested length
        requested: usize,
        /// Number of known layers
        available: usize,
    },
    /// A set of permutations skips a length below its longest element
    #[error("no permutations of length {missing}, although the set contains some of length {longest}")]
    MissingLength {
        /// The first length without elements
        missing: usize,
        /// Length of the longest elements
        longest: usize,
    },
    /// Rejection sampling gave up
    #[error("no suitable permutation found after {0} attempts")]
    SamplingExhausted(u64),
}
