//! This crate is a workshop for permutation patterns.
//! It provides [`Permutation`][permutation::Permutation] together with the
//! pattern order on permutations, finite sets of permutations,
//! and permutation classes that are generated length by length.
//!
//! All indices and values are 0-based internally.
//! Textual one-line notation is 1-based.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod class;
pub mod error;
pub mod meta;
pub mod permset;
pub mod permutation;

pub use class::{AvClass, HereditaryClass, PermClass, PermutationClass};
pub use error::Error;
pub use permset::PermSet;
pub use permutation::Permutation;
