//! Permutation classes, generated one length at a time
//!
//! A permutation class is a set of permutations that is closed under taking patterns.
//! Classes store their elements as layers, where the `n`-th layer
//! holds the elements of length `n`.

use std::fmt::{self, Debug, Display};

use itertools::Itertools;

use crate::{
    error::Error,
    permset::PermSet,
    permutation::{PatternMatcher, Permutation, Symmetry},
};

/// Common interface of permutation classes
pub trait PermutationClass {
    /// Return whether `permutation` belongs to the class.
    fn contains(&self, permutation: &Permutation) -> bool;

    /// Return the layers that have been generated so far.
    fn layers(&self) -> &[PermSet];

    /// Append a layer computed by [`PermutationClass::next_layer`].
    fn store_layer(&mut self, layer: PermSet);

    /// Compute the layer following the last generated one.
    ///
    /// The default implementation inserts one entry into every element
    /// of the last layer in every possible way and keeps what the class contains.
    fn next_layer(&mut self) -> PermSet {
        match self.layers().last() {
            None => [Permutation::default()]
                .into_iter()
                .filter(|empty| self.contains(empty))
                .collect(),
            Some(last) => last
                .covered_by()
                .into_iter()
                .filter(|candidate| self.contains(candidate))
                .collect(),
        }
    }

    /// Generate the next layer and return its size.
    fn extend_by_one(&mut self) -> usize {
        let layer = self.next_layer();
        let size = layer.len();
        log::debug!(
            "generated layer {} with {size} permutations",
            self.layers().len()
        );

        self.store_layer(layer);
        size
    }

    /// Generate all layers up to `length`.
    fn extend_to(&mut self, length: usize) {
        while self.layers().len() <= length {
            self.extend_by_one();
        }
    }

    /// Return the elements of length `length`, generating them if necessary.
    fn layer(&mut self, length: usize) -> &PermSet {
        self.extend_to(length);
        &self.layers()[length]
    }

    /// Return the elements of length `length` if they have already been generated.
    fn known_layer(&self, length: usize) -> Result<&PermSet, Error> {
        self.layers()
            .get(length)
            .ok_or_else(|| Error::InvalidClassLength {
                requested: length,
                available: self.layers().len(),
            })
    }

    /// Return the number of elements of each length from `0` to `up_to`.
    fn enumeration(&mut self, up_to: usize) -> Vec<usize> {
        self.extend_to(up_to);
        self.layers()[..=up_to].iter().map(PermSet::len).collect()
    }

    /// Return all elements of length at most `max_length`.
    fn elements_up_to(&mut self, max_length: usize) -> PermSet {
        self.extend_to(max_length);
        self.layers()[..=max_length]
            .iter()
            .flat_map(|layer| layer.iter().cloned())
            .collect()
    }

    /// Return the basis elements of length at most `max_length`,
    /// computed from the generated layers.
    fn guess_basis(&mut self, max_length: usize) -> PermSet {
        self.elements_up_to(max_length).guess_basis(max_length)
    }

    /// Return whether the elements of length at most `max_length`
    /// are closed under taking patterns.
    fn is_downset_up_to(&mut self, max_length: usize) -> bool {
        self.elements_up_to(max_length).is_downset()
    }
}

/// A node in the generating tree of a class
///
/// Children are obtained by appending a new last entry
/// with one of the `insertion_values`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    permutation: Permutation,
    insertion_values: Vec<usize>,
}

impl ClassNode {
    /// The root of every generating tree, the empty permutation.
    pub fn root() -> Self {
        Self {
            permutation: Permutation::default(),
            insertion_values: vec![0],
        }
    }

    /// Return the permutation at this node.
    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Return the values that may be appended to the permutation at this node.
    pub fn insertion_values(&self) -> &[usize] {
        &self.insertion_values
    }

    /// Return the children accepted by `test`.
    pub fn children<F>(&self, test: F) -> Vec<ClassNode>
    where
        F: FnMut(&Permutation) -> bool,
    {
        self.permutation
            .right_extensions(&self.insertion_values, test)
            .into_iter()
            .map(|(permutation, insertion_values)| ClassNode {
                permutation,
                insertion_values,
            })
            .collect()
    }
}

/// The deepest level of a generating tree
#[derive(Debug, Clone, Default)]
struct Frontier {
    nodes: Vec<ClassNode>,
}

impl Frontier {
    /// Compute the first layer, which is either empty or holds the empty permutation.
    fn start(&mut self, contains_empty: bool) -> PermSet {
        self.nodes.clear();

        if contains_empty {
            self.nodes.push(ClassNode::root());
        }

        self.layer()
    }

    /// Replace the nodes by their children and return the new layer.
    fn advance<F>(&mut self, mut test: F) -> PermSet
    where
        F: FnMut(&Permutation) -> bool,
    {
        self.nodes = self
            .nodes
            .iter()
            .flat_map(|node| node.children(&mut test))
            .collect();

        self.layer()
    }

    fn layer(&self) -> PermSet {
        self.nodes
            .iter()
            .map(|node| node.permutation.clone())
            .collect()
    }
}

/// The class of permutations avoiding every element of a basis
#[derive(Debug, Clone)]
pub struct AvClass {
    basis: PermSet,
    matchers: Vec<PatternMatcher>,
    layers: Vec<PermSet>,
    frontier: Frontier,
}

impl AvClass {
    /// Create the class avoiding every permutation in `basis`.
    ///
    /// Elements of `basis` that contain other elements are dropped.
    pub fn new<I>(basis: I) -> Self
    where
        I: IntoIterator<Item = Permutation>,
    {
        let basis = basis.into_iter().collect::<PermSet>().minimal_elements();
        let matchers: Vec<PatternMatcher> = basis
            .sorted()
            .into_iter()
            .map(PatternMatcher::new)
            .collect();

        Self {
            basis,
            matchers,
            layers: Vec::new(),
            frontier: Frontier::default(),
        }
    }

    /// Return the basis of the class.
    pub fn basis(&self) -> &PermSet {
        &self.basis
    }

    /// Return the image of the class under `symmetry`.
    pub fn symmetric_class(&self, symmetry: Symmetry) -> AvClass {
        AvClass::new(
            self.basis
                .iter()
                .map(|permutation| permutation.apply_symmetry(symmetry)),
        )
    }
}

impl PermutationClass for AvClass {
    fn contains(&self, permutation: &Permutation) -> bool {
        !self
            .matchers
            .iter()
            .any(|matcher| matcher.occurs_in(permutation))
    }

    fn layers(&self) -> &[PermSet] {
        &self.layers
    }

    fn store_layer(&mut self, layer: PermSet) {
        self.layers.push(layer);
    }

    fn next_layer(&mut self) -> PermSet {
        if self.layers.is_empty() {
            let contains_empty = self.contains(&Permutation::default());
            return self.frontier.start(contains_empty);
        }

        // parents avoid the basis, so only occurrences using the new entry matter
        let matchers = &self.matchers;
        self.frontier.advance(|child| {
            !matchers
                .iter()
                .any(|matcher| matcher.occurs_in_with_suffix(child, 1))
        })
    }
}

impl Display for AvClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Av({})", self.basis.sorted().iter().join(", "))
    }
}

/// A class given by a property that is inherited by all patterns
pub struct HereditaryClass<F> {
    property: F,
    layers: Vec<PermSet>,
    frontier: Frontier,
}

impl<F> HereditaryClass<F>
where
    F: Fn(&Permutation) -> bool,
{
    /// Create the class of permutations having `property`.
    ///
    /// The caller guarantees that every pattern of a permutation
    /// with the property has the property as well.
    pub fn new(property: F) -> Self {
        Self {
            property,
            layers: Vec::new(),
            frontier: Frontier::default(),
        }
    }
}

impl<F> Debug for HereditaryClass<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HereditaryClass")
            .field("layers", &self.layers.len())
            .finish_non_exhaustive()
    }
}

impl<F> PermutationClass for HereditaryClass<F>
where
    F: Fn(&Permutation) -> bool,
{
    fn contains(&self, permutation: &Permutation) -> bool {
        (self.property)(permutation)
    }

    fn layers(&self) -> &[PermSet] {
        &self.layers
    }

    fn store_layer(&mut self, layer: PermSet) {
        self.layers.push(layer);
    }

    fn next_layer(&mut self) -> PermSet {
        if self.layers.is_empty() {
            let contains_empty = self.contains(&Permutation::default());
            return self.frontier.start(contains_empty);
        }

        let property = &self.property;
        self.frontier.advance(property)
    }
}

/// A class given by explicit lists of its elements
#[derive(Debug, Clone, Default)]
pub struct PermClass {
    layers: Vec<PermSet>,
}

impl PermClass {
    /// Create a class whose `n`-th layer is `layers[n]`.
    ///
    /// Further layers are the largest ones that keep the class closed under patterns.
    pub fn from_layers(layers: Vec<PermSet>) -> Self {
        Self { layers }
    }

    /// Create a class from the elements of `permutations`,
    /// which have to include every length from `0` to their maximal length.
    pub fn from_set(permutations: &PermSet) -> Result<Self, Error> {
        let mut by_length = permutations.by_length();
        let Some(&longest) = by_length.keys().next_back() else {
            return Ok(Self::default());
        };

        let layers = (0..=longest)
            .map(|length| {
                by_length.remove(&length).ok_or(Error::MissingLength {
                    missing: length,
                    longest,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self::from_layers(layers))
    }
}

impl PermutationClass for PermClass {
    /// Elements longer than the generated layers are never contained.
    fn contains(&self, permutation: &Permutation) -> bool {
        self.layers
            .get(permutation.len())
            .is_some_and(|layer| layer.contains(permutation))
    }

    fn layers(&self) -> &[PermSet] {
        &self.layers
    }

    fn store_layer(&mut self, layer: PermSet) {
        self.layers.push(layer);
    }

    fn next_layer(&mut self) -> PermSet {
        let Some(last) = self.layers.last() else {
            return PermSet::from_iter([Permutation::default()]);
        };

        last.covered_by()
            .into_iter()
            .filter(|candidate| candidate.covers().iter().all(|cover| last.contains(cover)))
            .collect()
    }
}
