//! Multiverse state container
//!
//! Provides [`MultiverseState`], the mapping `Ψ = {ψ_a}` from multi-index to
//! complex vector. Each vector is an independent owned buffer, so a copy
//! never shares storage with its source.

use crate::error::{MultiverseError, Result};
use crate::index::{LevelAssignment, MultiIndex};
use crate::linalg::ComplexVector;
use indexmap::IndexMap;
use num_complex::Complex64;

/// Container for all state components
///
/// Keys are unique. Iteration follows insertion order, which keeps every
/// summation over the state deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiverseState {
    components: IndexMap<MultiIndex, ComplexVector>,
}

impl MultiverseState {
    /// Create empty state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Independent deep copy
    ///
    /// Every vector is duplicated; mutating the copy never affects `self`.
    #[inline]
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            components: self
                .components
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// With component (builder form of [`set`](Self::set))
    #[inline]
    #[must_use]
    pub fn with_component(mut self, key: impl Into<MultiIndex>, vector: ComplexVector) -> Self {
        self.set(key, vector);
        self
    }

    /// Multi-indices currently present
    #[inline]
    pub fn keys(&self) -> impl Iterator<Item = &MultiIndex> + '_ {
        self.components.keys()
    }

    /// Read the vector at `key`
    ///
    /// # Errors
    /// Returns [`MultiverseError::KeyNotFound`] if `key` is absent
    #[inline]
    pub fn get(&self, key: &MultiIndex) -> Result<&[Complex64]> {
        self.components
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| MultiverseError::KeyNotFound(key.clone()))
    }

    /// Mutable access to the vector at `key`
    ///
    /// # Errors
    /// Returns [`MultiverseError::KeyNotFound`] if `key` is absent
    #[inline]
    pub fn get_mut(&mut self, key: &MultiIndex) -> Result<&mut ComplexVector> {
        self.components
            .get_mut(key)
            .ok_or_else(|| MultiverseError::KeyNotFound(key.clone()))
    }

    /// Replace (or insert) the vector at `key`
    ///
    /// Other entries are untouched. Returns the previous vector, if any.
    #[inline]
    pub fn set(&mut self, key: impl Into<MultiIndex>, vector: ComplexVector) -> Option<ComplexVector> {
        self.components.insert(key.into(), vector)
    }

    /// Check if key is present
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: &MultiIndex) -> bool {
        self.components.contains_key(key)
    }

    /// Number of components
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if state has no components
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Sum of all vector lengths
    #[inline]
    #[must_use]
    pub fn total_dimension(&self) -> usize {
        self.components.values().map(Vec::len).sum()
    }

    /// Iterate over `(key, vector)` pairs
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&MultiIndex, &[Complex64])> + '_ {
        self.components.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Keys whose derived level equals `level`, in insertion order
    #[must_use]
    pub fn keys_at_level(&self, assignment: &dyn LevelAssignment, level: u32) -> Vec<&MultiIndex> {
        self.components
            .keys()
            .filter(|k| assignment.level_of(k) == level)
            .collect()
    }

    /// Mutable vector by iteration position
    #[inline]
    pub(crate) fn vector_at_mut(&mut self, position: usize) -> Option<&mut ComplexVector> {
        self.components.get_index_mut(position).map(|(_, v)| v)
    }
}

impl<K: Into<MultiIndex>> FromIterator<(K, ComplexVector)> for MultiverseState {
    fn from_iter<I: IntoIterator<Item = (K, ComplexVector)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
