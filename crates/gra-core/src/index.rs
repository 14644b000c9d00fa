//! Multi-indices and level assignment
//!
//! Provides [`MultiIndex`], the key type of a [`MultiverseState`](crate::MultiverseState),
//! and the [`LevelAssignment`] strategy that maps a key to its abstraction level.

use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter};

/// Hierarchical key of one state component
///
/// An ordered tuple of non-negative integers. Most keys are short, so the
/// components live inline up to four entries.
///
/// # Examples
/// - `(0,)` is a single local component
/// - `(2, 0)` is candidate 2 at level 0
/// - `(0, 1)` is the meta node at level 1
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MultiIndex(SmallVec<[u32; 4]>);

impl MultiIndex {
    /// Create index from components
    #[inline]
    #[must_use]
    pub fn new(components: impl IntoIterator<Item = u32>) -> Self {
        Self(components.into_iter().collect())
    }

    /// Get index components
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[u32] {
        &self.0
    }

    /// Get number of components
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if index has no components
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get last component
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<u32> {
        self.0.last().copied()
    }

    /// Get first component
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<u32> {
        self.0.first().copied()
    }

    /// Append a component, returning new index
    #[inline]
    #[must_use]
    pub fn child(&self, component: u32) -> Self {
        let mut new = self.clone();
        new.0.push(component);
        new
    }

    /// Iterator over components
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }
}

impl Display for MultiIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{c}")?;
        }
        f.write_str(")")
    }
}

impl<const N: usize> From<[u32; N]> for MultiIndex {
    fn from(components: [u32; N]) -> Self {
        Self::new(components)
    }
}

impl From<&[u32]> for MultiIndex {
    fn from(components: &[u32]) -> Self {
        Self(SmallVec::from_slice(components))
    }
}

impl From<Vec<u32>> for MultiIndex {
    fn from(components: Vec<u32>) -> Self {
        Self(SmallVec::from_vec(components))
    }
}

/// Strategy deriving the abstraction level of a multi-index
///
/// Must be total over every key present in a state, and must be supplied
/// consistently between state construction and functional evaluation.
/// Closures `Fn(&MultiIndex) -> u32` implement it directly.
pub trait LevelAssignment: Send + Sync {
    /// Level of the given key
    fn level_of(&self, index: &MultiIndex) -> u32;
}

impl<F> LevelAssignment for F
where
    F: Fn(&MultiIndex) -> u32 + Send + Sync,
{
    #[inline]
    fn level_of(&self, index: &MultiIndex) -> u32 {
        self(index)
    }
}

/// Level is the last component; the empty index sits at level 0
///
/// This is the default assignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingComponent;

impl LevelAssignment for TrailingComponent {
    #[inline]
    fn level_of(&self, index: &MultiIndex) -> u32 {
        index.last().unwrap_or(0)
    }
}

/// Level is the tuple length minus one
#[derive(Debug, Clone, Copy, Default)]
pub struct DepthLevel;

impl LevelAssignment for DepthLevel {
    #[inline]
    fn level_of(&self, index: &MultiIndex) -> u32 {
        u32::try_from(index.len().saturating_sub(1)).unwrap_or(u32::MAX)
    }
}

/// Every key sits at the same level
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantLevel(pub u32);

impl LevelAssignment for ConstantLevel {
    #[inline]
    fn level_of(&self, _index: &MultiIndex) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_tuple_form() {
        assert_eq!(MultiIndex::from([0, 1]).to_string(), "(0, 1)");
        assert_eq!(MultiIndex::from([7]).to_string(), "(7)");
        assert_eq!(MultiIndex::new([]).to_string(), "()");
    }

    #[test]
    fn conversions_agree() {
        let a = MultiIndex::from([1, 2, 3]);
        let b = MultiIndex::from(vec![1, 2, 3]);
        let c = MultiIndex::from(&[1u32, 2, 3][..]);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.components(), &[1, 2, 3]);
    }

    #[test]
    fn child_appends() {
        let root = MultiIndex::from([4]);
        let child = root.child(1);
        assert_eq!(child.components(), &[4, 1]);
        assert_eq!(root.len(), 1);
    }

    #[test]
    fn trailing_component_level() {
        assert_eq!(TrailingComponent.level_of(&MultiIndex::from([5, 2])), 2);
        assert_eq!(TrailingComponent.level_of(&MultiIndex::new([])), 0);
    }

    #[test]
    fn depth_level() {
        assert_eq!(DepthLevel.level_of(&MultiIndex::from([5])), 0);
        assert_eq!(DepthLevel.level_of(&MultiIndex::from([5, 9, 9])), 2);
        assert_eq!(DepthLevel.level_of(&MultiIndex::new([])), 0);
    }

    #[test]
    fn closure_is_assignment() {
        let first = |index: &MultiIndex| index.first().unwrap_or(0);
        assert_eq!(first.level_of(&MultiIndex::from([3, 0])), 3);
        assert_eq!(ConstantLevel(4).level_of(&MultiIndex::from([1])), 4);
    }
}
