//! Fixed-length, index-aligned point sets.

use nebula_shared::Vec3;

/// An ordered set of target positions.
///
/// Index `i` always belongs to particle `i`; the length equals the particle
/// count the set was generated for.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Vec3>,
}

impl PointSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates a set by evaluating `f` for every index in `0..count`.
    pub fn from_fn(count: usize, f: impl FnMut(usize) -> Vec3) -> Self {
        Self {
            points: (0..count).map(f).collect(),
        }
    }

    /// Number of points.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the set holds no points.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at `index`, if in range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Vec3> {
        self.points.get(index).copied()
    }

    /// Iterates over the points in index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Vec3> + '_ {
        self.points.iter().copied()
    }

    /// Borrows the points.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Vec3] {
        &self.points
    }

    /// Flat `x,y,z,x,y,z,...` view of the points.
    #[must_use]
    pub fn as_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Consumes the set, returning the points.
    #[must_use]
    pub fn into_vec(self) -> Vec<Vec3> {
        self.points
    }
}

impl From<Vec<Vec3>> for PointSet {
    fn from(points: Vec<Vec3>) -> Self {
        Self { points }
    }
}

impl std::ops::Index<usize> for PointSet {
    type Output = Vec3;

    fn index(&self, index: usize) -> &Vec3 {
        &self.points[index]
    }
}
