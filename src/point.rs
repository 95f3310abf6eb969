//! The point capability the tree is generic over.

use num_traits::Zero;

use crate::r#type::CoordFloat;

/// A value with a fixed dimensionality and indexed coordinate access.
///
/// The tree stores points by value; anything `Clone` that can expose its
/// coordinates can be indexed. Implementations are provided for `[N; D]` and
/// `Vec<N>`; implement the trait directly for payload types that carry more
/// than their coordinates.
pub trait Point: Clone {
    /// The coordinate type.
    type Num: CoordFloat;

    /// The number of dimensions of this point. Must be greater than zero and
    /// stable over the lifetime of the value.
    fn dimensions(&self) -> usize;

    /// Read the coordinate in the given dimension.
    fn coord(&self, dim: usize) -> Self::Num;

    /// Write the coordinate in the given dimension.
    fn set_coord(&mut self, dim: usize, value: Self::Num);
}

impl<N: CoordFloat, const D: usize> Point for [N; D] {
    type Num = N;

    fn dimensions(&self) -> usize {
        D
    }

    fn coord(&self, dim: usize) -> N {
        self[dim]
    }

    fn set_coord(&mut self, dim: usize, value: N) {
        self[dim] = value;
    }
}

impl<N: CoordFloat> Point for Vec<N> {
    type Num = N;

    fn dimensions(&self) -> usize {
        self.len()
    }

    fn coord(&self, dim: usize) -> N {
        self[dim]
    }

    fn set_coord(&mut self, dim: usize, value: N) {
        self[dim] = value;
    }
}

/// Squared Euclidean distance between two points of equal dimensionality.
#[inline]
pub fn sq_dist<A, B>(a: &A, b: &B) -> A::Num
where
    A: Point,
    B: Point<Num = A::Num>,
{
    debug_assert_eq!(a.dimensions(), b.dimensions());
    let mut acc = A::Num::zero();
    for dim in 0..a.dimensions() {
        let d = a.coord(dim) - b.coord(dim);
        acc = acc + d * d;
    }
    acc
}

/// Exact per-coordinate equality of two points.
///
/// This is deliberately tolerance-free; points of different dimensionality
/// are never equal.
#[inline]
pub fn coords_equal<A, B>(a: &A, b: &B) -> bool
where
    A: Point,
    B: Point<Num = A::Num>,
{
    a.dimensions() == b.dimensions()
        && (0..a.dimensions()).all(|dim| a.coord(dim) == b.coord(dim))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_and_vec_points_interoperate() {
        let a = [1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(coords_equal(&a, &b));
        assert_eq!(sq_dist(&a, &b), 0.0);

        let c = vec![4.0, 6.0, 3.0];
        assert!(!coords_equal(&a, &c));
        assert_eq!(sq_dist(&a, &c), 25.0);
    }

    #[test]
    fn dimension_mismatch_is_never_equal() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 0.0];
        assert!(!coords_equal(&a, &b));
    }

    #[test]
    fn set_coord_writes_through() {
        let mut p = [0.0f64; 2];
        p.set_coord(1, 7.0);
        assert_eq!(p.coord(1), 7.0);
    }
}
