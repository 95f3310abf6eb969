//! Axis-aligned bounding boxes and their geometric predicates.

use crate::error::KdIndexError;
use crate::point::Point;
use crate::r#type::CoordFloat;
use crate::Result;

/// Location of an axis-aligned plane relative to a bounding volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanePosition {
    /// The plane lies fully left of the volume in the split dimension.
    LeftOfVolume,
    /// The plane lies fully right of the volume in the split dimension.
    RightOfVolume,
    /// The plane crosses the volume.
    IntersectingVolume,
}

/// An axis-aligned bounding box over `N` dimensions.
///
/// A freshly created box is in a distinguished *empty* state with
/// `lower[i] = N::max_value()` and `upper[i] = N::min_value()`; enlarging it
/// by a first point re-establishes the normal invariant
/// `lower[i] <= upper[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aabb<N: CoordFloat> {
    lower: Vec<N>,
    upper: Vec<N>,
}

impl<N: CoordFloat> Aabb<N> {
    /// Create an empty box in n-dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self {
            lower: vec![N::max_value(); dimensions],
            upper: vec![N::min_value(); dimensions],
        }
    }

    /// Create a box from two corner points.
    ///
    /// The caller guarantees `lower[i] <= upper[i]` for every dimension;
    /// containment and intersection results are undefined otherwise.
    pub fn from_corners<P, Q>(lower: &P, upper: &Q) -> Self
    where
        P: Point<Num = N>,
        Q: Point<Num = N>,
    {
        debug_assert_eq!(lower.dimensions(), upper.dimensions());
        Self {
            lower: (0..lower.dimensions()).map(|dim| lower.coord(dim)).collect(),
            upper: (0..upper.dimensions()).map(|dim| upper.coord(dim)).collect(),
        }
    }

    /// The number of dimensions of this box.
    pub fn dimensions(&self) -> usize {
        self.lower.len()
    }

    /// Test if this box is in the empty state.
    ///
    /// This queries the exact sentinel corners of [`Aabb::new`], not
    /// `lower > upper` in general.
    pub fn is_empty(&self) -> bool {
        self.lower.iter().all(|&c| c == N::max_value())
            && self.upper.iter().all(|&c| c == N::min_value())
    }

    /// Return the box to the empty state.
    pub fn reset(&mut self) {
        self.lower.fill(N::max_value());
        self.upper.fill(N::min_value());
    }

    /// Enlarge the box to contain the given point.
    pub fn enlarge<P: Point<Num = N>>(&mut self, point: &P) {
        debug_assert_eq!(self.dimensions(), point.dimensions());
        for dim in 0..self.dimensions() {
            let c = point.coord(dim);
            if c < self.lower[dim] {
                self.lower[dim] = c;
            }
            if c > self.upper[dim] {
                self.upper[dim] = c;
            }
        }
    }

    /// Enlarge the box to contain all of the given points.
    pub fn enlarge_all<'a, P, I>(&mut self, points: I)
    where
        P: Point<Num = N> + 'a,
        I: IntoIterator<Item = &'a P>,
    {
        for point in points {
            self.enlarge(point);
        }
    }

    /// Split the box into two parts by an axis-aligned plane, given by the
    /// dimension it is orthogonal to and a position on that axis.
    ///
    /// The plane must cross the box's extent in that dimension, else this
    /// fails with [`KdIndexError::PlaneOutsideBounds`]. The two outputs
    /// share the splitting boundary: both halves are closed on the plane,
    /// which is what makes containment over siblings exhaustive.
    pub fn split(&self, dimension: usize, position: N) -> Result<(Self, Self)> {
        if position < self.lower[dimension] || position > self.upper[dimension] {
            return Err(KdIndexError::PlaneOutsideBounds {
                dimension,
                position: position.to_f64().unwrap_or(f64::NAN),
            });
        }
        let mut left = self.clone();
        let mut right = self.clone();
        left.upper[dimension] = position;
        right.lower[dimension] = position;
        Ok((left, right))
    }

    /// Test if the given point is contained in the box. Containment is
    /// closed-interval in every dimension.
    pub fn inside<P: Point<Num = N>>(&self, point: &P) -> bool {
        debug_assert_eq!(self.dimensions(), point.dimensions());
        (0..self.dimensions()).all(|dim| {
            let c = point.coord(dim);
            self.lower[dim] <= c && c <= self.upper[dim]
        })
    }

    /// Test if this box overlaps the given box.
    pub fn intersects(&self, other: &Aabb<N>) -> bool {
        debug_assert_eq!(self.dimensions(), other.dimensions());
        // Per-dimension overlapping interval test, early exit on the first
        // separating axis.
        for dim in 0..self.dimensions() {
            if self.lower[dim] > other.upper[dim] || other.lower[dim] > self.upper[dim] {
                return false;
            }
        }
        true
    }

    /// Locate an axis-aligned plane relative to this box.
    pub fn classify_plane(&self, dimension: usize, position: N) -> PlanePosition {
        if position < self.lower[dimension] {
            PlanePosition::LeftOfVolume
        } else if position > self.upper[dimension] {
            PlanePosition::RightOfVolume
        } else {
            PlanePosition::IntersectingVolume
        }
    }

    /// The point on or in the box closest to the query point, given by a
    /// per-dimension clamp of the query into `[lower, upper]`.
    pub fn closest<P: Point<Num = N>>(&self, query: &P) -> Vec<N> {
        debug_assert_eq!(self.dimensions(), query.dimensions());
        (0..self.dimensions())
            .map(|dim| clamp_coord(query.coord(dim), self.lower[dim], self.upper[dim]))
            .collect()
    }

    /// Squared Euclidean distance from the query point to [`Aabb::closest`],
    /// computed without materializing the closest point.
    ///
    /// This is an exact lower bound on the squared distance to any point
    /// inside the box, which is what drives nearest-neighbor pruning.
    pub fn sq_dist<P: Point<Num = N>>(&self, query: &P) -> N {
        debug_assert_eq!(self.dimensions(), query.dimensions());
        let mut acc = N::zero();
        for dim in 0..self.dimensions() {
            let d = axis_dist(query.coord(dim), self.lower[dim], self.upper[dim]);
            acc = acc + d * d;
        }
        acc
    }

    /// The box's extension in the given dimension.
    pub fn extension(&self, dimension: usize) -> N {
        self.upper[dimension] - self.lower[dimension]
    }

    /// Diagonal of the box as the coordinate difference from the lower to
    /// the upper corner. Computed, not stored.
    pub fn diagonal(&self) -> Vec<N> {
        (0..self.dimensions())
            .map(|dim| self.upper[dim] - self.lower[dim])
            .collect()
    }

    /// Center of the box. Computed, not stored.
    pub fn center(&self) -> Vec<N> {
        let two = N::one() + N::one();
        (0..self.dimensions())
            .map(|dim| self.lower[dim] + (self.upper[dim] - self.lower[dim]) / two)
            .collect()
    }

    /// The lower corner coordinates.
    pub fn lower(&self) -> &[N] {
        &self.lower
    }

    /// The upper corner coordinates.
    pub fn upper(&self) -> &[N] {
        &self.upper
    }

    /// Mutable access to the lower corner coordinates.
    ///
    /// This is a low-level escape hatch: writes bypass the
    /// [`enlarge`](Aabb::enlarge)/[`reset`](Aabb::reset) contracts and can
    /// violate the `lower <= upper` invariant.
    pub fn lower_mut(&mut self) -> &mut [N] {
        &mut self.lower
    }

    /// Mutable access to the upper corner coordinates.
    ///
    /// Same caveats as [`Aabb::lower_mut`].
    pub fn upper_mut(&mut self) -> &mut [N] {
        &mut self.upper
    }
}

#[inline]
fn clamp_coord<N: CoordFloat>(k: N, min: N, max: N) -> N {
    if k < min {
        min
    } else if k > max {
        max
    } else {
        k
    }
}

/// 1D distance from `k` to the interval `[min, max]`, zero inside it.
#[inline]
fn axis_dist<N: CoordFloat>(k: N, min: N, max: N) -> N {
    if k < min {
        min - k
    } else if k > max {
        k - max
    } else {
        N::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_box_is_empty() {
        let a = Aabb::<f64>::new(2);
        assert_eq!(a.dimensions(), 2);
        assert_eq!(a.lower(), &[f64::MAX, f64::MAX]);
        assert_eq!(a.upper(), &[f64::MIN, f64::MIN]);
        assert!(a.is_empty());
    }

    #[test]
    fn corner_writes_leave_the_empty_state() {
        let mut a = Aabb::<f64>::new(20);
        assert!(a.is_empty());
        a.lower_mut()[10] = 1.0;
        assert!(!a.is_empty());
        a.reset();
        assert!(a.is_empty());
    }

    #[test]
    fn enlarge_single() {
        let mut bx = Aabb::new(2);
        bx.enlarge(&[1.0, 2.0]);
        assert!(!bx.is_empty());
        // Degenerate box at the first point.
        assert_eq!(bx.lower(), &[1.0, 2.0]);
        assert_eq!(bx.upper(), &[1.0, 2.0]);
        assert!(bx.inside(&[1.0, 2.0]));

        bx.enlarge(&[-1.0, 4.0]);
        assert_eq!(bx.lower(), &[-1.0, 2.0]);
        assert_eq!(bx.upper(), &[1.0, 4.0]);
    }

    #[test]
    fn enlarged_points_are_inside() {
        let points = [[0.3, -4.0], [2.0, 2.5], [-1.5, 0.0]];
        let mut bx = Aabb::new(2);
        bx.enlarge_all(points.iter());
        for p in &points {
            assert!(bx.inside(p));
        }
    }

    #[test]
    fn diagonal_and_extension() {
        let mut bx = Aabb::new(2);
        bx.enlarge(&[1.0, -2.0]);
        bx.enlarge(&[-1.0, 5.0]);
        assert_eq!(bx.diagonal(), vec![2.0, 7.0]);
        assert_eq!(bx.extension(0), 2.0);
        assert_eq!(bx.extension(1), 7.0);
        assert_eq!(bx.center(), vec![0.0, 1.5]);
    }

    #[test]
    fn split_shares_the_boundary() {
        let bx = Aabb::from_corners(&[-1.0, -1.0], &[1.0, 1.0]);
        let (left, right) = bx.split(1, 0.5).unwrap();

        assert_eq!(left.lower(), &[-1.0, -1.0]);
        assert_eq!(left.upper(), &[1.0, 0.5]);
        assert_eq!(right.lower(), &[-1.0, 0.5]);
        assert_eq!(right.upper(), &[1.0, 1.0]);

        // Both halves are closed on the plane.
        assert!(left.inside(&[0.0, 0.5]));
        assert!(right.inside(&[0.0, 0.5]));
    }

    #[test]
    fn split_outside_the_extent_fails() {
        let bx = Aabb::from_corners(&[-1.0, -1.0], &[1.0, 1.0]);
        let err = bx.split(1, -1.1).unwrap_err();
        assert!(matches!(
            err,
            KdIndexError::PlaneOutsideBounds { dimension: 1, .. }
        ));
    }

    #[test]
    fn classify_plane_positions() {
        let bx = Aabb::from_corners(&[0.0, 0.0], &[2.0, 2.0]);
        assert_eq!(bx.classify_plane(0, -0.5), PlanePosition::LeftOfVolume);
        assert_eq!(bx.classify_plane(0, 2.5), PlanePosition::RightOfVolume);
        assert_eq!(bx.classify_plane(0, 0.0), PlanePosition::IntersectingVolume);
        assert_eq!(bx.classify_plane(1, 1.0), PlanePosition::IntersectingVolume);
    }

    #[test]
    fn intersects_overlapping_and_touching() {
        let a = Aabb::from_corners(&[0.0, 0.0], &[2.0, 2.0]);
        let b = Aabb::from_corners(&[1.0, 1.0], &[3.0, 3.0]);
        let c = Aabb::from_corners(&[2.0, 2.0], &[3.0, 3.0]);
        let d = Aabb::from_corners(&[2.1, 0.0], &[3.0, 1.0]);
        assert!(a.intersects(&b));
        assert!(a.intersects(&c)); // closed intervals: touching counts
        assert!(!a.intersects(&d));
    }

    #[test]
    fn closest_clamps_into_the_box() {
        let bx = Aabb::from_corners(&[0.0, 0.0], &[2.0, 2.0]);
        assert_eq!(bx.closest(&[-1.0, 1.0]), vec![0.0, 1.0]);
        assert_eq!(bx.closest(&[3.0, 3.0]), vec![2.0, 2.0]);
        assert_eq!(bx.closest(&[1.0, 1.0]), vec![1.0, 1.0]);

        assert_eq!(bx.sq_dist(&[-1.0, 1.0]), 1.0);
        assert_eq!(bx.sq_dist(&[3.0, 3.0]), 2.0);
        assert_eq!(bx.sq_dist(&[1.0, 1.0]), 0.0);
    }
}
