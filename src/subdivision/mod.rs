//! Subdivision policies deciding how a node's bucket is split in two.
//!
//! A policy is composed from three independently swappable strategies: axis
//! selection, split-position selection and plane resolution. The
//! [`SubdivisionPolicy`] connector applies the triad to one leaf node and
//! mutates it into an intermediate node with two new leaf children.

use std::cmp::Ordering;

use num_traits::{Float, One};

use crate::aabb::Aabb;
use crate::error::KdIndexError;
use crate::kdtree::node::NodeKind;
use crate::kdtree::KdNode;
use crate::point::Point;
use crate::Result;

/// Default minimum bucket size of [`SubdivisionPolicy::default`].
const DEFAULT_BUCKET_SIZE: usize = 64;

/// Picks the dimension a node's bucket is split in.
pub trait AxisSelector {
    /// Select the split dimension for the given bucket.
    ///
    /// `depth` is the node's depth in the tree (the root is at zero),
    /// `bounds` the node's tight split bounds.
    fn select<P: Point>(&self, depth: usize, bucket: &[P], bounds: &Aabb<P::Num>) -> usize;
}

/// Picks the split coordinate along a chosen axis.
pub trait PositionSelector {
    /// Select the split position along `axis` for the given bucket.
    fn select<P: Point>(&self, bucket: &[P], axis: usize, bounds: &Aabb<P::Num>) -> P::Num;
}

/// Adjusts a chosen `(axis, position)` pair so the split is non-degenerate.
pub trait PlaneResolver {
    /// Return a position on `axis` that puts at least one bucket point on
    /// each side of the plane (points with `coord <= position` go left), or
    /// fail with [`KdIndexError::UnresolvableSplit`] if no such position
    /// exists.
    fn resolve<P: Point>(&self, bucket: &[P], axis: usize, position: P::Num) -> Result<P::Num>;
}

/// Selects the axis in which the node's split bounds extend the widest.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaximumSpreadAxis;

impl AxisSelector for MaximumSpreadAxis {
    fn select<P: Point>(&self, _depth: usize, _bucket: &[P], bounds: &Aabb<P::Num>) -> usize {
        let mut axis = 0;
        let mut spread = bounds.extension(0);
        for dim in 1..bounds.dimensions() {
            let e = bounds.extension(dim);
            if e > spread {
                axis = dim;
                spread = e;
            }
        }
        axis
    }
}

/// Cycles through the dimensions round-robin by node depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeriodicAxis;

impl AxisSelector for PeriodicAxis {
    fn select<P: Point>(&self, depth: usize, _bucket: &[P], bounds: &Aabb<P::Num>) -> usize {
        depth % bounds.dimensions()
    }
}

/// Splits at the midpoint of the bounding interval on the chosen axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct MidpointPosition;

impl PositionSelector for MidpointPosition {
    fn select<P: Point>(&self, _bucket: &[P], axis: usize, bounds: &Aabb<P::Num>) -> P::Num {
        let two = P::Num::one() + P::Num::one();
        bounds.lower()[axis] + bounds.extension(axis) / two
    }
}

/// Splits at the median coordinate of the bucket on the chosen axis.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianPosition;

impl PositionSelector for MedianPosition {
    fn select<P: Point>(&self, bucket: &[P], axis: usize, _bounds: &Aabb<P::Num>) -> P::Num {
        let mut coords: Vec<P::Num> = bucket.iter().map(|p| p.coord(axis)).collect();
        coords.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        // Lower median, so the closed-left partition rule leaves both sides
        // non-empty whenever the coordinates are not all equal.
        coords[(coords.len() - 1) / 2]
    }
}

/// Slides a degenerate plane to the nearest coordinate that gives both
/// children at least one point.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlidingPlane;

impl PlaneResolver for SlidingPlane {
    fn resolve<P: Point>(&self, bucket: &[P], axis: usize, position: P::Num) -> Result<P::Num> {
        let mut min = P::Num::max_value();
        let mut max = P::Num::min_value();
        for p in bucket {
            let c = p.coord(axis);
            if c < min {
                min = c;
            }
            if c > max {
                max = c;
            }
        }
        if min == max {
            // Every coordinate coincides; no plane separates the bucket.
            return Err(KdIndexError::UnresolvableSplit { dimension: axis });
        }
        if position < min {
            // All points right of the plane: slide right onto the minimum,
            // which moves the minimum points to the left side.
            return Ok(min);
        }
        if position >= max {
            // All points left of the plane: slide left onto the largest
            // coordinate strictly below the maximum.
            let mut below = min;
            for p in bucket {
                let c = p.coord(axis);
                if c > below && c < max {
                    below = c;
                }
            }
            return Ok(below);
        }
        Ok(position)
    }
}

/// The connector composing an axis selector, a position selector and a plane
/// resolver into one subdivision decision.
#[derive(Debug, Clone, Copy)]
pub struct SubdivisionPolicy<A = MaximumSpreadAxis, S = MidpointPosition, R = SlidingPlane> {
    axis: A,
    position: S,
    resolver: R,
    bucket_size: usize,
}

impl SubdivisionPolicy {
    /// The default strategy composition (maximum-spread axis, midpoint
    /// position, sliding plane) with the given minimum bucket size.
    pub fn new(bucket_size: usize) -> Self {
        Self::compose(
            MaximumSpreadAxis,
            MidpointPosition,
            SlidingPlane,
            bucket_size,
        )
    }
}

impl Default for SubdivisionPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET_SIZE)
    }
}

impl<A: AxisSelector, S: PositionSelector, R: PlaneResolver> SubdivisionPolicy<A, S, R> {
    /// Compose a policy from the given strategies and minimum bucket size.
    pub fn compose(axis: A, position: S, resolver: R, bucket_size: usize) -> Self {
        Self {
            axis,
            position,
            resolver,
            bucket_size,
        }
    }

    /// The minimum bucket size: a node is only split while its bucket holds
    /// more points than this.
    pub fn bucket_size(&self) -> usize {
        self.bucket_size
    }

    /// Split the given leaf node's bucket by the resolved plane, mutating
    /// the node in place into an intermediate with two new leaf children.
    ///
    /// Points with `coord[dim] <= position` go left, consistent with the
    /// closed-both-sides [`Aabb::split`]. Fails with
    /// [`KdIndexError::BucketSize`] when the bucket does not exceed the
    /// minimum bucket size (the construction stop condition), with
    /// [`KdIndexError::IntermediateNode`] when the node is already split,
    /// and with [`KdIndexError::UnresolvableSplit`] when the resolver finds
    /// no separating plane. This is the only place node topology changes.
    pub fn split<P: Point>(&self, node: &mut KdNode<P>, depth: usize) -> Result<()> {
        let NodeKind::Leaf { bucket } = &mut node.kind else {
            return Err(KdIndexError::IntermediateNode);
        };
        if bucket.len() <= self.bucket_size {
            return Err(KdIndexError::BucketSize {
                len: bucket.len(),
                bucket_size: self.bucket_size,
            });
        }

        let axis = self.axis.select(depth, bucket, &node.split_bounds);
        let naive = self.position.select(bucket, axis, &node.split_bounds);
        let location = self.resolver.resolve(bucket, axis, naive)?;
        let (left_bounds, right_bounds) = node.internal_bounds.split(axis, location)?;

        let (left_points, right_points): (Vec<P>, Vec<P>) = std::mem::take(bucket)
            .into_iter()
            .partition(|p| p.coord(axis) <= location);

        node.kind = NodeKind::Intermediate {
            split_dimension: axis,
            split_location: location,
            left: Box::new(KdNode::child(left_points, left_bounds)),
            right: Box::new(KdNode::child(right_points, right_bounds)),
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_node(points: Vec<Vec<f64>>, dimensions: usize) -> KdNode<Vec<f64>> {
        KdNode::root(points, dimensions)
    }

    #[test]
    fn bucket_below_threshold_is_not_split() {
        let policy = SubdivisionPolicy::new(10);
        let mut node = leaf_node(
            vec![
                vec![1.0, 1.0],
                vec![2.0, 3.0],
                vec![3.0, 1.0],
                vec![4.0, 1.0],
            ],
            2,
        );
        assert_eq!(
            policy.split(&mut node, 0),
            Err(KdIndexError::BucketSize {
                len: 4,
                bucket_size: 10
            })
        );
        assert!(node.is_leaf());
    }

    #[test]
    fn double_split_fails() {
        let policy = SubdivisionPolicy::new(1);
        let mut node = leaf_node(
            vec![
                vec![1.0, 1.0],
                vec![2.0, 3.0],
                vec![3.0, 1.0],
                vec![4.0, 1.0],
            ],
            2,
        );
        policy.split(&mut node, 0).unwrap();
        assert_eq!(
            policy.split(&mut node, 0),
            Err(KdIndexError::IntermediateNode)
        );
    }

    #[test]
    fn split_one_dimensional() {
        let policy = SubdivisionPolicy::compose(
            MaximumSpreadAxis,
            MidpointPosition,
            SlidingPlane,
            1,
        );
        let mut node = leaf_node(vec![vec![-1.0], vec![1.0], vec![3.0], vec![2.0]], 1);
        policy.split(&mut node, 0).unwrap();

        assert_eq!(node.split_dimension(), Some(0));
        assert_eq!(node.split_location(), Some(1.0));

        let left = node.left().unwrap();
        let right = node.right().unwrap();
        assert_eq!(left.bucket().unwrap(), &[vec![-1.0], vec![1.0]]);
        assert_eq!(right.bucket().unwrap(), &[vec![3.0], vec![2.0]]);

        assert_eq!(left.split_bounds().lower(), &[-1.0]);
        assert_eq!(left.split_bounds().upper(), &[1.0]);
        assert_eq!(right.split_bounds().lower(), &[2.0]);
        assert_eq!(right.split_bounds().upper(), &[3.0]);

        // Internal bounds tile the parent's, sharing the plane.
        assert_eq!(left.internal_bounds().upper(), &[1.0]);
        assert_eq!(right.internal_bounds().lower(), &[1.0]);
    }

    #[test]
    fn split_picks_the_axis_of_maximum_spread() {
        let policy = SubdivisionPolicy::new(1);
        let mut node = leaf_node(
            vec![
                vec![1.0, 1.0],
                vec![1.0, -1.0],
                vec![1.0, 3.0],
                vec![1.0, 2.0],
            ],
            2,
        );
        policy.split(&mut node, 0).unwrap();

        assert_eq!(node.split_dimension(), Some(1));
        assert_eq!(node.split_location(), Some(1.0));

        let left = node.left().unwrap();
        let right = node.right().unwrap();
        assert_eq!(left.bucket().unwrap(), &[vec![1.0, 1.0], vec![1.0, -1.0]]);
        assert_eq!(right.bucket().unwrap(), &[vec![1.0, 3.0], vec![1.0, 2.0]]);

        // Split bounds are recomputed tight from each partition; the right
        // bucket starts at y = 2, not at the plane.
        assert_eq!(left.split_bounds().lower(), &[1.0, -1.0]);
        assert_eq!(left.split_bounds().upper(), &[1.0, 1.0]);
        assert_eq!(right.split_bounds().lower(), &[1.0, 2.0]);
        assert_eq!(right.split_bounds().upper(), &[1.0, 3.0]);

        // Internal bounds clip the parent's at the plane instead.
        assert_eq!(left.internal_bounds().upper(), &[1.0, 1.0]);
        assert_eq!(right.internal_bounds().lower(), &[1.0, 1.0]);
        assert_eq!(right.internal_bounds().upper(), &[1.0, 3.0]);
    }

    #[test]
    fn periodic_axis_cycles_with_depth() {
        let bucket = [vec![0.0, 0.0], vec![1.0, 1.0]];
        let mut bounds = Aabb::new(2);
        bounds.enlarge_all(bucket.iter());
        assert_eq!(PeriodicAxis.select(0, &bucket, &bounds), 0);
        assert_eq!(PeriodicAxis.select(1, &bucket, &bounds), 1);
        assert_eq!(PeriodicAxis.select(2, &bucket, &bounds), 0);
    }

    #[test]
    fn median_position_takes_the_lower_median() {
        let bucket = [vec![3.0], vec![-1.0], vec![2.0], vec![1.0]];
        let mut bounds = Aabb::new(1);
        bounds.enlarge_all(bucket.iter());
        assert_eq!(MedianPosition.select(&bucket, 0, &bounds), 1.0);
    }

    #[test]
    fn sliding_plane_moves_onto_the_bucket() {
        let bucket = [vec![2.0], vec![3.0], vec![5.0]];

        // All points right of the naive plane: slide right onto the minimum.
        assert_eq!(SlidingPlane.resolve(&bucket, 0, 1.0), Ok(2.0));
        // All points left: slide onto the largest coordinate below the
        // maximum, so the maximum points end up right.
        assert_eq!(SlidingPlane.resolve(&bucket, 0, 5.0), Ok(3.0));
        assert_eq!(SlidingPlane.resolve(&bucket, 0, 9.0), Ok(3.0));
        // A plane already inside the spread is kept.
        assert_eq!(SlidingPlane.resolve(&bucket, 0, 2.5), Ok(2.5));
    }

    #[test]
    fn coincident_coordinates_are_unresolvable() {
        let bucket = [vec![4.0, 1.0], vec![4.0, 2.0], vec![4.0, 3.0]];
        assert_eq!(
            SlidingPlane.resolve(&bucket, 0, 4.0),
            Err(KdIndexError::UnresolvableSplit { dimension: 0 })
        );
    }
}
