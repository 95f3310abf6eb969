use crate::kdtree::node::NodeKind;
use crate::kdtree::{KdNode, KdTree};
use crate::point::Point;
use crate::subdivision::{
    AxisSelector, MaximumSpreadAxis, MidpointPosition, PlaneResolver, PositionSelector,
    SlidingPlane, SubdivisionPolicy,
};

/// A builder to create a [`KdTree`].
///
/// Collects points, then [`finish`](KdTreeBuilder::finish) builds the tree
/// by recursive application of the subdivision policy.
pub struct KdTreeBuilder<P: Point, A = MaximumSpreadAxis, S = MidpointPosition, R = SlidingPlane> {
    dimensions: usize,
    points: Vec<P>,
    policy: SubdivisionPolicy<A, S, R>,
}

impl<P: Point> KdTreeBuilder<P> {
    /// Create a builder over points of the given dimensionality with the
    /// default subdivision policy.
    pub fn new(dimensions: usize) -> Self {
        Self::with_policy(dimensions, SubdivisionPolicy::default())
    }
}

impl<P, A, S, R> KdTreeBuilder<P, A, S, R>
where
    P: Point,
    A: AxisSelector,
    S: PositionSelector,
    R: PlaneResolver,
{
    /// Create a builder with the given subdivision policy.
    pub fn with_policy(dimensions: usize, policy: SubdivisionPolicy<A, S, R>) -> Self {
        assert!(dimensions > 0, "points must have at least one dimension");
        Self {
            dimensions,
            points: Vec::new(),
            policy,
        }
    }

    /// Add a point to the index.
    pub fn add(&mut self, point: P) {
        debug_assert_eq!(point.dimensions(), self.dimensions);
        self.points.push(point);
    }

    /// Add every point of an iterator to the index.
    pub fn extend(&mut self, points: impl IntoIterator<Item = P>) {
        for point in points {
            self.add(point);
        }
    }

    /// Consume this builder, producing a [`KdTree`] ready for queries.
    ///
    /// The root leaf covers all points with its split and internal bounds
    /// both equal to their enlarged box; the policy is then applied
    /// depth-first until every remaining leaf reports its stop condition.
    /// Zero points produce a single empty leaf with empty bounds.
    pub fn finish(self) -> KdTree<P> {
        let len = self.points.len();
        let mut root = KdNode::root(self.points, self.dimensions);
        subdivide(&mut root, 0, &self.policy);
        KdTree {
            root,
            dimensions: self.dimensions,
            len,
        }
    }
}

fn subdivide<P, A, S, R>(node: &mut KdNode<P>, depth: usize, policy: &SubdivisionPolicy<A, S, R>)
where
    P: Point,
    A: AxisSelector,
    S: PositionSelector,
    R: PlaneResolver,
{
    // BucketSize and UnresolvableSplit end the recursion for this node; a
    // split of a freshly built leaf cannot fail any other way.
    if policy.split(node, depth).is_err() {
        return;
    }
    if let NodeKind::Intermediate { left, right, .. } = &mut node.kind {
        subdivide(left.as_mut(), depth + 1, policy);
        subdivide(right.as_mut(), depth + 1, policy);
    }
}
