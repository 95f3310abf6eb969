use crate::aabb::Aabb;
use crate::kdtree::node::NodeKind;
use crate::kdtree::query::{InsideVolume, SortedOrder};
use crate::kdtree::traversal::{Leaves, Nodes};
use crate::kdtree::{KdNode, KdTreeBuilder};
use crate::point::{coords_equal, Point};
use crate::subdivision::{AxisSelector, PlaneResolver, PositionSelector, SubdivisionPolicy};

/// An immutable kd-tree over points of type `P`.
///
/// Usually created via [`KdTree::builder`]. The tree exclusively owns its
/// nodes and is never mutated after construction; queries borrow it
/// read-only, so any number of concurrent queries against the same tree are
/// safe.
pub struct KdTree<P: Point> {
    pub(crate) root: KdNode<P>,
    pub(crate) dimensions: usize,
    pub(crate) len: usize,
}

impl<P: Point> KdTree<P> {
    /// Start building a tree over points of the given dimensionality with
    /// the default subdivision policy.
    pub fn builder(dimensions: usize) -> KdTreeBuilder<P> {
        KdTreeBuilder::new(dimensions)
    }

    /// Start building a tree with the given subdivision policy.
    pub fn builder_with_policy<A, S, R>(
        dimensions: usize,
        policy: SubdivisionPolicy<A, S, R>,
    ) -> KdTreeBuilder<P, A, S, R>
    where
        A: AxisSelector,
        S: PositionSelector,
        R: PlaneResolver,
    {
        KdTreeBuilder::with_policy(dimensions, policy)
    }

    /// The number of dimensions of the indexed points.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The number of points stored in this tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Test if this tree stores no points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The root node, for manual traversal.
    pub fn root(&self) -> &KdNode<P> {
        &self.root
    }

    /// Find the leaf closest to the given position.
    ///
    /// This descends by the split planes only and therefore finds the
    /// closest leaf even when the position lies outside of the root bounds.
    pub fn closest_leaf<Q: Point<Num = P::Num>>(&self, query: &Q) -> &KdNode<P> {
        let mut node = &self.root;
        loop {
            match &node.kind {
                NodeKind::Leaf { .. } => return node,
                NodeKind::Intermediate {
                    split_dimension,
                    split_location,
                    left,
                    right,
                } => {
                    // On the plane routes left, matching the partition rule.
                    node = if query.coord(*split_dimension) <= *split_location {
                        left.as_ref()
                    } else {
                        right.as_ref()
                    };
                }
            }
        }
    }

    /// Find the stored element at the given position.
    ///
    /// This is an exact, tolerance-free search: the first element equal to
    /// the query in every coordinate is returned. Near-duplicates in other
    /// leaves are not found; pre-snap coordinates or use
    /// [`find_inside_volume`](KdTree::find_inside_volume) when a tolerance
    /// is needed.
    ///
    /// ```
    /// use kd_index::kdtree::KdTree;
    ///
    /// let mut builder = KdTree::builder(2);
    /// builder.add([1.0, 1.0]);
    /// builder.add([2.0, 2.0]);
    /// let tree = builder.finish();
    ///
    /// assert_eq!(tree.find(&[2.0, 2.0]), Some(&[2.0, 2.0]));
    /// assert_eq!(tree.find(&[2.0, 2.1]), None);
    /// ```
    pub fn find<Q: Point<Num = P::Num>>(&self, query: &Q) -> Option<&P> {
        // If the position is not within root bounds we can exit early.
        if !self.root.internal_bounds.inside(query) {
            return None;
        }
        // As the position is within root bounds, the closest leaf is the
        // smallest room that can contain it.
        let leaf = self.closest_leaf(query);
        leaf.bucket()
            .and_then(|bucket| bucket.iter().find(|p| coords_equal(*p, query)))
    }

    /// Find all stored points inside the given bounding volume.
    ///
    /// The returned iterator is lazy and restartable per call; emission
    /// order is traversal order and unspecified.
    ///
    /// ```
    /// use kd_index::aabb::Aabb;
    /// use kd_index::kdtree::KdTree;
    ///
    /// let mut builder = KdTree::builder(2);
    /// builder.extend([[-1.0, -1.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
    /// let tree = builder.finish();
    ///
    /// let volume = Aabb::from_corners(&[0.5, 0.5], &[2.5, 2.5]);
    /// assert_eq!(tree.find_inside_volume(&volume).count(), 2);
    /// ```
    pub fn find_inside_volume(&self, volume: &Aabb<P::Num>) -> InsideVolume<'_, P> {
        InsideVolume::new(&self.root, volume)
    }

    /// Find stored points in order of increasing distance to the query
    /// position, truncated at a maximum distance.
    ///
    /// The returned iterator is lazy and restartable per call and yields
    /// points in non-decreasing distance order; points farther than
    /// `max_distance` are never enumerated.
    ///
    /// ```
    /// use kd_index::kdtree::KdTree;
    ///
    /// let mut builder = KdTree::builder(2);
    /// builder.extend([[-1.0, -1.0], [0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]);
    /// let tree = builder.finish();
    ///
    /// let near: Vec<_> = tree.find_in_sorted_order(&[-1.0, -1.0], 1.5).collect();
    /// assert_eq!(near, vec![&[-1.0, -1.0], &[0.0, 0.0]]);
    /// ```
    pub fn find_in_sorted_order<Q: Point<Num = P::Num>>(
        &self,
        query: &Q,
        max_distance: P::Num,
    ) -> SortedOrder<'_, P> {
        SortedOrder::new(&self.root, query, max_distance)
    }

    /// All leaves of the tree as a lazy sequence.
    pub fn leaves(&self) -> Leaves<'_, P> {
        Leaves::new(&self.root)
    }

    /// All nodes of the tree in pre-order as a lazy sequence.
    pub fn nodes(&self) -> Nodes<'_, P> {
        Nodes::new(&self.root)
    }
}
