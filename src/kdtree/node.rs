use crate::aabb::Aabb;
use crate::point::Point;

/// A tree node: either a leaf holding a bucket of points or an intermediate
/// holding a split plane and two exclusively owned children.
///
/// Every node carries two bounding boxes. `split_bounds` is the tight box of
/// the points assigned to the node at construction time and drives further
/// subdivision. `internal_bounds` is the box used for query pruning: the
/// root's equals its split bounds, a child's is the parent's internal bounds
/// clipped by the split plane, so sibling internal bounds exactly tile their
/// parent's.
pub struct KdNode<P: Point> {
    pub(crate) split_bounds: Aabb<P::Num>,
    pub(crate) internal_bounds: Aabb<P::Num>,
    pub(crate) kind: NodeKind<P>,
}

pub(crate) enum NodeKind<P: Point> {
    Leaf {
        bucket: Vec<P>,
    },
    Intermediate {
        split_dimension: usize,
        split_location: P::Num,
        left: Box<KdNode<P>>,
        right: Box<KdNode<P>>,
    },
}

impl<P: Point> KdNode<P> {
    /// A root leaf over all input points; split and internal bounds both
    /// equal the enlarged box of the bucket.
    pub(crate) fn root(bucket: Vec<P>, dimensions: usize) -> Self {
        let mut bounds = Aabb::new(dimensions);
        bounds.enlarge_all(&bucket);
        Self {
            split_bounds: bounds.clone(),
            internal_bounds: bounds,
            kind: NodeKind::Leaf { bucket },
        }
    }

    /// A child leaf with tight split bounds recomputed from its bucket and
    /// internal bounds inherited from the parent's split.
    pub(crate) fn child(bucket: Vec<P>, internal_bounds: Aabb<P::Num>) -> Self {
        let mut split_bounds = Aabb::new(internal_bounds.dimensions());
        split_bounds.enlarge_all(&bucket);
        Self {
            split_bounds,
            internal_bounds,
            kind: NodeKind::Leaf { bucket },
        }
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// The points stored directly in this node, or `None` for an
    /// intermediate node.
    pub fn bucket(&self) -> Option<&[P]> {
        match &self.kind {
            NodeKind::Leaf { bucket } => Some(bucket),
            NodeKind::Intermediate { .. } => None,
        }
    }

    /// The dimension this node is split in, or `None` for a leaf.
    pub fn split_dimension(&self) -> Option<usize> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Intermediate {
                split_dimension, ..
            } => Some(*split_dimension),
        }
    }

    /// The position of this node's split plane, or `None` for a leaf.
    pub fn split_location(&self) -> Option<P::Num> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Intermediate { split_location, .. } => Some(*split_location),
        }
    }

    /// The child left of the split plane, or `None` for a leaf.
    pub fn left(&self) -> Option<&KdNode<P>> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Intermediate { left, .. } => Some(left),
        }
    }

    /// The child right of the split plane, or `None` for a leaf.
    pub fn right(&self) -> Option<&KdNode<P>> {
        match &self.kind {
            NodeKind::Leaf { .. } => None,
            NodeKind::Intermediate { right, .. } => Some(right),
        }
    }

    /// The tight bounding box of the points assigned to this node at
    /// construction time.
    pub fn split_bounds(&self) -> &Aabb<P::Num> {
        &self.split_bounds
    }

    /// The bounding box used for query pruning.
    pub fn internal_bounds(&self) -> &Aabb<P::Num> {
        &self.internal_bounds
    }
}
