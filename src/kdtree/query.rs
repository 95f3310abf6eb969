use std::slice;

use num_traits::Float;
use tinyvec::TinyVec;

use crate::aabb::{Aabb, PlanePosition};
use crate::kdtree::node::NodeKind;
use crate::kdtree::KdNode;
use crate::point::{sq_dist, Point};
use crate::queue::PriorityQueue;

/// Lazy iterator over all stored points inside a query bounding volume,
/// created by [`KdTree::find_inside_volume`](crate::kdtree::KdTree::find_inside_volume).
///
/// Depth-first traversal with an explicit stack; subtrees fully on one side
/// of the query volume are pruned via the split-plane classification, and
/// every leaf point is tested exactly against the volume.
pub struct InsideVolume<'a, P: Point> {
    volume: Aabb<P::Num>,
    // Inline stack; no heap allocation for shallow trees.
    stack: TinyVec<[Option<&'a KdNode<P>>; 33]>,
    leaf: slice::Iter<'a, P>,
}

impl<'a, P: Point> InsideVolume<'a, P> {
    pub(crate) fn new(root: &'a KdNode<P>, volume: &Aabb<P::Num>) -> Self {
        let mut stack = TinyVec::new();
        // Skip the whole traversal if the volume misses the root bounds.
        if volume.intersects(root.internal_bounds()) {
            stack.push(Some(root));
        }
        Self {
            volume: volume.clone(),
            stack,
            leaf: slice::Iter::default(),
        }
    }
}

impl<'a, P: Point> Iterator for InsideVolume<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        loop {
            // The coarse bounding-box pruning of the descent is
            // conservative; the leaf-level containment test is exact.
            for point in self.leaf.by_ref() {
                if self.volume.inside(point) {
                    return Some(point);
                }
            }

            let node = self.stack.pop()??;
            match &node.kind {
                NodeKind::Leaf { bucket } => self.leaf = bucket.iter(),
                NodeKind::Intermediate {
                    split_dimension,
                    split_location,
                    left,
                    right,
                } => match self.volume.classify_plane(*split_dimension, *split_location) {
                    PlanePosition::LeftOfVolume => self.stack.push(Some(right.as_ref())),
                    PlanePosition::RightOfVolume => self.stack.push(Some(left.as_ref())),
                    PlanePosition::IntersectingVolume => {
                        self.stack.push(Some(right.as_ref()));
                        self.stack.push(Some(left.as_ref()));
                    }
                },
            }
        }
    }
}

/// Lazy iterator over stored points in order of increasing distance to a
/// query position, created by
/// [`KdTree::find_in_sorted_order`](crate::kdtree::KdTree::find_in_sorted_order).
///
/// Best-first branch-and-bound over two priority queues, both keyed by
/// squared distance: candidate subtrees by the squared distance to the
/// closest point of their internal bounds (a lower bound on the distance to
/// anything inside), extracted points by their exact squared distance. A
/// point is emitted once no unexpanded subtree can contain anything closer,
/// which is what makes the output order provably non-decreasing.
pub struct SortedOrder<'a, P: Point> {
    query: Vec<P::Num>,
    max_dist2: P::Num,
    nodes: PriorityQueue<P::Num, &'a KdNode<P>>,
    elements: PriorityQueue<P::Num, &'a P>,
}

impl<'a, P: Point> SortedOrder<'a, P> {
    pub(crate) fn new<Q: Point<Num = P::Num>>(
        root: &'a KdNode<P>,
        query: &Q,
        max_distance: P::Num,
    ) -> Self {
        let query: Vec<P::Num> = (0..query.dimensions()).map(|dim| query.coord(dim)).collect();

        // Cap the squared maximum distance at the representable maximum
        // instead of squaring into overflow.
        let max_dist2 = if max_distance < P::Num::max_value().sqrt() {
            max_distance * max_distance
        } else {
            P::Num::max_value()
        };

        let mut nodes = PriorityQueue::new();
        let bound = root.internal_bounds().sq_dist(&query);
        if bound <= max_dist2 {
            nodes.push(bound, root);
        }
        Self {
            query,
            max_dist2,
            nodes,
            elements: PriorityQueue::new(),
        }
    }

    fn expand(&mut self, node: &'a KdNode<P>) {
        match &node.kind {
            NodeKind::Leaf { bucket } => {
                // Queue every member closer than the allowed maximum.
                for point in bucket {
                    let dist2 = sq_dist(point, &self.query);
                    if dist2 < self.max_dist2 {
                        self.elements.push(dist2, point);
                    }
                }
            }
            NodeKind::Intermediate { left, right, .. } => {
                // Queue children whose lower bound stays within the maximum.
                for child in [&**left, &**right] {
                    let bound = child.internal_bounds().sq_dist(&self.query);
                    if bound <= self.max_dist2 {
                        self.nodes.push(bound, child);
                    }
                }
            }
        }
    }
}

impl<'a, P: Point> Iterator for SortedOrder<'a, P> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        loop {
            let expand_node = match (self.nodes.peek_priority(), self.elements.peek_priority()) {
                (None, None) => return None,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                // On a tie, expanding the node keeps the loop terminating;
                // emission order is unaffected.
                (Some(node_min), Some(element_min)) => node_min <= element_min,
            };
            if expand_node {
                if let Some(node) = self.nodes.pop() {
                    self.expand(node);
                }
            } else {
                return self.elements.pop();
            }
        }
    }
}
