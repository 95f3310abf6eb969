//! Utilities to traverse the tree structure.
//!
//! These lazy sequences exist for external collaborators (rendering split
//! planes, dumping leaf clusters); the query algorithms do their own
//! traversal.

use tinyvec::TinyVec;

use crate::kdtree::node::NodeKind;
use crate::kdtree::KdNode;
use crate::point::Point;

/// Lazy pre-order iterator over all nodes of a tree, created by
/// [`KdTree::nodes`](crate::kdtree::KdTree::nodes).
pub struct Nodes<'a, P: Point> {
    stack: TinyVec<[Option<&'a KdNode<P>>; 33]>,
}

impl<'a, P: Point> Nodes<'a, P> {
    pub(crate) fn new(root: &'a KdNode<P>) -> Self {
        let mut stack = TinyVec::new();
        stack.push(Some(root));
        Self { stack }
    }
}

impl<'a, P: Point> Iterator for Nodes<'a, P> {
    type Item = &'a KdNode<P>;

    fn next(&mut self) -> Option<&'a KdNode<P>> {
        let node = self.stack.pop()??;
        if let NodeKind::Intermediate { left, right, .. } = &node.kind {
            // Left child pops first.
            self.stack.push(Some(right.as_ref()));
            self.stack.push(Some(left.as_ref()));
        }
        Some(node)
    }
}

/// Lazy iterator over all leaves of a tree, created by
/// [`KdTree::leaves`](crate::kdtree::KdTree::leaves).
pub struct Leaves<'a, P: Point> {
    nodes: Nodes<'a, P>,
}

impl<'a, P: Point> Leaves<'a, P> {
    pub(crate) fn new(root: &'a KdNode<P>) -> Self {
        Self {
            nodes: Nodes::new(root),
        }
    }
}

impl<'a, P: Point> Iterator for Leaves<'a, P> {
    type Item = &'a KdNode<P>;

    fn next(&mut self) -> Option<&'a KdNode<P>> {
        self.nodes.by_ref().find(|node| node.is_leaf())
    }
}
