//! An immutable, policy-built kd-tree over generic points.

#![warn(missing_docs)]

mod builder;
mod index;
pub(crate) mod node;
mod query;
mod traversal;

pub use builder::KdTreeBuilder;
pub use index::KdTree;
pub use node::KdNode;
pub use query::{InsideVolume, SortedOrder};
pub use traversal::{Leaves, Nodes};
