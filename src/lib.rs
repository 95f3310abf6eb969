#![doc = include_str!("../README.md")]

pub mod aabb;
mod error;
pub mod kdtree;
pub mod point;
pub mod queue;
pub mod subdivision;
mod r#type;

pub use error::{KdIndexError, Result};
pub use r#type::CoordFloat;

#[cfg(test)]
pub(crate) mod test;
