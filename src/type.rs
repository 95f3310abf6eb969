use std::fmt::Debug;

use num_traits::Float;

/// A trait for types that can be used as point coordinates.
///
/// Coordinates and distances are real-valued: the sorted nearest-neighbor
/// search keys its priority queues by squared Euclidean distance, so the
/// coordinate type must support a square root for the maximum-distance guard.
pub trait CoordFloat: Float + Debug + Send + Sync {}

impl<T: Float + Debug + Send + Sync> CoordFloat for T {}
