use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KdIndexError {
    /// The requested split plane does not cross the extent of the bounding
    /// box in the split dimension. A caller error; never raised internally.
    #[error("split plane at {position} is outside the box extent in dimension {dimension}")]
    PlaneOutsideBounds {
        /// The dimension the split plane is orthogonal to.
        dimension: usize,
        /// The position of the split plane on that axis.
        position: f64,
    },

    /// Splitting the node would not reduce its bucket below the configured
    /// minimum bucket size. This is the stop condition of the construction
    /// recursion, not a failure.
    #[error("bucket of {len} points does not exceed the minimum bucket size of {bucket_size}")]
    BucketSize {
        /// Number of points in the bucket.
        len: usize,
        /// Configured minimum bucket size of the policy.
        bucket_size: usize,
    },

    /// The node has already been split. Leaf to intermediate is a one-way
    /// transition; a second split indicates a construction bug.
    #[error("node has already been split")]
    IntermediateNode,

    /// No split plane along the chosen axis gives both children at least one
    /// point, i.e. all bucket coordinates on that axis coincide.
    #[error("no valid split plane exists in dimension {dimension}")]
    UnresolvableSplit {
        /// The dimension the resolver gave up on.
        dimension: usize,
    },
}

/// Alias for a `Result` with [`KdIndexError`] as the error type.
pub type Result<T> = std::result::Result<T, KdIndexError>;
