//! Unified error handling for the trackalign library.
//!
//! All core functions are pure and fail fast: malformed input is rejected
//! immediately and never silently patched. Undefined per-sample metrics are
//! *not* errors — they are `Option::None` on the sample and excluded from
//! aggregates. Optimizer non-convergence is *not* an error either — it is
//! reported on the estimate via its `converged` flag.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TrackAlignError>;

/// Errors produced by the trackalign core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackAlignError {
    /// The point sequence is empty.
    #[error("track contains no points")]
    EmptyTrack,

    /// The time axis is not strictly increasing. Duplicate timestamps are
    /// rejected rather than overwritten: the policy is reject, not
    /// keep-first.
    #[error("non-monotonic time axis at point {index}: elapsed time must be strictly increasing")]
    NonMonotonicTime { index: usize },

    /// Cumulative distance decreased between consecutive points.
    #[error("non-monotonic distance at point {index}: cumulative distance must not decrease")]
    NonMonotonicDistance { index: usize },

    /// A required sensor extension field is absent on a point.
    #[error("missing required sensor field '{field}' at point {index}")]
    MissingSensorField { index: usize, field: &'static str },

    /// A summary batch mixes activity types.
    #[error("mixed activity types in batch: series {index} is {found:?}, expected {expected:?}")]
    MixedActivityTypes {
        expected: crate::ActivityType,
        found: crate::ActivityType,
        index: usize,
    },

    /// Label count does not match series count.
    #[error("label count ({labels}) does not match series count ({series})")]
    LabelMismatch { labels: usize, series: usize },

    /// A batch operation received no series.
    #[error("batch contains no series")]
    EmptyBatch,

    /// A series is too short or its distance axis is constant, so its
    /// elevation profile cannot be interpolated.
    #[error("degenerate elevation profile for series {index}: {point_count} usable points")]
    DegenerateProfile { index: usize, point_count: usize },
}
