//! # Trackalign
//!
//! Derived metrics and elevation-profile alignment for GPS activity tracks.
//!
//! This library provides:
//! - Metric derivation from raw GPS/sensor points (distance, speed, slope,
//!   pace, cadence with anomaly suppression)
//! - Per-activity summary statistics (totals, averages, maxima)
//! - Elevation-profile alignment: the distance-axis offset that best
//!   superimposes one activity's elevation curve onto a reference
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch alignment with rayon
//! - **`synthetic`** - Enable the synthetic track generator for benchmarks
//!
//! ## Quick Start
//!
//! ```rust
//! use trackalign::{derive_series, ActivityType, DeriveConfig, RawPoint};
//!
//! let points = vec![
//!     RawPoint {
//!         elapsed_s: 0.0,
//!         distance_m: 0.0,
//!         latitude: 47.37,
//!         longitude: 8.55,
//!         elevation_m: 410.0,
//!         speed_mps: 2.8,
//!         heart_rate: 120,
//!         cadence: Some(85),
//!     },
//!     RawPoint {
//!         elapsed_s: 10.0,
//!         distance_m: 28.0,
//!         latitude: 47.3702,
//!         longitude: 8.5502,
//!         elevation_m: 411.0,
//!         speed_mps: 2.8,
//!         heart_rate: 124,
//!         cadence: Some(86),
//!     },
//!     RawPoint {
//!         elapsed_s: 20.0,
//!         distance_m: 56.0,
//!         latitude: 47.3704,
//!         longitude: 8.5504,
//!         elevation_m: 412.0,
//!         speed_mps: 2.8,
//!         heart_rate: 126,
//!         cadence: Some(86),
//!     },
//! ];
//!
//! let series = derive_series(&points, ActivityType::Running, &DeriveConfig::default()).unwrap();
//! assert_eq!(series.len(), 3);
//! // Speed is converted to km/h; slope is undefined at the boundaries.
//! assert!((series.samples[0].speed_kmh - 10.08).abs() < 1e-9);
//! assert!(series.samples[0].slope_percent.is_none());
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{Result, TrackAlignError};

// Point Stream Adapter (external-parser seam)
pub mod adapter;
pub use adapter::{adapt_track, TrackPoint};

// Metric Derivation Engine
pub mod derive;
pub use derive::derive_series;

// Activity Summarizer
pub mod summary;
pub use summary::{summarize, ActivitySummary, SummaryRow, SummaryTable};

// Elevation Alignment Optimizer
pub mod align;
#[cfg(feature = "parallel")]
pub use align::find_offsets_parallel;
pub use align::{find_offsets, AlignConfig, OffsetEstimate};

// Synthetic track generation for benchmarks and ground-truth validation.
// Feature-gated — not included in production builds.
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// The kind of recorded activity.
///
/// Running activities carry pace and cadence metrics; everything else is
/// summarized by speed. The set is closed on purpose: the derivation rules
/// only distinguish these two cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Running,
    Other,
}

impl ActivityType {
    /// Map the track's declared type string onto the closed set.
    ///
    /// `"running"` maps to [`ActivityType::Running`]; any other declared
    /// type (ride, hike, unknown, ...) maps to [`ActivityType::Other`].
    ///
    /// # Example
    /// ```
    /// use trackalign::ActivityType;
    /// assert_eq!(ActivityType::from_track_type("running"), ActivityType::Running);
    /// assert_eq!(ActivityType::from_track_type("cycling"), ActivityType::Other);
    /// ```
    pub fn from_track_type(track_type: &str) -> Self {
        if track_type.eq_ignore_ascii_case("running") {
            ActivityType::Running
        } else {
            ActivityType::Other
        }
    }
}

/// One raw GPS fix, normalized by the point stream adapter.
///
/// Time is expressed as seconds elapsed since the activity start (the first
/// point of a track is always at 0.0). Distance is cumulative from the track
/// start and monotonically non-decreasing. Speed is the neighbour-derived
/// instantaneous speed in m/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPoint {
    /// Elapsed time since activity start in seconds.
    pub elapsed_s: f64,
    /// Cumulative distance from track start in meters.
    pub distance_m: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
    /// Instantaneous speed in m/s.
    pub speed_mps: f64,
    /// Heart rate in beats per minute (required sensor field).
    pub heart_rate: u16,
    /// Raw cadence in half-cycle sensor units (one foot's strike rate).
    /// Required for running activities, absent otherwise.
    pub cadence: Option<u16>,
}

/// One time-indexed row of derived metrics.
///
/// `None` is the explicit "undefined" marker: slope at the series
/// boundaries and over stalled distance, pace above the sanity ceiling,
/// cadence during sensor dropout. Undefined values are excluded from every
/// aggregate the summarizer computes; they are never coerced to zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedSample {
    /// Elapsed time since activity start in seconds (series index).
    #[serde(rename = "time / s")]
    pub elapsed_s: f64,
    #[serde(rename = "distance / m")]
    pub distance_m: f64,
    #[serde(rename = "latitude / °")]
    pub latitude: f64,
    #[serde(rename = "longitude / °")]
    pub longitude: f64,
    #[serde(rename = "elevation / m")]
    pub elevation_m: f64,
    #[serde(rename = "speed / km/h")]
    pub speed_kmh: f64,
    #[serde(rename = "heart rate / bpm")]
    pub heart_rate: u16,
    /// Smoothed slope in percent; undefined at the series boundaries and
    /// wherever distance does not advance.
    #[serde(rename = "slope / %")]
    pub slope_percent: Option<f64>,
    /// Pace in min/km (running only); undefined above the pace ceiling.
    #[serde(rename = "pace / min/km")]
    pub pace_min_per_km: Option<f64>,
    /// Cadence in steps/min (running only); undefined on sensor dropout.
    #[serde(rename = "cadence / spm")]
    pub cadence_spm: Option<u16>,
}

/// An ordered time series of derived samples for one activity.
///
/// Invariants (enforced by [`derive_series`]): `elapsed_s` is strictly
/// increasing and `distance_m` is monotonically non-decreasing along the
/// sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedSeries {
    pub activity_type: ActivityType,
    pub samples: Vec<DerivedSample>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The last sample of the series, if any.
    pub fn last(&self) -> Option<&DerivedSample> {
        self.samples.last()
    }
}

/// Configuration for metric derivation.
///
/// The anomaly-suppression rules encode domain heuristics, not universal
/// truths, so they live in configuration rather than hardcoded literals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeriveConfig {
    /// Pace values above this ceiling (min/km) are treated as GPS/sensor
    /// noise and reported as undefined. Very low speed produces spuriously
    /// high pace. Default: 10.0
    pub pace_ceiling_min_per_km: f64,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            pace_ceiling_min_per_km: 10.0,
        }
    }
}
