//! Point stream adapter: the narrow seam between an external GPS-track
//! parser and the derivation core.
//!
//! Any parser that can produce a sequence of [`TrackPoint`]s (wall-clock
//! timestamp, position, elevation, sensor extensions) plugs in here. The
//! adapter normalizes the activity start time to zero, accumulates distance
//! along the track, and derives instantaneous speed from neighbouring
//! points — yielding the [`RawPoint`] stream the core consumes. It does no
//! file I/O and knows nothing about any particular track-file format.

use chrono::{DateTime, Utc};
use geo::{point, HaversineDistance};

use crate::error::{Result, TrackAlignError};
use crate::RawPoint;

/// One parsed track point as yielded by an external GPS-track parser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    /// Wall-clock timestamp of the fix.
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
    /// Heart rate sensor extension in bpm. Required on every point.
    pub heart_rate: Option<u16>,
    /// Cadence sensor extension in raw half-cycle units. Required only for
    /// running activities; checked downstream by the derivation engine.
    pub cadence: Option<u16>,
}

/// Adapt a parsed point sequence into the normalized [`RawPoint`] stream.
///
/// - Time: each point's elapsed time is its offset from the first point's
///   timestamp, in seconds (the first point lands at 0.0).
/// - Distance: cumulative haversine distance along the track, in meters.
/// - Speed: central difference of cumulative distance over time where both
///   neighbours exist, one-sided at the track boundaries. A single-point
///   track gets speed 0.
///
/// A point without a heart rate extension is a malformed-input error; the
/// cadence extension is passed through untouched and validated by
/// [`derive_series`](crate::derive_series) for running activities.
pub fn adapt_track(points: &[TrackPoint]) -> Result<Vec<RawPoint>> {
    if points.is_empty() {
        return Err(TrackAlignError::EmptyTrack);
    }

    let start = points[0].time;
    let elapsed: Vec<f64> = points
        .iter()
        .map(|p| (p.time - start).num_milliseconds() as f64 / 1000.0)
        .collect();

    // Cumulative distance along the track.
    let mut distance = Vec::with_capacity(points.len());
    let mut total = 0.0;
    distance.push(0.0);
    for pair in points.windows(2) {
        total += leg_distance(&pair[0], &pair[1]);
        distance.push(total);
    }

    let last = points.len() - 1;
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let heart_rate = p.heart_rate.ok_or(TrackAlignError::MissingSensorField {
                index: i,
                field: "hr",
            })?;

            // Central difference; degrades to one-sided at the boundaries.
            let lo = i.saturating_sub(1);
            let hi = (i + 1).min(last);
            let dt = elapsed[hi] - elapsed[lo];
            let speed_mps = if dt > 0.0 {
                (distance[hi] - distance[lo]) / dt
            } else {
                0.0
            };

            Ok(RawPoint {
                elapsed_s: elapsed[i],
                distance_m: distance[i],
                latitude: p.latitude,
                longitude: p.longitude,
                elevation_m: p.elevation_m,
                speed_mps,
                heart_rate,
                cadence: p.cadence,
            })
        })
        .collect()
}

/// Haversine distance between two consecutive fixes in meters.
fn leg_distance(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let pa = point!(x: a.longitude, y: a.latitude);
    let pb = point!(x: b.longitude, y: b.latitude);
    pa.haversine_distance(&pb)
}
