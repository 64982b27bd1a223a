//! Metric derivation engine.
//!
//! Turns a raw point stream for one activity into an ordered time series of
//! physically meaningful samples:
//! - Speed conversion (m/s → km/h)
//! - Smoothed slope in percent, undefined at the boundaries and over
//!   stalled distance
//! - Running-specific pace and cadence with anomaly suppression
//!
//! The transformation is pure: output is a function of the input points,
//! the activity type, and the configuration. Malformed input (empty track,
//! non-strictly-increasing time, decreasing distance, missing sensor
//! fields) is rejected, never patched.

use log::debug;

use crate::error::{Result, TrackAlignError};
use crate::{ActivityType, DeriveConfig, DerivedSample, DerivedSeries, RawPoint};

/// Conversion factor from m/s to km/h.
const MPS_TO_KMH: f64 = 3.6;

/// Derive the metric time series for one activity.
///
/// The time axis is the points' elapsed seconds and must be strictly
/// increasing; a duplicate or out-of-order timestamp is rejected (the
/// policy is reject, not keep-first). Cumulative distance must never
/// decrease.
///
/// For running activities, pace above
/// [`DeriveConfig::pace_ceiling_min_per_km`] and a raw cadence of 0 are
/// reported as undefined (`None`), treated as GPS noise and sensor dropout
/// respectively. A running point without a cadence extension is an error.
///
/// # Example
/// ```
/// use trackalign::{derive_series, ActivityType, DeriveConfig, RawPoint};
///
/// let points = vec![
///     RawPoint {
///         elapsed_s: 0.0, distance_m: 0.0,
///         latitude: 47.37, longitude: 8.55, elevation_m: 400.0,
///         speed_mps: 5.0, heart_rate: 130, cadence: None,
///     },
///     RawPoint {
///         elapsed_s: 10.0, distance_m: 50.0,
///         latitude: 47.3705, longitude: 8.55, elevation_m: 402.0,
///         speed_mps: 5.0, heart_rate: 132, cadence: None,
///     },
/// ];
///
/// let series = derive_series(&points, ActivityType::Other, &DeriveConfig::default()).unwrap();
/// assert_eq!(series.samples[1].speed_kmh, 18.0);
/// ```
pub fn derive_series(
    points: &[RawPoint],
    activity_type: ActivityType,
    config: &DeriveConfig,
) -> Result<DerivedSeries> {
    if points.is_empty() {
        return Err(TrackAlignError::EmptyTrack);
    }

    for (i, pair) in points.windows(2).enumerate() {
        let index = i + 1;
        if pair[1].elapsed_s <= pair[0].elapsed_s {
            return Err(TrackAlignError::NonMonotonicTime { index });
        }
        if pair[1].distance_m < pair[0].distance_m {
            return Err(TrackAlignError::NonMonotonicDistance { index });
        }
    }

    let slopes = smoothed_slopes(points);
    let mut suppressed_pace = 0usize;

    let samples: Vec<DerivedSample> = points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let speed_kmh = p.speed_mps * MPS_TO_KMH;

            let (pace_min_per_km, cadence_spm) = match activity_type {
                ActivityType::Running => {
                    let pace = sane_pace(speed_kmh, config.pace_ceiling_min_per_km);
                    if pace.is_none() {
                        suppressed_pace += 1;
                    }
                    let raw = p.cadence.ok_or(TrackAlignError::MissingSensorField {
                        index: i,
                        field: "cadence",
                    })?;
                    // Sensor reports one foot's strike rate; 0 is dropout,
                    // not a true zero cadence.
                    let cadence = if raw == 0 { None } else { Some(raw * 2) };
                    (pace, cadence)
                }
                ActivityType::Other => (None, None),
            };

            Ok(DerivedSample {
                elapsed_s: p.elapsed_s,
                distance_m: p.distance_m,
                latitude: p.latitude,
                longitude: p.longitude,
                elevation_m: p.elevation_m,
                speed_kmh,
                heart_rate: p.heart_rate,
                slope_percent: slopes[i],
                pace_min_per_km,
                cadence_spm,
            })
        })
        .collect::<Result<_>>()?;

    if suppressed_pace > 0 {
        debug!(
            "suppressed {} pace sample(s) above {} min/km ceiling",
            suppressed_pace, config.pace_ceiling_min_per_km
        );
    }

    Ok(DerivedSeries {
        activity_type,
        samples,
    })
}

/// Pace in min/km, or `None` when speed is non-positive or the pace
/// exceeds the sanity ceiling.
fn sane_pace(speed_kmh: f64, ceiling_min_per_km: f64) -> Option<f64> {
    if speed_kmh <= 0.0 {
        return None;
    }
    let pace = 60.0 / speed_kmh;
    (pace <= ceiling_min_per_km).then_some(pace)
}

/// Smoothed per-sample slope in percent.
///
/// The slope over the segment ending at point `i` is
/// `Δelevation / Δdistance × 100`, undefined when distance does not
/// advance. The reported slope at `i` is the mean of the two segment
/// slopes adjacent to `i` (a centered 2-sample moving average), so it is
/// undefined at the first and last sample and wherever either adjacent
/// segment is stalled.
fn smoothed_slopes(points: &[RawPoint]) -> Vec<Option<f64>> {
    let n = points.len();

    // Segment slope into point i (None at i = 0 and over zero distance).
    let mut segment = vec![None; n];
    for (i, pair) in points.windows(2).enumerate() {
        let dd = pair[1].distance_m - pair[0].distance_m;
        if dd > 0.0 {
            let de = pair[1].elevation_m - pair[0].elevation_m;
            segment[i + 1] = Some(de / dd * 100.0);
        }
    }

    (0..n)
        .map(|i| match (segment[i], segment.get(i + 1).copied().flatten()) {
            (Some(before), Some(after)) => Some((before + after) / 2.0),
            _ => None,
        })
        .collect()
}
