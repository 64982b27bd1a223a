//! Activity summarizer.
//!
//! Reduces one or more derived time series into a single summary record per
//! activity: totals, averages, and maxima, with activity-type-dependent
//! fields (pace and cadence for running, speed otherwise). Undefined
//! samples are excluded from every average — never treated as zero.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackAlignError};
use crate::{ActivityType, DerivedSeries};

/// Summary statistics for one activity.
///
/// Serialized field names carry units exactly as the derived series does.
/// Running activities populate pace and cadence; all other types populate
/// average and maximum speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Total elapsed time: the last sample's time offset in seconds.
    #[serde(rename = "time / s")]
    pub duration_s: f64,
    /// Total distance, rounded to the nearest meter.
    #[serde(rename = "distance / m")]
    pub distance_m: u64,
    /// Mean pace over defined samples, min/km (running only).
    #[serde(rename = "avg pace / min/km", skip_serializing_if = "Option::is_none")]
    pub avg_pace_min_per_km: Option<f64>,
    /// Mean speed, rounded to 1 decimal (non-running only).
    #[serde(rename = "avg spd / km/h", skip_serializing_if = "Option::is_none")]
    pub avg_speed_kmh: Option<f64>,
    /// Maximum speed, rounded to 1 decimal (non-running only).
    #[serde(rename = "max spd / km/h", skip_serializing_if = "Option::is_none")]
    pub max_speed_kmh: Option<f64>,
    /// Mean heart rate, rounded to the nearest integer.
    #[serde(rename = "avg HR / bpm")]
    pub avg_heart_rate: u32,
    /// Maximum heart rate, unrounded.
    #[serde(rename = "max HR / bpm")]
    pub max_heart_rate: u16,
    /// Mean cadence over defined samples, rounded (running only).
    #[serde(rename = "cadence / spm", skip_serializing_if = "Option::is_none")]
    pub avg_cadence_spm: Option<u32>,
}

/// One rendered table row: a statistic name and one value per activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub statistic: String,
    pub values: Vec<String>,
}

/// Summary table for a batch of activities sharing one activity type:
/// one column per activity (keyed by label), one row per statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub activity_type: ActivityType,
    pub labels: Vec<String>,
    pub summaries: Vec<ActivitySummary>,
}

impl SummaryTable {
    /// Render the table as rows in the fixed statistic order: time,
    /// distance, (avg pace | avg spd, max spd), avg HR, max HR, (cadence).
    ///
    /// Durations render as `H:MM:SS`, pace as `m:ss`, speeds with one
    /// decimal. An average with no defined samples renders as `"n/a"`.
    pub fn rows(&self) -> Vec<SummaryRow> {
        let mut rows = Vec::new();
        let mut push = |statistic: &str, f: &dyn Fn(&ActivitySummary) -> String| {
            rows.push(SummaryRow {
                statistic: statistic.to_string(),
                values: self.summaries.iter().map(f).collect(),
            });
        };

        push("time", &|s| format_duration(s.duration_s));
        push("distance / m", &|s| s.distance_m.to_string());
        match self.activity_type {
            ActivityType::Running => {
                push("avg pace / min/km", &|s| {
                    s.avg_pace_min_per_km
                        .map_or_else(|| "n/a".to_string(), format_pace)
                });
            }
            ActivityType::Other => {
                push("avg spd / km/h", &|s| {
                    format!("{:.1}", s.avg_speed_kmh.unwrap_or(0.0))
                });
                push("max spd / km/h", &|s| {
                    format!("{:.1}", s.max_speed_kmh.unwrap_or(0.0))
                });
            }
        }
        push("avg HR / bpm", &|s| s.avg_heart_rate.to_string());
        push("max HR / bpm", &|s| s.max_heart_rate.to_string());
        if self.activity_type == ActivityType::Running {
            push("cadence / spm", &|s| {
                s.avg_cadence_spm
                    .map_or_else(|| "n/a".to_string(), |c| c.to_string())
            });
        }
        rows
    }
}

/// Summarize a batch of derived series into one table column per activity.
///
/// All series must share one activity type (taken from the first series);
/// a mixed batch is a caller error, rejected before any computation. The
/// label slice must have one entry per series.
pub fn summarize(series: &[DerivedSeries], labels: &[&str]) -> Result<SummaryTable> {
    if series.is_empty() {
        return Err(TrackAlignError::EmptyBatch);
    }
    if labels.len() != series.len() {
        return Err(TrackAlignError::LabelMismatch {
            labels: labels.len(),
            series: series.len(),
        });
    }

    let activity_type = series[0].activity_type;
    for (index, s) in series.iter().enumerate() {
        if s.activity_type != activity_type {
            return Err(TrackAlignError::MixedActivityTypes {
                expected: activity_type,
                found: s.activity_type,
                index,
            });
        }
    }

    let summaries = series
        .iter()
        .map(summarize_one)
        .collect::<Result<Vec<_>>>()?;

    Ok(SummaryTable {
        activity_type,
        labels: labels.iter().map(|l| l.to_string()).collect(),
        summaries,
    })
}

fn summarize_one(series: &DerivedSeries) -> Result<ActivitySummary> {
    let last = series.last().ok_or(TrackAlignError::EmptyTrack)?;

    let hr_values: Vec<f64> = series.samples.iter().map(|s| f64::from(s.heart_rate)).collect();
    let avg_heart_rate = mean(&hr_values).unwrap_or(0.0).round() as u32;
    let max_heart_rate = series
        .samples
        .iter()
        .map(|s| s.heart_rate)
        .max()
        .unwrap_or(0);

    let mut summary = ActivitySummary {
        duration_s: last.elapsed_s,
        distance_m: last.distance_m.round() as u64,
        avg_pace_min_per_km: None,
        avg_speed_kmh: None,
        max_speed_kmh: None,
        avg_heart_rate,
        max_heart_rate,
        avg_cadence_spm: None,
    };

    match series.activity_type {
        ActivityType::Running => {
            // Pace values are time-per-distance quantities; averaging them
            // arithmetically over samples averages them as durations.
            let paces: Vec<f64> = series
                .samples
                .iter()
                .filter_map(|s| s.pace_min_per_km)
                .collect();
            summary.avg_pace_min_per_km = mean(&paces);

            let cadences: Vec<f64> = series
                .samples
                .iter()
                .filter_map(|s| s.cadence_spm.map(f64::from))
                .collect();
            summary.avg_cadence_spm = mean(&cadences).map(|c| c.round() as u32);
        }
        ActivityType::Other => {
            let speeds: Vec<f64> = series.samples.iter().map(|s| s.speed_kmh).collect();
            summary.avg_speed_kmh = mean(&speeds).map(round1);
            summary.max_speed_kmh = speeds.iter().copied().reduce(f64::max).map(round1);
        }
    }

    Ok(summary)
}

/// Arithmetic mean, `None` for an empty slice.
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Render a pace in min/km as `m:ss`.
///
/// # Example
/// ```
/// use trackalign::summary::format_pace;
/// assert_eq!(format_pace(5.5), "5:30");
/// ```
pub fn format_pace(pace_min_per_km: f64) -> String {
    let total_seconds = (pace_min_per_km * 60.0).round() as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Render an elapsed duration in seconds as `H:MM:SS`.
///
/// # Example
/// ```
/// use trackalign::summary::format_duration;
/// assert_eq!(format_duration(3725.0), "1:02:05");
/// ```
pub fn format_duration(elapsed_s: f64) -> String {
    let total = elapsed_s.round() as u64;
    format!("{}:{:02}:{:02}", total / 3600, (total % 3600) / 60, total % 60)
}
