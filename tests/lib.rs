//! Tests for core types and the end-to-end pipeline.

use chrono::{Duration, TimeZone, Utc};
use trackalign::{
    adapt_track, derive_series, find_offsets, summarize, ActivityType, AlignConfig, DeriveConfig,
    TrackPoint,
};

#[test]
fn test_activity_type_mapping() {
    assert_eq!(ActivityType::from_track_type("running"), ActivityType::Running);
    assert_eq!(ActivityType::from_track_type("Running"), ActivityType::Running);
    assert_eq!(ActivityType::from_track_type("cycling"), ActivityType::Other);
    assert_eq!(ActivityType::from_track_type(""), ActivityType::Other);
}

#[test]
fn test_derive_config_default_ceiling() {
    assert_eq!(DeriveConfig::default().pace_ceiling_min_per_km, 10.0);
}

#[test]
fn test_align_config_defaults() {
    let config = AlignConfig::default();
    assert_eq!(config.max_iterations, 100);
    assert_eq!(config.tolerance, 1e-5);
}

#[test]
fn test_derived_sample_serializes_with_units() {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap();
    let points: Vec<TrackPoint> = (0..3)
        .map(|i| TrackPoint {
            time: start + Duration::seconds(i * 10),
            latitude: 47.37 + i as f64 * 0.0005,
            longitude: 8.55,
            elevation_m: 410.0,
            heart_rate: Some(120),
            cadence: None,
        })
        .collect();
    let raw = adapt_track(&points).unwrap();
    let series = derive_series(&raw, ActivityType::Other, &DeriveConfig::default()).unwrap();

    // Units are part of the contract, not decoration.
    let json = serde_json::to_string(&series.samples[0]).unwrap();
    assert!(json.contains("\"distance / m\""));
    assert!(json.contains("\"speed / km/h\""));
    assert!(json.contains("\"heart rate / bpm\""));
}

/// Full pipeline: parsed points through adaptation, derivation,
/// summarization and alignment.
#[test]
fn test_end_to_end_pipeline() {
    let start = Utc.with_ymd_and_hms(2024, 6, 1, 6, 30, 0).unwrap();
    let track = |lag_fixes: usize| -> Vec<TrackPoint> {
        // The laggy recording misses the first fixes, so its elevation
        // curve starts further along the terrain.
        (lag_fixes..120)
            .map(|i| TrackPoint {
                time: start + Duration::seconds((i - lag_fixes) as i64 * 5),
                latitude: 47.37 + i as f64 * 0.0002,
                longitude: 8.55,
                elevation_m: 410.0 + (i as f64 * 0.7) + 5.0 * (i as f64 / 15.0).sin(),
                heart_rate: Some(135),
                cadence: None,
            })
            .collect()
    };

    let config = DeriveConfig::default();
    let a = derive_series(&adapt_track(&track(0)).unwrap(), ActivityType::Other, &config).unwrap();
    let b = derive_series(&adapt_track(&track(3)).unwrap(), ActivityType::Other, &config).unwrap();

    let table = summarize(&[a.clone(), b.clone()], &["full", "laggy"]).unwrap();
    assert_eq!(table.labels, vec!["full", "laggy"]);
    assert_eq!(table.summaries.len(), 2);
    assert!(table.summaries[0].distance_m > 0);

    let estimates = find_offsets(&[a, b], &AlignConfig::default()).unwrap();
    assert_eq!(estimates[0].offset_m, 0.0);
    // The laggy track's profile sits ~3 fixes (~66 m) early on its own
    // axis; realigning it needs a positive shift of about that much.
    assert!(
        estimates[1].offset_m > 30.0 && estimates[1].offset_m < 110.0,
        "offset was {}",
        estimates[1].offset_m
    );
    assert!(estimates[1].converged);
}
