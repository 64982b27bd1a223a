//! Tests for the error module.

use trackalign::{ActivityType, TrackAlignError};

#[test]
fn test_non_monotonic_time_display() {
    let err = TrackAlignError::NonMonotonicTime { index: 7 };
    assert!(err.to_string().contains("point 7"));
    assert!(err.to_string().contains("strictly increasing"));
}

#[test]
fn test_missing_sensor_field_display() {
    let err = TrackAlignError::MissingSensorField {
        index: 3,
        field: "hr",
    };
    assert!(err.to_string().contains("'hr'"));
    assert!(err.to_string().contains("point 3"));
}

#[test]
fn test_mixed_activity_types_display() {
    let err = TrackAlignError::MixedActivityTypes {
        expected: ActivityType::Running,
        found: ActivityType::Other,
        index: 2,
    };
    assert!(err.to_string().contains("series 2"));
}

#[test]
fn test_degenerate_profile_display() {
    let err = TrackAlignError::DegenerateProfile {
        index: 1,
        point_count: 1,
    };
    assert!(err.to_string().contains("series 1"));
    assert!(err.to_string().contains("1 usable points"));
}

#[test]
fn test_errors_are_matchable() {
    let err: TrackAlignError = TrackAlignError::EmptyTrack;
    assert!(matches!(err, TrackAlignError::EmptyTrack));

    let err = TrackAlignError::LabelMismatch {
        labels: 2,
        series: 3,
    };
    assert!(matches!(err, TrackAlignError::LabelMismatch { .. }));
}
