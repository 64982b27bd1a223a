//! Synthetic activity generator for benchmarking and validation.
//!
//! Generates batches of derived series covering the same physical route,
//! with known per-activity distance-axis shifts — providing ground truth
//! for validating the elevation alignment optimizer.
//!
//! Feature-gated behind `synthetic` — not included in production builds.
//!
//! # Example
//!
//! ```rust
//! use trackalign::synthetic::SyntheticScenario;
//!
//! let batch = SyntheticScenario {
//!     activity_count: 4,
//!     length_m: 8_000.0,
//!     spacing_m: 10.0,
//!     max_shift_m: 60.0,
//!     elevation_noise_m: 0.0,
//!     seed: 42,
//! }
//! .generate();
//!
//! assert_eq!(batch.series.len(), 4);
//! assert_eq!(batch.expected_offsets[0], 0.0);
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{ActivityType, DerivedSample, DerivedSeries};

/// Scenario configuration for generating a batch of shifted activities.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    /// Number of activities to generate, reference included.
    pub activity_count: usize,
    /// Route length in meters.
    pub length_m: f64,
    /// Distance between consecutive samples in meters.
    pub spacing_m: f64,
    /// Per-secondary recorded-axis shift is drawn uniformly from
    /// `-max_shift_m..max_shift_m`.
    pub max_shift_m: f64,
    /// Uniform elevation noise amplitude in meters (0.0 for exact data).
    pub elevation_noise_m: f64,
    /// RNG seed for deterministic reproduction.
    pub seed: u64,
}

/// A generated batch with ground truth.
pub struct SyntheticBatch {
    /// One derived series per activity; index 0 is the reference.
    pub series: Vec<DerivedSeries>,
    /// The offset the optimizer is expected to recover per activity
    /// (the negated recorded-axis shift; 0.0 for the reference).
    pub expected_offsets: Vec<f64>,
}

impl SyntheticScenario {
    /// Generate the batch deterministically from the seed.
    pub fn generate(&self) -> SyntheticBatch {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut series = Vec::with_capacity(self.activity_count);
        let mut expected_offsets = Vec::with_capacity(self.activity_count);

        for activity in 0..self.activity_count {
            let shift = if activity == 0 || self.max_shift_m <= 0.0 {
                0.0
            } else {
                rng.gen_range(-self.max_shift_m..self.max_shift_m)
            };
            series.push(self.generate_one(shift, &mut rng));
            expected_offsets.push(-shift);
        }

        SyntheticBatch {
            series,
            expected_offsets,
        }
    }

    fn generate_one(&self, shift: f64, rng: &mut StdRng) -> DerivedSeries {
        let sample_count = (self.length_m / self.spacing_m).ceil() as usize + 1;
        let samples = (0..sample_count)
            .map(|i| {
                let d = i as f64 * self.spacing_m;
                let noise = if self.elevation_noise_m > 0.0 {
                    rng.gen_range(-self.elevation_noise_m..self.elevation_noise_m)
                } else {
                    0.0
                };
                DerivedSample {
                    elapsed_s: i as f64 * 3.0,
                    // The recorded axis is shifted; the terrain is not.
                    distance_m: d + shift,
                    latitude: 47.37 + d / 111_000.0,
                    longitude: 8.55,
                    elevation_m: base_elevation(d) + noise,
                    speed_kmh: 12.0,
                    heart_rate: 140,
                    slope_percent: None,
                    pace_min_per_km: None,
                    cadence_spm: None,
                }
            })
            .collect();

        DerivedSeries {
            activity_type: ActivityType::Other,
            samples,
        }
    }
}

/// Non-periodic rolling-hills elevation model: a steady ramp with two
/// incommensurate undulations, so shift recovery has a unique optimum.
fn base_elevation(d: f64) -> f64 {
    400.0 + 0.035 * d + 16.0 * (d / 420.0).sin() + 6.0 * (d / 95.0).sin()
}
