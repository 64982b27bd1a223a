//! Elevation alignment optimizer.
//!
//! When multiple activities cover approximately the same physical route,
//! their recorded distance axes rarely agree: GPS lock-on delay, a late
//! start press, or drift shifts the whole elevation-vs-distance curve
//! longitudinally. This module estimates, per activity, the distance-axis
//! offset that best superimposes its elevation profile onto a reference
//! activity's by minimizing a sum-of-squared-residuals objective over
//! linearly interpolated samples.
//!
//! ## Sign convention
//!
//! The reported offset is **added to the secondary activity's distance
//! axis** to realign it onto the reference. A secondary profile recorded
//! 50 m late (every distance value shifted +50) therefore yields an offset
//! of ≈ −50.
//!
//! ## Accuracy caveat
//!
//! The objective can be multi-modal: repeated elevation patterns create
//! local minima, and the derivative-free search may settle in one of them.
//! This is a property of the problem, not a defect of the search.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackAlignError};
use crate::DerivedSeries;

/// Golden ratio, used for downhill bracket expansion.
const GOLDEN: f64 = 1.618_033_988_749_895;
/// Inverse golden ratio, used for golden-section interval reduction.
const INV_GOLDEN: f64 = 0.618_033_988_749_895;

/// Configuration for the alignment search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Iteration budget shared by the bracketing and refinement phases.
    /// Exhausting it yields the best value found with `converged: false`;
    /// the search never loops unbounded. Default: 100
    pub max_iterations: u32,
    /// Absolute convergence tolerance on the offset, in meters.
    /// Default: 1e-5
    pub tolerance: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: 1e-5,
        }
    }
}

/// Best-fit distance-axis offset for one activity against the reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsetEstimate {
    /// Offset in meters, to be added to this activity's distance axis.
    pub offset_m: f64,
    /// Sum of squared elevation residuals at the optimum.
    pub residual: f64,
    /// False when the iteration budget ran out before the tolerance was
    /// met; `offset_m` then holds the best value found so far.
    pub converged: bool,
    /// Iterations spent across both search phases.
    pub iterations: u32,
}

impl OffsetEstimate {
    /// The reference activity's estimate: zero offset by construction.
    fn reference() -> Self {
        Self {
            offset_m: 0.0,
            residual: 0.0,
            converged: true,
            iterations: 0,
        }
    }
}

/// An activity's elevation-vs-distance curve.
struct Profile {
    distances: Vec<f64>,
    elevations: Vec<f64>,
}

impl Profile {
    /// Extract the (distance, elevation) curve of a series, rejecting
    /// profiles on which interpolation is undefined: fewer than two
    /// samples, or a constant distance axis.
    fn from_series(series: &DerivedSeries, index: usize) -> Result<Self> {
        let n = series.len();
        if n < 2 {
            return Err(TrackAlignError::DegenerateProfile {
                index,
                point_count: n,
            });
        }
        let distances: Vec<f64> = series.samples.iter().map(|s| s.distance_m).collect();
        let elevations: Vec<f64> = series.samples.iter().map(|s| s.elevation_m).collect();
        if distances[n - 1] - distances[0] <= 0.0 {
            return Err(TrackAlignError::DegenerateProfile {
                index,
                point_count: n,
            });
        }
        Ok(Self {
            distances,
            elevations,
        })
    }
}

/// Find the best-fit distance-axis offset for each activity in a batch,
/// relative to the first (reference) activity.
///
/// Offsets are independent per activity: each is optimized against the
/// reference only, never against the other activities. The reference's own
/// estimate is fixed at 0.0. Non-convergence is reported per activity on
/// the estimate's `converged` flag, never silently accepted.
///
/// Fails on an empty batch and on any series whose elevation profile
/// cannot be interpolated (fewer than two samples, constant distance).
pub fn find_offsets(series: &[DerivedSeries], config: &AlignConfig) -> Result<Vec<OffsetEstimate>> {
    let reference = reference_profile(series)?;

    let mut estimates = Vec::with_capacity(series.len());
    estimates.push(OffsetEstimate::reference());
    for (index, secondary) in series.iter().enumerate().skip(1) {
        estimates.push(align_one(&reference, secondary, index, config)?);
    }
    Ok(estimates)
}

/// Parallel variant of [`find_offsets`]: per-activity minimizations are
/// independent, so they run one rayon task per secondary activity.
#[cfg(feature = "parallel")]
pub fn find_offsets_parallel(
    series: &[DerivedSeries],
    config: &AlignConfig,
) -> Result<Vec<OffsetEstimate>> {
    use rayon::prelude::*;

    let reference = reference_profile(series)?;

    let secondaries: Vec<OffsetEstimate> = series
        .par_iter()
        .enumerate()
        .skip(1)
        .map(|(index, secondary)| align_one(&reference, secondary, index, config))
        .collect::<Result<_>>()?;

    let mut estimates = Vec::with_capacity(series.len());
    estimates.push(OffsetEstimate::reference());
    estimates.extend(secondaries);
    Ok(estimates)
}

fn reference_profile(series: &[DerivedSeries]) -> Result<Profile> {
    let reference = series.first().ok_or(TrackAlignError::EmptyBatch)?;
    Profile::from_series(reference, 0)
}

fn align_one(
    reference: &Profile,
    secondary: &DerivedSeries,
    index: usize,
    config: &AlignConfig,
) -> Result<OffsetEstimate> {
    let profile = Profile::from_series(secondary, index)?;
    let result = minimize_scalar(|delta| residual(reference, &profile, delta), config);

    if result.converged {
        debug!(
            "series {}: offset {:.2} m, residual {:.3} ({} iterations)",
            index, result.x, result.fx, result.iterations
        );
    } else {
        warn!(
            "series {}: offset search did not converge within {} iterations; best found {:.2} m",
            index, config.max_iterations, result.x
        );
    }

    Ok(OffsetEstimate {
        offset_m: result.x,
        residual: result.fx,
        converged: result.converged,
        iterations: result.iterations,
    })
}

/// Sum of squared differences between the reference elevations and the
/// secondary profile resampled at the reference distances, with the
/// candidate offset applied to the secondary's distance axis.
fn residual(reference: &Profile, secondary: &Profile, delta: f64) -> f64 {
    reference
        .distances
        .iter()
        .zip(&reference.elevations)
        .map(|(&d, &e)| {
            // Shifting the secondary axis by +delta is the same as querying
            // the unshifted axis at d - delta.
            let resampled = interp_clamped(&secondary.distances, &secondary.elevations, d - delta);
            (e - resampled) * (e - resampled)
        })
        .sum()
}

/// Linear interpolation of `ys` over `xs` at `q`, clamping to the boundary
/// values outside the observed range. `xs` must be non-decreasing with at
/// least two entries spanning a positive range.
fn interp_clamped(xs: &[f64], ys: &[f64], q: f64) -> f64 {
    let n = xs.len();
    if q <= xs[0] {
        return ys[0];
    }
    if q >= xs[n - 1] {
        return ys[n - 1];
    }
    let hi = xs.partition_point(|&x| x <= q);
    let lo = hi - 1;
    ys[lo] + (ys[hi] - ys[lo]) * (q - xs[lo]) / (xs[hi] - xs[lo])
}

struct Minimization {
    x: f64,
    fx: f64,
    iterations: u32,
    converged: bool,
}

/// Derivative-free 1-D minimization: downhill golden-ratio bracket
/// expansion from an initial (0, 1) interval, then golden-section
/// refinement. Both phases draw on one shared iteration budget; running
/// out returns the best point seen so far, flagged as non-converged.
fn minimize_scalar(f: impl Fn(f64) -> f64, config: &AlignConfig) -> Minimization {
    let mut iterations = 0u32;

    // Bracketing: walk downhill with golden-ratio steps until the
    // objective rises again.
    let (mut xa, mut xb) = (0.0, 1.0);
    let (mut fa, mut fb) = (f(xa), f(xb));
    if fa < fb {
        std::mem::swap(&mut xa, &mut xb);
        std::mem::swap(&mut fa, &mut fb);
    }
    let mut xc = xb + GOLDEN * (xb - xa);
    let mut fc = f(xc);
    while fc < fb {
        if iterations >= config.max_iterations {
            return Minimization {
                x: xc,
                fx: fc,
                iterations,
                converged: false,
            };
        }
        iterations += 1;
        xa = xb;
        xb = xc;
        fb = fc;
        xc = xb + GOLDEN * (xb - xa);
        fc = f(xc);
    }

    // The minimum is bracketed between xa and xc (xb inside, fb lowest).
    let (mut lo, mut hi) = if xa < xc { (xa, xc) } else { (xc, xa) };
    let mut x1 = hi - INV_GOLDEN * (hi - lo);
    let mut x2 = lo + INV_GOLDEN * (hi - lo);
    let (mut f1, mut f2) = (f(x1), f(x2));
    let mut converged = true;
    while hi - lo > config.tolerance {
        if iterations >= config.max_iterations {
            converged = false;
            break;
        }
        iterations += 1;
        if f1 < f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - INV_GOLDEN * (hi - lo);
            f1 = f(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + INV_GOLDEN * (hi - lo);
            f2 = f(x2);
        }
    }

    let (x, fx) = if f1 < f2 { (x1, f1) } else { (x2, f2) };
    Minimization {
        x,
        fx,
        iterations,
        converged,
    }
}
