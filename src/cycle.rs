//! Gait-cycle time normalization.
//!
//! A trial carries one full gait cycle per side, at the capture system's
//! native rate. Kinematic and kinetic traces are resampled onto the fixed
//! 101-point 0-100% grid; EMG keeps its native resolution and only has its
//! time axis relabeled to 0-100%.

use crate::side::Side;

/// Points on the canonical kinematics/kinetics grid (0..=100, 1% steps).
pub const GAIT_CYCLE_POINTS: usize = 101;
/// Points per normal-data curve (0..=100, 2% steps).
pub const NORMAL_DATA_POINTS: usize = 51;

/// Native per-cycle sample counts for one side, per rate domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleSpan {
    /// Model-output frames spanning the cycle.
    pub model_frames: usize,
    /// Analog (EMG) samples spanning the cycle.
    pub analog_samples: usize,
}

/// Per-side cycle spans. Left and right strides differ, so normalization
/// always looks up the span for the side of the channel being processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GaitCycles {
    pub left: CycleSpan,
    pub right: CycleSpan,
}

impl GaitCycles {
    pub fn span(&self, side: Side) -> CycleSpan {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Linearly resample the first `native_len` samples of `series` (one full
/// gait cycle) onto `target` evenly spaced points covering the cycle
/// inclusively at both ends. Zero-length input yields an empty result; the
/// caller decides whether to skip or annotate.
pub fn normalize_to_gait_cycle(series: &[f64], native_len: usize, target: usize) -> Vec<f64> {
    let n = native_len.min(series.len());
    if n == 0 || target == 0 {
        return Vec::new();
    }
    let cycle = &series[..n];
    if n == 1 || target == 1 {
        return vec![cycle[0]; target];
    }
    let step = (n - 1) as f64 / (target - 1) as f64;
    (0..target)
        .map(|i| {
            let pos = i as f64 * step;
            let idx = pos.floor() as usize;
            if idx >= n - 1 {
                cycle[n - 1]
            } else {
                let frac = pos - idx as f64;
                cycle[idx] * (1.0 - frac) + cycle[idx + 1] * frac
            }
        })
        .collect()
}

/// Evenly spaced 0-100% axis with `len` points, inclusive at both ends.
pub fn percent_grid(len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => (0..len)
            .map(|i| 100.0 * i as f64 / (len - 1) as f64)
            .collect(),
    }
}
