//! Zero-phase bandpass conditioning of raw EMG.
//!
//! Filtering runs in the native sample domain, before any gait-cycle
//! resampling, so the resampling step never sees broadband content it
//! could alias.

use std::f64::consts::PI;

use crate::error::GaitError;

/// Validated EMG passband in Hz.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Passband {
    low_hz: f64,
    high_hz: f64,
}

impl Passband {
    pub fn new(low_hz: f64, high_hz: f64) -> Result<Self, GaitError> {
        if low_hz <= 0.0 || high_hz <= 0.0 || low_hz >= high_hz {
            return Err(GaitError::InvalidPassband {
                low: low_hz,
                high: high_hz,
            });
        }
        Ok(Self { low_hz, high_hz })
    }

    pub fn low_hz(&self) -> f64 {
        self.low_hz
    }

    pub fn high_hz(&self) -> f64 {
        self.high_hz
    }
}

#[derive(Clone, Copy, Debug)]
struct BiquadCoeffs {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
}

#[derive(Clone, Copy, Debug, Default)]
struct BiquadState {
    z1: f64,
    z2: f64,
}

#[derive(Clone, Copy, Debug)]
struct BiquadSection {
    coeffs: BiquadCoeffs,
    state: BiquadState,
}

impl BiquadSection {
    fn new(coeffs: BiquadCoeffs) -> Self {
        Self {
            coeffs,
            state: BiquadState::default(),
        }
    }

    fn process(&mut self, input: f64) -> f64 {
        // Transposed direct form II
        let y = self.coeffs.b0 * input + self.state.z1;
        self.state.z1 = self.coeffs.b1 * input - self.coeffs.a1 * y + self.state.z2;
        self.state.z2 = self.coeffs.b2 * input - self.coeffs.a2 * y;
        y
    }

    fn reset(&mut self) {
        self.state = BiquadState::default();
    }
}

fn nyquist_clamp(freq_hz: f64, nyquist: f64) -> f64 {
    freq_hz.clamp(0.01, nyquist - 0.01)
}

fn band_edges(low_hz: f64, high_hz: f64, nyquist: f64) -> (f64, f64) {
    let low = nyquist_clamp(low_hz.min(high_hz), nyquist);
    let high = nyquist_clamp(low_hz.max(high_hz), nyquist);
    (low, high)
}

fn bandpass(center_hz: f64, sample_rate_hz: f64, q: f64) -> BiquadCoeffs {
    let w0 = 2.0 * PI * center_hz / sample_rate_hz;
    let alpha = (w0 / 2.0).sin() / (2.0 * q);
    let cos_w0 = w0.cos();
    let sin_w0 = w0.sin();
    let b0 = sin_w0 / 2.0 / q;
    let b1 = 0.0;
    let b2 = -b0;
    let a0 = 1.0 + alpha;
    let a1 = -2.0 * cos_w0;
    let a2 = 1.0 - alpha;
    normalize(b0, b1, b2, a0, a1, a2)
}

fn normalize(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> BiquadCoeffs {
    let a0_inv = 1.0 / a0;
    BiquadCoeffs {
        b0: b0 * a0_inv,
        b1: b1 * a0_inv,
        b2: b2 * a0_inv,
        a1: a1 * a0_inv,
        a2: a2 * a0_inv,
    }
}

fn design_section(passband: &Passband, sample_rate_hz: f64) -> BiquadSection {
    let nyquist = sample_rate_hz * 0.5;
    let (low, high) = band_edges(passband.low_hz, passband.high_hz, nyquist);
    let center = (low * high).sqrt();
    let q = (center / (high - low)).clamp(0.1, 100.0);
    BiquadSection::new(bandpass(center, sample_rate_hz, q))
}

/// Zero-phase bandpass: one forward pass, then one backward pass with a
/// reset section, cancelling the phase shift of the first.
pub fn bandpass_zero_phase(signal: &[f64], passband: &Passband, sample_rate_hz: f64) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mut section = design_section(passband, sample_rate_hz);
    let mut forward: Vec<f64> = signal.iter().map(|&v| section.process(v)).collect();
    section.reset();
    forward.reverse();
    let mut backward: Vec<f64> = forward.iter().map(|&v| section.process(v)).collect();
    backward.reverse();
    backward
}

/// Condition a raw EMG signal. Without a passband the signal passes through
/// untouched, bit for bit.
pub fn filter_emg(
    signal: &[f64],
    passband: Option<&Passband>,
    sample_rate_hz: f64,
) -> Vec<f64> {
    match passband {
        None => signal.to_vec(),
        Some(band) => bandpass_zero_phase(signal, band, sample_rate_hz),
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn no_passband_is_exact_identity() {
        let signal = vec![0.1, -2.5, 3.25, f64::MIN_POSITIVE, 1e9];
        assert_eq!(filter_emg(&signal, None, 1000.0), signal);
    }

    #[test]
    fn degenerate_passbands_are_rejected() {
        for (low, high) in [(50.0, 10.0), (20.0, 20.0), (0.0, 10.0), (-5.0, 10.0), (10.0, -1.0)] {
            let err = Passband::new(low, high).unwrap_err();
            match err {
                GaitError::InvalidPassband { low: l, high: h } => {
                    assert_eq!((l, h), (low, high));
                }
                other => panic!("unexpected error {other:?}"),
            }
        }
        assert!(Passband::new(20.0, 400.0).is_ok());
    }

    #[test]
    fn bandpass_removes_dc() {
        let passband = Passband::new(20.0, 300.0).unwrap();
        let dc = vec![1.0; 2048];
        let out = bandpass_zero_phase(&dc, &passband, 1000.0);
        let rms = (out.iter().map(|v| v * v).sum::<f64>() / out.len() as f64).sqrt();
        assert!(rms < 0.05, "residual rms {rms}");
    }

    #[test]
    fn zero_phase_keeps_symmetric_input_symmetric() {
        // A forward-backward filter has no group delay, so a symmetric
        // pulse must stay symmetric.
        let n = 513;
        let pulse: Vec<f64> = (0..n)
            .map(|i| {
                let x = (i as f64 - (n - 1) as f64 / 2.0) / 20.0;
                (-x * x).exp()
            })
            .collect();
        let passband = Passband::new(5.0, 200.0).unwrap();
        let out = bandpass_zero_phase(&pulse, &passband, 1000.0);
        assert_eq!(out.len(), n);
        for i in 0..n / 2 {
            assert!(
                (out[i] - out[n - 1 - i]).abs() < 1e-9,
                "asymmetry at {i}: {} vs {}",
                out[i],
                out[n - 1 - i]
            );
        }
    }

    #[test]
    fn filtered_noise_stays_finite_and_sized() {
        let mut rng = StdRng::seed_from_u64(7);
        let noise: Vec<f64> = (0..4096).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let passband = Passband::new(20.0, 450.0).unwrap();
        let out = bandpass_zero_phase(&noise, &passband, 1000.0);
        assert_eq!(out.len(), noise.len());
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
