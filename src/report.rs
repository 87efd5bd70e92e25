//! Single-pass report assembly.
//!
//! Pulls one trial through side resolution, variable expansion, electrode
//! resolution, filtering and gait-cycle normalization, and hands back pure
//! data. The rendering layer decides how traces, bands and annotations end
//! up on paper; nothing here calls into it.

use log::{debug, info};

use crate::config::ReportConfig;
use crate::cycle::{normalize_to_gait_cycle, percent_grid, GAIT_CYCLE_POINTS};
use crate::electrode::{electrode_label, find_channel, ChannelUsability, ResolverState};
use crate::error::GaitError;
use crate::filter::filter_emg;
use crate::normal::{ActivationInterval, NormalDataset, NormalPoint};
use crate::registry::ModelRegistry;
use crate::side::{detect_side, Side};
use crate::trial::TrialData;

/// One model-output variable, normalized to the 101-point cycle grid.
#[derive(Clone, Debug)]
pub struct ModelTrace {
    /// Side-qualified final variable name, e.g. `RHipAnglesX`.
    pub name: String,
    pub label: String,
    pub y_label: Option<String>,
    /// 101 points, or empty when the trial lacks the channel.
    pub points: Vec<f64>,
    /// 51-point normal band at 2% steps, when the dataset has one.
    pub normal: Option<Vec<NormalPoint>>,
}

/// One EMG channel at native per-cycle resolution, axis relabeled 0-100%.
#[derive(Clone, Debug)]
pub struct EmgTrace {
    /// Side-qualified logical channel, e.g. `LHam`.
    pub channel: String,
    /// Physical channel the data was read from, e.g. `LHam7`.
    pub physical: String,
    pub label: String,
    /// Whether a replacement-map substitution supplied the data.
    pub substituted: bool,
    pub usability: ChannelUsability,
    pub points: Vec<f64>,
    /// 0-100% axis matching `points`.
    pub percent: Vec<f64>,
    /// Expected activation windows for the base electrode.
    pub activations: Vec<ActivationInterval>,
}

/// Pure-data result of one report pass, the hand-off to rendering.
#[derive(Clone, Debug)]
pub struct GaitReport {
    pub subject: String,
    pub trial_name: String,
    pub side: Side,
    pub curves: Vec<ModelTrace>,
    pub emg: Vec<EmgTrace>,
    /// Normal-data keys that failed to parse and were dropped at load time.
    pub skipped_normal_keys: Vec<String>,
}

/// Assemble a report for one trial.
///
/// Configuration errors (unknown model, illegal replacement, degenerate
/// passband, undetectable side without an override) abort before any output
/// exists; per-channel data problems degrade to annotations or empty traces.
pub fn build_report(
    registry: &ModelRegistry,
    trial: &TrialData,
    normals: &NormalDataset,
    config: &ReportConfig,
) -> Result<GaitReport, GaitError> {
    let side = match config.side {
        Some(side) => side,
        None => {
            let detected = detect_side(
                &trial.force_plates.left_fz,
                &trial.force_plates.right_fz,
            )?;
            info!("detected side {detected} from force-plate loading");
            detected
        }
    };
    let model = registry.lookup(&config.model_type)?;
    let passband = config.passband()?;
    // Resolution state lives for exactly one report pass.
    let mut resolver =
        ResolverState::new(trial.disconnected.clone(), config.emg_replacements.clone())?;

    let mut curves = Vec::new();
    for var in model.expand() {
        let channel_side = match Side::strip_prefix(&var.name) {
            Some((channel_side, _)) => channel_side,
            None => side,
        };
        if channel_side != side {
            continue;
        }
        let series = trial
            .output_component(&var.source, var.component)
            .unwrap_or_default();
        let span = trial.cycles.span(channel_side).model_frames;
        let points = normalize_to_gait_cycle(&series, span, GAIT_CYCLE_POINTS);
        let normal = model.normal_key(&var.name).and_then(|key| {
            match normals.lookup(key) {
                Ok(curve) => Some(curve.to_vec()),
                Err(_) => {
                    debug!("no normal band for '{}' (key '{key}')", var.name);
                    None
                }
            }
        });
        curves.push(ModelTrace {
            label: model.label(&var.name).unwrap_or(var.name.as_str()).to_string(),
            y_label: model.y_label(&var.name).map(str::to_string),
            name: var.name,
            points,
            normal,
        });
    }

    let mut emg = Vec::new();
    for base in &config.emg_channels {
        let logical = side.qualify(base);
        let resolution = resolver.resolve(&logical)?;
        // Expand to the capture system's full channel names: the channel's
        // own identity and the physical source it reads from.
        let own = find_channel(&logical, trial.analog_names())
            .map(str::to_string)
            .unwrap_or_else(|| logical.clone());
        let physical = find_channel(&resolution.physical, trial.analog_names())
            .map(str::to_string)
            .unwrap_or_else(|| resolution.physical.clone());

        // Usability before any reuse marking.
        let usability = resolver.usability(&physical, &own);
        let points = if usability == ChannelUsability::Usable {
            match trial.analog.get(&physical) {
                Some(raw) => {
                    let filtered = filter_emg(raw, passband.as_ref(), trial.analog_rate_hz);
                    let span = trial.cycles.span(side).analog_samples;
                    normalize_to_gait_cycle(&filtered, span, span)
                }
                None => Vec::new(),
            }
        } else {
            Vec::new()
        };
        if resolution.substituted {
            debug!("channel {logical} read from substitute {physical}");
            resolver.mark_reused(&physical);
        }
        emg.push(EmgTrace {
            channel: logical,
            physical,
            label: electrode_label(base).to_string(),
            substituted: resolution.substituted,
            usability,
            percent: percent_grid(points.len()),
            points,
            activations: normals.activations(base).to_vec(),
        });
    }

    Ok(GaitReport {
        subject: trial.subject.clone(),
        trial_name: trial.trial_name.clone(),
        side,
        curves,
        emg,
        skipped_normal_keys: normals.skipped_keys().to_vec(),
    })
}
