use std::collections::{HashMap, HashSet};

use ndarray::Array2;

use crate::cycle::GaitCycles;

/// Vertical force-plate loading per limb, at the plate's native rate.
#[derive(Clone, Debug, Default)]
pub struct ForcePlates {
    pub left_fz: Vec<f64>,
    pub right_fz: Vec<f64>,
}

/// Pure-data snapshot of one capture trial, as handed over by the capture
/// session collaborator. Model outputs are components x frames matrices
/// keyed by side-qualified channel name; analog channels are raw samples
/// keyed by full physical channel name (electrode plus lead number).
#[derive(Clone, Debug)]
pub struct TrialData {
    pub subject: String,
    pub trial_name: String,
    pub model_outputs: HashMap<String, Array2<f64>>,
    pub analog: HashMap<String, Vec<f64>>,
    pub analog_rate_hz: f64,
    pub force_plates: ForcePlates,
    pub cycles: GaitCycles,
    /// Physical channels known to be non-functional for this trial.
    pub disconnected: HashSet<String>,
}

impl TrialData {
    /// Extract one scalar series from a model-output channel. `None`
    /// component means the channel is scalar (stored as a single row).
    pub fn output_component(&self, channel: &str, component: Option<usize>) -> Option<Vec<f64>> {
        let output = self.model_outputs.get(channel)?;
        let row = component.unwrap_or(0);
        if row >= output.nrows() {
            return None;
        }
        Some(output.row(row).to_vec())
    }

    pub fn available_outputs(&self) -> impl Iterator<Item = &str> {
        self.model_outputs.keys().map(String::as_str)
    }

    pub fn analog_names(&self) -> impl Iterator<Item = &str> {
        self.analog.keys().map(String::as_str)
    }
}
