use std::collections::HashMap;

use serde::Deserialize;

use crate::error::GaitError;
use crate::filter::Passband;
use crate::side::Side;

/// EMG channels a report covers when the caller does not choose its own set.
pub const DEFAULT_EMG_CHANNELS: [&str; 8] =
    ["Ham", "Rec", "TibA", "Glut", "Vas", "Per", "Gas", "Sol"];

/// Already-parsed configuration surface for one report. The config file /
/// command line mechanics live in an external collaborator; this crate only
/// consumes the resulting values.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Variable-model type tag, e.g. "PiG".
    pub model_type: String,
    /// Explicit side override; `None` falls back to force-plate detection.
    pub side: Option<Side>,
    /// EMG bandpass `[f1, f2]` in Hz; `None` disables filtering.
    pub emg_passband: Option<[f64; 2]>,
    /// Logical channel -> substitute physical channel.
    pub emg_replacements: HashMap<String, String>,
    /// Base electrode names to report, in plot order.
    pub emg_channels: Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            model_type: "PiG".into(),
            side: None,
            emg_passband: None,
            emg_replacements: HashMap::new(),
            emg_channels: DEFAULT_EMG_CHANNELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ReportConfig {
    /// Validated passband, or `None` when filtering is disabled.
    pub fn passband(&self) -> Result<Option<Passband>, GaitError> {
        match self.emg_passband {
            None => Ok(None),
            Some([low, high]) => Passband::new(low, high).map(Some),
        }
    }
}
