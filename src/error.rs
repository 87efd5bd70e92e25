use thiserror::Error;

#[derive(Debug, Error)]
pub enum GaitError {
    #[error("model definition for '{model_type}' is invalid: {reason}")]
    ModelDefinition { model_type: String, reason: String },
    #[error("unknown variable model '{0}'")]
    UnknownModel(String),
    #[error("cannot replace electrode '{logical}' with '{physical}': not a legal electrode name")]
    IllegalReplacement { logical: String, physical: String },
    #[error("invalid EMG passband [{low}, {high}] Hz; expected 0 < f1 < f2")]
    InvalidPassband { low: f64, high: f64 },
    #[error("normal data file '{path}': {reason}")]
    NormalDataFile { path: String, reason: String },
    #[error("no normal data for key '{0}'")]
    UnknownNormalKey(String),
    #[error("cannot determine gait side: {0}")]
    SideDetection(String),
}
