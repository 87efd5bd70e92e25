pub mod config;
pub mod cycle;
pub mod electrode;
pub mod error;
pub mod filter;
pub mod model;
pub mod normal;
pub mod registry;
pub mod report;
pub mod side;
pub mod trial;

pub use config::ReportConfig;
pub use cycle::{normalize_to_gait_cycle, CycleSpan, GaitCycles, GAIT_CYCLE_POINTS};
pub use electrode::{ChannelUsability, ResolverState};
pub use error::GaitError;
pub use filter::{filter_emg, Passband};
pub use model::{ReadStrategy, VariableModel};
pub use normal::NormalDataset;
pub use registry::ModelRegistry;
pub use report::{build_report, EmgTrace, GaitReport, ModelTrace};
pub use side::Side;
pub use trial::{ForcePlates, TrialData};
