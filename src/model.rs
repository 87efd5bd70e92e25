//! Variable model definitions (Plug-in Gait, muscle length, etc.).
//!
//! A model names the capture channels to read, how their vector components
//! decompose into scalar variables, and the display/normal-data metadata
//! for each resulting variable. For a new model, build a `VariableModel`
//! and register it.

use std::collections::HashMap;

use crate::side::{dict_with_side, list_with_side};

/// Fixed axis order for vector-valued capture channels.
pub const AXES: [&str; 3] = ["X", "Y", "Z"];

/// How a multi-component capture channel decomposes into scalar variables.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadStrategy {
    /// Each channel yields three variables suffixed `X`, `Y`, `Z`, bound to
    /// vector components 0, 1, 2.
    SplitXyz,
    /// Each channel yields one variable bound to the given component.
    DimensionIndex(usize),
    /// Each channel is already scalar; one variable, no component index.
    Identity,
}

/// One entry of a model expansion: the final variable name, the capture
/// channel it reads from, and which vector component (if any) it takes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandedVar {
    pub name: String,
    pub source: String,
    pub component: Option<usize>,
}

/// A family of biomechanical outputs, e.g. Plug-in Gait lower body.
#[derive(Clone, Debug)]
pub struct VariableModel {
    /// Registry lookup tag, e.g. "PiG".
    pub model_type: String,
    pub desc: String,
    /// Capture channels to read, in order.
    pub read_vars: Vec<String>,
    pub read_strategy: ReadStrategy,
    /// Final variable name -> display label. Keys must match `expand()`.
    pub var_labels: HashMap<String, String>,
    /// Final variable name -> key in the normal-reference dataset.
    pub normal_data_map: HashMap<String, String>,
    /// Final variable name -> polarity axis caption.
    pub y_labels: HashMap<String, String>,
}

impl VariableModel {
    /// Deterministic expansion of `read_vars` under the read strategy.
    pub fn expand(&self) -> Vec<ExpandedVar> {
        match self.read_strategy {
            ReadStrategy::SplitXyz => self
                .read_vars
                .iter()
                .flat_map(|var| {
                    AXES.iter().enumerate().map(move |(component, axis)| ExpandedVar {
                        name: format!("{var}{axis}"),
                        source: var.clone(),
                        component: Some(component),
                    })
                })
                .collect(),
            ReadStrategy::DimensionIndex(component) => self
                .read_vars
                .iter()
                .map(|var| ExpandedVar {
                    name: var.clone(),
                    source: var.clone(),
                    component: Some(component),
                })
                .collect(),
            ReadStrategy::Identity => self
                .read_vars
                .iter()
                .map(|var| ExpandedVar {
                    name: var.clone(),
                    source: var.clone(),
                    component: None,
                })
                .collect(),
        }
    }

    pub fn label(&self, name: &str) -> Option<&str> {
        self.var_labels.get(name).map(String::as_str)
    }

    pub fn y_label(&self, name: &str) -> Option<&str> {
        self.y_labels.get(name).map(String::as_str)
    }

    pub fn normal_key(&self, name: &str) -> Option<&str> {
        self.normal_data_map.get(name).map(String::as_str)
    }
}

fn owned_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Plug-in Gait lower body.
pub fn pig_lowerbody() -> VariableModel {
    let read_vars = list_with_side(&[
        "HipMoment",
        "KneeMoment",
        "AnkleMoment",
        "HipPower",
        "KneePower",
        "AnklePower",
        "HipAngles",
        "KneeAngles",
        "AbsAnkleAngle",
        "AnkleAngles",
        "PelvisAngles",
        "FootProgressAngles",
    ]);

    let var_labels = dict_with_side(
        &owned_map(&[
            ("AbsAnkleAngleX", "Absolute ankle dorsi/plant"),
            ("AbsAnkleAngleY", "Absolute ankle adduction"),
            ("AbsAnkleAngleZ", "Absolute ankle rotation"),
            ("AnkleAnglesX", "Ankle dorsi/plant"),
            ("AnkleAnglesY", "Ankle adduction"),
            ("AnkleAnglesZ", "Ankle rotation"),
            ("AnkleMomentX", "Ankle dors/plan moment"),
            ("AnkleMomentY", "Ankle ab/add moment"),
            ("AnkleMomentZ", "Ankle rotation moment"),
            ("AnklePowerX", "Ankle power (sagittal)"),
            ("AnklePowerY", "Ankle power (coronal)"),
            ("AnklePowerZ", "Ankle power"),
            ("FootProgressAnglesX", "Foot progress (sagittal)"),
            ("FootProgressAnglesY", "Foot progress (coronal)"),
            ("FootProgressAnglesZ", "Foot progress angles"),
            ("HipAnglesX", "Hip flexion"),
            ("HipAnglesY", "Hip adduction"),
            ("HipAnglesZ", "Hip rotation"),
            ("HipMomentX", "Hip flex/ext moment"),
            ("HipMomentY", "Hip ab/add moment"),
            ("HipMomentZ", "Hip rotation moment"),
            ("HipPowerX", "Hip power (sagittal)"),
            ("HipPowerY", "Hip power (coronal)"),
            ("HipPowerZ", "Hip power"),
            ("KneeAnglesX", "Knee flexion"),
            ("KneeAnglesY", "Knee adduction"),
            ("KneeAnglesZ", "Knee rotation"),
            ("KneeMomentX", "Knee flex/ext moment"),
            ("KneeMomentY", "Knee ab/add moment"),
            ("KneeMomentZ", "Knee rotation moment"),
            ("KneePowerX", "Knee power (sagittal)"),
            ("KneePowerY", "Knee power (coronal)"),
            ("KneePowerZ", "Knee power"),
            ("PelvisAnglesX", "Pelvic tilt"),
            ("PelvisAnglesY", "Pelvic obliquity"),
            ("PelvisAnglesZ", "Pelvic rotation"),
        ]),
        false,
    );

    let normal_data_map = dict_with_side(
        &owned_map(&[
            ("AnkleAnglesX", "DorsiPlanFlex"),
            ("AnkleAnglesZ", "FootRotation"),
            ("AnkleMomentX", "DorsiPlanFlexMoment"),
            ("AnklePowerZ", "AnklePower"),
            ("FootProgressAnglesZ", "FootProgression"),
            ("HipAnglesX", "HipFlexExt"),
            ("HipAnglesY", "HipAbAdduct"),
            ("HipAnglesZ", "HipRotation"),
            ("HipMomentX", "HipFlexExtMoment"),
            ("HipMomentY", "HipAbAdductMoment"),
            ("HipMomentZ", "HipRotationMoment"),
            ("HipPowerZ", "HipPower"),
            ("KneeAnglesX", "KneeFlexExt"),
            ("KneeAnglesY", "KneeValgVar"),
            ("KneeAnglesZ", "KneeRotation"),
            ("KneeMomentX", "KneeFlexExtMoment"),
            ("KneeMomentY", "KneeValgVarMoment"),
            ("KneeMomentZ", "KneeRotationMoment"),
            ("KneePowerZ", "KneePower"),
            ("PelvisAnglesX", "PelvicTilt"),
            ("PelvisAnglesY", "PelvicObliquity"),
            ("PelvisAnglesZ", "PelvicRotation"),
        ]),
        false,
    );

    let y_labels = dict_with_side(
        &owned_map(&[
            ("AnkleAnglesX", "Pla     (deg)      Dor"),
            ("AnkleAnglesZ", "Ext     (deg)      Int"),
            ("AnkleMomentX", "Int dors    Nm/kg    Int plan"),
            ("AnklePowerZ", "Abs    W/kg    Gen"),
            ("FootProgressAnglesZ", "Ext     (deg)      Int"),
            ("HipAnglesX", "Ext     (deg)      Flex"),
            ("HipAnglesY", "Abd     (deg)      Add"),
            ("HipAnglesZ", "Ext     (deg)      Int"),
            ("HipMomentX", "Int flex    Nm/kg    Int ext"),
            ("HipMomentY", "Int add    Nm/kg    Int abd"),
            ("HipMomentZ", "Int flex    Nm/kg    Int ext"),
            ("HipPowerZ", "Abs    W/kg    Gen"),
            ("KneeAnglesX", "Ext     (deg)      Flex"),
            ("KneeAnglesY", "Val     (deg)      Var"),
            ("KneeAnglesZ", "Ext     (deg)      Int"),
            ("KneeMomentX", "Int flex    Nm/kg    Int ext"),
            ("KneeMomentY", "Int var    Nm/kg    Int valg"),
            ("KneeMomentZ", "Int flex    Nm/kg    Int ext"),
            ("KneePowerZ", "Abs    W/kg    Gen"),
            ("PelvisAnglesX", "Pst     (deg)      Ant"),
            ("PelvisAnglesY", "Dwn     (deg)      Up"),
            ("PelvisAnglesZ", "Bak     (deg)      For"),
        ]),
        false,
    );

    VariableModel {
        model_type: "PiG".into(),
        desc: "Plug-in Gait lower body".into(),
        read_vars,
        read_strategy: ReadStrategy::SplitXyz,
        var_labels,
        normal_data_map,
        y_labels,
    }
}

/// Muscle length outputs (MuscleLength model).
pub fn muscle_length() -> VariableModel {
    let base_labels = owned_map(&[
        ("AdBrLength", "AdBrLength"),
        ("AdLoLength", "AdLoLength"),
        ("AdMaInfLength", "AdMaInfLength"),
        ("AdMaMidLength", "AdMaMidLength"),
        ("AdMaSupLength", "AdMaSupLength"),
        ("BiFLLength", "Biceps femoris length"),
        ("BiFSLength", "BiFSLength"),
        ("ExDLLength", "ExDLLength"),
        ("ExHLLength", "ExHLLength"),
        ("FlDLLength", "FlDLLength"),
        ("FlHLLength", "FlHLLength"),
        ("GMedAntLength", "GMedAntLength"),
        ("GMedMidLength", "GMedMidLength"),
        ("GMedPosLength", "GMedPosLength"),
        ("GMinAntLength", "GMinAntLength"),
        ("GMinMidLength", "GMinMidLength"),
        ("GMinPosLength", "GMinPosLength"),
        ("GemeLength", "GemeLength"),
        ("GlMaInfLength", "GlMaInfLength"),
        ("GlMaMidLength", "GlMaMidLength"),
        ("GlMaSupLength", "GlMaSupLength"),
        ("GracLength", "Gracilis length"),
        ("IliaLength", "IliaLength"),
        ("LaGaLength", "Lateral gastrocnemius length"),
        ("MeGaLength", "Medial gastrocnemius length"),
        ("PELOLength", "PELOLength"),
        ("PeBrLength", "PeBrLength"),
        ("PeTeLength", "PeTeLength"),
        ("PectLength", "PectLength"),
        ("PeriLength", "PeriLength"),
        ("PsoaLength", "Psoas length"),
        ("QuFeLength", "QuFeLength"),
        ("ReFeLength", "Rectus femoris length"),
        ("SartLength", "SartLength"),
        ("SeMeLength", "Semimembranosus length"),
        ("SeTeLength", "Semitendinosus length"),
        ("SoleLength", "Soleus length"),
        ("TiAnLength", "Tibialis anterior length"),
        ("TiPoLength", "TiPoLength"),
        ("VaInLength", "VaInLength"),
        ("VaLaLength", "VaLaLength"),
        ("VaMeLength", "VaMeLength"),
    ]);

    let var_labels = dict_with_side(&base_labels, false);
    let mut read_vars: Vec<String> = var_labels.keys().cloned().collect();
    read_vars.sort();
    let y_labels = read_vars
        .iter()
        .map(|var| (var.clone(), "Length (mm)".to_string()))
        .collect();

    VariableModel {
        model_type: "musclelen".into(),
        desc: "Muscle length (MuscleLength model)".into(),
        read_vars,
        read_strategy: ReadStrategy::DimensionIndex(0),
        var_labels,
        normal_data_map: HashMap::new(),
        y_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_xyz_expands_hip_angles() {
        let model = VariableModel {
            model_type: "pig_lowerbody".into(),
            desc: String::new(),
            read_vars: vec!["HipAngles".into()],
            read_strategy: ReadStrategy::SplitXyz,
            var_labels: HashMap::new(),
            normal_data_map: HashMap::new(),
            y_labels: HashMap::new(),
        };
        let expanded = model.expand();
        assert_eq!(
            expanded,
            vec![
                ExpandedVar {
                    name: "HipAnglesX".into(),
                    source: "HipAngles".into(),
                    component: Some(0),
                },
                ExpandedVar {
                    name: "HipAnglesY".into(),
                    source: "HipAngles".into(),
                    component: Some(1),
                },
                ExpandedVar {
                    name: "HipAnglesZ".into(),
                    source: "HipAngles".into(),
                    component: Some(2),
                },
            ]
        );
    }

    #[test]
    fn split_xyz_produces_three_entries_per_var() {
        let model = pig_lowerbody();
        let expanded = model.expand();
        assert_eq!(expanded.len(), model.read_vars.len() * 3);
        for var in &expanded {
            let last = var.name.chars().last().unwrap();
            assert!(matches!(last, 'X' | 'Y' | 'Z'), "{}", var.name);
        }
    }

    #[test]
    fn pig_labels_match_expansion() {
        let model = pig_lowerbody();
        let mut expanded: Vec<String> = model.expand().into_iter().map(|v| v.name).collect();
        expanded.sort();
        let mut labeled: Vec<String> = model.var_labels.keys().cloned().collect();
        labeled.sort();
        assert_eq!(expanded, labeled);
    }

    #[test]
    fn dimension_index_keeps_names() {
        let model = muscle_length();
        let expanded = model.expand();
        assert_eq!(expanded.len(), model.read_vars.len());
        for var in &expanded {
            assert_eq!(var.name, var.source);
            assert_eq!(var.component, Some(0));
        }
        assert!(model.var_labels.contains_key("LPsoaLength"));
        assert_eq!(model.label("RSoleLength"), Some("Soleus length"));
    }

    #[test]
    fn identity_has_no_component() {
        let model = VariableModel {
            model_type: "scalar".into(),
            desc: String::new(),
            read_vars: vec!["StrideLength".into()],
            read_strategy: ReadStrategy::Identity,
            var_labels: HashMap::new(),
            normal_data_map: HashMap::new(),
            y_labels: HashMap::new(),
        };
        let expanded = model.expand();
        assert_eq!(expanded.len(), 1);
        assert_eq!(expanded[0].component, None);
        assert_eq!(expanded[0].name, "StrideLength");
    }
}
