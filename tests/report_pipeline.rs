// End-to-end report assembly over a synthetic trial.

use std::collections::{HashMap, HashSet};

use ndarray::Array2;

use gaitkit::cycle::NORMAL_DATA_POINTS;
use gaitkit::{
    build_report, ChannelUsability, ForcePlates, GaitCycles, ModelRegistry, NormalDataset,
    ReportConfig, Side, TrialData, GAIT_CYCLE_POINTS,
};
use gaitkit::cycle::CycleSpan;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// One stance worth of vertical loading, padded with swing.
fn loaded_plate() -> Vec<f64> {
    let mut fz = vec![0.0; 20];
    fz.extend((0..60).map(|i| 700.0 * (i as f64 / 59.0 * std::f64::consts::PI).sin()));
    fz.extend(vec![0.0; 20]);
    fz
}

fn pig_output(frames: usize, scale: f64) -> Array2<f64> {
    Array2::from_shape_fn((3, frames), |(row, col)| {
        scale * (row as f64 + 1.0) * (col as f64 * 0.1).sin()
    })
}

fn emg_burst(samples: usize) -> Vec<f64> {
    (0..samples)
        .map(|i| 0.2 * (i as f64 * 0.7).sin() * (i as f64 * 0.013).cos())
        .collect()
}

fn synthetic_trial() -> TrialData {
    let frames = 42;
    let mut model_outputs = HashMap::new();
    for channel in [
        "LHipAngles",
        "LKneeAngles",
        "LAnkleAngles",
        "LPelvisAngles",
        "LHipMoment",
        "LKneeMoment",
        "LHipPower",
    ] {
        model_outputs.insert(channel.to_string(), pig_output(frames, 10.0));
    }
    let mut analog = HashMap::new();
    for channel in ["LHam7", "LRec3", "LTibA1", "LGlut2", "LVas4", "LPer6", "LGas5", "LSol8"] {
        analog.insert(channel.to_string(), emg_burst(1500));
    }
    TrialData {
        subject: "S07".into(),
        trial_name: "walk12".into(),
        model_outputs,
        analog,
        analog_rate_hz: 1000.0,
        force_plates: ForcePlates {
            left_fz: loaded_plate(),
            right_fz: vec![0.0; 100],
        },
        cycles: GaitCycles {
            left: CycleSpan {
                model_frames: frames,
                analog_samples: 1400,
            },
            right: CycleSpan {
                model_frames: 40,
                analog_samples: 1333,
            },
        },
        disconnected: HashSet::new(),
    }
}

fn reference_data() -> NormalDataset {
    let mut text = String::from("# synthetic population reference\n");
    for key in ["HipFlexExt", "KneeFlexExt", "HipFlexExtMoment", "HipPower"] {
        text.push_str(&format!("!{key}\n"));
        for i in 0..NORMAL_DATA_POINTS {
            text.push_str(&format!("{} 2.5\n", i as f64 * 0.4));
        }
    }
    text.push_str("!Ham\n5 30\n88 100\n");
    text.push_str("!Gas\n30 55\n");
    NormalDataset::parse(&text, "reference.gcd").unwrap()
}

#[test]
fn full_report_from_detected_side() {
    init_logging();
    let registry = ModelRegistry::with_builtin_models().unwrap();
    let trial = synthetic_trial();
    let normals = reference_data();
    let mut config = ReportConfig::default();
    config.emg_passband = Some([20.0, 400.0]);

    let report = build_report(&registry, &trial, &normals, &config).unwrap();

    assert_eq!(report.subject, "S07");
    assert_eq!(report.trial_name, "walk12");
    assert_eq!(report.side, Side::Left);

    // every left-side PiG component appears exactly once
    assert_eq!(report.curves.len(), 36);
    let mut names: Vec<&str> = report.curves.iter().map(|c| c.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 36);

    // provided channels produce full-length traces, absent ones stay empty
    let hip = report.curves.iter().find(|c| c.name == "LHipAnglesX").unwrap();
    assert_eq!(hip.points.len(), GAIT_CYCLE_POINTS);
    assert!(hip.normal.is_some());
    assert_eq!(hip.y_label.as_deref(), Some("Ext     (deg)      Flex"));
    let foot = report
        .curves
        .iter()
        .find(|c| c.name == "LFootProgressAnglesZ")
        .unwrap();
    assert!(foot.points.is_empty());

    // all eight default EMG channels, filtered at native cycle resolution
    assert_eq!(report.emg.len(), 8);
    for trace in &report.emg {
        assert_eq!(trace.usability, ChannelUsability::Usable);
        assert_eq!(trace.points.len(), 1400);
        assert_eq!(trace.percent.len(), 1400);
        assert!(trace.points.iter().all(|v| v.is_finite()));
    }
    let ham = report.emg.iter().find(|t| t.channel == "LHam").unwrap();
    assert_eq!(ham.physical, "LHam7");
    assert_eq!(ham.label, "Hamstrings");
    assert_eq!(ham.activations.len(), 2);

    assert!(report.skipped_normal_keys.is_empty());
}

#[test]
fn replacement_and_disconnection_flow() {
    init_logging();
    let registry = ModelRegistry::with_builtin_models().unwrap();
    let mut trial = synthetic_trial();
    trial.disconnected.insert("LVas4".into());
    let normals = reference_data();
    let mut config = ReportConfig::default();
    config.side = Some(Side::Left);
    config.emg_replacements.insert("LHam".into(), "LGas5".into());

    let report = build_report(&registry, &trial, &normals, &config).unwrap();

    let ham = report.emg.iter().find(|t| t.channel == "LHam").unwrap();
    assert!(ham.substituted);
    assert_eq!(ham.physical, "LGas5");
    assert_eq!(ham.usability, ChannelUsability::Usable);
    assert!(!ham.points.is_empty());

    // the borrowed electrode may not be plotted again under its own name
    let gas = report.emg.iter().find(|t| t.channel == "LGas").unwrap();
    assert_eq!(gas.usability, ChannelUsability::Reused);
    assert!(gas.points.is_empty());

    let vas = report.emg.iter().find(|t| t.channel == "LVas").unwrap();
    assert_eq!(vas.usability, ChannelUsability::Disconnected);
    assert!(vas.points.is_empty());

    // fresh resolver per report: the reuse mark must not leak into a rerun
    let rerun = build_report(&registry, &trial, &normals, &config).unwrap();
    let gas = rerun.emg.iter().find(|t| t.channel == "LGas").unwrap();
    assert_eq!(gas.usability, ChannelUsability::Reused);
    let ham = rerun.emg.iter().find(|t| t.channel == "LHam").unwrap();
    assert_eq!(ham.usability, ChannelUsability::Usable);
}

#[test]
fn config_json_drives_the_report() {
    init_logging();
    let registry = ModelRegistry::with_builtin_models().unwrap();
    let trial = synthetic_trial();
    let normals = reference_data();
    let config: ReportConfig = serde_json::from_str(
        r#"{
            "model_type": "PiG",
            "side": "L",
            "emg_passband": [10.0, 450.0],
            "emg_channels": ["Gas", "Sol"]
        }"#,
    )
    .unwrap();

    let report = build_report(&registry, &trial, &normals, &config).unwrap();
    assert_eq!(report.side, Side::Left);
    assert_eq!(report.emg.len(), 2);
    assert_eq!(report.emg[0].channel, "LGas");
    assert_eq!(report.emg[1].channel, "LSol");
}
