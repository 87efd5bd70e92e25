use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GaitError;

/// Vertical force (N) a plate must carry before a sample counts as loaded.
const LOAD_THRESHOLD_N: f64 = 20.0;
/// Minimum contiguous loaded samples for a valid stance interval.
const MIN_STANCE_SAMPLES: usize = 5;

/// Limb side. Channel and variable names use the `L`/`R` prefix convention
/// at the capture boundary; everywhere else the side is this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
}

impl Side {
    pub fn prefix(&self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    /// Display suffix used when labels need a side annotation.
    pub fn suffix(&self) -> &'static str {
        match self {
            Side::Left => " (L)",
            Side::Right => " (R)",
        }
    }

    pub fn opposite(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Qualify a base name with this side's prefix.
    pub fn qualify(&self, base: &str) -> String {
        format!("{}{}", self.prefix(), base)
    }

    /// Split a side-qualified name into its side and base name.
    pub fn strip_prefix(name: &str) -> Option<(Side, &str)> {
        if let Some(rest) = name.strip_prefix('L') {
            Some((Side::Left, rest))
        } else if let Some(rest) = name.strip_prefix('R') {
            Some((Side::Right, rest))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Prepend each base name with 'L' and 'R', producing the side-qualified
/// pair list. Many capture variables share a name apart from the leading
/// side letter.
pub fn list_with_side(vars: &[&str]) -> Vec<String> {
    let mut out = Vec::with_capacity(vars.len() * 2);
    out.extend(vars.iter().map(|v| format!("L{v}")));
    out.extend(vars.iter().map(|v| format!("R{v}")));
    out
}

/// Prepend map keys with 'L' and 'R'. With `append_side`, every value also
/// gets the matching ` (L)` / ` (R)` annotation.
pub fn dict_with_side(
    map: &HashMap<String, String>,
    append_side: bool,
) -> HashMap<String, String> {
    let mut out = HashMap::with_capacity(map.len() * 2);
    for (key, value) in map {
        for side in [Side::Left, Side::Right] {
            let suffix = if append_side { side.suffix() } else { "" };
            out.insert(side.qualify(key), format!("{value}{suffix}"));
        }
    }
    out
}

fn longest_loaded_run(forces: &[f64]) -> usize {
    let mut best = 0usize;
    let mut run = 0usize;
    for &f in forces {
        if f.abs() > LOAD_THRESHOLD_N {
            run += 1;
            best = best.max(run);
        } else {
            run = 0;
        }
    }
    best
}

/// Detect which limb leads the trial from the force-plate vertical loading.
///
/// Fallback only: an explicitly configured side always takes precedence and
/// this function is never consulted for it.
pub fn detect_side(left_fz: &[f64], right_fz: &[f64]) -> Result<Side, GaitError> {
    let left_loaded = longest_loaded_run(left_fz) >= MIN_STANCE_SAMPLES;
    let right_loaded = longest_loaded_run(right_fz) >= MIN_STANCE_SAMPLES;
    match (left_loaded, right_loaded) {
        (true, false) => Ok(Side::Left),
        (false, true) => Ok(Side::Right),
        (false, false) => Err(GaitError::SideDetection(
            "no stance-phase loading on either force plate".into(),
        )),
        (true, true) => Err(GaitError::SideDetection(
            "both force plates loaded; specify the side explicitly".into(),
        )),
    }
}
