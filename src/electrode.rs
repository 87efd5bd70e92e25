//! EMG electrode naming and per-report channel resolution.
//!
//! Logical channels are side-qualified electrode names (`LHam`); physical
//! channels carry the capture system's lead number (`LHam7`). A report
//! resolves each logical channel through the caller's replacement map,
//! then checks the result against the trial's disconnected set and the
//! substitutes already consumed earlier in the same pass.

use std::collections::{HashMap, HashSet};

use crate::error::GaitError;
use crate::side::Side;

/// Base electrode names the capture setup can legally carry.
pub const ELECTRODES: [&str; 8] = ["Ham", "Rec", "TibA", "Glut", "Vas", "Per", "Gas", "Sol"];

/// Display label for a base electrode name.
pub fn electrode_label(base: &str) -> &str {
    match base {
        "Ham" => "Hamstrings",
        "Rec" => "Rectus femoris",
        "TibA" => "Tibialis anterior",
        "Glut" => "Gluteus",
        "Vas" => "Vastus",
        "Per" => "Peroneus",
        "Gas" => "Gastrocnemius",
        "Sol" => "Soleus",
        other => other,
    }
}

fn split_lead_number(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// True when `name` is a side-qualified electrode, optionally with a
/// trailing lead number.
pub fn is_legal_name(name: &str) -> bool {
    match Side::strip_prefix(split_lead_number(name)) {
        Some((_, base)) => ELECTRODES.contains(&base),
        None => false,
    }
}

/// Resolve a partial channel name to the full physical channel name, e.g.
/// `LHam` -> `LHam7`. Exact matches win; otherwise the lexicographically
/// first prefix match keeps the lookup deterministic.
pub fn find_channel<'a, I>(partial: &str, available: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<&str> = None;
    for name in available {
        if name == partial {
            return Some(name);
        }
        if name.starts_with(partial) && best.map_or(true, |b| name < b) {
            best = Some(name);
        }
    }
    best
}

/// Result of resolving a logical channel through the replacement map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Physical channel the data should be read from.
    pub physical: String,
    /// Whether a replacement-map substitution happened.
    pub substituted: bool,
}

/// Tri-state outcome the rendering layer turns into a trace or annotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChannelUsability {
    Usable,
    Disconnected,
    Reused,
}

impl ChannelUsability {
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            ChannelUsability::Usable => None,
            ChannelUsability::Disconnected => Some("disconnected"),
            ChannelUsability::Reused => Some("reused"),
        }
    }
}

/// Per-report electrode resolution state. Built fresh for every report
/// invocation and discarded afterwards; `reused` marks accumulated during
/// one pass must never leak into the next report.
#[derive(Debug)]
pub struct ResolverState {
    disconnected: HashSet<String>,
    reused: HashSet<String>,
    replacements: HashMap<String, String>,
}

impl ResolverState {
    /// Validates every replacement entry against the legal electrode set.
    pub fn new(
        disconnected: HashSet<String>,
        replacements: HashMap<String, String>,
    ) -> Result<Self, GaitError> {
        for (logical, physical) in &replacements {
            if !is_legal_name(logical) || !is_legal_name(physical) {
                return Err(GaitError::IllegalReplacement {
                    logical: logical.clone(),
                    physical: physical.clone(),
                });
            }
        }
        Ok(Self {
            disconnected,
            reused: HashSet::new(),
            replacements,
        })
    }

    /// Map a logical channel to the physical channel to read. Names outside
    /// the replacement map pass through unchanged.
    pub fn resolve(&self, logical: &str) -> Result<Resolution, GaitError> {
        match self.replacements.get(logical) {
            Some(physical) => {
                if !is_legal_name(physical) {
                    return Err(GaitError::IllegalReplacement {
                        logical: logical.to_string(),
                        physical: physical.clone(),
                    });
                }
                Ok(Resolution {
                    physical: physical.clone(),
                    substituted: true,
                })
            }
            None => Ok(Resolution {
                physical: logical.to_string(),
                substituted: false,
            }),
        }
    }

    /// Usability of a channel whose data comes from `physical` and whose own
    /// identity (the name it would be plotted under) is `own`. Must be
    /// evaluated before any `mark_reused` call for the same channel.
    pub fn usability(&self, physical: &str, own: &str) -> ChannelUsability {
        if self.disconnected.contains(physical) {
            ChannelUsability::Disconnected
        } else if self.reused.contains(own) {
            ChannelUsability::Reused
        } else {
            ChannelUsability::Usable
        }
    }

    pub fn is_usable(&self, physical: &str, own: &str) -> bool {
        self.usability(physical, own) == ChannelUsability::Usable
    }

    /// Record that `physical` was consumed as a substitute. Idempotent.
    pub fn mark_reused(&mut self, physical: &str) {
        self.reused.insert(physical.to_string());
    }

    pub fn reused(&self) -> &HashSet<String> {
        &self.reused
    }

    pub fn disconnected(&self) -> &HashSet<String> {
        &self.disconnected
    }
}
