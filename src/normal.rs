//! Normal-reference dataset loading.
//!
//! The reference file is record oriented: a `!Key` header line opens a
//! record, and the numeric lines that follow belong to it. A record with
//! exactly 51 two-column lines is a (mean, sd) curve sampled at 2% gait
//! cycle steps; a shorter two-column record whose values lie inside 0-100
//! is a list of expected electrode activation intervals, keyed by the base
//! (non-side-qualified) channel name. `#` comments and blank lines are
//! ignored. A malformed record loses only its own key; the file as a whole
//! fails only when nothing can be loaded.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;

use crate::cycle::NORMAL_DATA_POINTS;
use crate::error::GaitError;

/// One normal-band sample: population mean and standard deviation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalPoint {
    pub mean: f64,
    pub sd: f64,
}

/// Expected activation window in percent of gait cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActivationInterval {
    pub start_pct: f64,
    pub end_pct: f64,
}

#[derive(Debug, Default)]
pub struct NormalDataset {
    curves: HashMap<String, Vec<NormalPoint>>,
    activations: HashMap<String, Vec<ActivationInterval>>,
    skipped: Vec<String>,
}

impl NormalDataset {
    pub fn load(path: &Path) -> Result<Self, GaitError> {
        let text = fs::read_to_string(path).map_err(|e| GaitError::NormalDataFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::parse(&text, &path.display().to_string())
    }

    pub fn parse(text: &str, origin: &str) -> Result<Self, GaitError> {
        let mut dataset = NormalDataset::default();
        let mut current: Option<(String, Vec<String>)> = None;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(key) = line.strip_prefix('!') {
                if let Some((key, body)) = current.take() {
                    dataset.finish_record(key, &body);
                }
                current = Some((key.trim().to_string(), Vec::new()));
            } else if let Some((_, body)) = current.as_mut() {
                body.push(line.to_string());
            }
            // data lines before the first header have no key to belong to
        }
        if let Some((key, body)) = current.take() {
            dataset.finish_record(key, &body);
        }
        if dataset.curves.is_empty() && dataset.activations.is_empty() {
            return Err(GaitError::NormalDataFile {
                path: origin.to_string(),
                reason: "no usable records".into(),
            });
        }
        Ok(dataset)
    }

    fn finish_record(&mut self, key: String, body: &[String]) {
        match parse_record(body) {
            Ok(Record::Curve(points)) => {
                self.curves.insert(key, points);
            }
            Ok(Record::Activations(intervals)) => {
                self.activations.insert(key, intervals);
            }
            Err(reason) => {
                warn!("skipping normal data record '{key}': {reason}");
                self.skipped.push(key);
            }
        }
    }

    /// Mean/sd curve for a variable key; absence means "no overlay" and is
    /// never fatal to the report.
    pub fn lookup(&self, key: &str) -> Result<&[NormalPoint], GaitError> {
        self.curves
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| GaitError::UnknownNormalKey(key.to_string()))
    }

    /// Activation intervals for a base electrode name (timing is assumed
    /// side-symmetric). Empty when the file carries none.
    pub fn activations(&self, base: &str) -> &[ActivationInterval] {
        self.activations.get(base).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn curve_keys(&self) -> impl Iterator<Item = &str> {
        self.curves.keys().map(String::as_str)
    }

    /// Keys whose records failed to parse and were skipped.
    pub fn skipped_keys(&self) -> &[String] {
        &self.skipped
    }
}

enum Record {
    Curve(Vec<NormalPoint>),
    Activations(Vec<ActivationInterval>),
}

fn parse_record(body: &[String]) -> Result<Record, String> {
    if body.is_empty() {
        return Err("record has no data lines".into());
    }
    let mut pairs = Vec::with_capacity(body.len());
    for line in body {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(format!(
                "expected 2 columns, got {} in '{line}'",
                fields.len()
            ));
        }
        let a: f64 = fields[0]
            .parse()
            .map_err(|_| format!("non-numeric field '{}'", fields[0]))?;
        let b: f64 = fields[1]
            .parse()
            .map_err(|_| format!("non-numeric field '{}'", fields[1]))?;
        pairs.push((a, b));
    }
    if pairs.len() == NORMAL_DATA_POINTS {
        Ok(Record::Curve(
            pairs
                .into_iter()
                .map(|(mean, sd)| NormalPoint { mean, sd })
                .collect(),
        ))
    } else if pairs.len() < NORMAL_DATA_POINTS {
        let mut intervals = Vec::with_capacity(pairs.len());
        for (start, end) in pairs {
            if !(0.0..=100.0).contains(&start) || !(0.0..=100.0).contains(&end) || start > end {
                return Err(format!("bad activation interval [{start}, {end}]"));
            }
            intervals.push(ActivationInterval {
                start_pct: start,
                end_pct: end,
            });
        }
        Ok(Record::Activations(intervals))
    } else {
        Err(format!(
            "expected {NORMAL_DATA_POINTS} curve lines, got {}",
            pairs.len()
        ))
    }
}
