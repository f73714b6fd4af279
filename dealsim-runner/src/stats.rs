//! Online per-key statistics.
//!
//! The first value seen for a key fixes its kind. Numeric keys keep a
//! Welford running mean/variance plus min and max; categorical keys count
//! stringified values.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::{TrialRecord, TrialValue};

/// Welford accumulator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericStats {
    count: u64,
    mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl NumericStats {
    pub fn new() -> Self {
        NumericStats {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample standard deviation; 0.0 below two observations
    pub fn stdev(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        }
    }

    pub fn summary(&self, mismatched: u64) -> NumericSummary {
        NumericSummary {
            count: self.count,
            mean: self.mean,
            stdev: self.stdev(),
            min: self.min,
            max: self.max,
            mismatched,
        }
    }
}

impl Default for NumericStats {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
enum KeyStats {
    Numeric {
        stats: NumericStats,
        mismatched: u64,
    },
    Categorical(BTreeMap<String, u64>),
}

impl KeyStats {
    fn first(value: TrialValue) -> Self {
        match value.as_f64() {
            Some(x) => {
                let mut stats = NumericStats::new();
                stats.push(x);
                KeyStats::Numeric {
                    stats,
                    mismatched: 0,
                }
            }
            None => {
                let mut counts = BTreeMap::new();
                counts.insert(value.to_string(), 1);
                KeyStats::Categorical(counts)
            }
        }
    }

    fn push(&mut self, key: &str, value: TrialValue) {
        match self {
            KeyStats::Numeric { stats, mismatched } => match value.as_f64() {
                Some(x) => stats.push(x),
                None => {
                    *mismatched += 1;
                    warn!(key, value = %value, "label on numeric key, not counted");
                }
            },
            KeyStats::Categorical(counts) => {
                *counts.entry(value.to_string()).or_insert(0) += 1;
            }
        }
    }
}

/// Running statistics for every key seen so far
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    keys: BTreeMap<String, KeyStats>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one successful trial
    pub fn record(&mut self, record: TrialRecord) {
        for (key, value) in record {
            match self.keys.get_mut(&key) {
                Some(stats) => stats.push(&key, value),
                None => {
                    self.keys.insert(key, KeyStats::first(value));
                }
            }
        }
    }

    pub fn finish(self) -> BTreeMap<String, Summary> {
        self.keys
            .into_iter()
            .map(|(key, stats)| {
                let summary = match stats {
                    KeyStats::Numeric { stats, mismatched } => {
                        Summary::Numeric(stats.summary(mismatched))
                    }
                    KeyStats::Categorical(counts) => Summary::Categorical(counts),
                };
                (key, summary)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: u64,
    pub mean: f64,
    pub stdev: f64,
    pub min: f64,
    pub max: f64,
    /// Labels that arrived on this key and were left out
    #[serde(skip_serializing_if = "is_zero")]
    pub mismatched: u64,
}

fn is_zero(n: &u64) -> bool {
    *n == 0
}

/// Final statistics for one key
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Numeric(NumericSummary),
    Categorical(BTreeMap<String, u64>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_welford_matches_two_pass() {
        let xs = [420.0, -50.0, 450.0, 110.0, -100.0, 420.0, 140.0];
        let mut stats = NumericStats::new();
        for &x in &xs {
            stats.push(x);
        }

        let n = xs.len() as f64;
        let mean = xs.iter().sum::<f64>() / n;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

        assert_eq!(stats.count(), 7);
        assert!(approx(stats.mean(), mean));
        assert!(approx(stats.stdev(), var.sqrt()));
        let summary = stats.summary(0);
        assert_eq!(summary.min, -100.0);
        assert_eq!(summary.max, 450.0);
    }

    #[test]
    fn test_single_observation_has_zero_stdev() {
        let mut stats = NumericStats::new();
        stats.push(3.0);
        assert_eq!(stats.stdev(), 0.0);
        assert_eq!(stats.mean(), 3.0);
    }

    #[test]
    fn test_first_value_fixes_kind() {
        let mut acc = Accumulator::new();
        acc.record(TrialRecord::new().with("score", 100).with("contract", "4S"));
        acc.record(TrialRecord::new().with("score", "n/a").with("contract", 4));
        acc.record(TrialRecord::new().with("score", 200).with("contract", "4S"));

        let stats = acc.finish();
        match &stats["score"] {
            Summary::Numeric(s) => {
                assert_eq!(s.count, 2);
                assert_eq!(s.mean, 150.0);
                assert_eq!(s.mismatched, 1);
            }
            other => panic!("expected numeric, got {other:?}"),
        }
        match &stats["contract"] {
            Summary::Categorical(counts) => {
                assert_eq!(counts["4S"], 2);
                assert_eq!(counts["4"], 1);
            }
            other => panic!("expected categorical, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_json_shape() {
        let mut acc = Accumulator::new();
        acc.record(TrialRecord::new().with("tricks", 9).with("lead", "SA"));
        let json = serde_json::to_value(acc.finish()).unwrap();
        assert_eq!(json["tricks"]["mean"], 9.0);
        assert_eq!(json["tricks"]["stdev"], 0.0);
        assert!(json["tricks"].get("mismatched").is_none());
        assert_eq!(json["lead"]["SA"], 1);
    }
}
