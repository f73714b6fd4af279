use std::collections::BTreeMap;

use serde::Serialize;

use crate::{NumericSummary, Summary};

/// Outcome of a simulation run.
///
/// `trials_run` counts only trials whose callback succeeded, so a report of
/// 1000 requested and 42 run is distinguishable from a complete one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedReport {
    pub trials_requested: usize,
    pub trials_run: usize,
    pub failed_trials: usize,
    pub deals_produced: usize,
    pub attempts: u64,
    /// The attempt budget ran out before enough deals were accepted
    pub exhausted: bool,
    pub stats: BTreeMap<String, Summary>,
}

impl AggregatedReport {
    pub fn is_complete(&self) -> bool {
        self.trials_run == self.trials_requested
    }

    pub fn numeric(&self, key: &str) -> Option<&NumericSummary> {
        match self.stats.get(key)? {
            Summary::Numeric(s) => Some(s),
            Summary::Categorical(_) => None,
        }
    }

    pub fn labels(&self, key: &str) -> Option<&BTreeMap<String, u64>> {
        match self.stats.get(key)? {
            Summary::Categorical(counts) => Some(counts),
            Summary::Numeric(_) => None,
        }
    }
}
