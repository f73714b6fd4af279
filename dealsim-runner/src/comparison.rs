//! Head-to-head comparison of strategies on the same deals.

use dealsim_core::Deal;
use dealsim_dds::{duplicate_score, DoubleDummySolver, SolverError};
use dealsim_strategy::Strategy;

use crate::{RequestError, TrialRecord};

/// Evaluates every strategy on a deal and scores its decision.
///
/// Per strategy `name` a trial records `{name}_contract`, `{name}_declarer`,
/// `{name}_tricks` and `{name}_score`. For every pair with `a` listed before
/// `b` it records the score difference `diff_{a}_minus_{b}` and the 0/1
/// indicators `{a}_beats_{b}`, `{b}_beats_{a}` and `push_{a}_{b}`, whose
/// means are the win, loss and push rates.
#[derive(Debug, Clone)]
pub struct StrategyComparison {
    strategies: Vec<Strategy>,
    vulnerable: bool,
}

impl StrategyComparison {
    pub fn new(strategies: Vec<Strategy>, vulnerable: bool) -> Result<Self, RequestError> {
        for (i, strategy) in strategies.iter().enumerate() {
            if strategies[..i].iter().any(|s| s.name() == strategy.name()) {
                return Err(RequestError::DuplicateStrategy(strategy.name().to_string()));
            }
        }
        Ok(StrategyComparison {
            strategies,
            vulnerable,
        })
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn vulnerable(&self) -> bool {
        self.vulnerable
    }

    pub fn evaluate(
        &self,
        deal: &Deal,
        solver: &mut DoubleDummySolver<'_>,
    ) -> Result<TrialRecord, SolverError> {
        let mut record = TrialRecord::new();
        let mut scores = Vec::with_capacity(self.strategies.len());

        for strategy in &self.strategies {
            let name = strategy.name();
            let decision = strategy.evaluate(deal);
            let tricks = solver.tricks_for(&decision.contract, decision.declarer)?;
            let score = duplicate_score(&decision.contract, tricks, self.vulnerable);

            record.push(format!("{name}_contract"), decision.contract.to_string());
            record.push(format!("{name}_declarer"), decision.declarer.to_string());
            record.push(format!("{name}_tricks"), tricks);
            record.push(format!("{name}_score"), score);
            scores.push(score);
        }

        for (i, a) in self.strategies.iter().enumerate() {
            for (j, b) in self.strategies.iter().enumerate().skip(i + 1) {
                let (a, b) = (a.name(), b.name());
                record.push(format!("diff_{a}_minus_{b}"), scores[i] - scores[j]);
                record.push(format!("{a}_beats_{b}"), scores[i] > scores[j]);
                record.push(format!("{b}_beats_{a}"), scores[j] > scores[i]);
                record.push(format!("push_{a}_{b}"), scores[i] == scores[j]);
            }
        }

        Ok(record)
    }
}
