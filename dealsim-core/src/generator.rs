//! Constrained random deal generation.
//!
//! Every attempt is built from its own `u64` seed drawn from a master RNG, so
//! candidates are independent of each other. Pinned cards are placed first,
//! the remaining pool is Fisher-Yates shuffled and sliced into the counts each
//! seat still needs, in N-E-S-W order. Candidates that fail the constraints
//! are discarded (rejection sampling) until the requested number of deals is
//! reached or the attempt budget runs out.

use rand::rngs::{SmallRng, StdRng};
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::{Card, ConstraintSet, Deal, DealFilter, Hand, PreDeal, Seat};

/// Attempt cap used whenever constraints or pinned cards are present and the
/// caller gave none.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Request-scoped generator settings.
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfig {
    pub predeal: PreDeal,
    pub constraints: ConstraintSet,
    /// Attempt cap; `None` means [`DEFAULT_MAX_ATTEMPTS`]
    pub max_attempts: Option<u64>,
    /// Master seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_predeal(mut self, predeal: PreDeal) -> Self {
        self.predeal = predeal;
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// No constraints and no pinned cards: every attempt is accepted
    pub fn is_trivial(&self) -> bool {
        self.predeal.is_empty() && self.constraints.is_empty()
    }
}

/// Result of [`DealGenerator::generate`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Generated {
    pub deals: Vec<Deal>,
    pub attempts: u64,
    pub requested: usize,
}

impl Generated {
    /// Fewer deals than requested because the budget ran out
    pub fn is_exhausted(&self) -> bool {
        self.deals.len() < self.requested
    }
}

/// Rejection-sampling deal generator.
///
/// Same seed, predeal and constraints always give the same deal sequence.
/// Successive calls to [`deals`](Self::deals) continue the same stream.
pub struct DealGenerator {
    config: GeneratorConfig,
    filter: Option<Box<dyn DealFilter>>,
    pool: Vec<Card>,
    master: StdRng,
}

impl DealGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let master = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        DealGenerator {
            pool: config.predeal.undealt(),
            config,
            filter: None,
            master,
        }
    }

    /// Add a caller-supplied filter, checked after the constraint set
    pub fn with_filter<F: DealFilter + 'static>(mut self, filter: F) -> Self {
        self.filter = Some(Box::new(filter));
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Attempts allowed when asking for `count` deals
    pub fn attempt_budget(&self, count: usize) -> u64 {
        let count = count as u64;
        if count == 0 {
            0
        } else if self.config.is_trivial() && self.filter.is_none() {
            self.config.max_attempts.map_or(count, |max| max.min(count))
        } else {
            self.config.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS)
        }
    }

    /// Draw the next per-attempt seed from the master stream
    #[inline]
    pub fn next_seed(&mut self) -> u64 {
        self.master.next_u64()
    }

    /// Build the candidate for a seed, without checking constraints
    pub fn deal_from_seed(&self, seed: u64) -> Deal {
        complete_deal(seed, &self.config.predeal, self.pool.clone())
    }

    pub fn accepts(&self, deal: &Deal) -> bool {
        self.config.constraints.accepts(deal)
            && self.filter.as_ref().map_or(true, |f| f.accepts(deal))
    }

    /// Lazily produce up to `count` accepted deals
    pub fn deals(&mut self, count: usize) -> Deals<'_> {
        let budget = self.attempt_budget(count);
        Deals {
            generator: self,
            requested: count,
            budget,
            attempts: 0,
            produced: 0,
            done: false,
        }
    }

    /// Collect up to `count` accepted deals
    pub fn generate(&mut self, count: usize) -> Generated {
        let mut iter = self.deals(count);
        let deals: Vec<Deal> = iter.by_ref().collect();
        Generated {
            attempts: iter.attempts(),
            requested: count,
            deals,
        }
    }
}

/// Lazy producer returned by [`DealGenerator::deals`]
pub struct Deals<'a> {
    generator: &'a mut DealGenerator,
    requested: usize,
    budget: u64,
    attempts: u64,
    produced: usize,
    done: bool,
}

impl Deals<'_> {
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn produced(&self) -> usize {
        self.produced
    }

    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Stopped short of `requested` because the budget is spent
    pub fn is_exhausted(&self) -> bool {
        self.produced < self.requested && self.attempts >= self.budget
    }
}

impl Iterator for Deals<'_> {
    type Item = Deal;

    fn next(&mut self) -> Option<Deal> {
        while !self.done && self.produced < self.requested {
            if self.attempts >= self.budget {
                self.done = true;
                debug!(
                    produced = self.produced,
                    requested = self.requested,
                    attempts = self.attempts,
                    "attempt budget exhausted"
                );
                return None;
            }
            self.attempts += 1;
            let seed = self.generator.next_seed();
            let deal = self.generator.deal_from_seed(seed);
            if self.generator.accepts(&deal) {
                self.produced += 1;
                return Some(deal);
            }
        }
        None
    }
}

/// Build the deal for a seed under a predeal, without constraints.
///
/// The same `(seed, predeal)` pair always gives the same deal.
pub fn deal_from_seed(seed: u64, predeal: &PreDeal) -> Deal {
    complete_deal(seed, predeal, predeal.undealt())
}

fn complete_deal(seed: u64, predeal: &PreDeal, mut pool: Vec<Card>) -> Deal {
    let mut rng = SmallRng::seed_from_u64(seed);
    pool.shuffle(&mut rng);

    let mut rest = pool.into_iter();
    let hands = Seat::ALL.map(|seat| {
        let mut cards = predeal.cards(seat).to_vec();
        cards.extend(rest.by_ref().take(predeal.needed(seat)));
        Hand::from_cards(cards)
    });
    Deal::from_hands_unchecked(hands)
}
