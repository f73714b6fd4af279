//! Monte Carlo simulation driver.
//!
//! Each trial: draw an accepted deal, hand it to the callback together with a
//! double-dummy handle, fold the returned record into the statistics. A
//! callback error or panic drops that trial only.
//!
//! The parallel path uses a supervisor/worker split. The supervisor draws a
//! batch of attempt seeds from the generator's master stream, workers build,
//! filter and evaluate the deals, and the supervisor consumes the results in
//! serial order until enough deals have been accepted. The same seed gives
//! the same accepted deals as the sequential path.

use std::any::Any;
use std::fmt::{self, Display};
use std::panic::{self, AssertUnwindSafe};

use dealsim_core::{Deal, DealGenerator, GeneratorConfig};
use dealsim_dds::{DoubleDummySolver, TrickSolver};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{Accumulator, AggregatedReport, TrialRecord};

/// Configuration for parallel execution.
#[derive(Clone, Debug)]
pub struct ParallelConfig {
    /// Number of worker threads (0 = rayon default)
    pub num_threads: usize,
    /// Attempt seeds handed out per batch
    pub batch_size: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        ParallelConfig {
            num_threads: 0,
            batch_size: 256,
        }
    }
}

/// Why a trial produced no record
#[derive(Debug)]
enum TrialError<E> {
    Callback(E),
    Panicked(String),
}

impl<E: Display> Display for TrialError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialError::Callback(e) => e.fmt(f),
            TrialError::Panicked(msg) => write!(f, "callback panicked: {}", msg),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run one trial's callback, turning a panic into a trial failure
fn guarded<E>(
    trial: impl FnOnce() -> Result<TrialRecord, E>,
) -> Result<TrialRecord, TrialError<E>> {
    match panic::catch_unwind(AssertUnwindSafe(trial)) {
        Ok(outcome) => outcome.map_err(TrialError::Callback),
        Err(payload) => Err(TrialError::Panicked(panic_message(&*payload))),
    }
}

/// Counters shared by both execution paths
#[derive(Default)]
struct Tally {
    accumulator: Accumulator,
    deals_produced: usize,
    trials_run: usize,
    failed: usize,
}

impl Tally {
    fn consume<E: Display>(&mut self, outcome: Result<TrialRecord, E>) {
        let trial = self.deals_produced;
        self.deals_produced += 1;
        match outcome {
            Ok(record) => {
                self.accumulator.record(record);
                self.trials_run += 1;
            }
            Err(e) => {
                self.failed += 1;
                warn!(trial, error = %e, "trial failed, dropping its results");
            }
        }
    }

    fn into_report(self, requested: usize, attempts: u64, exhausted: bool) -> AggregatedReport {
        info!(
            requested,
            trials_run = self.trials_run,
            failed = self.failed,
            attempts,
            exhausted,
            "simulation finished"
        );
        AggregatedReport {
            trials_requested: requested,
            trials_run: self.trials_run,
            failed_trials: self.failed,
            deals_produced: self.deals_produced,
            attempts,
            exhausted,
            stats: self.accumulator.finish(),
        }
    }
}

/// Runs trials against a double-dummy engine
pub struct SimulationRunner<S> {
    engine: S,
}

impl<S: TrickSolver> SimulationRunner<S> {
    pub fn new(engine: S) -> Self {
        SimulationRunner { engine }
    }

    pub fn engine(&self) -> &S {
        &self.engine
    }

    /// Run up to `trials` trials on deals drawn from `config`
    pub fn run<F, E>(&self, callback: F, trials: usize, config: GeneratorConfig) -> AggregatedReport
    where
        F: FnMut(&Deal, &mut DoubleDummySolver<'_>) -> Result<TrialRecord, E>,
        E: Display,
    {
        self.run_with(&mut DealGenerator::new(config), callback, trials)
    }

    /// Run against an existing generator, continuing its stream
    pub fn run_with<F, E>(
        &self,
        generator: &mut DealGenerator,
        mut callback: F,
        trials: usize,
    ) -> AggregatedReport
    where
        F: FnMut(&Deal, &mut DoubleDummySolver<'_>) -> Result<TrialRecord, E>,
        E: Display,
    {
        info!(trials, "starting simulation");
        let mut tally = Tally::default();

        let mut deals = generator.deals(trials);
        for deal in deals.by_ref() {
            let mut solver = DoubleDummySolver::new(&deal, &self.engine);
            tally.consume(guarded(|| callback(&deal, &mut solver)));
        }

        tally.into_report(trials, deals.attempts(), deals.is_exhausted())
    }

    /// Parallel version of [`run`](Self::run)
    pub fn run_parallel<F, E>(
        &self,
        callback: F,
        trials: usize,
        config: GeneratorConfig,
        parallel: &ParallelConfig,
    ) -> AggregatedReport
    where
        F: Fn(&Deal, &mut DoubleDummySolver<'_>) -> Result<TrialRecord, E> + Sync,
        E: Display + Send,
    {
        let mut generator = DealGenerator::new(config);
        self.run_parallel_with(&mut generator, callback, trials, parallel)
    }

    pub fn run_parallel_with<F, E>(
        &self,
        generator: &mut DealGenerator,
        callback: F,
        trials: usize,
        parallel: &ParallelConfig,
    ) -> AggregatedReport
    where
        F: Fn(&Deal, &mut DoubleDummySolver<'_>) -> Result<TrialRecord, E> + Sync,
        E: Display + Send,
    {
        let pool = if parallel.num_threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(parallel.num_threads)
                .build()
                .map_err(|e| warn!(error = %e, "falling back to the global thread pool"))
                .ok()
        } else {
            None
        };
        info!(trials, threads = parallel.num_threads, "starting parallel simulation");

        let budget = generator.attempt_budget(trials);
        let batch_size = parallel.batch_size.max(1) as u64;
        let mut tally = Tally::default();
        let mut attempts = 0u64;

        'supervisor: while tally.deals_produced < trials && attempts < budget {
            let batch = batch_size.min(budget - attempts) as usize;
            let seeds: Vec<u64> = (0..batch).map(|_| generator.next_seed()).collect();

            let generator = &*generator;
            let work = || -> Vec<Option<Result<TrialRecord, TrialError<E>>>> {
                seeds
                    .par_iter()
                    .map(|&seed| {
                        let deal = generator.deal_from_seed(seed);
                        if !generator.accepts(&deal) {
                            return None;
                        }
                        let mut solver = DoubleDummySolver::new(&deal, &self.engine);
                        Some(guarded(|| callback(&deal, &mut solver)))
                    })
                    .collect()
            };
            let results = match &pool {
                Some(pool) => pool.install(work),
                None => work(),
            };
            debug!(batch, attempts, produced = tally.deals_produced, "batch complete");

            // Indexed collect keeps serial order
            for outcome in results {
                attempts += 1;
                if let Some(outcome) = outcome {
                    tally.consume(outcome);
                    if tally.deals_produced == trials {
                        break 'supervisor;
                    }
                }
            }
        }

        let exhausted = tally.deals_produced < trials && attempts >= budget;
        tally.into_report(trials, attempts, exhausted)
    }
}
