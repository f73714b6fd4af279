//! Monte Carlo bridge simulations: trials on constrained random deals,
//! double-dummy results, aggregated statistics.

mod comparison;
mod error;
mod record;
mod report;
mod request;
mod runner;
mod stats;

pub use comparison::StrategyComparison;
pub use error::RequestError;
pub use record::{TrialRecord, TrialValue};
pub use report::AggregatedReport;
pub use request::{Simulation, SimulationRequest};
pub use runner::{ParallelConfig, SimulationRunner};
pub use stats::{Accumulator, NumericStats, NumericSummary, Summary};
