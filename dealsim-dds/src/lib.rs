//! Double-dummy analysis for deals.
//!
//! The search itself comes from the `bridge-solver` crate behind the
//! [`TrickSolver`] trait. [`DoubleDummySolver`] wraps one deal, caches trick
//! counts and turns them into duplicate scores.

mod engine;
mod error;
mod handle;
mod scoring;

pub use engine::{BridgeSolver, TrickSolver};
pub use error::SolverError;
pub use handle::DoubleDummySolver;
pub use scoring::duplicate_score;
