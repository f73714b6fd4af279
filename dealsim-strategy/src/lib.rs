//! Decision strategy trees: binary trees of hand tests ending in a contract
//! and declarer.

mod condition;
mod error;
mod parse;
mod tree;

pub use condition::{Condition, Operator};
pub use error::StrategyError;
pub use parse::{StrategyOptions, UnknownConditionPolicy};
pub use tree::{Decision, DecisionNode, Strategy};
