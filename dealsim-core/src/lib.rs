mod card;
mod constraint;
mod contract;
mod deal;
mod error;
mod generator;
mod hand;
mod predeal;

pub use card::{Card, Rank, Suit};
pub use constraint::{ConstraintSet, DealFilter, SeatConstraint};
pub use contract::{Contract, Doubling, Strain};
pub use deal::{Deal, Seat};
pub use error::ConfigError;
pub use generator::{
    deal_from_seed, DealGenerator, Deals, Generated, GeneratorConfig, DEFAULT_MAX_ATTEMPTS,
};
pub use hand::Hand;
pub use predeal::PreDeal;
