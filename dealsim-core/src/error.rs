use thiserror::Error;

use crate::{Card, Seat};

/// Malformed caller input. Raised before any generation work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid seat '{0}': expected one of N, E, S, W")]
    InvalidSeat(String),

    #[error("invalid suit '{0}': expected one of S, H, D, C")]
    InvalidSuit(String),

    #[error("invalid rank character '{rank}' in {suit} holding of '{hand}'")]
    InvalidRank { hand: String, suit: char, rank: char },

    #[error("hand '{hand}' must have 4 space-separated suits, found {found}")]
    SuitCount { hand: String, found: usize },

    #[error("card {card} appears twice in hand '{hand}'")]
    RepeatedCard { hand: String, card: Card },

    #[error("card {card} already predealt to {seat}")]
    DuplicateCard { card: Card, seat: Seat },

    #[error("more than 13 cards for seat {seat}")]
    TooManyCards { seat: Seat },

    #[error("invalid deal: {0}")]
    InvalidDeal(String),

    #[error("invalid contract '{0}'")]
    InvalidContract(String),
}
