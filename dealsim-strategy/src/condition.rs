use std::fmt;
use std::str::FromStr;

use dealsim_core::{Deal, Seat, Suit};

/// Comparison applied between a hand feature and a threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Gt,
    Ge,
    Lt,
    Le,
    Eq,
}

impl Operator {
    pub fn apply(&self, lhs: u8, rhs: u8) -> bool {
        match self {
            Operator::Gt => lhs > rhs,
            Operator::Ge => lhs >= rhs,
            Operator::Lt => lhs < rhs,
            Operator::Le => lhs <= rhs,
            Operator::Eq => lhs == rhs,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Eq => "==",
        }
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Ge),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Le),
            "==" => Ok(Operator::Eq),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A test on one seat's hand.
///
/// `seat: None` means the strategy's reference seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    SuitLength {
        suit: Suit,
        operator: Operator,
        value: u8,
        seat: Option<Seat>,
    },
    HighCardPoints {
        operator: Operator,
        value: u8,
        seat: Option<Seat>,
    },
    /// Only built under [`UnknownConditionPolicy::FailClosed`]; always false.
    ///
    /// [`UnknownConditionPolicy::FailClosed`]: crate::UnknownConditionPolicy::FailClosed
    Unrecognized { kind: String },
}

impl Condition {
    pub fn suit_length(suit: Suit, operator: Operator, value: u8) -> Self {
        Condition::SuitLength {
            suit,
            operator,
            value,
            seat: None,
        }
    }

    pub fn hcp(operator: Operator, value: u8) -> Self {
        Condition::HighCardPoints {
            operator,
            value,
            seat: None,
        }
    }

    /// Evaluate against `deal`, reading `reference` unless the condition
    /// names its own seat
    pub fn evaluate(&self, deal: &Deal, reference: Seat) -> bool {
        match self {
            Condition::SuitLength {
                suit,
                operator,
                value,
                seat,
            } => {
                let hand = deal.hand(seat.unwrap_or(reference));
                operator.apply(hand.suit_lengths()[*suit as usize], *value)
            }
            Condition::HighCardPoints {
                operator,
                value,
                seat,
            } => {
                let hand = deal.hand(seat.unwrap_or(reference));
                operator.apply(hand.hcp(), *value)
            }
            Condition::Unrecognized { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PBN: &str = "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";

    #[test]
    fn test_operators() {
        assert!(Operator::Gt.apply(5, 4));
        assert!(!Operator::Gt.apply(4, 4));
        assert!(Operator::Ge.apply(4, 4));
        assert!(Operator::Lt.apply(3, 4));
        assert!(Operator::Le.apply(4, 4));
        assert!(Operator::Eq.apply(4, 4));
        assert!(!Operator::Eq.apply(5, 4));
    }

    #[test]
    fn test_operator_parsing() {
        for op in [
            Operator::Gt,
            Operator::Ge,
            Operator::Lt,
            Operator::Le,
            Operator::Eq,
        ] {
            assert_eq!(op.as_str().parse::<Operator>(), Ok(op));
        }
        assert!("=".parse::<Operator>().is_err());
        assert!("!=".parse::<Operator>().is_err());
    }

    #[test]
    fn test_reference_seat_and_override() {
        let deal = Deal::from_pbn(PBN).unwrap();
        let five_spades = Condition::suit_length(Suit::Spades, Operator::Ge, 5);
        assert!(five_spades.evaluate(&deal, Seat::North));
        assert!(!five_spades.evaluate(&deal, Seat::South));

        let west_points = Condition::HighCardPoints {
            operator: Operator::Eq,
            value: 3,
            seat: Some(Seat::West),
        };
        assert!(west_points.evaluate(&deal, Seat::North));
        assert!(west_points.evaluate(&deal, Seat::East));
    }

    #[test]
    fn test_unrecognized_is_false() {
        let deal = Deal::from_pbn(PBN).unwrap();
        let cond = Condition::Unrecognized {
            kind: "losers".to_string(),
        };
        assert!(!cond.evaluate(&deal, Seat::North));
    }
}
