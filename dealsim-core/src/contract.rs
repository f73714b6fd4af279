use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, Suit};

/// Denomination of a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strain {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    NoTrump,
}

impl Strain {
    pub const ALL: [Strain; 5] = [
        Strain::Clubs,
        Strain::Diamonds,
        Strain::Hearts,
        Strain::Spades,
        Strain::NoTrump,
    ];

    /// Trump suit, or `None` for notrump
    pub fn trump(&self) -> Option<Suit> {
        match self {
            Strain::Clubs => Some(Suit::Clubs),
            Strain::Diamonds => Some(Suit::Diamonds),
            Strain::Hearts => Some(Suit::Hearts),
            Strain::Spades => Some(Suit::Spades),
            Strain::NoTrump => None,
        }
    }

    pub fn is_minor(&self) -> bool {
        matches!(self, Strain::Clubs | Strain::Diamonds)
    }

    pub fn to_char(&self) -> char {
        match self {
            Strain::Clubs => 'C',
            Strain::Diamonds => 'D',
            Strain::Hearts => 'H',
            Strain::Spades => 'S',
            Strain::NoTrump => 'N',
        }
    }
}

impl fmt::Display for Strain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Doubling {
    #[default]
    Undoubled,
    Doubled,
    Redoubled,
}

/// A level-and-strain commitment, e.g. `4H`, `3N`, `4SX`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contract {
    pub level: u8,
    pub strain: Strain,
    pub doubling: Doubling,
}

impl Contract {
    /// Returns `None` unless `level` is 1-7
    pub fn new(level: u8, strain: Strain) -> Option<Self> {
        (1..=7).contains(&level).then_some(Contract {
            level,
            strain,
            doubling: Doubling::Undoubled,
        })
    }

    pub fn doubled(self) -> Self {
        Contract {
            doubling: Doubling::Doubled,
            ..self
        }
    }

    pub fn redoubled(self) -> Self {
        Contract {
            doubling: Doubling::Redoubled,
            ..self
        }
    }

    /// Tricks declarer needs: book (6) plus the level
    pub fn tricks_needed(&self) -> u8 {
        self.level + 6
    }
}

impl FromStr for Contract {
    type Err = ConfigError;

    /// Accepts `4H`, `3N`, `3NT`, `4SX`, `6NXX` (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidContract(s.to_string());
        let upper = s.trim().to_ascii_uppercase();
        let mut chars = upper.chars();

        let level = chars
            .next()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| u8::try_from(d).ok())
            .ok_or_else(invalid)?;

        let strain = match chars.next().ok_or_else(invalid)? {
            'C' => Strain::Clubs,
            'D' => Strain::Diamonds,
            'H' => Strain::Hearts,
            'S' => Strain::Spades,
            'N' => Strain::NoTrump,
            _ => return Err(invalid()),
        };

        let mut rest = chars.as_str();
        if strain == Strain::NoTrump {
            rest = rest.strip_prefix('T').unwrap_or(rest);
        }
        let doubling = match rest {
            "" => Doubling::Undoubled,
            "X" => Doubling::Doubled,
            "XX" => Doubling::Redoubled,
            _ => return Err(invalid()),
        };

        let contract = Contract::new(level, strain).ok_or_else(invalid)?;
        Ok(Contract { doubling, ..contract })
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.level, self.strain)?;
        match self.doubling {
            Doubling::Undoubled => Ok(()),
            Doubling::Doubled => f.write_str("X"),
            Doubling::Redoubled => f.write_str("XX"),
        }
    }
}
