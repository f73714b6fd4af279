use std::fmt;
use std::str::FromStr;

use crate::{Card, ConfigError, Rank, Suit};

/// Represents a single player's hand, kept sorted spades-first and
/// high-to-low within each suit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Create a new empty hand
    pub fn new() -> Self {
        Hand { cards: Vec::new() }
    }

    /// Create a hand from a vector of cards
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let mut hand = Hand { cards };
        hand.sort();
        hand
    }

    /// Add a card to the hand, keeping sort order
    pub fn add_card(&mut self, card: Card) {
        let pos = self
            .cards
            .partition_point(|c| sort_key(*c) < sort_key(card));
        self.cards.insert(pos, card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Count cards of a specific suit
    pub fn suit_length(&self, suit: Suit) -> usize {
        self.cards.iter().filter(|c| c.suit == suit).count()
    }

    /// Cards of a specific suit, highest first
    pub fn cards_in_suit(&self, suit: Suit) -> impl Iterator<Item = &Card> + '_ {
        self.cards.iter().filter(move |c| c.suit == suit)
    }

    /// High Card Points (A=4, K=3, Q=2, J=1)
    pub fn hcp(&self) -> u8 {
        self.cards.iter().map(|c| c.hcp()).sum()
    }

    /// Controls (A=2, K=1)
    pub fn controls(&self) -> u8 {
        self.cards.iter().map(|c| c.controls()).sum()
    }

    /// Suit lengths in shape order [S, H, D, C].
    /// E.g., [5, 4, 3, 1] means 5 spades, 4 hearts, 3 diamonds, 1 club
    pub fn suit_lengths(&self) -> [u8; 4] {
        let mut lengths = [0u8; 4];
        for card in &self.cards {
            lengths[card.suit as usize] += 1;
        }
        lengths
    }

    /// Distribution pattern sorted longest to shortest
    pub fn distribution(&self) -> [u8; 4] {
        let mut lengths = self.suit_lengths();
        lengths.sort_unstable_by(|a, b| b.cmp(a));
        lengths
    }

    /// Balanced means 4-3-3-3, 4-4-3-2 or 5-3-3-2
    pub fn is_balanced(&self) -> bool {
        matches!(self.distribution(), [4, 3, 3, 3] | [4, 4, 3, 2] | [5, 3, 3, 2])
    }

    /// Check if hand matches an exact shape pattern (S-H-D-C order)
    pub fn matches_exact_shape(&self, pattern: &[u8; 4]) -> bool {
        self.suit_lengths() == *pattern
    }

    pub fn has_card(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    fn sort(&mut self) {
        self.cards.sort_by_key(|c| sort_key(*c));
    }
}

/// Spades first, then ace first within a suit
fn sort_key(card: Card) -> (u8, std::cmp::Reverse<Rank>) {
    (card.suit as u8, std::cmp::Reverse(card.rank))
}

impl FromStr for Hand {
    type Err = ConfigError;

    /// Parse a hand string: `"<spades> <hearts> <diamonds> <clubs>"`, each
    /// segment a run of `AKQJT98765432` or `-` for a void.
    /// Example: `"AK842 QT7 - 98652"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split_whitespace().collect();
        if segments.len() != 4 {
            return Err(ConfigError::SuitCount {
                hand: s.to_string(),
                found: segments.len(),
            });
        }

        let mut hand = Hand::new();
        for (suit, segment) in Suit::ALL.into_iter().zip(segments) {
            if segment == "-" {
                continue;
            }
            for ch in segment.chars() {
                let rank = Rank::from_char(ch).ok_or_else(|| ConfigError::InvalidRank {
                    hand: s.to_string(),
                    suit: suit.to_char(),
                    rank: ch,
                })?;
                let card = Card::new(suit, rank);
                if hand.has_card(card) {
                    return Err(ConfigError::RepeatedCard {
                        hand: s.to_string(),
                        card,
                    });
                }
                hand.add_card(card);
            }
        }
        Ok(hand)
    }
}

impl fmt::Display for Hand {
    /// Formats in the same space-separated form `from_str` accepts
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, suit) in Suit::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            let mut any = false;
            for card in self.cards_in_suit(suit) {
                write!(f, "{}", card.rank.to_char())?;
                any = true;
            }
            if !any {
                f.write_str("-")?;
            }
        }
        Ok(())
    }
}
