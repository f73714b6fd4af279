//! Cards pinned to seats before the rest of the deck is shuffled out.

use std::collections::BTreeMap;

use crate::{Card, ConfigError, Hand, Seat};

/// Predealt cards for each seat (0-13 per seat, no card twice).
///
/// Cheap to clone and safe to share across threads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreDeal {
    cards: [Vec<Card>; 4],
}

impl PreDeal {
    /// An empty predeal: every seat is dealt at random
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from seat letters mapped to hand strings, e.g.
    /// `{"S": "K842 QT72 986 52"}`.
    pub fn from_hand_strings<'a, I>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut predeal = PreDeal::new();
        for (seat, holding) in entries {
            let seat: Seat = seat.parse()?;
            let hand: Hand = holding.parse()?;
            predeal.pin(seat, hand.cards())?;
        }
        Ok(predeal)
    }

    /// Pin cards to a seat.
    ///
    /// Fails if a card is already pinned (to any seat) or the seat would hold
    /// more than 13 cards. On error nothing from `cards` is pinned.
    pub fn pin(&mut self, seat: Seat, cards: &[Card]) -> Result<(), ConfigError> {
        let idx = seat as usize;
        if self.cards[idx].len() + cards.len() > 13 {
            return Err(ConfigError::TooManyCards { seat });
        }
        for (i, &card) in cards.iter().enumerate() {
            if let Some(holder) = self.holder(card) {
                return Err(ConfigError::DuplicateCard { card, seat: holder });
            }
            if cards[..i].contains(&card) {
                return Err(ConfigError::DuplicateCard { card, seat });
            }
        }
        self.cards[idx].extend_from_slice(cards);
        Ok(())
    }

    /// Pinned cards for a seat
    pub fn cards(&self, seat: Seat) -> &[Card] {
        &self.cards[seat as usize]
    }

    /// Number of random cards a seat still needs
    pub fn needed(&self, seat: Seat) -> usize {
        13 - self.cards[seat as usize].len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.iter().all(|v| v.is_empty())
    }

    /// Which seat a card is pinned to, if any
    pub fn holder(&self, card: Card) -> Option<Seat> {
        Seat::ALL
            .into_iter()
            .find(|&s| self.cards[s as usize].contains(&card))
    }

    /// The undealt pool: every card not pinned, in deck order
    pub fn undealt(&self) -> Vec<Card> {
        let mut pinned = [false; 52];
        for card in self.cards.iter().flatten() {
            pinned[card.to_index() as usize] = true;
        }
        Card::deck().filter(|c| !pinned[c.to_index() as usize]).collect()
    }

    /// Seat letter to hand string, for reports
    pub fn describe(&self) -> BTreeMap<char, String> {
        Seat::ALL
            .into_iter()
            .filter(|&s| !self.cards(s).is_empty())
            .map(|s| (s.to_char(), Hand::from_cards(self.cards(s).to_vec()).to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    #[test]
    fn test_predeal_basic() {
        let mut predeal = PreDeal::new();
        predeal
            .pin(
                Seat::North,
                &[
                    Card::new(Suit::Spades, Rank::Ace),
                    Card::new(Suit::Spades, Rank::King),
                ],
            )
            .unwrap();

        assert_eq!(predeal.cards(Seat::North).len(), 2);
        assert_eq!(predeal.needed(Seat::North), 11);
        assert_eq!(predeal.needed(Seat::East), 13);
        assert_eq!(predeal.undealt().len(), 50);
        assert!(!predeal.is_empty());
    }

    #[test]
    fn test_from_hand_strings() {
        let predeal =
            PreDeal::from_hand_strings([("S", "K842 QT72 986 52"), ("n", "A - - -")]).unwrap();
        assert_eq!(predeal.needed(Seat::South), 0);
        assert_eq!(predeal.needed(Seat::North), 12);
        assert_eq!(
            predeal.holder(Card::new(Suit::Hearts, Rank::Queen)),
            Some(Seat::South)
        );
        assert_eq!(predeal.undealt().len(), 38);
        assert_eq!(predeal.describe()[&'S'], "K842 QT72 986 52");
    }

    #[test]
    fn test_duplicate_across_seats() {
        let mut predeal = PreDeal::new();
        predeal
            .pin(Seat::North, &[Card::new(Suit::Spades, Rank::Ace)])
            .unwrap();

        let result = predeal.pin(Seat::South, &[Card::new(Suit::Spades, Rank::Ace)]);
        assert_eq!(
            result,
            Err(ConfigError::DuplicateCard {
                card: Card::new(Suit::Spades, Rank::Ace),
                seat: Seat::North
            })
        );
        assert!(predeal.cards(Seat::South).is_empty());
    }

    #[test]
    fn test_overlapping_hand_strings() {
        let result = PreDeal::from_hand_strings([("N", "AK - - -"), ("E", "A - - -")]);
        assert!(matches!(result, Err(ConfigError::DuplicateCard { .. })));
    }

    #[test]
    fn test_too_many_error() {
        let mut predeal = PreDeal::new();
        let cards: Vec<Card> = (0..14).filter_map(Card::from_index).collect();
        assert_eq!(
            predeal.pin(Seat::North, &cards),
            Err(ConfigError::TooManyCards { seat: Seat::North })
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            PreDeal::from_hand_strings([("X", "A - - -")]),
            Err(ConfigError::InvalidSeat(_))
        ));
        assert!(matches!(
            PreDeal::from_hand_strings([("N", "AZ - - -")]),
            Err(ConfigError::InvalidRank { .. })
        ));
    }
}
