use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Card, ConfigError, Hand, Suit};

/// The four positions at a bridge table, in N-E-S-W cyclic order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Seat {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Seat {
    /// All seats in standard order
    pub const ALL: [Seat; 4] = [Seat::North, Seat::East, Seat::South, Seat::West];

    /// Convert from index (0-3)
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Seat::North),
            1 => Some(Seat::East),
            2 => Some(Seat::South),
            3 => Some(Seat::West),
            _ => None,
        }
    }

    /// Parse N, E, S or W (case-insensitive)
    pub fn from_char(c: char) -> Result<Self, ConfigError> {
        match c.to_ascii_uppercase() {
            'N' => Ok(Seat::North),
            'E' => Ok(Seat::East),
            'S' => Ok(Seat::South),
            'W' => Ok(Seat::West),
            _ => Err(ConfigError::InvalidSeat(c.to_string())),
        }
    }

    /// Get seat as a character (N, E, S, W)
    pub fn to_char(&self) -> char {
        match self {
            Seat::North => 'N',
            Seat::East => 'E',
            Seat::South => 'S',
            Seat::West => 'W',
        }
    }

    pub fn partner(&self) -> Seat {
        match self {
            Seat::North => Seat::South,
            Seat::South => Seat::North,
            Seat::East => Seat::West,
            Seat::West => Seat::East,
        }
    }

    /// Next seat clockwise (the left-hand opponent)
    pub fn next(&self) -> Seat {
        match self {
            Seat::North => Seat::East,
            Seat::East => Seat::South,
            Seat::South => Seat::West,
            Seat::West => Seat::North,
        }
    }

    pub fn is_north_south(&self) -> bool {
        matches!(self, Seat::North | Seat::South)
    }
}

impl FromStr for Seat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Seat::from_char(c),
            _ => Err(ConfigError::InvalidSeat(s.to_string())),
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Serialize for Seat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Seat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A complete bridge deal: 52 cards, 13 per seat.
///
/// Deals are immutable once built. Two deals with the same cards in the same
/// seats compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    hands: [Hand; 4],
}

impl Deal {
    /// Build a deal from four hands (indexed by `Seat as usize`), checking
    /// that they partition the deck.
    pub fn from_hands(hands: [Hand; 4]) -> Result<Self, ConfigError> {
        let mut seen = [false; 52];
        for seat in Seat::ALL {
            let hand = &hands[seat as usize];
            if hand.len() != 13 {
                return Err(ConfigError::InvalidDeal(format!(
                    "{} holds {} cards, expected 13",
                    seat,
                    hand.len()
                )));
            }
            for card in hand.cards() {
                let idx = card.to_index() as usize;
                if seen[idx] {
                    return Err(ConfigError::InvalidDeal(format!(
                        "card {} dealt twice",
                        card
                    )));
                }
                seen[idx] = true;
            }
        }
        Ok(Deal { hands })
    }

    /// Caller guarantees the hands partition the deck
    pub(crate) fn from_hands_unchecked(hands: [Hand; 4]) -> Self {
        debug_assert!(hands.iter().all(|h| h.len() == 13));
        Deal { hands }
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat as usize]
    }

    pub fn north(&self) -> &Hand {
        self.hand(Seat::North)
    }

    pub fn east(&self) -> &Hand {
        self.hand(Seat::East)
    }

    pub fn south(&self) -> &Hand {
        self.hand(Seat::South)
    }

    pub fn west(&self) -> &Hand {
        self.hand(Seat::West)
    }

    /// Which seat holds a card
    pub fn holder(&self, card: Card) -> Option<Seat> {
        Seat::ALL.into_iter().find(|&s| self.hand(s).has_card(card))
    }

    /// Parse a PBN deal string: `N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 ...`.
    /// Hands run clockwise from the seat before the colon.
    pub fn from_pbn(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        let (first, rest) = s
            .split_once(':')
            .ok_or_else(|| ConfigError::InvalidDeal(format!("missing seat prefix in '{}'", s)))?;
        let first: Seat = first.parse()?;

        let hand_strs: Vec<&str> = rest.split_whitespace().collect();
        if hand_strs.len() != 4 {
            return Err(ConfigError::InvalidDeal(format!(
                "expected 4 hands, got {}",
                hand_strs.len()
            )));
        }

        let mut hands: [Hand; 4] = Default::default();
        let mut seat = first;
        for hand_str in hand_strs {
            hands[seat as usize] = parse_dotted_hand(hand_str)?;
            seat = seat.next();
        }
        Deal::from_hands(hands)
    }

    /// Format as a PBN deal string starting with North
    pub fn to_pbn(&self) -> String {
        let mut result = String::from("N:");
        for (i, seat) in Seat::ALL.into_iter().enumerate() {
            if i > 0 {
                result.push(' ');
            }
            result.push_str(&format_dotted_hand(self.hand(seat)));
        }
        result
    }
}

/// Parse `AKQT3.J6.KJ42.95` (empty segment = void)
fn parse_dotted_hand(s: &str) -> Result<Hand, ConfigError> {
    let segments: Vec<&str> = s
        .split('.')
        .map(|seg| if seg.is_empty() { "-" } else { seg })
        .collect();
    segments.join(" ").parse()
}

fn format_dotted_hand(hand: &Hand) -> String {
    let mut result = String::with_capacity(16);
    for (i, suit) in Suit::ALL.into_iter().enumerate() {
        if i > 0 {
            result.push('.');
        }
        for card in hand.cards_in_suit(suit) {
            result.push(card.rank.to_char());
        }
    }
    result
}

impl fmt::Display for Deal {
    /// One line per deal: `n AKQT3.J6.KJ42.95 e 652.AK42.AQ87.T4 s ... w ...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seat) in Seat::ALL.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(
                f,
                "{} {}",
                seat.to_char().to_ascii_lowercase(),
                format_dotted_hand(self.hand(seat))
            )?;
        }
        Ok(())
    }
}

impl Serialize for Deal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_pbn())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rank;

    const PBN: &str = "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";

    #[test]
    fn test_pbn_round_trip() {
        let deal = Deal::from_pbn(PBN).unwrap();
        assert_eq!(deal.to_pbn(), PBN);
        assert_eq!(deal.north().hcp(), 14);
        assert_eq!(deal.east().suit_lengths(), [3, 4, 4, 2]);
    }

    #[test]
    fn test_pbn_rotated_start() {
        let rotated =
            "E:652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72 AKQT3.J6.KJ42.95";
        assert_eq!(Deal::from_pbn(rotated).unwrap(), Deal::from_pbn(PBN).unwrap());
    }

    #[test]
    fn test_pbn_voids() {
        let deal = Deal::from_pbn(
            "N:AKQJT98765432... .AKQJT98765432.. ..AKQJT98765432. ...AKQJT98765432",
        )
        .unwrap();
        assert_eq!(deal.north().suit_length(Suit::Spades), 13);
        assert_eq!(deal.west().suit_length(Suit::Clubs), 13);
    }

    #[test]
    fn test_from_hands_rejects_duplicates() {
        let hands: [Hand; 4] = [
            "AKQJT98765432 - - -".parse().unwrap(),
            "AKQJT98765432 - - -".parse().unwrap(),
            "- - AKQJT98765432 -".parse().unwrap(),
            "- - - AKQJT98765432".parse().unwrap(),
        ];
        assert!(matches!(
            Deal::from_hands(hands),
            Err(ConfigError::InvalidDeal(_))
        ));
    }

    #[test]
    fn test_holder() {
        let deal = Deal::from_pbn(PBN).unwrap();
        assert_eq!(
            deal.holder(Card::new(Suit::Spades, Rank::Ace)),
            Some(Seat::North)
        );
        assert_eq!(
            deal.holder(Card::new(Suit::Clubs, Rank::Two)),
            Some(Seat::West)
        );
    }

    #[test]
    fn test_oneline_display() {
        let deal = Deal::from_pbn(PBN).unwrap();
        assert_eq!(
            deal.to_string(),
            "n AKQT3.J6.KJ42.95 e 652.AK42.AQ87.T4 s J74.QT95.T.AK863 w 98.873.9653.QJ72"
        );
    }

    #[test]
    fn test_seats() {
        assert_eq!(Seat::North.partner(), Seat::South);
        assert_eq!(Seat::East.partner(), Seat::West);
        assert_eq!(Seat::West.next(), Seat::North);
        assert_eq!("s".parse::<Seat>().unwrap(), Seat::South);
        assert!("X".parse::<Seat>().is_err());
        assert!("NS".parse::<Seat>().is_err());
        assert!(Seat::South.is_north_south());
        assert!(!Seat::West.is_north_south());
    }
}
