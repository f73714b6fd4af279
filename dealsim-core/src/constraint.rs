//! Per-seat acceptance rules applied to each candidate deal.

use crate::{Deal, Hand, Seat, Suit};

/// Anything that can accept or reject a fully dealt candidate.
///
/// Implemented by [`ConstraintSet`] and by any `Fn(&Deal) -> bool` closure.
pub trait DealFilter: Send + Sync {
    fn accepts(&self, deal: &Deal) -> bool;
}

impl<F> DealFilter for F
where
    F: Fn(&Deal) -> bool + Send + Sync,
{
    fn accepts(&self, deal: &Deal) -> bool {
        self(deal)
    }
}

/// Rules for a single seat. Absent rules impose nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeatConstraint {
    /// Minimum length per suit, indexed by `Suit as usize`
    pub min_lengths: [Option<u8>; 4],
    /// Exact S-H-D-C lengths
    pub shape: Option<[u8; 4]>,
    /// Inclusive HCP range
    pub hcp: Option<(u8, u8)>,
    /// Inclusive controls range
    pub controls: Option<(u8, u8)>,
    pub balanced: bool,
}

impl SeatConstraint {
    pub fn is_empty(&self) -> bool {
        self == &SeatConstraint::default()
    }

    pub fn accepts(&self, hand: &Hand) -> bool {
        let lengths = hand.suit_lengths();

        for suit in Suit::ALL {
            if let Some(min) = self.min_lengths[suit as usize] {
                if lengths[suit as usize] < min {
                    return false;
                }
            }
        }

        if let Some(shape) = &self.shape {
            if lengths != *shape {
                return false;
            }
        }

        if let Some((min, max)) = self.hcp {
            if !(min..=max).contains(&hand.hcp()) {
                return false;
            }
        }

        if let Some((min, max)) = self.controls {
            if !(min..=max).contains(&hand.controls()) {
                return false;
            }
        }

        !self.balanced || hand.is_balanced()
    }
}

/// A conjunction of seat-keyed rules. Built once, read-only during
/// generation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    seats: [SeatConstraint; 4],
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `min` cards in `suit`
    pub fn min_length(mut self, seat: Seat, suit: Suit, min: u8) -> Self {
        self.seats[seat as usize].min_lengths[suit as usize] = Some(min);
        self
    }

    /// Require exact suit lengths in S-H-D-C order. A pattern not summing to
    /// 13 can never match.
    pub fn shape(mut self, seat: Seat, lengths: [u8; 4]) -> Self {
        self.seats[seat as usize].shape = Some(lengths);
        self
    }

    pub fn hcp(mut self, seat: Seat, min: u8, max: u8) -> Self {
        self.seats[seat as usize].hcp = Some((min, max));
        self
    }

    pub fn controls(mut self, seat: Seat, min: u8, max: u8) -> Self {
        self.seats[seat as usize].controls = Some((min, max));
        self
    }

    /// Require 4-3-3-3, 4-4-3-2 or 5-3-3-2
    pub fn balanced(mut self, seat: Seat) -> Self {
        self.seats[seat as usize].balanced = true;
        self
    }

    pub fn seat(&self, seat: Seat) -> &SeatConstraint {
        &self.seats[seat as usize]
    }

    pub fn seat_mut(&mut self, seat: Seat) -> &mut SeatConstraint {
        &mut self.seats[seat as usize]
    }

    /// True when no rule is active for any seat
    pub fn is_empty(&self) -> bool {
        self.seats.iter().all(SeatConstraint::is_empty)
    }

    pub fn accepts(&self, deal: &Deal) -> bool {
        Seat::ALL
            .into_iter()
            .all(|seat| self.seats[seat as usize].accepts(deal.hand(seat)))
    }
}

impl DealFilter for ConstraintSet {
    fn accepts(&self, deal: &Deal) -> bool {
        ConstraintSet::accepts(self, deal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // North: 5-2-4-2, 14 HCP, 4 controls
    const PBN: &str = "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72";

    fn deal() -> Deal {
        Deal::from_pbn(PBN).unwrap()
    }

    #[test]
    fn test_empty_accepts_everything() {
        let constraints = ConstraintSet::new();
        assert!(constraints.is_empty());
        assert!(constraints.accepts(&deal()));
    }

    #[test]
    fn test_min_length() {
        let ok = ConstraintSet::new().min_length(Seat::North, Suit::Spades, 5);
        let bad = ConstraintSet::new().min_length(Seat::North, Suit::Spades, 6);
        assert!(!ok.is_empty());
        assert!(ok.accepts(&deal()));
        assert!(!bad.accepts(&deal()));
    }

    #[test]
    fn test_shape() {
        let ok = ConstraintSet::new().shape(Seat::North, [5, 2, 4, 2]);
        let bad = ConstraintSet::new().shape(Seat::North, [5, 4, 2, 2]);
        let impossible = ConstraintSet::new().shape(Seat::North, [10, 10, 0, 0]);
        assert!(ok.accepts(&deal()));
        assert!(!bad.accepts(&deal()));
        assert!(!impossible.accepts(&deal()));
    }

    #[test]
    fn test_hcp_range_is_inclusive() {
        assert!(ConstraintSet::new().hcp(Seat::North, 14, 14).accepts(&deal()));
        assert!(ConstraintSet::new().hcp(Seat::North, 10, 14).accepts(&deal()));
        assert!(!ConstraintSet::new().hcp(Seat::North, 15, 17).accepts(&deal()));
        assert!(!ConstraintSet::new().hcp(Seat::North, 40, 40).accepts(&deal()));
    }

    #[test]
    fn test_controls_range() {
        assert!(ConstraintSet::new().controls(Seat::North, 4, 4).accepts(&deal()));
        assert!(!ConstraintSet::new().controls(Seat::North, 5, 12).accepts(&deal()));
    }

    #[test]
    fn test_balanced() {
        // West is 2-3-4-4
        assert!(ConstraintSet::new().balanced(Seat::West).accepts(&deal()));
        // South is 3-4-1-5
        assert!(!ConstraintSet::new().balanced(Seat::South).accepts(&deal()));
    }

    #[test]
    fn test_conjunction_across_seats() {
        let constraints = ConstraintSet::new()
            .min_length(Seat::North, Suit::Spades, 5)
            .hcp(Seat::East, 13, 15);
        assert!(constraints.accepts(&deal()));

        let constraints = constraints.hcp(Seat::South, 0, 5);
        assert!(!constraints.accepts(&deal()));
    }

    #[test]
    fn test_closure_filter() {
        let filter = |d: &Deal| d.north().hcp() > 10;
        assert!(DealFilter::accepts(&filter, &deal()));
    }
}
