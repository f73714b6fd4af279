//! Property-based tests for the deal generator.

use proptest::prelude::*;

use dealsim_core::{
    deal_from_seed, Card, ConstraintSet, DealGenerator, GeneratorConfig, PreDeal, Seat, Suit,
};

/// Strategy: up to `max` distinct card indices
fn distinct_cards(max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::hash_set(0u8..52, 0..=max).prop_map(|set| set.into_iter().collect())
}

/// Strategy: a predeal built by spreading distinct cards round the table
fn predeal_strategy() -> impl Strategy<Value = PreDeal> {
    (distinct_cards(30), 0usize..4).prop_map(|(indices, offset)| {
        let mut predeal = PreDeal::new();
        for (i, idx) in indices.into_iter().enumerate() {
            let seat = Seat::ALL[(i + offset) % 4];
            if predeal.needed(seat) == 0 {
                continue;
            }
            if let Some(card) = Card::from_index(idx) {
                predeal.pin(seat, &[card]).expect("distinct cards");
            }
        }
        predeal
    })
}

proptest! {
    // 1. Every deal partitions the deck, 13 cards per seat
    #[test]
    fn deal_partitions_deck(seed in any::<u64>(), predeal in predeal_strategy()) {
        let deal = deal_from_seed(seed, &predeal);
        let mut seen = [false; 52];
        for seat in Seat::ALL {
            prop_assert_eq!(deal.hand(seat).len(), 13);
            for card in deal.hand(seat).cards() {
                let idx = card.to_index() as usize;
                prop_assert!(!seen[idx], "{} dealt twice", card);
                seen[idx] = true;
            }
        }
        prop_assert!(seen.iter().all(|&s| s));
    }

    // 2. Pinned cards always land in their seat
    #[test]
    fn pinned_cards_stay_put(seed in any::<u64>(), predeal in predeal_strategy()) {
        let deal = deal_from_seed(seed, &predeal);
        for seat in Seat::ALL {
            for &card in predeal.cards(seat) {
                prop_assert_eq!(deal.holder(card), Some(seat));
            }
        }
    }

    // 3. Accepted deals satisfy every rule and attempts never undercount
    #[test]
    fn accepted_deals_satisfy_constraints(
        seed in any::<u64>(),
        min_spades in 0u8..=6,
        hcp_min in 0u8..=15,
        width in 0u8..=10,
    ) {
        let constraints = ConstraintSet::new()
            .min_length(Seat::North, Suit::Spades, min_spades)
            .hcp(Seat::North, hcp_min, hcp_min + width);
        let config = GeneratorConfig::new()
            .with_seed(seed)
            .with_max_attempts(2_000)
            .with_constraints(constraints.clone());
        let result = DealGenerator::new(config).generate(5);

        prop_assert!(result.deals.len() <= 5);
        prop_assert!(result.attempts >= result.deals.len() as u64);
        prop_assert!(result.attempts <= 2_000);
        for deal in &result.deals {
            prop_assert!(constraints.accepts(deal));
        }
    }

    // 4. Same seed, same stream
    #[test]
    fn seeded_generation_is_reproducible(seed in any::<u64>()) {
        let config = GeneratorConfig::new()
            .with_seed(seed)
            .with_constraints(ConstraintSet::new().hcp(Seat::South, 10, 40));
        let a = DealGenerator::new(config.clone()).generate(3);
        let b = DealGenerator::new(config).generate(3);
        prop_assert_eq!(a, b);
    }
}

#[test]
fn impossible_shape_terminates_via_budget() {
    let config = GeneratorConfig::new()
        .with_seed(3)
        .with_max_attempts(10_000)
        .with_constraints(ConstraintSet::new().shape(Seat::East, [10, 10, 0, 0]));
    let result = DealGenerator::new(config).generate(1);
    assert!(result.deals.is_empty());
    assert_eq!(result.attempts, 10_000);
    assert!(result.is_exhausted());
}

#[test]
fn full_predeal_seat_is_fixed() {
    let predeal = PreDeal::from_hand_strings([("S", "K842 QT72 986 52")]).unwrap();
    let config = GeneratorConfig::new().with_seed(8).with_predeal(predeal);
    let result = DealGenerator::new(config).generate(10);
    assert_eq!(result.deals.len(), 10);
    for deal in &result.deals {
        assert_eq!(deal.south().to_string(), "K842 QT72 986 52");
    }
}
