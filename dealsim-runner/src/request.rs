//! JSON simulation requests.
//!
//! ```json
//! {
//!   "numHands": 500,
//!   "seed": 7,
//!   "hcp": {"N": [15, 17]},
//!   "balanced": ["N"],
//!   "suitHolding": {"S": {"H": 4}},
//!   "predeal": {"S": "K842 QT72 986 52"},
//!   "strategies": [ ... ]
//! }
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use dealsim_core::{ConfigError, ConstraintSet, GeneratorConfig, PreDeal, Seat, Suit};
use dealsim_strategy::{Strategy, StrategyOptions, UnknownConditionPolicy};

use crate::{RequestError, StrategyComparison};

const DEFAULT_NUM_HANDS: usize = 100;

fn default_num_hands() -> usize {
    DEFAULT_NUM_HANDS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SimulationRequest {
    #[serde(default = "default_num_hands")]
    pub num_hands: usize,
    #[serde(default)]
    pub hcp: BTreeMap<String, [u8; 2]>,
    #[serde(default)]
    pub suit_holding: BTreeMap<String, BTreeMap<String, u8>>,
    #[serde(default)]
    pub hand_shape: BTreeMap<String, [u8; 4]>,
    #[serde(default)]
    pub controls: BTreeMap<String, [u8; 2]>,
    #[serde(default)]
    pub balanced: Vec<String>,
    #[serde(default)]
    pub predeal: BTreeMap<String, String>,
    pub max_attempts: Option<u64>,
    pub seed: Option<u64>,
    #[serde(default)]
    pub vulnerable: bool,
    #[serde(default)]
    pub unknown_conditions: UnknownConditionPolicy,
    #[serde(default)]
    pub strategies: Vec<Value>,
}

/// A validated request, ready to run
#[derive(Debug, Clone)]
pub struct Simulation {
    pub trials: usize,
    pub config: GeneratorConfig,
    pub comparison: StrategyComparison,
}

impl SimulationRequest {
    pub fn from_json(json: &str) -> Result<Self, RequestError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate everything and assemble the simulation
    pub fn build(&self) -> Result<Simulation, RequestError> {
        Ok(Simulation {
            trials: self.num_hands,
            config: self.generator_config()?,
            comparison: StrategyComparison::new(self.strategies()?, self.vulnerable)?,
        })
    }

    pub fn generator_config(&self) -> Result<GeneratorConfig, RequestError> {
        let mut constraints = ConstraintSet::new();

        for (seat, &[min, max]) in &self.hcp {
            constraints = constraints.hcp(parse_seat("hcp", seat)?, min, max);
        }
        for (seat, &[min, max]) in &self.controls {
            constraints = constraints.controls(parse_seat("controls", seat)?, min, max);
        }
        // A shape not adding up to 13 is kept: it never matches and the run
        // ends on the attempt budget
        for (seat, &lengths) in &self.hand_shape {
            constraints = constraints.shape(parse_seat("handShape", seat)?, lengths);
        }
        for (seat, suits) in &self.suit_holding {
            let seat = parse_seat("suitHolding", seat)?;
            for (suit, &min) in suits {
                constraints = constraints.min_length(seat, parse_suit(suit)?, min);
            }
        }
        for seat in &self.balanced {
            constraints = constraints.balanced(parse_seat("balanced", seat)?);
        }

        let predeal = PreDeal::from_hand_strings(
            self.predeal
                .iter()
                .map(|(seat, hand)| (seat.as_str(), hand.as_str())),
        )
        .map_err(|source| RequestError::Config {
            field: "predeal",
            source,
        })?;

        let mut config = GeneratorConfig::new()
            .with_constraints(constraints)
            .with_predeal(predeal);
        config.max_attempts = self.max_attempts;
        config.seed = self.seed;
        Ok(config)
    }

    pub fn strategies(&self) -> Result<Vec<Strategy>, RequestError> {
        let options = StrategyOptions {
            unknown_conditions: self.unknown_conditions,
        };
        self.strategies
            .iter()
            .enumerate()
            .map(|(index, value)| {
                Strategy::from_value(value, options)
                    .map_err(|source| RequestError::Strategy { index, source })
            })
            .collect()
    }
}

fn parse_seat(field: &'static str, s: &str) -> Result<Seat, RequestError> {
    s.parse()
        .map_err(|source| RequestError::Config { field, source })
}

fn parse_suit(s: &str) -> Result<Suit, RequestError> {
    let mut chars = s.trim().chars();
    let suit = match (chars.next(), chars.next()) {
        (Some(c), None) => Suit::from_char(c),
        _ => Err(ConfigError::InvalidSuit(s.to_string())),
    };
    suit.map_err(|source| RequestError::Config {
        field: "suitHolding",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealsim_core::{Card, Deal, Rank, Strain};
    use dealsim_dds::SolverError;

    use crate::SimulationRunner;

    #[test]
    fn test_defaults() {
        let request = SimulationRequest::from_json("{}").unwrap();
        assert_eq!(request.num_hands, 100);
        assert!(!request.vulnerable);

        let simulation = request.build().unwrap();
        assert_eq!(simulation.trials, 100);
        assert!(simulation.config.is_trivial());
        assert!(simulation.comparison.strategies().is_empty());
    }

    #[test]
    fn test_constraints_mapped_to_seats() {
        let request = SimulationRequest::from_json(
            r#"{
                "hcp": {"N": [15, 17]},
                "controls": {"E": [0, 2]},
                "handShape": {"W": [4, 4, 3, 2]},
                "suitHolding": {"S": {"H": 4, "s": 3}},
                "balanced": ["N"],
                "predeal": {"S": "K842 QT72 986 52"},
                "maxAttempts": 5000,
                "seed": 11
            }"#,
        )
        .unwrap();
        let config = request.generator_config().unwrap();

        let north = config.constraints.seat(Seat::North);
        assert_eq!(north.hcp, Some((15, 17)));
        assert!(north.balanced);
        assert_eq!(config.constraints.seat(Seat::East).controls, Some((0, 2)));
        assert_eq!(config.constraints.seat(Seat::West).shape, Some([4, 4, 3, 2]));

        let south = config.constraints.seat(Seat::South);
        assert_eq!(south.min_lengths[Suit::Hearts as usize], Some(4));
        assert_eq!(south.min_lengths[Suit::Spades as usize], Some(3));

        assert_eq!(config.predeal.cards(Seat::South).len(), 13);
        assert_eq!(
            config.predeal.holder(Card::new(Suit::Spades, Rank::King)),
            Some(Seat::South)
        );
        assert_eq!(config.max_attempts, Some(5000));
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_bad_seat_is_config_error() {
        let request = SimulationRequest::from_json(r#"{"hcp": {"X": [1, 2]}}"#).unwrap();
        assert!(matches!(
            request.generator_config(),
            Err(RequestError::Config { field: "hcp", .. })
        ));
    }

    #[test]
    fn test_impossible_shape_exhausts_budget() {
        let request = SimulationRequest::from_json(
            r#"{"numHands": 3, "seed": 4, "maxAttempts": 300, "handShape": {"N": [5, 5, 5, 5]}}"#,
        )
        .unwrap();
        let simulation = request.build().unwrap();
        assert_eq!(
            simulation.config.constraints.seat(Seat::North).shape,
            Some([5, 5, 5, 5])
        );

        let engine = |_: &Deal, _: Strain, _: Seat| -> Result<u8, SolverError> { Ok(7) };
        let report = SimulationRunner::new(engine).run(
            |deal, solver| simulation.comparison.evaluate(deal, solver),
            simulation.trials,
            simulation.config.clone(),
        );
        assert_eq!(report.trials_requested, 3);
        assert_eq!(report.trials_run, 0);
        assert_eq!(report.attempts, 300);
        assert!(report.exhausted);
    }

    #[test]
    fn test_duplicate_predeal_card() {
        let request = SimulationRequest::from_json(
            r#"{"predeal": {"N": "A - - -", "S": "A - - -"}}"#,
        )
        .unwrap();
        assert!(matches!(
            request.generator_config(),
            Err(RequestError::Config { field: "predeal", source: ConfigError::DuplicateCard { .. } })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(matches!(
            SimulationRequest::from_json(r#"{"numHand": 10}"#),
            Err(RequestError::Json(_))
        ));
    }

    #[test]
    fn test_strategy_errors_carry_index() {
        let request = SimulationRequest::from_json(
            r#"{"strategies": [
                {"name": "ok", "root": {"type": "contract", "contract": "1N", "declarer": "N"}},
                {"name": "bad", "root": {"type": "bid", "contract": "1N", "declarer": "N"}}
            ]}"#,
        )
        .unwrap();
        assert!(matches!(
            request.strategies(),
            Err(RequestError::Strategy { index: 1, .. })
        ));
    }
}
