//! Double-dummy engines.

use bridge_solver::{Hands, Solver, CLUB, DIAMOND, EAST, HEART, NORTH, NOTRUMP, SOUTH, SPADE, WEST};
use dealsim_core::{Deal, Seat, Strain};

use crate::SolverError;

/// Trick-count oracle: the tricks `declarer` takes in `strain` with best
/// play by all four hands.
///
/// Must be shareable across worker threads. Any
/// `Fn(&Deal, Strain, Seat) -> Result<u8, SolverError>` closure qualifies,
/// which is handy for tests.
pub trait TrickSolver: Send + Sync {
    fn declarer_tricks(&self, deal: &Deal, strain: Strain, declarer: Seat)
        -> Result<u8, SolverError>;
}

impl<F> TrickSolver for F
where
    F: Fn(&Deal, Strain, Seat) -> Result<u8, SolverError> + Send + Sync,
{
    fn declarer_tricks(
        &self,
        deal: &Deal,
        strain: Strain,
        declarer: Seat,
    ) -> Result<u8, SolverError> {
        self(deal, strain, declarer)
    }
}

/// MTD(f) alpha-beta engine from the `bridge-solver` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct BridgeSolver;

impl BridgeSolver {
    pub fn new() -> Self {
        BridgeSolver
    }
}

impl TrickSolver for BridgeSolver {
    fn declarer_tricks(
        &self,
        deal: &Deal,
        strain: Strain,
        declarer: Seat,
    ) -> Result<u8, SolverError> {
        let pbn = deal.to_pbn();
        let hands = Hands::from_pbn(&pbn).ok_or(SolverError::EngineRejected(pbn))?;

        // Opening lead comes from declarer's left
        let leader = engine_seat(declarer.next());
        let ns_tricks = Solver::new(hands, engine_trump(strain), leader).solve();

        Ok(if declarer.is_north_south() {
            ns_tricks
        } else {
            13 - ns_tricks
        })
    }
}

fn engine_trump(strain: Strain) -> usize {
    match strain {
        Strain::Spades => SPADE,
        Strain::Hearts => HEART,
        Strain::Diamonds => DIAMOND,
        Strain::Clubs => CLUB,
        Strain::NoTrump => NOTRUMP,
    }
}

fn engine_seat(seat: Seat) -> bridge_solver::Seat {
    match seat {
        Seat::North => NORTH,
        Seat::East => EAST,
        Seat::South => SOUTH,
        Seat::West => WEST,
    }
}
