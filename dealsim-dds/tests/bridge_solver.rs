//! End-to-end checks against the real double-dummy engine.

use dealsim_core::{Deal, Seat, Strain};
use dealsim_dds::{BridgeSolver, DoubleDummySolver, SolverError, TrickSolver};

/// North all spades, East all diamonds, South all hearts, West all clubs
const ONE_SUIT_EACH: &str =
    "N:AKQJT98765432... ..AKQJT98765432. .AKQJT98765432.. ...AKQJT98765432";

fn one_suit_each() -> Deal {
    Deal::from_pbn(ONE_SUIT_EACH).unwrap()
}

#[test]
fn grand_slam_in_own_suit_makes() {
    let deal = one_suit_each();
    let engine = BridgeSolver::new();
    let mut solver = DoubleDummySolver::new(&deal, &engine);

    assert_eq!(solver.tricks("7S", "N"), Ok(13));
    assert_eq!(solver.score("7S", "N", false), Ok(1510));
}

#[test]
fn notrump_makes_nothing() {
    let deal = one_suit_each();
    let engine = BridgeSolver::new();
    let mut solver = DoubleDummySolver::new(&deal, &engine);

    // East leads diamonds and runs all thirteen
    assert_eq!(solver.tricks("7N", "N"), Ok(0));
    assert_eq!(solver.score("7N", "N", false), Ok(-650));
}

#[test]
fn defenders_view_is_complementary() {
    let deal = one_suit_each();
    let engine = BridgeSolver::new();

    // West's clubs are trumps; North leads spades which West ruffs
    let west_clubs = engine
        .declarer_tricks(&deal, Strain::Clubs, Seat::West)
        .unwrap();
    assert_eq!(west_clubs, 13);

    let mut solver = DoubleDummySolver::new(&deal, &engine);
    assert_eq!(solver.score("1C", "W", false), Ok(190));
}

#[test]
fn sample_deal_tricks_are_consistent() {
    let deal = Deal::from_pbn(
        "N:AKQT3.J6.KJ42.95 652.AK42.AQ87.T4 J74.QT95.T.AK863 98.873.9653.QJ72",
    )
    .unwrap();
    let engine = BridgeSolver::new();
    let mut solver = DoubleDummySolver::new(&deal, &engine);

    for strain in ["C", "D", "H", "S", "N"] {
        let tricks = solver.tricks(&format!("1{strain}"), "N").unwrap();
        assert!(tricks <= 13);
        assert_eq!(solver.tricks(&format!("5{strain}"), "N").unwrap(), tricks);
    }
    assert_eq!(solver.solved(), 5);
}

#[test]
fn invalid_declarer_is_an_error() {
    let deal = one_suit_each();
    let engine = BridgeSolver::new();
    let mut solver = DoubleDummySolver::new(&deal, &engine);
    assert_eq!(
        solver.score("4S", "Q", false),
        Err(SolverError::InvalidDeclarer("Q".to_string()))
    );
}
