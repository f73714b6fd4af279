//! Duplicate bridge scoring.

use dealsim_core::{Contract, Doubling, Strain};

/// Signed duplicate score for the declaring side, given the tricks declarer
/// took.
pub fn duplicate_score(contract: &Contract, tricks: u8, vulnerable: bool) -> i32 {
    let needed = i32::from(contract.tricks_needed());
    let tricks = i32::from(tricks);

    if tricks >= needed {
        made_score(contract, tricks - needed, vulnerable)
    } else {
        -undertrick_penalty(contract.doubling, needed - tricks, vulnerable)
    }
}

/// (first trick, each later trick) below the line
fn trick_values(strain: Strain) -> (i32, i32) {
    match strain {
        Strain::NoTrump => (40, 30),
        Strain::Spades | Strain::Hearts => (30, 30),
        Strain::Diamonds | Strain::Clubs => (20, 20),
    }
}

fn made_score(contract: &Contract, overtricks: i32, vulnerable: bool) -> i32 {
    let level = i32::from(contract.level);
    let (first, rest) = trick_values(contract.strain);
    let multiplier = match contract.doubling {
        Doubling::Undoubled => 1,
        Doubling::Doubled => 2,
        Doubling::Redoubled => 4,
    };

    let contract_points = (first + rest * (level - 1)) * multiplier;

    let game_bonus = match (contract_points >= 100, vulnerable) {
        (true, true) => 500,
        (true, false) => 300,
        (false, _) => 50,
    };

    let slam_bonus = match (level, vulnerable) {
        (6, false) => 500,
        (6, true) => 750,
        (7, false) => 1000,
        (7, true) => 1500,
        _ => 0,
    };

    let (insult, per_overtrick) = match (contract.doubling, vulnerable) {
        (Doubling::Undoubled, _) => (0, rest),
        (Doubling::Doubled, false) => (50, 100),
        (Doubling::Doubled, true) => (50, 200),
        (Doubling::Redoubled, false) => (100, 200),
        (Doubling::Redoubled, true) => (100, 400),
    };

    contract_points + game_bonus + slam_bonus + insult + overtricks * per_overtrick
}

fn undertrick_penalty(doubling: Doubling, down: i32, vulnerable: bool) -> i32 {
    let doubled = if vulnerable {
        // 200, then 300 each
        200 + 300 * (down - 1)
    } else {
        // 100, 200, 200, then 300 each
        match down {
            1 => 100,
            2 => 300,
            3 => 500,
            n => 500 + 300 * (n - 3),
        }
    };

    match doubling {
        Doubling::Undoubled => down * if vulnerable { 100 } else { 50 },
        Doubling::Doubled => doubled,
        Doubling::Redoubled => doubled * 2,
    }
}
