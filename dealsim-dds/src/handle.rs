use dealsim_core::{Contract, Deal, Seat, Strain};
use rustc_hash::FxHashMap;

use crate::{duplicate_score, SolverError, TrickSolver};

/// Double-dummy view of a single deal.
///
/// Trick counts are cached per (strain, declarer), so asking about `2H` and
/// then `4H` by the same seat solves once.
pub struct DoubleDummySolver<'a> {
    deal: &'a Deal,
    engine: &'a dyn TrickSolver,
    cache: FxHashMap<(Strain, Seat), u8>,
}

impl<'a> DoubleDummySolver<'a> {
    pub fn new(deal: &'a Deal, engine: &'a dyn TrickSolver) -> Self {
        DoubleDummySolver {
            deal,
            engine,
            cache: FxHashMap::default(),
        }
    }

    pub fn deal(&self) -> &Deal {
        self.deal
    }

    /// Tricks declarer takes in a strain
    pub fn declarer_tricks(&mut self, strain: Strain, declarer: Seat) -> Result<u8, SolverError> {
        if let Some(&tricks) = self.cache.get(&(strain, declarer)) {
            return Ok(tricks);
        }
        let tricks = self.engine.declarer_tricks(self.deal, strain, declarer)?;
        self.cache.insert((strain, declarer), tricks);
        Ok(tricks)
    }

    pub fn tricks_for(&mut self, contract: &Contract, declarer: Seat) -> Result<u8, SolverError> {
        self.declarer_tricks(contract.strain, declarer)
    }

    pub fn score_for(
        &mut self,
        contract: &Contract,
        declarer: Seat,
        vulnerable: bool,
    ) -> Result<i32, SolverError> {
        let tricks = self.tricks_for(contract, declarer)?;
        Ok(duplicate_score(contract, tricks, vulnerable))
    }

    /// Tricks for a contract string such as `"4H"` or `"3N"` and a declarer
    /// letter
    pub fn tricks(&mut self, contract: &str, declarer: &str) -> Result<u8, SolverError> {
        let (contract, declarer) = parse_args(contract, declarer)?;
        self.tricks_for(&contract, declarer)
    }

    /// Signed duplicate score for the declaring side
    pub fn score(
        &mut self,
        contract: &str,
        declarer: &str,
        vulnerable: bool,
    ) -> Result<i32, SolverError> {
        let (contract, declarer) = parse_args(contract, declarer)?;
        self.score_for(&contract, declarer, vulnerable)
    }

    /// Number of distinct (strain, declarer) pairs solved so far
    pub fn solved(&self) -> usize {
        self.cache.len()
    }
}

fn parse_args(contract: &str, declarer: &str) -> Result<(Contract, Seat), SolverError> {
    let declarer: Seat = declarer
        .parse()
        .map_err(|_| SolverError::InvalidDeclarer(declarer.to_string()))?;
    let contract: Contract = contract
        .parse()
        .map_err(|_| SolverError::InvalidContract(contract.to_string()))?;
    Ok((contract, declarer))
}
