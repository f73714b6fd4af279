use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    #[error("invalid declarer '{0}': must be one of N, E, S, W")]
    InvalidDeclarer(String),

    #[error("invalid contract '{0}'")]
    InvalidContract(String),

    #[error("solver rejected deal {0}")]
    EngineRejected(String),
}
