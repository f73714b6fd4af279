use dealsim_core::ConfigError;
use dealsim_strategy::StrategyError;
use thiserror::Error;

/// A simulation request that cannot be run
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field}: {source}")]
    Config {
        field: &'static str,
        source: ConfigError,
    },

    #[error("strategy #{index}: {source}")]
    Strategy {
        index: usize,
        source: StrategyError,
    },

    #[error("duplicate strategy name '{0}'")]
    DuplicateStrategy(String),
}
