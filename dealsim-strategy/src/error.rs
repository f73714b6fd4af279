use dealsim_core::ConfigError;
use thiserror::Error;

/// Failure building a strategy tree. Every variant that points into the tree
/// carries the path of the offending node, e.g. `root.true_branch`.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("invalid strategy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{path}: expected a JSON object")]
    NotAnObject { path: String },

    #[error("{path}: branch is missing '{field}'")]
    MissingBranch { path: String, field: &'static str },

    #[error("{path}: missing field '{field}'")]
    MissingField { path: String, field: &'static str },

    #[error("{path}: field '{field}' has invalid value {found}")]
    InvalidField {
        path: String,
        field: &'static str,
        found: String,
    },

    #[error("{path}: unknown node type '{kind}'")]
    UnknownNodeType { path: String, kind: String },

    #[error("{path}: unknown condition type '{kind}'")]
    UnknownCondition { path: String, kind: String },

    #[error("{path}: invalid operator '{op}'")]
    InvalidOperator { path: String, op: String },

    #[error("{path}: {source}")]
    Config { path: String, source: ConfigError },
}
