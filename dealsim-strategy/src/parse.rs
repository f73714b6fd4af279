//! Building strategy trees from JSON.
//!
//! ```json
//! {
//!   "name": "Weak twos",
//!   "seat": "N",
//!   "root": {
//!     "type": "branch",
//!     "condition": {"type": "suit_length", "suit": "S", "operator": ">=", "value": 5},
//!     "true_branch": {"type": "contract", "contract": "2S", "declarer": "N"},
//!     "false_branch": {"type": "contract", "contract": "1N", "declarer": "N"}
//!   }
//! }
//! ```
//!
//! Conditions may carry their own `"seat"`; otherwise they read the strategy's
//! seat (North when omitted).

use serde::Deserialize;
use serde_json::{Map, Value};

use dealsim_core::{ConfigError, Seat, Suit};

use crate::{Condition, DecisionNode, Operator, Strategy, StrategyError};

const DEFAULT_NAME: &str = "Unnamed Strategy";

/// What to do with a condition whose `type` is not known
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownConditionPolicy {
    /// Fail construction
    #[default]
    Reject,
    /// Build the condition anyway; it always evaluates to false
    FailClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyOptions {
    pub unknown_conditions: UnknownConditionPolicy,
}

impl StrategyOptions {
    pub fn fail_closed() -> Self {
        StrategyOptions {
            unknown_conditions: UnknownConditionPolicy::FailClosed,
        }
    }
}

impl Strategy {
    pub fn from_json(json: &str) -> Result<Self, StrategyError> {
        Self::from_json_with(json, StrategyOptions::default())
    }

    pub fn from_json_with(json: &str, options: StrategyOptions) -> Result<Self, StrategyError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, options)
    }

    pub fn from_value(value: &Value, options: StrategyOptions) -> Result<Self, StrategyError> {
        let path = "strategy";
        let obj = as_object(value, path)?;

        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_NAME);
        let seat = optional_seat(obj, path)?.unwrap_or(Seat::North);
        let root = obj.get("root").ok_or(StrategyError::MissingField {
            path: path.to_string(),
            field: "root",
        })?;

        let root = parse_node(root, "root", options)?;
        Ok(Strategy::new(name, seat, root))
    }
}

fn parse_node(
    value: &Value,
    path: &str,
    options: StrategyOptions,
) -> Result<DecisionNode, StrategyError> {
    let obj = as_object(value, path)?;

    match str_field(obj, path, "type")? {
        "contract" => {
            let contract = str_field(obj, path, "contract")?
                .parse()
                .map_err(|source| config_error(path, source))?;
            let declarer = str_field(obj, path, "declarer")?
                .parse()
                .map_err(|source| config_error(path, source))?;
            Ok(DecisionNode::leaf(contract, declarer))
        }
        "branch" => {
            let condition = obj.get("condition").ok_or(StrategyError::MissingField {
                path: path.to_string(),
                field: "condition",
            })?;
            let condition = parse_condition(condition, &format!("{path}.condition"), options)?;
            let when_true = child(obj, path, "true_branch", options)?;
            let when_false = child(obj, path, "false_branch", options)?;
            Ok(DecisionNode::branch(condition, when_true, when_false))
        }
        other => Err(StrategyError::UnknownNodeType {
            path: path.to_string(),
            kind: other.to_string(),
        }),
    }
}

fn child(
    obj: &Map<String, Value>,
    path: &str,
    field: &'static str,
    options: StrategyOptions,
) -> Result<DecisionNode, StrategyError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(StrategyError::MissingBranch {
            path: path.to_string(),
            field,
        }),
        Some(value) => parse_node(value, &format!("{path}.{field}"), options),
    }
}

fn parse_condition(
    value: &Value,
    path: &str,
    options: StrategyOptions,
) -> Result<Condition, StrategyError> {
    let obj = as_object(value, path)?;

    match str_field(obj, path, "type")? {
        "suit_length" => {
            let suit = parse_suit(str_field(obj, path, "suit")?)
                .map_err(|source| config_error(path, source))?;
            Ok(Condition::SuitLength {
                suit,
                operator: operator_field(obj, path)?,
                value: u8_field(obj, path, "value")?,
                seat: optional_seat(obj, path)?,
            })
        }
        "hcp" => Ok(Condition::HighCardPoints {
            operator: operator_field(obj, path)?,
            value: u8_field(obj, path, "value")?,
            seat: optional_seat(obj, path)?,
        }),
        other => match options.unknown_conditions {
            UnknownConditionPolicy::Reject => Err(StrategyError::UnknownCondition {
                path: path.to_string(),
                kind: other.to_string(),
            }),
            UnknownConditionPolicy::FailClosed => Ok(Condition::Unrecognized {
                kind: other.to_string(),
            }),
        },
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, StrategyError> {
    value.as_object().ok_or_else(|| StrategyError::NotAnObject {
        path: path.to_string(),
    })
}

fn str_field<'a>(
    obj: &'a Map<String, Value>,
    path: &str,
    field: &'static str,
) -> Result<&'a str, StrategyError> {
    match obj.get(field) {
        None => Err(StrategyError::MissingField {
            path: path.to_string(),
            field,
        }),
        Some(value) => value.as_str().ok_or_else(|| StrategyError::InvalidField {
            path: path.to_string(),
            field,
            found: value.to_string(),
        }),
    }
}

fn u8_field(
    obj: &Map<String, Value>,
    path: &str,
    field: &'static str,
) -> Result<u8, StrategyError> {
    let value = obj.get(field).ok_or(StrategyError::MissingField {
        path: path.to_string(),
        field,
    })?;
    value
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or_else(|| StrategyError::InvalidField {
            path: path.to_string(),
            field,
            found: value.to_string(),
        })
}

fn operator_field(obj: &Map<String, Value>, path: &str) -> Result<Operator, StrategyError> {
    let op = str_field(obj, path, "operator")?;
    op.parse().map_err(|()| StrategyError::InvalidOperator {
        path: path.to_string(),
        op: op.to_string(),
    })
}

fn optional_seat(obj: &Map<String, Value>, path: &str) -> Result<Option<Seat>, StrategyError> {
    match obj.get("seat") {
        None | Some(Value::Null) => Ok(None),
        Some(_) => str_field(obj, path, "seat")?
            .parse()
            .map(Some)
            .map_err(|source| config_error(path, source)),
    }
}

fn parse_suit(s: &str) -> Result<Suit, ConfigError> {
    let mut chars = s.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Suit::from_char(c),
        _ => Err(ConfigError::InvalidSuit(s.to_string())),
    }
}

fn config_error(path: &str, source: ConfigError) -> StrategyError {
    StrategyError::Config {
        path: path.to_string(),
        source,
    }
}
