use std::fmt;

use serde::Serialize;

/// One named result from a trial
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TrialValue {
    Int(i64),
    Float(f64),
    Label(String),
}

impl TrialValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TrialValue::Int(v) => Some(*v as f64),
            TrialValue::Float(v) => Some(*v),
            TrialValue::Label(_) => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, TrialValue::Label(_))
    }
}

impl fmt::Display for TrialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialValue::Int(v) => write!(f, "{v}"),
            TrialValue::Float(v) => write!(f, "{v}"),
            TrialValue::Label(s) => f.write_str(s),
        }
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for TrialValue {
            fn from(v: $t) -> Self {
                TrialValue::Int(i64::from(v))
            }
        })*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for TrialValue {
    fn from(v: bool) -> Self {
        TrialValue::Int(i64::from(v))
    }
}

impl From<f64> for TrialValue {
    fn from(v: f64) -> Self {
        TrialValue::Float(v)
    }
}

impl From<&str> for TrialValue {
    fn from(v: &str) -> Self {
        TrialValue::Label(v.to_string())
    }
}

impl From<String> for TrialValue {
    fn from(v: String) -> Self {
        TrialValue::Label(v)
    }
}

/// Ordered (name, value) results of a single trial
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialRecord {
    values: Vec<(String, TrialValue)>,
}

impl TrialRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<TrialValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<TrialValue>) {
        self.values.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&TrialValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TrialValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl IntoIterator for TrialRecord {
    type Item = (String, TrialValue);
    type IntoIter = std::vec::IntoIter<(String, TrialValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}
