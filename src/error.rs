//! Errors raised while loading tuning data

use std::fmt;

#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed into a `Tuning`
    Parse(serde_json::Error),
    /// A value parsed fine but lies outside its usable range
    OutOfRange {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid tuning json: {err}"),
            Self::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "tuning field `{field}` = {value}, expected {expected}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
