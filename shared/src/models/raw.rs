//! Lenient scalar input
//!
//! Browser form posts send every field as a string while JSON clients send
//! numbers. [`RawScalar`] accepts both and defers parsing to the workflow so
//! the rejected value can be reported back verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawScalar {
    /// Parse as a strictly positive integer
    pub fn positive_int(&self) -> Option<i64> {
        let value = match self {
            Self::Int(v) => *v,
            Self::Float(v) if v.fract() == 0.0 && v.is_finite() => *v as i64,
            Self::Float(_) => return None,
            Self::Text(s) => s.trim().parse::<i64>().ok()?,
        };
        (value > 0).then_some(value)
    }

    /// Parse as a finite, non-negative number
    pub fn non_negative_number(&self) -> Option<f64> {
        let value = match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        (value.is_finite() && value >= 0.0).then_some(value)
    }
}

impl fmt::Display for RawScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RawScalar {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for RawScalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for RawScalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
