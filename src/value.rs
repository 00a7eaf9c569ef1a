//! Dynamic coordinate values for heterogeneous axis containers
//!
//! A histogram built from a runtime sequence of axes cannot know the
//! coordinate types of its axes at compile time, so fills go through a
//! small tagged value. Numeric variants are free to construct; only
//! string-category coordinates allocate.

use std::fmt;

/// A single coordinate handed to a dynamically typed histogram
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// A real-valued coordinate (interval and circular axes)
    Float(f64),
    /// An integral coordinate (integer and integer-category axes)
    Int(i64),
    /// A string coordinate (string-category axes)
    Str(String),
}

impl Value {
    /// The value as a float, if it carries a numeric payload.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(i) => Some(*i as f64),
            Value::Str(_) => None,
        }
    }

    /// The value as an integer. Floats are floored when finite;
    /// fractional floats still floor (integer axes bin by truncation
    /// toward negative infinity).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(x) if x.is_finite() => Some(x.floor() as i64),
            _ => None,
        }
    }

    /// The value as an exact integer: floats qualify only when they
    /// carry no fractional part.
    pub fn as_exact_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => Some(*x as i64),
            _ => None,
        }
    }

    /// The value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(x) => write!(f, "{x}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "'{s}'"),
        }
    }
}
