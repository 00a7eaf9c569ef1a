//! Tagged axis variant for runtime-heterogeneous histograms

use std::fmt;

use crate::axis::{Axis, CategoryAxis, CircularAxis, IntegerAxis, RegularAxis, VariableAxis};
use crate::error::Result;
use crate::value::Value;

/// Any axis variant, for histograms whose axes are chosen at runtime.
///
/// Coordinates arrive as [`Value`]s; each variant converts to its own
/// coordinate type. A coordinate of the wrong kind (e.g. a string fed
/// to a numeric axis) behaves like an out-of-domain value and maps to
/// the overflow sentinel, so axes without one drop the sample.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyAxis {
    /// Equal-width bins, possibly in transformed space
    Regular(RegularAxis),
    /// Wrapping bins for cyclic values
    Circular(CircularAxis),
    /// Arbitrary monotone bin edges
    Variable(VariableAxis),
    /// Unit-width integer bins
    Integer(IntegerAxis),
    /// Unordered integer categories
    IntCategory(CategoryAxis<i64>),
    /// Unordered string categories
    StrCategory(CategoryAxis<String>),
}

impl Axis for AnyAxis {
    type Coordinate = Value;

    fn index(&self, coordinate: &Value) -> i32 {
        match self {
            AnyAxis::Regular(a) => match coordinate.as_float() {
                Some(x) => a.index(&x),
                None => a.size() as i32,
            },
            AnyAxis::Circular(a) => match coordinate.as_float() {
                Some(x) => a.index(&x),
                None => a.size() as i32,
            },
            AnyAxis::Variable(a) => match coordinate.as_float() {
                Some(x) => a.index(&x),
                None => a.size() as i32,
            },
            AnyAxis::Integer(a) => match coordinate.as_int() {
                Some(i) => a.index(&i),
                None => a.size() as i32,
            },
            AnyAxis::IntCategory(a) => match coordinate.as_exact_int() {
                Some(i) => a.index(&i),
                None => a.size() as i32,
            },
            AnyAxis::StrCategory(a) => match coordinate.as_str() {
                Some(s) => a.index_of(s),
                None => a.size() as i32,
            },
        }
    }

    fn size(&self) -> usize {
        match self {
            AnyAxis::Regular(a) => a.size(),
            AnyAxis::Circular(a) => a.size(),
            AnyAxis::Variable(a) => a.size(),
            AnyAxis::Integer(a) => a.size(),
            AnyAxis::IntCategory(a) => a.size(),
            AnyAxis::StrCategory(a) => a.size(),
        }
    }

    fn shape(&self) -> usize {
        match self {
            AnyAxis::Regular(a) => a.shape(),
            AnyAxis::Circular(a) => a.shape(),
            AnyAxis::Variable(a) => a.shape(),
            AnyAxis::Integer(a) => a.shape(),
            AnyAxis::IntCategory(a) => a.shape(),
            AnyAxis::StrCategory(a) => a.shape(),
        }
    }

    fn label(&self) -> &str {
        match self {
            AnyAxis::Regular(a) => a.label(),
            AnyAxis::Circular(a) => a.label(),
            AnyAxis::Variable(a) => a.label(),
            AnyAxis::Integer(a) => a.label(),
            AnyAxis::IntCategory(a) => a.label(),
            AnyAxis::StrCategory(a) => a.label(),
        }
    }

    fn set_label(&mut self, label: impl Into<String>) {
        let label = label.into();
        match self {
            AnyAxis::Regular(a) => a.set_label(label),
            AnyAxis::Circular(a) => a.set_label(label),
            AnyAxis::Variable(a) => a.set_label(label),
            AnyAxis::Integer(a) => a.set_label(label),
            AnyAxis::IntCategory(a) => a.set_label(label),
            AnyAxis::StrCategory(a) => a.set_label(label),
        }
    }

    fn lower(&self, bin: i32) -> Result<f64> {
        match self {
            AnyAxis::Regular(a) => a.lower(bin),
            AnyAxis::Circular(a) => a.lower(bin),
            AnyAxis::Variable(a) => a.lower(bin),
            AnyAxis::Integer(a) => a.lower(bin),
            AnyAxis::IntCategory(a) => a.lower(bin),
            AnyAxis::StrCategory(a) => a.lower(bin),
        }
    }

    fn upper(&self, bin: i32) -> Result<f64> {
        match self {
            AnyAxis::Regular(a) => a.upper(bin),
            AnyAxis::Circular(a) => a.upper(bin),
            AnyAxis::Variable(a) => a.upper(bin),
            AnyAxis::Integer(a) => a.upper(bin),
            AnyAxis::IntCategory(a) => a.upper(bin),
            AnyAxis::StrCategory(a) => a.upper(bin),
        }
    }
}

impl AnyAxis {
    /// The concrete regular axis, if this is one.
    pub fn as_regular(&self) -> Option<&RegularAxis> {
        match self {
            AnyAxis::Regular(a) => Some(a),
            _ => None,
        }
    }

    /// The concrete circular axis, if this is one.
    pub fn as_circular(&self) -> Option<&CircularAxis> {
        match self {
            AnyAxis::Circular(a) => Some(a),
            _ => None,
        }
    }

    /// The concrete variable axis, if this is one.
    pub fn as_variable(&self) -> Option<&VariableAxis> {
        match self {
            AnyAxis::Variable(a) => Some(a),
            _ => None,
        }
    }

    /// The concrete integer axis, if this is one.
    pub fn as_integer(&self) -> Option<&IntegerAxis> {
        match self {
            AnyAxis::Integer(a) => Some(a),
            _ => None,
        }
    }

    /// The concrete integer-category axis, if this is one.
    pub fn as_int_category(&self) -> Option<&CategoryAxis<i64>> {
        match self {
            AnyAxis::IntCategory(a) => Some(a),
            _ => None,
        }
    }

    /// The concrete string-category axis, if this is one.
    pub fn as_str_category(&self) -> Option<&CategoryAxis<String>> {
        match self {
            AnyAxis::StrCategory(a) => Some(a),
            _ => None,
        }
    }
}

impl From<RegularAxis> for AnyAxis {
    fn from(a: RegularAxis) -> Self {
        AnyAxis::Regular(a)
    }
}

impl From<CircularAxis> for AnyAxis {
    fn from(a: CircularAxis) -> Self {
        AnyAxis::Circular(a)
    }
}

impl From<VariableAxis> for AnyAxis {
    fn from(a: VariableAxis) -> Self {
        AnyAxis::Variable(a)
    }
}

impl From<IntegerAxis> for AnyAxis {
    fn from(a: IntegerAxis) -> Self {
        AnyAxis::Integer(a)
    }
}

impl From<CategoryAxis<i64>> for AnyAxis {
    fn from(a: CategoryAxis<i64>) -> Self {
        AnyAxis::IntCategory(a)
    }
}

impl From<CategoryAxis<String>> for AnyAxis {
    fn from(a: CategoryAxis<String>) -> Self {
        AnyAxis::StrCategory(a)
    }
}

impl fmt::Display for AnyAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyAxis::Regular(a) => a.fmt(f),
            AnyAxis::Circular(a) => a.fmt(f),
            AnyAxis::Variable(a) => a.fmt(f),
            AnyAxis::Integer(a) => a.fmt(f),
            AnyAxis::IntCategory(a) => a.fmt(f),
            AnyAxis::StrCategory(a) => a.fmt(f),
        }
    }
}
