//! Axis over an unordered set of distinct values

use std::fmt;

use crate::axis::Axis;
use crate::error::{Error, Result};

/// Value types that can label category bins.
///
/// Sealed in spirit: the dynamic axis variant supports the two
/// instantiations the engine ships, `i64` and `String`.
pub trait CategoryValue: Clone + PartialEq + fmt::Debug {
    /// Textual form used in axis reprs; strings are quoted.
    fn repr(&self) -> String;
}

impl CategoryValue for i64 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl CategoryValue for String {
    fn repr(&self) -> String {
        format!("'{self}'")
    }
}

/// Axis over a fixed set of distinct values with no natural order.
///
/// One bin per value, no under/overflow; an unknown value maps to the
/// `size` sentinel and the sample is dropped. Lookup is a linear scan,
/// which beats hashing for the handful of categories this axis is
/// meant for.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryAxis<T: CategoryValue> {
    values: Vec<T>,
    label: String,
}

impl<T: CategoryValue> CategoryAxis<T> {
    /// Create an axis from distinct category values.
    pub fn new(values: impl Into<Vec<T>>) -> Result<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(Error::InvalidAxis(
                "category axis requires at least one value".to_string(),
            ));
        }
        for (i, v) in values.iter().enumerate() {
            if values[..i].contains(v) {
                return Err(Error::InvalidAxis(format!(
                    "category axis values must be unique, {v:?} repeats"
                )));
            }
        }
        Ok(Self {
            values,
            label: String::new(),
        })
    }

    /// Set the label, builder style.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The category values, in bin order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The value of bin `bin`.
    pub fn value(&self, bin: usize) -> Option<&T> {
        self.values.get(bin)
    }
}

impl<T: CategoryValue> Axis for CategoryAxis<T> {
    type Coordinate = T;

    fn index(&self, coordinate: &T) -> i32 {
        self.values
            .iter()
            .position(|v| v == coordinate)
            .unwrap_or(self.values.len()) as i32
    }

    fn size(&self) -> usize {
        self.values.len()
    }

    fn shape(&self) -> usize {
        self.values.len()
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    fn lower(&self, _bin: i32) -> Result<f64> {
        Err(Error::NoIntervalEdges(format!(
            "category axis '{}' has no numeric bin edges",
            self.label
        )))
    }

    fn upper(&self, _bin: i32) -> Result<f64> {
        self.lower(_bin)
    }
}

impl<T: CategoryValue> fmt::Display for CategoryAxis<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "category(")?;
        for (i, v) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", v.repr())?;
        }
        if !self.label.is_empty() {
            write!(f, ", label='{}'", self.label)?;
        }
        write!(f, ")")
    }
}

impl CategoryAxis<String> {
    /// Borrowing lookup so callers with a `&str` avoid an allocation.
    pub fn index_of(&self, value: &str) -> i32 {
        self.values
            .iter()
            .position(|v| v.as_str() == value)
            .unwrap_or(self.values.len()) as i32
    }
}

/// Convenience constructor for a string-category axis.
pub fn str_categories<I, S>(values: I) -> Result<CategoryAxis<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    CategoryAxis::new(values.into_iter().map(Into::into).collect::<Vec<_>>())
}
