//! Axis with explicit monotone bin edges

use std::fmt;

use crate::axis::{edge_or_infinity, Axis};
use crate::error::{Error, Result};

/// Axis for real values with arbitrary, strictly increasing bin edges.
///
/// A value equal to an interior edge belongs to the bin starting at
/// that edge. Lookup is a binary search over the edge list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableAxis {
    edges: Vec<f64>,
    label: String,
    uoflow: bool,
}

impl VariableAxis {
    /// Create an axis from strictly increasing edges; `len(edges) - 1` bins.
    pub fn new(edges: impl Into<Vec<f64>>) -> Result<Self> {
        let edges = edges.into();
        if edges.len() < 2 {
            return Err(Error::InvalidAxis(format!(
                "variable axis requires at least two edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) {
            return Err(Error::bad_bounds("variable axis edges must be finite"));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::bad_bounds(
                "variable axis edges must be strictly increasing",
            ));
        }
        Ok(Self {
            edges,
            label: String::new(),
            uoflow: true,
        })
    }

    /// Set the label, builder style.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Drop the under/overflow bins; out-of-domain samples are discarded.
    pub fn without_uoflow(mut self) -> Self {
        self.uoflow = false;
        self
    }

    /// The bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }
}

impl Axis for VariableAxis {
    type Coordinate = f64;

    fn index(&self, coordinate: &f64) -> i32 {
        let x = *coordinate;
        if x.is_nan() {
            return self.size() as i32;
        }
        // partition point = number of edges <= x; shift down so the
        // first edge starts bin 0 and anything below it underflows
        self.edges.partition_point(|e| *e <= x) as i32 - 1
    }

    fn size(&self) -> usize {
        self.edges.len() - 1
    }

    fn shape(&self) -> usize {
        if self.uoflow {
            self.size() + 2
        } else {
            self.size()
        }
    }

    fn label(&self) -> &str {
        &self.label
    }

    fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    fn lower(&self, bin: i32) -> Result<f64> {
        Ok(edge_or_infinity(self.size(), bin, |i| self.edges[i as usize]))
    }

    fn upper(&self, bin: i32) -> Result<f64> {
        self.lower(bin + 1)
    }
}

impl fmt::Display for VariableAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "variable(")?;
        for (i, e) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{e}")?;
        }
        if !self.label.is_empty() {
            write!(f, ", label='{}'", self.label)?;
        }
        if !self.uoflow {
            write!(f, ", uoflow=False")?;
        }
        write!(f, ")")
    }
}
