//! Coordinate transforms for regular axes
//!
//! A regular axis divides its domain into equal-width bins *in
//! transformed space*. The identity transform gives plain equal-width
//! binning; the others give log-, sqrt-, cos- and power-spaced bins
//! while the axis logic stays a single affine computation.

/// Monotone transform applied to coordinates before equal-width binning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// No transform; plain equal-width bins
    Identity,
    /// Natural logarithm; bins equal in log space (positive domains)
    Log,
    /// Square root; bins equal in sqrt space
    Sqrt,
    /// Cosine; bins equal in cos space (monotone decreasing on [0, pi])
    Cos,
    /// Power with a fixed exponent; bins equal in x^p space
    Pow(f64),
}

impl Transform {
    /// Map a coordinate into transformed space. Out-of-domain inputs
    /// (e.g. log of a negative number) produce NaN, which the axis
    /// routes to its overflow sentinel.
    pub fn forward(&self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Log => x.ln(),
            Transform::Sqrt => x.sqrt(),
            Transform::Cos => x.cos(),
            Transform::Pow(p) => x.powf(*p),
        }
    }

    /// Map a transformed value back into coordinate space.
    pub fn inverse(&self, y: f64) -> f64 {
        match self {
            Transform::Identity => y,
            Transform::Log => y.exp(),
            Transform::Sqrt => y * y,
            Transform::Cos => y.acos(),
            Transform::Pow(p) => y.powf(1.0 / p),
        }
    }

    /// Short name used in axis reprs (`regular_log(...)` etc.).
    pub(crate) fn repr_prefix(&self) -> &'static str {
        match self {
            Transform::Identity => "regular",
            Transform::Log => "regular_log",
            Transform::Sqrt => "regular_sqrt",
            Transform::Cos => "regular_cos",
            Transform::Pow(_) => "regular_pow",
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::Identity
    }
}
