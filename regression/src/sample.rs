use serde::{Deserialize, Serialize};

/// The amount of parameters of every supported model.
pub const NPARAMS: usize = 2;

/// The parameter vector of a two parameter model.
///
/// Affine models read it as `[m, b]`, logistic models as `[a, b]`.
pub type Params = [f64; NPARAMS];

/// A single labeled sample (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    /// Creates a new `Sample`.
    ///
    /// # Arguments
    /// * `x` - The input value.
    /// * `y` - The label.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}
