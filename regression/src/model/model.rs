use crate::sample::Params;

/// A two parameter model of a single real input.
pub trait Model: Sync {
    /// Evaluates the model at `x`.
    ///
    /// # Arguments
    /// * `x` - The input value.
    /// * `params` - The model's parameters.
    ///
    /// # Returns
    /// The prediction for `x`.
    fn predict(&self, x: f64, params: &Params) -> f64;
}
