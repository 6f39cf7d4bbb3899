use super::LossFn;
use crate::{
    RegressionErr, Result,
    model::Model,
    sample::{Params, Sample},
};

/// Halved mean squared error, `(1 / 2N) * sum((f(x) - y)^2)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Mse;

impl Mse {
    /// Returns a new `Mse`.
    pub fn new() -> Self {
        Self
    }
}

impl LossFn for Mse {
    fn loss<M: Model + ?Sized>(
        &self,
        model: &M,
        params: &Params,
        samples: &[Sample],
    ) -> Result<f64> {
        if samples.is_empty() {
            return Err(RegressionErr::EmptyDataset);
        }

        let sum: f64 = samples
            .iter()
            .map(|&Sample { x, y }| (model.predict(x, params) - y).powi(2))
            .sum();

        Ok(sum / (2 * samples.len()) as f64)
    }
}
