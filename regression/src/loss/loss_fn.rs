use crate::{
    Result,
    model::Model,
    sample::{Params, Sample},
};

/// Measures how far a model's predictions are from the labels of a sample set.
pub trait LossFn: Sync {
    /// Evaluates the loss of `model` with `params` over `samples`.
    ///
    /// # Arguments
    /// * `model` - The model that produces the predictions.
    /// * `params` - The model's parameters.
    /// * `samples` - A snapshot of the sample set.
    ///
    /// # Returns
    /// The loss or `RegressionErr::EmptyDataset` if there are no samples.
    fn loss<M: Model + ?Sized>(&self, model: &M, params: &Params, samples: &[Sample])
    -> Result<f64>;
}
