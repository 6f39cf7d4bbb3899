use crate::sample::Params;

/// Defines the strategy for updating model parameters based on calculated gradients.
pub trait Optimizer {
    /// Updates the provided parameters using the given gradient.
    ///
    /// # Arguments
    /// * `grad` - The gradient of the loss at `params`.
    /// * `params` - The parameters to update.
    fn update_params(&mut self, grad: &Params, params: &mut Params);
}
