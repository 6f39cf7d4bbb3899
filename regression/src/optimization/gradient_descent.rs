use super::Optimizer;
use crate::sample::Params;

/// Plain gradient descent, `p -= learning_rate * g`.
///
/// The learning rate isn't validated, a rate that is too big makes the parameters
/// diverge towards infinity or `NaN` and that is returned as is.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f64,
}

impl GradientDescent {
    /// Creates a new `GradientDescent` optimizer.
    ///
    /// # Arguments
    /// * `learning_rate` - The small coefficient that modulates the amount of training per update.
    ///
    /// # Returns
    /// A new `GradientDescent` instance.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    fn update_params(&mut self, grad: &Params, params: &mut Params) {
        let lr = self.learning_rate;

        for (p, g) in params.iter_mut().zip(grad) {
            *p -= lr * g;
        }
    }
}
