use log::{debug, trace};
use tokio::task;

use crate::{
    Result,
    loss::LossFn,
    model::Model,
    optimization::{Optimizer, central_difference},
    sample::{NPARAMS, Params},
    storage::SampleStore,
};

/// Fits a two parameter model to the samples of a store with a fixed amount of
/// gradient descent iterations.
///
/// There is no convergence check, no early stopping and no bound on the parameters'
/// magnitude. A diverging configuration returns whatever non finite values it reached.
pub struct Trainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    model: M,
    optimizer: O,
    loss_fn: L,
    max_iterations: u64,
}

impl<M, O, L> Trainer<M, O, L>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
{
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `model` - The model whose parameters will be fitted.
    /// * `optimizer` - Applies each estimated gradient to the parameters.
    /// * `loss_fn` - The loss function to minimize.
    /// * `max_iterations` - The exact amount of iterations every fit runs.
    pub fn new(model: M, optimizer: O, loss_fn: L, max_iterations: u64) -> Self {
        Self {
            model,
            optimizer,
            loss_fn,
            max_iterations,
        }
    }
}

impl<M, O, L> Trainer<M, O, L>
where
    M: Model,
    O: Optimizer + Send,
    L: LossFn,
{
    /// Runs a whole fit starting from `[0, 0]`.
    ///
    /// Every iteration takes one snapshot of the store, estimates the gradient of the
    /// loss over that snapshot and updates the parameters. Iterations are strictly
    /// sequential, the next one always sees the previous update.
    ///
    /// # Arguments
    /// * `store` - Where the samples are read from.
    ///
    /// # Returns
    /// The fitted parameters, or the first error of any iteration, in which case the
    /// partial progress is discarded.
    ///
    /// # Cancellation
    /// The fit yields to the runtime once per iteration, aborting its task stops it
    /// at the next iteration boundary.
    ///
    /// # Panics
    /// If called from a current thread tokio runtime, the numeric work runs
    /// in `block_in_place`.
    pub async fn fit<S>(&mut self, store: &S) -> Result<Params>
    where
        S: SampleStore + ?Sized,
    {
        let mut params = [0.; NPARAMS];

        for iteration in 0..self.max_iterations {
            let samples = store.fetch_all().await?;

            let grad = task::block_in_place(|| {
                central_difference(&params, |p| {
                    self.loss_fn.loss(&self.model, p, &samples)
                })
            })?;

            self.optimizer.update_params(&grad, &mut params);
            trace!("iteration {iteration}: grad {grad:?}, params {params:?}");

            // Cancellation point, the store may never pend.
            task::yield_now().await;
        }

        debug!(
            "fit finished after {} iterations with {params:?}",
            self.max_iterations
        );

        Ok(params)
    }
}
