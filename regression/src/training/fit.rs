use log::debug;

use super::Trainer;
use crate::{
    Result,
    loss::Mse,
    model::ModelKind,
    optimization::GradientDescent,
    sample::Params,
    storage::SampleStore,
};

/// Fits a model of the given family to every sample in `store`.
///
/// # Arguments
/// * `store` - Where the samples are read from.
/// * `kind` - The model family to fit.
/// * `learning_rate` - The gradient descent step size, it isn't validated.
/// * `max_iterations` - The exact amount of iterations to run.
///
/// # Returns
/// The fitted parameters or the error that aborted the fit.
pub async fn fit<S>(
    store: &S,
    kind: ModelKind,
    learning_rate: f64,
    max_iterations: u64,
) -> Result<Params>
where
    S: SampleStore + ?Sized,
{
    debug!("fitting {kind} model, learning rate {learning_rate}, {max_iterations} iterations");

    let optimizer = GradientDescent::new(learning_rate);
    let mut trainer = Trainer::new(kind, optimizer, Mse::new(), max_iterations);
    trainer.fit(store).await
}

/// Fits the line `m * x + b`, returns `[m, b]`.
pub async fn fit_linear<S>(store: &S, learning_rate: f64, max_iterations: u64) -> Result<Params>
where
    S: SampleStore + ?Sized,
{
    fit(store, ModelKind::Affine, learning_rate, max_iterations).await
}

/// Fits the logistic curve `1 / (1 + e^-(a * x + b))`, returns `[a, b]`.
pub async fn fit_logistic<S>(store: &S, learning_rate: f64, max_iterations: u64) -> Result<Params>
where
    S: SampleStore + ?Sized,
{
    fit(store, ModelKind::Logistic, learning_rate, max_iterations).await
}
