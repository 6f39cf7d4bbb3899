use rayon::prelude::*;

use crate::{
    Result,
    sample::{NPARAMS, Params},
};

/// The perturbation applied to each parameter.
pub const EPSILON: f64 = 1e-6;

/// Estimates the gradient of `loss` at `params` with central differences.
///
/// For every parameter `i` the loss is evaluated at `params` shifted by `+EPSILON` and
/// `-EPSILON` on that component only, `g[i] = (loss(p+) - loss(p-)) / (2 * EPSILON)`.
/// Every evaluation receives its own copy of the parameters, the four of them are
/// independent and run on the rayon pool.
///
/// # Arguments
/// * `params` - The point where the gradient is estimated.
/// * `loss` - The loss function to differentiate.
///
/// # Returns
/// The estimated gradient, or the first error returned by `loss`.
pub fn central_difference<F>(params: &Params, loss: F) -> Result<Params>
where
    F: Fn(&Params) -> Result<f64> + Sync,
{
    let partials = (0..NPARAMS)
        .into_par_iter()
        .map(|i| {
            let mut plus = *params;
            plus[i] += EPSILON;

            let mut minus = *params;
            minus[i] -= EPSILON;

            let (loss_plus, loss_minus) = rayon::join(|| loss(&plus), || loss(&minus));
            Ok((loss_plus? - loss_minus?) / (2. * EPSILON))
        })
        .collect::<Result<Vec<f64>>>()?;

    let mut grad = [0.; NPARAMS];
    grad.copy_from_slice(&partials);
    Ok(grad)
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;

    use super::*;
    use crate::{
        RegressionErr,
        loss::{LossFn, Mse},
        model::{Affine, Logistic, sigmoid},
        sample::Sample,
    };

    const TOLERANCE: f64 = 1e-4;

    #[test]
    fn affine_gradient_at_minimum() {
        let samples = [Sample::new(1., 0.)];
        let loss = |p: &Params| Mse.loss(&Affine, p, &samples);

        let grad = central_difference(&[0., 0.], loss).unwrap();

        // d/dm 1/2 (m * x + b - y)^2 = x * (m * x + b - y) = 0
        assert!(grad[0].abs() < TOLERANCE, "{grad:?}");
        assert!(grad[1].abs() < TOLERANCE, "{grad:?}");
    }

    #[test]
    fn affine_gradient_matches_analytic() {
        let samples = [Sample::new(2., 1.)];
        let loss = |p: &Params| Mse.loss(&Affine, p, &samples);

        let grad = central_difference(&[1., 0.5], loss).unwrap();

        // residual = 1 * 2 + 0.5 - 1 = 1.5
        assert!((grad[0] - 3.).abs() < TOLERANCE, "{grad:?}");
        assert!((grad[1] - 1.5).abs() < TOLERANCE, "{grad:?}");
    }

    #[test]
    fn logistic_gradient_matches_analytic() {
        let samples = [
            Sample::new(0., 0.),
            Sample::new(1., 1.),
            Sample::new(3., 1.),
            Sample::new(-2., 0.),
        ];
        let params = [0.4, -0.2];
        let loss = |p: &Params| Mse.loss(&Logistic, p, &samples);

        let grad = central_difference(&params, loss).unwrap();

        let n = samples.len() as f64;
        let mut expected = [0.; NPARAMS];
        for &Sample { x, y } in &samples {
            let s = sigmoid(params[0] * x + params[1]);
            let common = (s - y) * s * (1. - s) / n;
            expected[0] += common * x;
            expected[1] += common;
        }

        for i in 0..NPARAMS {
            assert!((grad[i] - expected[i]).abs() < TOLERANCE, "{grad:?} vs {expected:?}");
        }
    }

    #[test]
    fn perturbations_are_independent_copies() {
        let seen = Mutex::new(Vec::new());
        let loss = |p: &Params| {
            seen.lock().push(*p);
            Ok(0.)
        };

        let grad = central_difference(&[1., 2.], loss).unwrap();
        assert_eq!(grad, [0., 0.]);

        let mut seen = seen.into_inner();
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap());

        assert_eq!(
            seen,
            [
                [1. - EPSILON, 2.],
                [1., 2. - EPSILON],
                [1., 2. + EPSILON],
                [1. + EPSILON, 2.],
            ]
        );
    }

    #[test]
    fn propagates_empty_dataset() {
        let loss = |p: &Params| Mse.loss(&Affine, p, &[]);
        let err = central_difference(&[0., 0.], loss).unwrap_err();
        assert!(matches!(err, RegressionErr::EmptyDataset));
    }
}
