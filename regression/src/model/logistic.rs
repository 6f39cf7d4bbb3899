use super::Model;
use crate::sample::Params;

/// The logistic curve `f(x) = 1 / (1 + e^-(a * x + b))`, parameters are `[a, b]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logistic;

impl Model for Logistic {
    fn predict(&self, x: f64, &[a, b]: &Params) -> f64 {
        sigmoid(a * x + b)
    }
}

/// Numerically stable logistic function.
///
/// Only ever exponentiates a non positive value, so any finite `z` maps into `[0, 1]`
/// instead of overflowing. `NaN` in gives `NaN` out.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0. {
        1. / (1. + (-z).exp())
    } else {
        let e = z.exp();
        e / (1. + e)
    }
}
