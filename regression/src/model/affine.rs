use super::Model;
use crate::sample::Params;

/// The line `f(x) = m * x + b`, parameters are `[m, b]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Affine;

impl Model for Affine {
    fn predict(&self, x: f64, &[m, b]: &Params) -> f64 {
        m * x + b
    }
}
