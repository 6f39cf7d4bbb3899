use std::{fmt, str::FromStr};

use super::{Affine, Logistic, Model};
use crate::sample::Params;

/// Runtime selector between the supported model families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    Affine,
    Logistic,
}

impl ModelKind {
    /// The route segment that names this family.
    pub fn name(&self) -> &'static str {
        match self {
            ModelKind::Affine => "linear",
            ModelKind::Logistic => "nonlinear",
        }
    }
}

impl Model for ModelKind {
    fn predict(&self, x: f64, params: &Params) -> f64 {
        match self {
            ModelKind::Affine => Affine.predict(x, params),
            ModelKind::Logistic => Logistic.predict(x, params),
        }
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(ModelKind::Affine),
            "nonlinear" => Ok(ModelKind::Logistic),
            other => Err(format!("unknown model family {other}")),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
