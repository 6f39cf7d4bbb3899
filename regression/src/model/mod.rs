mod affine;
mod kind;
mod logistic;
mod model;

pub use affine::Affine;
pub use kind::ModelKind;
pub use logistic::{Logistic, sigmoid};
pub use model::Model;
