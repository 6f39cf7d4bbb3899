mod fit;
mod trainer;

pub use fit::{fit, fit_linear, fit_logistic};
pub use trainer::Trainer;
