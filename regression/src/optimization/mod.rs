mod finite_difference;
mod gradient_descent;
mod optimizer;

pub use finite_difference::{EPSILON, central_difference};
pub use gradient_descent::GradientDescent;
pub use optimizer::Optimizer;
