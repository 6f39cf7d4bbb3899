//! Fits two parameter models, a line or a logistic curve, to a set of labeled samples
//! with gradient descent over central finite difference gradients.

pub mod error;
pub mod loss;
pub mod model;
pub mod optimization;
pub mod sample;
pub mod seeding;
pub mod storage;
pub mod training;

pub use error::{RegressionErr, Result};
pub use model::ModelKind;
pub use sample::{NPARAMS, Params, Sample};
pub use seeding::seed_samples;
pub use storage::{FileStore, MemoryStore, SampleStore, StoreErr};
pub use training::{fit, fit_linear, fit_logistic};
