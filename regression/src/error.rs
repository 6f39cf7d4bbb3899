use std::{
    error::Error,
    fmt::{self, Display},
};

use crate::storage::StoreErr;

/// The result type used in the entire regression module.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// The regression module's error type.
#[derive(Debug)]
pub enum RegressionErr {
    /// The loss was evaluated against a sample set with no samples.
    EmptyDataset,
    /// The sample store failed while reading or writing.
    Store(StoreErr),
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::EmptyDataset => {
                f.write_str("Can't evaluate the loss, the sample set is empty")
            }
            RegressionErr::Store(e) => write!(f, "sample store error: {e}"),
        }
    }
}

impl Error for RegressionErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RegressionErr::Store(e) => Some(e),
            RegressionErr::EmptyDataset => None,
        }
    }
}

impl From<StoreErr> for RegressionErr {
    fn from(value: StoreErr) -> Self {
        Self::Store(value)
    }
}
