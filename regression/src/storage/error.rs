use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The specific result type for the sample stores.
pub type Result<T> = std::result::Result<T, StoreErr>;

/// Error returned by a `SampleStore` whenever the underlying medium fails.
#[derive(Debug)]
pub enum StoreErr {
    Io(io::Error),
    /// A persisted record couldn't be decoded, `line` is 1-based.
    Corrupt {
        line: usize,
        source: serde_json::Error,
    },
}

impl Display for StoreErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreErr::Io(e) => write!(f, "io error: {e}"),
            StoreErr::Corrupt { line, source } => {
                write!(f, "corrupt sample record at line {line}: {source}")
            }
        }
    }
}

impl Error for StoreErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            StoreErr::Io(e) => Some(e),
            StoreErr::Corrupt { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for StoreErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
