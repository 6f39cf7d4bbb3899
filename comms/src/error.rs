use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

use crate::Status;

/// The result type of the receiving end.
pub type Result<T> = std::result::Result<T, HttpErr>;

/// Failures while reading a request off the wire.
#[derive(Debug)]
pub enum HttpErr {
    Io(io::Error),
    /// The bytes received don't form a valid request.
    Malformed(String),
    /// The request line and headers exceed `MAX_HEAD_SIZE`.
    HeadTooLarge,
    /// The body is framed with something other than `Content-Length`.
    LengthRequired,
    /// The announced body exceeds `MAX_BODY_SIZE`.
    PayloadTooLarge(usize),
}

impl HttpErr {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed(reason.into())
    }

    /// The status to answer with before closing the connection.
    ///
    /// # Returns
    /// `None` for transport failures, where the peer can't be answered anymore.
    pub fn status(&self) -> Option<Status> {
        match self {
            HttpErr::Io(_) => None,
            HttpErr::Malformed(_) => Some(Status::BAD_REQUEST),
            HttpErr::HeadTooLarge => Some(Status::REQUEST_HEADER_FIELDS_TOO_LARGE),
            HttpErr::LengthRequired => Some(Status::LENGTH_REQUIRED),
            HttpErr::PayloadTooLarge(_) => Some(Status::PAYLOAD_TOO_LARGE),
        }
    }
}

impl Display for HttpErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpErr::Io(e) => write!(f, "io error: {e}"),
            HttpErr::Malformed(reason) => write!(f, "malformed request: {reason}"),
            HttpErr::HeadTooLarge => write!(f, "request head exceeds {} bytes", crate::MAX_HEAD_SIZE),
            HttpErr::LengthRequired => f.write_str("only content-length framed bodies are accepted"),
            HttpErr::PayloadTooLarge(len) => write!(
                f,
                "request body of {len} bytes exceeds {} bytes",
                crate::MAX_BODY_SIZE
            ),
        }
    }
}

impl Error for HttpErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HttpErr::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for HttpErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Boundary conversion for I/O APIs.
impl From<HttpErr> for io::Error {
    fn from(value: HttpErr) -> Self {
        match value {
            HttpErr::Io(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
