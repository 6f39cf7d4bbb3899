use std::{error::Error, fmt};

use comms::{Response, Status};
use log::error;
use regression::RegressionErr;
use serde::Serialize;

/// The api module's result type.
pub type Result<T> = std::result::Result<T, ApiErr>;

/// Every way a request can be rejected.
#[derive(Debug)]
pub enum ApiErr {
    /// A parameter, header or body is missing or unparsable.
    BadRequest(String),
    /// The seeding key doesn't match the configured one.
    InvalidCredential,
    NotFound(String),
    MethodNotAllowed { method: String, path: String },
    Regression(RegressionErr),
    /// The answer couldn't be encoded.
    Encoding(serde_json::Error),
}

impl ApiErr {
    pub fn bad_request(reason: impl Into<String>) -> Self {
        Self::BadRequest(reason.into())
    }

    /// The status this error is answered with.
    pub fn status(&self) -> Status {
        match self {
            ApiErr::BadRequest(_) | ApiErr::InvalidCredential => Status::BAD_REQUEST,
            ApiErr::NotFound(_) => Status::NOT_FOUND,
            ApiErr::MethodNotAllowed { .. } => Status::METHOD_NOT_ALLOWED,
            ApiErr::Regression(RegressionErr::EmptyDataset) => Status::BAD_REQUEST,
            ApiErr::Regression(RegressionErr::Store(_)) | ApiErr::Encoding(_) => {
                Status::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts this error into the JSON response sent to the client.
    pub fn into_response(self) -> Response {
        let status = self.status();

        if status == Status::INTERNAL_SERVER_ERROR {
            error!("{self}");
        }

        error_response(status, &self.to_string())
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    message: &'a str,
    description: &'a str,
}

/// Builds an error response for `status`.
///
/// # Arguments
/// * `status` - The status to answer with.
/// * `description` - A human readable explanation of the failure.
pub fn error_response(status: Status, description: &str) -> Response {
    let body = ErrorBody {
        status_code: status.code(),
        message: status.reason(),
        description,
    };

    // Every field is a plain string or integer.
    match Response::json(status, &body) {
        Ok(res) => res,
        Err(_) => Response::new(status),
    }
}

impl fmt::Display for ApiErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErr::BadRequest(reason) => f.write_str(reason),
            ApiErr::InvalidCredential => f.write_str("the api key is invalid"),
            ApiErr::NotFound(path) => write!(f, "no route for {path}"),
            ApiErr::MethodNotAllowed { method, path } => {
                write!(f, "{method} is not allowed on {path}")
            }
            ApiErr::Regression(e) => write!(f, "{e}"),
            ApiErr::Encoding(e) => write!(f, "couldn't encode the response: {e}"),
        }
    }
}

impl Error for ApiErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiErr::Regression(e) => Some(e),
            ApiErr::Encoding(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegressionErr> for ApiErr {
    fn from(value: RegressionErr) -> Self {
        Self::Regression(value)
    }
}

impl From<serde_json::Error> for ApiErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Encoding(value)
    }
}

/// Failures while reading the configuration.
#[derive(Debug)]
pub enum ConfigErr {
    Missing(&'static str),
    Invalid { var: &'static str, value: String },
}

impl fmt::Display for ConfigErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigErr::Missing(var) => write!(f, "the {var} environment variable must be set"),
            ConfigErr::Invalid { var, value } => write!(f, "invalid value {value:?} for {var}"),
        }
    }
}

impl Error for ConfigErr {}
