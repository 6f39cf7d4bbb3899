use std::{str::FromStr, sync::Arc};

use comms::{Method, Request, Response, Status};
use log::warn;
use regression::{ModelKind, SampleStore};
use serde::{Deserialize, Serialize};

use crate::error::{ApiErr, Result};

const FIT_PREFIX: &str = "/regression/";
const SEED_PATH: &str = "/regression";

/// Body of the seeding request.
#[derive(Debug, Deserialize)]
struct SeedRequest {
    volume: u64,
}

#[derive(Debug, Serialize)]
struct Ack {
    status: &'static str,
}

/// The request handlers and the state they share.
pub struct App {
    store: Arc<dyn SampleStore>,
    api_key: String,
}

impl App {
    /// Creates a new `App`.
    ///
    /// # Arguments
    /// * `store` - The samples every fit reads and every seeding writes.
    /// * `api_key` - The secret required to seed samples.
    pub fn new(store: Arc<dyn SampleStore>, api_key: impl Into<String>) -> Self {
        Self {
            store,
            api_key: api_key.into(),
        }
    }

    /// Answers a single request, failures are turned into error responses.
    pub async fn handle(&self, req: &Request) -> Response {
        match self.route(req).await {
            Ok(res) => res,
            Err(e) => {
                warn!("rejected {} {}: {e}", req.method, req.path);
                e.into_response()
            }
        }
    }

    async fn route(&self, req: &Request) -> Result<Response> {
        let path = match req.path.trim_end_matches('/') {
            "" => "/",
            path => path,
        };

        if path == SEED_PATH {
            return match req.method {
                Method::Post => self.seed(req).await,
                _ => Err(Self::method_not_allowed(req, path)),
            };
        }

        let kind = path
            .strip_prefix(FIT_PREFIX)
            .and_then(|name| ModelKind::from_str(name).ok())
            .ok_or_else(|| ApiErr::NotFound(path.to_string()))?;

        match req.method {
            Method::Get => self.fit(kind, req).await,
            _ => Err(Self::method_not_allowed(req, path)),
        }
    }

    /// `GET /regression/{linear,nonlinear}?learningRate=..&maxIterations=..`
    async fn fit(&self, kind: ModelKind, req: &Request) -> Result<Response> {
        let learning_rate: f64 = query_param(req, "learningRate")?;
        if !learning_rate.is_finite() {
            return Err(ApiErr::bad_request("learningRate must be a finite number"));
        }

        let max_iterations: u64 = query_param(req, "maxIterations")?;

        let params =
            regression::fit(self.store.as_ref(), kind, learning_rate, max_iterations).await?;

        Ok(Response::json(Status::OK, &params)?)
    }

    /// `POST /regression` with an `apikey` header and a `{"volume": n}` body.
    async fn seed(&self, req: &Request) -> Result<Response> {
        match req.header("apikey") {
            Some(key) if same_key(key.as_bytes(), self.api_key.as_bytes()) => {}
            _ => return Err(ApiErr::InvalidCredential),
        }

        let SeedRequest { volume } = req
            .json::<SeedRequest>()
            .map_err(|e| ApiErr::bad_request(format!("invalid seeding body: {e}")))?;

        regression::seed_samples(self.store.as_ref(), volume).await?;

        Ok(Response::json(Status::OK, &Ack { status: "ok" })?)
    }

    fn method_not_allowed(req: &Request, path: &str) -> ApiErr {
        ApiErr::MethodNotAllowed {
            method: req.method.to_string(),
            path: path.to_string(),
        }
    }
}

/// Compares two keys in a time that only depends on their length.
fn same_key(given: &[u8], expected: &[u8]) -> bool {
    if given.len() != expected.len() {
        return false;
    }

    given
        .iter()
        .zip(expected)
        .fold(0, |diff, (a, b)| diff | (a ^ b))
        == 0
}

/// Reads and parses a mandatory query parameter.
fn query_param<T: FromStr>(req: &Request, name: &str) -> Result<T> {
    let raw = req
        .query
        .get(name)
        .ok_or_else(|| ApiErr::bad_request(format!("{name} is required")))?;

    raw.trim()
        .parse()
        .map_err(|_| ApiErr::bad_request(format!("invalid {name} {raw:?}")))
}
