use std::{env, path::PathBuf};

use crate::error::ConfigErr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

/// How verbose the service is by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Dev,
    Prod,
}

impl Mode {
    /// The `env_logger` filter used when `RUST_LOG` isn't set.
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Mode::Dev => "debug",
            Mode::Prod => "info",
        }
    }
}

/// Immutable settings of a service instance, read once at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    host: String,
    port: u16,
    api_key: String,
    samples_path: Option<PathBuf>,
    mode: Mode,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    ///
    /// * `HOST`, `PORT` - Where to listen, default to `127.0.0.1:3000`.
    /// * `API_KEY` - The secret required to seed samples, mandatory.
    /// * `SAMPLES_PATH` - Persist samples in this file instead of in memory.
    /// * `MODE` - `dev` enables debug logging.
    pub fn from_env() -> Result<Self, ConfigErr> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigErr>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let host = set("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match set("PORT") {
            Some(value) => value.trim().parse().map_err(|_| ConfigErr::Invalid {
                var: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let api_key = set("API_KEY").ok_or(ConfigErr::Missing("API_KEY"))?;
        let samples_path = set("SAMPLES_PATH").map(PathBuf::from);

        let mode = match set("MODE").as_deref() {
            Some("dev") => Mode::Dev,
            _ => Mode::Prod,
        };

        Ok(Self {
            host,
            port,
            api_key,
            samples_path,
            mode,
        })
    }

    /// Returns the `host:port` address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn samples_path(&self) -> Option<&PathBuf> {
        self.samples_path.as_ref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }
}
