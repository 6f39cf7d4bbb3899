pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use config::{Mode, ServerConfig};
pub use error::{ApiErr, ConfigErr};
pub use routes::App;
pub use server::{Server, serve_connection};
