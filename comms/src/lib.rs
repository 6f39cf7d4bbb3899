//! A small HTTP/1.1 codec over any tokio reader and writer.
//!
//! Only `Content-Length` framed bodies are understood, which is all the
//! service needs from the protocol.

mod error;
pub mod msg;
mod query;
mod receiver;
mod sender;

use tokio::io::{AsyncRead, AsyncWrite};

pub use error::{HttpErr, Result};
pub use msg::{Method, Request, Response, Status, Version};
pub use query::Query;
pub use receiver::HttpReceiver;
pub use sender::HttpSender;

/// Maximum size of the request line plus headers, in bytes.
pub const MAX_HEAD_SIZE: usize = 8 * 1024;

/// Maximum size of a request body, in bytes.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Creates both `HttpReceiver` and `HttpSender` network channel parts.
///
/// Given a reader and a writer creates and returns both ends of the communication.
///
/// # Arguments
/// * `rx` - An async readable.
/// * `tx` - An async writable.
///
/// # Returns
/// A communication stream in the form of a request receiver and a response sender.
pub fn channel<R, W>(rx: R, tx: W) -> (HttpReceiver<R>, HttpSender<W>)
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    (HttpReceiver::new(rx), HttpSender::new(tx))
}
