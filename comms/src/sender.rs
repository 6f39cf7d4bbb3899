//! The implementation of the sending end of the protocol.

use std::io::{self, Write};

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::msg::Response;

/// The sending end handle of the communication.
pub struct HttpSender<W>
where
    W: AsyncWrite + Unpin,
{
    tx: W,
    buf: Vec<u8>,
}

impl<W: AsyncWrite + Unpin> HttpSender<W> {
    /// Creates a new `HttpSender` instance.
    ///
    /// # Arguments
    /// * `tx` - The underlying writer.
    pub(super) fn new(tx: W) -> Self {
        Self {
            tx,
            buf: Vec::new(),
        }
    }

    /// Sends `res` through the inner sender.
    ///
    /// # Arguments
    /// * `res` - The response to write, its `Content-Length` is computed here.
    ///
    /// # Returns
    /// A result object that returns `io::Error` on failure.
    pub async fn send(&mut self, res: &Response) -> io::Result<()> {
        let Self { buf, tx } = self;

        buf.clear();
        write!(buf, "HTTP/1.1 {}\r\n", res.status)?;

        for (name, value) in &res.headers {
            write!(buf, "{name}: {value}\r\n")?;
        }

        write!(buf, "content-length: {}\r\n\r\n", res.body.len())?;

        tx.write_all(buf).await?;

        if !res.body.is_empty() {
            tx.write_all(&res.body).await?;
        }

        tx.flush().await
    }
}
