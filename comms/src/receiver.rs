//! The implementation of the receiving end of the protocol.

use std::io;

use log::trace;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

use crate::{
    HttpErr, MAX_BODY_SIZE, MAX_HEAD_SIZE, Result,
    msg::{Method, Request, Version},
    query::Query,
};

/// The receiving end handle of the communication.
pub struct HttpReceiver<R: AsyncRead + Unpin> {
    rx: BufReader<R>,
}

impl<R: AsyncRead + Unpin> HttpReceiver<R> {
    /// Creates a new `HttpReceiver` instance.
    ///
    /// # Arguments
    /// * `rx` - The underlying reader.
    pub(super) fn new(rx: R) -> Self {
        Self {
            rx: BufReader::new(rx),
        }
    }

    /// Waits to receive the next request from the inner receiver.
    ///
    /// # Returns
    /// The request, `None` if the peer closed the connection between requests,
    /// or an `HttpErr` if the bytes received aren't a valid request.
    pub async fn recv(&mut self) -> Result<Option<Request>> {
        let mut budget = MAX_HEAD_SIZE;

        let request_line = loop {
            match self.read_line(&mut budget).await? {
                None => return Ok(None),
                Some(line) if line.is_empty() => continue,
                Some(line) => break line,
            }
        };

        let mut parts = request_line.split(' ');
        let (Some(method), Some(target), Some(version), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(HttpErr::malformed(format!(
                "invalid request line {request_line:?}"
            )));
        };

        let version = match version {
            "HTTP/1.1" => Version::Http11,
            "HTTP/1.0" => Version::Http10,
            other => return Err(HttpErr::malformed(format!("unsupported version {other}"))),
        };

        if !target.starts_with('/') {
            return Err(HttpErr::malformed(format!("invalid request target {target}")));
        }

        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        trace!("received {method} {target}");

        let headers = self.read_headers(&mut budget).await?;
        let body = self.read_body(&headers).await?;

        Ok(Some(Request {
            method: Method::from(method),
            path: path.to_string(),
            query: Query::parse(query),
            version,
            headers,
            body,
        }))
    }

    /// Reads header lines up to the empty line that ends the head.
    async fn read_headers(&mut self, budget: &mut usize) -> Result<Vec<(String, String)>> {
        let mut headers = Vec::new();

        loop {
            let Some(line) = self.read_line(budget).await? else {
                return Err(HttpErr::malformed("connection closed inside the headers"));
            };

            if line.is_empty() {
                return Ok(headers);
            }

            let Some((name, value)) = line.split_once(':') else {
                return Err(HttpErr::malformed(format!("invalid header line {line:?}")));
            };

            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_string()));
        }
    }

    /// Reads the `Content-Length` framed body, if any.
    async fn read_body(&mut self, headers: &[(String, String)]) -> Result<Vec<u8>> {
        if headers.iter().any(|(name, _)| name == "transfer-encoding") {
            return Err(HttpErr::LengthRequired);
        }

        let mut len = None;
        for (_, value) in headers.iter().filter(|(name, _)| name == "content-length") {
            let parsed = value
                .parse::<usize>()
                .map_err(|_| HttpErr::malformed(format!("invalid content-length {value}")))?;

            match len {
                Some(prev) if prev != parsed => {
                    return Err(HttpErr::malformed(format!(
                        "conflicting content-length {prev} and {parsed}"
                    )));
                }
                _ => len = Some(parsed),
            }
        }
        let len = len.unwrap_or(0);

        if len > MAX_BODY_SIZE {
            return Err(HttpErr::PayloadTooLarge(len));
        }

        let mut body = vec![0; len];
        self.rx.read_exact(&mut body).await?;
        Ok(body)
    }

    /// Reads one CRLF (or bare LF) terminated line of the head, without its terminator.
    ///
    /// # Arguments
    /// * `budget` - The bytes of the head still allowed, decremented by the line's size.
    ///
    /// # Returns
    /// The line or `None` on a clean end of stream.
    async fn read_line(&mut self, budget: &mut usize) -> Result<Option<String>> {
        if *budget == 0 {
            return Err(HttpErr::HeadTooLarge);
        }

        let mut line = String::new();
        let n = (&mut self.rx)
            .take(*budget as u64)
            .read_line(&mut line)
            .await
            .map_err(|e| match e.kind() {
                io::ErrorKind::InvalidData => HttpErr::malformed("request head isn't utf-8"),
                _ => HttpErr::Io(e),
            })?;

        if n == 0 {
            return Ok(None);
        }

        *budget -= n;

        if !line.ends_with('\n') {
            return Err(match *budget {
                0 => HttpErr::HeadTooLarge,
                _ => HttpErr::malformed("connection closed inside the request head"),
            });
        }

        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::io::Builder;

    use super::*;

    async fn recv(raw: &[u8]) -> Result<Option<Request>> {
        let mock = Builder::new().read(raw).build();
        HttpReceiver::new(mock).recv().await
    }

    #[tokio::test]
    async fn get_with_query() {
        let req = recv(b"GET /regression/linear?learningRate=0.1&maxIterations=3 HTTP/1.1\r\nHost: x\r\n\r\n")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(req.method, Method::Get);
        assert_eq!(req.path, "/regression/linear");
        assert_eq!(req.query.get("learningRate"), Some("0.1"));
        assert_eq!(req.query.get("maxIterations"), Some("3"));
        assert_eq!(req.header("host"), Some("x"));
        assert!(req.body.is_empty());
    }

    #[tokio::test]
    async fn post_with_body() {
        let req = recv(b"POST /regression HTTP/1.1\r\nApiKey: k\r\nContent-Length: 13\r\n\r\n{\"volume\":10}")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(req.method, Method::Post);
        assert_eq!(req.header("apikey"), Some("k"));
        assert_eq!(req.body, b"{\"volume\":10}");
    }

    #[tokio::test]
    async fn bare_line_feeds() {
        let req = recv(b"GET / HTTP/1.0\nConnection: keep-alive\n\n").await.unwrap().unwrap();
        assert_eq!(req.version, Version::Http10);
        assert!(req.keep_alive());
    }

    #[tokio::test]
    async fn clean_eof() {
        assert!(recv(b"").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn truncated_head() {
        let err = recv(b"GET / HTTP/1.1\r\nHost: x\r\n").await.unwrap_err();
        assert!(matches!(err, HttpErr::Malformed(_)));
    }

    #[tokio::test]
    async fn invalid_request_line() {
        let err = recv(b"GET /\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, HttpErr::Malformed(_)));

        let err = recv(b"GET / HTTP/2.0\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, HttpErr::Malformed(_)));

        let err = recv(b"GET nowhere HTTP/1.1\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, HttpErr::Malformed(_)));
    }

    #[tokio::test]
    async fn chunked_body_is_refused() {
        let err = recv(b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n")
            .await
            .unwrap_err();
        assert!(matches!(err, HttpErr::LengthRequired));
    }

    #[tokio::test]
    async fn conflicting_lengths_are_refused() {
        let err = recv(b"POST / HTTP/1.1\r\nContent-Length: 2\r\nContent-Length: 5\r\n\r\n")
            .await
            .unwrap_err();
        assert!(matches!(err, HttpErr::Malformed(_)));
    }

    #[tokio::test]
    async fn repeated_equal_lengths() {
        let req = recv(b"POST / HTTP/1.1\r\nContent-Length: 2\r\nContent-Length: 2\r\n\r\n{}")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(req.body, b"{}");
    }

    #[tokio::test]
    async fn oversized_body_is_refused() {
        let head = format!("POST / HTTP/1.1\r\nContent-Length: {}\r\n\r\n", MAX_BODY_SIZE + 1);
        let err = recv(head.as_bytes()).await.unwrap_err();
        assert!(matches!(err, HttpErr::PayloadTooLarge(len) if len == MAX_BODY_SIZE + 1));
    }

    #[tokio::test]
    async fn oversized_head_is_refused() {
        let mut head = b"GET / HTTP/1.1\r\nX-Padding: ".to_vec();
        head.extend(std::iter::repeat_n(b'a', MAX_HEAD_SIZE));
        head.extend(b"\r\n\r\n");

        let err = HttpReceiver::new(&head[..]).recv().await.unwrap_err();
        assert!(matches!(err, HttpErr::HeadTooLarge));
    }

    #[tokio::test]
    async fn pipelined_requests() {
        let mock = Builder::new()
            .read(b"GET /a HTTP/1.1\r\n\r\n\r\nGET /b HTTP/1.1\r\n\r\n")
            .build();
        let mut rx = HttpReceiver::new(mock);

        assert_eq!(rx.recv().await.unwrap().unwrap().path, "/a");
        assert_eq!(rx.recv().await.unwrap().unwrap().path, "/b");
        assert!(rx.recv().await.unwrap().is_none());
    }
}
