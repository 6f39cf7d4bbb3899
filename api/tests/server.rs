use std::{sync::Arc, time::Duration};

use api::{App, Server};
use regression::MemoryStore;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    time,
};
use tokio_util::sync::CancellationToken;

#[tokio::test(flavor = "multi_thread")]
async fn serves_over_tcp_until_cancelled() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let store = MemoryStore::new();
    let mut server = Server::new(App::new(Arc::new(store.clone()), "secret"));
    let shutdown = CancellationToken::new();

    let task = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { server.run(listener, shutdown).await }
    });

    let body = r#"{"volume":4}"#;
    let raw = format!(
        "POST /regression HTTP/1.1\r\napikey: secret\r\nconnection: close\r\ncontent-length: {}\r\n\r\n{body}",
        body.len()
    );

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(raw.as_bytes()).await.unwrap();

    let mut res = String::new();
    stream.read_to_string(&mut res).await.unwrap();

    assert!(res.starts_with("HTTP/1.1 200 OK\r\n"), "{res}");
    assert_eq!(store.len(), 4);

    // An idle keep-alive client must not hold the shutdown back.
    let _idle = TcpStream::connect(addr).await.unwrap();

    shutdown.cancel();
    task.await.unwrap().unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn shutdown_aborts_a_running_fit() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let store = MemoryStore::new();
    regression::seed_samples(&store, 200).await.unwrap();

    let mut server = Server::new(App::new(Arc::new(store), "secret"));
    let shutdown = CancellationToken::new();

    let task = tokio::spawn({
        let shutdown = shutdown.clone();
        async move { server.run(listener, shutdown).await }
    });

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(
            b"GET /regression/linear?learningRate=0.0001&maxIterations=18446744073709551615 HTTP/1.1\r\n\r\n",
        )
        .await
        .unwrap();

    time::sleep(Duration::from_millis(300)).await;
    shutdown.cancel();

    let joined = time::timeout(Duration::from_secs(3), task).await;
    assert!(joined.is_ok(), "shutdown waited for the fit");
    joined.unwrap().unwrap().unwrap();

    // The aborted connection is closed without an answer.
    let mut res = Vec::new();
    stream.read_to_end(&mut res).await.unwrap();
    assert!(res.is_empty());
}
