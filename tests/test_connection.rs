use courier::http::connection::Connection;
use courier::routes::ResponderChain;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// Binds an ephemeral port and serves exactly one connection through the
/// given chain.
async fn serve_one(chain: ResponderChain) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (socket, _peer) = listener.accept().await.unwrap();
        let mut conn = Connection::new(socket, chain);
        conn.run().await.unwrap();
    });

    (addr, handle)
}

async fn roundtrip(chain: ResponderChain, request: &[u8]) -> String {
    let (addr, handle) = serve_one(chain).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    // The server closes after one response, so read to EOF
    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    handle.await.unwrap();
    String::from_utf8(response).unwrap()
}

#[tokio::test]
async fn test_end_to_end_echo() {
    let response = roundtrip(
        ResponderChain::standard(None),
        b"GET /echo/ping HTTP/1.1\r\nHost: localhost\r\n\r\n",
    )
    .await;

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.contains("Content-Length: 4\r\n"));
    assert!(response.ends_with("\r\n\r\nping"));
}

#[tokio::test]
async fn test_end_to_end_root_is_bare_200() {
    let response = roundtrip(
        ResponderChain::standard(None),
        b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n",
    )
    .await;

    assert_eq!(response, "HTTP/1.1 200 OK\r\n\r\n");
}

#[tokio::test]
async fn test_end_to_end_unknown_route_is_404() {
    let response = roundtrip(
        ResponderChain::standard(None),
        b"GET /nonexistent HTTP/1.1\r\n\r\n",
    )
    .await;

    assert_eq!(response, "HTTP/1.1 404 Not Found\r\n\r\n");
}

#[tokio::test]
async fn test_end_to_end_malformed_request_line_is_404() {
    let response = roundtrip(ResponderChain::standard(None), b"NONSENSE\r\n\r\n").await;

    assert_eq!(response, "HTTP/1.1 404 Not Found\r\n\r\n");
}

#[tokio::test]
async fn test_end_to_end_garbage_then_disconnect_is_404() {
    // No header terminator ever arrives; closing the write side must still
    // produce a well-formed 404, not a dropped connection.
    let (addr, handle) = serve_one(ResponderChain::standard(None)).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"garbage without a terminator").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    handle.await.unwrap();
    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\n\r\n".to_vec());
}

#[tokio::test]
async fn test_end_to_end_file_round_trip() {
    let dir =
        std::env::temp_dir().join(format!("courier-test-{}-connection", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let post_response = roundtrip(
        ResponderChain::standard(Some(dir.clone())),
        b"POST /files/test.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello",
    )
    .await;
    assert_eq!(post_response, "HTTP/1.1 201 Created\r\n\r\n");

    let get_response = roundtrip(
        ResponderChain::standard(Some(dir.clone())),
        b"GET /files/test.txt HTTP/1.1\r\n\r\n",
    )
    .await;
    assert!(get_response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(get_response.ends_with("\r\n\r\nhello"));

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_end_to_end_request_split_across_writes() {
    // Headers and body arriving in separate packets must be accumulated
    let (addr, handle) = serve_one(ResponderChain::standard(None)).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /user-agent HTTP/1.1\r\nUser-")
        .await
        .unwrap();
    stream.flush().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    stream.write_all(b"Agent: split/1.0\r\n\r\n").await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    handle.await.unwrap();
    let response = String::from_utf8(response).unwrap();
    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(response.ends_with("\r\n\r\nsplit/1.0"));
}
