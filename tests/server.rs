//! Serves a demo over a real socket and talks raw HTTP/1.1 to it.

use std::time::Duration;

use catalog::Server;
use catalog::routes::Demo;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .unwrap()
}

async fn connect(port: u16) -> TcpStream {
    for _ in 0..50 {
        if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)).await {
            return stream;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server never came up on port {port}");
}

#[tokio::test]
async fn serves_requests_and_shuts_down() {
    let port = free_port();
    let (stop, stopped) = oneshot::channel::<()>();

    let server = tokio::spawn(
        Server::bind(([127, 0, 0, 1], port).into()).serve_with_shutdown(
            Demo::PathParams.router(),
            async move {
                let _ = stopped.await;
            },
        ),
    );

    let mut stream = connect(port).await;
    stream
        .write_all(b"GET /items/42 HTTP/1.1\r\nhost: localhost\r\nconnection: close\r\n\r\n")
        .await
        .unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    let raw = String::from_utf8(raw).unwrap();

    assert!(raw.starts_with("HTTP/1.1 200 OK"), "{raw}");
    assert!(raw.to_ascii_lowercase().contains("content-type: application/json"));
    assert!(raw.ends_with(r#"{"item_id":42}"#));

    stop.send(()).unwrap();
    server.await.unwrap().unwrap();
}
