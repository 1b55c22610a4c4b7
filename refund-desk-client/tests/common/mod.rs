//! Shared helpers: a one-route HTTP stub that answers every request with a canned response.

#![allow(dead_code)]

use std::sync::Arc;

use refund_desk_client::{ApiNinjasClient, IbanClientConfig};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

pub const VALID_IBAN: &str = "DE89370400440532013000";
pub const API_KEY: &str = "mock-api-key";

/// Canned-response HTTP server bound to an ephemeral local port.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    /// Start a server answering every request with `status` and `body`.
    pub async fn start(status: u16, body: &str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub server");
        let addr = listener.local_addr().expect("stub server has no address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let body = body.to_string();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = vec![0_u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                recorded
                    .lock()
                    .await
                    .push(String::from_utf8_lossy(&buf[..n]).into_owned());

                let response = format!(
                    "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        Self {
            base_url: format!("http://{addr}/v1/iban"),
            requests,
        }
    }

    /// Raw request heads received so far.
    pub async fn requests(&self) -> Vec<String> {
        self.requests.lock().await.clone()
    }

    pub fn client(&self) -> ApiNinjasClient {
        client_for(&self.base_url)
    }
}

pub fn client_for(endpoint: &str) -> ApiNinjasClient {
    ApiNinjasClient::new(IbanClientConfig::new(API_KEY).with_endpoint(endpoint))
        .expect("failed to build client")
}

/// An endpoint on a port nobody listens on.
pub async fn refused_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind probe listener");
    let addr = listener.local_addr().expect("probe listener has no address");
    drop(listener);
    format!("http://{addr}/v1/iban")
}
