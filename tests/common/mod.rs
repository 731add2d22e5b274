//! Shared utilities for integration testing.

use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use campus_client::ClientConfig;

/// Serve `router` on an ephemeral local port and return the bound address.
pub async fn start_mock_backend(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    addr
}

/// Client configuration pointed at a mock backend.
pub fn backend_config(addr: SocketAddr) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.api.base_url = format!("http://{}", addr);
    config
}

/// An address nothing is listening on (bound, observed, released).
#[allow(dead_code)]
pub fn unreachable_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
