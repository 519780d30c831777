//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceExt;

use raw_response::config::HostConfig;
use raw_response::HttpServer;

/// A rendered response broken into its observable parts.
#[allow(dead_code)]
pub struct Rendered {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl Rendered {
    #[allow(dead_code)]
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

async fn collect(response: Response) -> Rendered {
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    Rendered { status, headers, body }
}

/// POST an envelope to `/render` in-process.
#[allow(dead_code)]
pub async fn render(config: HostConfig, accept: Option<&str>, envelope: serde_json::Value) -> Rendered {
    let router = HttpServer::new(config).router();
    let mut request = Request::builder()
        .method("POST")
        .uri("/render")
        .header("content-type", "application/json");
    if let Some(accept) = accept {
        request = request.header("accept", accept);
    }
    let request = request.body(Body::from(envelope.to_string())).unwrap();

    collect(router.oneshot(request).await.unwrap()).await
}

/// Start the server on an ephemeral port and return its address.
#[allow(dead_code)]
pub async fn spawn_server(config: HostConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}
