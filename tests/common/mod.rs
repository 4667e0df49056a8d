//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

use split_route::{handler, AxumBinder, CookieIdentity, SplitRegistry, UserScore};

/// Standard 30/50/20 split on GET / with distinguishable bodies, plus an
/// ordinary /whoami route reading the score.
pub fn split_app(cookie_name: &str) -> Router {
    let identity = Arc::new(CookieIdentity::new(cookie_name));

    let mut registry = SplitRegistry::new();
    registry
        .register(30, Method::GET, "/", handler(|| "landing-a"))
        .unwrap();
    registry
        .register(50, Method::GET, "/", handler(|| "landing-b"))
        .unwrap();
    registry
        .register(20, Method::GET, "/", handler(|| "landing-c"))
        .unwrap();

    let mut binder = AxumBinder::new(identity);
    registry.finalize(&mut binder).unwrap();
    binder.merge(Router::new().route("/whoami", get(whoami)));
    binder.into_router()
}

async fn whoami(UserScore(score): UserScore) -> Json<serde_json::Value> {
    Json(json!({ "score": score }))
}

/// Serve `app` on an ephemeral local port and return the bound address.
#[allow(dead_code)]
pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}
