//! Demo application serving weighted split routes.
//!
//! Two split-tested pages plus an ordinary `/whoami` route reading the
//! user score. Visitors without an identity cookie are issued one, so a
//! browser sticks to its variant from the second request on.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderValue, Method};
use axum::middleware::{self, Next};
use axum::response::{Html, Response};
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use split_route::config::{load_config, AppConfig};
use split_route::observability::{logging, metrics};
use split_route::{handler, AxumBinder, CookieIdentity, SplitRegistry, UserScore};

#[derive(Parser)]
#[command(name = "split-demo")]
#[command(about = "Demo server for deterministic split routing", long_about = None)]
struct Cli {
    /// Path to a TOML config file; built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!(
        bind_address = %config.listener.bind_address,
        cookie = %config.session.cookie_name,
        "split-demo starting"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let identity = Arc::new(CookieIdentity::new(config.session.cookie_name.clone()));

    let mut registry = SplitRegistry::new();
    registry.register(
        50,
        Method::GET,
        "/",
        handler(|| Html("<h1>Welcome!</h1>")),
    )?;
    registry.register(
        50,
        Method::GET,
        "/",
        handler(|| Html("<h1>Hello there.</h1>")),
    )?;
    registry.register(
        30,
        Method::GET,
        "/pricing",
        handler(|| Json(json!({ "layout": "table" }))),
    )?;
    registry.register(
        50,
        Method::GET,
        "/pricing",
        handler(|| Json(json!({ "layout": "cards" }))),
    )?;
    registry.register(
        20,
        Method::GET,
        "/pricing",
        handler(|| Json(json!({ "layout": "slider" }))),
    )?;

    let mut binder = AxumBinder::new(identity);
    registry.finalize(&mut binder)?;
    binder.merge(Router::new().route("/whoami", get(whoami)));

    let cookie_name = config.session.cookie_name.clone();
    let app = binder
        .into_router()
        .layer(middleware::from_fn(move |req, next| {
            ensure_identity(cookie_name.clone(), req, next)
        }))
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Report the caller's bucket score, demonstrating score access from an
/// ordinary (non-split) route.
async fn whoami(UserScore(score): UserScore) -> Json<serde_json::Value> {
    Json(json!({ "score": score }))
}

/// Issue an identity cookie to visitors that arrived without one. The
/// current request still dispatches as anonymous; stickiness starts with
/// the next request.
async fn ensure_identity(cookie_name: String, req: Request, next: Next) -> Response {
    let had_cookie = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|raw| {
            raw.split(';').any(|pair| {
                pair.split_once('=')
                    .map(|(name, _)| name.trim() == cookie_name)
                    .unwrap_or(false)
            })
        })
        .unwrap_or(false);

    let mut response = next.run(req).await;

    if !had_cookie {
        let token = uuid::Uuid::new_v4();
        let cookie = format!("{}={}; Path=/", cookie_name, token);
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
