//! Registration and finalize lifecycle through the public API.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use tower::ServiceExt;

use split_route::{
    handler, AxumBinder, CompiledRoute, CookieIdentity, RouteBinder, RouteKey, SplitError,
    SplitRegistry,
};

mod common;

/// Stand-in for a host router, collecting what finalize hands over.
#[derive(Default)]
struct RecordingBinder {
    bound: Vec<(RouteKey, CompiledRoute)>,
}

impl RouteBinder for RecordingBinder {
    fn bind(&mut self, key: RouteKey, route: CompiledRoute) {
        self.bound.push((key, route));
    }
}

#[test]
fn test_valid_table_compiles_and_binds() {
    let mut registry = SplitRegistry::new();
    registry
        .register(30, Method::GET, "/", handler(|| "h1"))
        .unwrap();
    registry
        .register(50, Method::GET, "/", handler(|| "h2"))
        .unwrap();
    registry
        .register(20, Method::GET, "/", handler(|| "h3"))
        .unwrap();

    let mut binder = RecordingBinder::default();
    registry.finalize(&mut binder).unwrap();

    assert_eq!(binder.bound.len(), 1);
    let (key, route) = &binder.bound[0];
    assert_eq!(*key, RouteKey::new(Method::GET, "/"));
    assert_eq!(route.bounds(), vec![30, 80, 100]);
}

#[test]
fn test_incomplete_allocation_fails_startup() {
    let mut registry = SplitRegistry::new();
    registry
        .register(30, Method::GET, "/", handler(|| "h1"))
        .unwrap();

    let mut binder = RecordingBinder::default();
    let err = registry.finalize(&mut binder).unwrap_err();

    assert!(matches!(err, SplitError::Incomplete { total: 30, .. }));
    assert!(binder.bound.is_empty());
    let msg = err.to_string();
    assert!(msg.contains("GET /"), "message was: {}", msg);
    assert!(msg.contains("30"), "message was: {}", msg);
}

#[test]
fn test_over_allocation_fails_the_second_register() {
    let mut registry = SplitRegistry::new();
    registry
        .register(60, Method::GET, "/", handler(|| "h1"))
        .unwrap();
    let err = registry
        .register(60, Method::GET, "/", handler(|| "h2"))
        .unwrap_err();

    assert!(matches!(err, SplitError::OverAllocated { total: 120, .. }));
}

#[test]
fn test_cycle_after_finalize_starts_clean() {
    let mut registry = SplitRegistry::new();
    registry
        .register(100, Method::GET, "/", handler(|| "v1"))
        .unwrap();
    let mut binder = RecordingBinder::default();
    registry.finalize(&mut binder).unwrap();

    // Same key again, from scratch: were any weight carried over, the
    // first registration here would over-allocate.
    registry
        .register(30, Method::GET, "/", handler(|| "v2"))
        .unwrap();
    registry
        .register(70, Method::GET, "/", handler(|| "v3"))
        .unwrap();
    let mut binder = RecordingBinder::default();
    registry.finalize(&mut binder).unwrap();
    assert_eq!(binder.bound[0].1.bounds(), vec![30, 100]);
}

#[tokio::test]
async fn test_bound_axum_route_dispatches_by_cookie() {
    let app = common::split_app("sid");

    // "user-32" scores 35 → second variant.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("Cookie", "sid=user-32")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"landing-b");
}

#[tokio::test]
async fn test_method_scoping_is_part_of_the_key() {
    let identity = Arc::new(CookieIdentity::new("sid"));
    let mut registry = SplitRegistry::new();
    registry
        .register(100, Method::GET, "/submit", handler(|| "get-only"))
        .unwrap();

    let mut binder = AxumBinder::new(identity);
    registry.finalize(&mut binder).unwrap();
    let app = binder.into_router();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/submit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = app
        .oneshot(Request::builder().uri("/submit").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
