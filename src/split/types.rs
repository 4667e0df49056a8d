//! Split-route types and error definitions.

use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Identifies one split-route: exact method plus exact path.
///
/// No pattern normalization happens here; `/users` and `/users/` are two
/// different keys. Pattern semantics belong to the host router.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteKey {
    pub method: Method,
    pub path: String,
}

impl RouteKey {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// One registered alternative: a zero-argument callable producing a
/// response. Opaque to the split core, which invokes it and passes the
/// response through unmodified.
pub type SplitHandler = Arc<dyn Fn() -> Response + Send + Sync>;

/// Wrap any response-producing closure as a [`SplitHandler`].
pub fn handler<F, R>(f: F) -> SplitHandler
where
    F: Fn() -> R + Send + Sync + 'static,
    R: IntoResponse,
{
    Arc::new(move || f().into_response())
}

/// Errors raised while building the split table. All of these are
/// boot-time configuration failures; none can occur during request
/// handling.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A registration pushed the route's accumulated weight past 100.
    /// The offending registration is rejected and not applied.
    #[error("route {key} is over-allocated: accumulated weight {total} exceeds 100")]
    OverAllocated { key: RouteKey, total: u32 },

    /// At finalize, a route's accumulated weight was not exactly 100.
    #[error("route {key} is incomplete: accumulated weight {total}, expected exactly 100")]
    Incomplete { key: RouteKey, total: u32 },

    /// A weight outside 1..=100 was supplied. A zero weight would create
    /// an unreachable variant.
    #[error("invalid weight {weight} for route {key}: weights must be in 1..=100")]
    InvalidWeight { key: RouteKey, weight: u32 },
}
