//! Binding compiled split routes into an axum router.
//!
//! # Responsibilities
//! - Implement the registry's RouteBinder boundary for axum
//! - Wrap each compiled route as a method-filtered axum handler
//! - Carry the identity provider to every route via an extension
//!
//! # Design Decisions
//! - Duplicate-key and path-pattern policy stays axum's: binding the same
//!   method+path twice panics at startup, which is exactly when a broken
//!   route table should surface
//! - Handlers run the identity lookup on request parts only; the body is
//!   never read by the dispatch path

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{on, MethodFilter};
use axum::{Extension, Router};

use crate::observability::metrics;
use crate::session::IdentityProvider;
use crate::split::{CompiledRoute, RouteBinder, RouteKey};

/// Collects compiled split routes into an [`axum::Router`].
///
/// Feed it to [`SplitRegistry::finalize`](crate::split::SplitRegistry::finalize),
/// merge any ordinary routes, then call [`into_router`](Self::into_router).
pub struct AxumBinder {
    router: Router,
    identity: Arc<dyn IdentityProvider>,
}

impl AxumBinder {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            router: Router::new(),
            identity,
        }
    }

    /// Merge ordinary application routes alongside the split routes.
    pub fn merge(&mut self, other: Router) {
        let router = std::mem::take(&mut self.router);
        self.router = router.merge(other);
    }

    /// Finish the router. The identity provider is layered on as an
    /// extension here, so it covers every route added so far, including
    /// merged ordinary routes that use the
    /// [`UserScore`](crate::http::UserScore) extractor. Routes added to
    /// the returned router afterwards will not see it.
    pub fn into_router(self) -> Router {
        self.router.layer(Extension(self.identity))
    }
}

impl RouteBinder for AxumBinder {
    fn bind(&mut self, key: RouteKey, route: CompiledRoute) {
        let filter = MethodFilter::try_from(key.method.clone()).unwrap_or_else(|_| {
            panic!("method {} cannot be bound as an axum method filter", key.method)
        });

        let compiled = Arc::new(route);
        let identity = self.identity.clone();
        let route_label = key.to_string();
        let method_label = key.method.to_string();
        let path = key.path.clone();

        let handler = move |req: Request<Body>| {
            let compiled = compiled.clone();
            let identity = identity.clone();
            let route_label = route_label.clone();
            let method_label = method_label.clone();
            let path = path.clone();
            async move {
                let (parts, _body) = req.into_parts();
                let token = identity.current_token(&parts);
                let selection = compiled.select(token.as_deref());

                tracing::debug!(
                    route = %route_label,
                    variant = selection.variant,
                    score = ?selection.score,
                    "Dispatching split route"
                );
                metrics::record_dispatch(
                    &method_label,
                    &path,
                    selection.variant,
                    selection.score.is_none(),
                );

                selection.invoke()
            }
        };

        let router = std::mem::take(&mut self.router);
        self.router = router.route(&key.path, on(filter, handler));
    }
}
