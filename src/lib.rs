//! Deterministic weighted split routing (A/B/N testing) for axum.
//!
//! Assigns every user a stable bucket score in [0,100) from their
//! identity token and uses it to pick one of several weighted handlers
//! registered for the same method and path. The same token always lands
//! on the same variant, across requests and restarts, with no stored
//! assignment state.
//!
//! # Architecture Overview
//!
//! ```text
//!  Startup:
//!    register(weight, method, path, handler) ×N
//!        │
//!        ▼
//!    ┌─────────┐   totals == 100?   ┌──────────┐    RouteBinder     ┌────────────┐
//!    │  split  │ ─────────────────▶ │ compiled │ ─────────────────▶ │   axum     │
//!    │ registry│     finalize()     │  routes  │    (http/bind)     │   Router   │
//!    └─────────┘                    └──────────┘                    └────────────┘
//!
//!  Request:
//!    Cookie ──▶ session (IdentityProvider) ──▶ hashing (score [0,100))
//!                                                  │
//!                                                  ▼
//!                                     compiled route bound scan
//!                                                  │
//!                                                  ▼
//!                                       exactly one variant handler
//! ```
//!
//! Weight mistakes (over- or under-allocation) fail at startup with the
//! offending route named; requests never fail on account of the split
//! table, and a request with no identity gets the first-registered
//! variant.

// Core subsystems
pub mod hashing;
pub mod split;

// Collaborator boundaries and glue
pub mod http;
pub mod session;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::AppConfig;
pub use hashing::{bucket_score, SCORE_SPAN};
pub use http::{AxumBinder, UserScore};
pub use session::{CookieIdentity, IdentityProvider};
pub use split::{
    handler, CompiledRoute, RouteBinder, RouteKey, SplitError, SplitHandler, SplitRegistry,
};
