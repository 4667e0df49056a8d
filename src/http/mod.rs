//! HTTP glue subsystem.
//!
//! # Data Flow
//! ```text
//! finalize()
//!     → bind.rs (AxumBinder: one axum handler per compiled route)
//!     → axum::Router (host dispatch: patterns, methods, middleware)
//!
//! Request time:
//!     axum matches route → bound handler
//!     → IdentityProvider (token from request parts)
//!     → CompiledRoute::select → invoke variant
//!
//! Any handler (split-managed or not):
//!     → score.rs (UserScore extractor, same score as dispatch)
//! ```
//!
//! # Design Decisions
//! - The split core stays framework-light; everything axum-router-specific
//!   lives here
//! - The identity provider rides the router as an extension so ordinary
//!   routes can read the user score too

pub mod bind;
pub mod score;

pub use bind::AxumBinder;
pub use score::UserScore;
