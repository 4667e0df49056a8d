//! Split-route subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     register(weight, method, path, handler)
//!     → registry.rs (accumulate per RouteKey, guard running total ≤ 100)
//!
//! Finalize (once, after all registrations):
//!     → registry.rs (verify every total == 100)
//!     → compiled.rs (prefix sum → cumulative bound table)
//!     → RouteBinder collaborator (bind into the host router)
//!     → accumulation state cleared
//!
//! Request time:
//!     identity token → hashing::bucket_score → scan bounds → invoke variant
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Weight errors are boot failures, never request failures
//! - Registration order defines bucket bounds (first variant covers [0,w1))
//! - Missing identity selects the first-registered variant

pub mod compiled;
pub mod registry;
pub mod types;

pub use compiled::CompiledRoute;
pub use registry::{RouteBinder, SplitRegistry};
pub use types::{handler, RouteKey, SplitError, SplitHandler};
