//! Observability subsystem.
//!
//! # Responsibilities
//! - Structured logging initialization (logging.rs)
//! - Dispatch counters and metrics exposition (metrics.rs)
//!
//! # Design Decisions
//! - Log events carry structured fields (route, variant, score), not
//!   formatted strings
//! - Metrics record aggregate variant traffic only; no per-user
//!   assignment is persisted anywhere

pub mod logging;
pub mod metrics;
