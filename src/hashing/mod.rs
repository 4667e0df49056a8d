//! Bucket hashing subsystem.
//!
//! # Data Flow
//! ```text
//! identity token (opaque string)
//!     → bucket.rs (FNV-1a over bytes, SplitMix64 finalizer)
//!     → reduce modulo 100
//!     → score in [0,100)
//! ```
//!
//! # Design Decisions
//! - Seedless and fixed: same token produces the same score across
//!   processes and restarts (the stickiness guarantee rests on this)
//! - Non-cryptographic: the goal is even spread, not unpredictability
//! - Pure functions only; safe to call from any number of tasks

pub mod bucket;

pub use bucket::{bucket_score, SCORE_SPAN};
