//! Session identity subsystem.
//!
//! # Responsibilities
//! - Define the boundary to whatever supplies per-user identity tokens
//! - Ship a cookie-backed provider for the common case
//!
//! # Design Decisions
//! - The split core never creates or persists sessions; it only reads an
//!   opaque token through this boundary
//! - A request with no token is a first-class case, not an error

pub mod identity;

pub use identity::{CookieIdentity, IdentityProvider};
