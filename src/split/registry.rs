//! Weight accumulation and the finalize pass.
//!
//! # Responsibilities
//! - Accumulate weighted alternatives per RouteKey during startup
//! - Reject over-allocation the moment it happens
//! - Verify, compile, and hand every route to the binder in one pass
//!
//! # Design Decisions
//! - Registration and finalize run single-threaded at startup, before
//!   request traffic; `&mut self` enforces the exclusive access at
//!   compile time
//! - Finalize validates every route before binding any, so a failed
//!   finalize binds nothing and leaves the accumulated state readable
//! - Successful finalize clears all state; the next cycle starts clean

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use axum::http::Method;

use crate::hashing::SCORE_SPAN;
use crate::split::compiled::CompiledRoute;
use crate::split::types::{RouteKey, SplitError, SplitHandler};

/// Collaborator interface to the host router. The registry hands over one
/// compiled route per key; dispatch semantics (patterns, wildcards,
/// duplicate keys) belong entirely to the implementor.
pub trait RouteBinder {
    fn bind(&mut self, key: RouteKey, route: CompiledRoute);
}

/// Per-route mutable state during the registration phase.
struct RouteAccumulator {
    total_weight: u32,
    alternatives: Vec<(u32, SplitHandler)>,
}

/// Accumulates weighted alternatives per route, then compiles and binds
/// them in a single [`finalize`](SplitRegistry::finalize) pass.
///
/// Construct one at application startup, feed it `register` calls, and
/// finalize it into the host router before serving traffic.
#[derive(Default)]
pub struct SplitRegistry {
    accumulators: HashMap<RouteKey, RouteAccumulator>,
    // Registration order of keys, for deterministic finalize output.
    order: Vec<RouteKey>,
}

impl SplitRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one weighted alternative to the route for `(method, path)`.
    ///
    /// The first call for a key creates its accumulator. Registration
    /// order is meaningful: it fixes the bucket bounds, and the first
    /// registered alternative doubles as the default for requests with no
    /// identity.
    pub fn register(
        &mut self,
        weight: u32,
        method: Method,
        path: impl Into<String>,
        handler: SplitHandler,
    ) -> Result<(), SplitError> {
        let key = RouteKey::new(method, path);

        if weight == 0 || weight > SCORE_SPAN {
            return Err(SplitError::InvalidWeight { key, weight });
        }

        let acc = match self.accumulators.entry(key.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(key.clone());
                entry.insert(RouteAccumulator {
                    total_weight: 0,
                    alternatives: Vec::new(),
                })
            }
        };

        let total = acc.total_weight + weight;
        if total > SCORE_SPAN {
            return Err(SplitError::OverAllocated { key, total });
        }

        acc.total_weight = total;
        acc.alternatives.push((weight, handler));
        tracing::debug!(
            route = %key,
            weight,
            total,
            variant = acc.alternatives.len() - 1,
            "Registered split alternative"
        );
        Ok(())
    }

    /// Number of routes currently accumulated.
    pub fn len(&self) -> usize {
        self.accumulators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accumulators.is_empty()
    }

    /// Verify every route's weights sum to exactly 100, compile each into
    /// its cumulative bound table, bind them through `binder`, and clear
    /// all accumulation state.
    ///
    /// Validation runs over every route before anything is bound: a
    /// failed finalize binds no routes and leaves the registry intact so
    /// the caller can report the broken weight table. Finalizing an empty
    /// registry is a no-op.
    pub fn finalize<B: RouteBinder>(&mut self, binder: &mut B) -> Result<(), SplitError> {
        for key in &self.order {
            let acc = &self.accumulators[key];
            if acc.total_weight != SCORE_SPAN {
                return Err(SplitError::Incomplete {
                    key: key.clone(),
                    total: acc.total_weight,
                });
            }
        }

        for key in std::mem::take(&mut self.order) {
            // Present by construction: order only holds registered keys.
            if let Some(acc) = self.accumulators.remove(&key) {
                let route = CompiledRoute::from_alternatives(acc.alternatives);
                tracing::info!(
                    route = %key,
                    variants = route.len(),
                    "Binding compiled split route"
                );
                binder.bind(key, route);
            }
        }
        self.accumulators.clear();
        Ok(())
    }
}
