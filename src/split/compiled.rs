//! Compiled split routes and request-time selection.
//!
//! # Responsibilities
//! - Hold the immutable cumulative-bound table for one route
//! - Map a user score to exactly one alternative
//! - Apply the missing-identity fallback
//!
//! # Design Decisions
//! - Immutable after construction (shared read-only, no locks)
//! - Linear scan over the bounds; tables are capped at 100 entries in
//!   practice, so a search structure would buy nothing
//! - Selection never fails: a request is never rejected because the user
//!   has no session

use axum::response::Response;

use crate::hashing::{bucket_score, SCORE_SPAN};
use crate::split::types::SplitHandler;

/// One route's alternatives, compiled to `(upper_bound, handler)` pairs.
///
/// Bounds are strictly increasing and the last is exactly 100, so the
/// segments tile [0,100) with no gaps or overlaps. The first segment
/// covers `[0, w1)`, the second `[w1, w1+w2)`, and so on.
pub struct CompiledRoute {
    segments: Vec<(u32, SplitHandler)>,
}

/// Outcome of selecting an alternative for one request.
pub struct Selection<'a> {
    /// Index of the chosen alternative, in registration order.
    pub variant: usize,
    /// The user's score, or `None` when no identity token was available.
    pub score: Option<u32>,
    handler: &'a SplitHandler,
}

impl<'a> Selection<'a> {
    /// Invoke the chosen alternative and pass its response through.
    pub fn invoke(self) -> Response {
        (self.handler)()
    }
}

impl CompiledRoute {
    /// Prefix-sum `(weight, handler)` pairs into the bound table. Callers
    /// guarantee the weights sum to exactly [`SCORE_SPAN`].
    pub(crate) fn from_alternatives(alternatives: Vec<(u32, SplitHandler)>) -> Self {
        let mut running = 0;
        let segments = alternatives
            .into_iter()
            .map(|(weight, handler)| {
                running += weight;
                (running, handler)
            })
            .collect();
        debug_assert_eq!(running, SCORE_SPAN);
        Self { segments }
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The cumulative upper bounds, in registration order.
    pub fn bounds(&self) -> Vec<u32> {
        self.segments.iter().map(|(bound, _)| *bound).collect()
    }

    /// Choose the alternative for `token`.
    ///
    /// With a token, the first segment whose bound strictly exceeds the
    /// token's score wins. Without one, the first-registered alternative
    /// is the default; no request fails solely because no session exists.
    pub fn select(&self, token: Option<&str>) -> Selection<'_> {
        match token {
            Some(token) => {
                let score = bucket_score(token);
                let (variant, handler) = self.segment_for(score);
                Selection {
                    variant,
                    score: Some(score),
                    handler,
                }
            }
            None => Selection {
                variant: 0,
                score: None,
                handler: &self.segments[0].1,
            },
        }
    }

    /// Select and invoke in one step.
    pub fn dispatch(&self, token: Option<&str>) -> Response {
        self.select(token).invoke()
    }

    fn segment_for(&self, score: u32) -> (usize, &SplitHandler) {
        for (variant, (bound, handler)) in self.segments.iter().enumerate() {
            if score < *bound {
                return (variant, handler);
            }
        }
        // Scores are always below the final bound of 100; anything larger
        // maps to the last segment.
        let last = self.segments.len() - 1;
        (last, &self.segments[last].1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::types::handler;

    fn route_30_50_20() -> CompiledRoute {
        CompiledRoute::from_alternatives(vec![
            (30, handler(|| "A")),
            (50, handler(|| "B")),
            (20, handler(|| "C")),
        ])
    }

    #[test]
    fn test_bounds_are_strictly_increasing_to_span() {
        let route = route_30_50_20();
        assert_eq!(route.bounds(), vec![30, 80, 100]);
        let bounds = route.bounds();
        assert!(bounds.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(*bounds.last().unwrap(), SCORE_SPAN);
    }

    #[test]
    fn test_boundary_scores_select_the_right_variant() {
        let route = route_30_50_20();
        // Bounds [30, 80, 100] for variants [A, B, C].
        assert_eq!(route.segment_for(0).0, 0);
        assert_eq!(route.segment_for(29).0, 0);
        assert_eq!(route.segment_for(30).0, 1);
        assert_eq!(route.segment_for(79).0, 1);
        assert_eq!(route.segment_for(80).0, 2);
        assert_eq!(route.segment_for(99).0, 2);
    }

    #[test]
    fn test_token_scoring_35_selects_second_variant() {
        let route = route_30_50_20();
        // "user-32" hashes to score 35.
        let selection = route.select(Some("user-32"));
        assert_eq!(selection.score, Some(35));
        assert_eq!(selection.variant, 1);
    }

    #[test]
    fn test_boundary_tokens_match_the_score_table() {
        let route = route_30_50_20();
        // Tokens with known scores straddling each bound.
        for (token, score, variant) in [
            ("user-48", 29, 0),
            ("user-60", 30, 1),
            ("user-2", 79, 1),
            ("user-91", 80, 2),
            ("user-75", 99, 2),
        ] {
            let selection = route.select(Some(token));
            assert_eq!(selection.score, Some(score), "token {}", token);
            assert_eq!(selection.variant, variant, "token {}", token);
        }
    }

    #[test]
    fn test_missing_identity_selects_first_variant() {
        let route = route_30_50_20();
        let selection = route.select(None);
        assert_eq!(selection.variant, 0);
        assert_eq!(selection.score, None);
    }

    #[test]
    fn test_dispatch_returns_the_variant_response() {
        let route = route_30_50_20();
        let response = route.dispatch(None);
        assert!(response.status().is_success());
    }

    #[test]
    fn test_single_variant_takes_every_score() {
        let route = CompiledRoute::from_alternatives(vec![(100, handler(|| "only"))]);
        for score in [0, 50, 99] {
            assert_eq!(route.segment_for(score).0, 0);
        }
    }
}
