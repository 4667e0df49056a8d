//! Score accessor for application handlers.

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::hashing::bucket_score;
use crate::session::IdentityProvider;

/// Extracts the current user's bucket score.
///
/// Yields exactly the score the split dispatcher uses, computed from the
/// same identity provider, so ordinary handlers can branch consistently
/// with a split route's assignment. `None` when the request carries no
/// identity, or when the router was not built through
/// [`AxumBinder`](crate::http::AxumBinder) (no provider extension).
pub struct UserScore(pub Option<u32>);

impl<S> FromRequestParts<S> for UserScore
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let provider = parts.extensions.get::<Arc<dyn IdentityProvider>>().cloned();
        let score = provider
            .and_then(|p| p.current_token(parts))
            .map(|token| bucket_score(&token));
        Ok(UserScore(score))
    }
}
