//! Identity token extraction.

use axum::http::header;
use axum::http::request::Parts;

/// Supplies the current request's identity token, if one is established.
///
/// Implementations inspect request metadata only; issuing or persisting
/// sessions is outside this crate. `None` means no identity exists for
/// the request, and dispatch falls back to the default variant.
pub trait IdentityProvider: Send + Sync {
    fn current_token(&self, parts: &Parts) -> Option<String>;
}

/// Reads the identity token from a named cookie.
#[derive(Debug, Clone)]
pub struct CookieIdentity {
    cookie_name: String,
}

impl CookieIdentity {
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }
}

impl IdentityProvider for CookieIdentity {
    fn current_token(&self, parts: &Parts) -> Option<String> {
        let raw = parts.headers.get(header::COOKIE)?.to_str().ok()?;
        for pair in raw.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            if name.trim() == self.cookie_name {
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                return Some(value.to_string());
            }
        }
        None
    }
}
