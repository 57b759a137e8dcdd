//! HTTP Basic authentication for the admin endpoint.
//!
//! Credentials are checked against the static account table from
//! configuration. On success the username is attached to the request as
//! an [`AuthUser`] extension; otherwise the request is answered with a
//! `401` and a `WWW-Authenticate` challenge.

use std::collections::BTreeMap;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use subtle::ConstantTimeEq;

use crate::app_state::AppState;
use crate::error::ApiError;

/// Username of the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub String);

/// Extracts `(user, password)` from an `Authorization: Basic ...` header.
fn basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

/// Compared against when the user is unknown, so that case costs the same
/// as a wrong password.
const UNKNOWN_USER_SECRET: &str = "\u{0}unknown-user\u{0}";

/// Returns the username if the headers carry valid credentials.
#[must_use]
pub fn authenticate(headers: &HeaderMap, accounts: &BTreeMap<String, String>) -> Option<String> {
    let (user, password) = basic_credentials(headers)?;
    let expected = accounts.get(&user);
    let secret = expected.map_or(UNKNOWN_USER_SECRET, String::as_str);
    let matches = bool::from(password.as_bytes().ct_eq(secret.as_bytes()));
    (matches && expected.is_some()).then_some(user)
}

/// Axum middleware guarding routes behind basic auth.
///
/// # Errors
///
/// Returns [`ApiError::Unauthorized`] if credentials are missing or wrong.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(user) = authenticate(req.headers(), &state.admin_accounts) else {
        tracing::warn!(path = %req.uri().path(), "basic auth failed");
        return Err(ApiError::Unauthorized);
    };
    req.extensions_mut().insert(AuthUser(user));
    Ok(next.run(req).await)
}
