//! Session-resolving identity extractor.
//!
//! Resolves the session token (cookie or bearer header) to an
//! [`ActorContext`] by looking up the server-side session and then the user
//! row. A session whose user no longer exists is treated as unauthenticated.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::domain::repository::UserStore as _;
use crate::domain::types::ActorContext;
use crate::error::ChitServiceError;
use crate::state::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "chit_session";

/// Pull the session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(str::to_owned);
    bearer.or_else(|| {
        CookieJar::from_headers(headers)
            .get(SESSION_COOKIE)
            .map(|c| c.value().to_owned())
    })
}

async fn resolve_actor(
    state: &AppState,
    token: Option<String>,
) -> Result<Option<ActorContext>, ChitServiceError> {
    let Some(token) = token else {
        return Ok(None);
    };
    let Some(user_id) = state.sessions.user_id(&token) else {
        return Ok(None);
    };
    // The session may outlive the user row; a dangling session does not
    // authenticate.
    match state.store.user(user_id).await? {
        Some(user) => Ok(Some(ActorContext {
            user_id: user.id,
            role: user.role,
        })),
        None => Ok(None),
    }
}

// axum-core defines these as `fn -> impl Future + Send` (not `async fn`).
// Extract header values synchronously, then return a 'static async move block.
impl FromRequestParts<AppState> for ActorContext {
    type Rejection = ChitServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = session_token(&parts.headers);
        let state = state.clone();
        async move {
            resolve_actor(&state, token)
                .await?
                .ok_or(ChitServiceError::Unauthenticated)
        }
    }
}

impl OptionalFromRequestParts<AppState> for ActorContext {
    type Rejection = ChitServiceError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Option<Self>, Self::Rejection>> + Send {
        let token = session_token(&parts.headers);
        let state = state.clone();
        async move { resolve_actor(&state, token).await }
    }
}
