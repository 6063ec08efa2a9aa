use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::error::ChitServiceError;
use crate::handlers::user::UserResponse;
use crate::identity::{SESSION_COOKIE, session_token};
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase};

/// Cookie Max-Age in seconds (7 days).
const SESSION_COOKIE_MAX_AGE: i64 = 604_800;

fn set_session_cookie(jar: CookieJar, value: String) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

fn clear_session_cookie(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

// ── POST /login ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    /// Session token, also set as the session cookie. API clients that cannot
    /// hold cookies send it as `Authorization: Bearer`.
    pub token: String,
    pub user: UserResponse,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ChitServiceError> {
    let uc = LoginUseCase {
        users: state.store(),
        sessions: state.sessions.clone(),
    };
    let out = uc
        .execute(LoginInput {
            username: body.username,
            password: body.password,
        })
        .await?;

    let jar = set_session_cookie(jar, out.token.clone());
    let body = LoginResponse {
        token: out.token,
        user: out.user.into(),
    };
    Ok((StatusCode::OK, jar, Json(body)))
}

// ── POST /logout ─────────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        state.sessions.revoke(&token);
    }
    (StatusCode::NO_CONTENT, clear_session_cookie(jar))
}
