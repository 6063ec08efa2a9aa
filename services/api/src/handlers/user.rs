use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use chitfund_domain::role::UserRole;

use crate::domain::types::{ActorContext, User};
use crate::error::ChitServiceError;
use crate::state::AppState;
use crate::usecase::auth::{ResetPasswordInput, ResetPasswordUseCase};
use crate::usecase::user::{
    ListCustomersUseCase, RegisterCustomerUseCase, RegisterInput, RegisterManagerUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Public user representation; the credential blob never leaves the service.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub role: UserRole,
    pub is_first_login: bool,
    pub manager_id: Option<i32>,
    #[serde(serialize_with = "chitfund_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            phone: user.phone,
            email: user.email,
            role: user.role,
            is_first_login: user.is_first_login,
            manager_id: user.manager_id,
            created_at: user.created_at,
        }
    }
}

// ── POST /register ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

/// Anonymous registration creates a manager; a manager-authenticated call
/// provisions a customer under that manager.
pub async fn register(
    actor: Option<ActorContext>,
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ChitServiceError> {
    let input = RegisterInput {
        username: body.username,
        password: body.password,
        name: body.name,
        phone: body.phone,
        email: body.email,
    };
    let user = match actor {
        Some(actor) => {
            let uc = RegisterCustomerUseCase {
                users: state.store(),
            };
            uc.execute(&actor, input).await?
        }
        None => {
            let uc = RegisterManagerUseCase {
                users: state.store(),
            };
            uc.execute(input).await?
        }
    };
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /users/{id}/reset-password ──────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn reset_password(
    actor: ActorContext,
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<UserResponse>, ChitServiceError> {
    let uc = ResetPasswordUseCase {
        users: state.store(),
    };
    let user = uc
        .execute(
            &actor,
            ResetPasswordInput {
                user_id,
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── GET /customers ───────────────────────────────────────────────────────────

pub async fn list_customers(
    actor: ActorContext,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ChitServiceError> {
    let uc = ListCustomersUseCase {
        users: state.store(),
    };
    let customers = uc.execute(&actor).await?;
    Ok(Json(customers.into_iter().map(UserResponse::from).collect()))
}
