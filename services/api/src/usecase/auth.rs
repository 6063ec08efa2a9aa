use crate::domain::guard;
use crate::domain::repository::UserStore;
use crate::domain::types::{ActorContext, User, UserPatch};
use crate::domain::validate::validate_new_password;
use crate::error::ChitServiceError;
use crate::infra::session::SessionStore;
use crate::usecase::password::{hash_password, verify_password};

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: String,
}

pub struct LoginUseCase<U: UserStore> {
    pub users: U,
    pub sessions: SessionStore,
}

impl<U: UserStore> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ChitServiceError> {
        // Same error for unknown user and bad password; no username probing.
        let user = self
            .users
            .user_by_username(&input.username)
            .await?
            .ok_or(ChitServiceError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password) {
            return Err(ChitServiceError::InvalidCredentials);
        }

        let token = self.sessions.create(user.id);
        Ok(LoginOutput { user, token })
    }
}

// ── ResetPassword (first-login flow) ─────────────────────────────────────────

pub struct ResetPasswordInput {
    pub user_id: i32,
    pub current_password: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<U: UserStore> {
    pub users: U,
}

impl<U: UserStore> ResetPasswordUseCase<U> {
    pub async fn execute(
        &self,
        actor: &ActorContext,
        input: ResetPasswordInput,
    ) -> Result<User, ChitServiceError> {
        guard::require_self(actor, input.user_id)?;
        validate_new_password(&input.new_password)?;

        let user = self
            .users
            .user(input.user_id)
            .await?
            .ok_or(ChitServiceError::UserNotFound)?;

        // The current (possibly temporary) password gates the change.
        if !verify_password(&input.current_password, &user.password) {
            return Err(ChitServiceError::InvalidCredentials);
        }

        let patch = UserPatch {
            password: Some(hash_password(&input.new_password)?),
            is_first_login: Some(false),
            ..Default::default()
        };
        self.users
            .update_user(input.user_id, patch)
            .await?
            .ok_or(ChitServiceError::UserNotFound)
    }
}
