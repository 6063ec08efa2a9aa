use crate::domain::guard;
use crate::domain::repository::UserStore;
use crate::domain::types::{ActorContext, NewUser, User};
use crate::domain::validate::validate_registration;
use crate::error::ChitServiceError;
use crate::usecase::password::hash_password;

// ── Registration input shared by both flows ──────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
}

// ── RegisterManager (anonymous) ──────────────────────────────────────────────

pub struct RegisterManagerUseCase<U: UserStore> {
    pub users: U,
}

impl<U: UserStore> RegisterManagerUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ChitServiceError> {
        validate_registration(&input.username, &input.password, &input.name, &input.phone)?;
        let user = NewUser {
            username: input.username,
            password: hash_password(&input.password)?,
            name: input.name,
            phone: input.phone,
            email: input.email,
            role: chitfund_domain::role::UserRole::Manager,
            is_first_login: false,
            manager_id: None,
        };
        self.users
            .create_user(user)
            .await?
            .ok_or(ChitServiceError::UsernameTaken)
    }
}

// ── RegisterCustomer (manager-provisioned) ───────────────────────────────────

pub struct RegisterCustomerUseCase<U: UserStore> {
    pub users: U,
}

impl<U: UserStore> RegisterCustomerUseCase<U> {
    /// Provision a customer account under the acting manager. The password is
    /// temporary: the account starts with `is_first_login = true` and the
    /// customer must change it through the reset flow.
    pub async fn execute(
        &self,
        actor: &ActorContext,
        input: RegisterInput,
    ) -> Result<User, ChitServiceError> {
        guard::require_manager(actor)?;
        validate_registration(&input.username, &input.password, &input.name, &input.phone)?;
        let user = NewUser {
            username: input.username,
            password: hash_password(&input.password)?,
            name: input.name,
            phone: input.phone,
            email: input.email,
            role: chitfund_domain::role::UserRole::Customer,
            is_first_login: true,
            manager_id: Some(actor.user_id),
        };
        self.users
            .create_user(user)
            .await?
            .ok_or(ChitServiceError::UsernameTaken)
    }
}

// ── ListCustomers ────────────────────────────────────────────────────────────

pub struct ListCustomersUseCase<U: UserStore> {
    pub users: U,
}

impl<U: UserStore> ListCustomersUseCase<U> {
    /// Always scoped to the acting manager; there is no global listing.
    pub async fn execute(&self, actor: &ActorContext) -> Result<Vec<User>, ChitServiceError> {
        guard::require_manager(actor)?;
        self.users.customers_by_manager(actor.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::mem::MemStore;
    use chitfund_domain::role::UserRole;

    fn input(username: &str) -> RegisterInput {
        RegisterInput {
            username: username.to_owned(),
            password: "temp-pass-123".to_owned(),
            name: "Test User".to_owned(),
            phone: "555-0100".to_owned(),
            email: None,
        }
    }

    fn manager_actor(id: i32) -> ActorContext {
        ActorContext {
            user_id: id,
            role: UserRole::Manager,
        }
    }

    #[tokio::test]
    async fn should_register_manager_without_manager_id() {
        let uc = RegisterManagerUseCase {
            users: MemStore::new(),
        };
        let user = uc.execute(input("boss")).await.unwrap();
        assert_eq!(user.role, UserRole::Manager);
        assert!(user.manager_id.is_none());
        assert!(!user.is_first_login);
        // Cleartext never stored.
        assert_ne!(user.password, "temp-pass-123");
    }

    #[tokio::test]
    async fn should_register_customer_under_acting_manager() {
        let store = MemStore::new();
        let uc = RegisterCustomerUseCase {
            users: store.clone(),
        };
        let user = uc.execute(&manager_actor(7), input("ravi")).await.unwrap();
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.manager_id, Some(7));
        assert!(user.is_first_login);
    }

    #[tokio::test]
    async fn should_reject_customer_registration_by_customer() {
        let uc = RegisterCustomerUseCase {
            users: MemStore::new(),
        };
        let actor = ActorContext {
            user_id: 3,
            role: UserRole::Customer,
        };
        let result = uc.execute(&actor, input("ravi")).await;
        assert!(matches!(result, Err(ChitServiceError::Forbidden)));
    }

    #[tokio::test]
    async fn should_reject_duplicate_username_with_conflict() {
        let store = MemStore::new();
        let uc = RegisterManagerUseCase {
            users: store.clone(),
        };
        uc.execute(input("boss")).await.unwrap();
        let result = uc.execute(input("boss")).await;
        assert!(matches!(result, Err(ChitServiceError::UsernameTaken)));
    }

    #[tokio::test]
    async fn should_reject_invalid_registration_fields() {
        let uc = RegisterManagerUseCase {
            users: MemStore::new(),
        };
        let result = uc
            .execute(RegisterInput {
                username: "x".to_owned(),
                password: "short".to_owned(),
                name: String::new(),
                phone: String::new(),
                email: None,
            })
            .await;
        match result {
            Err(ChitServiceError::Validation(fields)) => assert_eq!(fields.len(), 4),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_list_only_own_customers() {
        let store = MemStore::new();
        let register = RegisterCustomerUseCase {
            users: store.clone(),
        };
        register.execute(&manager_actor(1), input("c1")).await.unwrap();
        register.execute(&manager_actor(2), input("c2")).await.unwrap();

        let list = ListCustomersUseCase {
            users: store.clone(),
        };
        let mine = list.execute(&manager_actor(1)).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].username, "c1");
    }

    #[tokio::test]
    async fn should_forbid_customer_listing_for_customers() {
        let list = ListCustomersUseCase {
            users: MemStore::new(),
        };
        let actor = ActorContext {
            user_id: 3,
            role: UserRole::Customer,
        };
        assert!(matches!(
            list.execute(&actor).await,
            Err(ChitServiceError::Forbidden)
        ));
    }
}
