//! Shared fixtures: a MemStore-backed world built through the real usecases.

use chitfund_api::domain::types::{ActorContext, ChitGroup, ChitGroupMember, User};
use chitfund_api::infra::mem::MemStore;
use chitfund_api::usecase::chit_group::{CreateChitGroupInput, CreateChitGroupUseCase};
use chitfund_api::usecase::member::{AddMemberInput, AddMemberUseCase};
use chitfund_api::usecase::user::{
    RegisterCustomerUseCase, RegisterInput, RegisterManagerUseCase,
};
use chitfund_domain::role::UserRole;

pub const TEMP_PASSWORD: &str = "temp-pass-123";

pub fn manager_ctx(user: &User) -> ActorContext {
    ActorContext {
        user_id: user.id,
        role: UserRole::Manager,
    }
}

pub fn customer_ctx(user: &User) -> ActorContext {
    ActorContext {
        user_id: user.id,
        role: UserRole::Customer,
    }
}

fn register_input(username: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_owned(),
        password: TEMP_PASSWORD.to_owned(),
        name: username.to_owned(),
        phone: "555-0100".to_owned(),
        email: None,
    }
}

pub async fn register_manager(store: &MemStore, username: &str) -> User {
    RegisterManagerUseCase {
        users: store.clone(),
    }
    .execute(register_input(username))
    .await
    .unwrap()
}

pub async fn register_customer(store: &MemStore, manager: &User, username: &str) -> User {
    RegisterCustomerUseCase {
        users: store.clone(),
    }
    .execute(&manager_ctx(manager), register_input(username))
    .await
    .unwrap()
}

pub async fn create_group(store: &MemStore, manager: &User) -> ChitGroup {
    CreateChitGroupUseCase {
        groups: store.clone(),
    }
    .execute(
        &manager_ctx(manager),
        CreateChitGroupInput {
            name: "Gold Savers".to_owned(),
            value: 100_000,
            duration_months: 10,
            members_count: 5,
            start_date: "2024-01-01".parse().unwrap(),
        },
    )
    .await
    .unwrap()
}

pub async fn enroll(
    store: &MemStore,
    manager: &User,
    group: &ChitGroup,
    customer: &User,
) -> ChitGroupMember {
    AddMemberUseCase {
        groups: store.clone(),
        members: store.clone(),
        users: store.clone(),
    }
    .execute(
        &manager_ctx(manager),
        group.id,
        AddMemberInput {
            user_id: customer.id,
            join_date: None,
        },
    )
    .await
    .unwrap()
}
