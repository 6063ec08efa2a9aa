//! Login, session resolution, and the first-login reset flow.

use chitfund_api::error::ChitServiceError;
use chitfund_api::infra::mem::MemStore;
use chitfund_api::infra::session::SessionStore;
use chitfund_api::usecase::auth::{
    LoginInput, LoginUseCase, ResetPasswordInput, ResetPasswordUseCase,
};
use chitfund_api::usecase::password::{hash_password, verify_password};

use crate::helpers::*;

fn login_uc(store: &MemStore, sessions: &SessionStore) -> LoginUseCase<MemStore> {
    LoginUseCase {
        users: store.clone(),
        sessions: sessions.clone(),
    }
}

#[tokio::test]
async fn should_hash_same_password_to_distinct_verifiable_strings() {
    let a = hash_password(TEMP_PASSWORD).unwrap();
    let b = hash_password(TEMP_PASSWORD).unwrap();
    assert_ne!(a, b);
    assert!(verify_password(TEMP_PASSWORD, &a));
    assert!(verify_password(TEMP_PASSWORD, &b));
    assert!(!verify_password("not-the-password", &a));
}

#[tokio::test]
async fn should_bind_session_to_user_on_login() {
    let store = MemStore::new();
    let sessions = SessionStore::new();
    let mgr = register_manager(&store, "boss").await;

    let out = login_uc(&store, &sessions)
        .execute(LoginInput {
            username: "boss".to_owned(),
            password: TEMP_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    assert_eq!(out.user.id, mgr.id);
    assert_eq!(sessions.user_id(&out.token), Some(mgr.id));

    // Revocation kills the session.
    assert!(sessions.revoke(&out.token));
    assert_eq!(sessions.user_id(&out.token), None);
}

#[tokio::test]
async fn should_run_full_first_login_reset_flow() {
    let store = MemStore::new();
    let sessions = SessionStore::new();
    let mgr = register_manager(&store, "boss").await;
    let cust = register_customer(&store, &mgr, "ravi").await;
    assert!(cust.is_first_login);

    // Customer logs in with the temporary password.
    let login = login_uc(&store, &sessions)
        .execute(LoginInput {
            username: "ravi".to_owned(),
            password: TEMP_PASSWORD.to_owned(),
        })
        .await
        .unwrap();
    assert!(login.user.is_first_login);

    // Reset with the correct current password.
    let reset = ResetPasswordUseCase {
        users: store.clone(),
    };
    let updated = reset
        .execute(
            &customer_ctx(&cust),
            ResetPasswordInput {
                user_id: cust.id,
                current_password: TEMP_PASSWORD.to_owned(),
                new_password: "chosen-by-ravi".to_owned(),
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_first_login);

    // Old password is dead, new one logs in.
    let old = login_uc(&store, &sessions)
        .execute(LoginInput {
            username: "ravi".to_owned(),
            password: TEMP_PASSWORD.to_owned(),
        })
        .await;
    assert!(matches!(old, Err(ChitServiceError::InvalidCredentials)));

    let fresh = login_uc(&store, &sessions)
        .execute(LoginInput {
            username: "ravi".to_owned(),
            password: "chosen-by-ravi".to_owned(),
        })
        .await
        .unwrap();
    assert!(!fresh.user.is_first_login);
}

#[tokio::test]
async fn should_not_let_one_customer_reset_anothers_password() {
    let store = MemStore::new();
    let mgr = register_manager(&store, "boss").await;
    let ravi = register_customer(&store, &mgr, "ravi").await;
    let sita = register_customer(&store, &mgr, "sita").await;

    let reset = ResetPasswordUseCase {
        users: store.clone(),
    };
    let result = reset
        .execute(
            &customer_ctx(&sita),
            ResetPasswordInput {
                user_id: ravi.id,
                current_password: TEMP_PASSWORD.to_owned(),
                new_password: "stolen-account".to_owned(),
            },
        )
        .await;
    assert!(matches!(result, Err(ChitServiceError::Forbidden)));
}
