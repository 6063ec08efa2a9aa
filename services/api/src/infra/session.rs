//! Server-side session store.
//!
//! Sessions are opaque random tokens bound to a user id, held in-process.
//! They are ephemeral by design and do not survive a restart even when the
//! durable entity store is active.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use rand::RngExt;

/// Charset for session tokens (mixed-case alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Session token length in characters.
const TOKEN_LEN: usize = 48;

fn generate_token() -> String {
    let mut rng = rand::rng();
    (0..TOKEN_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

/// Token → user id map. Cheap to clone; clones share the same sessions.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, i32>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a new session for the user and return its token.
    pub fn create(&self, user_id: i32) -> String {
        let token = generate_token();
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token.clone(), user_id);
        token
    }

    /// Resolve a token to the bound user id.
    pub fn user_id(&self, token: &str) -> Option<i32> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .copied()
    }

    /// Revoke a session. Returns `true` if the token existed.
    pub fn revoke(&self, token: &str) -> bool {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(token)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_resolve_created_session() {
        let sessions = SessionStore::new();
        let token = sessions.create(42);
        assert_eq!(token.len(), TOKEN_LEN);
        assert_eq!(sessions.user_id(&token), Some(42));
    }

    #[test]
    fn should_not_resolve_unknown_token() {
        let sessions = SessionStore::new();
        assert_eq!(sessions.user_id("nope"), None);
    }

    #[test]
    fn should_revoke_session() {
        let sessions = SessionStore::new();
        let token = sessions.create(42);
        assert!(sessions.revoke(&token));
        assert_eq!(sessions.user_id(&token), None);
        assert!(!sessions.revoke(&token));
    }

    #[test]
    fn should_mint_distinct_tokens() {
        let sessions = SessionStore::new();
        let a = sessions.create(1);
        let b = sessions.create(1);
        assert_ne!(a, b);
        assert_eq!(sessions.user_id(&a), Some(1));
        assert_eq!(sessions.user_id(&b), Some(1));
    }
}
