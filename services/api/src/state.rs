use crate::infra::session::SessionStore;
use crate::infra::store::Store;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            sessions: SessionStore::new(),
        }
    }

    /// Handle to the selected storage backend; implements every store trait.
    pub fn store(&self) -> Store {
        self.store.clone()
    }
}
