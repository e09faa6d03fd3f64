//! In-memory session store.
//!
//! Sessions are keyed per session id and accessed only by the request that
//! owns the cookie, so a single `RwLock` over the map is the only
//! synchronization the server needs.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::SessionStoreError;
use crate::session::{Session, SessionId, SessionState};
use crate::user::User;

/// Server-side session store, shared across request handlers.
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh anonymous session and returns its id.
    pub async fn create(&self) -> SessionId {
        let id = SessionId::generate();
        let session = Session::new(id.clone());
        self.inner.write().await.insert(id.clone(), session);
        tracing::debug!(session_id = %id, "created session");
        id
    }

    /// Returns a snapshot of the session, if it exists.
    pub async fn get(&self, id: &SessionId) -> Option<Session> {
        self.inner.read().await.get(id).cloned()
    }

    /// Returns the authentication state for the given id.
    ///
    /// An unknown id is anonymous: the cookie is stale and the client will
    /// be given a fresh session.
    pub async fn state(&self, id: &SessionId) -> SessionState {
        match self.inner.read().await.get(id) {
            Some(session) => session.state(),
            None => SessionState::Anonymous,
        }
    }

    /// Transitions the session to authenticated with the given user and
    /// exchanged tokens.
    pub async fn authenticate(
        &self,
        id: &SessionId,
        user: User,
        access_token: String,
        refresh_token: Option<String>,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionStoreError::NotFound { id: id.clone() })?;
        session.authenticate(user, access_token, refresh_token);
        Ok(())
    }

    /// Records a pending post-login redirect target, first capture wins.
    pub async fn capture_redirect_target(
        &self,
        id: &SessionId,
        path: &str,
    ) -> Result<(), SessionStoreError> {
        let mut sessions = self.inner.write().await;
        let session = sessions
            .get_mut(id)
            .ok_or_else(|| SessionStoreError::NotFound { id: id.clone() })?;
        session.capture_redirect_target(path);
        Ok(())
    }

    /// Consumes the pending redirect target, if any.
    ///
    /// The read-and-clear happens under the write lock, so concurrent
    /// callbacks can never both observe the same target.
    pub async fn take_redirect_target(&self, id: &SessionId) -> Option<String> {
        self.inner
            .write()
            .await
            .get_mut(id)
            .and_then(Session::take_redirect_target)
    }

    /// Destroys the session record.
    pub async fn destroy(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        match self.inner.write().await.remove(id) {
            Some(_) => {
                tracing::debug!(session_id = %id, "destroyed session");
                Ok(())
            }
            None => Err(SessionStoreError::NotFound { id: id.clone() }),
        }
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Whether the store holds no sessions.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jane() -> User {
        User::new("Jane Doe", "jane@example.com")
    }

    #[tokio::test]
    async fn create_yields_anonymous_session() {
        let store = SessionStore::new();
        let id = store.create().await;

        assert_eq!(store.state(&id).await, SessionState::Anonymous);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_id_is_anonymous() {
        let store = SessionStore::new();
        let id = SessionId::generate();
        assert_eq!(store.state(&id).await, SessionState::Anonymous);
        assert!(store.get(&id).await.is_none());
    }

    #[tokio::test]
    async fn authenticate_sets_user_and_tokens() {
        let store = SessionStore::new();
        let id = store.create().await;

        store
            .authenticate(&id, jane(), "access".to_string(), None)
            .await
            .expect("authenticate");

        assert_eq!(store.state(&id).await, SessionState::Authenticated);
        let session = store.get(&id).await.expect("session");
        assert_eq!(session.user(), Some(&jane()));
        assert_eq!(session.access_token(), Some("access"));
    }

    #[tokio::test]
    async fn authenticate_unknown_session_fails() {
        let store = SessionStore::new();
        let id = SessionId::generate();

        let err = store
            .authenticate(&id, jane(), "access".to_string(), None)
            .await
            .expect_err("should fail");
        assert_eq!(err, SessionStoreError::NotFound { id });
    }

    #[tokio::test]
    async fn redirect_target_capture_and_consume() {
        let store = SessionStore::new();
        let id = store.create().await;

        store
            .capture_redirect_target(&id, "/courses")
            .await
            .expect("capture");
        store
            .capture_redirect_target(&id, "/courseworks")
            .await
            .expect("capture");

        assert_eq!(
            store.take_redirect_target(&id).await.as_deref(),
            Some("/courses")
        );
        assert_eq!(store.take_redirect_target(&id).await, None);
    }

    #[tokio::test]
    async fn destroy_removes_session() {
        let store = SessionStore::new();
        let id = store.create().await;

        store.destroy(&id).await.expect("destroy");
        assert!(store.is_empty().await);
        assert_eq!(store.state(&id).await, SessionState::Anonymous);
    }

    #[tokio::test]
    async fn destroy_unknown_session_fails() {
        let store = SessionStore::new();
        let id = SessionId::generate();
        assert!(store.destroy(&id).await.is_err());
    }
}
