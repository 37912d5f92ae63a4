//! Session accessor over the persisted credential.

use crate::{AuthError, Credential, PersistentStore};
use priceflow_commerce::AuthStatus;
use serde_json::Value;
use std::sync::Arc;

/// Key the credential is stored under.
pub const TOKEN_KEY: &str = "token";

/// Single accessor for the persisted bearer credential.
///
/// Cheap to clone; clones share the same backing store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn PersistentStore>,
}

impl Session {
    pub fn new(store: impl PersistentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_shared(store: Arc<dyn PersistentStore>) -> Self {
        Self { store }
    }

    /// The stored credential, if any.
    ///
    /// A value that is not a non-empty string is treated as absent.
    pub fn credential(&self) -> Result<Option<Credential>, AuthError> {
        match self.store.get(TOKEN_KEY)? {
            Some(Value::String(token)) => Ok(Credential::new(token).ok()),
            Some(_) => {
                tracing::warn!("ignoring non-string credential in store");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// `Authorization` header value for the stored credential.
    ///
    /// Storage failures read as no credential.
    pub fn bearer(&self) -> Option<String> {
        match self.credential() {
            Ok(credential) => credential.map(|c| c.bearer()),
            Err(e) => {
                tracing::warn!(error = %e, "could not read credential");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.bearer().is_some()
    }

    pub fn auth_status(&self) -> AuthStatus {
        AuthStatus::from_signed_in(self.is_authenticated())
    }

    /// Store a freshly issued token.
    pub fn login(&self, token: impl Into<String>) -> Result<Credential, AuthError> {
        let credential = Credential::new(token)?;
        self.store
            .set(TOKEN_KEY, Value::String(credential.as_str().to_string()))?;
        tracing::info!("credential stored");
        Ok(credential)
    }

    /// Forget the credential. Returns whether one was stored.
    pub fn clear(&self) -> Result<bool, AuthError> {
        self.store.delete(TOKEN_KEY)
    }

    /// Sign out locally.
    pub fn logout(&self) -> Result<bool, AuthError> {
        let removed = self.clear()?;
        if removed {
            tracing::info!("credential cleared");
        }
        Ok(removed)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde_json::json;

    #[test]
    fn test_login_then_logout() {
        let session = Session::new(MemoryStore::new());
        assert_eq!(session.auth_status(), AuthStatus::Anonymous);

        session.login("abc123").unwrap();
        assert_eq!(session.auth_status(), AuthStatus::Authenticated);
        assert_eq!(session.credential().unwrap().unwrap().as_str(), "abc123");

        assert!(session.logout().unwrap());
        assert!(!session.logout().unwrap());
        assert_eq!(session.bearer(), None);
    }

    #[test]
    fn test_clones_share_store() {
        let session = Session::new(MemoryStore::new());
        let other = session.clone();

        session.login("abc123").unwrap();
        assert!(other.is_authenticated());

        other.clear().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_empty_token_not_stored() {
        let session = Session::new(MemoryStore::new());
        assert!(matches!(session.login(""), Err(AuthError::EmptyToken)));
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_malformed_values_read_as_absent() {
        let store = Arc::new(MemoryStore::new());
        let session = Session::from_shared(store.clone());

        store.set(TOKEN_KEY, json!(42)).unwrap();
        assert!(session.credential().unwrap().is_none());

        store.set(TOKEN_KEY, json!("")).unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session::new(MemoryStore::new());
        session.login("secret-token").unwrap();
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}
