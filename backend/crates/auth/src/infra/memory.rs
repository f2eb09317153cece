//! In-Memory User Repository
//!
//! Same contract as the Postgres store, including the unique email and
//! remember-hash constraints. Ids increase monotonically and are never
//! reused.

use std::collections::BTreeMap;
use std::sync::Arc;

use kernel::id::UserId;
use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Store {
    last_id: i64,
    users: BTreeMap<UserId, User>,
}

impl Store {
    fn check_unique(&self, user: &User) -> AuthResult<()> {
        for existing in self.users.values().filter(|u| u.id != user.id) {
            if existing.email == user.email {
                return Err(AuthError::EmailTaken);
            }
            if !user.remember_hash.is_empty() && existing.remember_hash == user.remember_hash {
                return Err(AuthError::Internal(
                    "duplicate remember hash".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &mut User) -> AuthResult<()> {
        let mut store = self.store.write().await;
        store.check_unique(user)?;

        store.last_id += 1;
        user.id = UserId::from_raw(store.last_id);

        let mut stored = user.clone();
        stored.clear_password();
        stored.clear_remember();
        store.users.insert(stored.id, stored);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_remember_hash(&self, remember_hash: &str) -> AuthResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store
            .users
            .values()
            .find(|u| u.remember_hash == remember_hash)
            .cloned())
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut store = self.store.write().await;
        if !store.users.contains_key(&user.id) {
            return Err(AuthError::UserNotFound);
        }
        store.check_unique(user)?;

        let mut stored = user.clone();
        stored.clear_password();
        stored.clear_remember();
        store.users.insert(stored.id, stored);
        Ok(())
    }

    async fn delete(&self, id: UserId) -> AuthResult<()> {
        self.store.write().await.users.remove(&id);
        Ok(())
    }
}
