//! User Validator
//!
//! Runs the user pipeline in front of a [`UserRepository`] and forwards to
//! it only when every step passed. Lookups that need normalising or hashing
//! (by email, by remember token) go through here as well.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::validation::{self, Rule};
use platform::password::HashedPassword;

use crate::application::config::AuthConfig;
use crate::application::user_rules::{
    DEFAULT_REMEMBER, EMAIL_FORMAT, EMAIL_REQUIRED, EmailAvailable, HashPassword, HashRemember,
    ID_POSITIVE, NAME_REQUIRED, NORMALIZE_EMAIL, PASSWORD_HASH_REQUIRED, PASSWORD_MIN_LENGTH,
    PASSWORD_REQUIRED, REMEMBER_HASH_REQUIRED, REMEMBER_MIN_BYTES,
};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email;
use crate::error::{AuthError, AuthResult};

pub struct UserValidator<R> {
    repo: Arc<R>,
    hash_password: HashPassword,
    hash_remember: HashRemember,
    email_available: EmailAvailable<R>,
}

impl<R> UserValidator<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: &AuthConfig) -> AuthResult<Self> {
        Ok(Self {
            hash_password: HashPassword::new(config.password_hasher.clone()),
            hash_remember: HashRemember::new(config.keyed_hasher()?),
            email_available: EmailAvailable::new(repo.clone()),
            repo,
        })
    }

    pub(crate) fn create_chain(&self) -> [&dyn Rule<User, AuthError>; 13] {
        [
            &NAME_REQUIRED,
            &PASSWORD_REQUIRED,
            &PASSWORD_MIN_LENGTH,
            &self.hash_password,
            &PASSWORD_HASH_REQUIRED,
            &DEFAULT_REMEMBER,
            &REMEMBER_MIN_BYTES,
            &self.hash_remember,
            &REMEMBER_HASH_REQUIRED,
            &NORMALIZE_EMAIL,
            &EMAIL_REQUIRED,
            &EMAIL_FORMAT,
            &self.email_available,
        ]
    }

    // Password and remember token are optional here: their steps are
    // no-ops when the plaintext is empty. The stored hashes are not.
    pub(crate) fn update_chain(&self) -> [&dyn Rule<User, AuthError>; 11] {
        [
            &NAME_REQUIRED,
            &PASSWORD_MIN_LENGTH,
            &self.hash_password,
            &PASSWORD_HASH_REQUIRED,
            &REMEMBER_MIN_BYTES,
            &self.hash_remember,
            &REMEMBER_HASH_REQUIRED,
            &NORMALIZE_EMAIL,
            &EMAIL_REQUIRED,
            &EMAIL_FORMAT,
            &self.email_available,
        ]
    }

    /// Validate and insert. On success `user.id` is assigned and the
    /// plaintext password and remember token are gone.
    pub async fn create(&self, user: &mut User) -> AuthResult<()> {
        validation::run(user, &self.create_chain()).await?;
        self.repo.create(user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(())
    }

    pub async fn update(&self, user: &mut User) -> AuthResult<()> {
        validation::run(user, &self.update_chain()).await?;
        user.touch();
        self.repo.update(user).await
    }

    pub async fn delete(&self, id: UserId) -> AuthResult<()> {
        Self::require_id(id).await?;
        self.repo.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    pub async fn by_id(&self, id: UserId) -> AuthResult<User> {
        Self::require_id(id).await?;
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Case-insensitive: the address is normalised before lookup.
    pub async fn by_email(&self, address: &str) -> AuthResult<User> {
        self.repo
            .find_by_email(&email::normalize(address))
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Resolve a plaintext remember token. Only its digest reaches the store.
    pub async fn by_remember(&self, token: &str) -> AuthResult<User> {
        let digest = self.hash_remember.digest(token);
        self.repo
            .find_by_remember_hash(&digest)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Look the user up by email and verify `password` against the stored hash.
    pub async fn authenticate(&self, address: &str, password: &str) -> AuthResult<User> {
        let user = self.by_email(address).await?;
        let hashed = HashedPassword::from_phc_string(user.password_hash.as_str())?;

        if !hashed.verify(password) {
            return Err(AuthError::PasswordIncorrect);
        }
        Ok(user)
    }

    async fn require_id(id: UserId) -> AuthResult<()> {
        let mut candidate = User {
            id,
            ..Default::default()
        };
        let rules: [&dyn Rule<User, AuthError>; 1] = [&ID_POSITIVE];
        validation::run(&mut candidate, &rules).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::HmacKey;
    use crate::infra::memory::InMemoryUserRepository;
    use platform::crypto;
    use platform::password::PasswordHasher;

    fn config() -> AuthConfig {
        AuthConfig::new(HmacKey::new("test-hmac-key").unwrap())
            .with_password_hasher(PasswordHasher::with_cost(8, 1, 1).unwrap())
    }

    fn validator() -> UserValidator<InMemoryUserRepository> {
        UserValidator::new(Arc::new(InMemoryUserRepository::new()), &config()).unwrap()
    }

    fn position(names: &[&str], name: &str) -> usize {
        names.iter().position(|n| *n == name).unwrap()
    }

    #[test]
    fn test_create_chain_checks_required_before_length() {
        let v = validator();
        let names: Vec<&str> = v.create_chain().iter().map(|r| r.name()).collect();

        assert!(position(&names, "password_required") < position(&names, "password_min_length"));
        assert!(position(&names, "password_min_length") < position(&names, "hash_password"));
        assert!(position(&names, "hash_password") < position(&names, "password_hash_required"));
        assert!(position(&names, "normalize_email") < position(&names, "email_available"));
    }

    #[test]
    fn test_update_chain_makes_password_optional() {
        let v = validator();
        let names: Vec<&str> = v.update_chain().iter().map(|r| r.name()).collect();

        assert!(names.contains(&"name_required"));
        assert!(!names.contains(&"password_required"));
        assert!(!names.contains(&"default_remember"));
        assert!(position(&names, "hash_password") < position(&names, "password_hash_required"));
        assert!(names.contains(&"remember_hash_required"));
    }

    #[tokio::test]
    async fn test_update_without_password_hash_is_rejected() {
        let v = validator();
        let mut ann = User::new("Ann", "ann@example.com", "longenough1");
        v.create(&mut ann).await.unwrap();
        let stored_hash = ann.password_hash.clone();

        let mut stripped = User {
            id: ann.id,
            name: ann.name.clone(),
            email: ann.email.clone(),
            remember_hash: ann.remember_hash.clone(),
            ..Default::default()
        };
        assert!(matches!(
            v.update(&mut stripped).await,
            Err(AuthError::PasswordRequired)
        ));

        let stored = v.by_id(ann.id).await.unwrap();
        assert_eq!(stored.password_hash, stored_hash);
        assert!(v.authenticate("ann@example.com", "longenough1").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_without_remember_hash_is_rejected() {
        let v = validator();
        let mut ann = User::new("Ann", "ann@example.com", "longenough1");
        v.create(&mut ann).await.unwrap();

        ann.remember_hash.clear();
        assert!(matches!(
            v.update(&mut ann).await,
            Err(AuthError::RememberHashRequired)
        ));
    }

    #[tokio::test]
    async fn test_update_with_new_password_rehashes() {
        let v = validator();
        let mut ann = User::new("Ann", "ann@example.com", "longenough1");
        v.create(&mut ann).await.unwrap();

        ann.password = "evenlonger2".into();
        v.update(&mut ann).await.unwrap();

        assert!(ann.password.is_empty());
        assert!(v.authenticate("ann@example.com", "evenlonger2").await.is_ok());
        assert!(matches!(
            v.authenticate("ann@example.com", "longenough1").await,
            Err(AuthError::PasswordIncorrect)
        ));
    }

    #[tokio::test]
    async fn test_create_hashes_and_clears_password() {
        let v = validator();
        let mut user = User::new("Ann", "ann@example.com", "longenough1");

        v.create(&mut user).await.unwrap();

        assert!(user.id.is_assigned());
        assert!(user.password.is_empty());
        assert!(user.remember.is_empty());
        assert!(!user.password_hash.is_empty());
        assert_ne!(user.password_hash, "longenough1");
        assert!(!user.remember_hash.is_empty());

        let stored = v.by_id(user.id).await.unwrap();
        assert!(stored.password.is_empty());
        assert_eq!(stored.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn test_create_fails_fast_in_order() {
        let v = validator();

        let mut nameless = User::new("", "", "");
        assert!(matches!(
            v.create(&mut nameless).await,
            Err(AuthError::NameRequired)
        ));

        let mut empty_password = User::new("Ann", "ann@example.com", "");
        assert!(matches!(
            v.create(&mut empty_password).await,
            Err(AuthError::PasswordRequired)
        ));

        let mut short = User::new("Ann", "ann@example.com", "short");
        assert!(matches!(
            v.create(&mut short).await,
            Err(AuthError::PasswordTooShort)
        ));

        let mut no_email = User::new("Ann", "  ", "longenough1");
        assert!(matches!(
            v.create(&mut no_email).await,
            Err(AuthError::EmailRequired)
        ));

        let mut bad_email = User::new("Ann", "ann@localhost", "longenough1");
        assert!(matches!(
            v.create(&mut bad_email).await,
            Err(AuthError::EmailInvalid)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_short_supplied_token() {
        let v = validator();
        let mut user = User::new("Ann", "ann@example.com", "longenough1");
        user.remember = crypto::random_string(16).unwrap();

        assert!(matches!(
            v.create(&mut user).await,
            Err(AuthError::RememberTokenTooShort)
        ));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_taken_case_insensitively() {
        let v = validator();
        let mut first = User::new("Ann", "a@b.com", "longenough1");
        v.create(&mut first).await.unwrap();

        let mut second = User::new("Bob", "A@B.COM", "longenough2");
        assert!(matches!(
            v.create(&mut second).await,
            Err(AuthError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_update_with_own_email_succeeds() {
        let v = validator();
        let mut user = User::new("Ann", "ann@example.com", "longenough1");
        v.create(&mut user).await.unwrap();
        let hash_before = user.password_hash.clone();

        user.name = "Ann Smith".into();
        v.update(&mut user).await.unwrap();

        let stored = v.by_id(user.id).await.unwrap();
        assert_eq!(stored.name, "Ann Smith");
        assert_eq!(stored.password_hash, hash_before);
    }

    #[tokio::test]
    async fn test_update_to_someone_elses_email_is_taken() {
        let v = validator();
        let mut ann = User::new("Ann", "ann@example.com", "longenough1");
        let mut bob = User::new("Bob", "bob@example.com", "longenough2");
        v.create(&mut ann).await.unwrap();
        v.create(&mut bob).await.unwrap();

        bob.email = "ANN@example.com".into();
        assert!(matches!(v.update(&mut bob).await, Err(AuthError::EmailTaken)));
    }

    #[tokio::test]
    async fn test_by_remember_finds_created_user() {
        let v = validator();
        let token = crypto::remember_token().unwrap();
        let mut user = User::new("Ann", "ann@example.com", "longenough1");
        user.remember = token.clone();
        v.create(&mut user).await.unwrap();

        let found = v.by_remember(&token).await.unwrap();
        assert_eq!(found.id, user.id);

        let other = crypto::remember_token().unwrap();
        assert!(matches!(
            v.by_remember(&other).await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_requires_positive_id() {
        let v = validator();
        for raw in [0, -1] {
            assert!(matches!(
                v.delete(UserId::from_raw(raw)).await,
                Err(AuthError::IdInvalid)
            ));
        }
        assert!(matches!(
            v.by_id(UserId::from_raw(0)).await,
            Err(AuthError::IdInvalid)
        ));
    }

    #[tokio::test]
    async fn test_delete_then_lookup_is_not_found() {
        let v = validator();
        let mut user = User::new("Ann", "ann@example.com", "longenough1");
        v.create(&mut user).await.unwrap();

        v.delete(user.id).await.unwrap();

        assert!(matches!(v.by_id(user.id).await, Err(AuthError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_ann_signs_up_and_authenticates() {
        let v = validator();
        let mut ann = User::new("Ann", "ANN@Example.com ", "longenough1");
        v.create(&mut ann).await.unwrap();

        let stored = v.by_id(ann.id).await.unwrap();
        assert_eq!(stored.email, "ann@example.com");

        let user = v
            .authenticate("ann@example.com", "longenough1")
            .await
            .unwrap();
        assert_eq!(user.id, ann.id);

        assert!(matches!(
            v.authenticate("ann@example.com", "wrongpassword").await,
            Err(AuthError::PasswordIncorrect)
        ));
        assert!(matches!(
            v.authenticate("nobody@example.com", "longenough1").await,
            Err(AuthError::UserNotFound)
        ));
    }
}
