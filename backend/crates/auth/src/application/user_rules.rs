//! User Validation Rules
//!
//! Each rule is one step of the user pipeline. Pure steps are plain
//! functions wrapped in [`Check`]; steps that need a hasher or the store
//! are small structs.
//!
//! Several rules only act when their input is non-empty. The ordering
//! constraint that matters: `password_required` must run before
//! `password_min_length`, or an empty password slips through.

use std::sync::Arc;

use async_trait::async_trait;
use kernel::validation::{Check, Rule};
use platform::crypto::{self, KeyedHasher, REMEMBER_TOKEN_BYTES};
use platform::password::PasswordHasher;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email;
use crate::error::{AuthError, AuthResult};

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

type UserCheckFn = fn(&mut User) -> AuthResult<()>;

/// A pure user validation step
pub type UserCheck = Check<UserCheckFn>;

pub static ID_POSITIVE: UserCheck = Check::new("id_positive", id_positive as UserCheckFn);
pub static NAME_REQUIRED: UserCheck = Check::new("name_required", name_required as UserCheckFn);
pub static PASSWORD_REQUIRED: UserCheck =
    Check::new("password_required", password_required as UserCheckFn);
pub static PASSWORD_MIN_LENGTH: UserCheck =
    Check::new("password_min_length", password_min_length as UserCheckFn);
pub static PASSWORD_HASH_REQUIRED: UserCheck =
    Check::new("password_hash_required", password_hash_required as UserCheckFn);
pub static DEFAULT_REMEMBER: UserCheck =
    Check::new("default_remember", default_remember as UserCheckFn);
pub static REMEMBER_MIN_BYTES: UserCheck =
    Check::new("remember_min_bytes", remember_min_bytes as UserCheckFn);
pub static REMEMBER_HASH_REQUIRED: UserCheck =
    Check::new("remember_hash_required", remember_hash_required as UserCheckFn);
pub static NORMALIZE_EMAIL: UserCheck =
    Check::new("normalize_email", normalize_email as UserCheckFn);
pub static EMAIL_REQUIRED: UserCheck = Check::new("email_required", email_required as UserCheckFn);
pub static EMAIL_FORMAT: UserCheck = Check::new("email_format", email_format as UserCheckFn);

fn id_positive(user: &mut User) -> AuthResult<()> {
    if !user.id.is_assigned() {
        return Err(AuthError::IdInvalid);
    }
    Ok(())
}

fn name_required(user: &mut User) -> AuthResult<()> {
    if user.name.is_empty() {
        return Err(AuthError::NameRequired);
    }
    Ok(())
}

fn password_required(user: &mut User) -> AuthResult<()> {
    if user.password.is_empty() {
        return Err(AuthError::PasswordRequired);
    }
    Ok(())
}

// Empty passwords pass here; PASSWORD_REQUIRED owns that case on create.
fn password_min_length(user: &mut User) -> AuthResult<()> {
    if user.password.is_empty() {
        return Ok(());
    }
    if user.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort);
    }
    Ok(())
}

// A user without a hash could never sign in again.
fn password_hash_required(user: &mut User) -> AuthResult<()> {
    if user.password_hash.is_empty() {
        return Err(AuthError::PasswordRequired);
    }
    Ok(())
}

fn default_remember(user: &mut User) -> AuthResult<()> {
    if user.remember.is_empty() {
        user.remember = crypto::remember_token()?;
    }
    Ok(())
}

fn remember_min_bytes(user: &mut User) -> AuthResult<()> {
    if user.remember.is_empty() {
        return Ok(());
    }
    if crypto::decoded_len(&user.remember)? < REMEMBER_TOKEN_BYTES {
        return Err(AuthError::RememberTokenTooShort);
    }
    Ok(())
}

fn remember_hash_required(user: &mut User) -> AuthResult<()> {
    if user.remember_hash.is_empty() {
        return Err(AuthError::RememberHashRequired);
    }
    Ok(())
}

fn normalize_email(user: &mut User) -> AuthResult<()> {
    user.email = email::normalize(&user.email);
    Ok(())
}

fn email_required(user: &mut User) -> AuthResult<()> {
    if user.email.is_empty() {
        return Err(AuthError::EmailRequired);
    }
    Ok(())
}

fn email_format(user: &mut User) -> AuthResult<()> {
    if !email::is_valid_format(&user.email) {
        return Err(AuthError::EmailInvalid);
    }
    Ok(())
}

/// Replaces a non-empty plaintext password with its Argon2id hash.
pub struct HashPassword {
    hasher: PasswordHasher,
}

impl HashPassword {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self { hasher }
    }
}

#[async_trait]
impl Rule<User, AuthError> for HashPassword {
    fn name(&self) -> &'static str {
        "hash_password"
    }

    async fn apply(&self, user: &mut User) -> AuthResult<()> {
        if user.password.is_empty() {
            return Ok(());
        }
        user.password_hash = self.hasher.hash(&user.password)?.into_phc_string();
        user.clear_password();
        Ok(())
    }
}

/// Replaces a non-empty plaintext remember token with its keyed hash.
pub struct HashRemember {
    hasher: KeyedHasher,
}

impl HashRemember {
    pub fn new(hasher: KeyedHasher) -> Self {
        Self { hasher }
    }

    pub fn digest(&self, token: &str) -> String {
        self.hasher.hash(token)
    }
}

#[async_trait]
impl Rule<User, AuthError> for HashRemember {
    fn name(&self) -> &'static str {
        "hash_remember"
    }

    async fn apply(&self, user: &mut User) -> AuthResult<()> {
        if user.remember.is_empty() {
            return Ok(());
        }
        user.remember_hash = self.digest(&user.remember);
        user.clear_remember();
        Ok(())
    }
}

/// Rejects an email already owned by a different user.
///
/// This is a read-then-write check: two concurrent signups can both pass
/// it. The store's unique constraint is what finally rejects the second.
pub struct EmailAvailable<R> {
    repo: Arc<R>,
}

impl<R> EmailAvailable<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl<R> Rule<User, AuthError> for EmailAvailable<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "email_available"
    }

    async fn apply(&self, user: &mut User) -> AuthResult<()> {
        match self.repo.find_by_email(&user.email).await? {
            None => Ok(()),
            Some(existing) if existing.id == user.id => Ok(()),
            Some(_) => Err(AuthError::EmailTaken),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;
    use kernel::validation::run;

    async fn apply(rule: &dyn Rule<User, AuthError>, user: &mut User) -> AuthResult<()> {
        run(user, &[rule]).await
    }

    #[tokio::test]
    async fn test_password_min_length_counts_chars() {
        let mut user = User::new("Ann", "ann@x.io", "пароль12");
        assert!(apply(&PASSWORD_MIN_LENGTH, &mut user).await.is_ok());

        user.password = "short".into();
        assert!(matches!(
            apply(&PASSWORD_MIN_LENGTH, &mut user).await,
            Err(AuthError::PasswordTooShort)
        ));
    }

    #[tokio::test]
    async fn test_password_min_length_skips_empty() {
        let mut user = User::new("Ann", "ann@x.io", "");
        assert!(apply(&PASSWORD_MIN_LENGTH, &mut user).await.is_ok());
        assert!(matches!(
            apply(&PASSWORD_REQUIRED, &mut user).await,
            Err(AuthError::PasswordRequired)
        ));
    }

    #[tokio::test]
    async fn test_password_hash_required() {
        let mut user = User::new("Ann", "ann@x.io", "");
        assert!(matches!(
            apply(&PASSWORD_HASH_REQUIRED, &mut user).await,
            Err(AuthError::PasswordRequired)
        ));

        user.password_hash = "$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA".into();
        assert!(apply(&PASSWORD_HASH_REQUIRED, &mut user).await.is_ok());
    }

    #[tokio::test]
    async fn test_id_positive() {
        let mut user = User::default();
        assert!(matches!(
            apply(&ID_POSITIVE, &mut user).await,
            Err(AuthError::IdInvalid)
        ));

        user.id = UserId::from_raw(-3);
        assert!(apply(&ID_POSITIVE, &mut user).await.is_err());

        user.id = UserId::from_raw(1);
        assert!(apply(&ID_POSITIVE, &mut user).await.is_ok());
    }

    #[tokio::test]
    async fn test_default_remember_only_fills_empty() {
        let mut user = User::default();
        apply(&DEFAULT_REMEMBER, &mut user).await.unwrap();
        assert_eq!(
            crypto::decoded_len(&user.remember).unwrap(),
            REMEMBER_TOKEN_BYTES
        );

        user.remember = "keep-me".into();
        apply(&DEFAULT_REMEMBER, &mut user).await.unwrap();
        assert_eq!(user.remember, "keep-me");
    }

    #[tokio::test]
    async fn test_short_remember_token_is_rejected() {
        let mut user = User {
            remember: crypto::random_string(32).unwrap(),
            ..Default::default()
        };
        assert!(matches!(
            apply(&REMEMBER_MIN_BYTES, &mut user).await,
            Err(AuthError::RememberTokenTooShort)
        ));

        user.remember = crypto::remember_token().unwrap();
        assert!(apply(&REMEMBER_MIN_BYTES, &mut user).await.is_ok());
    }

    #[tokio::test]
    async fn test_hash_remember_clears_plaintext() {
        let rule = HashRemember::new(KeyedHasher::new(b"secret").unwrap());
        let token = crypto::remember_token().unwrap();
        let mut user = User {
            remember: token.clone(),
            ..Default::default()
        };

        apply(&rule, &mut user).await.unwrap();

        assert!(user.remember.is_empty());
        assert_eq!(user.remember_hash, rule.digest(&token));
        assert_ne!(user.remember_hash, token);
    }

    #[tokio::test]
    async fn test_email_steps() {
        let mut user = User::new("Ann", "  ANN@Example.com ", "longenough1");
        apply(&NORMALIZE_EMAIL, &mut user).await.unwrap();
        assert_eq!(user.email, "ann@example.com");
        assert!(apply(&EMAIL_FORMAT, &mut user).await.is_ok());

        user.email = "   ".into();
        apply(&NORMALIZE_EMAIL, &mut user).await.unwrap();
        assert!(matches!(
            apply(&EMAIL_REQUIRED, &mut user).await,
            Err(AuthError::EmailRequired)
        ));

        user.email = "not-an-email".into();
        assert!(matches!(
            apply(&EMAIL_FORMAT, &mut user).await,
            Err(AuthError::EmailInvalid)
        ));
    }
}
