//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Unique constraint on `users.email` (see migrations)
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// Unique constraint on `users.remember_hash`
const REMEMBER_HASH_UNIQUE_CONSTRAINT: &str = "users_remember_hash_key";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// A duplicate email surfaces as the same error the validator raises.
/// A duplicate remember hash is a private defect, as in the in-memory store.
fn map_write_error(err: sqlx::Error) -> AuthError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            match db.constraint() {
                Some(EMAIL_UNIQUE_CONSTRAINT) => return AuthError::EmailTaken,
                Some(REMEMBER_HASH_UNIQUE_CONSTRAINT) => {
                    return AuthError::Internal("duplicate remember hash".to_string());
                }
                _ => {}
            }
        }
    }
    AuthError::Database(err)
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &mut User) -> AuthResult<()> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO users (
                name,
                email,
                password_hash,
                remember_hash,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_hash)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        user.id = UserId::from_raw(id);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, remember_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, remember_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn find_by_remember_hash(&self, remember_hash: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, password_hash, remember_hash, created_at, updated_at
            FROM users
            WHERE remember_hash = $1
            "#,
        )
        .bind(remember_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                email = $3,
                password_hash = $4,
                remember_hash = $5,
                updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.get())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.remember_hash)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: UserId) -> AuthResult<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    password_hash: String,
    remember_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: UserId::from_raw(self.id),
            name: self.name,
            email: self.email,
            password: String::new(),
            password_hash: self.password_hash,
            remember: String::new(),
            remember_hash: self.remember_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use sqlx::error::{DatabaseError, ErrorKind};

    use super::*;

    /// Stand-in for a driver error carrying a unique violation.
    #[derive(Debug)]
    struct UniqueViolation(&'static str);

    impl fmt::Display for UniqueViolation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "duplicate key value violates unique constraint {:?}", self.0)
        }
    }

    impl StdError for UniqueViolation {}

    impl DatabaseError for UniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.0)
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    fn violation(constraint: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(UniqueViolation(constraint)))
    }

    #[test]
    fn test_duplicate_email_is_email_taken() {
        assert!(matches!(
            map_write_error(violation(EMAIL_UNIQUE_CONSTRAINT)),
            AuthError::EmailTaken
        ));
    }

    #[test]
    fn test_duplicate_remember_hash_is_private_internal() {
        let err = map_write_error(violation(REMEMBER_HASH_UNIQUE_CONSTRAINT));
        assert!(matches!(err, AuthError::Internal(_)));
        assert!(!err.is_public());
    }

    #[test]
    fn test_other_failures_stay_database_errors() {
        assert!(matches!(
            map_write_error(violation("users_pkey")),
            AuthError::Database(_)
        ));
        assert!(matches!(
            map_write_error(sqlx::Error::PoolTimedOut),
            AuthError::Database(_)
        ));
    }
}
