//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Public variants carry messages that
//! may be shown to the user; private ones are logged and replaced by a
//! generic apology.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::crypto::CryptoError;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    // ------------------------------------------------------------------
    // Public
    // ------------------------------------------------------------------
    #[error("name is required")]
    NameRequired,

    #[error("password is required")]
    PasswordRequired,

    #[error("password must be at least 8 characters long")]
    PasswordTooShort,

    #[error("email address is required")]
    EmailRequired,

    #[error("email address is not correctly formatted")]
    EmailInvalid,

    #[error("email address is already taken")]
    EmailTaken,

    #[error("password is incorrect")]
    PasswordIncorrect,

    /// Lookup found nothing
    #[error("no account exists with this email address")]
    UserNotFound,

    // ------------------------------------------------------------------
    // Private
    // ------------------------------------------------------------------
    #[error("id provided was invalid")]
    IdInvalid,

    #[error("remember token generated with too few bytes")]
    RememberTokenTooShort,

    #[error("remember token hash is required")]
    RememberHashRequired,

    /// Startup-fatal: the keyed-hash secret is missing
    #[error("missing required environment variables")]
    EnvironmentUnset,

    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::NameRequired
            | AuthError::PasswordRequired
            | AuthError::PasswordTooShort
            | AuthError::EmailRequired
            | AuthError::EmailInvalid => ErrorKind::UnprocessableEntity,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::PasswordIncorrect => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::IdInvalid => ErrorKind::BadRequest,
            AuthError::RememberTokenTooShort
            | AuthError::RememberHashRequired
            | AuthError::EnvironmentUnset
            | AuthError::Crypto(_)
            | AuthError::PasswordHash(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
            AuthError::Database(e) => database_kind(e),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Whether the message may be shown to the end user.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            AuthError::NameRequired
                | AuthError::PasswordRequired
                | AuthError::PasswordTooShort
                | AuthError::EmailRequired
                | AuthError::EmailInvalid
                | AuthError::EmailTaken
                | AuthError::PasswordIncorrect
                | AuthError::UserNotFound
        )
    }

    /// Lookups that found nothing, as opposed to failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AuthError::UserNotFound)
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        if self.is_public() {
            AppError::public(self.kind(), self.to_string())
        } else {
            AppError::private(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordIncorrect | AuthError::UserNotFound => {
                tracing::warn!(error = %self, "Failed login attempt");
            }
            _ if !self.is_public() => {
                tracing::error!(error = %self, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth validation error");
            }
        }
    }
}

/// Connection and pool failures are transient; anything else is a defect.
fn database_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::InternalServerError,
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::app_error::GENERIC_MESSAGE;

    #[test]
    fn test_public_errors_are_capitalized() {
        let app = AuthError::EmailTaken.to_app_error();
        assert_eq!(app.user_message(), "Email address is already taken.");
        assert_eq!(app.status_code(), 409);

        let app = AuthError::PasswordTooShort.to_app_error();
        assert_eq!(
            app.user_message(),
            "Password must be at least 8 characters long."
        );
    }

    #[test]
    fn test_private_errors_are_hidden() {
        for err in [
            AuthError::IdInvalid,
            AuthError::RememberTokenTooShort,
            AuthError::RememberHashRequired,
            AuthError::EnvironmentUnset,
        ] {
            assert!(!err.is_public());
            assert_eq!(err.to_app_error().user_message(), GENERIC_MESSAGE);
        }
    }

    #[test]
    fn test_not_found_is_distinct() {
        assert!(AuthError::UserNotFound.is_not_found());
        assert_eq!(AuthError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert!(!AuthError::Internal("boom".into()).is_not_found());
    }

    #[test]
    fn test_database_error_is_private() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        assert!(!err.is_public());
        assert!(err.kind().is_server_error());
    }

    #[test]
    fn test_only_connection_failures_are_unavailable() {
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AuthError::Database(sqlx::Error::PoolClosed).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        for err in [
            sqlx::Error::RowNotFound,
            sqlx::Error::ColumnNotFound("remember_hash".into()),
            sqlx::Error::Protocol("unexpected message".into()),
        ] {
            assert_eq!(
                AuthError::Database(err).status_code(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
