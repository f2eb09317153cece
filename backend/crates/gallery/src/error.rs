//! Gallery Error Types
//!
//! Gallery-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Gallery-specific result type alias
pub type GalleryResult<T> = Result<T, GalleryError>;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("gallery title is required")]
    TitleRequired,

    /// Missing, unknown, or not owned by the requester
    #[error("gallery does not exist")]
    GalleryNotFound,

    #[error("image does not exist")]
    ImageNotFound,

    #[error("user id is required for each gallery")]
    OwnerRequired,

    #[error("id provided was invalid")]
    IdInvalid,

    #[error("Image read error: {0}")]
    Io(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GalleryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GalleryError::TitleRequired => ErrorKind::UnprocessableEntity,
            GalleryError::GalleryNotFound | GalleryError::ImageNotFound => ErrorKind::NotFound,
            GalleryError::OwnerRequired | GalleryError::IdInvalid => ErrorKind::BadRequest,
            GalleryError::Io(_) | GalleryError::Internal(_) => ErrorKind::InternalServerError,
            GalleryError::Database(e) => database_kind(e),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn is_public(&self) -> bool {
        matches!(
            self,
            GalleryError::TitleRequired
                | GalleryError::GalleryNotFound
                | GalleryError::ImageNotFound
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GalleryError::GalleryNotFound | GalleryError::ImageNotFound
        )
    }

    pub fn to_app_error(&self) -> AppError {
        if self.is_public() {
            AppError::public(self.kind(), self.to_string())
        } else {
            AppError::private(self.kind(), self.to_string())
        }
    }

    fn log(&self) {
        match self {
            GalleryError::Database(e) => {
                tracing::error!(error = %e, "Gallery database error");
            }
            GalleryError::Io(e) => {
                tracing::error!(error = %e, "Gallery image read error");
            }
            _ if !self.is_public() => {
                tracing::error!(error = %self, "Gallery internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Gallery error");
            }
        }
    }
}

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

impl IntoResponse for GalleryError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::app_error::GENERIC_MESSAGE;

    #[test]
    fn test_public_messages() {
        assert_eq!(
            GalleryError::TitleRequired.to_app_error().user_message(),
            "Gallery title is required."
        );
        assert_eq!(
            GalleryError::GalleryNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_owner_required_is_private() {
        let err = GalleryError::OwnerRequired;
        assert!(!err.is_public());
        assert_eq!(err.to_app_error().user_message(), GENERIC_MESSAGE);
    }

    #[test]
    fn test_database_status_depends_on_cause() {
        assert_eq!(
            GalleryError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            GalleryError::Database(sqlx::Error::ColumnNotFound("title".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
