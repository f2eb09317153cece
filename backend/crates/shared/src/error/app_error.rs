//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] and [`AppResult<T>`]. Every domain error converts into
//! an `AppError` before it reaches a response, which is where the decision is
//! made whether the user sees the message or a generic apology.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// Message shown in place of any private error.
pub const GENERIC_MESSAGE: &str = "Something went wrong. Please contact us if the problem persists.";

/// Whether an error message may be shown to the end user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Originates from a named validation rule and is safe to display.
    Public,
    /// Programming or configuration defect; logged, never displayed.
    Private,
}

/// Unified application error.
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, kind::ErrorKind};
///
/// let err = AppError::public(ErrorKind::BadRequest, "name is required");
/// assert_eq!(err.user_message(), "Name is required.");
///
/// let err = AppError::private(ErrorKind::InternalServerError, "remember token hash is required");
/// assert!(err.user_message().starts_with("Something went wrong"));
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    visibility: Visibility,
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>`
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    #[inline]
    pub fn new(
        kind: ErrorKind,
        visibility: Visibility,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            visibility,
            source: None,
        }
    }

    /// Error whose message may be rendered verbatim (after capitalisation).
    #[inline]
    pub fn public(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(kind, Visibility::Public, message)
    }

    /// Error whose message is only ever logged.
    #[inline]
    pub fn private(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(kind, Visibility::Private, message)
    }

    #[inline]
    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::private(ErrorKind::InternalServerError, message)
    }

    /// Attach the underlying error for logging.
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// Raw message, for logs.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Server errors are never public, whatever they were built with.
    #[inline]
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public && !self.kind.is_server_error()
    }

    /// Message suitable for the end user.
    ///
    /// Public messages get their first letter capitalised and a trailing
    /// period; private messages are replaced by [`GENERIC_MESSAGE`].
    pub fn user_message(&self) -> String {
        if self.is_public() {
            capitalize_sentence(&self.message)
        } else {
            GENERIC_MESSAGE.to_string()
        }
    }
}

/// "email address is already taken" -> "Email address is already taken."
pub fn capitalize_sentence(message: &str) -> String {
    let mut chars = message.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };
    if !out.ends_with('.') {
        out.push('.');
    }
    out
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("visibility", &self.visibility);
        builder.field("message", &self.message);
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.user_message(),
        });

        (status, Json(body)).into_response()
    }
}
