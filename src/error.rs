use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::i18n::Locale;

/// Every failure the service can report.
///
/// The first four are the mock backend's own outcomes and are returned as
/// values from its operations. The rest only arise at the HTTP edge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("A user with this email already exists.")]
    DuplicateEmail,

    #[error("The password must be at least 6 characters long.")]
    WeakPassword,

    #[error("{entity} not found.")]
    NotFound { entity: Entity },

    #[error(transparent)]
    Validation(#[from] InvalidInput),

    #[error("Sign in to continue.")]
    Unauthorized,

    #[error("Admin role required.")]
    Forbidden,

    #[error("Admins cannot change their own role or status.")]
    OwnAccount,

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Video,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::User => f.write_str("User"),
            Entity::Video => f.write_str("Video"),
        }
    }
}

/// Input rejected before it reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    #[error("Invalid email address.")]
    Email,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Describe the video before generating it.")]
    EmptyPrompt,

    #[error("Frames mode needs at least one image.")]
    NoFrames,

    #[error("Quality {0} is not available yet.")]
    UnavailableQuality(&'static str),

    #[error("Unknown view: {0}")]
    UnknownView(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn user_not_found() -> Self {
        Self::NotFound {
            entity: Entity::User,
        }
    }

    pub fn video_not_found() -> Self {
        Self::NotFound {
            entity: Entity::Video,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::DuplicateEmail => StatusCode::CONFLICT,
            ApiError::WeakPassword => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden | ApiError::OwnAccount => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::DuplicateEmail => "DUPLICATE_EMAIL",
            ApiError::WeakPassword => "WEAK_PASSWORD",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized => "UNAUTHORIZED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::OwnAccount => "OWN_ACCOUNT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Attach the caller's locale so the response message is translated.
    pub fn in_locale(self, locale: Locale) -> LocalizedError {
        LocalizedError {
            error: self,
            locale,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(format!("{e:#}"))
    }
}

/// An [`ApiError`] paired with the locale it should be rendered in.
#[derive(Debug)]
pub struct LocalizedError {
    pub error: ApiError,
    pub locale: Locale,
}

impl From<ApiError> for LocalizedError {
    fn from(error: ApiError) -> Self {
        error.in_locale(Locale::default())
    }
}

impl IntoResponse for LocalizedError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(msg) = &self.error {
            tracing::error!(error = %msg, "internal error");
        }
        let status = self.error.status();
        let body = json!({
            "error": self.locale.error_message(&self.error),
            "code": self.error.code(),
        });
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        LocalizedError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_http_statuses() {
        assert_eq!(ApiError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::DuplicateEmail.status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::WeakPassword.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::user_not_found().status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::OwnAccount.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(InvalidInput::NoFrames).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(ApiError::video_not_found().to_string(), "Video not found.");
    }

    #[test]
    fn anyhow_errors_become_internal() {
        let err: ApiError = anyhow::anyhow!("hash blew up").into();
        assert_eq!(err.code(), "INTERNAL_ERROR");
        assert!(err.to_string().contains("hash blew up"));
    }
}
