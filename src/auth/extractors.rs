use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;

use super::guard::{self, Access, View};
use crate::backend::Session;
use crate::error::{ApiError, LocalizedError};
use crate::i18n::Locale;
use crate::state::AppState;

/// Request carrying the bearer token of the current session.
pub struct RequireAuth(pub Session);

/// Like [`RequireAuth`], and the session's user is an admin.
pub struct RequireAdmin(pub Session);

async fn locale_of(parts: &mut Parts, state: &AppState) -> Locale {
    Locale::from_request_parts(parts, state)
        .await
        .unwrap_or_default()
}

async fn current_session(parts: &Parts, state: &AppState) -> Result<Session, ApiError> {
    let token = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer ").or_else(|| h.strip_prefix("bearer ")))
        .ok_or(ApiError::Unauthorized)?;

    match state.backend.session_snapshot().await {
        Some(session) if session.token == token => Ok(session),
        _ => {
            warn!("request with a stale or unknown session token");
            Err(ApiError::Unauthorized)
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = LocalizedError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let locale = locale_of(parts, state).await;
        let session = current_session(parts, state)
            .await
            .map_err(|e| e.in_locale(locale))?;
        Ok(RequireAuth(session))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = LocalizedError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let locale = locale_of(parts, state).await;
        let session = current_session(parts, state)
            .await
            .map_err(|e| e.in_locale(locale))?;
        let role = state.backend.role_snapshot(&session.user.id).await;

        match guard::check(Some(&session), role, View::Admin) {
            Access::Allowed => Ok(RequireAdmin(session)),
            Access::Redirect(_) => {
                warn!(user_id = %session.user.id, "non-admin on admin route");
                Err(ApiError::Forbidden.in_locale(locale))
            }
        }
    }
}
