use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{
            AccessResponse, MeResponse, SessionResponse, SignInRequest, SignInResponse,
            SignUpRequest, SignUpResponse,
        },
        extractors::RequireAuth,
        guard::{self, View},
        validation::{is_valid_email, normalize_email},
    },
    error::{ApiError, InvalidInput, LocalizedError},
    i18n::Locale,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/session", get(session))
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/sign-up", post(sign_up))
        .route("/auth/sign-out", post(sign_out))
        .route("/auth/access/:view", get(access))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state))]
pub async fn session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(SessionResponse {
        session: state.backend.get_session().await.map(Into::into),
    })
}

#[instrument(skip(state, payload))]
pub async fn sign_in(
    State(state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SignInRequest>,
) -> Result<Json<SignInResponse>, LocalizedError> {
    let session = state
        .backend
        .sign_in(&payload.email, &payload.password)
        .await
        .map_err(|e| e.in_locale(locale))?;
    Ok(Json(SignInResponse { session }))
}

#[instrument(skip(state, payload))]
pub async fn sign_up(
    State(state): State<AppState>,
    locale: Locale,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SignUpResponse>), LocalizedError> {
    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        warn!(%email, "invalid email");
        return Err(ApiError::from(InvalidInput::Email).in_locale(locale));
    }
    if let Some(confirm) = &payload.confirm_password {
        if confirm != &payload.password {
            warn!(%email, "password confirmation mismatch");
            return Err(ApiError::from(InvalidInput::PasswordMismatch).in_locale(locale));
        }
    }

    let id = state
        .backend
        .sign_up(&payload.full_name, &email, &payload.password)
        .await
        .map_err(|e| e.in_locale(locale))?;
    Ok((StatusCode::CREATED, Json(SignUpResponse { id })))
}

#[instrument(skip(state))]
pub async fn sign_out(State(state): State<AppState>) -> StatusCode {
    state.backend.sign_out().await;
    StatusCode::NO_CONTENT
}

/// Guard decision for the current session, so the client can redirect.
#[instrument(skip(state))]
pub async fn access(
    State(state): State<AppState>,
    locale: Locale,
    Path(view): Path<String>,
) -> Result<Json<AccessResponse>, LocalizedError> {
    let view: View = view
        .parse()
        .map_err(|e: InvalidInput| ApiError::from(e).in_locale(locale))?;

    let session = state.backend.get_session().await;
    let role = match &session {
        Some(s) => state.backend.get_user_role(&s.user.id).await,
        None => None,
    };
    let decision = guard::check(session.as_ref(), role, view);
    info!(?view, ?decision, "access checked");
    Ok(Json(AccessResponse::new(view, decision)))
}

#[instrument(skip(state, session))]
pub async fn get_me(
    State(state): State<AppState>,
    locale: Locale,
    RequireAuth(session): RequireAuth,
) -> Result<Json<MeResponse>, LocalizedError> {
    let user = state
        .backend
        .find_user(&session.user.id)
        .await
        .ok_or_else(|| ApiError::user_not_found().in_locale(locale))?;
    Ok(Json(MeResponse::new(user, locale)))
}
