use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::{localize_page, CountResponse, UpdateRoleRequest, UpdateStatusRequest, UserRow};
use crate::{
    auth::extractors::RequireAdmin,
    backend::{Page, Session, UserId, UserQuery},
    error::{ApiError, LocalizedError},
    i18n::Locale,
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/count", get(count_users))
        .route("/admin/users/:id/role", put(update_role))
        .route("/admin/users/:id/status", put(update_status))
}

#[instrument(skip(state, admin))]
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    locale: Locale,
    Query(query): Query<UserQuery>,
) -> Json<Page<UserRow>> {
    let page = state.backend.search_users(&query).await;
    info!(admin_id = %admin.user.id, total = page.total, page = page.page, "users listed");
    Json(localize_page(page, locale))
}

#[instrument(skip(state, _admin))]
pub async fn count_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> Json<CountResponse> {
    Json(CountResponse {
        count: state.backend.count_users().await,
    })
}

/// Admins manage other accounts only.
fn other_than_self(admin: &Session, id: String) -> Result<UserId, ApiError> {
    if admin.user.id.as_str() == id {
        warn!(admin_id = %admin.user.id, "admin tried to change own account");
        return Err(ApiError::OwnAccount);
    }
    Ok(UserId(id))
}

#[instrument(skip(state, admin, body))]
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    locale: Locale,
    Path(id): Path<String>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<StatusCode, LocalizedError> {
    let id = other_than_self(&admin, id).map_err(|e| e.in_locale(locale))?;
    state
        .backend
        .update_user_role(&id, body.role)
        .await
        .map_err(|e| e.in_locale(locale))?;
    info!(admin_id = %admin.user.id, "role changed by admin");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, admin, body))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    locale: Locale,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<StatusCode, LocalizedError> {
    let id = other_than_self(&admin, id).map_err(|e| e.in_locale(locale))?;
    state
        .backend
        .update_user_status(&id, body.status)
        .await
        .map_err(|e| e.in_locale(locale))?;
    info!(admin_id = %admin.user.id, "status changed by admin");
    Ok(StatusCode::NO_CONTENT)
}
