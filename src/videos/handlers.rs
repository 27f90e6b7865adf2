use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::dto::{CreateVideoRequest, VideoResponse};
use crate::{
    auth::extractors::RequireAuth, error::LocalizedError, i18n::Locale, state::AppState,
};

pub fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(list_videos).post(create_video))
        .route("/videos/:id", get(get_video).delete(delete_video))
}

#[instrument(skip(state, session))]
pub async fn list_videos(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    locale: Locale,
) -> Json<Vec<VideoResponse>> {
    let library = state.videos.library_for(&session.user.id).await;
    let items = library
        .list()
        .await
        .into_iter()
        .map(|v| VideoResponse::new(v, locale))
        .collect();
    Json(items)
}

#[instrument(skip(state, session, body))]
pub async fn create_video(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    locale: Locale,
    Json(body): Json<CreateVideoRequest>,
) -> Result<(StatusCode, Json<VideoResponse>), LocalizedError> {
    let library = state.videos.library_for(&session.user.id).await;
    let video = library
        .create(body.into())
        .await
        .map_err(|e| e.in_locale(locale))?;
    Ok((StatusCode::CREATED, Json(VideoResponse::new(video, locale))))
}

#[instrument(skip(state, session))]
pub async fn get_video(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<Json<VideoResponse>, LocalizedError> {
    let library = state.videos.library_for(&session.user.id).await;
    let video = library.get(id).await.map_err(|e| e.in_locale(locale))?;
    Ok(Json(VideoResponse::new(video, locale)))
}

#[instrument(skip(state, session))]
pub async fn delete_video(
    State(state): State<AppState>,
    RequireAuth(session): RequireAuth,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, LocalizedError> {
    let library = state.videos.library_for(&session.user.id).await;
    library.delete(id).await.map_err(|e| e.in_locale(locale))?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::app::build_app;
    use crate::backend::seed::{ADMIN_EMAIL, SEED_PASSWORD};

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.clone().oneshot(req).await.expect("response");
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json")
        };
        (status, body)
    }

    fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"));
        match body {
            Some(b) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(b.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn videos_require_a_session() {
        let app = build_app(AppState::fake().unwrap());
        let (status, _) = send(&app, Request::get("/api/v1/videos").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn create_list_get_delete() {
        let state = AppState::fake().unwrap();
        let app = build_app(state.clone());
        let token = state
            .backend
            .sign_in(ADMIN_EMAIL, SEED_PASSWORD)
            .await
            .unwrap()
            .token;

        let (status, list) = send(&app, authed("GET", "/api/v1/videos", &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 3);
        assert_eq!(list[0]["date"], "20/07/2025");

        let (status, created) = send(
            &app,
            authed("POST", "/api/v1/videos", &token, Some(json!({ "prompt": "Meu vídeo" }))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["status"], "generating");
        assert_eq!(created["settings"]["mode"], "text");
        assert_eq!(created["settings"]["quality"], "1080p");
        assert_eq!(created["settings"]["aspect_ratio"], "landscape");
        assert_eq!(created["settings"]["voice"], "Padrão IA");
        assert_eq!(created["status_label"], "Gerando...");
        assert!(created["url"].is_null());
        let id = created["id"].as_str().unwrap().to_string();

        let (status, fetched) =
            send(&app, authed("GET", &format!("/api/v1/videos/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["title"], "Meu vídeo");

        let (status, _) =
            send(&app, authed("DELETE", &format!("/api/v1/videos/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) =
            send(&app, authed("GET", &format!("/api/v1/videos/{id}"), &token, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Vídeo não encontrado.");
    }

    #[tokio::test]
    async fn empty_prompt_is_bad_request() {
        let state = AppState::fake().unwrap();
        let app = build_app(state.clone());
        let token = state
            .backend
            .sign_in(ADMIN_EMAIL, SEED_PASSWORD)
            .await
            .unwrap()
            .token;
        let (status, body) = send(
            &app,
            authed("POST", "/api/v1/videos", &token, Some(json!({ "prompt": "  " }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn frames_mode_over_http() {
        let state = AppState::fake().unwrap();
        let app = build_app(state.clone());
        let token = state
            .backend
            .sign_in(ADMIN_EMAIL, SEED_PASSWORD)
            .await
            .unwrap()
            .token;

        let mut req = authed(
            "POST",
            "/api/v1/videos",
            &token,
            Some(json!({ "mode": "frames", "prompt": "Fotos da viagem" })),
        );
        req.headers_mut()
            .insert(header::ACCEPT_LANGUAGE, "en".parse().unwrap());
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Frames mode needs at least one image.");

        let (status, created) = send(
            &app,
            authed(
                "POST",
                "/api/v1/videos",
                &token,
                Some(json!({
                    "mode": "frames",
                    "prompt": "Fotos da viagem ao litoral com a família inteira",
                    "quality": "720p",
                    "aspect_ratio": "portrait",
                    "voice": "Narrador",
                    "frames": ["https://example.com/1.png", "https://example.com/2.png"]
                })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["title"], "Fotos da viagem ao litoral com...");
        assert_eq!(created["settings"]["frames"].as_array().unwrap().len(), 2);
        assert_eq!(created["settings"]["voice"], "Narrador");

        let (status, body) = send(
            &app,
            authed(
                "POST",
                "/api/v1/videos",
                &token,
                Some(json!({ "prompt": "Em 4K", "quality": "4K" })),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "A qualidade 4K ainda não está disponível.");
    }
}
