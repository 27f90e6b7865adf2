use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{
    AspectRatio, CreationMode, Quality, Video, VideoSettings, VideoStatus, DEFAULT_VOICE,
};
use crate::i18n::Locale;

/// Body of `POST /videos`. Only `prompt` is required.
#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    #[serde(default)]
    pub mode: CreationMode,
    pub prompt: String,
    #[serde(default)]
    pub quality: Quality,
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub frames: Vec<String>,
}

impl From<CreateVideoRequest> for VideoSettings {
    fn from(req: CreateVideoRequest) -> Self {
        let voice = req
            .voice
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_VOICE.to_string());
        Self {
            mode: req.mode,
            prompt: req.prompt,
            quality: req.quality,
            aspect_ratio: req.aspect_ratio,
            voice,
            frames: req.frames,
        }
    }
}

/// Video as the dashboard renders it: raw fields plus localized labels.
#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub id: Uuid,
    pub title: String,
    pub date: String,
    pub status: VideoStatus,
    pub status_label: &'static str,
    pub thumbnail: String,
    pub url: Option<String>,
    pub settings: Option<VideoSettings>,
}

impl VideoResponse {
    pub fn new(video: Video, locale: Locale) -> Self {
        Self {
            id: video.id,
            date: locale.date(video.created_at),
            status_label: locale.video_status(video.status),
            status: video.status,
            title: video.title,
            thumbnail: video.thumbnail,
            url: video.url,
            settings: video.settings,
        }
    }
}
