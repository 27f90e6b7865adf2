use std::collections::HashMap;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use time::{macros::datetime, OffsetDateTime};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::models::{RenderedVideo, Video, VideoSettings, VideoStatus};
use super::renderer::VideoRenderer;
use crate::error::{ApiError, ApiResult};

const PLACEHOLDER_THUMBNAIL: &str = "https://placehold.co/600x400/fbbf24/ffffff";

/// Characters a browser's `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Default)]
struct Shelf {
    videos: Vec<Video>, // newest first
    pending: HashMap<Uuid, AbortHandle>,
}

/// One user's dashboard videos.
///
/// Creating a video starts a render task; the task flips the record to
/// `done` when the renderer returns. Deleting a video aborts its task.
#[derive(Clone)]
pub struct VideoLibrary {
    shelf: Arc<Mutex<Shelf>>,
    renderer: Arc<dyn VideoRenderer>,
}

impl VideoLibrary {
    #[cfg(test)]
    pub fn empty(renderer: Arc<dyn VideoRenderer>) -> Self {
        Self {
            shelf: Arc::new(Mutex::new(Shelf::default())),
            renderer,
        }
    }

    /// Library pre-filled with the sample videos every dashboard starts with.
    pub fn with_samples(renderer: Arc<dyn VideoRenderer>) -> Self {
        let shelf = Shelf {
            videos: sample_videos(),
            pending: HashMap::new(),
        };
        Self {
            shelf: Arc::new(Mutex::new(shelf)),
            renderer,
        }
    }

    pub async fn list(&self) -> Vec<Video> {
        self.shelf.lock().await.videos.clone()
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<Video> {
        self.shelf
            .lock()
            .await
            .videos
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(ApiError::video_not_found)
    }

    /// Validates `settings`, stores a `generating` video titled after the
    /// prompt and starts its render.
    pub async fn create(&self, settings: VideoSettings) -> ApiResult<Video> {
        settings.validate()?;
        let title = settings.title();

        let video = Video {
            id: Uuid::new_v4(),
            thumbnail: thumbnail_for(&title),
            title,
            created_at: OffsetDateTime::now_utc(),
            status: VideoStatus::Generating,
            url: None,
            settings: Some(settings.clone()),
        };

        let mut shelf = self.shelf.lock().await;
        shelf.videos.insert(0, video.clone());
        // registered under the lock, so the task cannot finish first
        let handle = self.spawn_render(video.id, video.title.clone(), settings);
        shelf.pending.insert(video.id, handle);
        info!(
            video_id = %video.id,
            title = %video.title,
            mode = ?video.settings.as_ref().map(|s| s.mode),
            "video generation started"
        );
        Ok(video)
    }

    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        let mut shelf = self.shelf.lock().await;
        let pos = shelf
            .videos
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(ApiError::video_not_found)?;
        shelf.videos.remove(pos);
        if let Some(handle) = shelf.pending.remove(&id) {
            handle.abort();
            info!(video_id = %id, "pending render cancelled");
        }
        info!(video_id = %id, "video deleted");
        Ok(())
    }

    /// Number of renders still in flight.
    #[cfg(test)]
    pub async fn pending_renders(&self) -> usize {
        self.shelf.lock().await.pending.len()
    }

    fn spawn_render(&self, id: Uuid, title: String, settings: VideoSettings) -> AbortHandle {
        let library = self.clone();
        let task = tokio::spawn(async move {
            let outcome = library.renderer.render(&title, &settings).await;
            library.finish(id, outcome).await;
        });
        task.abort_handle()
    }

    async fn finish(&self, id: Uuid, outcome: anyhow::Result<RenderedVideo>) {
        let mut shelf = self.shelf.lock().await;
        shelf.pending.remove(&id);
        let rendered = match outcome {
            Ok(r) => r,
            Err(e) => {
                error!(video_id = %id, error = %e, "render failed");
                return;
            }
        };
        match shelf.videos.iter_mut().find(|v| v.id == id) {
            Some(video) => {
                video.status = VideoStatus::Done;
                video.url = Some(rendered.url);
                info!(video_id = %id, "video ready");
            }
            None => warn!(video_id = %id, "render finished for a deleted video"),
        }
    }
}

/// Placeholder image carrying the first ten characters of the title.
pub fn thumbnail_for(title: &str) -> String {
    let prefix: String = title.chars().take(10).collect();
    let text = utf8_percent_encode(&prefix, URI_COMPONENT);
    format!("{PLACEHOLDER_THUMBNAIL}?text={text}")
}

fn sample_videos() -> Vec<Video> {
    let sample = |title: &str, at: OffsetDateTime, thumb: &str, clip: &str| Video {
        id: Uuid::new_v4(),
        title: title.to_string(),
        created_at: at,
        status: VideoStatus::Done,
        thumbnail: thumb.to_string(),
        url: Some(clip.to_string()),
        settings: None,
    };
    vec![
        sample(
            "A Jornada do Herói",
            datetime!(2025-07-20 12:00 UTC),
            "https://i.imgur.com/8zHmH3z.jpeg",
            "https://videos.pexels.com/video-files/3209828/3209828-hd_1920_1080_25fps.mp4",
        ),
        sample(
            "Reflexões ao Amanhecer",
            datetime!(2025-07-18 12:00 UTC),
            "https://i.imgur.com/sWp3R4s.jpeg",
            "https://videos.pexels.com/video-files/853877/853877-hd_1920_1080_25fps.mp4",
        ),
        sample(
            "Ecos do Passado",
            datetime!(2025-07-15 12:00 UTC),
            "https://i.imgur.com/j6e6mUu.jpeg",
            "https://videos.pexels.com/video-files/3840441/3840441-hd_1920_1080_25fps.mp4",
        ),
    ]
}
