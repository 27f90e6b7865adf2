use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use super::library::VideoLibrary;
use super::renderer::VideoRenderer;
use crate::backend::UserId;

/// Dashboard libraries, one per user, created on first access.
///
/// Libraries are kept across sign-out. Users are never removed, so there is
/// at most one library per registered account.
pub struct VideoStudio {
    libraries: Mutex<HashMap<UserId, VideoLibrary>>,
    renderer: Arc<dyn VideoRenderer>,
}

impl VideoStudio {
    pub fn new(renderer: Arc<dyn VideoRenderer>) -> Self {
        Self {
            libraries: Mutex::new(HashMap::new()),
            renderer,
        }
    }

    pub async fn library_for(&self, user_id: &UserId) -> VideoLibrary {
        self.libraries
            .lock()
            .await
            .entry(user_id.clone())
            .or_insert_with(|| VideoLibrary::with_samples(self.renderer.clone()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::videos::{SimulatedRenderer, VideoSettings};

    #[tokio::test]
    async fn libraries_are_per_user() {
        let studio = VideoStudio::new(Arc::new(SimulatedRenderer::new(Duration::from_secs(5))));
        let ana = UserId::from("ana");
        let rui = UserId::from("rui");

        let video = studio
            .library_for(&ana)
            .await
            .create(VideoSettings::from_prompt("Só da Ana"))
            .await
            .unwrap();

        let ana_videos = studio.library_for(&ana).await.list().await;
        let rui_videos = studio.library_for(&rui).await.list().await;
        assert!(ana_videos.iter().any(|v| v.id == video.id));
        assert!(!rui_videos.iter().any(|v| v.id == video.id));
        assert_eq!(rui_videos.len(), 3);
    }
}
