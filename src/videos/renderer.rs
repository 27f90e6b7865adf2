use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::models::{RenderedVideo, VideoSettings};

/// Clip every simulated render resolves to.
pub const STOCK_VIDEO_URL: &str =
    "https://videos.pexels.com/video-files/4434249/4434249-hd_1920_1080_25fps.mp4";

#[async_trait]
pub trait VideoRenderer: Send + Sync {
    async fn render(&self, title: &str, settings: &VideoSettings)
        -> anyhow::Result<RenderedVideo>;
}

/// Pretends to generate a video: waits, then returns the stock clip.
#[derive(Debug, Clone)]
pub struct SimulatedRenderer {
    delay: Duration,
}

impl SimulatedRenderer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl VideoRenderer for SimulatedRenderer {
    async fn render(
        &self,
        title: &str,
        settings: &VideoSettings,
    ) -> anyhow::Result<RenderedVideo> {
        tokio::time::sleep(self.delay).await;
        debug!(
            %title,
            mode = ?settings.mode,
            quality = settings.quality.as_str(),
            frames = settings.frames.len(),
            "simulated render finished"
        );
        Ok(RenderedVideo {
            url: STOCK_VIDEO_URL.to_string(),
        })
    }
}
