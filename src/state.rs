use std::sync::Arc;

use crate::backend::MockBackend;
use crate::config::AppConfig;
use crate::videos::{SimulatedRenderer, VideoRenderer, VideoStudio};

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<MockBackend>,
    pub videos: Arc<VideoStudio>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init(config: AppConfig) -> anyhow::Result<Self> {
        let backend = Arc::new(MockBackend::seeded(
            config.seed_users,
            config.latency.clone(),
        )?);
        let renderer = Arc::new(SimulatedRenderer::new(config.render_delay)) as Arc<dyn VideoRenderer>;

        Ok(Self {
            backend,
            videos: Arc::new(VideoStudio::new(renderer)),
            config: Arc::new(config),
        })
    }

    /// Zero-latency state with a small seed, for tests.
    pub fn fake() -> anyhow::Result<Self> {
        Self::init(AppConfig::for_tests())
    }
}
