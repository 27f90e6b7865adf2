mod dto;
pub mod handlers;
mod library;
mod models;
mod renderer;
mod studio;

use crate::state::AppState;
use axum::Router;

pub use library::{thumbnail_for, VideoLibrary};
pub use models::{
    AspectRatio, CreationMode, Quality, RenderedVideo, Video, VideoSettings, VideoStatus,
    DEFAULT_VOICE,
};
pub use renderer::{SimulatedRenderer, VideoRenderer, STOCK_VIDEO_URL};
pub use studio::VideoStudio;

pub fn router() -> Router<AppState> {
    handlers::video_routes()
}
