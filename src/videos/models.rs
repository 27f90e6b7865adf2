use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::InvalidInput;

/// Voice used when the client does not pick one.
pub const DEFAULT_VOICE: &str = "Padrão IA";

/// Prompt characters kept in a derived title.
const TITLE_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoStatus {
    Generating,
    Done,
}

/// How the video is produced: from a prompt alone, or from a prompt plus
/// user-supplied frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationMode {
    #[default]
    Text,
    Frames,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "720p")]
    Hd,
    #[default]
    #[serde(rename = "1080p")]
    FullHd,
    #[serde(rename = "4K")]
    Uhd,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Hd => "720p",
            Quality::FullHd => "1080p",
            Quality::Uhd => "4K",
        }
    }

    /// 4K is listed but cannot be selected yet.
    pub fn is_available(self) -> bool {
        self != Quality::Uhd
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    #[default]
    Landscape,
    Portrait,
}

/// Everything the user chose when asking for a video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSettings {
    pub mode: CreationMode,
    pub prompt: String,
    pub quality: Quality,
    pub aspect_ratio: AspectRatio,
    pub voice: String,
    pub frames: Vec<String>,
}

impl VideoSettings {
    /// Text-mode settings with every option at its default.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            mode: CreationMode::Text,
            prompt: prompt.into(),
            quality: Quality::default(),
            aspect_ratio: AspectRatio::default(),
            voice: DEFAULT_VOICE.to_string(),
            frames: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.prompt.trim().is_empty() {
            return Err(InvalidInput::EmptyPrompt);
        }
        if self.mode == CreationMode::Frames && self.frames.is_empty() {
            return Err(InvalidInput::NoFrames);
        }
        if !self.quality.is_available() {
            return Err(InvalidInput::UnavailableQuality(self.quality.as_str()));
        }
        Ok(())
    }

    /// First 30 characters of the prompt, with `...` when it was cut.
    pub fn title(&self) -> String {
        let prompt = self.prompt.trim();
        let mut title: String = prompt.chars().take(TITLE_CHARS).collect();
        if prompt.chars().count() > TITLE_CHARS {
            title.push_str("...");
        }
        title
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub status: VideoStatus,
    pub thumbnail: String,
    pub url: Option<String>, // set once rendering is done
    pub settings: Option<VideoSettings>, // none for the built-in samples
}

/// What a renderer hands back for a finished video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedVideo {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prompt_is_the_whole_title() {
        let s = VideoSettings::from_prompt("  Pôr do sol na praia ");
        assert_eq!(s.title(), "Pôr do sol na praia");
    }

    #[test]
    fn long_prompt_is_cut_at_thirty_chars() {
        let s = VideoSettings::from_prompt(
            "Uma viagem épica pelas montanhas geladas do norte ao amanhecer",
        );
        assert_eq!(s.title(), "Uma viagem épica pelas montanh...");
        assert_eq!(s.title().chars().count(), 33);

        let exact = VideoSettings::from_prompt("a".repeat(30));
        assert_eq!(exact.title(), "a".repeat(30));
    }

    #[test]
    fn frames_mode_needs_an_image() {
        let mut s = VideoSettings::from_prompt("Retratos da família");
        s.mode = CreationMode::Frames;
        assert_eq!(s.validate(), Err(InvalidInput::NoFrames));

        s.frames.push("https://example.com/frame-1.png".into());
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn blank_prompt_and_4k_are_rejected() {
        assert_eq!(
            VideoSettings::from_prompt("   ").validate(),
            Err(InvalidInput::EmptyPrompt)
        );
        let mut s = VideoSettings::from_prompt("Cidade à noite");
        s.quality = Quality::Uhd;
        assert_eq!(s.validate(), Err(InvalidInput::UnavailableQuality("4K")));
    }

    #[test]
    fn options_use_the_client_spelling() {
        assert_eq!(serde_json::to_string(&Quality::FullHd).unwrap(), "\"1080p\"");
        assert_eq!(serde_json::from_str::<Quality>("\"4K\"").unwrap(), Quality::Uhd);
        assert_eq!(
            serde_json::from_str::<AspectRatio>("\"portrait\"").unwrap(),
            AspectRatio::Portrait
        );
        assert!(serde_json::from_str::<Quality>("\"8K\"").is_err());
    }
}
