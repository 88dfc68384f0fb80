//! Text-to-speech boundary. The engine itself belongs to the platform.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechSettings {
    pub language: String,
    pub pitch: f32,
    pub rate: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            language: "hi-IN".to_string(),
            pitch: 1.0,
            rate: 0.75,
        }
    }
}

/// Fire-and-forget speech output
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str, settings: &SpeechSettings);
}

/// Speaker for environments without a speech engine
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, text: &str, settings: &SpeechSettings) {
        tracing::info!(
            text,
            language = %settings.language,
            pitch = settings.pitch,
            rate = settings.rate,
            "speak"
        );
    }
}
