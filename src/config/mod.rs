//! Configuration loading and validation

mod schema;

pub use schema::*;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

use crate::interactive::{CommandSpeaker, Speaker, SpeakerGroup, TranscriptSpeaker};
use crate::playable::{EspeakSpeech, SilentSpeech, SpeechSynth};

/// Annotated example written by `sonaplot init`
pub const EXAMPLE_CONFIG: &str = include_str!("../../sonaplot.example.yaml");

/// Load configuration from a YAML file
pub fn load_config(path: &Path) -> Result<SonaplotConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {:?}", path))?;
    let config: SonaplotConfig = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse config: {:?}", path))?;
    config.validate()?;
    Ok(config)
}

/// Load `path` if given, defaults otherwise
pub fn load_or_default(path: Option<&Path>) -> Result<SonaplotConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(SonaplotConfig::default()),
    }
}

impl SpeechConfig {
    /// Synthesizer for offline narration
    pub fn synth(&self) -> Box<dyn SpeechSynth> {
        match self.engine {
            SpeechEngine::Espeak => Box::new(EspeakSpeech::new(&self.command, self.words_per_minute)),
            SpeechEngine::Silent => Box::new(SilentSpeech::new(self.words_per_minute)),
        }
    }

    /// Live narration for interactive plots, always recorded in `transcript`
    pub fn speaker(&self, transcript: Arc<TranscriptSpeaker>) -> Arc<dyn Speaker> {
        let group = SpeakerGroup::new().with(transcript);
        let group = match self.engine {
            SpeechEngine::Espeak => group.with(Arc::new(CommandSpeaker::new(
                &self.command,
                self.words_per_minute,
            ))),
            SpeechEngine::Silent => group,
        };
        Arc::new(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Language;
    use crate::playable::RenderMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_minimal_config() {
        let yaml = r#"
audio:
  sample_rate: 22050

language: ja

render:
  mode: overlay
"#;
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.audio.sample_rate, 22050);
        assert_eq!(config.language, Language::Ja);
        assert_eq!(config.render.mode, RenderMode::Overlay);
        assert_eq!(config.interactive.title, "graph");
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"interactive:\n  slider_partitions: 0\n").unwrap();
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_config(Path::new("/nonexistent/sonaplot.yaml")).unwrap_err();
        assert!(format!("{:#}", err).contains("sonaplot.yaml"));
    }

    #[test]
    fn test_example_config_is_valid() {
        let config: SonaplotConfig = serde_yaml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_silent_speech_from_config() {
        let speech = SpeechConfig {
            engine: SpeechEngine::Silent,
            ..SpeechConfig::default()
        };
        let clip = speech.synth().synthesize("minimum value is 1", Language::En, 8000).unwrap();
        assert!(clip.peak() == 0.0);
        assert!(!clip.is_empty());

        let transcript = Arc::new(TranscriptSpeaker::new());
        speech.speaker(transcript.clone()).speak("hello", Language::En);
        assert_eq!(transcript.last().as_deref(), Some("hello"));
    }

    #[test]
    fn test_load_or_default() {
        assert_eq!(load_or_default(None).unwrap(), SonaplotConfig::default());
    }
}
