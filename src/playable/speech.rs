//! Speech clips for rendered tracks

use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use super::AudioClip;
use crate::engine::read_wav;
use crate::locale::Language;

/// Turns narration text into an audio clip
pub trait SpeechSynth {
    fn synthesize(&self, text: &str, language: Language, sample_rate: u32) -> Result<AudioClip>;
}

/// Rough speaking time of `text` at `words_per_minute`, in milliseconds.
///
/// Counts five non-blank characters as one word so that text without
/// spaces gets a sensible length too.
pub fn estimate_duration_ms(text: &str, words_per_minute: u32) -> f64 {
    let chars = text.chars().filter(|c| !c.is_whitespace()).count();
    let words = (chars as f64 / 5.0).max(text.split_whitespace().count() as f64);
    words * 60_000.0 / words_per_minute.max(1) as f64
}

/// Speech stand-in that produces silence as long as the text would take to say.
///
/// Used when no speech engine is installed.
#[derive(Debug, Clone)]
pub struct SilentSpeech {
    words_per_minute: u32,
}

impl SilentSpeech {
    pub fn new(words_per_minute: u32) -> Self {
        Self { words_per_minute }
    }
}

impl Default for SilentSpeech {
    fn default() -> Self {
        Self::new(175)
    }
}

impl SpeechSynth for SilentSpeech {
    fn synthesize(&self, text: &str, language: Language, sample_rate: u32) -> Result<AudioClip> {
        info!(lang = language.code(), "narration: {}", text);
        Ok(AudioClip::silent(estimate_duration_ms(text, self.words_per_minute), sample_rate))
    }
}

/// Speech from an eSpeak-compatible command line synthesizer
#[derive(Debug, Clone)]
pub struct EspeakSpeech {
    command: PathBuf,
    words_per_minute: u32,
}

impl EspeakSpeech {
    pub fn new(command: impl Into<PathBuf>, words_per_minute: u32) -> Self {
        Self {
            command: command.into(),
            words_per_minute,
        }
    }
}

impl SpeechSynth for EspeakSpeech {
    fn synthesize(&self, text: &str, language: Language, sample_rate: u32) -> Result<AudioClip> {
        let wav = tempfile::Builder::new()
            .prefix("sonaplot-")
            .suffix(".wav")
            .tempfile()
            .context("failed to create temporary speech file")?;

        debug!(command = ?self.command, "synthesizing '{}'", text);

        let status = Command::new(&self.command)
            .arg("-v")
            .arg(language.voice())
            .arg("-s")
            .arg(self.words_per_minute.to_string())
            .arg("-w")
            .arg(wav.path())
            .arg(text)
            .status()
            .with_context(|| format!("failed to run speech command {:?}", self.command))?;

        if !status.success() {
            bail!("speech command {:?} exited with {}", self.command, status);
        }

        Ok(read_wav(wav.path())?.resample(sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_duration() {
        // 4 words at 120 wpm = 2 seconds
        assert_eq!(estimate_duration_ms("one two three four", 120), 2000.0);
        // No spaces: 10 characters count as 2 words
        assert_eq!(estimate_duration_ms("最小値は10.0です", 120), 1000.0);
    }

    #[test]
    fn test_silent_speech_length() {
        let clip = SilentSpeech::new(60)
            .synthesize("maximum is", Language::En, 1000)
            .unwrap();
        assert_eq!(clip.len(), 2000);
        assert_eq!(clip.peak(), 0.0);
    }

    #[test]
    fn test_missing_speech_command_fails() {
        let speech = EspeakSpeech::new("/nonexistent/espeak-ng", 175);
        assert!(speech.synthesize("hello", Language::En, 8000).is_err());
    }
}
