//! Configuration schema definitions

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::interactive::PlotOptions;
use crate::locale::Language;
use crate::playable::{RenderMode, RenderOptions};

/// Main configuration for sonaplot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SonaplotConfig {
    /// Audio output settings
    #[serde(default)]
    pub audio: AudioConfig,

    /// Narration language (`en` or `ja`)
    #[serde(default)]
    pub language: Language,

    /// Speech synthesis settings
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Interactive plot settings; the top-level `language` replaces theirs
    #[serde(default)]
    pub interactive: PlotOptions,

    /// Offline render settings
    #[serde(default)]
    pub render: RenderConfig,
}

impl SonaplotConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate audio settings
        if self.audio.sample_rate < 8000 || self.audio.sample_rate > 192000 {
            bail!("Sample rate must be between 8000 and 192000");
        }

        if self.speech.words_per_minute == 0 {
            bail!("Speech rate must be at least 1 word per minute");
        }

        self.interactive.validate()?;

        // Validate render settings
        if self.render.duration_ms == 0 {
            bail!("Tone duration must be positive");
        }
        if !(self.render.min_freq > 0.0) || self.render.min_freq >= self.render.max_freq {
            bail!(
                "min_freq ({}) must be positive and below max_freq ({})",
                self.render.min_freq,
                self.render.max_freq
            );
        }

        Ok(())
    }

    /// Options for an interactive plot
    pub fn plot_options(&self) -> PlotOptions {
        PlotOptions {
            language: self.language,
            ..self.interactive.clone()
        }
    }

    /// Options for an offline render
    pub fn render_options(&self) -> RenderOptions {
        let r = &self.render;
        RenderOptions {
            mode: r.mode,
            duration_ms: r.duration_ms,
            gain_db: r.gain_db,
            gains: r.gains.clone(),
            labels: r.labels.clone(),
            min_freq: r.min_freq,
            max_freq: r.max_freq,
            decimals: r.decimals,
            description: r.description,
            autoplay: r.autoplay,
            language: self.language,
            sample_rate: self.audio.sample_rate,
        }
    }
}

/// Audio output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Sample rate of rendered tracks in Hz (default: 44100)
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Output device name (None = default device)
    #[serde(default)]
    pub device: Option<String>,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            device: None,
        }
    }
}

fn default_sample_rate() -> u32 { 44100 }

/// Speech engine types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpeechEngine {
    /// eSpeak-compatible command line synthesizer
    #[default]
    Espeak,
    /// Log narration instead of speaking it
    Silent,
}

/// Speech synthesis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub engine: SpeechEngine,

    /// Synthesizer executable (default: espeak-ng)
    #[serde(default = "default_speech_command")]
    pub command: String,

    /// Speaking rate (default: 175)
    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            engine: SpeechEngine::default(),
            command: default_speech_command(),
            words_per_minute: default_words_per_minute(),
        }
    }
}

fn default_speech_command() -> String { "espeak-ng".to_string() }
fn default_words_per_minute() -> u32 { 175 }

/// Offline render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// sequential or overlay (default: sequential)
    #[serde(default)]
    pub mode: RenderMode,

    /// Tone length per value (default: 50)
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    /// Line gain in dB (default: -5)
    #[serde(default = "default_gain_db")]
    pub gain_db: f64,

    /// Per-line gains in dB
    #[serde(default)]
    pub gains: Option<Vec<f64>>,

    /// Spoken line names
    #[serde(default)]
    pub labels: Option<Vec<String>>,

    /// Frequency of the smallest value (default: 130.813)
    #[serde(default = "default_min_freq")]
    pub min_freq: f64,

    /// Frequency of the largest value (default: 523.252)
    #[serde(default = "default_max_freq")]
    pub max_freq: f64,

    #[serde(default = "default_decimals")]
    pub decimals: usize,

    /// Announce the value range first
    #[serde(default = "default_true")]
    pub description: bool,

    /// Play the track after rendering
    #[serde(default = "default_true")]
    pub autoplay: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            duration_ms: default_duration_ms(),
            gain_db: default_gain_db(),
            gains: None,
            labels: None,
            min_freq: default_min_freq(),
            max_freq: default_max_freq(),
            decimals: default_decimals(),
            description: true,
            autoplay: true,
        }
    }
}

fn default_duration_ms() -> u32 { 50 }
fn default_gain_db() -> f64 { -5.0 }
fn default_min_freq() -> f64 { 130.813 }
fn default_max_freq() -> f64 { 130.813 * 4.0 }
fn default_decimals() -> usize { 1 }
fn default_true() -> bool { true }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_audio_config() {
        let yaml = "sample_rate: 48000";
        let config: AudioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sample_rate, 48000);
        assert!(config.device.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: SonaplotConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, SonaplotConfig::default());
        assert!(config.validate().is_ok());
        assert_eq!(config.plot_options(), PlotOptions::default());
        assert_eq!(config.render_options(), RenderOptions::default());
    }

    #[test]
    fn test_render_config() {
        let yaml = r#"
mode: overlay
duration_ms: 80
gains: [-3, -6]
labels: [sales, costs]
description: false
"#;
        let config: RenderConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.mode, RenderMode::Overlay);
        assert_eq!(config.duration_ms, 80);
        assert_eq!(config.gains, Some(vec![-3.0, -6.0]));
        assert!(!config.description);
        assert!(config.autoplay);
    }

    #[test]
    fn test_language_threads_into_options() {
        let config: SonaplotConfig = serde_yaml::from_str("language: ja").unwrap();
        assert_eq!(config.plot_options().language, Language::Ja);
        assert_eq!(config.render_options().language, Language::Ja);
    }

    #[test]
    fn test_unknown_language_rejected() {
        assert!(serde_yaml::from_str::<SonaplotConfig>("language: fr").is_err());
    }

    #[test]
    fn test_invalid_sample_rate() {
        let mut config = SonaplotConfig::default();
        config.audio.sample_rate = 4000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_interactive_gain() {
        let mut config = SonaplotConfig::default();
        config.interactive.gain = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interactive_section_is_plot_options() {
        let yaml = r#"
language: ja
interactive:
  title: sales
  multiple_axes: true
  language: en
"#;
        let config: SonaplotConfig = serde_yaml::from_str(yaml).unwrap();
        let options = config.plot_options();
        assert_eq!(options.title, "sales");
        assert!(options.multiple_axes);
        assert_eq!(options.language, Language::Ja);
        assert_eq!(options.gain, PlotOptions::default().gain);
    }

    #[test]
    fn test_interactive_errors_surface_in_validate() {
        let mut config = SonaplotConfig::default();
        config.interactive.slider_partitions = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("slider_partitions"));
    }

    #[test]
    fn test_invalid_frequency_range() {
        let mut config = SonaplotConfig::default();
        config.render.min_freq = 600.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_freq"));
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut config = SonaplotConfig::default();
        config.render.duration_ms = 0;
        assert!(config.validate().is_err());
    }
}
