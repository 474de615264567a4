//! Offline track assembly
//!
//! Every value becomes a short tone whose pitch follows the value. Lines are
//! either played one after another or mixed together, each with its own
//! timbre. A spoken prologue can announce the value range first, followed by
//! a reference tone for each end of the pitch scale.

use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AudioClip, Lines, SpeechSynth};
use crate::error::PlotError;
use crate::locale::Language;
use crate::mapping::map_frequency;
use crate::synth::Waveform;

/// Most lines an overlay can tell apart, one per waveform
pub const MAX_OVERLAY_LINES: usize = Waveform::CHANNELS.len();

/// Reference tone played after each range announcement
const REFERENCE_TONE_MS: f64 = 1000.0;
const REFERENCE_TONE_GAIN_DB: f64 = -10.0;
const REFERENCE_TONE_FADE_MS: f64 = 20.0;

/// How multiple lines are arranged in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// One line after another
    #[default]
    Sequential,
    /// All lines at once, told apart by waveform
    Overlay,
}

impl FromStr for RenderMode {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sequential" => Ok(RenderMode::Sequential),
            "overlay" => Ok(RenderMode::Overlay),
            other => Err(PlotError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Sequential => f.write_str("sequential"),
            RenderMode::Overlay => f.write_str("overlay"),
        }
    }
}

/// Parameters of an offline render
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    /// Length of each tone
    pub duration_ms: u32,
    /// Gain in dB applied to every line without its own entry in `gains`
    pub gain_db: f64,
    /// Per-line gains in dB
    pub gains: Option<Vec<f64>>,
    /// Spoken name of each line
    pub labels: Option<Vec<String>>,
    /// Frequency of the smallest value
    pub min_freq: f64,
    /// Frequency of the largest value
    pub max_freq: f64,
    /// Decimals used when reading out the value range
    pub decimals: usize,
    /// Announce the value range before the data
    pub description: bool,
    /// Play the track instead of returning it
    pub autoplay: bool,
    pub language: Language,
    pub sample_rate: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Sequential,
            duration_ms: 50,
            gain_db: -5.0,
            gains: None,
            labels: None,
            min_freq: 130.813,
            max_freq: 130.813 * 4.0,
            decimals: 1,
            description: true,
            autoplay: true,
            language: Language::En,
            sample_rate: 44100,
        }
    }
}

/// Validated render inputs, resolved before any audio is produced
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub labels: Vec<String>,
    pub gains: Vec<f64>,
    pub min_value: f64,
    pub max_value: f64,
}

/// Builds tracks from [`Lines`]
pub struct Sequencer<'a> {
    options: &'a RenderOptions,
    speech: &'a dyn SpeechSynth,
}

impl<'a> Sequencer<'a> {
    pub fn new(options: &'a RenderOptions, speech: &'a dyn SpeechSynth) -> Self {
        Self { options, speech }
    }

    /// Check `lines` against the options and resolve defaults.
    pub fn prepare(&self, lines: &Lines) -> crate::error::Result<Plan> {
        let opts = self.options;
        let channels = lines.channels();

        if opts.mode == RenderMode::Overlay && channels > MAX_OVERLAY_LINES {
            return Err(PlotError::TooManyChannels {
                max: MAX_OVERLAY_LINES,
                actual: channels,
            });
        }
        if opts.duration_ms == 0 {
            return Err(PlotError::InvalidParameter("duration_ms must be positive".to_string()));
        }
        if !(opts.min_freq > 0.0 && opts.min_freq < opts.max_freq) {
            return Err(PlotError::InvalidParameter(format!(
                "need 0 < min_freq < max_freq, got {} and {}",
                opts.min_freq, opts.max_freq
            )));
        }

        let labels = match &opts.labels {
            Some(labels) if labels.len() != channels => {
                return Err(PlotError::LengthMismatch {
                    what: "labels",
                    expected: channels,
                    actual: labels.len(),
                })
            }
            Some(labels) => labels.clone(),
            None => (0..channels).map(|i| opts.language.default_line_label(i)).collect(),
        };

        let gains = match &opts.gains {
            Some(gains) if gains.len() != channels => {
                return Err(PlotError::LengthMismatch {
                    what: "gains",
                    expected: channels,
                    actual: gains.len(),
                })
            }
            Some(gains) => gains.clone(),
            None => vec![opts.gain_db; channels],
        };

        let (min_value, max_value) = lines
            .value_range()
            .ok_or_else(|| PlotError::MalformedLines("no finite values".to_string()))?;

        Ok(Plan { labels, gains, min_value, max_value })
    }

    /// Render the full track
    pub fn render(&self, lines: &Lines) -> Result<AudioClip> {
        let plan = self.prepare(lines)?;
        let opts = self.options;
        let lang = opts.language;

        debug!(
            mode = %opts.mode,
            channels = lines.channels(),
            rows = lines.rows(),
            "rendering track"
        );

        let mut track = AudioClip::new(opts.sample_rate);

        if opts.description {
            let min = spoken_value(plan.min_value, opts.decimals);
            let max = spoken_value(plan.max_value, opts.decimals);
            track.append(&self.say(&lang.minimum(&min))?);
            track.append(&self.reference_tone(opts.min_freq));
            track.append(&self.say(&lang.maximum(&max))?);
            track.append(&self.reference_tone(opts.max_freq));
        }

        match opts.mode {
            RenderMode::Sequential => {
                for channel in 0..lines.channels() {
                    track.append(&self.say(&plan.labels[channel])?);
                    track.append(&self.line(lines, channel, Waveform::Sine, &plan));
                }
            }
            RenderMode::Overlay => {
                for (channel, label) in plan.labels.iter().enumerate() {
                    let shape = Waveform::CHANNELS[channel].name();
                    track.append(&self.say(&lang.line_shape(label, shape))?);
                }

                let mut mixed = AudioClip::new(opts.sample_rate);
                for channel in 0..lines.channels() {
                    mixed.overlay(&self.line(lines, channel, Waveform::CHANNELS[channel], &plan));
                }
                track.append(&mixed);
            }
        }

        debug!(duration_ms = track.duration_ms(), "track rendered");
        Ok(track)
    }

    fn say(&self, text: &str) -> Result<AudioClip> {
        self.speech.synthesize(text, self.options.language, self.options.sample_rate)
    }

    fn reference_tone(&self, frequency: f64) -> AudioClip {
        AudioClip::tone(Waveform::Sine, frequency, REFERENCE_TONE_MS, self.options.sample_rate)
            .apply_gain(REFERENCE_TONE_GAIN_DB)
            .fade(REFERENCE_TONE_FADE_MS, REFERENCE_TONE_FADE_MS)
    }

    /// Tones of one line, panned left to right across the rows
    fn line(&self, lines: &Lines, channel: usize, waveform: Waveform, plan: &Plan) -> AudioClip {
        let opts = self.options;
        let duration = opts.duration_ms as f64;
        let fade = (opts.duration_ms / 4) as f64;
        let rows = lines.rows();

        let mut clip = AudioClip::new(opts.sample_rate);
        for (row, &value) in lines.column(channel).iter().enumerate() {
            if value.is_nan() {
                clip.append(&AudioClip::silent(duration, opts.sample_rate));
                continue;
            }

            let frequency = map_frequency(value, plan.min_value, plan.max_value, opts.min_freq, opts.max_freq);
            let pan = -1.0 + row as f64 / rows as f64 * 2.0;
            let tone = AudioClip::tone(waveform, frequency, duration, opts.sample_rate)
                .apply_gain(plan.gains[channel])
                .fade(fade, fade)
                .pan(pan);
            clip.append(&tone);
        }
        clip
    }
}

/// Round to at most `decimals` places without padding zeros; whole
/// numbers keep one decimal ("2.0").
fn spoken_value(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals.min(15) as i32);
    let scaled = (value * scale).round() / scale;
    let rounded = if scaled.is_finite() { scaled } else { value };

    let text = rounded.to_string();
    if rounded.is_finite() && !text.contains('.') {
        format!("{}.0", text)
    } else {
        text
    }
}
