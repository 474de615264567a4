//! In-memory stereo audio buffer

use crate::synth::{pan, Fade, Frame, Oscillator, Waveform};

/// Convert milliseconds to a frame count at `sample_rate`
pub fn ms_to_frames(ms: f64, sample_rate: u32) -> usize {
    (ms * sample_rate as f64 / 1000.0).round().max(0.0) as usize
}

fn db_to_gain(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Growable stereo audio buffer
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    sample_rate: u32,
    frames: Vec<Frame>,
}

impl AudioClip {
    /// Empty clip
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate, frames: Vec::new() }
    }

    pub fn from_frames(sample_rate: u32, frames: Vec<Frame>) -> Self {
        Self { sample_rate, frames }
    }

    /// Duplicate a mono signal onto both channels
    pub fn from_mono(sample_rate: u32, samples: &[f32]) -> Self {
        Self {
            sample_rate,
            frames: samples.iter().map(|&s| [s, s]).collect(),
        }
    }

    pub fn silent(duration_ms: f64, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            frames: vec![[0.0, 0.0]; ms_to_frames(duration_ms, sample_rate)],
        }
    }

    /// Centred tone of `waveform` at full scale
    pub fn tone(waveform: Waveform, frequency: f64, duration_ms: f64, sample_rate: u32) -> Self {
        let len = ms_to_frames(duration_ms, sample_rate);
        let mut osc = Oscillator::new(waveform, frequency, sample_rate as f64);
        let frames = (0..len)
            .map(|_| {
                let s = osc.generate() as f32;
                [s, s]
            })
            .collect();
        Self { sample_rate, frames }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn duration_ms(&self) -> f64 {
        self.frames.len() as f64 * 1000.0 / self.sample_rate as f64
    }

    /// Append `other` after the end of this clip
    pub fn append(&mut self, other: &AudioClip) {
        if other.sample_rate == self.sample_rate {
            self.frames.extend_from_slice(&other.frames);
        } else {
            self.frames.extend(other.resample(self.sample_rate).frames);
        }
    }

    /// Mix `other` into this clip starting at frame 0.
    ///
    /// The result is as long as the longer of the two.
    pub fn overlay(&mut self, other: &AudioClip) {
        let other = if other.sample_rate == self.sample_rate {
            std::borrow::Cow::Borrowed(other)
        } else {
            std::borrow::Cow::Owned(other.resample(self.sample_rate))
        };

        if other.frames.len() > self.frames.len() {
            self.frames.resize(other.frames.len(), [0.0, 0.0]);
        }
        for (dst, src) in self.frames.iter_mut().zip(other.frames.iter()) {
            dst[0] += src[0];
            dst[1] += src[1];
        }
    }

    /// Scale by a gain in decibels
    pub fn apply_gain(mut self, db: f64) -> Self {
        let gain = db_to_gain(db) as f32;
        for frame in &mut self.frames {
            frame[0] *= gain;
            frame[1] *= gain;
        }
        self
    }

    /// Linear fade in and out, lengths in milliseconds
    pub fn fade(mut self, fade_in_ms: f64, fade_out_ms: f64) -> Self {
        let fade = Fade::new(
            ms_to_frames(fade_in_ms, self.sample_rate),
            ms_to_frames(fade_out_ms, self.sample_rate),
        );
        let len = self.frames.len();
        for (i, frame) in self.frames.iter_mut().enumerate() {
            let gain = fade.gain_at(i, len) as f32;
            frame[0] *= gain;
            frame[1] *= gain;
        }
        self
    }

    /// Move the clip in the stereo field, -1.0 left to 1.0 right
    pub fn pan(mut self, position: f64) -> Self {
        let (left, right) = pan::balance(position);
        for frame in &mut self.frames {
            frame[0] *= left as f32;
            frame[1] *= right as f32;
        }
        self
    }

    /// Linear-interpolation resample to `sample_rate`
    pub fn resample(&self, sample_rate: u32) -> AudioClip {
        if sample_rate == self.sample_rate || self.frames.is_empty() {
            return AudioClip { sample_rate, frames: self.frames.clone() };
        }

        let ratio = self.sample_rate as f64 / sample_rate as f64;
        let len = (self.frames.len() as f64 / ratio).round() as usize;
        let last = self.frames.len() - 1;

        let frames = (0..len)
            .map(|i| {
                let pos = i as f64 * ratio;
                let idx = (pos.floor() as usize).min(last);
                let next = (idx + 1).min(last);
                let t = (pos - idx as f64) as f32;
                let a = self.frames[idx];
                let b = self.frames[next];
                [a[0] + (b[0] - a[0]) * t, a[1] + (b[1] - a[1]) * t]
            })
            .collect();

        AudioClip { sample_rate, frames }
    }

    /// Largest absolute sample value on either channel
    pub fn peak(&self) -> f32 {
        self.frames
            .iter()
            .flat_map(|f| f.iter())
            .fold(0.0f32, |m, s| m.max(s.abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ms_to_frames() {
        assert_eq!(ms_to_frames(50.0, 44100), 2205);
        assert_eq!(ms_to_frames(1000.0, 8000), 8000);
    }

    #[test]
    fn test_append_concatenates() {
        let mut clip = AudioClip::silent(10.0, 8000);
        clip.append(&AudioClip::tone(Waveform::Sine, 440.0, 20.0, 8000));
        assert_eq!(clip.len(), 80 + 160);
        assert_eq!(clip.duration_ms(), 30.0);
    }

    #[test]
    fn test_overlay_keeps_longest() {
        let mut short = AudioClip::from_mono(1000, &[0.5; 10]);
        let long = AudioClip::from_mono(1000, &[0.25; 20]);
        short.overlay(&long);
        assert_eq!(short.len(), 20);
        assert_eq!(short.frames()[0], [0.75, 0.75]);
        assert_eq!(short.frames()[15], [0.25, 0.25]);
    }

    #[test]
    fn test_gain_in_decibels() {
        let clip = AudioClip::from_mono(1000, &[1.0; 4]).apply_gain(-20.0);
        assert!((clip.frames()[0][0] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pan_hard_right() {
        let clip = AudioClip::from_mono(1000, &[0.5; 4]).pan(1.0);
        assert_eq!(clip.frames()[0][0], 0.0);
        assert!(clip.frames()[0][1] > 0.5);
    }

    #[test]
    fn test_fade_silences_edges() {
        let clip = AudioClip::from_mono(1000, &[1.0; 40]).fade(10.0, 10.0);
        assert_eq!(clip.frames()[0], [0.0, 0.0]);
        assert_eq!(clip.frames()[20], [1.0, 1.0]);
        assert_eq!(clip.frames()[39], [0.0, 0.0]);
    }

    #[test]
    fn test_resample_length() {
        let clip = AudioClip::from_mono(22050, &[0.1; 2205]);
        let resampled = clip.resample(44100);
        assert_eq!(resampled.len(), 4410);
        assert_eq!(resampled.sample_rate(), 44100);
        assert!((resampled.duration_ms() - clip.duration_ms()).abs() < 1e-9);
    }

    #[test]
    fn test_append_resamples_foreign_rate() {
        let mut clip = AudioClip::new(16000);
        clip.append(&AudioClip::silent(100.0, 8000));
        assert_eq!(clip.len(), 1600);
    }

    #[test]
    fn test_tone_peak() {
        let clip = AudioClip::tone(Waveform::Square, 100.0, 50.0, 8000);
        assert_eq!(clip.peak(), 1.0);
    }
}
