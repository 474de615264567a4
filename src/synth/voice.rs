//! Blip voice: oscillator into gain into stereo panner

use tracing::debug;

use super::{pan, Envelope, Oscillator, Waveform};

/// One stereo sample
pub type Frame = [f32; 2];

/// Live tone voice retriggered by every sonified point.
///
/// Frequency and pan change immediately, only the gain follows the envelope.
#[derive(Debug, Clone)]
pub struct BlipVoice {
    oscillator: Oscillator,
    envelope: Envelope,
    pan: f64,
}

impl BlipVoice {
    pub fn new(waveform: Waveform, sample_rate: f64) -> Self {
        Self {
            oscillator: Oscillator::new(waveform, 440.0, sample_rate),
            envelope: Envelope::new(sample_rate),
            pan: 0.0,
        }
    }

    /// Configure attack time and decay time constant, both in seconds
    pub fn with_envelope(mut self, attack: f64, decay: f64) -> Self {
        self.envelope.set_attack(attack);
        self.envelope.set_decay(decay);
        self
    }

    /// Retune, reposition, and restart the envelope toward `gain`.
    ///
    /// A blip with a non-finite parameter is dropped.
    pub fn blip(&mut self, frequency: f64, pan: f64, gain: f64) {
        if !(frequency.is_finite() && pan.is_finite() && gain.is_finite()) {
            debug!(frequency, pan, gain, "dropping blip with non-finite parameter");
            return;
        }
        self.oscillator.set_frequency(frequency);
        self.pan = pan.clamp(-1.0, 1.0);
        self.envelope.trigger(gain);
    }

    pub fn frequency(&self) -> f64 {
        self.oscillator.frequency()
    }

    pub fn pan(&self) -> f64 {
        self.pan
    }

    pub fn level(&self) -> f64 {
        self.envelope.level()
    }

    pub fn is_active(&self) -> bool {
        self.envelope.is_active()
    }

    /// Generate the next stereo frame
    pub fn process(&mut self) -> Frame {
        // The oscillator keeps running while silent, like a started Web Audio node
        let sample = self.oscillator.generate() * self.envelope.process();
        let (left, right) = pan::equal_power(self.pan);
        [(sample * left) as f32, (sample * right) as f32]
    }
}
