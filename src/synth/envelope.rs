//! Amplitude envelopes
//!
//! [`Envelope`] shapes the live "blip": a linear attack to the peak gain,
//! then an exponential decay back toward silence. There is no note-off, a
//! new trigger simply starts another attack from the current level.
//!
//! [`Fade`] is the linear fade-in/fade-out applied to rendered tones.

/// Level below which a decaying envelope counts as silent
const SILENCE: f64 = 1e-4;

/// Envelope stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnvelopeStage {
    Idle,
    Attack,
    Decay,
}

/// Attack/decay envelope generator
#[derive(Debug, Clone)]
pub struct Envelope {
    sample_rate: f64,

    /// Seconds to reach the peak
    attack: f64,
    /// Time constant of the exponential decay, in seconds
    decay: f64,

    stage: EnvelopeStage,
    level: f64,
    peak: f64,
    attack_step: f64,
    attack_remaining: usize,
}

impl Envelope {
    /// Create a new envelope with a 200ms attack and a 500ms decay constant
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            attack: 0.2,
            decay: 0.5,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            peak: 0.0,
            attack_step: 0.0,
            attack_remaining: 0,
        }
    }

    /// Set attack time in seconds
    pub fn set_attack(&mut self, seconds: f64) {
        self.attack = seconds.max(0.001);
    }

    /// Set the decay time constant in seconds
    pub fn set_decay(&mut self, seconds: f64) {
        self.decay = seconds.max(0.001);
    }

    /// Start an attack toward `peak` from wherever the level is now
    pub fn trigger(&mut self, peak: f64) {
        self.peak = peak.clamp(0.0, 1.0);
        let samples = (self.attack * self.sample_rate).round().max(1.0);
        self.attack_step = (self.peak - self.level) / samples;
        self.attack_remaining = samples as usize;
        self.stage = EnvelopeStage::Attack;
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    /// Generate the next envelope sample
    pub fn process(&mut self) -> f64 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                self.level += self.attack_step;
                self.attack_remaining = self.attack_remaining.saturating_sub(1);

                if self.attack_remaining == 0 {
                    self.level = self.peak;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                let coeff = (-1.0 / (self.decay * self.sample_rate)).exp();
                self.level *= coeff;

                if self.level < SILENCE {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        self.level
    }

    /// Get current level without advancing
    pub fn level(&self) -> f64 {
        self.level
    }
}

/// Linear fade in and out at the edges of a fixed-length tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub fade_in: usize,
    pub fade_out: usize,
}

impl Fade {
    pub fn new(fade_in: usize, fade_out: usize) -> Self {
        Self { fade_in, fade_out }
    }

    /// Gain at sample `index` of a tone `len` samples long
    pub fn gain_at(&self, index: usize, len: usize) -> f64 {
        let mut gain = 1.0;
        if self.fade_in > 0 && index < self.fade_in {
            gain *= index as f64 / self.fade_in as f64;
        }
        let remaining = len.saturating_sub(index + 1);
        if self.fade_out > 0 && remaining < self.fade_out {
            gain *= remaining as f64 / self.fade_out as f64;
        }
        gain
    }
}
