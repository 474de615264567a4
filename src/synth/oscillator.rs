//! Basic oscillator implementation

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlotError;

/// Duty cycle of the pulse wave, narrower than square so the two stay apart
const PULSE_DUTY: f64 = 0.25;

/// Waveform types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Waveform {
    Sine,
    Pulse,
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    /// Timbres assigned to overlaid lines, one per channel slot
    pub const CHANNELS: [Waveform; 5] = [
        Waveform::Sine,
        Waveform::Pulse,
        Waveform::Square,
        Waveform::Sawtooth,
        Waveform::Triangle,
    ];

    /// Spoken name of the waveform
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "Sine",
            Waveform::Pulse => "Pulse",
            Waveform::Square => "Square",
            Waveform::Sawtooth => "Sawtooth",
            Waveform::Triangle => "Triangle",
        }
    }

    /// Value of the waveform at `phase` in `[0, 1)`
    pub fn sample(&self, phase: f64) -> f64 {
        match self {
            Waveform::Sine => (phase * 2.0 * PI).sin(),
            Waveform::Pulse => if phase < PULSE_DUTY { 1.0 } else { -1.0 },
            Waveform::Square => if phase < 0.5 { 1.0 } else { -1.0 },
            Waveform::Sawtooth => 2.0 * phase - 1.0,
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sine" => Ok(Waveform::Sine),
            "pulse" => Ok(Waveform::Pulse),
            "square" => Ok(Waveform::Square),
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "triangle" => Ok(Waveform::Triangle),
            other => Err(PlotError::InvalidParameter(format!("unknown waveform '{}'", other))),
        }
    }
}

/// A basic oscillator that generates waveforms
#[derive(Debug, Clone)]
pub struct Oscillator {
    waveform: Waveform,
    phase: f64,
    frequency: f64,
    sample_rate: f64,
}

impl Oscillator {
    /// Create a new oscillator
    pub fn new(waveform: Waveform, frequency: f64, sample_rate: f64) -> Self {
        Self {
            waveform,
            phase: 0.0,
            frequency,
            sample_rate,
        }
    }

    /// Set the frequency. Non-finite values are ignored.
    pub fn set_frequency(&mut self, frequency: f64) {
        if frequency.is_finite() {
            self.frequency = frequency;
        }
    }

    /// Get the current frequency
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Generate the next sample
    pub fn generate(&mut self) -> f64 {
        let sample = self.waveform.sample(self.phase);

        self.phase += self.frequency / self.sample_rate;
        if self.phase >= 1.0 {
            self.phase -= self.phase.floor();
        }

        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_oscillator() {
        let mut osc = Oscillator::new(Waveform::Sine, 440.0, 44100.0);

        // First sample should be 0 (sin(0))
        let sample = osc.generate();
        assert!((sample - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_square_oscillator() {
        let mut osc = Oscillator::new(Waveform::Square, 1.0, 4.0);

        assert_eq!(osc.generate(), 1.0); // phase 0.0
        assert_eq!(osc.generate(), 1.0); // phase 0.25
        assert_eq!(osc.generate(), -1.0); // phase 0.5
        assert_eq!(osc.generate(), -1.0); // phase 0.75
    }

    #[test]
    fn test_pulse_is_narrower_than_square() {
        let mut osc = Oscillator::new(Waveform::Pulse, 1.0, 4.0);

        assert_eq!(osc.generate(), 1.0); // phase 0.0
        assert_eq!(osc.generate(), -1.0); // phase 0.25
        assert_eq!(osc.generate(), -1.0);
        assert_eq!(osc.generate(), -1.0);
    }

    #[test]
    fn test_sawtooth_oscillator() {
        let mut osc = Oscillator::new(Waveform::Sawtooth, 1.0, 4.0);

        assert_eq!(osc.generate(), -1.0);
        assert_eq!(osc.generate(), -0.5);
        assert_eq!(osc.generate(), 0.0);
        assert_eq!(osc.generate(), 0.5);
    }

    #[test]
    fn test_frequency_change() {
        let mut osc = Oscillator::new(Waveform::Triangle, 440.0, 44100.0);
        assert_eq!(osc.frequency(), 440.0);

        osc.set_frequency(880.0);
        assert_eq!(osc.frequency(), 880.0);

        osc.set_frequency(f64::NAN);
        osc.set_frequency(f64::INFINITY);
        assert_eq!(osc.frequency(), 880.0);
        assert!((0..1000).all(|_| osc.generate().is_finite()));
    }

    #[test]
    fn test_channel_waveforms_are_distinct() {
        let names: Vec<&str> = Waveform::CHANNELS.iter().map(|w| w.name()).collect();
        assert_eq!(names, vec!["Sine", "Pulse", "Square", "Sawtooth", "Triangle"]);
        assert_eq!("saw".parse::<Waveform>().unwrap(), Waveform::Sawtooth);
        assert!("noise".parse::<Waveform>().is_err());
    }
}
