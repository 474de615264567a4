//! Audio engine for sonaplot
//!
//! Owns the live tone chain of an interactive plot and the audio I/O
//! (device playback, WAV files).

mod player;
mod recorder;

pub use player::{default_device_name, list_output_devices, output_device, Player};
pub use recorder::{read_wav, write_clip, Recorder};

use std::sync::{Arc, Mutex};

use anyhow::Result;
use tracing::{debug, warn};

use crate::interactive::{PlotOptions, ToneOutput};
use crate::mapping::ToneParams;
use crate::synth::{BlipVoice, Frame, Waveform};

/// The oscillator, gain, and panner shared by every tone of a plot.
///
/// Created once per session and retuned by each trigger; a new trigger
/// supersedes whatever envelope was still sounding.
pub struct ToneChain {
    voice: Arc<Mutex<BlipVoice>>,
    waveform: Waveform,
    attack: f64,
    decay: f64,
    sample_rate: f64,
    device: Option<String>,
    player: Option<Player>,
    headless: bool,
    connected: bool,
}

impl ToneChain {
    /// Tone chain playing through the named output device (default when `None`)
    pub fn new(waveform: Waveform, attack: f64, decay: f64, device: Option<String>) -> Self {
        let sample_rate = 44100.0;
        Self {
            voice: Arc::new(Mutex::new(
                BlipVoice::new(waveform, sample_rate).with_envelope(attack, decay),
            )),
            waveform,
            attack,
            decay,
            sample_rate,
            device,
            player: None,
            headless: false,
            connected: false,
        }
    }

    /// Tone chain without an output device, pulled through [`ToneChain::fill_buffer`]
    pub fn headless(waveform: Waveform, attack: f64, decay: f64, sample_rate: f64) -> Self {
        Self {
            voice: Arc::new(Mutex::new(
                BlipVoice::new(waveform, sample_rate).with_envelope(attack, decay),
            )),
            waveform,
            attack,
            decay,
            sample_rate,
            device: None,
            player: None,
            headless: true,
            connected: false,
        }
    }

    /// Triangle tone chain configured from plot options
    pub fn from_options(options: &PlotOptions, device: Option<String>) -> Self {
        Self::new(Waveform::Triangle, options.attack_secs(), options.decay_secs(), device)
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether audio actually reaches a device
    pub fn is_audible(&self) -> bool {
        self.player.as_ref().map(|p| p.is_playing()).unwrap_or(false)
    }

    /// Shared handle to the live voice
    pub fn voice(&self) -> Arc<Mutex<BlipVoice>> {
        Arc::clone(&self.voice)
    }

    /// Pull frames from the voice when no device stream is running
    pub fn fill_buffer(&self, buffer: &mut [Frame]) {
        if let Ok(mut voice) = self.voice.lock() {
            for frame in buffer.iter_mut() {
                *frame = voice.process();
            }
        }
    }

    /// Stop the device stream
    pub fn stop(&mut self) {
        if let Some(mut player) = self.player.take() {
            player.stop();
        }
    }

    fn rebuild_voice(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.voice = Arc::new(Mutex::new(
            BlipVoice::new(self.waveform, sample_rate).with_envelope(self.attack, self.decay),
        ));
    }
}

impl ToneOutput for ToneChain {
    fn connect(&mut self) -> Result<()> {
        if self.connected {
            return Ok(());
        }

        if self.headless {
            debug!(sample_rate = self.sample_rate, "headless tone chain");
            self.connected = true;
            return Ok(());
        }

        let mut player = Player::new(self.device.clone());
        let rate = match player.sample_rate() {
            Ok(rate) => rate,
            Err(e) => {
                warn!("no audio output, tones stay silent: {:#}", e);
                self.headless = true;
                self.connected = true;
                return Ok(());
            }
        };

        self.rebuild_voice(rate as f64);
        // Left unconnected on failure so the next trigger retries
        player.start(self.voice())?;
        debug!(sample_rate = rate, "tone chain connected");
        self.player = Some(player);
        self.connected = true;
        Ok(())
    }

    fn blip(&mut self, tone: ToneParams, gain: f64) {
        match self.voice.lock() {
            Ok(mut voice) => voice.blip(tone.frequency, tone.pan, gain),
            Err(_) => warn!("tone voice poisoned, dropping blip"),
        }
    }
}

impl Drop for ToneChain {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> ToneChain {
        ToneChain::headless(Waveform::Triangle, 0.2, 0.5, 8000.0)
    }

    #[test]
    fn test_headless_connect_is_idempotent() {
        let mut chain = chain();
        assert!(!chain.is_connected());

        chain.connect().unwrap();
        let voice = chain.voice();
        chain.connect().unwrap();

        assert!(chain.is_connected());
        assert!(!chain.is_audible());
        assert!(Arc::ptr_eq(&voice, &chain.voice()));
    }

    #[test]
    fn test_silent_before_first_blip() {
        let mut chain = chain();
        chain.connect().unwrap();

        let mut buffer = vec![[1.0f32, 1.0]; 256];
        chain.fill_buffer(&mut buffer);
        assert!(buffer.iter().all(|f| *f == [0.0, 0.0]));
    }

    #[test]
    fn test_blip_produces_audio() {
        let mut chain = chain();
        chain.connect().unwrap();
        chain.blip(ToneParams { frequency: 392.0, pan: 0.0 }, 0.4);

        let mut buffer = vec![[0.0f32; 2]; 1600];
        chain.fill_buffer(&mut buffer);

        let peak = buffer.iter().map(|f| f[0].abs()).fold(0.0f32, f32::max);
        assert!(peak > 0.0);
        assert!(peak <= 0.4);
        assert_eq!(chain.voice().lock().unwrap().frequency(), 392.0);
    }

    #[test]
    fn test_later_blip_wins() {
        let mut chain = chain();
        chain.connect().unwrap();
        chain.blip(ToneParams { frequency: 300.0, pan: -1.0 }, 0.4);
        chain.blip(ToneParams { frequency: 500.0, pan: 1.0 }, 0.4);

        let voice = chain.voice();
        let voice = voice.lock().unwrap();
        assert_eq!(voice.frequency(), 500.0);
        assert_eq!(voice.pan(), 1.0);
    }

    #[test]
    fn test_missing_device_connects_silently() {
        let mut chain = ToneChain::new(
            Waveform::Triangle,
            0.01,
            0.05,
            Some("sonaplot-no-such-device".to_string()),
        );
        assert!(!chain.is_connected());

        chain.connect().unwrap();
        assert!(chain.is_connected());
        assert!(!chain.is_audible());

        chain.blip(ToneParams { frequency: 440.0, pan: 0.0 }, 0.4);
        let mut buffer = vec![[0.0f32; 2]; 64];
        chain.fill_buffer(&mut buffer);
        assert!(buffer.iter().flatten().all(|s| s.is_finite()));
    }

    #[test]
    fn test_from_options_uses_envelope_times() {
        let options = PlotOptions { attack_ms: 100, decay_ms: 250, ..PlotOptions::default() };
        let chain = ToneChain::from_options(&options, None);
        assert!(!chain.is_connected());
        assert_eq!(chain.sample_rate(), 44100.0);
    }
}
