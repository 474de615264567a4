//! Synthesis building blocks
//!
//! Oscillators, envelopes, pan laws, and the live blip voice.

mod envelope;
mod oscillator;
pub mod pan;
mod voice;

pub use envelope::{Envelope, EnvelopeStage, Fade};
pub use oscillator::{Oscillator, Waveform};
pub use voice::{BlipVoice, Frame};
