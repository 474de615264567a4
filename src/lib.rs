//! sonaplot - plots you can hear
//!
//! Turns numeric series into sound for non-visual data exploration.
//! Interactive plots play a short tone for the point under the cursor,
//! pitch following y and stereo position following x. Playable plots
//! render a whole data set into a track, one tone per value.

pub mod config;
pub mod engine;
pub mod error;
pub mod interactive;
pub mod locale;
pub mod mapping;
pub mod playable;
pub mod series;
pub mod synth;
pub mod viz;

pub use config::SonaplotConfig;
pub use engine::ToneChain;
pub use error::PlotError;
pub use locale::Language;
