//! Mapping from data values to audible parameters
//!
//! Values become pitch, positions become stereo pan.

mod linear;
mod mapper;
mod tone;

pub use linear::{map_frequency, pan_position, LinearMapper};
pub use mapper::Mapper;
pub use tone::{ToneMapper, ToneParams};
