//! Stereo pan laws
//!
//! Both take a pan position in `[-1, 1]` (left to right) and return
//! `(left_gain, right_gain)` for a mono source.

use std::f64::consts::FRAC_PI_2;

/// Equal-power panning, used for the live tone.
pub fn equal_power(pan: f64) -> (f64, f64) {
    let x = (pan.clamp(-1.0, 1.0) + 1.0) / 2.0;
    ((x * FRAC_PI_2).cos(), (x * FRAC_PI_2).sin())
}

/// Balance panning used for rendered tracks.
///
/// The centre leaves both sides untouched. Moving off centre boosts the near
/// side by up to +3 dB and fades the far side out completely at the edge.
pub fn balance(pan: f64) -> (f64, f64) {
    let amount = pan.clamp(-1.0, 1.0);
    let boost = 2f64.powf(amount.abs());
    let reduce = (2.0 - boost).max(0.0);
    let (near, far) = (boost.sqrt(), reduce.sqrt());

    if amount >= 0.0 {
        (far, near)
    } else {
        (near, far)
    }
}
