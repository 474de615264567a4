//! Interactive plot sonification
//!
//! `plot` validates the input, builds the per-group sliders and y-axis
//! scales, and arms a [`Controller`] that the plotting surface then feeds
//! with pointer, tap, slider, and focus events.

mod controller;
mod speaker;

pub use controller::{Controller, ControllerState, ToneOutput};
pub use speaker::{CommandSpeaker, Speaker, SpeakerGroup, TranscriptSpeaker};

use std::sync::Arc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::PlotError;
use crate::locale::Language;
use crate::series::{sliders, AxisScales, Series, Slider};

fn default_width() -> u16 {
    80
}

fn default_height() -> u16 {
    24
}

fn default_gain() -> f64 {
    0.4
}

fn default_margin_x() -> f64 {
    1.0
}

fn default_title() -> String {
    "graph".to_string()
}

fn default_slider_partitions() -> usize {
    10
}

fn default_base_freq() -> f64 {
    261.626
}

fn default_freq_range() -> f64 {
    261.626
}

fn default_attack_ms() -> u64 {
    200
}

fn default_decay_ms() -> u64 {
    500
}

fn default_readout_delay_ms() -> u64 {
    3000
}

/// Options of an interactive plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOptions {
    /// Plot width in terminal cells
    #[serde(default = "default_width")]
    pub width: u16,

    /// Plot height in terminal cells
    #[serde(default = "default_height")]
    pub height: u16,

    /// Peak tone level (0.0 - 1.0)
    #[serde(default = "default_gain")]
    pub gain: f64,

    /// Maximum x-distance between pointer and point for a tone to play
    #[serde(default = "default_margin_x")]
    pub margin_x: f64,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_slider_partitions")]
    pub slider_partitions: usize,

    /// Draw the second label group against its own y-range
    #[serde(default)]
    pub multiple_axes: bool,

    #[serde(default)]
    pub language: Language,

    /// Frequency of the lowest y value (Hz)
    #[serde(default = "default_base_freq")]
    pub base_freq: f64,

    /// Frequency span above `base_freq` (Hz)
    #[serde(default = "default_freq_range")]
    pub freq_range: f64,

    #[serde(default = "default_attack_ms")]
    pub attack_ms: u64,

    /// Decay time constant
    #[serde(default = "default_decay_ms")]
    pub decay_ms: u64,

    /// Delay before a slider position is read out
    #[serde(default = "default_readout_delay_ms")]
    pub readout_delay_ms: u64,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            gain: default_gain(),
            margin_x: default_margin_x(),
            title: default_title(),
            slider_partitions: default_slider_partitions(),
            multiple_axes: false,
            language: Language::default(),
            base_freq: default_base_freq(),
            freq_range: default_freq_range(),
            attack_ms: default_attack_ms(),
            decay_ms: default_decay_ms(),
            readout_delay_ms: default_readout_delay_ms(),
        }
    }
}

impl PlotOptions {
    pub fn validate(&self) -> crate::error::Result<()> {
        if !(0.0..=1.0).contains(&self.gain) {
            return Err(PlotError::InvalidParameter(format!(
                "gain must be within 0.0 - 1.0, got {}",
                self.gain
            )));
        }
        if !(self.margin_x > 0.0) {
            return Err(PlotError::InvalidParameter(format!(
                "margin_x must be positive, got {}",
                self.margin_x
            )));
        }
        if self.slider_partitions == 0 {
            return Err(PlotError::InvalidParameter(
                "slider_partitions must be at least 1".to_string(),
            ));
        }
        if !(self.base_freq > 0.0) || self.freq_range < 0.0 {
            return Err(PlotError::InvalidParameter(format!(
                "invalid tone range {} + {} Hz",
                self.base_freq, self.freq_range
            )));
        }
        Ok(())
    }

    /// Attack time in seconds
    pub fn attack_secs(&self) -> f64 {
        self.attack_ms as f64 / 1000.0
    }

    /// Decay time constant in seconds
    pub fn decay_secs(&self) -> f64 {
        self.decay_ms as f64 / 1000.0
    }
}

/// An armed interactive plot: the controller plus what the surface draws
pub struct Session<T: ToneOutput> {
    pub controller: Controller<T>,
    pub sliders: Vec<Slider>,
    pub scales: AxisScales,
}

/// Interactive entry point.
///
/// Every input is validated before the output chain is touched; a
/// validation error leaves nothing behind.
pub fn plot<T: ToneOutput>(
    y: Vec<f64>,
    x: Option<Vec<f64>>,
    label: Option<&[i64]>,
    options: PlotOptions,
    output: T,
    speaker: Arc<dyn Speaker>,
) -> Result<Session<T>> {
    options.validate()?;
    let series = Series::new(y, x, label)?;
    let scales = AxisScales::new(&series, options.multiple_axes)?;
    let sliders = sliders(&series, options.slider_partitions)?;

    info!(
        points = series.len(),
        groups = series.group_count(),
        multiple_axes = options.multiple_axes,
        "interactive plot"
    );

    let mut controller = Controller::new(series, options, output, speaker);
    controller.init()?;

    Ok(Session { controller, sliders, scales })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::ToneParams;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct SharedOutput {
        events: Arc<Mutex<Vec<String>>>,
    }

    impl ToneOutput for SharedOutput {
        fn connect(&mut self) -> Result<()> {
            self.events.lock().unwrap().push("connect".to_string());
            Ok(())
        }

        fn blip(&mut self, tone: ToneParams, _gain: f64) {
            self.events
                .lock()
                .unwrap()
                .push(format!("blip {:.1}", tone.pan));
        }
    }

    fn speaker() -> Arc<dyn Speaker> {
        Arc::new(TranscriptSpeaker::new())
    }

    #[test]
    fn test_plot_arms_controller() {
        let output = SharedOutput::default();
        let events = Arc::clone(&output.events);

        let mut session = plot(
            vec![1.0, 2.0, 3.0, 4.0],
            None,
            Some(&[0, 0, 1, 1]),
            PlotOptions::default(),
            output,
            speaker(),
        )
        .unwrap();

        assert_eq!(session.controller.state(), ControllerState::Armed);
        assert_eq!(session.sliders.len(), 2);
        assert_eq!(session.sliders[1].start, 2.0);
        assert!((session.sliders[0].step - 0.1).abs() < 1e-12);
        assert!(session.scales.secondary.is_none());

        session.controller.on_hover(0.0);
        assert_eq!(*events.lock().unwrap(), vec!["connect", "blip -1.0"]);
    }

    #[test]
    fn test_plot_validates_before_connecting() {
        let output = SharedOutput::default();
        let events = Arc::clone(&output.events);

        let err = plot(vec![1.0, 2.0], None, Some(&[0, -1]), PlotOptions::default(), output, speaker())
            .err()
            .unwrap();

        assert_eq!(
            err.downcast_ref::<PlotError>(),
            Some(&PlotError::NegativeLabel { index: 1, label: -1 })
        );
        assert!(events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_plot_multiple_axes_needs_two_groups() {
        let options = PlotOptions { multiple_axes: true, ..PlotOptions::default() };
        let err = plot(vec![1.0, 2.0], None, None, options, SharedOutput::default(), speaker())
            .err()
            .unwrap();
        assert_eq!(
            err.downcast_ref::<PlotError>(),
            Some(&PlotError::MultiAxesGroups { groups: 1 })
        );
    }

    #[test]
    fn test_plot_multiple_axes_scales() {
        let options = PlotOptions { multiple_axes: true, ..PlotOptions::default() };
        let session = plot(
            vec![0.0, 10.0, 100.0, 300.0],
            Some(vec![0.0, 1.0, 0.0, 1.0]),
            Some(&[0, 0, 1, 1]),
            options,
            SharedOutput::default(),
            speaker(),
        )
        .unwrap();
        assert_eq!(session.scales.secondary, Some((100.0, 300.0)));
    }

    #[test]
    fn test_options_validation() {
        assert!(PlotOptions::default().validate().is_ok());

        let loud = PlotOptions { gain: 1.5, ..PlotOptions::default() };
        assert!(matches!(loud.validate(), Err(PlotError::InvalidParameter(_))));

        let no_margin = PlotOptions { margin_x: 0.0, ..PlotOptions::default() };
        assert!(no_margin.validate().is_err());

        let no_steps = PlotOptions { slider_partitions: 0, ..PlotOptions::default() };
        assert!(no_steps.validate().is_err());
    }

    #[test]
    fn test_options_from_partial_yaml() {
        let options: PlotOptions = serde_yaml::from_str("title: sales\nlanguage: ja\n").unwrap();
        assert_eq!(options.title, "sales");
        assert_eq!(options.language, Language::Ja);
        assert_eq!(options.gain, 0.4);
        assert_eq!(options.readout_delay_ms, 3000);
    }
}
