//! Event-driven sonification controller
//!
//! Receives pointer, tap, slider, and focus events from the plotting
//! surface. Pointer-like events resolve the nearest point of the active
//! label group and play it as a short tone; discrete events are narrated.
//!
//! ```text
//! Idle --init--> Armed --hover/slider (point in margin)--> Active
//! ```

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{PlotOptions, Speaker};
use crate::mapping::{ToneMapper, ToneParams};
use crate::series::{nearest, Nearest, Series};

/// Output side of the tone chain (oscillator, gain, panner)
pub trait ToneOutput {
    /// Establish the output chain. Once it has succeeded, calling it again
    /// must be a no-op; after a failure it is retried.
    fn connect(&mut self) -> Result<()>;

    /// Retune and retrigger the tone envelope toward `gain`
    fn blip(&mut self, tone: ToneParams, gain: f64);
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Output chain not established yet
    Idle,
    /// Connected, nothing played yet
    Armed,
    /// A tone has been triggered and may still be sounding
    Active,
}

/// Interactive sonification state machine
pub struct Controller<T: ToneOutput> {
    series: Series,
    options: PlotOptions,
    output: T,
    speaker: Arc<dyn Speaker>,
    state: ControllerState,
    target: usize,
    pending_readout: Option<JoinHandle<()>>,
}

impl<T: ToneOutput> Controller<T> {
    pub fn new(series: Series, options: PlotOptions, output: T, speaker: Arc<dyn Speaker>) -> Self {
        Self {
            series,
            options,
            output,
            speaker,
            state: ControllerState::Idle,
            target: 0,
            pending_readout: None,
        }
    }

    /// Connect the output chain and select group 0
    pub fn init(&mut self) -> Result<()> {
        if self.state == ControllerState::Idle {
            self.output.connect()?;
            self.state = ControllerState::Armed;
            debug!("controller armed");
        }
        self.target = 0;
        Ok(())
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Active label group
    pub fn target(&self) -> usize {
        self.target
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn options(&self) -> &PlotOptions {
        &self.options
    }

    pub fn output(&self) -> &T {
        &self.output
    }

    /// Nearest point of the active group to `position`
    pub fn resolve(&self, position: f64) -> Option<Nearest> {
        nearest(position, &self.series, self.target, self.options.multiple_axes)
    }

    /// Pointer moved to `position` on the x-axis
    pub fn on_hover(&mut self, position: f64) -> Option<ToneParams> {
        let hit = self.resolve(position)?;
        self.sound(&hit)
    }

    /// Slider of `group` moved to `position`.
    ///
    /// Selects the group, plays the nearest point, and reads it out after
    /// the readout delay. A newer slider move cancels a pending readout.
    pub fn on_slider_change(&mut self, group: usize, position: f64) -> Option<ToneParams> {
        if group >= self.series.group_count() {
            warn!(group, "slider for unknown label group");
            return None;
        }
        self.target = group;

        let hit = self.resolve(position)?;
        let tone = self.sound(&hit);
        let text = self.options.language.point(hit.point.x, hit.point.y);
        self.schedule_readout(text);
        tone
    }

    /// Pointer tapped at `position`: read the nearest point out loud
    pub fn on_tap(&mut self, position: f64) -> Option<String> {
        let hit = self.resolve(position)?;
        let text = self.options.language.point(hit.point.x, hit.point.y);
        self.say(&text);
        Some(text)
    }

    /// Cycle to the next label group. Only available with several groups.
    pub fn on_double_activate(&mut self) -> Option<String> {
        let groups = self.series.group_count();
        if groups < 2 {
            return None;
        }

        self.target = (self.target + 1) % groups;
        debug!(target = self.target, "label group selected");

        let text = self.options.language.label_selected(self.target);
        self.say(&text);
        Some(text)
    }

    pub fn on_enter(&mut self) -> String {
        let lang = self.options.language;
        let text = if self.series.group_count() > 1 {
            lang.enter_with_target(&self.options.title, self.target)
        } else {
            lang.enter(&self.options.title)
        };
        self.say(&text);
        text
    }

    pub fn on_leave(&mut self) -> String {
        let text = self.options.language.leave(&self.options.title);
        self.say(&text);
        text
    }

    /// Whether a slider readout is still waiting to be spoken
    pub fn readout_pending(&self) -> bool {
        self.pending_readout
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }

    fn sound(&mut self, hit: &Nearest) -> Option<ToneParams> {
        if self.state == ControllerState::Idle {
            debug!("ignoring trigger before init");
            return None;
        }
        if hit.distance > self.options.margin_x {
            return None;
        }

        let tone = ToneMapper::new(&hit.bounds, self.options.base_freq, self.options.freq_range)
            .map(&hit.point);
        self.output.blip(tone, self.options.gain);
        self.state = ControllerState::Active;
        Some(tone)
    }

    fn say(&self, text: &str) {
        self.speaker.speak(text, self.options.language);
    }

    fn schedule_readout(&mut self, text: String) {
        if let Some(previous) = self.pending_readout.take() {
            previous.abort();
        }

        let speaker = Arc::clone(&self.speaker);
        let language = self.options.language;
        let delay = Duration::from_millis(self.options.readout_delay_ms);

        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                self.pending_readout = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    speaker.speak(&text, language);
                }));
            }
            Err(_) => {
                warn!("no async runtime for delayed readout, speaking now");
                speaker.speak(&text, language);
            }
        }
    }
}

impl<T: ToneOutput> Drop for Controller<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending_readout.take() {
            pending.abort();
        }
    }
}
