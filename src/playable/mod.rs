//! Playable plots
//!
//! Renders a whole data set into an audio track that can be listened to
//! start to finish, no display required.

mod clip;
mod lines;
mod sequencer;
mod speech;

pub use clip::{ms_to_frames, AudioClip};
pub use lines::Lines;
pub use sequencer::{Plan, RenderMode, RenderOptions, Sequencer, MAX_OVERLAY_LINES};
pub use speech::{estimate_duration_ms, EspeakSpeech, SilentSpeech, SpeechSynth};

use anyhow::Result;

/// Something that can play a rendered track
pub trait PlaybackSink {
    /// Play `clip`, returning once playback has finished or was stopped
    fn play(&self, clip: &AudioClip) -> Result<()>;
}

/// Render `lines` and either play the track or hand it back.
///
/// With `options.autoplay` set the track goes to `sink` and `None` is
/// returned, otherwise the rendered track is returned untouched.
pub fn plot(
    lines: &Lines,
    options: &RenderOptions,
    speech: &dyn SpeechSynth,
    sink: &dyn PlaybackSink,
) -> Result<Option<AudioClip>> {
    let track = Sequencer::new(options, speech).render(lines)?;

    if options.autoplay {
        sink.play(&track)?;
        Ok(None)
    } else {
        Ok(Some(track))
    }
}
