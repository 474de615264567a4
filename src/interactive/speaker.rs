//! Spoken narration for interactive plots

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use crate::locale::Language;

/// Speaks short announcements.
///
/// Each call cancels whatever is still being spoken. Failures are logged,
/// never returned: narration is best effort.
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str, language: Language);
}

/// Keeps the latest announcement for display and logs every one
#[derive(Debug, Default)]
pub struct TranscriptSpeaker {
    last: Mutex<Option<String>>,
}

impl TranscriptSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent announcement
    pub fn last(&self) -> Option<String> {
        self.last.lock().ok().and_then(|l| l.clone())
    }
}

impl Speaker for TranscriptSpeaker {
    fn speak(&self, text: &str, language: Language) {
        info!(lang = language.voice(), "speak: {}", text);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(text.to_string());
        }
    }
}

/// Speaks through an eSpeak-compatible command, one utterance at a time
#[derive(Debug)]
pub struct CommandSpeaker {
    command: PathBuf,
    words_per_minute: u32,
    current: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    pub fn new(command: impl Into<PathBuf>, words_per_minute: u32) -> Self {
        Self {
            command: command.into(),
            words_per_minute,
            current: Mutex::new(None),
        }
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str, language: Language) {
        let Ok(mut current) = self.current.lock() else {
            return;
        };

        if let Some(mut child) = current.take() {
            // Cancel the previous utterance
            let _ = child.kill();
            let _ = child.wait();
        }

        let spawned = Command::new(&self.command)
            .arg("-v")
            .arg(language.voice())
            .arg("-s")
            .arg(self.words_per_minute.to_string())
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            Ok(child) => *current = Some(child),
            Err(e) => warn!("failed to run speech command {:?}: {}", self.command, e),
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(mut child) = current.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

/// Forwards every announcement to several speakers
#[derive(Default)]
pub struct SpeakerGroup {
    speakers: Vec<Arc<dyn Speaker>>,
}

impl SpeakerGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, speaker: Arc<dyn Speaker>) -> Self {
        self.speakers.push(speaker);
        self
    }
}

impl Speaker for SpeakerGroup {
    fn speak(&self, text: &str, language: Language) {
        for speaker in &self.speakers {
            speaker.speak(text, language);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_keeps_latest() {
        let speaker = TranscriptSpeaker::new();
        assert_eq!(speaker.last(), None);
        speaker.speak("Enter graph", Language::En);
        speaker.speak("Leave graph", Language::En);
        assert_eq!(speaker.last().as_deref(), Some("Leave graph"));
    }

    #[test]
    fn test_group_forwards_to_all() {
        let a = Arc::new(TranscriptSpeaker::new());
        let b = Arc::new(TranscriptSpeaker::new());
        let group = SpeakerGroup::new().with(a.clone()).with(b.clone());

        group.speak("label 1 is selected", Language::En);

        assert_eq!(a.last().as_deref(), Some("label 1 is selected"));
        assert_eq!(b.last().as_deref(), Some("label 1 is selected"));
    }

    #[test]
    fn test_missing_command_does_not_panic() {
        let speaker = CommandSpeaker::new("/nonexistent/espeak-ng", 175);
        speaker.speak("hello", Language::En);
    }
}
