//! WAV file recorder
//!
//! Writes rendered tracks to WAV files and reads speech clips back in.

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::playable::AudioClip;
use crate::synth::Frame;

/// Stereo WAV file recorder
pub struct Recorder {
    writer: WavWriter<BufWriter<File>>,
    sample_rate: u32,
    frames_written: u64,
}

impl Recorder {
    /// Create a new recorder
    ///
    /// # Arguments
    /// * `path` - Output file path
    /// * `sample_rate` - Sample rate in Hz
    pub fn new(path: &Path, sample_rate: u32) -> Result<Self> {
        let spec = WavSpec {
            channels: 2,
            sample_rate,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };

        let writer = WavWriter::create(path, spec)
            .with_context(|| format!("failed to create WAV file: {:?}", path))?;

        Ok(Self {
            writer,
            sample_rate,
            frames_written: 0,
        })
    }

    /// Get the sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the number of stereo frames written
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Get the duration recorded in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frames_written as f64 / self.sample_rate as f64
    }

    /// Write a single stereo frame
    pub fn write_frame(&mut self, frame: Frame) -> Result<()> {
        for sample in frame {
            self.writer
                .write_sample(sample)
                .context("failed to write sample")?;
        }
        self.frames_written += 1;
        Ok(())
    }

    /// Write a buffer of frames
    pub fn write_frames(&mut self, frames: &[Frame]) -> Result<()> {
        for &frame in frames {
            self.write_frame(frame)?;
        }
        Ok(())
    }

    /// Finalize the WAV file
    ///
    /// This must be called to properly close the file and write the header.
    pub fn finalize(self) -> Result<()> {
        self.writer.finalize().context("failed to finalize WAV file")
    }
}

/// Write a whole clip to `path`
pub fn write_clip(path: &Path, clip: &AudioClip) -> Result<()> {
    let mut recorder = Recorder::new(path, clip.sample_rate())?;
    recorder.write_frames(clip.frames())?;
    recorder.finalize()
}

/// Read a mono or stereo WAV file into a clip
pub fn read_wav(path: &Path) -> Result<AudioClip> {
    let mut reader =
        WavReader::open(path).with_context(|| format!("failed to open WAV file: {:?}", path))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<_, _>>()
            .context("failed to read samples")?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<std::result::Result<_, _>>()
                .context("failed to read samples")?
        }
    };

    let channels = spec.channels.max(1) as usize;
    let frames = samples
        .chunks(channels)
        .map(|chunk| match chunk {
            [mono] => [*mono, *mono],
            [left, right, ..] => [*left, *right],
            [] => [0.0, 0.0],
        })
        .collect();

    Ok(AudioClip::from_frames(spec.sample_rate, frames))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_recorder_creation() {
        let file = NamedTempFile::new().unwrap();
        let recorder = Recorder::new(file.path(), 44100).unwrap();

        assert_eq!(recorder.sample_rate(), 44100);
        assert_eq!(recorder.frames_written(), 0);
        assert_eq!(recorder.duration_secs(), 0.0);
    }

    #[test]
    fn test_recorder_write_frames() {
        let file = NamedTempFile::new().unwrap();
        let mut recorder = Recorder::new(file.path(), 44100).unwrap();

        recorder.write_frame([0.5, -0.5]).unwrap();
        recorder.write_frames(&[[0.1, 0.2], [0.3, 0.4]]).unwrap();

        assert_eq!(recorder.frames_written(), 3);
    }

    #[test]
    fn test_recorder_duration() {
        let file = NamedTempFile::new().unwrap();
        let mut recorder = Recorder::new(file.path(), 8000).unwrap();

        for _ in 0..8000 {
            recorder.write_frame([0.0, 0.0]).unwrap();
        }

        assert!((recorder.duration_secs() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_clip_round_trips_through_wav() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        let clip = AudioClip::from_frames(8000, vec![[0.25, -0.25]; 100]);

        write_clip(&path, &clip).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 2);
        assert_eq!(spec.sample_rate, 8000);
        assert_eq!(spec.sample_format, SampleFormat::Float);

        assert_eq!(read_wav(&path).unwrap(), clip);
    }

    #[test]
    fn test_read_mono_int_wav() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_path_buf();
        {
            let spec = WavSpec {
                channels: 1,
                sample_rate: 22050,
                bits_per_sample: 16,
                sample_format: SampleFormat::Int,
            };
            let mut writer = WavWriter::create(&path, spec).unwrap();
            writer.write_sample(16384i16).unwrap();
            writer.write_sample(-32768i16).unwrap();
            writer.finalize().unwrap();
        }

        let clip = read_wav(&path).unwrap();
        assert_eq!(clip.sample_rate(), 22050);
        assert_eq!(clip.frames(), &[[0.5, 0.5], [-1.0, -1.0]]);
    }
}
