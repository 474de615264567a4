//! Real-time audio playback using cpal

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use tracing::{debug, warn};

use crate::playable::{AudioClip, PlaybackSink};
use crate::synth::{BlipVoice, Frame};

/// Pick an output device by name, or the default one
pub fn output_device(name: Option<&str>) -> Result<Device> {
    let host = cpal::default_host();

    if let Some(wanted) = name {
        let devices = host.output_devices().context("failed to list output devices")?;
        for device in devices {
            if device.name().map(|n| n == wanted).unwrap_or(false) {
                return Ok(device);
            }
        }
        return Err(anyhow!("output device '{}' not found", wanted));
    }

    host.default_output_device()
        .ok_or_else(|| anyhow!("No output device available"))
}

/// Sample rate the device plays at by default
pub fn device_sample_rate(device: &Device) -> Result<u32> {
    Ok(device.default_output_config()?.sample_rate().0)
}

/// Write a stereo frame into an interleaved device frame of any width
fn write_frame<T: cpal::Sample + cpal::FromSample<f32>>(out: &mut [T], frame: Frame) {
    match out.len() {
        0 => {}
        1 => out[0] = T::from_sample((frame[0] + frame[1]) * 0.5),
        _ => {
            out[0] = T::from_sample(frame[0]);
            out[1] = T::from_sample(frame[1]);
            for extra in out.iter_mut().skip(2) {
                *extra = T::from_sample(0.0f32);
            }
        }
    }
}

/// Pulls frames for the output stream
trait FrameSource: Send + 'static {
    fn next_frame(&mut self) -> Frame;
}

/// Live blip voice shared with the controller
struct VoiceSource(Arc<Mutex<BlipVoice>>);

impl FrameSource for VoiceSource {
    fn next_frame(&mut self) -> Frame {
        match self.0.try_lock() {
            Ok(mut voice) => voice.process(),
            // Locked while being retuned, output silence
            Err(_) => [0.0, 0.0],
        }
    }
}

/// Pre-rendered clip, played once
struct ClipSource {
    frames: Arc<Vec<Frame>>,
    position: Arc<AtomicUsize>,
}

impl FrameSource for ClipSource {
    fn next_frame(&mut self) -> Frame {
        let pos = self.position.fetch_add(1, Ordering::SeqCst);
        self.frames.get(pos).copied().unwrap_or([0.0, 0.0])
    }
}

/// Real-time audio player
pub struct Player {
    device: Option<String>,
    stream: Option<Stream>,
    running: Arc<AtomicBool>,
}

impl Player {
    /// Create a new player for the named output device (default device when `None`)
    pub fn new(device: Option<String>) -> Self {
        Self {
            device,
            stream: None,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sample rate of the configured output device
    pub fn sample_rate(&self) -> Result<u32> {
        device_sample_rate(&output_device(self.device.as_deref())?)
    }

    /// Start streaming a live voice
    pub fn start(&mut self, voice: Arc<Mutex<BlipVoice>>) -> Result<()> {
        let stream = self.open(VoiceSource(voice))?;
        self.stream = Some(stream);
        Ok(())
    }

    /// Stop playback
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        self.stream = None;
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Flag that stops blocking clip playback when cleared
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    fn open<S: FrameSource>(&self, source: S) -> Result<Stream> {
        let device = output_device(self.device.as_deref())?;
        let config = device.default_output_config()?;
        let sample_format = config.sample_format();
        let stream_config: StreamConfig = config.into();

        debug!(
            device = %device.name().unwrap_or_default(),
            sample_rate = stream_config.sample_rate.0,
            channels = stream_config.channels,
            "opening output stream"
        );

        self.running.store(true, Ordering::SeqCst);
        let running = Arc::clone(&self.running);

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32, S>(&device, &stream_config, source, running)?,
            SampleFormat::I16 => build_stream::<i16, S>(&device, &stream_config, source, running)?,
            SampleFormat::U16 => build_stream::<u16, S>(&device, &stream_config, source, running)?,
            _ => return Err(anyhow!("Unsupported sample format")),
        };

        stream.play()?;
        Ok(stream)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(None)
    }
}

impl PlaybackSink for Player {
    /// Play `clip` to the end, or until the running flag is cleared
    fn play(&self, clip: &AudioClip) -> Result<()> {
        let rate = self.sample_rate()?;
        let frames = Arc::new(clip.resample(rate).frames().to_vec());
        let total = frames.len();
        let position = Arc::new(AtomicUsize::new(0));

        let _stream = self.open(ClipSource {
            frames,
            position: Arc::clone(&position),
        })?;

        while self.running.load(Ordering::SeqCst) && position.load(Ordering::SeqCst) < total {
            std::thread::sleep(Duration::from_millis(20));
        }
        self.running.store(false, Ordering::SeqCst);

        Ok(())
    }
}

fn build_stream<T, S>(
    device: &Device,
    config: &StreamConfig,
    mut source: S,
    running: Arc<AtomicBool>,
) -> Result<Stream>
where
    T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
    S: FrameSource,
{
    let channels = config.channels as usize;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            if !running.load(Ordering::SeqCst) {
                // Fill with silence when stopped
                for sample in data.iter_mut() {
                    *sample = T::from_sample(0.0f32);
                }
                return;
            }

            for out in data.chunks_mut(channels) {
                write_frame(out, source.next_frame());
            }
        },
        |err| {
            warn!("Audio stream error: {}", err);
        },
        None,
    )?;

    Ok(stream)
}

/// List all available output devices with their default configuration
pub fn list_output_devices() -> Vec<(String, StreamConfig)> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(output_devices) = host.output_devices() {
        for device in output_devices {
            if let (Ok(name), Ok(config)) = (device.name(), device.default_output_config()) {
                devices.push((name, config.into()));
            }
        }
    }

    devices
}

/// Get the default output device name
pub fn default_device_name() -> Option<String> {
    let host = cpal::default_host();
    host.default_output_device().and_then(|d| d.name().ok())
}
