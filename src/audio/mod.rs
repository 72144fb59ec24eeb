//! Audio output — cpal stream, lock-free command queue, click mixer.
//!
//! The engine owns the cpal output stream and talks to its callback through
//! a lock-free ring buffer. The main thread registers click sounds and keeps
//! [`ClickHandle`]s; each trigger becomes one command drained by the
//! [`ClickMixer`] on the audio thread.

pub mod click;
pub mod command;
pub mod mixer;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    traits::{Producer, Split},
    HeapRb,
};

pub use click::{default_pair, load_pair, ClickError, ClickSound, HIGH_HZ, LOW_HZ};
pub use command::AudioCommand;
pub use mixer::ClickMixer;

use crate::clock::Sound;

/// Ring buffer capacity (number of commands).
const COMMAND_CAPACITY: usize = 256;

/// Audio engine errors.
#[derive(Debug)]
pub enum AudioError {
    /// No audio output device found.
    NoOutputDevice,
    /// Failed to build the audio stream.
    StreamBuild(String),
    /// Failed to start the audio stream.
    StreamPlay(String),
    /// The command queue is full, so a click could not be loaded.
    QueueFull,
}

impl std::fmt::Display for AudioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioError::NoOutputDevice => write!(f, "no audio output device found"),
            AudioError::StreamBuild(e) => write!(f, "stream build error: {e}"),
            AudioError::StreamPlay(e) => write!(f, "stream play error: {e}"),
            AudioError::QueueFull => write!(f, "audio command queue is full"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Output stream parameters. The defaults mirror the classic mixer setup:
/// 44.1 kHz, stereo, a 1024-frame buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub buffer_size: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
            buffer_size: 1024,
        }
    }
}

/// The producer half of the command ring. Handles share it with the engine;
/// the mutex is only ever contended on the main thread, the audio-thread
/// consumer side stays lock-free.
type SharedProducer = Arc<Mutex<ringbuf::HeapProd<AudioCommand>>>;

fn push(producer: &SharedProducer, command: AudioCommand) -> bool {
    match producer.lock() {
        Ok(mut producer) => producer.try_push(command).is_ok(),
        Err(_) => false,
    }
}

/// The audio engine. Owns the cpal stream; the stream stops when the engine
/// is dropped, so it must outlive playback.
pub struct AudioEngine {
    _stream: cpal::Stream,
    producer: SharedProducer,
    sample_rate: u32,
    channels: u16,
    slots: usize,
}

impl AudioEngine {
    /// Open the default output device with `config` and start the stream.
    pub fn new(config: &AudioConfig) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;

        let rb = HeapRb::<AudioCommand>::new(COMMAND_CAPACITY);
        let (producer, consumer) = rb.split();
        let mut mixer = ClickMixer::new(consumer, config.channels);

        let stream_config = cpal::StreamConfig {
            channels: config.channels,
            sample_rate: cpal::SampleRate(config.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
        };

        let err_fn = |err: cpal::StreamError| {
            eprintln!("audio stream error: {err}");
        };

        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    mixer.process(data);
                },
                err_fn,
                None,
            )
            .map_err(|e| AudioError::StreamBuild(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AudioError::StreamPlay(e.to_string()))?;

        Ok(Self {
            _stream: stream,
            producer: Arc::new(Mutex::new(producer)),
            sample_rate: config.sample_rate,
            channels: config.channels,
            slots: 0,
        })
    }

    /// Ship `click` to the mixer and hand back a handle that triggers it.
    ///
    /// The click should already be at the engine's sample rate; the handle
    /// converts trigger durations with that rate.
    pub fn register(&mut self, click: ClickSound) -> Result<ClickHandle, AudioError> {
        let slot = self.slots;
        let loaded = push(
            &self.producer,
            AudioCommand::Load {
                slot,
                samples: click.into_samples(),
            },
        );
        if !loaded {
            return Err(AudioError::QueueFull);
        }
        self.slots += 1;
        Ok(ClickHandle {
            slot,
            sample_rate: self.sample_rate,
            producer: Arc::clone(&self.producer),
        })
    }

    /// The stream's sample rate.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// The stream's channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

/// A registered click. Triggering is wait-free from the player's point of
/// view: one bounded command push, no audio-thread synchronization.
#[derive(Clone)]
pub struct ClickHandle {
    slot: usize,
    sample_rate: u32,
    producer: SharedProducer,
}

impl Sound for ClickHandle {
    fn play(&self, max: Duration) {
        // A full queue drops this trigger; the next tick follows shortly.
        push(
            &self.producer,
            AudioCommand::Trigger {
                slot: self.slot,
                max_frames: frames_for(max, self.sample_rate),
            },
        );
    }
}

/// Inert stand-in used when the sound system cannot be initialized; timing
/// and reporting still run, triggers go nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentClick;

impl Sound for SilentClick {
    fn play(&self, _max: Duration) {}
}

fn frames_for(max: Duration, sample_rate: u32) -> usize {
    (max.as_secs_f64() * sample_rate as f64).round() as usize
}
