//! Click mixer — runs on the cpal audio thread.
//!
//! Drains commands from the ring buffer, then sums the active click voices
//! into the interleaved output. Loaded clicks are mono; a voice's current
//! sample is written to every channel of its frame.

use ringbuf::traits::Consumer;
use ringbuf::HeapCons;

use super::command::AudioCommand;

/// Most clicks that can sound at once; triggers beyond this are dropped.
const MAX_VOICES: usize = 8;

/// One playing click: a cursor into a loaded slot.
#[derive(Debug)]
struct Voice {
    slot: usize,
    pos: usize,
    end: usize,
}

/// State that lives on the audio thread. Accessed only from the cpal callback.
pub struct ClickMixer {
    consumer: HeapCons<AudioCommand>,
    clicks: Vec<Vec<f32>>,
    voices: Vec<Voice>,
    channels: u16,
}

impl ClickMixer {
    /// Create a mixer draining `consumer`, writing `channels`-wide frames.
    pub fn new(consumer: HeapCons<AudioCommand>, channels: u16) -> Self {
        Self {
            consumer,
            clicks: Vec::new(),
            voices: Vec::new(),
            channels,
        }
    }

    /// Called by cpal for each output buffer. Fills `output` completely.
    pub fn process(&mut self, output: &mut [f32]) {
        // 1. Drain pending commands.
        while let Some(cmd) = self.consumer.try_pop() {
            match cmd {
                AudioCommand::Load { slot, samples } => {
                    // Replacing a click silences any voice still playing it.
                    self.voices.retain(|v| v.slot != slot);
                    if self.clicks.len() <= slot {
                        self.clicks.resize_with(slot + 1, Vec::new);
                    }
                    self.clicks[slot] = samples;
                }
                AudioCommand::Trigger { slot, max_frames } => {
                    let len = self.clicks.get(slot).map_or(0, Vec::len);
                    let end = len.min(max_frames);
                    if end > 0 && self.voices.len() < MAX_VOICES {
                        self.voices.push(Voice { slot, pos: 0, end });
                    }
                }
            }
        }

        // 2. Sum voices frame by frame; every channel gets the same mix.
        let channels = self.channels as usize;
        for frame in output.chunks_mut(channels) {
            let mut mixed = 0.0f32;
            for voice in self.voices.iter_mut() {
                if voice.pos < voice.end {
                    mixed += self.clicks[voice.slot][voice.pos];
                    voice.pos += 1;
                }
            }
            for sample in frame.iter_mut() {
                *sample = mixed;
            }
        }

        // 3. Retire finished voices.
        self.voices.retain(|v| v.pos < v.end);
    }
}
