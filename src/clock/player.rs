//! The blocking playback loop.
//!
//! The player owns no timing state across ticks: trigger a click, sleep the
//! computed delay, repeat. Cancellation is polled at every tick boundary so
//! an interrupt lands between triggers, never mid-trigger.

use std::thread;
use std::time::Duration;

use crate::score::Song;

use super::{tick_delay, CancelToken};

/// A triggerable click. The player only ever starts playback, bounded to a
/// maximum audible duration; decoding and mixing live behind this trait.
pub trait Sound {
    fn play(&self, max: Duration);
}

impl Sound for Box<dyn Sound> {
    fn play(&self, max: Duration) {
        self.as_ref().play(max);
    }
}

/// How a playback run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The song ran to its end.
    Completed,
    /// Cancellation was observed at a tick boundary.
    Interrupted,
}

/// Musical parameters for unbounded live playback, fixed before the loop
/// starts and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveConfig {
    pub bpm: u32,
    pub ticks: u32,
    pub note: u32,
    pub accent: bool,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            bpm: 100,
            ticks: 4,
            note: 4,
            accent: false,
        }
    }
}

/// The scheduler: walks bars, beats, and ticks in their nested order,
/// triggering the high or low click and sleeping in between.
pub struct Player<S: Sound> {
    high: S,
    low: S,
    max_time: Duration,
    verbose: bool,
    cancel: CancelToken,
}

impl<S: Sound> Player<S> {
    pub fn new(high: S, low: S, max_time: Duration, verbose: bool, cancel: CancelToken) -> Self {
        Self {
            high,
            low,
            max_time,
            verbose,
            cancel,
        }
    }

    /// Play `song` front to back. Blocks until done or cancelled.
    pub fn play_song(&self, song: &Song) -> Outcome {
        for bar in song.bars() {
            if self.verbose {
                println!(
                    "{}",
                    report_line(
                        bar.bpm,
                        bar.ticks,
                        bar.note,
                        bar.accent,
                        &bar.beats.to_string()
                    )
                );
            }
            let delay = sleep_time(tick_delay(bar.bpm, bar.note));
            for _ in 0..bar.beats {
                if !self.beat(bar.ticks, bar.accent, delay) {
                    return self.interrupted();
                }
            }
        }
        Outcome::Completed
    }

    /// Repeat one bar shape without bound. Blocks until cancelled.
    pub fn play_live(&self, config: &LiveConfig) -> Outcome {
        if self.verbose {
            println!(
                "{}",
                report_line(
                    config.bpm,
                    config.ticks,
                    config.note,
                    config.accent,
                    "Infinite"
                )
            );
        }
        let delay = sleep_time(tick_delay(config.bpm, config.note));
        loop {
            // A zero-tick beat never polls the token, so poll here as well.
            if self.cancel.is_cancelled() {
                return self.interrupted();
            }
            if !self.beat(config.ticks, config.accent, delay) {
                return self.interrupted();
            }
        }
    }

    /// One beat: `ticks` triggers, the first one accented when asked for.
    /// Returns false as soon as cancellation is observed.
    fn beat(&self, ticks: u32, accent: bool, delay: Duration) -> bool {
        for tick in 0..ticks {
            if self.cancel.is_cancelled() {
                return false;
            }
            if tick == 0 && accent {
                self.high.play(self.max_time);
            } else {
                self.low.play(self.max_time);
            }
            thread::sleep(delay);
        }
        true
    }

    fn interrupted(&self) -> Outcome {
        if self.verbose {
            println!("Bye");
        }
        Outcome::Interrupted
    }
}

/// The verbose summary printed before a bar (or the live loop) starts.
fn report_line(bpm: u32, ticks: u32, note: u32, accent: bool, repeats: &str) -> String {
    format!(
        "BPM: {bpm} - Metrum {ticks}/{note} - Accent: {} - Repeats: {repeats}",
        if accent { "yes" } else { "no" }
    )
}

/// Clamp a computed delay into a sleepable duration.
fn sleep_time(seconds: f64) -> Duration {
    Duration::from_secs_f64(seconds.max(0.0))
}
