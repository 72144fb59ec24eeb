//! Battuta — a programmable command-line metronome.

pub mod audio;
pub mod cli;
pub mod clock;
pub mod score;
