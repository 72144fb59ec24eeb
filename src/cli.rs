//! Command-line interface.
//!
//! Without a score file the metronome plays one fixed bar until
//! interrupted. Tempo flags are validated here so a bad value is
//! rejected before any audio is set up.

use std::path::PathBuf;

use clap::Parser;

use crate::clock::LiveConfig;
use crate::score::{BPM_MAX, BPM_MIN, NOTE_VALUES};

#[derive(Parser, Debug)]
#[command(name = "battuta")]
#[command(version, about = "A programmable command-line metronome", long_about = None)]
pub struct Cli {
    /// Score file to play instead of running live
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Beats per minute for live playback
    #[arg(short, long, default_value_t = 100, value_parser = parse_bpm)]
    pub bpm: u32,

    /// Ticks per beat for live playback
    #[arg(short, long, default_value_t = 4)]
    pub ticks: u32,

    /// Note value: 2, 4, 8 or 16
    #[arg(short, long, default_value_t = 4, value_parser = parse_note)]
    pub note: u32,

    /// Accent the first tick of each beat
    #[arg(short, long)]
    pub accent: bool,

    /// Report tempo and progress while playing
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Bundles the tempo flags into the configuration live playback runs on.
    pub fn live(&self) -> LiveConfig {
        LiveConfig {
            bpm: self.bpm,
            ticks: self.ticks,
            note: self.note,
            accent: self.accent,
        }
    }
}

fn parse_bpm(value: &str) -> Result<u32, String> {
    let bpm: u32 = value.parse().map_err(|_| String::from("Integer required"))?;
    if !(BPM_MIN..=BPM_MAX).contains(&bpm) {
        return Err(format!("BPM can be only {BPM_MIN} - {BPM_MAX}"));
    }
    Ok(bpm)
}

fn parse_note(value: &str) -> Result<u32, String> {
    let note: u32 = value.parse().map_err(|_| String::from("Integer required"))?;
    if !NOTE_VALUES.contains(&note) {
        return Err(String::from("note can be only 2, 4, 8 or 16"));
    }
    Ok(note)
}
