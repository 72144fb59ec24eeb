//! Battuta — a programmable command-line metronome.
//!
//! With `--file` it plays a score of bars and pattern calls; without one
//! it clicks a single fixed bar until interrupted. Ctrl-C stops playback
//! cleanly in either mode.

use battuta::audio::{
    default_pair, load_pair, AudioConfig, AudioEngine, AudioError, ClickSound, SilentClick,
};
use battuta::cli::Cli;
use battuta::clock::{CancelToken, Player, Sound, CLICK_SECONDS};
use battuta::score::{Scanner, ScoreError, Song};

use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::Parser;

/// Directory searched for replacement click samples (`high.wav`, `low.wav`).
const SOUND_DIR: &str = "sounds";
/// Seed for the synthesized default clicks.
const SEED: u64 = 42;

/// Start the audio engine and register the click pair on it.
///
/// The engine must stay alive for as long as the handles are used;
/// dropping it tears the output stream down.
fn audio_setup() -> Result<(AudioEngine, Box<dyn Sound>, Box<dyn Sound>), AudioError> {
    let config = AudioConfig::default();
    let mut engine = AudioEngine::new(&config)?;
    let (high, low) = load_clicks(engine.sample_rate());
    let high = engine.register(high)?;
    let low = engine.register(low)?;
    Ok((engine, Box::new(high), Box::new(low)))
}

/// Prefer WAV clicks from `sounds/` when both files are present, otherwise
/// fall back to the synthesized pair.
fn load_clicks(sample_rate: u32) -> (ClickSound, ClickSound) {
    let dir = Path::new(SOUND_DIR);
    if dir.join("high.wav").is_file() && dir.join("low.wav").is_file() {
        match load_pair(dir, sample_rate) {
            Ok(pair) => return pair,
            Err(e) => eprintln!("could not load clicks from {SOUND_DIR}/: {e}"),
        }
    }
    default_pair(sample_rate, SEED)
}

/// Read and parse a score file. Unplayable lines are reported to stderr
/// and skipped; anything worse aborts the load.
fn load_song(path: &Path) -> Result<Song, ScoreError> {
    let source = fs::read_to_string(path).map_err(ScoreError::from)?;
    let scan = Scanner::new(&source).scan();
    for warning in &scan.warnings {
        eprintln!("{warning}");
    }
    Song::build(&scan)
}

fn main() {
    let cli = Cli::parse();

    // 1. Install the interrupt handler before any sound starts.
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        if let Err(e) = ctrlc::set_handler(move || cancel.cancel()) {
            eprintln!("could not install interrupt handler: {e}");
        }
    }

    // 2. Bring up sound output. On failure the metronome still runs,
    //    ticking silently, so timing and reports remain usable.
    let (_engine, high, low): (Option<AudioEngine>, Box<dyn Sound>, Box<dyn Sound>) =
        match audio_setup() {
            Ok((engine, high, low)) => (Some(engine), high, low),
            Err(e) => {
                eprintln!("could not initialize sound system: {e}");
                (None, Box::new(SilentClick), Box::new(SilentClick))
            }
        };

    // 3. Play the score, or a fixed bar until interrupted.
    let max_time = Duration::from_secs_f64(CLICK_SECONDS);
    let player = Player::new(high, low, max_time, cli.verbose, cancel);

    match &cli.file {
        Some(path) => {
            let song = match load_song(path) {
                Ok(song) => song,
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            };
            player.play_song(&song);
        }
        None => {
            player.play_live(&cli.live());
        }
    }
}
