//! Playback clock — tick timing, cancellation, and the blocking player.

pub mod cancel;
pub mod player;

pub use cancel::CancelToken;
pub use player::{LiveConfig, Outcome, Player, Sound};

/// Nominal click length in seconds. Doubles as the per-trigger duration cap
/// handed to the audio layer.
pub const CLICK_SECONDS: f64 = 0.005;

/// Seconds to wait between two ticks at `bpm` for the given note value.
///
/// `240 / note / bpm` is the length of one beat for that time-signature
/// denominator; the click's own length is subtracted so the audible rate
/// stays on tempo. For very fast settings the result can dip below zero;
/// callers clamp when turning it into a sleep.
pub fn tick_delay(bpm: u32, note: u32) -> f64 {
    240.0 / note as f64 / bpm as f64 - CLICK_SECONDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn quarter_note_at_120() {
        // 240 / 4 / 120 = 0.5s per tick, minus the click length.
        assert_approx_eq!(tick_delay(120, 4), 0.5 - CLICK_SECONDS, 1e-12);
    }

    #[test]
    fn slowest_setting() {
        // 30 BPM over half notes is the longest legal gap: 4 seconds.
        assert_approx_eq!(tick_delay(30, 2), 4.0 - CLICK_SECONDS, 1e-12);
    }

    #[test]
    fn fastest_setting() {
        // 250 BPM over sixteenths: 60ms per tick.
        assert_approx_eq!(tick_delay(250, 16), 0.06 - CLICK_SECONDS, 1e-12);
    }

    #[test]
    fn matches_formula_across_the_legal_range() {
        for bpm in [30u32, 77, 100, 120, 199, 250] {
            for note in [2u32, 4, 8, 16] {
                let expected = 240.0 / note as f64 / bpm as f64 - CLICK_SECONDS;
                assert_approx_eq!(tick_delay(bpm, note), expected, 1e-12);
            }
        }
    }

    #[test]
    fn delay_shrinks_as_tempo_rises() {
        assert!(tick_delay(60, 4) > tick_delay(120, 4));
        assert!(tick_delay(120, 4) > tick_delay(120, 8));
    }
}
