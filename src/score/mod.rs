//! The .mt score format — scanning, validation, and song building.
//!
//! A document is a line-oriented UTF-8 text: comment and blank lines,
//! pattern definitions (`name = [ ... ]` with one five-field row per line
//! inside the brackets), pattern calls (`@name, repeats`), and literal bars
//! (`bpm,ticks,note,beats,accent`). [`Scanner`] extracts directives and the
//! pattern table; [`Song::build`] resolves them into validated [`Bar`]s.

pub mod bar;
pub mod error;
pub mod pattern;
pub mod scan;
pub mod song;

pub use bar::{Bar, BarError, RawBar, BPM_MAX, BPM_MIN, NOTE_VALUES};
pub use error::ScoreError;
pub use pattern::PatternTable;
pub use scan::{Directive, Scan, Scanner, Warning};
pub use song::Song;

/// Scan `source` and build the song in one step, discarding warnings.
///
/// Callers that want the per-line warnings run [`Scanner`] and
/// [`Song::build`] themselves.
pub fn parse(source: &str) -> Result<Song, ScoreError> {
    let scan = Scanner::new(source).scan();
    Song::build(&scan)
}
