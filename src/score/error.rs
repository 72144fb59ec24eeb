//! Error type for loading and building songs.

use std::fmt;
use std::io;

use super::bar::BarError;

/// A fatal problem while loading a document or building the song from it.
///
/// Any of these rejects the whole file; scanning diagnostics that merely
/// skip a line are [`super::scan::Warning`]s instead.
#[derive(Debug)]
pub enum ScoreError {
    /// The document could not be read at all.
    Io(io::Error),
    /// A bar failed validation, at the given 1-based source line. For bars
    /// expanded from a pattern this is the calling line.
    Bar { line: usize, source: BarError },
    /// A call referenced a pattern the document never defined.
    UnknownPattern { line: usize, name: String },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::Io(e) => write!(f, "problem loading file: {e}"),
            ScoreError::Bar { line, source } => write!(f, "line {line}: {source}"),
            ScoreError::UnknownPattern { line, .. } => {
                write!(f, "line {line}: No such pattern found")
            }
        }
    }
}

impl std::error::Error for ScoreError {}

impl From<io::Error> for ScoreError {
    fn from(e: io::Error) -> Self {
        ScoreError::Io(e)
    }
}
