//! Song builder — resolves scanned directives into a flat bar sequence.

use super::bar::{Bar, RawBar};
use super::error::ScoreError;
use super::scan::{Directive, Scan};

/// The fully resolved, ordered sequence of bars for one play-through.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Song {
    bars: Vec<Bar>,
}

impl Song {
    /// Build a song by walking `scan`'s directives in order.
    ///
    /// Literal bars are validated and appended where they stand. A call is
    /// resolved against the pattern table first, then its rows are validated
    /// and appended repeat-count times back to back. The first failure
    /// aborts the build; a partially built song is never returned.
    pub fn build(scan: &Scan) -> Result<Self, ScoreError> {
        let mut song = Song::default();
        for directive in &scan.directives {
            match directive {
                Directive::Bar { line, raw } => song.append(*line, raw)?,
                Directive::Call {
                    line,
                    name,
                    repeats,
                } => {
                    let rows = scan
                        .patterns
                        .get(name)
                        .ok_or_else(|| ScoreError::UnknownPattern {
                            line: *line,
                            name: name.clone(),
                        })?;
                    for _ in 0..*repeats {
                        for raw in rows {
                            song.append(*line, raw)?;
                        }
                    }
                }
            }
        }
        Ok(song)
    }

    /// Wrap already-validated bars.
    pub fn from_bars(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    fn append(&mut self, line: usize, raw: &RawBar) -> Result<(), ScoreError> {
        let bar = Bar::from_raw(raw).map_err(|source| ScoreError::Bar { line, source })?;
        self.bars.push(bar);
        Ok(())
    }

    /// The bars in play order.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Number of bars.
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Whether the song holds no bars.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}
