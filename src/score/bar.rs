//! Bar data type — the validated unit of playback.

use std::fmt;

/// Lowest tempo a bar may carry, in beats per minute.
pub const BPM_MIN: u32 = 30;
/// Highest tempo a bar may carry, in beats per minute.
pub const BPM_MAX: u32 = 250;
/// Note values (time-signature denominators) a bar may carry.
pub const NOTE_VALUES: [u32; 4] = [2, 4, 8, 16];

/// Why a raw bar row failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarError {
    /// A field did not parse as a non-negative integer.
    NotInteger,
    /// The tempo field fell outside [`BPM_MIN`]..=[`BPM_MAX`].
    BpmRange,
    /// The note field was not one of [`NOTE_VALUES`].
    NoteValue,
}

impl fmt::Display for BarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarError::NotInteger => write!(f, "Integer required"),
            BarError::BpmRange => write!(f, "BPM can be only {BPM_MIN} - {BPM_MAX}"),
            BarError::NoteValue => write!(f, "note can be only 2, 4, 8 or 16"),
        }
    }
}

impl std::error::Error for BarError {}

/// One unvalidated five-field row, exactly as it appeared in the source.
///
/// Rows from literal lines and pattern bodies both pass through here, so a
/// bad field inside a pattern is reported only when a call expands it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBar {
    fields: [String; 5],
}

impl RawBar {
    /// Build from already-split fields. Returns `None` unless there are
    /// exactly five. Each field is stored trimmed.
    pub fn from_fields(parts: &[&str]) -> Option<Self> {
        let parts: [&str; 5] = parts.try_into().ok()?;
        Some(Self {
            fields: parts.map(|p| p.trim().to_string()),
        })
    }

    /// The trimmed fields in source order: bpm, ticks, note, beats, accent.
    pub fn fields(&self) -> &[String; 5] {
        &self.fields
    }
}

/// A fully validated bar, ready for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    /// Tempo in beats per minute.
    pub bpm: u32,
    /// Clicks per beat (time-signature numerator).
    pub ticks: u32,
    /// Note value (time-signature denominator).
    pub note: u32,
    /// How many beats this bar repeats for.
    pub beats: u32,
    /// Whether the first tick of each beat uses the high click.
    pub accent: bool,
}

impl Bar {
    /// Validate a raw row into a playable bar.
    ///
    /// All five fields must parse as integers; bpm and note are range-checked,
    /// ticks and beats are accepted as-is (zero is legal and plays nothing).
    /// The accent field means "accented" exactly when it equals 1.
    pub fn from_raw(raw: &RawBar) -> Result<Self, BarError> {
        let [bpm, ticks, note, beats, accent] = raw.fields();
        let bpm = parse_field(bpm)?;
        let ticks = parse_field(ticks)?;
        let note = parse_field(note)?;
        let beats = parse_field(beats)?;
        let accent = parse_field(accent)? == 1;

        if !(BPM_MIN..=BPM_MAX).contains(&bpm) {
            return Err(BarError::BpmRange);
        }
        if !NOTE_VALUES.contains(&note) {
            return Err(BarError::NoteValue);
        }

        Ok(Self {
            bpm,
            ticks,
            note,
            beats,
            accent,
        })
    }
}

fn parse_field(field: &str) -> Result<u32, BarError> {
    field.trim().parse().map_err(|_| BarError::NotInteger)
}
