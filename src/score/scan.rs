//! Scanner for the .mt song format.
//!
//! Scanning is two passes over the same document. The pattern pass walks the
//! whole text character by character and registers every `name = [ ... ]`
//! block it finds, wherever it sits. The directive pass walks line by line
//! with an explicit outside/inside-block state, collecting pattern calls and
//! literal bars in order and skipping everything a pattern block covers.

use std::fmt;

use super::bar::RawBar;
use super::pattern::PatternTable;

/// One playable instruction, tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// A literal bar line, kept raw until the song is built.
    Bar { line: usize, raw: RawBar },
    /// A pattern call to expand `repeats` times at this position.
    Call {
        line: usize,
        name: String,
        repeats: u32,
    },
}

/// A non-fatal diagnostic for a line that matched nothing playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning {
    pub line: usize,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: this line will not be played", self.line)
    }
}

/// Everything extracted from one document.
#[derive(Debug)]
pub struct Scan {
    pub directives: Vec<Directive>,
    pub patterns: PatternTable,
    pub warnings: Vec<Warning>,
}

/// Directive-pass state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InPattern,
}

/// Scans one .mt document. Scanning never fails; bad input surfaces as
/// warnings here or as validation errors when the song is built.
pub struct Scanner<'a> {
    source: &'a str,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Run both passes.
    pub fn scan(&self) -> Scan {
        let patterns = self.collect_patterns();
        let (directives, warnings) = self.collect_directives();
        Scan {
            directives,
            patterns,
            warnings,
        }
    }

    /// Pattern pass: find every `name = [ ... ]` block in the raw text.
    ///
    /// This pass is blind to line structure, so a definition may span lines
    /// and may even sit inside a comment. The bracket body admits only
    /// digits, commas, and whitespace and must not be empty; anything else
    /// means the candidate is not a definition and scanning moves on.
    fn collect_patterns(&self) -> PatternTable {
        let mut table = PatternTable::new();
        let chars: Vec<char> = self.source.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if !chars[i].is_ascii_alphanumeric() {
                i += 1;
                continue;
            }

            let name_start = i;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }

            let mut j = skip_whitespace(&chars, i);
            if chars.get(j) != Some(&'=') {
                continue;
            }
            j = skip_whitespace(&chars, j + 1);
            if chars.get(j) != Some(&'[') {
                continue;
            }
            j += 1;

            let body_start = j;
            while j < chars.len() && is_body_char(chars[j]) {
                j += 1;
            }
            if j == body_start || chars.get(j) != Some(&']') {
                continue;
            }

            let name: String = chars[name_start..i].iter().collect();
            let body: String = chars[body_start..j].iter().collect();
            table.define(name, body_rows(&body));
            i = j + 1;
        }

        table
    }

    /// Directive pass: line-oriented scan with a two-state block skipper.
    fn collect_directives(&self) -> (Vec<Directive>, Vec<Warning>) {
        let mut directives = Vec::new();
        let mut warnings = Vec::new();
        let mut state = State::Outside;

        for (idx, raw_line) in self.source.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();

            // Comments and blank lines never affect block state.
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if opens_pattern(line) {
                state = State::InPattern;
            }
            if state == State::InPattern {
                if line.ends_with(']') {
                    state = State::Outside;
                }
                continue;
            }

            if let Some((name, repeats)) = parse_call(line) {
                directives.push(Directive::Call {
                    line: line_no,
                    name,
                    repeats,
                });
                continue;
            }
            if let Some(raw) = parse_literal(line) {
                directives.push(Directive::Bar { line: line_no, raw });
                continue;
            }

            warnings.push(Warning { line: line_no });
        }

        (directives, warnings)
    }
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while i < chars.len() && chars[i].is_whitespace() {
        i += 1;
    }
    i
}

fn is_body_char(c: char) -> bool {
    c.is_ascii_digit() || c == ',' || c.is_whitespace()
}

/// Split a bracket body into rows, one per newline. Rows that do not hold
/// exactly five fields are dropped without complaint.
fn body_rows(body: &str) -> Vec<RawBar> {
    body.split('\n')
        .filter_map(|row| {
            let parts: Vec<&str> = row.trim().split(',').collect();
            RawBar::from_fields(&parts)
        })
        .collect()
}

/// Whether a trimmed line starts a pattern block: an alphanumeric name
/// followed (after optional spacing) by `=`.
fn opens_pattern(line: &str) -> bool {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.len() < line.len() && rest.trim_start().starts_with('=')
}

/// Parse a whole line as a pattern call: `@name, repeats`.
///
/// The comma must follow the name directly; spacing is allowed only between
/// the comma and the count. Anything trailing disqualifies the line.
fn parse_call(line: &str) -> Option<(String, u32)> {
    let rest = line.strip_prefix('@')?;
    let name_end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if name_end == 0 {
        return None;
    }
    let (name, tail) = rest.split_at(name_end);
    let count = tail.strip_prefix(',')?.trim_start();
    if count.is_empty() || !count.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let repeats = count.parse().ok()?;
    Some((name.to_string(), repeats))
}

/// Parse a whole line as a literal bar: five comma-separated fields, the
/// first four unsigned integers, the accent field exactly 0 or 1.
fn parse_literal(line: &str) -> Option<RawBar> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    if parts.len() != 5 {
        return None;
    }
    let ints_ok = parts[..4]
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));
    if !ints_ok || !matches!(parts[4], "0" | "1") {
        return None;
    }
    RawBar::from_fields(&parts)
}
