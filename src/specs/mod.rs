// src/specs/mod.rs
//! # Record “specs” module
//!
//! This module hosts the **record-kind layouts** for the cadastral tape.
//! Each kind knows *where a field lives on a line* (through the active
//! [`FormatProfile`]) and *how to read it leniently*.
//!
//! ## What lives here
//! - **Pure line parsing** for R1 (ownership/property) and R2 (construction detail).
//! - **Derived identifiers** (the 20-char cadastral reference built from three
//!   sub-slices of the leading code).
//! - **Lenient decoding**: short lines are rejected per line, numeric junk becomes `0.0`.
//!
//! ## What does **not** live here
//! - **File classification, decoding of bytes, batching** – see `ingest`.
//! - **Joining R1 with R2** – see `consolidate`.
//! - **Tables, export formatting** – see `store` / `export`.
//!
//! ## Conventions & invariants
//! - Spans are characters, not bytes; spans past the line end clamp.
//! - Every text field is trimmed; every numeric field is a finite `f64`.
//! - A rejected line never aborts its file; it is counted, not raised.
use crate::config::FormatProfile;
use crate::config::profile::IdentifierOffsets;
use crate::core::FixedLine;

pub mod r1;
pub mod r2;

pub use r1::PropertyRecord;
pub use r2::DetailRecord;

/// The two record kinds on the tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Basic ownership/property data.
    R1,
    /// Construction/economic detail.
    R2,
}

impl RecordKind {
    pub fn label(self) -> &'static str {
        match self {
            RecordKind::R1 => "R1",
            RecordKind::R2 => "R2",
        }
    }
}

/// Why a single line yielded no record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineError {
    /// Empty, or whitespace only and shorter than the minimum.
    Blank,
    /// Shorter than the profile's minimum (in chars).
    TooShort { len: usize, min: usize },
    /// Long enough, but nothing except whitespace.
    NoData { len: usize },
}

/// Records from one text plus the per-line skip tally.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedLines<T> {
    pub records: Vec<T>,
    pub lines: usize,
    pub blank: usize,
    pub too_short: usize,
    pub no_data: usize,
}

impl<T> ParsedLines<T> {
    /// Lines rejected as malformed (blank lines are not counted).
    pub fn skipped(&self) -> usize { self.too_short + self.no_data }
}

/// Length guard shared by both kinds.
pub(crate) fn check_len(line: &FixedLine, profile: &FormatProfile) -> Result<(), LineError> {
    if line.is_empty() {
        return Err(LineError::Blank);
    }
    let len = line.len();
    let whitespace_only = line.tail(0).is_empty();
    if len < profile.min_line_len {
        return Err(if whitespace_only {
            LineError::Blank
        } else {
            LineError::TooShort { len, min: profile.min_line_len }
        });
    }
    if whitespace_only {
        return Err(LineError::NoData { len });
    }
    Ok(())
}

/// dept/muni + sector + block/property, e.g. `08141` + `0001` + `00010001000`.
pub fn derive_reference(line: &FixedLine, id: &IdentifierOffsets) -> String {
    join!(line.slice(id.dept_muni), line.slice(id.sector), line.slice(id.block_property))
        .trim()
        .to_string()
}

/// Run `parse` over every line of `text`, tallying rejects.
pub(crate) fn parse_lines<T, F>(text: &str, mut parse: F) -> ParsedLines<T>
where
    F: FnMut(&str) -> Result<T, LineError>,
{
    let mut out = ParsedLines { records: Vec::new(), lines: 0, blank: 0, too_short: 0, no_data: 0 };
    for line in text.lines() {
        out.lines += 1;
        match parse(line) {
            Ok(rec) => out.records.push(rec),
            Err(LineError::Blank) => out.blank += 1,
            Err(LineError::TooShort { .. }) => out.too_short += 1,
            Err(LineError::NoData { .. }) => out.no_data += 1,
        }
    }
    out
}
